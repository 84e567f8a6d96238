use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};

use eye_detection::capture::CameraSource;
use eye_detection::config::{AppConfig, Args, Mode};
use eye_detection::display::HighGui;
use eye_detection::logging;
use eye_detection::session::Session;
use eye_detection::CascadeModel;

fn run(config: AppConfig) -> Result<()> {
    let face_classifier = CascadeModel::load(&config.cascade_file_face)
        .context("Face cascade is required")?;
    let eye_classifier = CascadeModel::load(&config.cascade_file_eye)
        .context("Eye cascade is required")?;
    info!(
        "Loaded cascades {:?} and {:?}",
        face_classifier.path(),
        eye_classifier.path()
    );

    let mut session = Session::new(
        face_classifier,
        eye_classifier,
        config.detection,
        config.annotate,
    );
    let mut viewer = HighGui;

    match config.mode {
        Mode::StillImage(path) => {
            info!("Detecting on {:?}", path);
            let report = session.run_still_image(&path, &mut viewer)?;
            info!("{}", report);
        }
        Mode::Camera(index) => {
            info!("Detecting on camera #{}", index);
            let camera = CameraSource::open(index)?;
            session.run_camera(camera, &mut viewer)?;
        }
    }
    Ok(())
}

fn main() {
    logging::init();

    let args = Args::parse();
    let outcome = AppConfig::try_from(args)
        .map_err(anyhow::Error::from)
        .and_then(run);

    if let Err(err) = outcome {
        error!("{:#}", err);
        std::process::exit(1);
    }
}
