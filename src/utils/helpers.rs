use opencv::{core, imgproc, prelude::*};

use super::constants::K_RECT_THICKNESS;

/// Single channel copy of `src`. Grayscale input is cloned as is.
pub fn to_luminance(src: &Mat) -> opencv::Result<Mat> {
    let code = match src.channels() {
        1 => return src.try_clone(),
        4 => imgproc::COLOR_BGRA2GRAY,
        _ => imgproc::COLOR_BGR2GRAY,
    };
    let mut gray = Mat::default();
    imgproc::cvt_color_def(src, &mut gray, code)?;
    Ok(gray)
}

pub fn compute_roi(mat: &Mat, sub_mat: &core::Rect) -> opencv::Result<Mat> {
    Ok(mat.roi(*sub_mat)?.clone_pointee())
}

pub fn bgr(color: [f64; 3]) -> core::Scalar {
    core::Scalar::new(color[0], color[1], color[2], 0.)
}

pub fn draw_rect(
    mat: &mut Mat,
    rect: core::Rect,
    color: [f64; 3],
    thickness: i32,
) -> opencv::Result<()> {
    imgproc::rectangle(mat, rect, bgr(color), thickness, imgproc::LINE_8, 0)
}

pub fn draw_rects<I>(mat: &mut Mat, rects: I, color: [f64; 3]) -> opencv::Result<()>
where
    I: IntoIterator<Item = core::Rect>,
{
    for rect in rects {
        draw_rect(mat, rect, color, K_RECT_THICKNESS)?;
    }
    Ok(())
}

/// `wait_key` yields -1 on timeout, some backends report 255 instead.
pub fn is_key_press(key: i32) -> bool {
    key >= 0 && key != 255
}
