pub const K_DEFAULT_CASCADE_FILE_FACE: &str = "haarcascade_frontalface_default.xml";
pub const K_DEFAULT_CASCADE_FILE_EYE: &str = "haarcascade_eye.xml";

pub const K_SCALE_FACTOR: f64 = 1.3;
pub const K_MIN_NEIGHBORS: u32 = 5;

// detectMultiScale defaults, used for the eye cascade
pub const K_EYE_SCALE_FACTOR: f64 = 1.1;
pub const K_EYE_MIN_NEIGHBORS: i32 = 3;

// BGR
pub const K_GREEN: [f64; 3] = [0., 255., 0.];
pub const K_CYAN: [f64; 3] = [255., 255., 0.];

pub const K_RECT_THICKNESS: i32 = 2;

pub const K_IMAGE_WINDOW: &str = "Image";
pub const K_CAMERA_WINDOW: &str = "Camera";
pub const K_CAMERA_POLL_MS: i32 = 1;
