// Calibration and tuning constants shared by the native and web frontends.

// Iris geometry (MediaPipe face mesh with refined landmarks)
pub const IRIS_DIAMETER_MM: f32 = 11.7; // average human iris diameter
pub const NORMALIZED_FOCAL_X: f32 = 1.40625; // focal length / min(frame w, h)
pub const LEFT_IRIS_LANDMARKS: [usize; 4] = [474, 475, 476, 477];

// Gaze smoothing
pub const SMOOTHING_ALPHA: f32 = 0.3; // lower = smoother but more lag
pub const MOVEMENT_THRESHOLD: f32 = 0.02; // NDC dead-zone per axis

// Viewer distance
pub const DEFAULT_DISTANCE_CM: f32 = 60.0;
pub const DISTANCE_SCALE_SPAN_CM: f32 = 200.0; // cm of distance per unit of scale
pub const DISTANCE_SCALE_MIN: f32 = 0.8;
pub const DISTANCE_SCALE_MAX: f32 = 1.2;

// Camera intrinsics
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_Z: f32 = 6.0; // nominal eye distance from the scene centre
pub const VERTICAL_OFFSET: f32 = 2.0; // look-at target sits this far below eye level
pub const FRUSTUM_DAMPING: f32 = 0.5; // parallax strength of the frustum skew

// Scene layout
pub const STATIC_DISK_COUNT: usize = 8;
pub const STATIC_DISK_RADIUS: f32 = 3.0; // radius of the sphere they sit on
pub const MOVING_DISK_COUNT: usize = 5;
pub const MOVING_DISK_RADIUS: f32 = 4.0;
pub const DISK_SIZE: f32 = 0.5; // disk radius
pub const DISK_THICKNESS: f32 = 0.2;
pub const DISK_SPEED_MIN: f32 = 3.0; // world units per second
pub const DISK_SPEED_SPAN: f32 = 6.0;
pub const DISK_START_STAGGER_SEC: f32 = 2.0;
pub const DISK_STOP_RADIUS: f32 = 2.0;
pub const DISK_STOP_MARGIN: f32 = 1e-3; // how far inside the stop sphere a clamped disk lands
pub const GRID_SIZE: f32 = 8.0;
pub const GRID_DIVISIONS: usize = 8;
pub const GRID_Y: f32 = -VERTICAL_OFFSET;
