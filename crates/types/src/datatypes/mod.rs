mod annotation;
mod quaternion;
mod rotation_axis_angle;
mod vec3d;


pub use annotation::*;
pub use quaternion::*;
pub use rotation_axis_angle::*;
pub use vec3d::*;
