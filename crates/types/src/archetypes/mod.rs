mod annotation_context;
mod instance_poses3d;


pub use annotation_context::*;
pub use instance_poses3d::*;
