mod annotation_context;
mod keypoint_ids;
mod pose;
mod text;


pub use annotation_context::*;
pub use keypoint_ids::*;
pub use pose::*;
pub use text::*;
