use crate::datatypes::Vec3D;


crate::arrow_struct! {
    /// Rotation by `angle` radians around `axis`.
    #[derive(Copy)]
    RotationAxisAngle : "arrowlog.datatypes.RotationAxisAngle" {
        /// Not required to be normalized
        axis: Vec3D,
        angle: f32,
    }
}


impl RotationAxisAngle {
    pub fn new(axis: impl Into<Vec3D>, angle: f32) -> Self {
        Self {
            axis: axis.into(),
            angle
        }
    }
}
