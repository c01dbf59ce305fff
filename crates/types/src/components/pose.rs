use crate::datatypes::{Quaternion, RotationAxisAngle, Vec3D};


crate::component! {
    /// Translation of an instance pose.
    #[derive(Copy, Default)]
    PoseTranslation3D(Vec3D) : "arrowlog.components.PoseTranslation3D"
}


crate::component! {
    /// Per-axis scale of an instance pose.
    #[derive(Copy)]
    PoseScale3D(Vec3D) : "arrowlog.components.PoseScale3D"
}


crate::component! {
    #[derive(Copy, Default)]
    PoseRotationQuat(Quaternion) : "arrowlog.components.PoseRotationQuat"
}


crate::component! {
    #[derive(Copy)]
    PoseRotationAxisAngle(RotationAxisAngle) : "arrowlog.components.PoseRotationAxisAngle"
}


impl PoseTranslation3D {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vec3D::new(x, y, z))
    }
}


impl From<[f32; 3]> for PoseTranslation3D {
    fn from(value: [f32; 3]) -> Self {
        Self(value.into())
    }
}


impl PoseScale3D {
    pub const IDENTITY: PoseScale3D = PoseScale3D(Vec3D::ONE);

    pub const fn uniform(scale: f32) -> Self {
        Self(Vec3D::new(scale, scale, scale))
    }
}


impl Default for PoseScale3D {
    fn default() -> Self {
        Self::IDENTITY
    }
}


impl From<[f32; 3]> for PoseScale3D {
    fn from(value: [f32; 3]) -> Self {
        Self(value.into())
    }
}


impl From<f32> for PoseScale3D {
    fn from(value: f32) -> Self {
        Self::uniform(value)
    }
}


impl PoseRotationAxisAngle {
    pub fn new(axis: impl Into<Vec3D>, angle: f32) -> Self {
        Self(RotationAxisAngle::new(axis, angle))
    }
}
