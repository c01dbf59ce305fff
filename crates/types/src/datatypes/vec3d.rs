crate::arrow_struct! {
    #[derive(Copy, Default)]
    Vec3D : "arrowlog.datatypes.Vec3D" {
        x: f32,
        y: f32,
        z: f32,
    }
}


impl Vec3D {
    pub const ZERO: Vec3D = Vec3D::new(0.0, 0.0, 0.0);
    pub const ONE: Vec3D = Vec3D::new(1.0, 1.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}


impl From<[f32; 3]> for Vec3D {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}


impl From<Vec3D> for [f32; 3] {
    fn from(v: Vec3D) -> Self {
        [v.x, v.y, v.z]
    }
}
