crate::arrow_struct! {
    /// Rotation quaternion stored in `x, y, z, w` order.
    #[derive(Copy)]
    Quaternion : "arrowlog.datatypes.Quaternion" {
        x: f32,
        y: f32,
        z: f32,
        w: f32,
    }
}


impl Quaternion {
    pub const IDENTITY: Quaternion = Quaternion::from_xyzw([0.0, 0.0, 0.0, 1.0]);

    pub const fn from_xyzw([x, y, z, w]: [f32; 4]) -> Self {
        Self { x, y, z, w }
    }

    pub const fn from_wxyz([w, x, y, z]: [f32; 4]) -> Self {
        Self { x, y, z, w }
    }
}


impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}
