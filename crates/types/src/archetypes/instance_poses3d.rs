use crate::components::{PoseRotationAxisAngle, PoseRotationQuat, PoseScale3D, PoseTranslation3D};


crate::archetype! {
    /// Poses of instances relative to their parent, one entry per instance.
    ///
    /// Fields are applied in the order translation, rotation, scale.
    InstancePoses3D : "arrowlog.archetypes.InstancePoses3D",
    indicator: "arrowlog.components.InstancePoses3DIndicator" {
        translations: PoseTranslation3D => with_translations,
        rotation_axis_angles: PoseRotationAxisAngle => with_rotation_axis_angles,
        quaternions: PoseRotationQuat => with_quaternions,
        scales: PoseScale3D => with_scales,
    }
}


impl InstancePoses3D {
    /// Number of instances described, the length of the longest set field.
    pub fn num_instances(&self) -> usize {
        [
            self.translations.len(),
            self.rotation_axis_angles.len(),
            self.quaternions.len(),
            self.scales.len()
        ].into_iter().max().unwrap_or(0)
    }
}
