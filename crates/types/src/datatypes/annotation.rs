crate::arrow_newtype! {
    /// Semantic class a detection belongs to.
    #[derive(Copy, Default, Eq, Hash, PartialOrd, Ord)]
    ClassId(u16) : "arrowlog.datatypes.ClassId"
}


crate::arrow_newtype! {
    /// Type of a semantic keypoint, meaningful only within its class.
    #[derive(Copy, Default, Eq, Hash, PartialOrd, Ord)]
    KeypointId(u16) : "arrowlog.datatypes.KeypointId"
}


crate::arrow_struct! {
    /// Label and color for a class or keypoint id.
    #[derive(Eq)]
    AnnotationInfo : "arrowlog.datatypes.AnnotationInfo" {
        id: u16,
        label: String,
        /// `0xRRGGBBAA`
        color: u32,
    }
}


impl AnnotationInfo {
    pub fn new(id: u16, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            color: 0
        }
    }

    pub fn with_rgb(mut self, r: u8, g: u8, b: u8) -> Self {
        self.color = u32::from_be_bytes([r, g, b, 0xff]);
        self
    }
}


crate::arrow_struct! {
    #[derive(Eq)]
    ClassDescriptionMapElem : "arrowlog.datatypes.ClassDescriptionMapElem" {
        class_id: ClassId,
        info: AnnotationInfo,
    }
}


impl From<AnnotationInfo> for ClassDescriptionMapElem {
    fn from(info: AnnotationInfo) -> Self {
        Self {
            class_id: ClassId(info.id),
            info
        }
    }
}


impl From<(u16, &str)> for ClassDescriptionMapElem {
    fn from((id, label): (u16, &str)) -> Self {
        AnnotationInfo::new(id, label).into()
    }
}
