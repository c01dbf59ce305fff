use crate::datatypes::ClassDescriptionMapElem;
use crate::Collection;


crate::component! {
    /// Class descriptions used to resolve class and keypoint ids to labels and colors.
    #[derive(Default, Eq)]
    AnnotationContext { class_map: Collection<ClassDescriptionMapElem> } : "arrowlog.components.AnnotationContext"
}


impl AnnotationContext {
    pub fn new<I>(classes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ClassDescriptionMapElem>
    {
        Self {
            class_map: classes.into_iter().map(Into::into).collect()
        }
    }
}
