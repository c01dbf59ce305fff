use crate::components;
use crate::datatypes::ClassDescriptionMapElem;


crate::archetype! {
    /// Class descriptions shared by everything logged under the same path.
    AnnotationContext : "arrowlog.archetypes.AnnotationContext",
    indicator: "arrowlog.components.AnnotationContextIndicator" {
        context: components::AnnotationContext => with_context,
    }
}


impl AnnotationContext {
    pub fn from_classes<I>(classes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ClassDescriptionMapElem>
    {
        Self::new().with_context([components::AnnotationContext::new(classes)])
    }
}
