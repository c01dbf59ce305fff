use crate::batch::Batch;
use crate::codec;
use crate::collection::Collection;
use crate::component::{Component, ComponentDescriptorRef};
use arrow::array::ArrayRef;
use arrowlog_array::{AllocatorRef, BuilderOptions, CodecResult};
use std::sync::Arc;


/// Record aggregating several optional component collections.
pub trait Archetype: Sized {
    const NAME: &'static str;

    /// Name of the indicator component tagging batches of this archetype
    const INDICATOR: &'static str;

    /// Builds the field table. Use [`crate::archetype_descriptor_for`] for the shared instance.
    fn archetype_descriptor() -> ArchetypeDescriptor;

    /// Field values in declaration order, one per [`ArchetypeDescriptor::fields`] entry.
    fn component_batches(&self) -> Vec<&dyn ComponentBatch>;

    fn from_batch(batch: &Batch) -> CodecResult<Self>;
}


#[derive(Debug, Clone)]
pub struct ArchetypeField {
    pub name: &'static str,
    pub component: ComponentDescriptorRef
}


#[derive(Debug)]
pub struct ArchetypeDescriptor {
    name: &'static str,
    indicator: &'static str,
    fields: Vec<ArchetypeField>
}


pub type ArchetypeDescriptorRef = Arc<ArchetypeDescriptor>;


impl ArchetypeDescriptor {
    pub fn new(name: &'static str, indicator: &'static str, fields: Vec<ArchetypeField>) -> Self {
        Self {
            name,
            indicator,
            fields
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn indicator(&self) -> &'static str {
        self.indicator
    }

    pub fn fields(&self) -> &[ArchetypeField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&ArchetypeField> {
        self.fields.iter().find(|f| f.name == name)
    }
}


/// Type-erased collection of component values.
pub trait ComponentBatch {
    fn component_descriptor(&self) -> ComponentDescriptorRef;

    /// `false` when the field is unset and should produce no column
    fn is_set(&self) -> bool;

    fn num_records(&self) -> usize;

    fn to_arrow(&self, allocator: &AllocatorRef, options: &BuilderOptions) -> CodecResult<ArrayRef>;
}


impl <C: Component> ComponentBatch for Collection<C> {
    fn component_descriptor(&self) -> ComponentDescriptorRef {
        C::component_descriptor()
    }

    fn is_set(&self) -> bool {
        Collection::is_set(self)
    }

    fn num_records(&self) -> usize {
        self.len()
    }

    fn to_arrow(&self, allocator: &AllocatorRef, options: &BuilderOptions) -> CodecResult<ArrayRef> {
        codec::to_arrow_with(self.as_slice().unwrap_or(&[]), allocator, options)
    }
}
