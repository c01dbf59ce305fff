use crate::registry;
use arrow::array::Array;
use arrow::datatypes::DataType;
use arrowlog_array::{ArrowDeserialize, ArrowSerialize, CodecError, CodecResult, Descriptor, DescriptorRef};
use std::sync::Arc;


/// Semantically named value type that is serialized into its own column.
pub trait Component: ArrowSerialize + ArrowDeserialize + Clone {
    /// Fully qualified component name, e.g. `arrowlog.components.Text`
    const NAME: &'static str;

    /// Registered descriptor of this component.
    fn component_descriptor() -> ComponentDescriptorRef {
        registry::descriptor_for::<Self>()
    }
}


#[derive(Debug)]
pub struct ComponentDescriptor {
    name: &'static str,
    descriptor: DescriptorRef,
    data_type: DataType
}


pub type ComponentDescriptorRef = Arc<ComponentDescriptor>;


impl ComponentDescriptor {
    pub fn new(name: &'static str, descriptor: Descriptor) -> Self {
        let data_type = descriptor.to_arrow();
        Self {
            name,
            descriptor: Arc::new(descriptor),
            data_type
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn descriptor(&self) -> &DescriptorRef {
        &self.descriptor
    }

    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    /// Checks that the array has exactly the datatype of this component.
    pub fn validate(&self, array: &dyn Array) -> CodecResult<()> {
        if array.data_type() == &self.data_type {
            Ok(())
        } else {
            Err(CodecError::datatype_mismatch(self.data_type.clone(), array.data_type()))
        }
    }
}
