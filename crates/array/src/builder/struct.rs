use crate::alloc::AllocatorRef;
use crate::builder::nullmask::NullmaskBuilder;
use crate::builder::{AnyBuilder, ArrayBuilder};
use crate::descriptor::{struct_fields, FieldDescriptor};
use crate::error::{invalid_argument, invalid_state, CodecResult};
use arrow::array::{ArrayRef, StructArray};
use arrow::datatypes::{DataType, Fields};
use std::sync::Arc;


/// Struct column over dynamically typed field builders.
///
/// A row is written by appending exactly one value to every field
/// and then calling [`StructBuilder::append`].
pub struct StructBuilder {
    fields: Fields,
    nulls: NullmaskBuilder,
    columns: Vec<AnyBuilder>
}


impl StructBuilder {
    pub fn new(fields: &[FieldDescriptor], allocator: &AllocatorRef) -> CodecResult<Self> {
        let columns = fields.iter()
            .map(|f| AnyBuilder::new(&f.descriptor, allocator))
            .collect::<CodecResult<Vec<_>>>()?;

        Ok(Self {
            fields: struct_fields(fields),
            nulls: NullmaskBuilder::new(0, allocator)?,
            columns
        })
    }

    pub fn num_fields(&self) -> usize {
        self.columns.len()
    }

    pub fn field_mut(&mut self, i: usize) -> CodecResult<&mut AnyBuilder> {
        let num_fields = self.columns.len();
        self.columns.get_mut(i).ok_or_else(|| {
            invalid_argument!("field index {} is out of bounds of a struct with {} fields", i, num_fields)
        })
    }

    pub fn field_by_name(&mut self, name: &str) -> CodecResult<&mut AnyBuilder> {
        let i = self.fields.iter().position(|f| f.name() == name).ok_or_else(|| {
            invalid_argument!("struct has no field `{}`", name)
        })?;
        Ok(&mut self.columns[i])
    }

    /// Completes a row. Every field must have received exactly one value for it.
    pub fn append(&mut self) -> CodecResult<()> {
        let expected = self.nulls.len() + 1;
        if let Some((field, column)) = self.fields.iter()
            .zip(self.columns.iter())
            .find(|(_, c)| c.len() != expected)
        {
            return Err(invalid_state!(
                "struct field `{}` holds {} values, but the row count is {}",
                field.name(),
                column.len(),
                expected
            ))
        }
        self.nulls.append(true)
    }

    /// Appends a null row, writing a null into every field.
    pub fn append_null(&mut self) -> CodecResult<()> {
        for c in self.columns.iter_mut() {
            c.append_null()?;
        }
        self.nulls.append(false)
    }

    pub fn finish(self) -> StructArray {
        if self.fields.is_empty() {
            let len = self.nulls.len();
            return StructArray::new_empty_fields(len, self.nulls.finish())
        }
        StructArray::new(
            self.fields,
            self.columns.into_iter().map(|c| c.finish()).collect(),
            self.nulls.finish()
        )
    }
}


impl ArrayBuilder for StructBuilder {
    fn data_type(&self) -> DataType {
        DataType::Struct(self.fields.clone())
    }

    fn len(&self) -> usize {
        self.nulls.len()
    }

    fn byte_size(&self) -> usize {
        self.nulls.byte_size() + self.columns.iter().map(|c| c.byte_size()).sum::<usize>()
    }

    fn reserve(&mut self, additional: usize) -> CodecResult<()> {
        self.nulls.reserve(additional)?;
        for c in self.columns.iter_mut() {
            c.reserve(additional)?;
        }
        Ok(())
    }

    fn finish(self) -> ArrayRef {
        Arc::new(self.finish())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::system_allocator;
    use crate::descriptor::{Descriptor, ScalarType};
    use crate::error::CodecError;
    use arrow::array::{Array, AsArray};
    use arrow::datatypes::Float32Type;

    fn vec2() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("x", Descriptor::Scalar(ScalarType::Float32)),
            FieldDescriptor::new("y", Descriptor::Scalar(ScalarType::Float32)),
        ]
    }

    #[test]
    fn rows_are_written_column_wise() {
        let allocator = system_allocator();
        let mut builder = StructBuilder::new(&vec2(), &allocator).unwrap();
        for i in 0..3 {
            builder.field_mut(0).unwrap().as_primitive_mut::<Float32Type>().unwrap().append(i as f32).unwrap();
            builder.field_by_name("y").unwrap().as_primitive_mut::<Float32Type>().unwrap().append(-(i as f32)).unwrap();
            builder.append().unwrap();
        }

        let array = builder.finish();
        assert_eq!(array.len(), 3);
        assert!(array.nulls().is_none());
        let y = array.column_by_name("y").unwrap().as_primitive::<Float32Type>();
        assert_eq!(y.values().as_ref(), &[0.0, -1.0, -2.0]);
    }

    #[test]
    fn incomplete_row_is_rejected() {
        let allocator = system_allocator();
        let mut builder = StructBuilder::new(&vec2(), &allocator).unwrap();
        builder.field_mut(0).unwrap().as_primitive_mut::<Float32Type>().unwrap().append(1.0).unwrap();

        assert!(matches!(builder.append(), Err(CodecError::InvalidState(_))));
        assert!(matches!(builder.field_mut(2), Err(CodecError::InvalidArgument(_))));
    }
}
