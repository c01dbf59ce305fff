use crate::alloc::AllocatorRef;
use crate::builder::nullmask::NullmaskBuilder;
use crate::builder::offsets::OffsetsBuilder;
use crate::builder::{AnyBuilder, ArrayBuilder};
use crate::convert::ArrowSerialize;
use crate::error::CodecResult;
use arrow::array::{ArrayRef, ListArray};
use arrow::datatypes::{DataType, Field, FieldRef};
use std::sync::Arc;


/// Variable length list column.
///
/// Child elements are written into [`ListBuilder::values`] first,
/// then the slot is closed with [`ListBuilder::append`].
pub struct ListBuilder<T> {
    nulls: NullmaskBuilder,
    offsets: OffsetsBuilder,
    values: T,
    field: FieldRef
}


impl <T: ArrayBuilder> ListBuilder<T> {
    pub fn new(
        capacity: usize,
        values: T,
        nullable: bool,
        allocator: &AllocatorRef
    ) -> CodecResult<Self>
    {
        let field = Field::new_list_field(values.data_type(), nullable);
        Ok(Self {
            nulls: NullmaskBuilder::new(capacity, allocator)?,
            offsets: OffsetsBuilder::new(capacity, allocator)?,
            values,
            field: Arc::new(field)
        })
    }

    /// Closes a slot holding every child appended since the previous slot.
    pub fn append(&mut self) -> CodecResult<()> {
        self.offsets.append(self.values.len())?;
        self.nulls.append(true)
    }

    /// Appends a valid slot without children.
    ///
    /// This is how an unset nested collection is encoded:
    /// as a zero-length entry, not as a null.
    pub fn append_absent(&mut self) -> CodecResult<()> {
        self.offsets.append_len(0)?;
        self.nulls.append(true)
    }

    pub fn append_null(&mut self) -> CodecResult<()> {
        self.offsets.append_len(0)?;
        self.nulls.append(false)
    }

    pub fn values(&mut self) -> &mut T {
        &mut self.values
    }

    /// Number of child elements written so far
    pub fn values_len(&self) -> usize {
        self.values.len()
    }

    pub fn finish(self) -> ListArray {
        ListArray::new(
            self.field,
            self.offsets.finish(),
            self.values.finish(),
            self.nulls.finish()
        )
    }
}


impl ListBuilder<AnyBuilder> {
    /// Appends one slot with the given elements streamed through the child builder.
    pub fn append_values<V: ArrowSerialize>(&mut self, items: &[V]) -> CodecResult<()> {
        for item in items {
            item.append_to(&mut self.values)?;
        }
        self.append()
    }
}


impl <T: ArrayBuilder> ArrayBuilder for ListBuilder<T> {
    fn data_type(&self) -> DataType {
        DataType::List(self.field.clone())
    }

    fn len(&self) -> usize {
        self.nulls.len()
    }

    fn byte_size(&self) -> usize {
        self.nulls.byte_size() + self.offsets.byte_size() + self.values.byte_size()
    }

    /// Reserves top-level slots only. The child is reserved separately
    /// through [`ListBuilder::values`], since its element count is independent.
    fn reserve(&mut self, additional: usize) -> CodecResult<()> {
        self.nulls.reserve(additional)?;
        self.offsets.reserve(additional)
    }

    fn finish(self) -> ArrayRef {
        Arc::new(self.finish())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::system_allocator;
    use crate::builder::PrimitiveBuilder;
    use arrow::array::{Array, AsArray};
    use arrow::datatypes::UInt16Type;

    #[test]
    fn empty_slots_are_valid() {
        let allocator = system_allocator();
        let values = PrimitiveBuilder::<UInt16Type>::new(0, &allocator).unwrap();
        let mut list = ListBuilder::new(0, values, false, &allocator).unwrap();

        list.values().append_slice(&[1, 2, 3]).unwrap();
        list.append().unwrap();
        list.append_absent().unwrap();
        list.values().append(4).unwrap();
        list.append().unwrap();

        let array = list.finish();
        assert_eq!(array.len(), 3);
        assert_eq!(array.null_count(), 0);
        assert_eq!(array.value_offsets(), &[0, 3, 3, 4]);
        assert_eq!(array.value_length(1), 0);
        assert_eq!(array.values().as_primitive::<UInt16Type>().values().as_ref(), &[1, 2, 3, 4]);
    }
}
