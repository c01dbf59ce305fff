use crate::alloc::{checked_size, AllocatorRef};
use crate::builder::buffer::TrackedBuffer;
use crate::builder::nullmask::NullmaskBuilder;
use crate::builder::ArrayBuilder;
use crate::error::CodecResult;
use arrow::array::{ArrayRef, ArrowPrimitiveType, PrimitiveArray};
use arrow::datatypes::DataType;
use arrow_buffer::{ArrowNativeType, ScalarBuffer};
use std::marker::PhantomData;
use std::sync::Arc;


pub struct PrimitiveBuilder<T: ArrowPrimitiveType> {
    nulls: NullmaskBuilder,
    values: TrackedBuffer,
    phantom_data: PhantomData<T>
}


impl <T: ArrowPrimitiveType> PrimitiveBuilder<T> {
    pub fn new(capacity: usize, allocator: &AllocatorRef) -> CodecResult<Self> {
        Ok(Self {
            nulls: NullmaskBuilder::new(capacity, allocator)?,
            values: TrackedBuffer::new(
                checked_size(capacity.checked_mul(T::Native::get_byte_width()))?,
                allocator
            )?,
            phantom_data: PhantomData
        })
    }

    #[inline]
    pub fn append(&mut self, val: T::Native) -> CodecResult<()> {
        self.values.push(val)?;
        self.nulls.append(true)
    }

    pub fn append_option(&mut self, val: Option<T::Native>) -> CodecResult<()> {
        if let Some(val) = val {
            self.append(val)
        } else {
            self.values.push(T::default_value())?;
            self.nulls.append(false)
        }
    }

    pub fn append_slice(&mut self, values: &[T::Native]) -> CodecResult<()> {
        self.values.extend_from_slice(values)?;
        self.nulls.append_many(true, values.len())
    }

    pub fn finish(self) -> PrimitiveArray<T> {
        PrimitiveArray::new(
            ScalarBuffer::from(self.values.finish()),
            self.nulls.finish()
        )
    }
}


impl <T: ArrowPrimitiveType> ArrayBuilder for PrimitiveBuilder<T> {
    fn data_type(&self) -> DataType {
        T::DATA_TYPE
    }

    fn len(&self) -> usize {
        self.nulls.len()
    }

    fn byte_size(&self) -> usize {
        self.nulls.byte_size() + self.values.len()
    }

    fn reserve(&mut self, additional: usize) -> CodecResult<()> {
        self.nulls.reserve(additional)?;
        self.values.reserve(checked_size(additional.checked_mul(T::Native::get_byte_width()))?)
    }

    fn finish(self) -> ArrayRef {
        Arc::new(self.finish())
    }
}
