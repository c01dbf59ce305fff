use crate::alloc::AllocatorRef;
use crate::builder::bitmask::BitmaskBuilder;
use crate::builder::nullmask::NullmaskBuilder;
use crate::builder::ArrayBuilder;
use crate::error::CodecResult;
use arrow::array::{ArrayRef, BooleanArray};
use arrow::datatypes::DataType;
use std::sync::Arc;


pub struct BooleanBuilder {
    nulls: NullmaskBuilder,
    values: BitmaskBuilder
}


impl BooleanBuilder {
    pub fn new(capacity: usize, allocator: &AllocatorRef) -> CodecResult<Self> {
        Ok(Self {
            nulls: NullmaskBuilder::new(capacity, allocator)?,
            values: BitmaskBuilder::new(capacity, allocator)?
        })
    }

    pub fn append(&mut self, val: bool) -> CodecResult<()> {
        self.values.append(val)?;
        self.nulls.append(true)
    }

    pub fn append_option(&mut self, val: Option<bool>) -> CodecResult<()> {
        if let Some(val) = val {
            self.append(val)
        } else {
            self.values.append(false)?;
            self.nulls.append(false)
        }
    }

    pub fn finish(self) -> BooleanArray {
        BooleanArray::new(self.values.finish(), self.nulls.finish())
    }
}


impl ArrayBuilder for BooleanBuilder {
    fn data_type(&self) -> DataType {
        DataType::Boolean
    }

    fn len(&self) -> usize {
        self.nulls.len()
    }

    fn byte_size(&self) -> usize {
        self.nulls.byte_size() + self.values.bytes_size()
    }

    fn reserve(&mut self, additional: usize) -> CodecResult<()> {
        self.nulls.reserve(additional)?;
        self.values.reserve(additional)
    }

    fn finish(self) -> ArrayRef {
        Arc::new(self.finish())
    }
}
