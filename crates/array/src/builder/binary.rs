use crate::alloc::AllocatorRef;
use crate::builder::buffer::TrackedBuffer;
use crate::builder::nullmask::NullmaskBuilder;
use crate::builder::offsets::OffsetsBuilder;
use crate::builder::ArrayBuilder;
use crate::error::CodecResult;
use arrow::array::{ArrayRef, BinaryArray, StringArray};
use arrow::datatypes::DataType;
use std::sync::Arc;


pub struct BinaryBuilder {
    nulls: NullmaskBuilder,
    offsets: OffsetsBuilder,
    values: TrackedBuffer
}


impl BinaryBuilder {
    pub fn new(
        item_capacity: usize,
        content_capacity: usize,
        allocator: &AllocatorRef
    ) -> CodecResult<Self>
    {
        Ok(Self {
            nulls: NullmaskBuilder::new(item_capacity, allocator)?,
            offsets: OffsetsBuilder::new(item_capacity, allocator)?,
            values: TrackedBuffer::new(content_capacity, allocator)?
        })
    }

    pub fn append(&mut self, val: &[u8]) -> CodecResult<()> {
        self.values.extend_from_slice(val)?;
        self.offsets.append(self.values.len())?;
        self.nulls.append(true)
    }

    pub fn append_option(&mut self, val: Option<&[u8]>) -> CodecResult<()> {
        if let Some(val) = val {
            self.append(val)
        } else {
            self.append_null()
        }
    }

    pub fn append_null(&mut self) -> CodecResult<()> {
        self.offsets.append(self.values.len())?;
        self.nulls.append(false)
    }

    /// Pre-sizes the content buffer for `additional` more bytes.
    pub fn reserve_content(&mut self, additional: usize) -> CodecResult<()> {
        self.values.reserve(additional)
    }

    pub fn finish(self) -> BinaryArray {
        BinaryArray::new(
            self.offsets.finish(),
            self.values.finish(),
            self.nulls.finish()
        )
    }
}


impl ArrayBuilder for BinaryBuilder {
    fn data_type(&self) -> DataType {
        DataType::Binary
    }

    fn len(&self) -> usize {
        self.nulls.len()
    }

    fn byte_size(&self) -> usize {
        self.nulls.byte_size() + self.offsets.byte_size() + self.values.len()
    }

    fn reserve(&mut self, additional: usize) -> CodecResult<()> {
        self.nulls.reserve(additional)?;
        self.offsets.reserve(additional)
    }

    fn finish(self) -> ArrayRef {
        Arc::new(self.finish())
    }
}


/// Same layout as [`BinaryBuilder`], but accepts only `&str` values.
pub struct StringBuilder {
    inner: BinaryBuilder
}


impl StringBuilder {
    pub fn new(
        item_capacity: usize,
        content_capacity: usize,
        allocator: &AllocatorRef
    ) -> CodecResult<Self>
    {
        Ok(Self {
            inner: BinaryBuilder::new(item_capacity, content_capacity, allocator)?
        })
    }

    pub fn append(&mut self, val: &str) -> CodecResult<()> {
        self.inner.append(val.as_bytes())
    }

    pub fn append_option(&mut self, val: Option<&str>) -> CodecResult<()> {
        self.inner.append_option(val.map(str::as_bytes))
    }

    pub fn append_null(&mut self) -> CodecResult<()> {
        self.inner.append_null()
    }

    pub fn reserve_content(&mut self, additional: usize) -> CodecResult<()> {
        self.inner.reserve_content(additional)
    }

    pub fn finish(self) -> StringArray {
        let BinaryBuilder { nulls, offsets, values } = self.inner;
        unsafe {
            // SAFETY: every value was appended from a `&str`
            StringArray::new_unchecked(
                offsets.finish(),
                values.finish(),
                nulls.finish()
            )
        }
    }
}


impl ArrayBuilder for StringBuilder {
    fn data_type(&self) -> DataType {
        DataType::Utf8
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn byte_size(&self) -> usize {
        self.inner.byte_size()
    }

    fn reserve(&mut self, additional: usize) -> CodecResult<()> {
        self.inner.reserve(additional)
    }

    fn finish(self) -> ArrayRef {
        Arc::new(self.finish())
    }
}
