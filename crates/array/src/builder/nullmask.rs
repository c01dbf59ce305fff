use crate::alloc::{checked_size, AllocatorRef};
use crate::builder::bitmask::BitmaskBuilder;
use crate::error::CodecResult;
use arrow_buffer::NullBuffer;


/// Validity bitmap that is materialized only once the first null arrives.
pub struct NullmaskBuilder {
    nulls: BitmaskBuilder,
    len: usize,
    capacity: usize,
    has_nulls: bool
}


impl NullmaskBuilder {
    pub fn new(capacity: usize, allocator: &AllocatorRef) -> CodecResult<Self> {
        Ok(Self {
            nulls: BitmaskBuilder::new(0, allocator)?,
            len: 0,
            capacity,
            has_nulls: false
        })
    }

    pub fn byte_size(&self) -> usize {
        self.nulls.bytes_size()
    }

    pub fn len(&self) -> usize {
        if self.has_nulls {
            self.nulls.len()
        } else {
            self.len
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn has_nulls(&self) -> bool {
        self.has_nulls
    }

    pub fn reserve(&mut self, additional: usize) -> CodecResult<()> {
        self.capacity = std::cmp::max(self.capacity, checked_size(self.len().checked_add(additional))?);
        if self.has_nulls {
            self.nulls.reserve(additional)?;
        }
        Ok(())
    }

    pub fn append_many(&mut self, val: bool, count: usize) -> CodecResult<()> {
        if count == 0 {
            return Ok(())
        }
        match (self.has_nulls, val) {
            (true, val) => self.nulls.append_many(val, count),
            (false, true) => {
                self.len = checked_size(self.len.checked_add(count))?;
                Ok(())
            },
            (false, false) => {
                self.init_nulls(count)?;
                self.nulls.append_many(false, count)
            }
        }
    }

    #[inline]
    pub fn append(&mut self, val: bool) -> CodecResult<()> {
        match (self.has_nulls, val) {
            (true, val) => self.nulls.append(val),
            (false, true) => {
                self.len += 1;
                Ok(())
            },
            (false, false) => {
                self.init_nulls(1)?;
                self.nulls.append(false)
            }
        }
    }

    fn init_nulls(&mut self, additional: usize) -> CodecResult<()> {
        let cap = std::cmp::max(self.capacity, checked_size(self.len.checked_add(additional))?);
        self.nulls.reserve(cap)?;
        self.nulls.append_many(true, self.len)?;
        self.has_nulls = true;
        Ok(())
    }

    pub fn finish(self) -> Option<NullBuffer> {
        self.has_nulls.then(|| NullBuffer::new(self.nulls.finish()))
    }
}
