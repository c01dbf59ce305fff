use crate::alloc::{checked_size, AllocatorRef};
use crate::builder::buffer::TrackedBuffer;
use crate::error::{invalid_argument, invalid_state, CodecResult};
use arrow_buffer::{OffsetBuffer, ScalarBuffer};


pub struct OffsetsBuilder {
    buffer: TrackedBuffer,
    last_offset: i32
}


impl OffsetsBuilder {
    pub fn new(capacity: usize, allocator: &AllocatorRef) -> CodecResult<Self> {
        let size = checked_size(capacity.checked_add(1).and_then(|n| n.checked_mul(size_of::<i32>())))?;
        let mut buffer = TrackedBuffer::new(size, allocator)?;
        buffer.push(0i32)?;
        Ok(Self {
            buffer,
            last_offset: 0
        })
    }

    pub fn byte_size(&self) -> usize {
        self.buffer.len()
    }

    /// Number of slots, which is one less than the number of offsets
    pub fn len(&self) -> usize {
        self.buffer.len() / size_of::<i32>() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn last_offset(&self) -> usize {
        self.last_offset as usize
    }

    pub fn reserve(&mut self, additional: usize) -> CodecResult<()> {
        self.buffer.reserve(checked_size(additional.checked_mul(size_of::<i32>()))?)
    }

    #[inline]
    pub fn append_len(&mut self, len: usize) -> CodecResult<()> {
        self.append(self.last_offset as usize + len)
    }

    /// Closes the current slot at `end`, which must not precede the previous offset.
    #[inline]
    pub fn append(&mut self, end: usize) -> CodecResult<()> {
        let offset = i32::try_from(end).map_err(|_| {
            invalid_argument!("list offset {} exceeds the i32 range", end)
        })?;
        if offset < self.last_offset {
            return Err(invalid_state!(
                "offsets must be monotonic, but got {} after {}",
                offset,
                self.last_offset
            ))
        }
        self.buffer.push(offset)?;
        self.last_offset = offset;
        Ok(())
    }

    pub fn as_slice(&self) -> &[i32] {
        self.buffer.typed_data()
    }

    pub fn finish(self) -> OffsetBuffer<i32> {
        let scalar = ScalarBuffer::from(self.buffer.finish());
        unsafe {
            // SAFETY: monotonicity and non-emptiness are guaranteed by construction
            OffsetBuffer::new_unchecked(scalar)
        }
    }
}
