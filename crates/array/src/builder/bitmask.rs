use crate::alloc::{checked_size, AllocatorRef};
use crate::builder::buffer::TrackedBuffer;
use crate::error::CodecResult;
use arrow_buffer::{bit_util, BooleanBuffer};


pub struct BitmaskBuilder {
    buffer: TrackedBuffer,
    len: usize,
}


impl BitmaskBuilder {
    pub fn new(capacity: usize, allocator: &AllocatorRef) -> CodecResult<Self> {
        Ok(Self {
            buffer: TrackedBuffer::new(bit_util::ceil(capacity, 8), allocator)?,
            len: 0
        })
    }

    pub fn bytes_size(&self) -> usize {
        bit_util::ceil(self.len, 8)
    }

    pub fn reserve(&mut self, additional: usize) -> CodecResult<()> {
        let new_byte_len = bit_util::ceil(checked_size(self.len.checked_add(additional))?, 8);
        self.buffer.reserve(new_byte_len.saturating_sub(self.buffer.len()))
    }

    #[inline]
    fn resize(&mut self, additional: usize) -> CodecResult<()> {
        let new_byte_len = bit_util::ceil(checked_size(self.len.checked_add(additional))?, 8);
        self.buffer.resize(new_byte_len, 0)
    }

    pub fn append_many(&mut self, val: bool, count: usize) -> CodecResult<()> {
        let new_len = checked_size(self.len.checked_add(count))?;
        let new_len_bytes = bit_util::ceil(new_len, 8);
        if val {
            let cur_remainder = self.len % 8;
            let new_remainder = new_len % 8;

            if cur_remainder != 0 {
                // Pad last byte with 1s
                if let Some(last) = self.buffer.as_slice_mut().last_mut() {
                    *last |= !((1 << cur_remainder) - 1)
                }
            }

            self.buffer.truncate(bit_util::ceil(self.len, 8));
            self.buffer.resize(new_len_bytes, 0xFF)?;

            if new_remainder != 0 {
                // Clear remaining bits
                if let Some(last) = self.buffer.as_slice_mut().last_mut() {
                    *last &= (1 << new_remainder) - 1
                }
            }
        } else if new_len_bytes > self.buffer.len() {
            self.buffer.resize(new_len_bytes, 0)?;
        }
        self.len = new_len;
        Ok(())
    }

    #[inline]
    pub fn append(&mut self, val: bool) -> CodecResult<()> {
        self.resize(1)?;
        if val {
            bit_util::set_bit(self.buffer.as_slice_mut(), self.len);
        }
        self.len += 1;
        Ok(())
    }

    pub fn data(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn finish(self) -> BooleanBuffer {
        BooleanBuffer::new(self.buffer.finish(), 0, self.len)
    }
}
