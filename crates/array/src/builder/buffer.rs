use crate::alloc::{checked_size, AllocatorRef, MemoryReservation};
use crate::error::CodecResult;
use arrow_buffer::{ArrowNativeType, Buffer, MutableBuffer, ToByteSlice};


/// Largest 64 byte aligned size a single allocation can have
const MAX_CAPACITY: usize = isize::MAX as usize & !63;


/// Capacity for `required` bytes, padded to 64 bytes.
///
/// Sizes that can't back a single allocation are refused with [`crate::AllocationError::overflow`].
fn padded_capacity(required: usize) -> CodecResult<usize> {
    let capacity = checked_size(
        required.checked_next_multiple_of(64).filter(|&cap| cap <= MAX_CAPACITY)
    )?;
    Ok(capacity)
}


/// [`MutableBuffer`] whose capacity is granted by an allocator.
///
/// Invariant: `buffer.len() <= reservation.size() <= buffer.capacity()`.
pub struct TrackedBuffer {
    buffer: MutableBuffer,
    reservation: MemoryReservation
}


impl TrackedBuffer {
    pub fn new(capacity: usize, allocator: &AllocatorRef) -> CodecResult<Self> {
        let capacity = padded_capacity(capacity)?;
        let mut reservation = MemoryReservation::new(allocator.clone());
        reservation.grow(capacity)?;
        Ok(Self {
            buffer: MutableBuffer::new(capacity),
            reservation
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Granted capacity in bytes
    #[inline]
    pub fn capacity(&self) -> usize {
        self.reservation.size()
    }

    /// Makes room for at least `additional` more bytes without any further growth.
    pub fn reserve(&mut self, additional: usize) -> CodecResult<()> {
        let required = checked_size(self.buffer.len().checked_add(additional))?;
        if required > self.reservation.size() {
            self.grow_to(padded_capacity(required)?)?;
        }
        Ok(())
    }

    /// Amortized growth for appends: at least doubles the granted capacity.
    #[inline]
    fn ensure(&mut self, additional: usize) -> CodecResult<()> {
        let required = checked_size(self.buffer.len().checked_add(additional))?;
        if required > self.reservation.size() {
            let capacity = std::cmp::max(
                padded_capacity(required)?,
                std::cmp::min(self.reservation.size() * 2, MAX_CAPACITY)
            );
            self.grow_to(capacity)?;
        }
        Ok(())
    }

    fn grow_to(&mut self, capacity: usize) -> CodecResult<()> {
        self.reservation.grow(capacity - self.reservation.size())?;
        self.buffer.reserve(capacity - self.buffer.len());
        Ok(())
    }

    #[inline]
    pub fn push<T: ToByteSlice>(&mut self, item: T) -> CodecResult<()> {
        self.ensure(size_of::<T>())?;
        self.buffer.push(item);
        Ok(())
    }

    #[inline]
    pub fn extend_from_slice<T: ArrowNativeType>(&mut self, items: &[T]) -> CodecResult<()> {
        self.ensure(std::mem::size_of_val(items))?;
        self.buffer.extend_from_slice(items);
        Ok(())
    }

    #[inline]
    pub fn resize(&mut self, new_len: usize, value: u8) -> CodecResult<()> {
        if new_len > self.buffer.len() {
            self.ensure(new_len - self.buffer.len())?;
        }
        self.buffer.resize(new_len, value);
        Ok(())
    }

    pub fn truncate(&mut self, len: usize) {
        self.buffer.truncate(len)
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    #[inline]
    pub fn as_slice_mut(&mut self) -> &mut [u8] {
        self.buffer.as_slice_mut()
    }

    pub fn typed_data<T: ArrowNativeType>(&self) -> &[T] {
        self.buffer.typed_data()
    }

    /// Freezes the content. The granted capacity is returned to the allocator.
    pub fn finish(self) -> Buffer {
        self.buffer.into()
    }
}
