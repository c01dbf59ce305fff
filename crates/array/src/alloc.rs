//! Memory accounting for builder storage.
//!
//! Builders never allocate behind the allocator's back: every capacity
//! growth of a builder buffer is first granted by an [`Allocator`].
//! Granted memory is returned once the owning buffer is finished or dropped,
//! so an allocator observes the working set of live builders only.
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationError {
    pub requested: usize,
    pub available: Option<usize>
}


impl Display for AllocationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to allocate {} bytes", self.requested)?;
        if let Some(available) = self.available {
            write!(f, ", only {} bytes available", available)?;
        }
        Ok(())
    }
}


impl std::error::Error for AllocationError {}


impl AllocationError {
    /// Request for a size that is not representable in memory.
    pub fn overflow() -> Self {
        Self {
            requested: usize::MAX,
            available: None
        }
    }
}


/// Treats an overflowing size computation as a refused allocation.
#[inline]
pub(crate) fn checked_size(size: Option<usize>) -> Result<usize, AllocationError> {
    size.ok_or_else(AllocationError::overflow)
}


pub trait Allocator: Send + Sync {
    fn allocate(&self, size: usize) -> Result<(), AllocationError>;

    fn deallocate(&self, size: usize);
}


pub type AllocatorRef = Arc<dyn Allocator>;


pub fn system_allocator() -> AllocatorRef {
    Arc::new(SystemAllocator)
}


/// Grants every request. Actual memory comes from the global allocator.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemAllocator;


impl Allocator for SystemAllocator {
    #[inline]
    fn allocate(&self, _size: usize) -> Result<(), AllocationError> {
        Ok(())
    }

    #[inline]
    fn deallocate(&self, _size: usize) {}
}


/// Grants requests while the total outstanding size stays within a byte budget.
#[derive(Debug)]
pub struct LimitedAllocator {
    limit: usize,
    allocated: AtomicUsize
}


impl LimitedAllocator {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            allocated: AtomicUsize::new(0)
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn allocated(&self) -> usize {
        self.allocated.load(Ordering::Acquire)
    }
}


impl Allocator for LimitedAllocator {
    fn allocate(&self, size: usize) -> Result<(), AllocationError> {
        self.allocated.fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
            current.checked_add(size).filter(|&total| total <= self.limit)
        }).map(|_| ()).map_err(|current| {
            AllocationError {
                requested: size,
                available: Some(self.limit.saturating_sub(current))
            }
        })
    }

    fn deallocate(&self, size: usize) {
        let _ = self.allocated.fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
            Some(current.saturating_sub(size))
        });
    }
}


/// Memory granted to a single buffer.
pub struct MemoryReservation {
    allocator: AllocatorRef,
    size: usize
}


impl MemoryReservation {
    pub fn new(allocator: AllocatorRef) -> Self {
        Self {
            allocator,
            size: 0
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn grow(&mut self, additional: usize) -> Result<(), AllocationError> {
        if additional == 0 {
            return Ok(())
        }
        self.allocator.allocate(additional).map_err(|err| {
            tracing::warn!(
                requested = err.requested,
                available = err.available,
                reserved = self.size,
                "allocator refused buffer growth"
            );
            err
        })?;
        self.size += additional;
        Ok(())
    }
}


impl Drop for MemoryReservation {
    fn drop(&mut self) {
        if self.size > 0 {
            self.allocator.deallocate(self.size)
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limited_allocator_enforces_budget() {
        let allocator = LimitedAllocator::new(100);
        allocator.allocate(60).unwrap();

        let err = allocator.allocate(50).unwrap_err();
        assert_eq!(err, AllocationError { requested: 50, available: Some(40) });
        assert_eq!(allocator.allocated(), 60);

        allocator.deallocate(60);
        allocator.allocate(100).unwrap();
        assert_eq!(allocator.allocated(), 100);
    }

    #[test]
    fn reservation_is_returned_on_drop() {
        let allocator = Arc::new(LimitedAllocator::new(1024));
        {
            let mut reservation = MemoryReservation::new(allocator.clone());
            reservation.grow(512).unwrap();
            reservation.grow(256).unwrap();
            assert_eq!(reservation.size(), 768);
            assert_eq!(allocator.allocated(), 768);
            assert!(reservation.grow(512).is_err());
            assert_eq!(reservation.size(), 768);
        }
        assert_eq!(allocator.allocated(), 0);
    }
}
