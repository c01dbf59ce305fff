pub mod alloc;
pub mod builder;
mod column;
mod convert;
mod descriptor;
mod error;


pub use alloc::{system_allocator, AllocationError, Allocator, AllocatorRef, LimitedAllocator, SystemAllocator};
pub use column::*;
pub use convert::*;
pub use descriptor::*;
pub use error::{CodecError, CodecResult, ResultExt};
