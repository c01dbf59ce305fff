use crate::error::CodecResult;
use arrow::array::ArrayRef;
use arrow::datatypes::DataType;


mod any;
mod binary;
pub mod bitmask;
mod boolean;
pub mod buffer;
mod list;
pub mod nullmask;
pub mod offsets;
mod primitive;
mod r#struct;


pub use any::*;
pub use binary::*;
pub use boolean::*;
pub use list::*;
pub use primitive::*;
pub use r#struct::*;


pub trait ArrayBuilder: Sized {
    fn data_type(&self) -> DataType;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes currently written into the builder buffers
    fn byte_size(&self) -> usize;

    /// Pre-sizes the builder for `additional` more top-level values.
    fn reserve(&mut self, additional: usize) -> CodecResult<()>;

    fn finish(self) -> ArrayRef;
}
