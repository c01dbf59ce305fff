use crate::alloc::{checked_size, AllocatorRef};
use crate::builder::{AnyBuilder, ArrayBuilder};
use crate::convert::ArrowSerialize;
use crate::descriptor::DescriptorRef;
use crate::error::{invalid_state, CodecResult};
use arrow::array::ArrayRef;
use arrow::datatypes::DataType;
use serde::{Deserialize, Serialize};


#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BuilderState {
    Fresh,
    Reserved,
    Filling,
    Finished,
    /// An append or reserve failed. The content is undefined.
    Failed
}


#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuilderOptions {
    /// Expected average number of children per list slot,
    /// used to pre-size list children on [`ColumnBuilder::reserve`].
    pub list_len_hint: usize
}


impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            list_len_hint: 2
        }
    }
}


/// Accumulator for one semantic column.
///
/// `reserve` only affects performance, the finished array is the same with or without it.
/// After [`ColumnBuilder::finish`] or after any failed operation,
/// every call returns [`crate::CodecError::InvalidState`].
pub struct ColumnBuilder {
    descriptor: DescriptorRef,
    builder: Option<AnyBuilder>,
    state: BuilderState,
    options: BuilderOptions
}


impl ColumnBuilder {
    pub fn new(descriptor: DescriptorRef, allocator: &AllocatorRef) -> CodecResult<Self> {
        descriptor.validate()?;
        let builder = AnyBuilder::new(&descriptor, allocator)?;
        Ok(Self {
            descriptor,
            builder: Some(builder),
            state: BuilderState::Fresh,
            options: BuilderOptions::default()
        })
    }

    pub fn with_options(mut self, options: BuilderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &BuilderOptions {
        &self.options
    }

    pub fn descriptor(&self) -> &DescriptorRef {
        &self.descriptor
    }

    pub fn data_type(&self) -> DataType {
        self.descriptor.to_arrow()
    }

    pub fn state(&self) -> BuilderState {
        self.state
    }

    /// Number of top-level slots written so far. Zero once finished.
    pub fn len(&self) -> usize {
        self.builder.as_ref().map_or(0, |b| b.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn byte_size(&self) -> usize {
        self.builder.as_ref().map_or(0, |b| b.byte_size())
    }

    /// Capacity for at least `n` more top-level values.
    ///
    /// For a list column the child is pre-sized as well,
    /// assuming [`BuilderOptions::list_len_hint`] children per slot.
    /// A size that overflows is an allocation failure.
    pub fn reserve(&mut self, n: usize) -> CodecResult<()> {
        self.apply(BuilderState::Reserved, |builder, options| {
            builder.reserve(n)?;
            if let AnyBuilder::List(list) = builder {
                let children = checked_size(n.checked_mul(options.list_len_hint))?;
                list.values().reserve(children)?;
            }
            Ok(())
        })
    }

    /// Capacity for at least `n` more children of a list column.
    pub fn reserve_values(&mut self, n: usize) -> CodecResult<()> {
        self.apply(BuilderState::Reserved, |builder, _| {
            builder.as_list_mut()?.values().reserve(n)
        })
    }

    /// Appends a list slot without children.
    pub fn append_absent(&mut self) -> CodecResult<()> {
        self.apply(BuilderState::Filling, |builder, _| {
            builder.as_list_mut()?.append_absent()
        })
    }

    /// Appends a list slot holding `items`.
    pub fn append_values<T: ArrowSerialize>(&mut self, items: &[T]) -> CodecResult<()> {
        self.apply(BuilderState::Filling, |builder, _| {
            builder.as_list_mut()?.append_values(items)
        })
    }

    /// Appends a null top-level slot.
    pub fn append_null(&mut self) -> CodecResult<()> {
        self.apply(BuilderState::Filling, |builder, _| builder.append_null())
    }

    /// Appends one top-level value.
    pub fn append<T: ArrowSerialize>(&mut self, value: &T) -> CodecResult<()> {
        self.apply(BuilderState::Filling, |builder, _| value.append_to(builder))
    }

    pub fn finish(&mut self) -> CodecResult<ArrayRef> {
        self.ensure_usable()?;
        let builder = self.builder.take().ok_or_else(|| invalid_state!("builder is already finished"))?;
        self.state = BuilderState::Finished;
        Ok(builder.finish())
    }

    fn ensure_usable(&self) -> CodecResult<()> {
        match self.state {
            BuilderState::Finished => Err(invalid_state!("builder is already finished")),
            BuilderState::Failed => Err(invalid_state!("builder is unusable after a failed operation")),
            _ => Ok(())
        }
    }

    fn apply<R, F>(&mut self, next: BuilderState, f: F) -> CodecResult<R>
    where
        F: FnOnce(&mut AnyBuilder, &BuilderOptions) -> CodecResult<R>
    {
        self.ensure_usable()?;
        let Some(builder) = self.builder.as_mut() else {
            return Err(invalid_state!("builder is already finished"))
        };
        match f(builder, &self.options) {
            Ok(res) => {
                self.state = self.state.max(next);
                Ok(res)
            },
            Err(err) => {
                self.state = BuilderState::Failed;
                Err(err)
            }
        }
    }
}
