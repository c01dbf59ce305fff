use crate::archetype::Archetype;
use crate::codec;
use crate::collection::Collection;
use crate::component::{Component, ComponentDescriptorRef};
use crate::config::SerializerConfig;
use crate::registry::archetype_descriptor_for;
use arrow::array::{Array, ArrayRef};
use arrowlog_array::{AllocatorRef, BuilderOptions, CodecError, CodecResult, ResultExt};


/// One serialized archetype field
#[derive(Debug, Clone)]
pub struct BatchEntry {
    pub field: &'static str,
    pub array: ArrayRef,
    pub component: ComponentDescriptorRef
}


impl BatchEntry {
    pub fn name(&self) -> &'static str {
        self.component.name()
    }
}


/// Finished columns of one archetype, in field declaration order.
#[derive(Debug, Clone)]
pub struct Batch {
    archetype: &'static str,
    entries: Vec<BatchEntry>
}


impl Batch {
    pub fn new(archetype: &'static str) -> Self {
        Self {
            archetype,
            entries: Vec::new()
        }
    }

    pub fn archetype(&self) -> &'static str {
        self.archetype
    }

    pub fn push(&mut self, entry: BatchEntry) {
        self.entries.push(entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BatchEntry> {
        self.entries.iter()
    }

    pub fn get(&self, component_name: &str) -> Option<&BatchEntry> {
        self.entries.iter().find(|e| e.name() == component_name)
    }

    pub fn get_field(&self, field: &str) -> Option<&BatchEntry> {
        self.entries.iter().find(|e| e.field == field)
    }

    pub fn component_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.name())
    }

    /// Decodes the values of a field. A field without a column is `Unset`.
    pub fn collection<C: Component>(&self, field: &str) -> CodecResult<Collection<C>> {
        let Some(entry) = self.get_field(field) else {
            return Ok(Collection::Unset)
        };
        let location = format!("{}#{}", self.archetype, field);
        if entry.name() != C::NAME {
            return Err(CodecError::InvalidArgument(format!(
                "column holds {}, but {} was requested",
                entry.name(),
                C::NAME
            ))).with_context(location)
        }
        let items = codec::from_arrow::<C>(entry.array.as_ref()).with_context(location)?;
        Ok(Collection::new(items))
    }

    pub fn into_entries(self) -> Vec<BatchEntry> {
        self.entries
    }
}


impl <'a> IntoIterator for &'a Batch {
    type Item = &'a BatchEntry;
    type IntoIter = std::slice::Iter<'a, BatchEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}


pub fn serialize<A: Archetype>(archetype: &A, allocator: &AllocatorRef) -> CodecResult<Batch> {
    serialize_with(archetype, allocator, &BuilderOptions::default())
}


/// Serializes every set field of the archetype.
///
/// Unset fields are skipped. The first failing field aborts the whole batch.
pub fn serialize_with<A: Archetype>(
    archetype: &A,
    allocator: &AllocatorRef,
    options: &BuilderOptions
) -> CodecResult<Batch>
{
    let desc = archetype_descriptor_for::<A>();
    let mut batch = Batch::new(A::NAME);

    for (field, values) in desc.fields().iter().zip(archetype.component_batches()) {
        if !values.is_set() {
            tracing::trace!(archetype = A::NAME, field = field.name, "skipping unset field");
            continue
        }
        let array = values.to_arrow(allocator, options)?;
        tracing::trace!(
            archetype = A::NAME,
            field = field.name,
            len = array.len(),
            "serialized field"
        );
        batch.push(BatchEntry {
            field: field.name,
            array,
            component: field.component.clone()
        });
    }

    tracing::debug!(archetype = A::NAME, columns = batch.len(), "assembled batch");
    Ok(batch)
}


/// Serializes archetypes with a fixed allocator and builder options.
pub struct Serializer {
    config: SerializerConfig,
    allocator: AllocatorRef
}


impl Serializer {
    pub fn new(config: SerializerConfig) -> Self {
        let allocator = config.allocator();
        Self {
            config,
            allocator
        }
    }

    /// Uses the given allocator, ignoring [`SerializerConfig::memory_limit`].
    pub fn with_allocator(config: SerializerConfig, allocator: AllocatorRef) -> Self {
        Self {
            config,
            allocator
        }
    }

    pub fn config(&self) -> &SerializerConfig {
        &self.config
    }

    pub fn allocator(&self) -> &AllocatorRef {
        &self.allocator
    }

    pub fn serialize<A: Archetype>(&self, archetype: &A) -> CodecResult<Batch> {
        serialize_with(archetype, &self.allocator, &self.config.builder)
    }
}


impl Default for Serializer {
    fn default() -> Self {
        Self::new(SerializerConfig::default())
    }
}
