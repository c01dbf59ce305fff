//! Process-wide memo of component and archetype descriptors.
//!
//! Descriptors are built on first use and never change afterwards.
//! Entries are keyed by name: when two types claim the same name,
//! the first one to register wins.
use crate::archetype::{Archetype, ArchetypeDescriptorRef};
use crate::component::{Component, ComponentDescriptor, ComponentDescriptorRef};
use parking_lot::RwLock;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};


static COMPONENTS: LazyLock<RwLock<HashMap<&'static str, ComponentDescriptorRef>>> =
    LazyLock::new(Default::default);


static ARCHETYPES: LazyLock<RwLock<HashMap<&'static str, ArchetypeDescriptorRef>>> =
    LazyLock::new(Default::default);


pub fn descriptor_for<C: Component>() -> ComponentDescriptorRef {
    if let Some(desc) = COMPONENTS.read().get(C::NAME) {
        return desc.clone()
    }

    let desc = Arc::new(ComponentDescriptor::new(C::NAME, C::descriptor()));

    match COMPONENTS.write().entry(C::NAME) {
        Entry::Occupied(e) => e.get().clone(),
        Entry::Vacant(e) => {
            tracing::debug!(
                component = C::NAME,
                datatype = %desc.descriptor(),
                "registered component"
            );
            e.insert(desc).clone()
        }
    }
}


/// Descriptor registered under the given component name, if any.
pub fn lookup(name: &str) -> Option<ComponentDescriptorRef> {
    COMPONENTS.read().get(name).cloned()
}


pub fn archetype_descriptor_for<A: Archetype>() -> ArchetypeDescriptorRef {
    if let Some(desc) = ARCHETYPES.read().get(A::NAME) {
        return desc.clone()
    }

    let desc: ArchetypeDescriptorRef = Arc::new(A::archetype_descriptor());

    match ARCHETYPES.write().entry(A::NAME) {
        Entry::Occupied(e) => e.get().clone(),
        Entry::Vacant(e) => {
            tracing::debug!(
                archetype = A::NAME,
                indicator = desc.indicator(),
                num_fields = desc.fields().len(),
                "registered archetype"
            );
            e.insert(desc).clone()
        }
    }
}


/// Archetype table registered under the given archetype name, if any.
pub fn lookup_archetype(name: &str) -> Option<ArchetypeDescriptorRef> {
    ARCHETYPES.read().get(name).cloned()
}

