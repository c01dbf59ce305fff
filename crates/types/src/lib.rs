mod archetype;
mod batch;
pub mod codec;
mod collection;
mod component;
mod config;
mod macros;
pub mod registry;

pub mod archetypes;
pub mod components;
pub mod datatypes;


pub use archetype::*;
pub use batch::*;
pub use collection::*;
pub use component::*;
pub use config::*;
pub use registry::{archetype_descriptor_for, descriptor_for, lookup, lookup_archetype};


pub use arrowlog_array as array;


#[doc(hidden)]
pub use arrow as __arrow;
