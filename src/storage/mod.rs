//! Storage backends implementing the entity store traits

pub mod in_memory;

pub use in_memory::MemoryBackend;
