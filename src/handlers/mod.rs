//! Handler implementations

pub mod human;
pub mod json;
pub mod multi;
pub mod null;
pub mod writer;

pub use human::{HumanFields, HumanHandler};
pub use json::JsonHandler;
pub use multi::MultiHandler;
pub use null::NullHandler;
pub use writer::{MemoryWriter, SharedWriter};

pub use crate::core::Handler;
