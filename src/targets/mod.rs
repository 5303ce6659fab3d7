//! Built-in targets

#[cfg(feature = "console")]
pub mod console;
pub mod json;
pub mod memory;

#[cfg(feature = "console")]
pub use console::ConsoleTarget;
pub use json::JsonTarget;
pub use memory::MemoryTarget;
