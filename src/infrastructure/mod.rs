//! Infrastructure layer: line source implementations
//!
//! This layer implements the I/O boundary traits the services depend on.

pub mod traits;

pub use traits::{
    source_for_path, FileLineSource, LineSource, Lines, MemoryLineSource, StdinLineSource,
};
