//! Error conversion helpers for line source I/O
//!
//! Provides extension traits for cleaner error handling with source context.

use std::fmt::Display;
use std::io;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add source context to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// source.open_lines().with_source_context("open", &source)?;
    /// ```
    fn with_source_context<D: Display + ?Sized>(self, action: &str, source: &D) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_source_context<D: Display + ?Sized>(
        self,
        action: &str,
        source: &D,
    ) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::read(format!("{}: {}", action, source), e))
    }
}
