//! File access abstraction for the pagegen site generator.
//!
//! This crate provides a [`FileStore`] trait for abstracting template and
//! page file access from the underlying backend. This enables:
//!
//! - **Unit testing** without touching the real filesystem
//! - **Clean separation** between template composition logic and I/O
//!
//! # Architecture
//!
//! The crate provides:
//! - [`FileStore`] trait with `list()`, `read()`, and `exists()` methods
//! - [`FsStore`] implementation rooted at a source directory
//! - [`MemoryStore`] for testing (behind the `mock` feature flag)
//!
//! All paths handed to a store are relative to the store's root; listing a
//! logical directory returns paths relative to that directory, sorted, so
//! one run always sees files in the same order.

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod store;

pub use fs::FsStore;
#[cfg(feature = "mock")]
pub use mock::MemoryStore;
pub use store::{FileStore, StoreError, StoreErrorKind};
