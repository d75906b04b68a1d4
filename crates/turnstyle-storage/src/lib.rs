//! Storage for turnStyle.
//!
//! # Scope
//!
//! This crate provides:
//! - **Storage service** - the [`StorageArea`] trait, an opaque async
//!   key-value store modelled on the browser's synced extension storage, with
//!   an in-memory backend and a JSON-file backend
//! - **Schema** - the flat key layout: the reserved `"styles"` key maps style
//!   names to CSS text, every other key is a URL prefix mapping to an ordered
//!   list of style names
//! - **Library** - the options-page operations that edit styles and URL
//!   associations directly in storage
//! - **Install defaults** - the style seeded when the extension is installed
//!
//! Every storage call is awaited exactly once and bounded by a timeout (see
//! [`timed`]); a hung backend surfaces [`StorageError::Timeout`] instead of
//! hanging the caller.

pub mod area;
pub mod defaults;
pub mod error;
pub mod json_file;
pub mod library;
pub mod memory;
pub mod schema;

pub use area::{Items, StorageArea, timed};
pub use defaults::{BASIC_FORMATTING, BASIC_FORMATTING_NAME, InstallReason, install_defaults};
pub use error::StorageError;
pub use json_file::JsonFileStorage;
pub use library::{Library, LibraryError, StyleEntry};
pub use memory::InMemoryStorage;
pub use schema::{STYLES_KEY, Snapshot, StyleMap};
