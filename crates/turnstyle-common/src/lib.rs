//! Common utilities for turnStyle.
//!
//! This crate provides shared infrastructure used by all turnStyle components:
//! - **Warning System** - deduplicated warnings for skipped or malformed data
//! - **URL helpers** - page origins and validation of user-entered URL keys

pub mod url;
pub mod warning;
