//! The turnStyle content script.
//!
//! # Scope
//!
//! This crate provides:
//! - **Settings resolution** - picking the stored URL key that applies to the
//!   current page and the ordered list of styles saved for it
//! - **Style application** - inserting and removing turnStyle's `<style>`
//!   nodes in the page document
//! - **Persistence** - saving styles and page associations through the
//!   storage service
//! - **Message handling** - the JSON request/response protocol spoken with the
//!   popup
//!
//! A [`ContentScript`] is loaded once per page:
//!
//! ```no_run
//! # async fn demo() -> Result<(), turnstyle_content::ContentError> {
//! use turnstyle_content::{ContentConfig, ContentScript, Request};
//! use turnstyle_dom::DomTree;
//! use turnstyle_storage::InMemoryStorage;
//!
//! let mut script = ContentScript::load(
//!     "https://example.com/blog/post1",
//!     DomTree::html_document(),
//!     InMemoryStorage::new(),
//!     ContentConfig::default(),
//! )
//! .await?;
//! let response = script.handle(Request::GetPageSettings).await?;
//! # let _ = response;
//! # Ok(())
//! # }
//! ```

pub mod applicator;
pub mod config;
pub mod content_script;
pub mod editor;
pub mod error;
mod handler;
pub mod message;
pub mod resolver;

pub use applicator::{StyleApplicator, style_id};
pub use config::ContentConfig;
pub use content_script::ContentScript;
pub use error::ContentError;
pub use message::{PageSettingsResponse, Request, Response};
pub use resolver::{PageSettings, select_active_url};
