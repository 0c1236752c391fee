//! # glossa-validator
//!
//! A validation rule registry with localized, templated error messages.
//!
//! ## Quick Start
//!
//! ```rust
//! use glossa_validator::prelude::*;
//! use serde_json::json;
//!
//! let ctx = LocalizationContext::builder("zh")
//!     .with_default_messages()?
//!     .with_builtin_rules()?
//!     .build()?;
//!
//! let schema = Schema::new()
//!     .field("Name", "required,chinese_name")
//!     .field("Mobile", "phone");
//!
//! let messages = ctx
//!     .check(&schema, &json!({"Name": "Tom", "Mobile": "13812345678"}))
//!     .unwrap_err();
//! assert_eq!(messages.get("Name"), Some("Name必须是2-4个中文字符"));
//! assert_eq!(messages.get("Mobile"), None);
//! # Ok::<(), glossa_validator::Error>(())
//! ```
//!
//! ## Pieces
//!
//! - [`registry`]: rule name → predicate
//! - [`catalog`]: `(locale, rule)` → message template
//! - [`translate`]: renders a failure, with an untranslated fallback
//! - [`runner`]: runs a [`Schema`](schema::Schema) over a JSON value
//! - [`aggregate`]: collapses failures into one message per field
//! - [`LocalizationContext`]: all of the above, frozen after startup

pub mod aggregate;
#[cfg(feature = "builtin")]
pub mod builtin;
pub mod catalog;
pub mod config;
mod context;
pub mod error;
pub mod failure;
pub mod locales;
pub mod prelude;
pub mod registry;
pub mod runner;
pub mod schema;
pub mod translate;

pub use context::{LocalizationContext, LocalizationContextBuilder, ReloadableContext};
pub use error::{Error, Result};
