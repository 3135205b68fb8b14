//! Structured record search for extracted engineering documents.
//!
//! The engine indexes generic nested records (maps, lists, scalars) under
//! stable identifiers and answers compact textual queries that mix a tag
//! substring with `@path(param)=value` filters:
//!
//! ```
//! use indufind::{EntityIndex, build_guide};
//! use serde_json::json;
//!
//! let mut targets = EntityIndex::new();
//! targets.index_value("T1", json!({"tag": "=A1-M2", "power": {"voltage": "24V"}}));
//! targets.index_value("T2", json!({"tag": "=A1-M3", "power": {"voltage": "230V"}}));
//!
//! assert_eq!(targets.search("=A1 @power(voltage)=24").unwrap(), ["T1"]);
//!
//! // The guide tree advertises every discoverable field path.
//! let guide = build_guide(&targets);
//! assert!(guide.children.contains_key("power"));
//! ```
//!
//! Query parsing lives in the `indufind-syntax` crate and text
//! canonicalization in `textnorm`; both are re-exported where useful.

mod guide;
mod index;
mod matcher;
mod record;

pub use guide::{GuideNode, build_guide};
pub use index::EntityIndex;
pub use indufind_syntax::{Filter, ParseError, Query, parse_query};
pub use matcher::matches;
pub use record::{RecordValue, Scalar};
