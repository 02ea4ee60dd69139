//! Translate human-written boolean search expressions (`AND`, `OR`, `NOT`,
//! parentheses, quoted phrases, `wild*` terms) into a search-index query
//! string built from explicit nested groups.
//!
//! ```
//! assert_eq!(
//!     bq::to_target_query("Apples OR Oranges AND Pears").unwrap(),
//!     "((text:\"Pears\" AND text:\"Oranges\") OR text:\"Apples\")"
//! );
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod query;
pub mod storage;
pub mod web;

pub use query::{
    to_postfix, to_target_query, to_target_query_with_field, Operator, PostfixNode, QueryError,
};
