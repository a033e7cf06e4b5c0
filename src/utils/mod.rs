//! # Utilities Module
//!
//! ## Role
//! Small cross-cutting helpers that don't belong in a domain module.
//!
//! ## Sub-modules
//! - `formatting`: human-readable byte sizes and durations
//! - `loop_checker`: watchdog for possibly non-terminating loops
//! - `dict`: flattening of nested JSON objects
//! - `cache`: JSON file cache for expensive results
//! - `lazy`: map with values evaluated on first access
//! - `template`: `{field:spec}` templates over JSON arguments

pub mod cache;
pub mod dict;
pub mod formatting;
pub mod lazy;
pub mod loop_checker;
pub mod template;

pub use cache::Cache;
pub use dict::{flatten_object, flatten_object_under};
pub use formatting::{format_duration, format_secs, format_size, SizeUnit};
pub use lazy::LazyMap;
pub use loop_checker::LoopChecker;
pub use template::{format_value, TemplateFormatter};
