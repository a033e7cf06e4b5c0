//! # Math Helpers
//!
//! ## Role
//! Stateless functions over in-memory sequences.
//!
//! ## Sub-modules
//! - `set_theory`: cartesian product, pair set difference, modular ranges
//! - `basics`: zero-safe division
//! - `analysis`: case distinction, crossings of sampled functions
//! - `statistics`: mixture distributions

pub mod analysis;
pub mod basics;
pub mod set_theory;
pub mod statistics;

pub use analysis::{case_distinction, intersect_functions, Side};
pub use basics::safe_div;
pub use set_theory::{cartesian_product, is_in_range, mask_in_range, setdiff2d, CartesianProduct};
pub use statistics::{Component, MixtureDistribution};
