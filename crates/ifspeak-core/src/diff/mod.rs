//! Line delta engine.
//!
//! Compares the previous and current normalized display lines and picks out
//! the text worth speaking.
//!
//! ## Entry point
//!
//! ```
//! use ifspeak_core::diff::compute_delta;
//!
//! let old = vec!["Score: 10".to_string()];
//! let new = vec!["Score: 10".to_string(), "You hear a noise.".to_string()];
//! assert_eq!(compute_delta(&old, &new), vec!["You hear a noise."]);
//! ```
//!
//! ## Layers
//!
//! - [`rows`]: the tagged-row contract every line differ produces, plus the
//!   ndiff-style default differ.
//! - [`engine`]: walks the rows and narrows single-line edits down to the
//!   changed characters.

pub mod engine;
pub mod rows;

pub use engine::{changed_span, compute_delta, compute_delta_with};
pub use rows::{DiffRow, DiffTag, LineDiffer, NdiffLineDiffer, DEFAULT_PAIR_CUTOFF};
