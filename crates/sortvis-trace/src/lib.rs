//! Selection Sort Trace
//!
//! Runs selection sort over a private copy of the input and records every
//! comparison, minimum update and swap as an immutable [`Step`]. Replaying the
//! steps in order drives an animation; each step carries the array snapshot,
//! the indices involved, the pseudo-code line and a resolved narration.
//!
//! # Verbosity
//!
//! - [`Verbosity::Fine`]: one record per micro-operation, flat narration
//! - [`Verbosity::Grouped`]: comparisons stay atomic, round framing and
//!   completion carry a [`NarrationGroup`] block
//!
//! # Invariants
//!
//! - Positions below `outer_index` never change in later steps
//! - The final snapshot is sorted ascending and a permutation of the input
//! - Ties never move `min_index`; the leftmost minimum wins

mod error;
mod frame;
mod input;
pub mod pseudocode;
mod step;
mod tracer;

pub use error::{Error, Result};
pub use frame::{Bar, Frame, Highlight};
pub use input::{random_array, ArrayConfig};
pub use pseudocode::PSEUDOCODE;
pub use step::{join_values, NarrationGroup, Step, StepKind, TraceSummary};
pub use tracer::{generate, TraceConfig, Tracer, Verbosity};
