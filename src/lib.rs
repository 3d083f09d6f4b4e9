//! Forces physics settings onto a remote CFD solver session whose API shape is unknown
//!
//! Each setting is applied by walking an ordered list of candidate access paths (the
//! settings tree, the root shortcut objects, older attribute names), stopping at the first
//! one the session accepts, then falling back to a legacy text command, and finally
//! reporting the manual GUI remedy. See [applier::Applier].

/// Defines a type alias for the error type as a static string
pub type StrError = &'static str;

pub mod applier;
pub mod base;
pub mod prelude;
pub mod recipes;
pub mod samples;
pub mod target;
pub mod workflow;
