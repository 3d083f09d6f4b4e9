//! Implements the best-effort configuration applier

mod applier;
mod candidate;
mod first_success;
mod outcome;
mod request;
pub use crate::applier::applier::*;
pub use crate::applier::candidate::*;
pub use crate::applier::first_success::*;
pub use crate::applier::outcome::*;
pub use crate::applier::request::*;
