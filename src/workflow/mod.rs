//! Implements the setup workflow and the liveness poll

mod liveness;
mod setup;
mod summary;
pub use crate::workflow::liveness::*;
pub use crate::workflow::setup::*;
pub use crate::workflow::summary::*;
