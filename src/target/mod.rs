//! Defines the handle to a solver session and a profile-driven simulated session

mod legacy_command;
mod profile;
mod refusal;
mod simulated;
mod surface;
mod target;
mod value;
pub use crate::target::legacy_command::*;
pub use crate::target::profile::*;
pub use crate::target::refusal::*;
pub use crate::target::simulated::*;
pub use crate::target::surface::*;
pub use crate::target::target::*;
pub use crate::target::value::*;
