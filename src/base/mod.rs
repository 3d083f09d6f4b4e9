//! Implements the base structures for a setup job

mod case_files;
mod constants;
mod job;
mod launch;
mod params;
pub use crate::base::case_files::*;
pub use crate::base::constants::*;
pub use crate::base::job::*;
pub use crate::base::launch::*;
pub use crate::base::params::*;
