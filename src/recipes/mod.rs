//! Implements the candidate catalogs used to force the physics settings of a case

mod gravity;
mod initialization;
mod material;
mod models;
mod multiphase;
mod synonyms;
pub use crate::recipes::gravity::*;
pub use crate::recipes::initialization::*;
pub use crate::recipes::material::*;
pub use crate::recipes::models::*;
pub use crate::recipes::multiphase::*;
pub use crate::recipes::synonyms::*;
