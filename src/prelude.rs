//! Makes available common structures needed to set up a case
//!
//! You may write `use cfdsetup::prelude::*` in your code and obtain
//! access to commonly used functionality.

pub use crate::applier::{Applier, ApplyReport, Candidate, Outcome, SettingRequest};
pub use crate::base::{CaseFiles, InitMethod, JobConfig, LaunchOptions, DEFAULT_OUT_DIR, DEFAULT_TEST_DIR};
pub use crate::base::{ParamHerschelBulkley, ParamMaterial, ParamModels, ParamPatch, ParamVof};
pub use crate::samples::Samples;
pub use crate::target::{LegacyCommand, Refusal, SimulatedTarget, Surface, SurfaceProfile, Target, Value};
pub use crate::workflow::{LivenessPoll, PollEnd, SetupSummary, SetupWorkflow};
pub use crate::StrError;
