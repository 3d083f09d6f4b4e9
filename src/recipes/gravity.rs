use super::set_first_synonym;
use crate::applier::{Applier, ApplyReport, Candidate, SettingRequest};
use crate::target::{join_path, LegacyCommand, Surface, Target, Value};

/// Defines the node holding the operating conditions (on both structured surfaces)
pub const OPERATING_CONDITIONS: &str = "setup/operating_conditions";

/// Defines the names of the gravity switch in the settings tree
pub const GRAVITY_FLAG_NAMES: [&str; 2] = ["gravity", "enabled"];

/// Defines the names of the gravity vector in the settings tree
pub const GRAVITY_VECTOR_NAMES: [&str; 3] = ["gravity_vector", "g_vector", "gravity_components"];

/// Returns the candidate that switches gravity on and sets the vector through the root objects
fn root_candidate() -> Candidate<[f64; 3]> {
    let vector_path = join_path(&[OPERATING_CONDITIONS, "gravity_vector"]);
    Candidate::new(
        Surface::Root.label(&vector_path),
        move |target: &mut dyn Target, g: &[f64; 3]| {
            target.set_field(Surface::Root, &join_path(&[OPERATING_CONDITIONS, "gravity"]), &Value::Bool(true))?;
            target.set_field(Surface::Root, &vector_path, &Value::Reals(g.to_vec()))
        },
    )
}

/// Returns the candidate that switches gravity on and sets the vector named `name` in the settings tree
fn settings_candidate(name: &str) -> Candidate<[f64; 3]> {
    let vector_path = join_path(&[OPERATING_CONDITIONS, name]);
    Candidate::new(
        Surface::Settings.label(&vector_path),
        move |target: &mut dyn Target, g: &[f64; 3]| {
            set_first_synonym(
                target,
                Surface::Settings,
                OPERATING_CONDITIONS,
                &GRAVITY_FLAG_NAMES,
                &Value::Bool(true),
            )?;
            target.set_field(Surface::Settings, &vector_path, &Value::Reals(g.to_vec()))
        },
    )
}

/// Returns the request switching gravity on with the given vector (m/s²)
pub fn gravity_request(g: [f64; 3]) -> SettingRequest<[f64; 3]> {
    let mut request = SettingRequest::new("gravity_vector", g).candidate(root_candidate());
    for name in GRAVITY_VECTOR_NAMES {
        request = request.candidate(settings_candidate(name));
    }
    request
        .legacy(
            LegacyCommand::new("/define/operating-conditions/gravity", &["yes"])
                .real(g[0])
                .real(g[1])
                .real(g[2]),
        )
        .gui_hint("Setup → General → Gravity (check) → X, Y, Z")
}

/// Applies the gravity vector
pub fn apply_gravity(applier: &Applier, target: &mut dyn Target, g: [f64; 3]) -> ApplyReport {
    applier.apply(target, &gravity_request(g))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
