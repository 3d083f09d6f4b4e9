use crate::applier::{Applier, ApplyReport, SettingRequest};
use crate::base::ParamVof;
use crate::target::{join_path, LegacyCommand, Surface, Target};

/// Defines the multiphase node (on both structured surfaces)
pub const MULTIPHASE: &str = "setup/models/multiphase";

/// Defines the name of the primary phase
pub const PRIMARY_PHASE: &str = "phase-1";

/// Defines the name of the secondary phase
pub const SECONDARY_PHASE: &str = "phase-2";

const MULTIPHASE_SURFACES: [Surface; 2] = [Surface::Settings, Surface::Root];

/// Returns the request selecting the Volume-of-Fluid model
pub fn vof_model_request() -> SettingRequest<String> {
    SettingRequest::new("multiphase.model", "vof".to_string())
        .field_on(&MULTIPHASE_SURFACES, &join_path(&[MULTIPHASE, "model"]))
        .legacy(LegacyCommand::new("/define/models/multiphase/model", &["vof"]))
        .gui_hint("Setup → Models → Multiphase → Volume of Fluid")
}

/// Returns the request switching the implicit body-force formulation on
pub fn implicit_body_force_request() -> SettingRequest<bool> {
    SettingRequest::new("multiphase.implicit_body_force", true)
        .field_on(&MULTIPHASE_SURFACES, &join_path(&[MULTIPHASE, "implicit_body_force"]))
        .legacy(LegacyCommand::new(
            "/define/models/multiphase/body-force-formulation",
            &["implicit-body-force"],
        ))
        .gui_hint("Setup → Models → Multiphase → Body Force Formulation → Implicit Body Force")
}

/// Returns the request assigning a material to a phase
pub fn phase_material_request(phase: &str, material: &str) -> SettingRequest<String> {
    SettingRequest::new(&format!("phases.{}.material", phase), material.to_string())
        .field_on(&MULTIPHASE_SURFACES, &join_path(&[MULTIPHASE, "phases", phase, "material"]))
        .legacy(LegacyCommand::new("/define/phases/phase-domain", &[phase, "yes", material]))
        .gui_hint(&format!("Setup → Models → Multiphase → Phases → {} → Phase Material", phase))
}

/// Applies the VOF model, the body-force formulation (if requested), and the phase materials
pub fn apply_multiphase(applier: &Applier, target: &mut dyn Target, vof: &ParamVof) -> Vec<ApplyReport> {
    let mut reports = vec![applier.apply(target, &vof_model_request())];
    if vof.implicit_body_force {
        reports.push(applier.apply(target, &implicit_body_force_request()));
    }
    reports.push(applier.apply(target, &phase_material_request(PRIMARY_PHASE, &vof.primary_material)));
    reports.push(applier.apply(target, &phase_material_request(SECONDARY_PHASE, &vof.secondary_material)));
    reports
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
