use crate::applier::{Applier, ApplyReport, SettingRequest};
use crate::base::ParamModels;
use crate::target::{LegacyCommand, Surface, Target};

/// Defines the surfaces tried for model settings (settings tree first)
const MODEL_SURFACES: [Surface; 2] = [Surface::Settings, Surface::Root];

/// Returns the request switching the energy equation on or off
pub fn energy_request(enabled: bool) -> SettingRequest<bool> {
    let answer = if enabled { "yes" } else { "no" };
    SettingRequest::new("models.energy.enabled", enabled)
        .field_on(&MODEL_SURFACES, "setup/models/energy/enabled")
        .legacy(LegacyCommand::new("/define/models/energy", &[answer]))
        .gui_hint("Setup → Models → Energy → On")
}

/// Returns the request selecting the viscous model
pub fn viscous_request(model: &str) -> SettingRequest<String> {
    SettingRequest::new("models.viscous.model", model.to_string())
        .field_on(&MODEL_SURFACES, "setup/models/viscous/model")
        .legacy(LegacyCommand::new(&format!("/define/models/viscous/{}", model), &["yes"]))
        .gui_hint(&format!("Setup → Models → Viscous → {}", model))
}

/// Returns the request selecting the time formulation (e.g., "unsteady-2nd-order")
pub fn time_request(time: &str) -> SettingRequest<String> {
    SettingRequest::new("general.solver.time", time.to_string())
        .field_on(&MODEL_SURFACES, "setup/general/solver/time")
        .legacy(LegacyCommand::new(&format!("/define/models/{}", time), &["yes"]))
        .gui_hint(&format!("Setup → General → Time → {}", time))
}

/// Applies the energy, viscous, and time settings, in this order
pub fn apply_models(applier: &Applier, target: &mut dyn Target, models: &ParamModels) -> Vec<ApplyReport> {
    vec![
        applier.apply(target, &energy_request(models.energy)),
        applier.apply(target, &viscous_request(&models.viscous)),
        applier.apply(target, &time_request(&models.time)),
    ]
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
