use crate::applier::{Applier, ApplyReport, Candidate, SettingRequest};
use crate::base::{InitMethod, ParamPatch};
use crate::target::{join_path, LegacyCommand, Surface, Target, Value};

/// Defines the initialization node (on both structured surfaces)
pub const INITIALIZATION: &str = "solution/initialization";

const INITIALIZATION_SURFACES: [Surface; 2] = [Surface::Settings, Surface::Root];

impl InitMethod {
    /// Returns the name of the method invoked on the initialization node
    pub fn method_name(&self) -> &'static str {
        match self {
            InitMethod::Hybrid => "hybrid_initialize",
            InitMethod::Standard => "standard_initialize",
        }
    }

    /// Returns the legacy text command performing the same initialization
    pub fn legacy_command(&self) -> LegacyCommand {
        match self {
            InitMethod::Hybrid => LegacyCommand::new("/solve/initialize/hyb-initialization", &[]),
            InitMethod::Standard => LegacyCommand::new("/solve/initialize/initialize-flow", &[]),
        }
    }
}

/// Returns the request initializing the solution
pub fn initialization_request(method: InitMethod) -> SettingRequest<InitMethod> {
    let mut request = SettingRequest::new("initialization.method", method);
    for surface in INITIALIZATION_SURFACES {
        let label = surface.label(&join_path(&[INITIALIZATION, method.method_name()]));
        request = request.candidate(Candidate::new(label, move |target: &mut dyn Target, m: &InitMethod| {
            target.invoke(surface, INITIALIZATION, m.method_name(), &[])
        }));
    }
    let hint = match method {
        InitMethod::Hybrid => "Solution → Initialization → Hybrid → Initialize",
        InitMethod::Standard => "Solution → Initialization → Standard → Initialize",
    };
    request.legacy(method.legacy_command()).gui_hint(hint)
}

/// Returns the request patching a value into a zone
pub fn patch_request(patch: &ParamPatch) -> SettingRequest<ParamPatch> {
    let mut request = SettingRequest::new("initialization.patch", patch.clone());
    for surface in INITIALIZATION_SURFACES {
        let label = surface.label(&join_path(&[INITIALIZATION, "patch"]));
        request = request.candidate(Candidate::new(label, move |target: &mut dyn Target, p: &ParamPatch| {
            let args = [
                Value::text(&p.phase),
                Value::text(&p.zone),
                Value::text(&p.variable),
                Value::Real(p.value),
            ];
            target.invoke(surface, INITIALIZATION, "patch", &args)
        }));
    }
    request
        .legacy(
            LegacyCommand::new("/solve/patch", &[patch.phase.as_str(), "()", patch.zone.as_str(), "()"])
                .arg(&patch.variable)
                .arg("no")
                .real(patch.value),
        )
        .gui_hint(&format!(
            "Solution → Initialization → Patch… → Phase {} → Variable {} → Zone {}",
            patch.phase, patch.variable, patch.zone
        ))
}

/// Initializes the solution
pub fn apply_initialization(applier: &Applier, target: &mut dyn Target, method: InitMethod) -> ApplyReport {
    applier.apply(target, &initialization_request(method))
}

/// Patches a value into a zone (after initialization)
pub fn apply_patch(applier: &Applier, target: &mut dyn Target, patch: &ParamPatch) -> ApplyReport {
    applier.apply(target, &patch_request(patch))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{apply_initialization, apply_patch, initialization_request, patch_request};
    use crate::applier::{Applier, Outcome};
    use crate::base::{InitMethod, ParamPatch};
    use crate::samples::Samples;
    use crate::target::SimulatedTarget;
    use crate::StrError;

    fn region_full_of_carbopol() -> ParamPatch {
        ParamPatch {
            zone: "region_0".to_string(),
            phase: "phase-2".to_string(),
            variable: "mp".to_string(),
            value: 1.0,
        }
    }

    #[test]
    fn requests_work() {
        let request = initialization_request(InitMethod::Standard);
        assert_eq!(
            request.candidates()[0].label(),
            "solver.settings.solution.initialization.standard_initialize"
        );
        assert_eq!(
            format!("{}", request.legacy_command().unwrap()),
            "/solve/initialize/initialize-flow"
        );
        let request = patch_request(&region_full_of_carbopol());
        assert_eq!(
            format!("{}", request.legacy_command().unwrap()),
            "/solve/patch phase-2 () region_0 () mp no 1"
        );
    }

    #[test]
    fn initialize_and_patch_modern_work() -> Result<(), StrError> {
        let mut target = SimulatedTarget::new(Samples::profile_modern())?;
        let applier = Applier::new(false);
        let report = apply_initialization(&applier, &mut target, InitMethod::Hybrid);
        assert_eq!(report.outcome, Outcome::AppliedViaPrimary);
        let report = apply_patch(&applier, &mut target, &region_full_of_carbopol());
        assert_eq!(report.outcome, Outcome::AppliedViaPrimary);
        assert_eq!(
            target.journal(),
            &[
                "solver.settings.solution.initialization.hybrid_initialize()",
                "solver.settings.solution.initialization.patch(\"phase-2\", \"region_0\", \"mp\", 1.0)",
            ]
        );
        Ok(())
    }

    #[test]
    fn initialize_and_patch_tui_only_work() -> Result<(), StrError> {
        let mut target = SimulatedTarget::new(Samples::profile_tui_only())?;
        let applier = Applier::new(false);
        let report = apply_initialization(&applier, &mut target, InitMethod::Hybrid);
        assert_eq!(report.outcome, Outcome::AppliedViaFallback("legacy".to_string()));
        let report = apply_patch(&applier, &mut target, &region_full_of_carbopol());
        assert_eq!(report.outcome, Outcome::AppliedViaFallback("legacy".to_string()));
        assert_eq!(
            target.journal(),
            &[
                "/solve/initialize/hyb-initialization",
                "/solve/patch phase-2 () region_0 () mp no 1",
            ]
        );
        Ok(())
    }
}
