use crate::base::{CaseFiles, InitMethod, JobConfig, ParamHerschelBulkley, ParamMaterial, ParamModels, ParamPatch};
use crate::base::{ParamVof, DEFAULT_BASE_MATERIAL, DEFAULT_WATER_DENSITY, STANDARD_GRAVITY};
use crate::target::{Surface, SurfaceProfile, Value, ValueKind};
use std::path::Path;

/// Holds samples of profiles and jobs
pub struct Samples;

impl Samples {
    /// Returns the names of the built-in profiles
    pub fn profile_names() -> &'static [&'static str] {
        &["modern", "legacy", "tui-only"]
    }

    /// Returns a built-in profile by name
    pub fn profile(name: &str) -> Option<SurfaceProfile> {
        match name {
            "modern" => Some(Samples::profile_modern()),
            "legacy" => Some(Samples::profile_legacy()),
            "tui-only" => Some(Samples::profile_tui_only()),
            _ => None,
        }
    }

    /// Returns a profile where the settings tree exposes everything
    ///
    /// The root shortcut objects are absent.
    #[rustfmt::skip]
    pub fn profile_modern() -> SurfaceProfile {
        let s = Surface::Settings;
        let mut p = SurfaceProfile::new("modern");
        p.field(s, "setup/models/energy/enabled", ValueKind::Bool)
         .field_choices(s, "setup/models/viscous/model", &["inviscid", "laminar", "k-epsilon", "k-omega"])
         .field_choices(s, "setup/general/solver/time", &["steady", "unsteady-1st-order", "unsteady-2nd-order"])
         .field(s, "setup/operating_conditions/gravity", ValueKind::Bool)
         .field(s, "setup/operating_conditions/gravity_vector", ValueKind::Reals)
         .container(s, "setup/materials/fluid", &["air", DEFAULT_BASE_MATERIAL], &["copy", "create"])
         .field_choices(s, "setup/materials/fluid/*/density/option", &["constant", "boussinesq", "polynomial"])
         .field(s, "setup/materials/fluid/*/density/value", ValueKind::Real)
         .field_choices(s, "setup/materials/fluid/*/viscosity/option", &["constant", "power-law", "herschel-bulkley"])
         .field(s, "setup/materials/fluid/*/viscosity/herschel_bulkley/consistency_index", ValueKind::Real)
         .field(s, "setup/materials/fluid/*/viscosity/herschel_bulkley/power_law_index", ValueKind::Real)
         .field(s, "setup/materials/fluid/*/viscosity/herschel_bulkley/yield_stress", ValueKind::Real)
         .field(s, "setup/materials/fluid/*/viscosity/herschel_bulkley/yield_stress_threshold", ValueKind::Real)
         .field(s, "setup/materials/fluid/*/viscosity/herschel_bulkley/critical_shear_rate", ValueKind::Real)
         .value(s, "setup/materials/fluid/air/density/option", Value::text("constant"))
         .value(s, "setup/materials/fluid/air/density/value", Value::Real(1.225))
         .value(s, "setup/materials/fluid/water-liquid/density/option", Value::text("constant"))
         .value(s, "setup/materials/fluid/water-liquid/density/value", Value::Real(DEFAULT_WATER_DENSITY))
         .container(s, "setup/cell_zone_conditions/fluid", &["fluid-body"], &[])
         .field(s, "setup/cell_zone_conditions/fluid/*/material", ValueKind::Text)
         .field_choices(s, "setup/models/multiphase/model", &["off", "vof", "mixture", "eulerian"])
         .field(s, "setup/models/multiphase/implicit_body_force", ValueKind::Bool)
         .container(s, "setup/models/multiphase/phases", &["phase-1", "phase-2"], &[])
         .field(s, "setup/models/multiphase/phases/*/material", ValueKind::Text)
         .container(s, "solution/initialization", &[], &["hybrid_initialize", "standard_initialize", "patch"]);
        Samples::add_text_commands(&mut p);
        p
    }

    /// Returns a profile where only the root shortcut objects exist, with older names
    ///
    /// There is no structured multiphase access and only hybrid initialization.
    #[rustfmt::skip]
    pub fn profile_legacy() -> SurfaceProfile {
        let r = Surface::Root;
        let mut p = SurfaceProfile::new("legacy");
        p.field(r, "setup/models/energy/enabled", ValueKind::Bool)
         .field_choices(r, "setup/models/viscous/model", &["inviscid", "laminar", "k-epsilon"])
         .field_choices(r, "setup/general/solver/time", &["steady", "unsteady-1st-order", "unsteady-2nd-order"])
         .field(r, "setup/operating_conditions/gravity", ValueKind::Bool)
         .field(r, "setup/operating_conditions/gravity_vector", ValueKind::Reals)
         .container(r, "setup/materials/fluid", &["air", DEFAULT_BASE_MATERIAL], &["create"])
         .field_choices(r, "setup/materials/fluid/*/density/option", &["constant", "polynomial"])
         .field(r, "setup/materials/fluid/*/density/value", ValueKind::Real)
         .field_choices(r, "setup/materials/fluid/*/viscosity/option", &["constant", "herschel_bulkley"])
         .field(r, "setup/materials/fluid/*/viscosity/herschelbulkley/k", ValueKind::Real)
         .field(r, "setup/materials/fluid/*/viscosity/herschelbulkley/n", ValueKind::Real)
         .field(r, "setup/materials/fluid/*/viscosity/herschelbulkley/tau0", ValueKind::Real)
         .field(r, "setup/materials/fluid/*/viscosity/herschelbulkley/min_shear_rate", ValueKind::Real)
         .value(r, "setup/materials/fluid/water-liquid/density/value", Value::Real(DEFAULT_WATER_DENSITY))
         .container(r, "setup/cell_zone_conditions/fluid", &["fluid"], &[])
         .field(r, "setup/cell_zone_conditions/fluid/*/material", ValueKind::Text)
         .container(r, "solution/initialization", &[], &["hybrid_initialize"]);
        Samples::add_text_commands(&mut p);
        p
    }

    /// Returns a profile without structured surfaces (text commands only)
    pub fn profile_tui_only() -> SurfaceProfile {
        let mut p = SurfaceProfile::new("tui-only");
        Samples::add_text_commands(&mut p);
        p
    }

    /// Adds the legacy text commands known to every profile
    #[rustfmt::skip]
    fn add_text_commands(p: &mut SurfaceProfile) {
        p.command("/file/read-case", 1)
         .command("/file/read-settings", 1)
         .command("/file/read-data", 1)
         .command("/display/mesh", 0)
         .command("/define/models/energy", 1)
         .command("/define/models/viscous/laminar", 1)
         .command("/define/models/steady", 1)
         .command("/define/models/unsteady-1st-order", 1)
         .command("/define/models/unsteady-2nd-order", 1)
         .command("/define/operating-conditions/gravity", 4)
         .command("/define/materials/change-create", 12)
         .command("/define/boundary-conditions/fluid", 3)
         .command("/define/models/multiphase/model", 1)
         .command("/define/models/multiphase/body-force-formulation", 1)
         .command("/define/phases/phase-domain", 3)
         .command("/solve/initialize/hyb-initialization", 0)
         .command("/solve/initialize/initialize-flow", 0)
         .command("/solve/patch", 6);
    }

    /// Returns the Herschel–Bulkley parameters of a carbopol gel
    pub fn herschel_bulkley_carbopol() -> ParamHerschelBulkley {
        ParamHerschelBulkley {
            consistency_index: 3.67,  // Pa·sⁿ
            power_law_index: 0.66,    // -
            yield_stress: 56.91,      // Pa
            critical_shear_rate: 5.0, // 1/s
        }
    }

    /// Returns a job that forces a transient two-phase (air and carbopol) setup
    ///
    /// The case and settings files are those exported by the project manager, relative to `base_dir`.
    pub fn job_carbopol(base_dir: &Path) -> JobConfig {
        let mut job = JobConfig::new(CaseFiles::new(
            base_dir,
            "WorkBench_files/dp0/FFF/Fluent/FFF-Setup-Output.cas.h5",
            Some("WorkBench_files/dp0/FFF/Fluent/FFF.set"),
        ));
        job.models = Some(ParamModels::energy_laminar_transient());
        job.gravity = Some([0.0, 0.0, -STANDARD_GRAVITY]);
        job.material = Some(ParamMaterial {
            name: "carbopol".to_string(),
            base: DEFAULT_BASE_MATERIAL.to_string(),
            density: None,
            herschel_bulkley: Samples::herschel_bulkley_carbopol(),
            assign_to_fluid_zones: false,
        });
        job.multiphase = Some(ParamVof {
            primary_material: "air".to_string(),
            secondary_material: "carbopol".to_string(),
            implicit_body_force: true,
        });
        job.initialization = Some(InitMethod::Hybrid);
        job.patch = Some(ParamPatch {
            zone: "region_0".to_string(),
            phase: "phase-2".to_string(),
            variable: "mp".to_string(),
            value: 1.0,
        });
        job
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
