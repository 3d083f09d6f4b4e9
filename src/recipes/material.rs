use super::{combine, set_first_choice, set_first_synonym};
use crate::applier::{first_success, Applier, ApplyReport, Candidate, SettingRequest};
use crate::base::{ParamHerschelBulkley, ParamMaterial, DEFAULT_WATER_DENSITY};
use crate::target::{join_path, LegacyCommand, Refusal, Surface, Target, Value};
use log::info;
use serde::{Deserialize, Serialize};

/// Defines the container of fluid materials (on both structured surfaces)
pub const FLUID_MATERIALS: &str = "setup/materials/fluid";

/// Defines the container of fluid cell zones (on both structured surfaces)
pub const FLUID_ZONES: &str = "setup/cell_zone_conditions/fluid";

/// Defines the surfaces tried for materials (root objects first)
const MATERIAL_SURFACES: [Surface; 2] = [Surface::Root, Surface::Settings];

/// Names of the Herschel–Bulkley option of the viscosity model
pub const HB_OPTIONS: [&str; 4] = [
    "herschel-bulkley",
    "herschel_bulkley",
    "herschelbulkley",
    "herschel-bulkley-regularized",
];

/// Names of the node holding the Herschel–Bulkley parameters (empty means the viscosity node itself)
pub const HB_NODES: [&str; 4] = ["herschel_bulkley", "herschelbulkley", "herschel_b", ""];

/// Names of the consistency index K
pub const HB_CONSISTENCY_NAMES: [&str; 4] = ["consistency_index", "k", "consistency", "consistencyindex"];

/// Names of the power-law index n
pub const HB_POWER_LAW_NAMES: [&str; 4] = ["power_law_index", "n", "powerindex", "power_index"];

/// Names of the yield stress τ0
pub const HB_YIELD_STRESS_NAMES: [&str; 3] = ["yield_stress", "tau0", "yieldstress"];

/// Names of the (optional) yield-stress threshold
pub const HB_THRESHOLD_NAMES: [&str; 3] = ["yield_stress_threshold", "yieldstressthreshold", "yield_stress_limit"];

/// Names of the critical shear rate
pub const HB_CRITICAL_SHEAR_NAMES: [&str; 4] = [
    "critical_shear_rate",
    "ref_shear_rate",
    "min_shear_rate",
    "shear_rate0",
];

/// Holds the results of the material recipe
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct MaterialResult {
    /// Reports in the order the settings were applied
    pub reports: Vec<ApplyReport>,

    /// The material did not exist before and was created (or copied)
    pub created: bool,

    /// Constant density used (kg/m³)
    pub density: f64,
}

/// Returns true if a fluid material named `name` exists on any structured surface
pub fn material_exists(target: &dyn Target, name: &str) -> bool {
    MATERIAL_SURFACES.iter().any(|surface| match target.list_children(*surface, FLUID_MATERIALS) {
        Ok(names) => names.iter().any(|n| n == name),
        Err(_) => false,
    })
}

/// Reads the density of a material whose density option is `constant`
///
/// The first surface listing the material decides; a missing option counts as `constant`.
pub fn read_constant_density(target: &dyn Target, material: &str) -> Option<f64> {
    for surface in MATERIAL_SURFACES {
        let names = match target.list_children(surface, FLUID_MATERIALS) {
            Ok(names) => names,
            Err(_) => continue,
        };
        if !names.iter().any(|n| n == material) {
            continue;
        }
        let density = join_path(&[FLUID_MATERIALS, material, "density"]);
        let constant = match target.get_field(surface, &join_path(&[density.as_str(), "option"])) {
            Ok(option) => option.as_str() == Some("constant"),
            Err(_) => true,
        };
        if !constant {
            return None;
        }
        return target
            .get_field(surface, &join_path(&[density.as_str(), "value"]))
            .ok()
            .and_then(|v| v.as_f64());
    }
    None
}

/// Returns the request ensuring the material exists (copied from `base`, else created)
pub fn ensure_material_request(name: &str, base: &str) -> SettingRequest<String> {
    let mut request = SettingRequest::new("material.exists", name.to_string());
    for surface in MATERIAL_SURFACES {
        let base = base.to_string();
        request = request.candidate(Candidate::new(
            surface.label(&join_path(&[FLUID_MATERIALS, name])),
            move |target: &mut dyn Target, name: &String| {
                let names = target.list_children(surface, FLUID_MATERIALS)?;
                if names.iter().any(|n| n == name) {
                    return Ok(());
                }
                target
                    .invoke(surface, FLUID_MATERIALS, "copy", &[Value::text(&base), Value::text(name)])
                    .or_else(|_| target.invoke(surface, FLUID_MATERIALS, "create", &[Value::text(name)]))
            },
        ));
    }
    request.gui_hint(&format!(
        "Setup → Materials → Fluid → Create/Edit… → {} (copy from {})",
        name, base
    ))
}

/// Returns the request selecting a constant density
pub fn density_option_request(name: &str) -> SettingRequest<String> {
    SettingRequest::new("material.density.option", "constant".to_string())
        .field_on(&MATERIAL_SURFACES, &join_path(&[FLUID_MATERIALS, name, "density/option"]))
        .gui_hint(&format!("Setup → Materials → {} → Density: constant", name))
}

/// Returns the request setting the constant density value
pub fn density_value_request(name: &str, density: f64) -> SettingRequest<f64> {
    SettingRequest::new("material.density.value", density)
        .field_on(&MATERIAL_SURFACES, &join_path(&[FLUID_MATERIALS, name, "density/value"]))
        .gui_hint(&format!("Setup → Materials → {} → Density: {} kg/m³", name, density))
}

/// Sets the Herschel–Bulkley parameters below one node
///
/// The threshold is optional; every other parameter must be accepted.
fn set_hb_parameters(
    target: &mut dyn Target,
    surface: Surface,
    node: &str,
    hb: &ParamHerschelBulkley,
) -> Result<(), Refusal> {
    set_first_synonym(target, surface, node, &HB_CONSISTENCY_NAMES, &Value::Real(hb.consistency_index))?;
    set_first_synonym(target, surface, node, &HB_POWER_LAW_NAMES, &Value::Real(hb.power_law_index))?;
    set_first_synonym(target, surface, node, &HB_YIELD_STRESS_NAMES, &Value::Real(hb.yield_stress))?;
    if set_first_synonym(target, surface, node, &HB_THRESHOLD_NAMES, &Value::Real(hb.yield_stress)).is_ok() {
        info!("yield-stress threshold = {:?} Pa", hb.yield_stress);
    }
    set_first_synonym(target, surface, node, &HB_CRITICAL_SHEAR_NAMES, &Value::Real(hb.critical_shear_rate))?;
    Ok(())
}

/// Returns the request selecting the Herschel–Bulkley viscosity model with its parameters
///
/// The density is only used by the legacy form, which redefines the whole material.
pub fn herschel_bulkley_request(name: &str, density: f64, hb: ParamHerschelBulkley) -> SettingRequest<ParamHerschelBulkley> {
    let mut request = SettingRequest::new("material.viscosity.herschel_bulkley", hb);
    for surface in MATERIAL_SURFACES {
        let viscosity = join_path(&[FLUID_MATERIALS, name, "viscosity"]);
        request = request.candidate(Candidate::new(
            surface.label(&viscosity),
            move |target: &mut dyn Target, hb: &ParamHerschelBulkley| {
                set_first_choice(target, surface, &join_path(&[viscosity.as_str(), "option"]), &HB_OPTIONS)?;
                first_success(HB_NODES, |node| {
                    set_hb_parameters(target, surface, &join_path(&[viscosity.as_str(), node]), hb)
                })
                .map(|_| ())
                .map_err(combine)
            },
        ));
    }
    request
        .legacy(
            LegacyCommand::new("/define/materials/change-create", &[name, "fluid", "yes", "constant"])
                .real(density)
                .arg("herschel-bulkley")
                .real(hb.consistency_index)
                .real(hb.power_law_index)
                .real(hb.yield_stress)
                .real(hb.critical_shear_rate)
                .arg("")
                .arg(""),
        )
        .gui_hint("Define → Materials → Edit… → Viscosity: Herschel–Bulkley")
}

/// Returns a candidate assigning the material to every fluid zone of one surface
///
/// Succeeds when at least one zone accepts the material.
fn zones_candidate(surface: Surface) -> Candidate<String> {
    Candidate::new(surface.label(FLUID_ZONES), move |target: &mut dyn Target, name: &String| {
        let zones = target.list_children(surface, FLUID_ZONES)?;
        if zones.is_empty() {
            return Err(Refusal::unavailable(format!("{} has no zones", surface.label(FLUID_ZONES))));
        }
        let mut refusals = Vec::new();
        for zone in &zones {
            let path = join_path(&[FLUID_ZONES, zone, "material"]);
            if let Err(r) = target.set_field(surface, &path, &Value::text(name)) {
                refusals.push(r);
            }
        }
        if refusals.len() == zones.len() {
            Err(combine(refusals))
        } else {
            Ok(())
        }
    })
}

/// Returns the request assigning the material to every fluid cell zone
pub fn fluid_zones_request(name: &str) -> SettingRequest<String> {
    MATERIAL_SURFACES
        .iter()
        .fold(SettingRequest::new("cell_zones.fluid.material", name.to_string()), |request, surface| {
            request.candidate(zones_candidate(*surface))
        })
        .legacy(LegacyCommand::new(
            "/define/boundary-conditions/fluid",
            &["all-zones", "yes", name, "", ""],
        ))
        .gui_hint("Setup → Cell Zone Conditions → Fluid → Material Name")
}

/// Creates (or updates) a Herschel–Bulkley fluid derived from a base material
///
/// The density is taken from the parameters, else from the base material (when constant),
/// else the density of liquid water is used.
pub fn apply_material(applier: &Applier, target: &mut dyn Target, material: &ParamMaterial) -> MaterialResult {
    let density = match material.density {
        Some(rho) => rho,
        None => match read_constant_density(target, &material.base) {
            Some(rho) => {
                info!("density of {} = {:?} kg/m³", material.base, rho);
                rho
            }
            None => {
                info!("density of {} is unknown; using {:?} kg/m³", material.base, DEFAULT_WATER_DENSITY);
                DEFAULT_WATER_DENSITY
            }
        },
    };
    let existed = material_exists(target, &material.name);

    let mut reports = Vec::new();
    let ensured = applier.apply(target, &ensure_material_request(&material.name, &material.base));
    let mut created = ensured.outcome.is_applied() && !existed;
    reports.push(ensured);
    reports.push(applier.apply(target, &density_option_request(&material.name)));
    reports.push(applier.apply(target, &density_value_request(&material.name, density)));
    let viscosity = applier.apply(
        target,
        &herschel_bulkley_request(&material.name, density, material.herschel_bulkley),
    );

    // change-create defines the whole material
    if viscosity.outcome.is_legacy() && !existed {
        created = true;
    }
    reports.push(viscosity);
    if material.assign_to_fluid_zones {
        reports.push(applier.apply(target, &fluid_zones_request(&material.name)));
    }
    MaterialResult {
        reports,
        created,
        density,
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{apply_material, herschel_bulkley_request, material_exists, read_constant_density};
    use crate::applier::{Applier, Outcome};
    use crate::base::{ParamHerschelBulkley, ParamMaterial};
    use crate::samples::Samples;
    use crate::target::{SimulatedTarget, Surface, SurfaceProfile, Value, ValueKind};
    use crate::StrError;

    fn carbopol() -> ParamMaterial {
        ParamMaterial {
            name: "carbopol".to_string(),
            base: "water-liquid".to_string(),
            density: None,
            herschel_bulkley: ParamHerschelBulkley {
                consistency_index: 3.67,
                power_law_index: 0.66,
                yield_stress: 56.91,
                critical_shear_rate: 5.0,
            },
            assign_to_fluid_zones: true,
        }
    }

    #[test]
    fn legacy_form_works() {
        let request = herschel_bulkley_request("carbopol", 998.2, carbopol().herschel_bulkley);
        assert_eq!(
            format!("{}", request.legacy_command().unwrap()),
            "/define/materials/change-create carbopol fluid yes constant 998.2 herschel-bulkley 3.67 0.66 56.91 5 \"\" \"\""
        );
        assert_eq!(request.candidates()[0].label(), "solver.setup.materials.fluid.carbopol.viscosity");
        assert_eq!(
            request.candidates()[1].label(),
            "solver.settings.setup.materials.fluid.carbopol.viscosity"
        );
    }

    #[test]
    fn read_constant_density_works() -> Result<(), StrError> {
        let mut profile = SurfaceProfile::new("density");
        profile
            .container(Surface::Settings, "setup/materials/fluid", &["water-liquid", "oil"], &[])
            .field_choices(Surface::Settings, "setup/materials/fluid/*/density/option", &["constant", "polynomial"])
            .field(Surface::Settings, "setup/materials/fluid/*/density/value", ValueKind::Real)
            .value(Surface::Settings, "setup/materials/fluid/water-liquid/density/value", Value::Real(997.0))
            .value(Surface::Settings, "setup/materials/fluid/oil/density/option", Value::text("polynomial"))
            .value(Surface::Settings, "setup/materials/fluid/oil/density/value", Value::Real(900.0));
        let target = SimulatedTarget::new(profile)?;
        assert_eq!(read_constant_density(&target, "water-liquid"), Some(997.0));
        assert_eq!(read_constant_density(&target, "oil"), None);
        assert_eq!(read_constant_density(&target, "honey"), None);
        assert!(material_exists(&target, "oil"));
        assert!(!material_exists(&target, "honey"));
        Ok(())
    }

    #[test]
    fn apply_material_modern_works() -> Result<(), StrError> {
        let mut target = SimulatedTarget::new(Samples::profile_modern())?;
        let result = apply_material(&Applier::new(false), &mut target, &carbopol());
        assert!(result.created);
        assert_eq!(result.density, 998.2);
        assert_eq!(result.reports.len(), 5);
        for report in &result.reports {
            assert_eq!(
                report.outcome,
                Outcome::AppliedViaFallback(report.attempts[1].label.clone()),
                "{}",
                report.key
            );
        }
        let node = "setup/materials/fluid/carbopol/viscosity/herschel_bulkley";
        assert_eq!(
            target.field(Surface::Settings, &format!("{}/consistency_index", node)),
            Some(&Value::Real(3.67))
        );
        assert_eq!(
            target.field(Surface::Settings, &format!("{}/yield_stress_threshold", node)),
            Some(&Value::Real(56.91))
        );
        assert_eq!(
            target.field(Surface::Settings, "setup/materials/fluid/carbopol/viscosity/option"),
            Some(&Value::text("herschel-bulkley"))
        );
        assert_eq!(
            target.field(Surface::Settings, "setup/cell_zone_conditions/fluid/fluid-body/material"),
            Some(&Value::text("carbopol"))
        );

        // second run updates the existing material
        let result = apply_material(&Applier::new(false), &mut target, &carbopol());
        assert!(!result.created);
        assert!(result.reports.iter().all(|r| r.outcome.is_applied()));
        Ok(())
    }

    #[test]
    fn apply_material_legacy_works() -> Result<(), StrError> {
        let mut target = SimulatedTarget::new(Samples::profile_legacy())?;
        let mut material = carbopol();
        material.density = Some(1000.0);
        let result = apply_material(&Applier::new(false), &mut target, &material);
        assert!(result.created);
        assert_eq!(result.density, 1000.0);
        let hb = &result.reports[3];
        assert_eq!(hb.outcome, Outcome::AppliedViaPrimary);
        let node = "setup/materials/fluid/carbopol/viscosity/herschelbulkley";
        assert_eq!(target.field(Surface::Root, &format!("{}/k", node)), Some(&Value::Real(3.67)));
        assert_eq!(target.field(Surface::Root, &format!("{}/n", node)), Some(&Value::Real(0.66)));
        assert_eq!(target.field(Surface::Root, &format!("{}/tau0", node)), Some(&Value::Real(56.91)));
        assert_eq!(
            target.field(Surface::Root, &format!("{}/min_shear_rate", node)),
            Some(&Value::Real(5.0))
        );
        assert_eq!(
            target.field(Surface::Root, "setup/materials/fluid/carbopol/viscosity/option"),
            Some(&Value::text("herschel_bulkley"))
        );
        Ok(())
    }

    #[test]
    fn apply_material_tui_only_works() -> Result<(), StrError> {
        let mut target = SimulatedTarget::new(Samples::profile_tui_only())?;
        let result = apply_material(&Applier::new(false), &mut target, &carbopol());
        assert!(result.created);
        assert_eq!(result.density, 998.2);
        let outcomes: Vec<_> = result.reports.iter().map(|r| r.outcome.clone()).collect();
        assert_eq!(
            outcomes,
            &[
                Outcome::Failed,
                Outcome::Failed,
                Outcome::Failed,
                Outcome::AppliedViaFallback("legacy".to_string()),
                Outcome::AppliedViaFallback("legacy".to_string()),
            ]
        );
        assert_eq!(
            result.reports[0].diagnostic.as_deref(),
            Some(
                "cannot apply material.exists = \"carbopol\" (2 unavailable, 0 rejected); \
                 set it manually in the GUI: Setup → Materials → Fluid → Create/Edit… → carbopol (copy from water-liquid)"
            )
        );
        Ok(())
    }
}
