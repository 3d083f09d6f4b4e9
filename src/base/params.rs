use super::DEFAULT_BASE_MATERIAL;
use serde::{Deserialize, Serialize};

/// Holds the physics models forced on the case
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ParamModels {
    /// Energy equation
    pub energy: bool,

    /// Viscous model (e.g., "laminar")
    pub viscous: String,

    /// Time formulation (e.g., "unsteady-2nd-order")
    pub time: String,
}

impl ParamModels {
    /// Returns energy on, laminar flow, and second-order transient time stepping
    pub fn energy_laminar_transient() -> Self {
        ParamModels {
            energy: true,
            viscous: "laminar".to_string(),
            time: "unsteady-2nd-order".to_string(),
        }
    }
}

/// Holds parameters for the Herschel–Bulkley viscosity model
///
/// ```text
/// τ = τ0 + K γ̇ⁿ        for γ̇ > γ̇c
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct ParamHerschelBulkley {
    /// Consistency index K (Pa·sⁿ)
    pub consistency_index: f64,

    /// Power-law index n (-)
    pub power_law_index: f64,

    /// Yield stress τ0 (Pa)
    pub yield_stress: f64,

    /// Critical shear rate γ̇c (1/s)
    pub critical_shear_rate: f64,
}

impl ParamHerschelBulkley {
    /// Validates all data
    ///
    /// Returns a message with the inconsistent data, or returns None if everything is all right.
    pub fn validate(&self) -> Option<String> {
        if self.consistency_index <= 0.0 {
            return Some(format!(
                "consistency_index = {:?} is incorrect; it must be > 0.0",
                self.consistency_index
            ));
        }
        if self.power_law_index <= 0.0 {
            return Some(format!(
                "power_law_index = {:?} is incorrect; it must be > 0.0",
                self.power_law_index
            ));
        }
        if self.yield_stress < 0.0 {
            return Some(format!(
                "yield_stress = {:?} is incorrect; it must be ≥ 0.0",
                self.yield_stress
            ));
        }
        if self.critical_shear_rate <= 0.0 {
            return Some(format!(
                "critical_shear_rate = {:?} is incorrect; it must be > 0.0",
                self.critical_shear_rate
            ));
        }
        None // all good
    }
}

/// Holds parameters for a fluid material derived from a base material
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ParamMaterial {
    /// Name of the new (or updated) material
    pub name: String,

    /// Name of the material to copy from
    #[serde(default = "default_base_material")]
    pub base: String,

    /// Constant density (kg/m³); None means "copy from the base material"
    #[serde(default)]
    pub density: Option<f64>,

    /// Viscosity parameters
    pub herschel_bulkley: ParamHerschelBulkley,

    /// Assigns the material to every fluid cell zone
    #[serde(default)]
    pub assign_to_fluid_zones: bool,
}

fn default_base_material() -> String {
    DEFAULT_BASE_MATERIAL.to_string()
}

impl ParamMaterial {
    /// Validates all data
    ///
    /// Returns a message with the inconsistent data, or returns None if everything is all right.
    pub fn validate(&self) -> Option<String> {
        if self.name.is_empty() {
            return Some("material name must not be empty".to_string());
        }
        if self.name == self.base {
            return Some(format!("material {:?} must differ from its base material", self.name));
        }
        if let Some(rho) = self.density {
            if rho <= 0.0 {
                return Some(format!("density = {:?} is incorrect; it must be > 0.0", rho));
            }
        }
        self.herschel_bulkley.validate()
    }
}

/// Holds parameters for the two-phase Volume-of-Fluid model
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ParamVof {
    /// Material of the primary phase (e.g., "air")
    pub primary_material: String,

    /// Material of the secondary phase (e.g., "carbopol")
    pub secondary_material: String,

    /// Uses the implicit body-force formulation
    #[serde(default)]
    pub implicit_body_force: bool,
}

impl ParamVof {
    /// Validates all data
    ///
    /// Returns a message with the inconsistent data, or returns None if everything is all right.
    pub fn validate(&self) -> Option<String> {
        if self.primary_material.is_empty() || self.secondary_material.is_empty() {
            return Some("phase materials must not be empty".to_string());
        }
        if self.primary_material == self.secondary_material {
            return Some(format!(
                "phases must use different materials; both use {:?}",
                self.primary_material
            ));
        }
        None // all good
    }
}

/// Defines the solution initialization methods
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum InitMethod {
    /// Solves a Laplace problem for velocity and pressure
    Hybrid,

    /// Uses constant values from the boundary conditions
    Standard,
}

/// Holds parameters for patching a value into a region after initialization
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ParamPatch {
    /// Cell zone or register receiving the value
    pub zone: String,

    /// Phase owning the variable (e.g., "phase-2")
    pub phase: String,

    /// Variable name (e.g., "mp" for the volume fraction)
    pub variable: String,

    /// Value
    pub value: f64,
}

impl ParamPatch {
    /// Validates all data
    ///
    /// Returns a message with the inconsistent data, or returns None if everything is all right.
    pub fn validate(&self) -> Option<String> {
        if self.zone.is_empty() || self.phase.is_empty() || self.variable.is_empty() {
            return Some("patch zone, phase, and variable must not be empty".to_string());
        }
        if self.variable == "mp" && (self.value < 0.0 || self.value > 1.0) {
            return Some(format!(
                "volume fraction = {:?} is incorrect; it must be 0.0 ≤ α ≤ 1.0",
                self.value
            ));
        }
        None // all good
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
