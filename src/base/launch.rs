use serde::{Deserialize, Serialize};
use std::fmt;

/// Defines the floating-point precision of the solver
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum Precision {
    Single,
    Double,
}

/// Defines how the solver user interface is shown
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum UiMode {
    /// Full graphical interface (the user may finish the setup by hand)
    Gui,

    /// Graphical interface hidden
    HiddenGui,

    /// Console only
    NoGui,
}

/// Holds the options used to launch a solver session
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LaunchOptions {
    /// Floating-point precision
    pub precision: Precision,

    /// Number of solver processes
    pub processor_count: usize,

    /// User interface mode
    pub ui_mode: UiMode,

    /// Product version (e.g., "25.1.0")
    pub product_version: String,
}

impl LaunchOptions {
    /// Allocates a new instance with default values
    pub fn new() -> Self {
        LaunchOptions {
            precision: Precision::Double,
            processor_count: 4,
            ui_mode: UiMode::Gui,
            product_version: "25.1.0".to_string(),
        }
    }

    /// Validates all data
    ///
    /// Returns a message with the inconsistent data, or returns None if everything is all right.
    pub fn validate(&self) -> Option<String> {
        if self.processor_count < 1 {
            return Some(format!(
                "processor_count = {} is incorrect; it must be ≥ 1",
                self.processor_count
            ));
        }
        let parts: Vec<_> = self.product_version.split('.').collect();
        if parts.len() != 3 || parts.iter().any(|p| p.parse::<u32>().is_err()) {
            return Some(format!(
                "product_version = {:?} is incorrect; it must be major.minor.patch",
                self.product_version
            ));
        }
        None // all good
    }
}

impl fmt::Display for LaunchOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "solver {} ({:?} precision, {} processes, {:?})",
            self.product_version, self.precision, self.processor_count, self.ui_mode
        )
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
