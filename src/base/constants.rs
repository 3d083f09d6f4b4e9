/// Defines the directory where the summary files are saved
pub const DEFAULT_OUT_DIR: &str = "/tmp/cfdsetup/results";

/// Defines an auxiliary directory where the test result files are saved
pub const DEFAULT_TEST_DIR: &str = "/tmp/cfdsetup/test";

/// Defines the interval between two health checks of the liveness poll (milliseconds)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2_000;

/// Defines the standard gravity acceleration (m/s²)
pub const STANDARD_GRAVITY: f64 = 9.81;

/// Defines the density used when the base material density cannot be read (kg/m³)
pub const DEFAULT_WATER_DENSITY: f64 = 998.2;

/// Defines the name of the base material of derived fluids
pub const DEFAULT_BASE_MATERIAL: &str = "water-liquid";

/// Defines the extension of the data file stored next to a case file
pub const DATA_FILE_EXTENSION: &str = "dat.h5";
