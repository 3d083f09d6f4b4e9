use super::{CaseFiles, InitMethod, LaunchOptions, ParamMaterial, ParamModels, ParamPatch, ParamVof};
use super::{DEFAULT_POLL_INTERVAL_MS, STANDARD_GRAVITY};
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fmt;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Holds the description of one setup job: what to open and which settings to force
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct JobConfig {
    /// Options to launch the solver session
    pub launch: LaunchOptions,

    /// Case and settings files
    pub files: CaseFiles,

    /// Applies the saved settings file (if it exists) after reading the case
    #[serde(default = "default_true")]
    pub apply_settings: bool,

    /// Forced physics models
    #[serde(default)]
    pub models: Option<ParamModels>,

    /// Gravity vector (m/s²)
    #[serde(default)]
    pub gravity: Option<[f64; 3]>,

    /// Derived fluid material
    #[serde(default)]
    pub material: Option<ParamMaterial>,

    /// Two-phase Volume-of-Fluid configuration
    #[serde(default)]
    pub multiphase: Option<ParamVof>,

    /// Solution initialization
    #[serde(default)]
    pub initialization: Option<InitMethod>,

    /// Region patched after initialization
    #[serde(default)]
    pub patch: Option<ParamPatch>,

    /// Shows the mesh once the setup is done
    #[serde(default = "default_true")]
    pub display_mesh: bool,

    /// Interval between health checks (milliseconds)
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_true() -> bool {
    true
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

impl JobConfig {
    /// Allocates a new job that only opens the case (no forced setting)
    pub fn new(files: CaseFiles) -> Self {
        JobConfig {
            launch: LaunchOptions::new(),
            files,
            apply_settings: true,
            models: None,
            gravity: None,
            material: None,
            multiphase: None,
            initialization: None,
            patch: None,
            display_mesh: true,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }

    /// Sets the forced models
    pub fn set_models(&mut self, models: ParamModels) -> Result<&mut Self, StrError> {
        if models.viscous.is_empty() || models.time.is_empty() {
            return Err("viscous model and time formulation must not be empty");
        }
        self.models = Some(models);
        Ok(self)
    }

    /// Sets the gravity vector
    pub fn set_gravity(&mut self, gravity: [f64; 3]) -> Result<&mut Self, StrError> {
        if gravity.iter().any(|g| !g.is_finite()) {
            return Err("gravity components must be finite");
        }
        self.gravity = Some(gravity);
        Ok(self)
    }

    /// Sets the standard gravity pointing to -z
    pub fn set_standard_gravity(&mut self) -> Result<&mut Self, StrError> {
        self.set_gravity([0.0, 0.0, -STANDARD_GRAVITY])
    }

    /// Sets the derived material
    pub fn set_material(&mut self, material: ParamMaterial) -> Result<&mut Self, StrError> {
        if material.validate().is_some() {
            return Err("cannot set material because material.validate() failed");
        }
        self.material = Some(material);
        Ok(self)
    }

    /// Sets the Volume-of-Fluid configuration
    pub fn set_multiphase(&mut self, vof: ParamVof) -> Result<&mut Self, StrError> {
        if vof.validate().is_some() {
            return Err("cannot set multiphase because vof.validate() failed");
        }
        self.multiphase = Some(vof);
        Ok(self)
    }

    /// Sets the initialization method
    pub fn set_initialization(&mut self, method: InitMethod) -> Result<&mut Self, StrError> {
        self.initialization = Some(method);
        Ok(self)
    }

    /// Sets the patched region
    pub fn set_patch(&mut self, patch: ParamPatch) -> Result<&mut Self, StrError> {
        if self.initialization.is_none() {
            return Err("patch requires an initialization method");
        }
        if patch.validate().is_some() {
            return Err("cannot set patch because patch.validate() failed");
        }
        self.patch = Some(patch);
        Ok(self)
    }

    /// Indicates whether the job forces any setting onto the case
    pub fn forces_setup(&self) -> bool {
        self.models.is_some()
            || self.gravity.is_some()
            || self.material.is_some()
            || self.multiphase.is_some()
            || self.initialization.is_some()
            || self.patch.is_some()
    }

    /// Validates all data
    ///
    /// Returns a message with the inconsistent data, or returns None if everything is all right.
    pub fn validate(&self) -> Option<String> {
        if let Some(message) = self.launch.validate() {
            return Some(message);
        }
        if let Some(gravity) = &self.gravity {
            if gravity.iter().any(|g| !g.is_finite()) {
                return Some(format!("gravity = {:?} is incorrect; it must be finite", gravity));
            }
        }
        if let Some(material) = &self.material {
            if let Some(message) = material.validate() {
                return Some(message);
            }
        }
        if let Some(vof) = &self.multiphase {
            if let Some(message) = vof.validate() {
                return Some(message);
            }
        }
        if let Some(patch) = &self.patch {
            if self.initialization.is_none() {
                return Some("patch requires an initialization method".to_string());
            }
            if let Some(message) = patch.validate() {
                return Some(message);
            }
        }
        if self.poll_interval_ms == 0 {
            return Some("poll_interval_ms = 0 is incorrect; it must be ≥ 1".to_string());
        }
        None // all good
    }

    /// Reads a JSON file containing this struct
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn read_json<P>(full_path: &P) -> Result<Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        let file = File::open(path).map_err(|_| "cannot open job file")?;
        let buffered = BufReader::new(file);
        let job = serde_json::from_reader(buffered).map_err(|_| "cannot parse job file")?;
        Ok(job)
    }

    /// Writes a JSON file with this struct
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn write_json<P>(&self, full_path: &P) -> Result<(), StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        if let Some(p) = path.parent() {
            fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
        }
        let mut file = File::create(&path).map_err(|_| "cannot create file")?;
        serde_json::to_writer_pretty(&mut file, &self).map_err(|_| "cannot write file")?;
        Ok(())
    }
}

impl fmt::Display for JobConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Job")?;
        writeln!(f, "===")?;
        writeln!(f, "launch = {}", self.launch)?;
        writeln!(f, "case = {}", self.files.case_path().display())?;
        match self.files.settings_path() {
            Some(p) => writeln!(f, "settings = {}", p.display())?,
            None => writeln!(f, "settings = None")?,
        }
        writeln!(f, "apply_settings = {:?}", self.apply_settings)?;
        writeln!(f, "\nForced settings")?;
        writeln!(f, "===============")?;
        writeln!(f, "models = {:?}", self.models)?;
        writeln!(f, "gravity = {:?}", self.gravity)?;
        writeln!(f, "material = {:?}", self.material)?;
        writeln!(f, "multiphase = {:?}", self.multiphase)?;
        writeln!(f, "initialization = {:?}", self.initialization)?;
        writeln!(f, "patch = {:?}", self.patch)?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
