use crate::applier::{ApplyReport, Outcome};
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fmt;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Defines what happened to an optional input file
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub enum FileAction {
    /// The file does not exist
    NotFound,

    /// Reading the file is disabled by the job
    Disabled,

    /// The file was read by the solver
    Read,

    /// The solver refused to read the file
    Refused(String),

    /// The file exists but was deliberately not read (e.g., data onto a modified setup)
    Skipped,
}

impl fmt::Display for FileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileAction::NotFound => write!(f, "not found"),
            FileAction::Disabled => write!(f, "disabled"),
            FileAction::Read => write!(f, "read"),
            FileAction::Refused(message) => write!(f, "refused ({})", message),
            FileAction::Skipped => write!(f, "skipped"),
        }
    }
}

/// Holds the results of a setup workflow
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SetupSummary {
    /// Case file read by the solver
    pub case: PathBuf,

    /// What happened to the settings file
    pub settings_file: FileAction,

    /// What happened to the data file
    pub data_file: FileAction,

    /// Reports of all applied settings, in order
    pub reports: Vec<ApplyReport>,

    /// The derived material was created by this run (None if no material was requested)
    pub material_created: Option<bool>,

    /// Density given to the derived material (kg/m³)
    pub material_density: Option<f64>,

    /// The mesh display command was accepted
    pub mesh_displayed: bool,
}

impl SetupSummary {
    /// Returns the number of settings applied via the primary path
    pub fn n_primary(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| r.outcome == Outcome::AppliedViaPrimary)
            .count()
    }

    /// Returns the number of settings applied via a fallback path (including the legacy form)
    pub fn n_fallback(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::AppliedViaFallback(..)))
            .count()
    }

    /// Returns the reports of the settings that must be finished by hand
    pub fn failures(&self) -> Vec<&ApplyReport> {
        self.reports.iter().filter(|r| r.outcome == Outcome::Failed).collect()
    }

    /// Returns the report of a setting, if it was attempted
    pub fn report(&self, key: &str) -> Option<&ApplyReport> {
        self.reports.iter().find(|r| r.key == key)
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
        let file = File::open(path).map_err(|_| "cannot open summary file")?;
        let buffered = BufReader::new(file);
        let summary = serde_json::from_reader(buffered).map_err(|_| "cannot parse summary file")?;
        Ok(summary)
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

impl fmt::Display for SetupSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Setup summary")?;
        writeln!(f, "=============")?;
        writeln!(f, "case = {}", self.case.display())?;
        writeln!(f, "settings file = {}", self.settings_file)?;
        writeln!(f, "data file = {}", self.data_file)?;
        if let Some(created) = self.material_created {
            let action = if created { "created" } else { "updated" };
            match self.material_density {
                Some(rho) => writeln!(f, "material {} (ρ = {:?} kg/m³)", action, rho)?,
                None => writeln!(f, "material {}", action)?,
            }
        }
        writeln!(f, "mesh displayed = {:?}", self.mesh_displayed)?;
        writeln!(f, "\nSettings")?;
        writeln!(f, "========")?;
        for r in &self.reports {
            writeln!(f, "{} = {} : {}", r.key, r.value, r.outcome)?;
        }
        let failures = self.failures();
        if !failures.is_empty() {
            writeln!(f, "\nTo be finished by hand")?;
            writeln!(f, "======================")?;
            for r in failures {
                if let Some(d) = &r.diagnostic {
                    writeln!(f, "{}", d)?;
                }
            }
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
