use super::{FileAction, SetupSummary};
use crate::applier::Applier;
use crate::base::JobConfig;
use crate::recipes::{apply_gravity, apply_initialization, apply_material, apply_models, apply_multiphase, apply_patch};
use crate::target::{LegacyCommand, Target};
use crate::StrError;
use log::{debug, error, info, warn};
use std::path::Path;

/// Runs the setup of one case: opens the files and forces the configured settings
///
/// Reading the case is the only step that may abort the workflow; every other refusal ends up
/// in the summary.
pub struct SetupWorkflow<'a> {
    /// Holds the job
    pub job: &'a JobConfig,

    /// Applies the settings
    applier: Applier,
}

/// Returns the path as text for a legacy command argument
fn path_arg(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

impl<'a> SetupWorkflow<'a> {
    /// Allocates a new instance
    pub fn new(job: &'a JobConfig, verbose: bool) -> Result<Self, StrError> {
        if job.validate().is_some() {
            return Err("cannot allocate setup workflow because job.validate() failed");
        }
        Ok(SetupWorkflow {
            job,
            applier: Applier::new(verbose),
        })
    }

    /// Runs the workflow
    pub fn run(&self, target: &mut dyn Target) -> Result<SetupSummary, StrError> {
        let job = self.job;
        let files = &job.files;

        // case file
        let case = files.case_path();
        if !case.exists() {
            error!("case file not found: {}", case.display());
            return Err("case file does not exist");
        }
        let read_case = LegacyCommand::new("/file/read-case", &[]).arg(&path_arg(&case));
        if let Err(refusal) = target.run_command(&read_case) {
            error!("cannot read {}: {}", case.display(), refusal);
            return Err("solver refused to read the case file");
        }
        info!("case read from {}", case.display());

        // settings file (may overwrite models and zones)
        let settings_file = match files.existing_settings() {
            None => FileAction::NotFound,
            Some(_) if !job.apply_settings => FileAction::Disabled,
            Some(path) => {
                let command = LegacyCommand::new("/file/read-settings", &[]).arg(&path_arg(&path));
                match target.run_command(&command) {
                    Ok(()) => {
                        info!("settings applied from {}", path.display());
                        FileAction::Read
                    }
                    Err(refusal) => {
                        warn!("cannot apply settings from {}: {}", path.display(), refusal);
                        FileAction::Refused(refusal.to_string())
                    }
                }
            }
        };

        // data file (inconsistent with a modified setup)
        let data_file = match files.existing_data() {
            None => FileAction::NotFound,
            Some(path) if job.forces_setup() => {
                warn!(
                    "{} exists but is not read because the setup is modified",
                    path.display()
                );
                FileAction::Skipped
            }
            Some(path) => {
                let command = LegacyCommand::new("/file/read-data", &[]).arg(&path_arg(&path));
                match target.run_command(&command) {
                    Ok(()) => {
                        info!("results read from {}", path.display());
                        FileAction::Read
                    }
                    Err(refusal) => {
                        warn!("cannot read results from {}: {}", path.display(), refusal);
                        FileAction::Refused(refusal.to_string())
                    }
                }
            }
        };

        // forced settings
        let applier = &self.applier;
        let mut reports = Vec::new();
        let mut material_created = None;
        let mut material_density = None;
        if job.forces_setup() {
            applier.print_header();
        }
        if let Some(models) = &job.models {
            reports.extend(apply_models(applier, target, models));
        }
        if let Some(g) = job.gravity {
            reports.push(apply_gravity(applier, target, g));
        }
        if let Some(material) = &job.material {
            let result = apply_material(applier, target, material);
            material_created = Some(result.created);
            material_density = Some(result.density);
            reports.extend(result.reports);
        }
        if let Some(vof) = &job.multiphase {
            reports.extend(apply_multiphase(applier, target, vof));
        }
        if let Some(method) = job.initialization {
            reports.push(apply_initialization(applier, target, method));
        }
        if let Some(patch) = &job.patch {
            reports.push(apply_patch(applier, target, patch));
        }

        // mesh
        let mesh_displayed = if job.display_mesh {
            match target.run_command(&LegacyCommand::new("/display/mesh", &[])) {
                Ok(()) => true,
                Err(refusal) => {
                    debug!("cannot display the mesh: {}", refusal);
                    false
                }
            }
        } else {
            false
        };

        Ok(SetupSummary {
            case,
            settings_file,
            data_file,
            reports,
            material_created,
            material_density,
            mesh_displayed,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::SetupWorkflow;
    use crate::base::{CaseFiles, JobConfig, DEFAULT_TEST_DIR};
    use crate::samples::Samples;
    use crate::target::{SimulatedTarget, SurfaceProfile};
    use crate::workflow::FileAction;
    use crate::StrError;
    use std::fs;
    use std::path::{Path, PathBuf};

    /// Creates a case directory with the given files
    fn case_dir(name: &str, files: &[&str]) -> PathBuf {
        let dir = Path::new(DEFAULT_TEST_DIR).join(name);
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        for file in files {
            fs::write(dir.join(file), b"sample").unwrap();
        }
        dir
    }

    #[test]
    fn new_captures_errors() {
        let mut job = JobConfig::new(CaseFiles::new(Path::new("/data"), "run.cas.h5", None));
        job.poll_interval_ms = 0;
        assert_eq!(
            SetupWorkflow::new(&job, false).err(),
            Some("cannot allocate setup workflow because job.validate() failed")
        );
    }

    #[test]
    fn missing_case_is_fatal() -> Result<(), StrError> {
        let dir = case_dir("workflow_missing_case", &[]);
        let job = JobConfig::new(CaseFiles::new(&dir, "run.cas.h5", None));
        let mut target = SimulatedTarget::new(Samples::profile_modern())?;
        let workflow = SetupWorkflow::new(&job, false)?;
        assert_eq!(workflow.run(&mut target).err(), Some("case file does not exist"));
        assert!(target.journal().is_empty());
        Ok(())
    }

    #[test]
    fn refused_case_is_fatal() -> Result<(), StrError> {
        let dir = case_dir("workflow_refused_case", &["run.cas.h5"]);
        let job = JobConfig::new(CaseFiles::new(&dir, "run.cas.h5", None));
        let mut target = SimulatedTarget::new(SurfaceProfile::new("no-commands"))?;
        let workflow = SetupWorkflow::new(&job, false)?;
        assert_eq!(
            workflow.run(&mut target).err(),
            Some("solver refused to read the case file")
        );
        Ok(())
    }

    #[test]
    fn open_only_reads_all_files() -> Result<(), StrError> {
        let dir = case_dir("workflow_open_only", &["run.cas.h5", "run.set", "run.cas.dat.h5"]);
        let job = JobConfig::new(CaseFiles::new(&dir, "run.cas.h5", Some("run.set")));
        let mut target = SimulatedTarget::new(Samples::profile_modern())?;
        let summary = SetupWorkflow::new(&job, false)?.run(&mut target)?;
        assert_eq!(summary.settings_file, FileAction::Read);
        assert_eq!(summary.data_file, FileAction::Read);
        assert_eq!(summary.reports.len(), 0);
        assert_eq!(summary.material_created, None);
        assert!(summary.mesh_displayed);
        let case = dir.join("run.cas.h5");
        let settings = dir.join("run.set");
        let data = dir.join("run.cas.dat.h5");
        assert_eq!(
            target.journal(),
            &[
                format!("/file/read-case {}", case.display()),
                format!("/file/read-settings {}", settings.display()),
                format!("/file/read-data {}", data.display()),
                "/display/mesh".to_string(),
            ]
        );
        Ok(())
    }

    #[test]
    fn forced_setup_skips_data() -> Result<(), StrError> {
        let dir = case_dir("workflow_forced_setup", &["run.cas.h5", "run.set", "run.cas.dat.h5"]);
        let mut job = JobConfig::new(CaseFiles::new(&dir, "run.cas.h5", Some("run.set")));
        job.apply_settings = false;
        job.display_mesh = false;
        job.set_standard_gravity()?;
        let mut target = SimulatedTarget::new(Samples::profile_legacy())?;
        let summary = SetupWorkflow::new(&job, false)?.run(&mut target)?;
        assert_eq!(summary.settings_file, FileAction::Disabled);
        assert_eq!(summary.data_file, FileAction::Skipped);
        assert_eq!(summary.reports.len(), 1);
        assert!(!summary.mesh_displayed);
        assert_eq!(target.journal().len(), 1);
        Ok(())
    }
}
