use super::DATA_FILE_EXTENSION;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Holds the locations of the case and settings files
///
/// Relative paths are resolved against `base_dir`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CaseFiles {
    /// Directory against which relative paths are resolved
    pub base_dir: PathBuf,

    /// Case (mesh and setup) file, e.g., `FFF-Setup-Output.cas.h5`
    pub case: PathBuf,

    /// Saved settings file, e.g., `FFF.set`
    #[serde(default)]
    pub settings: Option<PathBuf>,
}

impl CaseFiles {
    /// Allocates a new instance
    pub fn new(base_dir: &Path, case: &str, settings: Option<&str>) -> Self {
        CaseFiles {
            base_dir: base_dir.to_path_buf(),
            case: PathBuf::from(case),
            settings: settings.map(PathBuf::from),
        }
    }

    /// Resolves a relative base directory against `dir` (e.g., the directory of the job file)
    pub fn rebase(&mut self, dir: &Path) {
        if self.base_dir.is_relative() {
            self.base_dir = dir.join(&self.base_dir);
        }
    }

    /// Returns the full path of the case file
    pub fn case_path(&self) -> PathBuf {
        self.base_dir.join(&self.case)
    }

    /// Returns the full path of the settings file, if configured
    pub fn settings_path(&self) -> Option<PathBuf> {
        self.settings.as_ref().map(|s| self.base_dir.join(s))
    }

    /// Returns the full path of the data file stored next to the case file
    ///
    /// The last extension of the case file is replaced by `dat.h5`; thus
    /// `run.cas.h5` corresponds to `run.cas.dat.h5`.
    pub fn data_path(&self) -> PathBuf {
        self.case_path().with_extension(DATA_FILE_EXTENSION)
    }

    /// Returns the settings path only if the file exists
    pub fn existing_settings(&self) -> Option<PathBuf> {
        self.settings_path().filter(|p| p.exists())
    }

    /// Returns the data path only if the file exists
    pub fn existing_data(&self) -> Option<PathBuf> {
        Some(self.data_path()).filter(|p| p.exists())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::CaseFiles;
    use crate::base::DEFAULT_TEST_DIR;
    use std::fs;
    use std::path::{Path, PathBuf};

    #[test]
    fn paths_work() {
        let files = CaseFiles::new(
            Path::new("/data/project"),
            "WorkBench_files/dp0/FFF/Fluent/FFF-Setup-Output.cas.h5",
            Some("WorkBench_files/dp0/FFF/Fluent/FFF.set"),
        );
        assert_eq!(
            files.case_path(),
            PathBuf::from("/data/project/WorkBench_files/dp0/FFF/Fluent/FFF-Setup-Output.cas.h5")
        );
        assert_eq!(
            files.settings_path(),
            Some(PathBuf::from("/data/project/WorkBench_files/dp0/FFF/Fluent/FFF.set"))
        );
        assert_eq!(
            files.data_path(),
            PathBuf::from("/data/project/WorkBench_files/dp0/FFF/Fluent/FFF-Setup-Output.cas.dat.h5")
        );
    }

    #[test]
    fn rebase_works() {
        let mut files = CaseFiles::new(Path::new("project"), "a.cas.h5", None);
        files.rebase(Path::new("/home/user/jobs"));
        assert_eq!(files.case_path(), PathBuf::from("/home/user/jobs/project/a.cas.h5"));
        files.rebase(Path::new("/elsewhere"));
        assert_eq!(files.case_path(), PathBuf::from("/home/user/jobs/project/a.cas.h5"));
        assert_eq!(files.settings_path(), None);
    }

    #[test]
    fn existing_works() {
        let dir = Path::new(DEFAULT_TEST_DIR).join("case_files_existing");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("run.cas.h5"), b"case").unwrap();
        fs::write(dir.join("run.set"), b"settings").unwrap();
        let _ = fs::remove_file(dir.join("run.cas.dat.h5"));
        let files = CaseFiles::new(&dir, "run.cas.h5", Some("run.set"));
        assert_eq!(files.existing_settings(), Some(dir.join("run.set")));
        assert_eq!(files.existing_data(), None);
        fs::write(dir.join("run.cas.dat.h5"), b"data").unwrap();
        assert_eq!(files.existing_data(), Some(dir.join("run.cas.dat.h5")));
    }
}
