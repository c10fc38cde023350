use std::path::Path;
use std::path::PathBuf;

/// File names used while packaging a function directory.
/// All names are relative to the function's working directory.
#[derive(Clone, Debug, PartialEq)]
pub struct PackagerConfig {
    /// Requirements file handed to the installer
    pub requirements_file: String,
    /// Exclusion patterns, one per line
    pub exclusions_file: String,
    /// Record of top-level entries emitted by a `files` run
    pub manifest_file: String,
    /// Archive produced by a `zip` run
    pub archive_file: String,
    /// Name of the bootstrap loader inside the archive
    pub bootstrap_file: String,
    /// Temporary install target
    pub staging_dir: String,
}

impl Default for PackagerConfig {
    fn default() -> Self {
        Self {
            requirements_file: "requirements.txt".to_owned(),
            exclusions_file: "anti-requirements.txt".to_owned(),
            manifest_file: "pip-packaged-files.txt".to_owned(),
            archive_file: "requirements.zip".to_owned(),
            bootstrap_file: "unzip_custom_requirements.py".to_owned(),
            staging_dir: ".dist".to_owned(),
        }
    }
}

impl PackagerConfig {
    pub fn staging_path(&self, wd: &Path) -> PathBuf {
        wd.join(&self.staging_dir)
    }

    pub fn manifest_path(&self, wd: &Path) -> PathBuf {
        wd.join(&self.manifest_file)
    }

    pub fn archive_path(&self, wd: &Path) -> PathBuf {
        wd.join(&self.archive_file)
    }

    pub fn exclusions_path(&self, wd: &Path) -> PathBuf {
        wd.join(&self.exclusions_file)
    }
}
