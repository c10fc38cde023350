//! # Lambda Packager
//!
//! Installs a Python function's dependencies into a staging directory, removes the
//! files matched by the exclusion patterns, and emits what is left either as files
//! copied into the function directory or as a single deflated archive that starts
//! with a bootstrap loader. A `files` run records its top-level entries in a manifest
//! so the next run can revert it.

pub mod bootstrap;
pub mod config;
pub mod files;
pub mod installer;
pub mod patterns;

use crate::helpers::zip::ZipWriterHelper;
use crate::packager::bootstrap::bootstrap_script;
use crate::packager::config::PackagerConfig;
use crate::packager::files::copy_file;
use crate::packager::files::list_files;
use crate::packager::files::remove_path;
use crate::packager::files::top_level_entries;
use crate::packager::installer::Installer;
use crate::packager::patterns::ExclusionPatterns;
use std::fmt::Display;
use std::fs;
use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;
use zip::ZipWriter;

/// Custom error types for packaging operations.
#[derive(Error, Debug)]
pub enum PackagerError {
    /// The installer could not be run or exited unsuccessfully
    #[error("Failed to install the pip requirements: {0}")]
    Install(String),

    /// An exclusion pattern is not a valid expression
    #[error("There was a problem processing the pattern ({0}) provided")]
    InvalidPattern(String),

    /// The working directory does not exist or is not a directory
    #[error("Working directory '{0}' is not a directory")]
    NotADirectory(PathBuf),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Walk(#[from] walkdir::Error),

    #[error("{0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Shape of the packaged output.
#[derive(Copy, Clone, Debug, Default, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Copy the kept files into the function directory
    Files,
    /// Write a single archive with a bootstrap loader
    #[default]
    Zip,
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Files => f.write_str("files"),
            OutputFormat::Zip => f.write_str("zip"),
        }
    }
}

/// Outcome of a packaging run.
#[derive(Clone, Debug, PartialEq)]
pub struct PackageSummary {
    /// Files produced by the installer
    pub installed: usize,
    /// Files left after slimming down
    pub kept: usize,
    /// Archive path for `zip` runs, manifest path for `files` runs
    pub output: PathBuf,
}

/// Packages one function directory with the given configuration and installer.
pub struct Packager<I: Installer> {
    config: PackagerConfig,
    installer: I,
}

impl<I: Installer> Packager<I> {
    pub fn new(config: PackagerConfig, installer: I) -> Self {
        Self { config, installer }
    }

    /// Reverts the previous run, then installs, slims down and finalizes.
    pub fn run(&self, wd: &Path, format: OutputFormat) -> Result<PackageSummary, PackagerError> {
        if !wd.is_dir() {
            return Err(PackagerError::NotADirectory(wd.to_owned()));
        }
        info!("starting lambda package for ({}) as ({}) format", wd.display(), format);
        self.clean_up_previous_run(wd)?;
        let installed = self.install(wd)?;
        let kept = self.slim_down(wd, &installed)?;
        let output = match format {
            OutputFormat::Files => self.finalize_as_files(wd, &kept)?,
            OutputFormat::Zip => self.finalize_as_zip(wd, &kept)?,
        };
        Ok(PackageSummary {
            installed: installed.len(),
            kept: kept.len(),
            output,
        })
    }

    /// Removes every entry recorded by a previous `files` run, and the manifest itself.
    /// Returns the number of removed entries.
    pub fn clean_up_previous_run(&self, wd: &Path) -> Result<usize, PackagerError> {
        let manifest = self.config.manifest_path(wd);
        let mut entries: Vec<String> = if manifest.exists() {
            fs::read_to_string(&manifest)?
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_owned)
                .collect()
        } else {
            Vec::new()
        };
        if !entries.is_empty() {
            entries.push(self.config.manifest_file.to_owned());
        }
        info!(
            "cleaning up old package runs in ({}): {} files/dirs to be removed",
            wd.display(),
            entries.len()
        );
        let mut removed = 0;
        for entry in entries {
            if remove_path(wd, &wd.join(entry))? {
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Installs into a fresh staging directory and lists the installed files.
    pub fn install(&self, wd: &Path) -> Result<Vec<String>, PackagerError> {
        let staging = self.config.staging_path(wd);
        self.clean_up_staging(wd)?;
        info!("starting pip requirements installation in ({})", staging.display());
        self.installer.install(wd, &self.config)?;
        if !staging.is_dir() {
            return Ok(Vec::new());
        }
        Ok(list_files(&staging)?)
    }

    /// Deletes the staged files matched by the exclusion patterns and lists what remains.
    pub fn slim_down(&self, wd: &Path, files: &[String]) -> Result<Vec<String>, PackagerError> {
        info!("starting packages slim down for {} files ...", files.len());
        let staging = self.config.staging_path(wd);
        let patterns = ExclusionPatterns::load(&self.config.exclusions_path(wd))?;
        let excluded = patterns.select(files);
        info!("bad files {} files ...", excluded.len());
        for file in excluded {
            remove_path(wd, &staging.join(file))?;
        }
        if !staging.is_dir() {
            return Ok(Vec::new());
        }
        Ok(list_files(&staging)?)
    }

    /// Records the top-level entries of the kept files in the manifest, copies the
    /// kept files into the working directory and removes the staging directory.
    pub fn finalize_as_files(&self, wd: &Path, files: &[String]) -> Result<PathBuf, PackagerError> {
        let staging = self.config.staging_path(wd);
        info!(
            "starting package finalization as files in ({}) for: {} files",
            staging.display(),
            files.len()
        );
        let manifest = self.config.manifest_path(wd);
        let mut writer = BufWriter::new(File::create(&manifest)?);
        for entry in top_level_entries(files) {
            info!("- ::{}", entry);
            writeln!(writer, "{}", entry)?;
        }
        writer.flush()?;
        for file in files {
            copy_file(&staging.join(file), &wd.join(file))?;
        }
        self.clean_up_staging(wd)?;
        Ok(manifest)
    }

    /// Writes the archive (bootstrap loader first, then every kept file) and removes
    /// the staging directory.
    pub fn finalize_as_zip(&self, wd: &Path, files: &[String]) -> Result<PathBuf, PackagerError> {
        let staging = self.config.staging_path(wd);
        info!(
            "starting package finalization as zip in ({}) for: {} files",
            staging.display(),
            files.len()
        );
        let archive = self.config.archive_path(wd);
        let mut writer = ZipWriter::new(File::create(&archive)?);
        writer.write_text(
            &self.config.bootstrap_file,
            &bootstrap_script(&self.config.archive_file),
        )?;
        for file in files {
            let path = staging.join(file);
            if path.exists() {
                writer.write_path(file, &path)?;
            }
        }
        writer.finish()?;
        self.clean_up_staging(wd)?;
        Ok(archive)
    }

    fn clean_up_staging(&self, wd: &Path) -> Result<(), PackagerError> {
        let staging = self.config.staging_path(wd);
        if staging.exists() {
            info!("deleting build path ({}) ...", staging.display());
            remove_path(wd, &staging)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    /// Writes a fixed set of files into the staging directory instead of running pip.
    struct FakeInstaller {
        files: Vec<&'static str>,
    }

    impl Installer for FakeInstaller {
        fn install(&self, wd: &Path, config: &PackagerConfig) -> Result<(), PackagerError> {
            let staging = config.staging_path(wd);
            for file in &self.files {
                let path = staging.join(file);
                fs::create_dir_all(path.parent().unwrap())?;
                fs::write(path, file)?;
            }
            Ok(())
        }
    }

    struct FailingInstaller;

    impl Installer for FailingInstaller {
        fn install(&self, _wd: &Path, _config: &PackagerConfig) -> Result<(), PackagerError> {
            Err(PackagerError::Install("No matching distribution found".to_owned()))
        }
    }

    fn packager() -> Packager<FakeInstaller> {
        Packager::new(
            PackagerConfig::default(),
            FakeInstaller {
                files: vec![
                    "six.py",
                    "requests/__init__.py",
                    "requests/tests/test_api.py",
                    "boto3/session.py",
                    "boto3-1.20.0.dist-info/RECORD",
                ],
            },
        )
    }

    fn function_dir() -> tempfile::TempDir {
        let directory = tempfile::tempdir().unwrap();
        fs::write(directory.path().join("requirements.txt"), "requests\nboto3\nsix\n").unwrap();
        fs::write(directory.path().join("anti-requirements.txt"), "boto3/*\n*/tests/*\n").unwrap();
        fs::write(directory.path().join("handler.py"), "def handle(event, context): pass\n").unwrap();
        directory
    }

    #[test]
    fn package_as_zip() {
        let directory = function_dir();
        let wd = directory.path();
        let summary = packager().run(wd, OutputFormat::Zip).unwrap();

        assert_eq!(summary.installed, 5);
        assert_eq!(summary.kept, 2);
        assert_eq!(summary.output, wd.join("requirements.zip"));
        assert!(!wd.join(".dist").exists());

        let mut archive = ZipArchive::new(File::open(&summary.output).unwrap()).unwrap();
        let names: Vec<String> = (0..archive.len())
            .map(|index| archive.by_index(index).unwrap().name().to_owned())
            .collect();
        assert_eq!(names, vec!["unzip_custom_requirements.py", "requests/__init__.py", "six.py"]);

        let mut content = String::new();
        archive.by_name("six.py").unwrap().read_to_string(&mut content).unwrap();
        assert_eq!(content, "six.py");
    }

    #[test]
    fn package_as_files_and_revert() {
        let directory = function_dir();
        let wd = directory.path();
        let packager = packager();
        let summary = packager.run(wd, OutputFormat::Files).unwrap();

        assert_eq!(summary.kept, 2);
        assert!(wd.join("six.py").is_file());
        assert!(wd.join("requests/__init__.py").is_file());
        assert!(!wd.join("boto3").exists());
        assert!(!wd.join(".dist").exists());
        assert_eq!(
            fs::read_to_string(wd.join("pip-packaged-files.txt")).unwrap(),
            "requests\nsix.py\n"
        );

        let removed = packager.clean_up_previous_run(wd).unwrap();
        assert_eq!(removed, 3);
        assert!(!wd.join("six.py").exists());
        assert!(!wd.join("requests").exists());
        assert!(!wd.join("pip-packaged-files.txt").exists());
        assert!(wd.join("handler.py").is_file());
    }

    #[test]
    fn second_run_replaces_previous_files() {
        let directory = function_dir();
        let wd = directory.path();
        let packager = packager();
        packager.run(wd, OutputFormat::Files).unwrap();
        let summary = packager.run(wd, OutputFormat::Zip).unwrap();

        assert_eq!(summary.kept, 2);
        assert!(!wd.join("six.py").exists());
        assert!(!wd.join("pip-packaged-files.txt").exists());
        assert!(wd.join("requirements.zip").is_file());
    }

    #[test]
    fn manifest_cannot_escape_working_directory() {
        let outer = tempfile::tempdir().unwrap();
        let wd = outer.path().join("fn");
        fs::create_dir_all(&wd).unwrap();
        fs::write(outer.path().join("precious.txt"), "keep").unwrap();
        fs::write(wd.join("pip-packaged-files.txt"), "../precious.txt\n..\n").unwrap();

        let removed = packager().clean_up_previous_run(&wd).unwrap();
        assert_eq!(removed, 1);
        assert!(outer.path().join("precious.txt").exists());
        assert!(wd.exists());
    }

    #[test]
    fn without_exclusions_everything_is_kept() {
        let directory = function_dir();
        let wd = directory.path();
        fs::remove_file(wd.join("anti-requirements.txt")).unwrap();
        let summary = packager().run(wd, OutputFormat::Zip).unwrap();
        assert_eq!(summary.kept, 5);
    }

    #[test]
    fn install_failure_is_reported() {
        let directory = function_dir();
        let packager = Packager::new(PackagerConfig::default(), FailingInstaller);
        let result = packager.run(directory.path(), OutputFormat::Zip);
        assert!(matches!(result, Err(PackagerError::Install(_))));
    }

    #[test]
    fn missing_working_directory() {
        let directory = tempfile::tempdir().unwrap();
        let result = packager().run(&directory.path().join("missing"), OutputFormat::Files);
        assert!(matches!(result, Err(PackagerError::NotADirectory(_))));
    }

    #[test]
    fn output_format_display() {
        assert_eq!(OutputFormat::default(), OutputFormat::Zip);
        assert_eq!(OutputFormat::Files.to_string(), "files");
    }
}
