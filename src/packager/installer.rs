use crate::packager::config::PackagerConfig;
use crate::packager::PackagerError;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Installs the function's dependencies into the staging directory.
pub trait Installer {
    fn install(&self, wd: &Path, config: &PackagerConfig) -> Result<(), PackagerError>;
}

/// Runs `<program> install --upgrade -t <staging> -r <requirements>` in the working directory.
#[derive(Clone, Debug)]
pub struct PipInstaller {
    pub program: String,
}

impl PipInstaller {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }

    fn command(&self, wd: &Path, config: &PackagerConfig) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg("install")
            .arg("--upgrade")
            .arg("-t")
            .arg(&config.staging_dir)
            .arg("-r")
            .arg(&config.requirements_file)
            .current_dir(wd);
        command
    }
}

impl Installer for PipInstaller {
    fn install(&self, wd: &Path, config: &PackagerConfig) -> Result<(), PackagerError> {
        let mut command = self.command(wd, config);
        debug!("running {:?}", command);
        let output = command.output().map_err(|error| {
            PackagerError::Install(format!("cannot run '{}': {}", self.program, error))
        })?;
        if !output.status.success() {
            return Err(PackagerError::Install(
                String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_arguments() {
        let installer = PipInstaller::new("pip3");
        let command = installer.command(Path::new("/work/fn"), &PackagerConfig::default());
        assert_eq!(command.get_program(), "pip3");
        let args: Vec<_> = command.get_args().map(|arg| arg.to_string_lossy().into_owned()).collect();
        assert_eq!(args, vec!["install", "--upgrade", "-t", ".dist", "-r", "requirements.txt"]);
        assert_eq!(command.get_current_dir(), Some(Path::new("/work/fn")));
    }

    #[test]
    fn missing_program_is_install_error() {
        let directory = tempfile::tempdir().unwrap();
        let installer = PipInstaller::new("slimsheet-no-such-installer");
        let result = installer.install(directory.path(), &PackagerConfig::default());
        assert!(matches!(result, Err(PackagerError::Install(_))));
    }

    #[cfg(unix)]
    #[test]
    fn failing_program_reports_stderr() {
        let directory = tempfile::tempdir().unwrap();
        let installer = PipInstaller::new("false");
        let result = installer.install(directory.path(), &PackagerConfig::default());
        assert!(matches!(result, Err(PackagerError::Install(_))));
    }
}
