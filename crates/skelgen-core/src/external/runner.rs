use std::ffi::OsString;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{Result, SkelError};

/// A single external command line, with the directory it runs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub cwd: Option<PathBuf>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Printable command line, for logs.
    pub fn display(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }
}

/// Executes invocations and hands back what they wrote to standard error.
pub trait Runner {
    fn stderr_of(&mut self, invocation: &Invocation) -> std::io::Result<Vec<u8>>;
}

/// Spawns real processes and blocks until they exit.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl Runner for SystemRunner {
    fn stderr_of(&mut self, invocation: &Invocation) -> std::io::Result<Vec<u8>> {
        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &invocation.cwd {
            command.current_dir(dir);
        }
        let output = command.output()?;
        Ok(output.stderr)
    }
}

/// Run an invocation; any standard error output counts as failure.
///
/// On failure the raw standard error goes to `log_file` (appended when
/// `append` is set, truncated otherwise) and `ExternalToolFailed` is returned.
/// A process that cannot be spawned is reported the same way.
pub fn run_logged<R: Runner + ?Sized>(
    runner: &mut R,
    invocation: &Invocation,
    log_file: &Path,
    failure_message: &str,
    append: bool,
) -> Result<()> {
    tracing::debug!(command = %invocation.display(), cwd = ?invocation.cwd, "running");

    let stderr = match runner.stderr_of(invocation) {
        Ok(stderr) => stderr,
        Err(e) => format!("failed to run {}: {e}\n", invocation.display()).into_bytes(),
    };

    if stderr.is_empty() {
        return Ok(());
    }

    write_log(log_file, &stderr, append)?;
    tracing::debug!(
        command = %invocation.display(),
        log = %log_file.display(),
        "command wrote to stderr"
    );

    Err(SkelError::ExternalToolFailed {
        message: failure_message.to_string(),
        log_file: log_file.to_path_buf(),
    })
}

fn write_log(log_file: &Path, content: &[u8], append: bool) -> Result<()> {
    let io_err = |e| SkelError::Io {
        context: format!("writing {}", log_file.display()),
        source: e,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(log_file)
        .map_err(io_err)?;
    file.write_all(content).map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scripted(std::io::Result<Vec<u8>>);

    impl Runner for Scripted {
        fn stderr_of(&mut self, _: &Invocation) -> std::io::Result<Vec<u8>> {
            match &self.0 {
                Ok(bytes) => Ok(bytes.clone()),
                Err(e) => Err(std::io::Error::new(e.kind(), e.to_string())),
            }
        }
    }

    #[test]
    fn silent_command_succeeds_without_log() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("git-error.log");
        let inv = Invocation::new("git").arg("init");
        run_logged(&mut Scripted(Ok(Vec::new())), &inv, &log, "boom", false).unwrap();
        assert!(!log.exists());
    }

    #[test]
    fn stderr_output_is_logged_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("pip-error.log");
        let inv = Invocation::new("pip").arg("install");
        let err = run_logged(
            &mut Scripted(Ok(b"no such file\n".to_vec())),
            &inv,
            &log,
            "An error occurred during the installation of dependencies.",
            false,
        )
        .unwrap_err();

        assert_eq!(std::fs::read_to_string(&log).unwrap(), "no such file\n");
        match err {
            SkelError::ExternalToolFailed { message, log_file } => {
                assert!(message.contains("installation of dependencies"));
                assert_eq!(log_file, log);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn append_mode_keeps_previous_failures() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("bower-error.log");
        let inv = Invocation::new("bower");
        let _ = run_logged(&mut Scripted(Ok(b"first\n".to_vec())), &inv, &log, "x", true);
        let _ = run_logged(&mut Scripted(Ok(b"second\n".to_vec())), &inv, &log, "x", true);
        assert_eq!(std::fs::read_to_string(&log).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn spawn_failure_is_a_step_failure() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("virtualenv-error.log");
        let inv = Invocation::new("/nonexistent/virtualenv");
        let runner = &mut Scripted(Err(std::io::Error::from(std::io::ErrorKind::NotFound)));
        let err = run_logged(runner, &inv, &log, "venv failed", false).unwrap_err();
        assert!(matches!(err, SkelError::ExternalToolFailed { .. }));
        assert!(std::fs::read_to_string(&log)
            .unwrap()
            .contains("/nonexistent/virtualenv"));
    }

    #[test]
    fn display_joins_arguments() {
        let inv = Invocation::new("bower").arg("install").arg("jquery");
        assert_eq!(inv.display(), "bower install jquery");
    }
}
