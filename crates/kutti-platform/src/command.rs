use crate::error::{Error, Result};
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command as StdCommand, Output};

use tracing::debug;

#[derive(Debug)]
pub struct Command {
    inner:   StdCommand,
    program: String,
}

impl Command {
    pub fn new(program: impl Into<String>) -> Self {
        let program = program.into();
        Self {
            inner: StdCommand::new(&program),
            program,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.inner.arg(arg);
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.inner.args(args);
        self
    }

    pub fn env<K, V>(mut self, key: K, val: V) -> Self
    where
        K: AsRef<OsStr>,
        V: AsRef<OsStr>,
    {
        self.inner.env(key, val);
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.inner.current_dir(dir);
        self
    }

    /// Command line as it would be typed, for logs and error messages.
    pub fn display(&self) -> String {
        std::iter::once(self.program.clone())
            .chain(
                self.inner
                    .get_args()
                    .map(|a| a.to_string_lossy().into_owned()),
            )
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn output(&mut self) -> Result<Output> {
        self.inner.output().map_err(|e| Error::CommandFailed {
            cmd:    self.program.clone(),
            source: e,
        })
    }

    /// Run to completion and return stdout followed by stderr.
    ///
    /// A non-zero exit is an [`Error::ExitStatus`] that still carries the
    /// captured output.
    pub fn combined_output(mut self) -> Result<String> {
        let cmd = self.display();
        debug!(%cmd, "executing command");

        let output = self.output()?;
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        debug!(%cmd, status = %output.status, output = %combined, "command finished");

        if output.status.success() {
            Ok(combined)
        } else {
            Err(Error::ExitStatus {
                cmd,
                code: output.status.code(),
                output: combined,
            })
        }
    }
}

/// Run `program` with `args` and return its combined stdout and stderr.
pub fn run_with_results<I, S>(program: &str, args: I) -> Result<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    Command::new(program).args(args).combined_output()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_display() {
        let cmd = Command::new("echo").arg("hello").args(["big", "world"]);
        assert_eq!(cmd.display(), "echo hello big world");
    }

    #[test]
    fn test_command_env() {
        let cmd = Command::new("echo").env("KEY", "value");
        assert_eq!(cmd.inner.get_envs().count(), 1);
    }

    #[test]
    fn test_missing_program() {
        let err = run_with_results("nonexistent_binary_12345", ["x"]).unwrap_err();
        assert!(matches!(err, Error::CommandFailed { ref cmd, .. } if cmd == "nonexistent_binary_12345"));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_with_results_combines_streams() {
        let out = run_with_results("sh", ["-c", "echo out; echo err 1>&2"]).unwrap();
        assert_eq!(out, "out\nerr\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_run_with_results_nonzero_exit() {
        let err = run_with_results("sh", ["-c", "echo failing; exit 3"]).unwrap_err();
        match err {
            Error::ExitStatus { code, output, .. } => {
                assert_eq!(code, Some(3));
                assert_eq!(output, "failing\n");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
