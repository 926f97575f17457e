//! snip helper process runner
//!
//! One helper process per capture. The process boundary doubles as the
//! cancellation mechanism: a helper that outlives the timeout is killed
//! and reported as its own failure kind.

use capture_gdi::CaptureReport;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

/// Overrides the helper location (defaults to a sibling of the server)
pub const HELPER_ENV: &str = "SNIP_HELPER_EXE";

#[cfg(windows)]
const HELPER_EXE: &str = "snip.exe";
#[cfg(not(windows))]
const HELPER_EXE: &str = "snip";

#[derive(Error, Debug)]
pub enum HelperError {
    #[error("Missing helper executable at: {0}")]
    MissingExe(PathBuf),

    #[error("Failed to spawn helper: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("Helper timed out after {0}ms")]
    Timeout(u64),

    #[error("Helper produced no stdout JSON. Exit={exit:?}. stderr={stderr}")]
    NoOutput { exit: Option<i32>, stderr: String },

    #[error("Failed to parse helper JSON. stdout={stdout} stderr={stderr}")]
    BadJson {
        stdout: String,
        stderr: String,
        #[source]
        source: serde_json::Error,
    },
}

pub struct HelperRunner {
    exe: PathBuf,
}

impl HelperRunner {
    pub fn new(exe: PathBuf) -> Self {
        Self { exe }
    }

    /// Helper executable next to the server binary; `SNIP_HELPER_EXE`
    /// overrides for development and tests.
    pub fn locate() -> std::io::Result<Self> {
        if let Ok(path) = std::env::var(HELPER_ENV) {
            return Ok(Self::new(PathBuf::from(path)));
        }
        let exe = std::env::current_exe()?;
        let dir = exe.parent().unwrap_or_else(|| Path::new("."));
        Ok(Self::new(dir.join(HELPER_EXE)))
    }

    pub fn exe(&self) -> &Path {
        &self.exe
    }

    /// Spawn the helper, enforce the timeout (0 disables it), and parse the
    /// single JSON result line it prints on stdout.
    pub async fn run(&self, args: &[&str], timeout_ms: u64) -> Result<CaptureReport, HelperError> {
        if !self.exe.exists() {
            return Err(HelperError::MissingExe(self.exe.clone()));
        }

        debug!(exe = %self.exe.display(), ?args, timeout_ms, "spawning helper");

        let mut cmd = Command::new(&self.exe);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = cmd.spawn().map_err(HelperError::Spawn)?;

        let output = if timeout_ms > 0 {
            let deadline = Duration::from_millis(timeout_ms);
            match tokio::time::timeout(deadline, child.wait_with_output()).await {
                Ok(result) => result.map_err(HelperError::Spawn)?,
                // Dropping the future kills the child (kill_on_drop)
                Err(_) => return Err(HelperError::Timeout(timeout_ms)),
            }
        } else {
            child.wait_with_output().await.map_err(HelperError::Spawn)?
        };

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if stdout.is_empty() {
            return Err(HelperError::NoOutput { exit: output.status.code(), stderr });
        }

        serde_json::from_str(&stdout)
            .map_err(|source| HelperError::BadJson { stdout, stderr, source })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    fn stub_helper(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
        path
    }

    #[tokio::test]
    async fn parses_the_result_line() {
        let dir = tempfile::tempdir().unwrap();
        let exe = stub_helper(
            dir.path(),
            "ok",
            r#"echo '{"ok":true,"path":"x.png","mode":"full","width":10,"height":20}'"#,
        );

        let report = HelperRunner::new(exe).run(&[], 5_000).await.unwrap();
        assert!(report.ok);
        assert_eq!(report.width, Some(10));
    }

    #[tokio::test]
    async fn empty_stdout_is_its_own_failure() {
        let dir = tempfile::tempdir().unwrap();
        let exe = stub_helper(dir.path(), "silent", "exit 3");

        let err = HelperRunner::new(exe).run(&[], 5_000).await.unwrap_err();
        match err {
            HelperError::NoOutput { exit, .. } => assert_eq!(exit, Some(3)),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn garbage_stdout_is_a_parse_failure() {
        let dir = tempfile::tempdir().unwrap();
        let exe = stub_helper(dir.path(), "garbage", "echo not-json");

        let err = HelperRunner::new(exe).run(&[], 5_000).await.unwrap_err();
        match err {
            HelperError::BadJson { stdout, .. } => assert_eq!(stdout, "not-json"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn hung_helper_times_out() {
        let dir = tempfile::tempdir().unwrap();
        let exe = stub_helper(dir.path(), "hang", "sleep 30");

        let err = HelperRunner::new(exe).run(&[], 100).await.unwrap_err();
        assert!(matches!(err, HelperError::Timeout(100)));
    }

    #[tokio::test]
    async fn missing_executable_is_reported_before_spawning() {
        let err = HelperRunner::new(PathBuf::from("/nonexistent/snip"))
            .run(&[], 1_000)
            .await
            .unwrap_err();
        assert!(matches!(err, HelperError::MissingExe(_)));
    }
}
