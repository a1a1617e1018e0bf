use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("failed to launch {executable}")]
    Spawn {
        executable: String,
        #[source]
        source: io::Error,
    },
    #[error("status={status}\n{output}")]
    Failed { status: String, output: String },
}

/// Run `<executable> --slave --vanilla --file=<script>` and wait for it.
///
/// Returns the combined stdout/stderr of a successful run.
pub fn run_r_script(executable: &str, script: &Path) -> Result<String, DispatchError> {
    let file_arg = format!("--file={}", script.display());
    log::debug!("Running {executable} --slave --vanilla {file_arg}");

    let output = Command::new(executable)
        .arg("--slave")
        .arg("--vanilla")
        .arg(&file_arg)
        .output()
        .map_err(|source| DispatchError::Spawn {
            executable: executable.to_string(),
            source,
        })?;

    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    let text = text.trim_end().to_string();

    if output.status.success() {
        Ok(text)
    } else {
        Err(DispatchError::Failed {
            status: describe(output.status),
            output: text,
        })
    }
}

fn describe(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => code.to_string(),
        None => status.to_string(),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn zero_exit_is_success() {
        assert!(run_r_script("true", Path::new("job.R")).is_ok());
    }

    #[test]
    fn nonzero_exit_reports_status() {
        let err = run_r_script("false", Path::new("job.R")).unwrap_err();
        match &err {
            DispatchError::Failed { status, .. } => assert_eq!(status, "1"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().starts_with("status=1"));
    }

    #[test]
    fn output_of_failed_run_is_captured() {
        // sh rejects R's flags with a usage message on stderr and status 2.
        let err = run_r_script("sh", Path::new("/out/job.R")).unwrap_err();
        let DispatchError::Failed { status, output } = err else {
            panic!("expected a failed run");
        };
        assert_eq!(status, "2");
        assert!(!output.is_empty());
    }

    #[test]
    fn missing_executable_is_a_spawn_error() {
        let err = run_r_script("/nonexistent/bin/R", Path::new("job.R")).unwrap_err();
        assert!(matches!(err, DispatchError::Spawn { .. }));
    }
}
