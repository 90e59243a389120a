//! Thin wrapper around `tokio::process` for the external tools the kiosk
//! drives (CUPS client, Ghostscript, pdfjam, pdftoppm, curl).

use crate::error::CommandError;
use log::debug;
use std::ffi::OsStr;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Runs `program` with `args` and returns its stdout.
///
/// A non-zero exit status is an error carrying the trimmed stderr.
pub async fn run<I, S>(program: &str, args: I) -> Result<String, CommandError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new(program);
    command.args(args).kill_on_drop(true);
    debug!("running {:?}", command.as_std());

    let output = command.output().await.map_err(|source| CommandError::Spawn {
        program: program.to_string(),
        source,
    })?;

    if !output.status.success() {
        return Err(CommandError::Failed {
            program: program.to_string(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Like [`run`], but feeds `input` to the command's stdin.
pub async fn run_with_input<I, S>(program: &str, args: I, input: &[u8]) -> Result<String, CommandError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let spawn_error = |source: std::io::Error| CommandError::Spawn {
        program: program.to_string(),
        source,
    };

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(spawn_error)?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(input).await.map_err(spawn_error)?;
    }

    let output = child.wait_with_output().await.map_err(spawn_error)?;
    if !output.status.success() {
        return Err(CommandError::Failed {
            program: program.to_string(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_stdout_of_successful_command() {
        let out = run("sh", ["-c", "printf 'cyan: 40%%'"]).await.unwrap();
        assert_eq!(out, "cyan: 40%");
    }

    #[tokio::test]
    async fn non_zero_exit_carries_stderr() {
        let err = run("sh", ["-c", "echo 'lpstat: No destinations' >&2; exit 1"])
            .await
            .unwrap_err();

        match err {
            CommandError::Failed { program, stderr, .. } => {
                assert_eq!(program, "sh");
                assert_eq!(stderr, "lpstat: No destinations");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn feeds_stdin() {
        let out = run_with_input("cat", Vec::<&str>::new(), b"Subject: test\r\n")
            .await
            .unwrap();
        assert_eq!(out, "Subject: test\r\n");
    }

    #[tokio::test]
    async fn missing_program_is_a_spawn_error() {
        let err = run("definitely-not-a-kiosk-tool", ["--version"])
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::Spawn { .. }));
    }
}
