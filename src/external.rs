//! Launching commands that are not built-ins as child processes.

use anyhow::{Context, Result};
use std::io::{ErrorKind, Write};
use std::process::{Command, ExitStatus};

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
pub type ExitCode = i32;

/// Run `args[0]` as a child process with `args[1..]` as its argument
/// vector and block until it has truly terminated.
///
/// The executable is resolved through the platform's standard search
/// mechanism; argument 0 is the program name as typed. `Child::wait`
/// only returns once the child has exited or been killed by a signal, so
/// a stopped child does not wake the shell.
///
/// Launch failures are recoverable: a diagnostic naming the command goes
/// to `stderr` and the shell keeps looping. The returned exit code is
/// informational only.
pub fn launch(args: &[String], stderr: &mut dyn Write) -> Result<ExitCode> {
    let (program, rest) = args.split_first().context("empty argument list")?;

    let mut child = match Command::new(program).args(rest).spawn() {
        Ok(child) => child,
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::PermissionDenied) => {
            // The Rust analogue of a failed exec in the child.
            writeln!(stderr, "minish: {}: {}", program, e)?;
            return Ok(127);
        }
        Err(e) => {
            // Process creation itself failed, e.g. resource exhaustion.
            writeln!(stderr, "minish: cannot create process: {}", e)?;
            return Ok(126);
        }
    };

    let status = child
        .wait()
        .with_context(|| format!("waiting for {}", program))?;
    Ok(exit_code(status))
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> ExitCode {
    use std::os::unix::process::ExitStatusExt;
    match status.code() {
        Some(code) => code,
        None => match ExitStatusExt::signal(&status) {
            Some(signal) => 128 + signal,
            None => -1,
        },
    }
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> ExitCode {
    status.code().unwrap_or(-1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    #[cfg(unix)]
    fn test_launch_waits_for_successful_child() {
        let mut err = Vec::new();
        let code = launch(&args(&["sh", "-c", "exit 0"]), &mut err).unwrap();
        assert_eq!(code, 0);
        assert!(err.is_empty());
    }

    #[test]
    #[cfg(unix)]
    fn test_launch_captures_nonzero_exit_code() {
        let mut err = Vec::new();
        let code = launch(&args(&["sh", "-c", "exit 3"]), &mut err).unwrap();
        assert_eq!(code, 3);
    }

    #[test]
    #[cfg(unix)]
    fn test_launch_passes_argument_vector() {
        // `sh -c 'exit $1' sh 7` exits with its first positional argument.
        let mut err = Vec::new();
        let code = launch(&args(&["sh", "-c", "exit $1", "sh", "7"]), &mut err).unwrap();
        assert_eq!(code, 7);
    }

    #[test]
    fn test_launch_unknown_command_reports_name_and_continues() {
        let name = format!("no_such_program_minish_{}", std::process::id());
        let mut err = Vec::new();
        let code = launch(&args(&[&name]), &mut err).unwrap();
        assert_eq!(code, 127);

        let diag = String::from_utf8(err).unwrap();
        assert!(diag.contains(&name));
    }

    #[test]
    #[cfg(unix)]
    fn test_launch_maps_signal_termination() {
        let mut err = Vec::new();
        let code = launch(&args(&["sh", "-c", "kill -TERM $$"]), &mut err).unwrap();
        assert_eq!(code, 128 + 15);
    }

    #[test]
    fn test_launch_rejects_empty_argument_list() {
        let mut err = Vec::new();
        assert!(launch(&[], &mut err).is_err());
    }
}
