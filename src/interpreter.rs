//! The prompt loop: read a line, tokenize, dispatch, repeat.

use crate::builtin::{self, Dispatch, LoopAction};
use crate::external;
use crate::lexer;
use anyhow::{Context, Result, bail};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::Write;

const PROMPT: &str = ">";

/// How the shell treats end-of-input at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EofPolicy {
    /// End of input is an error and the process exits with a failure
    /// code. Default.
    #[default]
    Fatal,
    /// End of input stops the loop like a typed `exit`.
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Running,
    Stopped,
}

/// The interactive shell.
///
/// A single state-carrying value; the only state that outlives an
/// iteration is the running/stopped flag and the process-level working
/// directory mutated by `cd`.
pub struct Shell {
    eof_policy: EofPolicy,
    state: State,
}

impl Shell {
    pub fn new(eof_policy: EofPolicy) -> Self {
        Self {
            eof_policy,
            state: State::Running,
        }
    }

    /// Run the prompt loop until a command requests shutdown.
    ///
    /// Each iteration reads one line, splits it into arguments and
    /// executes exactly one foreground command. An unreadable or empty
    /// command line ends the session with an error; see [`EofPolicy`]
    /// for the end-of-input case.
    pub fn run(&mut self) -> Result<()> {
        let mut editor = DefaultEditor::new().context("cannot open input for reading")?;

        while self.state == State::Running {
            match editor.readline(PROMPT) {
                Ok(line) => {
                    let _ = editor.add_history_entry(line.as_str());
                    let args = lexer::split_line(&line)?;
                    let action = eval(&args, &mut std::io::stdout(), &mut std::io::stderr())?;
                    if action == LoopAction::Exit {
                        self.state = State::Stopped;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl-C discards the partial line; prompt again.
                    continue;
                }
                Err(ReadlineError::Eof) => match self.eof_policy {
                    EofPolicy::Exit => self.state = State::Stopped,
                    EofPolicy::Fatal => bail!("unexpected end of input"),
                },
                Err(e) => return Err(e).context("cannot read command line"),
            }
        }
        Ok(())
    }
}

/// Execute one tokenized command: a built-in if the name matches,
/// otherwise an external program.
///
/// Per-command failures have already been reported to `stderr` by the
/// time this returns; the returned action only says whether to keep
/// prompting.
pub fn eval(
    args: &[String],
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> Result<LoopAction> {
    match builtin::dispatch(args, stdout, stderr)? {
        Dispatch::Handled(action) => Ok(action),
        Dispatch::NotBuiltin => {
            external::launch(args, stderr)?;
            Ok(LoopAction::Continue)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_default_eof_policy_is_fatal() {
        assert_eq!(EofPolicy::default(), EofPolicy::Fatal);
    }

    #[test]
    fn test_eval_exit_stops_the_loop() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let action = eval(&args(&["exit"]), &mut out, &mut err).unwrap();
        assert_eq!(action, LoopAction::Exit);
    }

    #[test]
    fn test_eval_help_continues() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let action = eval(&args(&["help"]), &mut out, &mut err).unwrap();
        assert_eq!(action, LoopAction::Continue);
        assert!(!out.is_empty());
    }

    #[test]
    #[cfg(unix)]
    fn test_eval_runs_external_command_and_continues() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let action = eval(&args(&["sh", "-c", "exit 0"]), &mut out, &mut err).unwrap();
        assert_eq!(action, LoopAction::Continue);
        assert!(err.is_empty());
    }

    #[test]
    fn test_eval_unknown_command_reports_and_continues() {
        let name = format!("no_such_program_minish_{}", std::process::id());
        let mut out = Vec::new();
        let mut err = Vec::new();
        let action = eval(&args(&[&name]), &mut out, &mut err).unwrap();
        assert_eq!(action, LoopAction::Continue);

        let diag = String::from_utf8(err).unwrap();
        assert!(diag.contains(&name));
    }
}
