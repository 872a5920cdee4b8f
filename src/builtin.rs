//! Built-in commands handled by the shell itself, without spawning a
//! child process.

use anyhow::Result;
use argh::{EarlyExit, FromArgs};
use std::io::Write;

/// What the shell loop should do after a command has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopAction {
    /// Keep prompting for the next command.
    Continue,
    /// Stop the loop and let the process exit successfully.
    Exit,
}

/// Outcome of offering an argument list to the dispatcher.
///
/// Deliberately three-way: "handled, keep looping" and "handled, stop
/// looping" are both distinct from "not a built-in, try an external
/// program".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The command was a built-in and has already run.
    Handled(LoopAction),
    /// The command name is not a built-in.
    NotBuiltin,
}

/// The fixed built-in set, keyed by exact command name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Exit,
    Help,
    Cd,
}

impl Builtin {
    /// Map a command name to its built-in. Case-sensitive; `None` means
    /// the name should be tried as an external program.
    pub fn lookup(name: &str) -> Option<Builtin> {
        match name {
            "exit" => Some(Builtin::Exit),
            "help" => Some(Builtin::Help),
            "cd" => Some(Builtin::Cd),
            _ => None,
        }
    }
}

/// Built-in commands known to the shell at compile time.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and executed
/// directly in-process. Recoverable failures (a bad `cd` target, say) are
/// reported to `stderr` here and never propagate; an `Err` from `execute`
/// means the shell's own output streams are broken.
trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "cd".
    fn name() -> &'static str;

    /// Executes the command using the provided output streams.
    fn execute(self, stdout: &mut dyn Write, stderr: &mut dyn Write) -> Result<LoopAction>;
}

/// Run the built-in named by `args[0]`, if there is one.
///
/// `args` holds the command name followed by its arguments, as produced
/// by the lexer.
pub fn dispatch(
    args: &[String],
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> Result<Dispatch> {
    let Some(builtin) = args.first().and_then(|name| Builtin::lookup(name)) else {
        return Ok(Dispatch::NotBuiltin);
    };
    let action = match builtin {
        Builtin::Exit => run::<Exit>(args, stdout, stderr)?,
        Builtin::Help => run::<Help>(args, stdout, stderr)?,
        Builtin::Cd => run::<Cd>(args, stdout, stderr)?,
    };
    Ok(Dispatch::Handled(action))
}

/// Parse `args[1..]` into `T` and execute it.
///
/// When [`argh`] refuses the arguments (or was asked for `--help`), its
/// message is printed and the loop continues; a malformed built-in
/// invocation is never fatal.
fn run<'a, T: BuiltinCommand>(
    args: &[String],
    stdout: &'a mut dyn Write,
    stderr: &'a mut dyn Write,
) -> Result<LoopAction> {
    let rest: Vec<&str> = args.iter().skip(1).map(String::as_str).collect();
    match T::from_args(&[T::name()], &rest) {
        Ok(cmd) => cmd.execute(stdout, stderr),
        Err(EarlyExit { output, status }) => {
            let sink = if status.is_err() { stderr } else { stdout };
            writeln!(sink, "{}", output.trim_end())?;
            Ok(LoopAction::Continue)
        }
    }
}

#[derive(FromArgs)]
/// Leave the shell.
pub struct Exit {
    #[argh(positional, greedy)]
    /// trailing arguments are accepted and ignored.
    pub _args: Vec<String>,
}

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn execute(self, _stdout: &mut dyn Write, _stderr: &mut dyn Write) -> Result<LoopAction> {
        Ok(LoopAction::Exit)
    }
}

#[derive(FromArgs)]
/// Print the list of built-in commands.
pub struct Help {
    #[argh(positional, greedy)]
    /// trailing arguments are accepted and ignored.
    pub _args: Vec<String>,
}

impl BuiltinCommand for Help {
    fn name() -> &'static str {
        "help"
    }

    fn execute(self, stdout: &mut dyn Write, _stderr: &mut dyn Write) -> Result<LoopAction> {
        writeln!(stdout, "minish - a small interactive shell.")?;
        writeln!(stdout, "type a command at the prompt and press enter.")?;
        writeln!(stdout, "built-in commands:")?;
        writeln!(stdout, "\texit - leave the shell.")?;
        writeln!(stdout, "\tcd   - change the current directory.")?;
        writeln!(stdout, "\thelp - print this page.")?;
        Ok(LoopAction::Continue)
    }
}

#[derive(FromArgs)]
/// Change the current working directory.
pub struct Cd {
    #[argh(positional, greedy)]
    /// directory to switch to; absolute or relative to the current
    /// directory. Arguments beyond the first are ignored.
    pub args: Vec<String>,
}

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn execute(self, _stdout: &mut dyn Write, stderr: &mut dyn Write) -> Result<LoopAction> {
        let Some(target) = self.args.into_iter().next() else {
            writeln!(stderr, "cd: missing directory argument")?;
            return Ok(LoopAction::Continue);
        };
        // The working directory is process-level state; children inherit
        // it on the next launch.
        if let Err(e) = std::env::set_current_dir(&target) {
            writeln!(stderr, "cd: {}: {}", target, e)?;
        }
        Ok(LoopAction::Continue)
    }
}
