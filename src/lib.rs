//! A small line-oriented command interpreter.
//!
//! The shell reads one line at a time, splits it into a command name and
//! arguments, and either handles the command in-process (`exit`, `help`,
//! `cd`) or spawns the named executable and waits for it to finish before
//! prompting again. One foreground command per line; no pipelines,
//! redirection, globbing or job control.

pub mod builtin;
pub mod external;
pub mod interpreter;
pub mod lexer;

pub use builtin::{Dispatch, LoopAction};
pub use interpreter::{EofPolicy, Shell};
