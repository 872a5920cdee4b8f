//! Splitting a raw command line into arguments.

use anyhow::{Result, bail};

/// Characters that separate arguments on a command line.
const DELIMITERS: [char; 4] = [' ', '\r', '\t', '\n'];

/// Split a line into its arguments.
///
/// Each argument is a maximal run of non-delimiter characters, returned
/// in left-to-right order. Runs of delimiters are discarded and never
/// produce empty tokens. The returned strings own their data, so the
/// arguments outlive the input line.
///
/// A line with no arguments at all (empty, or delimiters only) is an
/// error: such a line cannot be dispatched, and the shell loop treats it
/// as fatal.
pub fn split_line(line: &str) -> Result<Vec<String>> {
    let args: Vec<String> = line
        .split(|c| DELIMITERS.contains(&c))
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect();

    if args.is_empty() {
        bail!("empty command line");
    }
    Ok(args)
}
