use argh::FromArgs;
use minish::{EofPolicy, Shell};

#[derive(FromArgs)]
/// A small interactive shell: type a command at the prompt and press
/// enter. Built-ins: exit, cd, help.
struct Options {
    /// treat end of input as a normal exit instead of an error
    #[argh(switch)]
    eof_exits: bool,
}

impl Options {
    fn eof_policy(&self) -> EofPolicy {
        if self.eof_exits {
            EofPolicy::Exit
        } else {
            EofPolicy::Fatal
        }
    }
}

fn main() {
    let options: Options = argh::from_env();
    let mut shell = Shell::new(options.eof_policy());
    if let Err(e) = shell.run() {
        eprintln!("minish: {e:#}");
        std::process::exit(1);
    }
}
