use crate::environment::Environment;
use crate::interpreter;
use ansi_term::Colour;
use linefeed::{DefaultTerminal, Interface, ReadResult, Terminal};
use std::fmt;
use std::fs::read_to_string;
use std::path::PathBuf;

pub const BANNER: &str = "Lispc version 0.0.1\nPress Ctrl+C to exit\n";

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Usage(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Usage(program) => write!(f, "usage: {} [script]", program),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

pub fn setup() -> std::io::Result<Interface<DefaultTerminal>> {
    let interface = linefeed::Interface::new("lispc")?;
    interface.set_prompt("lispc> ")?;
    if let Some(path) = history_path() {
        interface.load_history(path).ok();
    };
    Ok(interface)
}

fn history_path() -> Option<PathBuf> {
    match dirs::data_dir() {
        Some(mut path) => {
            path.push(".lispc_history");
            Some(path)
        }
        None => None,
    }
}

pub fn save_history<T: Terminal>(interface: &Interface<T>) -> std::io::Result<()> {
    match history_path() {
        Some(path) => interface.save_history(path),
        None => Ok(()),
    }
}

/// Errors go red, but only when a person is watching.
fn colourise(output: std::result::Result<String, String>) -> String {
    let is_error = match &output {
        Ok(text) => text.starts_with("Error: "),
        Err(_) => true,
    };
    let text = match output {
        Ok(text) | Err(text) => text,
    };
    match is_error && atty::is(atty::Stream::Stdout) {
        true => Colour::Red.paint(text).to_string(),
        false => text,
    }
}

pub fn repl<T: Terminal>(
    interface: &Interface<T>,
    mut processor: impl FnMut(&str) -> std::result::Result<String, String>,
) {
    loop {
        match interface.read_line() {
            Ok(ReadResult::Eof) => break,
            Ok(ReadResult::Signal(sig)) => {
                writeln!(interface, "Received signal {:?}", sig).ok();
            }
            Ok(ReadResult::Input(line)) => {
                interface.add_history_unique(line.clone());
                writeln!(interface, "{}", colourise(processor(&line))).ok();
            }
            Err(e) => {
                writeln!(interface, "Error: {}", e).ok();
                break;
            }
        }
    }
}

/// Evaluates each non-blank line of `source` in turn, sharing `env`.
pub fn run_script(source: &str, env: &mut Environment) -> Vec<std::result::Result<String, String>> {
    source
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| interpreter::rep(line, env))
        .collect()
}

pub fn launch(args: Vec<String>, env: &mut Environment) -> Result<(), Error> {
    match args.as_slice() {
        [_] => {
            print!("{}", BANNER);
            let interface = setup()?;
            repl(&interface, |line| interpreter::rep(line, env));
            save_history(&interface)?;
            Ok(())
        }
        [_, path] => {
            log::info!("running script {}", path);
            let source = read_to_string(path)?;
            for output in run_script(&source, env) {
                println!("{}", colourise(output));
            }
            Ok(())
        }
        _ => Err(Error::Usage(
            args.first().cloned().unwrap_or_else(|| String::from("lispc")),
        )),
    }
}
