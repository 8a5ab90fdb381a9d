//! Failure kinds for the `flowfield` binary and the status each exits with.
//!
//! Clap rejects bad flags with status 2 before `run` starts. Past that point
//! a bad surface or cell size exits 10, file trouble 11, rejected user input
//! (dials, noise name, hex color, seed file) 12, and a failure to print JSON
//! output 13.

use flowfield_core::EngineError;
use std::fmt;

#[derive(Debug)]
pub enum CliError {
    /// The simulation refused to build, e.g. a zero cell size.
    Engine(EngineError),
    /// Reading a seed file or writing the PNG or seed file failed.
    Io(String),
    /// Something the user typed or supplied could not be used.
    Input(String),
    /// `--json` output could not be produced.
    Serialization(String),
}

impl CliError {
    /// Status passed to `process::exit`.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Engine(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Engine(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<EngineError> for CliError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::Io(msg) => CliError::Io(msg),
            e @ (EngineError::UnknownNoise(_)
            | EngineError::InvalidColor(_)
            | EngineError::InvalidParams(_)) => CliError::Input(e.to_string()),
            other => CliError::Engine(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
