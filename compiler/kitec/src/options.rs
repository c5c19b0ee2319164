//! Hand-rolled argument parsing.

use std::path::{Path, PathBuf};

/// Settings shared by the commands that execute scripts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// `--max-depth N`: overrides the call depth limit.
    pub max_depth: Option<usize>,
    /// `--safe`: exposes safe mode to natives.
    pub safe: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Run(PathBuf),
    /// Parse only and report errors.
    Check(PathBuf),
    /// Dump the token stream.
    Tokens(PathBuf),
    Help,
    Version,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CliError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("missing file path for '{0}'")]
    MissingPath(&'static str),
    #[error("'{option}' expects a number, got '{value}'")]
    InvalidNumber { option: &'static str, value: String },
    #[error("missing value for '{0}'")]
    MissingValue(&'static str),
    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),
}

/// Parse the arguments after the program name.
///
/// Options may appear anywhere after the command. A first argument that is
/// neither a command nor an option is taken as a script to run.
pub fn parse_args(args: &[String]) -> Result<(Command, RunOptions), CliError> {
    let mut options = RunOptions::default();
    let Some((first, rest)) = args.split_first() else {
        return Ok((Command::Help, options));
    };

    let (name, rest): (&'static str, &[String]) = match first.as_str() {
        "run" => ("run", rest),
        "check" => ("check", rest),
        "tokens" => ("tokens", rest),
        "help" | "--help" | "-h" => return Ok((Command::Help, options)),
        "version" | "--version" | "-V" => return Ok((Command::Version, options)),
        other if other.starts_with('-') || looks_like_script(other) => ("run", args),
        other => return Err(CliError::UnknownCommand(other.to_owned())),
    };

    let mut path = None;
    let mut iter = rest.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--safe" => options.safe = true,
            "--max-depth" => {
                let value = iter.next().ok_or(CliError::MissingValue("--max-depth"))?;
                options.max_depth = Some(parse_depth(value)?);
            }
            other => {
                if let Some(value) = other.strip_prefix("--max-depth=") {
                    options.max_depth = Some(parse_depth(value)?);
                } else if other.starts_with('-') && other != "-" {
                    return Err(CliError::UnknownOption(other.to_owned()));
                } else if path.is_none() {
                    path = Some(PathBuf::from(other));
                } else {
                    return Err(CliError::UnexpectedArgument(other.to_owned()));
                }
            }
        }
    }

    let path = path.ok_or(CliError::MissingPath(name))?;
    let command = match name {
        "check" => Command::Check(path),
        "tokens" => Command::Tokens(path),
        _ => Command::Run(path),
    };
    Ok((command, options))
}

fn parse_depth(value: &str) -> Result<usize, CliError> {
    value.parse().map_err(|_| CliError::InvalidNumber {
        option: "--max-depth",
        value: value.to_owned(),
    })
}

fn looks_like_script(arg: &str) -> bool {
    let path = Path::new(arg);
    path.extension().is_some() || path.components().count() > 1
}
