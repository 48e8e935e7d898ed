//! Console command grammar.
//!
//! One command per line. Everything after the command word is a single
//! argument, so keys and paths may contain spaces.
//!
//! - `ls` / `list`            show the catalog
//! - `refresh`                re-fetch the catalog
//! - `select <path>`          choose a local file for upload
//! - `upload [path]`          upload the given or the selected file
//! - `get <key>`              download an object into the download dir
//! - `rm <key>`               delete an object (asks for confirmation)
//! - `preview <key>`          open the preview pane for a key
//! - `close`                  close the preview pane
//! - `url <key>`              print an object's resource URL
//! - `status`                 show notices, selection and preview
//! - `help`, `quit`

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Refresh,
    Select(PathBuf),
    Upload(Option<PathBuf>),
    Get(String),
    Remove(String),
    Preview(String),
    Close,
    Url(String),
    Status,
    Help,
    Quit,
    /// Blank line.
    Nothing,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("`{command}` needs {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },
}

pub const HELP: &str = "\
commands:
  ls                 show the catalog
  refresh            re-fetch the catalog
  select <path>      choose a local file for upload
  upload [path]      upload the given or the selected file
  get <key>          download an object
  rm <key>           delete an object
  preview <key>      open the preview pane
  close              close the preview pane
  url <key>          print an object's resource URL
  status             show notices, selection and preview
  quit               leave";

pub fn parse(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Nothing);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let arg = (!rest.is_empty()).then(|| rest.to_string());

    let required = |command: &'static str, what: &'static str| {
        arg.clone()
            .ok_or(ParseError::MissingArgument { command, what })
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "ls" | "list" => Command::List,
        "refresh" | "r" => Command::Refresh,
        "select" => Command::Select(PathBuf::from(required("select", "a file path")?)),
        "upload" | "up" => Command::Upload(arg.clone().map(PathBuf::from)),
        "get" | "download" => Command::Get(required("get", "an object key")?),
        "rm" | "delete" => Command::Remove(required("rm", "an object key")?),
        "preview" | "view" => Command::Preview(required("preview", "an object key")?),
        "close" => Command::Close,
        "url" => Command::Url(required("url", "an object key")?),
        "status" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(command)
}
