//! Line-oriented console input for the headless toolkit.
//!
//! One command per line:
//!
//! | Line | Input |
//! |------|-------|
//! | `type <target> [text...]` | replace the widget's value |
//! | `submit <target>` | fire `<Return>` |
//! | `fire <target> <event>` | fire any bound event |
//! | `activate <target>` | press a button, release a slider |
//! | `close [@window]` | close a window (the root by default) |
//! | `tree` | log the window tree |
//!
//! Targets are widget tags or native handles written `@n`. Blank lines and
//! lines starting with `#` are ignored.

use std::io;

use anyhow::{Context, bail};
use vellum_ui::{Input, NativeHandle, Target};

pub const USAGE: &str = "commands: type, submit, fire, activate, close, tree";

/// Turn stdin lines into toolkit input. Malformed lines are logged and
/// skipped; a read error ends the stream.
pub fn inputs(lines: impl Iterator<Item = io::Result<String>> + 'static) -> impl Iterator<Item = Input> + 'static {
    lines
        .map_while(|line| match line {
            Ok(line) => Some(line),
            Err(e) => {
                log::error!("stdin: {e}");
                None
            }
        })
        .filter_map(|line| match parse(&line) {
            Ok(input) => input,
            Err(e) => {
                log::warn!("{e:#}; {USAGE}");
                None
            }
        })
}

pub fn parse(line: &str) -> anyhow::Result<Option<Input>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim_start();

    let input = match verb {
        "type" => {
            let (target, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            Input::Type { target: target_of(target)?, text: text.to_string() }
        }
        "submit" => Input::Fire { target: target_of(rest)?, event: "<Return>".to_string() },
        "fire" => {
            let mut words = rest.split_whitespace();
            let (Some(target), Some(event), None) = (words.next(), words.next(), words.next()) else {
                bail!("usage: fire <target> <event>");
            };
            Input::Fire { target: target_of(target)?, event: event.to_string() }
        }
        "activate" | "press" => Input::Activate { target: target_of(rest)? },
        "close" => Input::Close { window: if rest.is_empty() { None } else { Some(handle_of(rest)?) } },
        "tree" => Input::Dump,
        other => bail!("unknown command `{other}`"),
    };
    Ok(Some(input))
}

fn target_of(token: &str) -> anyhow::Result<Target> {
    let token = token.trim();
    if token.is_empty() {
        bail!("missing target");
    }
    if token.starts_with('@') {
        return Ok(Target::Handle(handle_of(token)?));
    }
    Ok(Target::Name(token.to_string()))
}

fn handle_of(token: &str) -> anyhow::Result<NativeHandle> {
    let digits = token.trim().trim_start_matches('@');
    let id = digits.parse::<u64>().with_context(|| format!("`{token}` is not a handle"))?;
    Ok(NativeHandle(id))
}
