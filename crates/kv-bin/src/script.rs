//! Key script parsing.
//!
//! One directive per line, blank lines and `#` comments ignored:
//!
//! ```text
//! down KEY | up KEY | tap KEY     single transitions (tap = down + up)
//! type TEXT                       tap each character, wrapping shifted ones in lshift
//! hold MODS | release MODS        change physical modifiers, `lctrl+lshift`
//! layer N [N ...]                 report the active layer set
//! ```

use core_events::{Event, KeyCode, KeyEvent, KeyModifiers, LayerMask, ParseKeyError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("line {line}: unknown directive `{word}`")]
    UnknownDirective { line: usize, word: String },
    #[error("line {line}: `{directive}` needs an argument")]
    MissingArgument { line: usize, directive: String },
    #[error("line {line}: {source}")]
    Key { line: usize, source: ParseKeyError },
    #[error("line {line}: `{key}` is not a modifier")]
    NotAModifier { line: usize, key: KeyCode },
    #[error("line {line}: no key types {ch:?}")]
    Untypeable { line: usize, ch: char },
    #[error("line {line}: invalid layer `{value}`")]
    Layer { line: usize, value: String },
}

/// Parse a whole script into the event sequence it describes.
pub fn parse(text: &str) -> Result<Vec<Event>, ScriptError> {
    let mut events = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        events.extend(parse_line(raw, idx + 1)?);
    }
    Ok(events)
}

/// Parse one line (`line` is 1-based, used for error reporting).
pub fn parse_line(raw: &str, line: usize) -> Result<Vec<Event>, ScriptError> {
    let text = raw.trim();
    if text.is_empty() || text.starts_with('#') {
        return Ok(Vec::new());
    }
    let (directive, rest) = match text.split_once(char::is_whitespace) {
        Some((d, r)) => (d, r.trim()),
        None => (text, ""),
    };
    let missing = || ScriptError::MissingArgument {
        line,
        directive: directive.to_string(),
    };
    if rest.is_empty() {
        return Err(missing());
    }

    match directive {
        "down" => Ok(vec![Event::Key(KeyEvent::down(key(rest, line)?))]),
        "up" => Ok(vec![Event::Key(KeyEvent::up(key(rest, line)?))]),
        "tap" => {
            let code = key(rest, line)?;
            Ok(vec![
                Event::Key(KeyEvent::down(code)),
                Event::Key(KeyEvent::up(code)),
            ])
        }
        // `type` keeps inner whitespace; only the separator after the
        // directive is dropped.
        "type" => type_text(text[directive.len()..].trim_start(), line),
        "hold" | "release" => Ok(vec![Event::Modifiers {
            mods: modifiers(rest, line)?,
            held: directive == "hold",
        }]),
        "layer" => {
            let mut mask = LayerMask::default();
            for value in rest.split_whitespace() {
                let layer = value
                    .parse::<u8>()
                    .ok()
                    .filter(|l| *l < LayerMask::MAX_LAYERS)
                    .ok_or_else(|| ScriptError::Layer {
                        line,
                        value: value.to_string(),
                    })?;
                mask = mask.with(layer);
            }
            Ok(vec![Event::Layer(mask)])
        }
        word => Err(ScriptError::UnknownDirective {
            line,
            word: word.to_string(),
        }),
    }
}

fn key(name: &str, line: usize) -> Result<KeyCode, ScriptError> {
    name.parse()
        .map_err(|source| ScriptError::Key { line, source })
}

fn modifiers(spec: &str, line: usize) -> Result<KeyModifiers, ScriptError> {
    let mut mods = KeyModifiers::empty();
    for name in spec.split('+') {
        let code = key(name, line)?;
        mods |= code
            .modifier_bit()
            .ok_or(ScriptError::NotAModifier { line, key: code })?;
    }
    Ok(mods)
}

fn type_text(text: &str, line: usize) -> Result<Vec<Event>, ScriptError> {
    let mut events = Vec::with_capacity(text.len() * 2);
    for ch in text.chars() {
        let (code, shifted) = KeyCode::for_char(ch).ok_or(ScriptError::Untypeable { line, ch })?;
        if shifted {
            events.push(Event::Key(KeyEvent::down(KeyCode::LSHIFT)));
        }
        events.push(Event::Key(KeyEvent::down(code)));
        events.push(Event::Key(KeyEvent::up(code)));
        if shifted {
            events.push(Event::Key(KeyEvent::up(KeyCode::LSHIFT)));
        }
    }
    Ok(events)
}
