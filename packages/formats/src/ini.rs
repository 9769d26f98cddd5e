//! INI / properties style documents.
//!
//! One `dotted.key=value` line per entry. `#` and `;` start comment lines,
//! and a `[section]` header prefixes the keys that follow it with
//! `section.`. Rendering never emits sections, so a document written by
//! this format reads back line for line.
//!
//! Escapes: `\\`, `\n`, `\r`, `\=`, `\ `, `\#`, `\;` and `\[`, and `\t` is
//! accepted when reading. Keys escape `\\` and the last five so that no key
//! can pass for a comment, a section header, or surrounding whitespace;
//! values escape `\\`, `\n` and `\r`.

use persistence_core::{Format, FormatError, KeyPath, TreeModel};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IniFormat;

fn escape(s: &str, out: &mut String, in_key: bool) {
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '=' | ' ' | '#' | ';' | '[' if in_key => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
}

fn unescape(s: &str, line: usize) -> Result<String, FormatError> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(c @ ('=' | ' ' | '#' | ';' | '[')) => out.push(c),
            other => {
                return Err(FormatError::Syntax {
                    line,
                    message: format!("invalid escape sequence '\\{}'", other.unwrap_or(' ')),
                })
            }
        }
    }
    Ok(out)
}

/// `s` without trailing whitespace, keeping escaped whitespace.
fn trim_unescaped_end(s: &str) -> &str {
    let mut end = s.len();
    while let Some(c) = s[..end].chars().next_back() {
        if !c.is_whitespace() {
            break;
        }
        let before = &s[..end - c.len_utf8()];
        let backslashes = before.chars().rev().take_while(|&b| b == '\\').count();
        if backslashes % 2 == 1 {
            break;
        }
        end -= c.len_utf8();
    }
    &s[..end]
}

/// Byte offset of the first `=` not preceded by an escaping backslash.
fn split_point(line: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        match c {
            '\\' if !escaped => escaped = true,
            '=' if !escaped => return Some(i),
            _ => escaped = false,
        }
    }
    None
}

impl Format for IniFormat {
    type Model = TreeModel;

    fn parse(&self, raw: &str) -> Result<TreeModel, FormatError> {
        let mut model = TreeModel::new();
        let mut section: Option<KeyPath> = None;

        for (i, line) in raw.lines().enumerate() {
            let number = i + 1;
            let trimmed = line.trim_start();
            if trimmed.trim_end().is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';')
            {
                continue;
            }

            let trimmed_end = trimmed.trim_end();
            if trimmed_end.starts_with('[') && trimmed_end.ends_with(']') {
                let name = trimmed_end[1..trimmed_end.len() - 1].trim();
                section = if name.is_empty() {
                    None
                } else {
                    Some(KeyPath::parse(name).map_err(|e| FormatError::Syntax {
                        line: number,
                        message: e.to_string(),
                    })?)
                };
                continue;
            }

            let at = split_point(trimmed).ok_or_else(|| FormatError::Syntax {
                line: number,
                message: "expected 'key=value'".to_string(),
            })?;
            let name = unescape(trim_unescaped_end(&trimmed[..at]), number)?;
            let value = unescape(&trimmed[at + 1..], number)?;

            let key = KeyPath::parse(&name).map_err(|e| FormatError::Syntax {
                line: number,
                message: e.to_string(),
            })?;
            let key = match &section {
                Some(section) => {
                    let mut segments = section.segments().to_vec();
                    segments.extend(key.segments().iter().cloned());
                    KeyPath::try_from_segments(segments).map_err(|e| FormatError::Syntax {
                        line: number,
                        message: e.to_string(),
                    })?
                }
                None => key,
            };

            model.insert(key, value);
        }

        Ok(model)
    }

    fn render(&self, model: &TreeModel) -> Result<String, FormatError> {
        let mut out = String::new();
        for (key, value) in model.iter() {
            escape(&key.to_string(), &mut out, true);
            out.push('=');
            escape(value, &mut out, false);
            out.push('\n');
        }
        Ok(out)
    }
}
