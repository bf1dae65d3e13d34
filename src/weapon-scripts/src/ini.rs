//! Minimal INI reader
//!
//! Parses script files into an ordered list of sections, each holding
//! lower-cased keys and raw string values. No type conversion happens here;
//! see [`crate::script`] for the typed layer on top.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IniError {
    #[error("line {line}: malformed section header")]
    BadHeader { line: usize },

    #[error("line {line}: expected `key = value`")]
    MissingEquals { line: usize },

    #[error("line {line}: empty key")]
    EmptyKey { line: usize },

    #[error("line {line}: key `{key}` appears outside of any section")]
    OutsideSection { line: usize, key: String },

    #[error("line {line}: duplicate key `{key}` in section [{section}]")]
    DuplicateKey {
        line: usize,
        section: String,
        key: String,
    },
}

/// One `[section]` and its entries, in file order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniSection {
    name: String,
    line: usize,
    entries: Vec<(String, String)>,
}

impl IniSection {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Line the section header was found on (1-based)
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        let key = key.to_ascii_lowercase();
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parsed INI document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    sections: Vec<IniSection>,
}

impl IniDocument {
    pub fn parse(text: &str) -> Result<Self, IniError> {
        let mut sections: Vec<IniSection> = Vec::new();
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;
            let trimmed = raw.trim();

            if trimmed.is_empty() || trimmed.starts_with(';') || trimmed.starts_with('#') {
                continue;
            }

            if let Some(rest) = trimmed.strip_prefix('[') {
                let name = rest
                    .strip_suffix(']')
                    .map(str::trim)
                    .filter(|n| !n.is_empty())
                    .ok_or(IniError::BadHeader { line })?;
                sections.push(IniSection {
                    name: name.to_string(),
                    line,
                    entries: Vec::new(),
                });
                continue;
            }

            let (key, value) = trimmed
                .split_once('=')
                .ok_or(IniError::MissingEquals { line })?;
            let key = key.trim().to_ascii_lowercase();
            if key.is_empty() {
                return Err(IniError::EmptyKey { line });
            }
            let value = unquote(value.trim()).to_string();

            let Some(section) = sections.last_mut() else {
                return Err(IniError::OutsideSection { line, key });
            };
            if section.entries.iter().any(|(k, _)| *k == key) {
                return Err(IniError::DuplicateKey {
                    line,
                    section: section.name.clone(),
                    key,
                });
            }
            section.entries.push((key, value));
        }

        Ok(Self { sections })
    }

    pub fn sections(&self) -> &[IniSection] {
        &self.sections
    }

    /// First section with the given name (case-insensitive)
    pub fn section(&self, name: &str) -> Option<&IniSection> {
        self.sections
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
