//! `KEY=VALUE` environment file parsing.

use std::collections::BTreeMap;
use std::str::FromStr;

/// Variables read from an environment file. Values are raw strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentMap {
    values: BTreeMap<String, String>,
}

impl EnvironmentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse environment file content.
    ///
    /// The first `=` on a line splits key from value. Blank lines, `#` comments,
    /// lines without `=` and lines with an empty key are ignored. A single layer
    /// of matching surrounding quotes is stripped from the value.
    pub fn parse(content: &str) -> Self {
        let mut values = BTreeMap::new();
        for line in strip_bom(content).lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            values.insert(key.to_string(), unquote(value.trim()).to_string());
        }
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Value for `key`, or `default` when absent or blank.
    pub fn get_or(&self, key: &str, default: &str) -> String {
        match self.get(key) {
            Some(value) if !value.is_empty() => value.to_string(),
            _ => default.to_string(),
        }
    }

    /// Parse the value for `key`, falling back to `default` when absent or not castable.
    pub fn parse_or<T: FromStr>(&self, key: &str, default: T) -> T {
        let Some(raw) = self.get(key).filter(|value| !value.is_empty()) else {
            return default;
        };
        match raw.parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                log::warn!("Ignoring {}={:?}: not a valid value, using default", key, raw);
                default
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Drop a leading UTF-8 byte-order mark, as written by Windows editors.
pub(crate) fn strip_bom(content: &str) -> &str {
    content.strip_prefix('\u{feff}').unwrap_or(content)
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2
            && let Some(inner) = value.strip_prefix(quote).and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
