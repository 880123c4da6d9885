use std::fs;
use std::path::{Path, PathBuf};

use crate::io::store::atomic_write;
use crate::model::config::AppConfig;

/// File name of the config inside the workspace directory
pub const CONFIG_FILE: &str = "config.toml";

/// Written by `pm init`. Every value here is also the built-in default.
pub const CONFIG_TEMPLATE: &str = r##"# pmlite workspace configuration
# Edit by hand or with: pm config set <section.key> <value>

[ui]
# Length of the cosmetic sign-in and feedback pauses (0 disables them)
simulated_delay_ms = 500

[dashboard]
# Activity entries shown on the dashboard
recent_activity = 10

[notes]
# Number of tag suggestions offered by `pm notes tags`
tag_suggestions = 6

[objectives]
default_owner = "You"
default_due = "July 30"
# List objectives ordered by due label (plain text comparison)
sort_by_due = false
"##;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config.toml: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("could not parse config.toml: {0}")]
    EditError(#[from] toml_edit::TomlError),
    #[error("unknown config key \"{0}\"")]
    UnknownKey(String),
    #[error("invalid value \"{value}\" for {key}: expected {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueKind {
    Integer,
    Boolean,
    Text,
}

/// Keys accepted by `pm config set`
const KNOWN_KEYS: &[(&str, &str, ValueKind)] = &[
    ("ui", "simulated_delay_ms", ValueKind::Integer),
    ("dashboard", "recent_activity", ValueKind::Integer),
    ("notes", "tag_suggestions", ValueKind::Integer),
    ("objectives", "default_owner", ValueKind::Text),
    ("objectives", "default_due", ValueKind::Text),
    ("objectives", "sort_by_due", ValueKind::Boolean),
];

/// Read the workspace config, returning both the parsed config and the raw
/// toml_edit document for round-trip-safe editing. A missing file yields the
/// defaults and an empty document.
pub fn read_config(dir: &Path) -> Result<(AppConfig, toml_edit::DocumentMut), ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok((AppConfig::default(), toml_edit::DocumentMut::new()));
    }
    let config_text = fs::read_to_string(&config_path).map_err(|e| ConfigError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;
    let config: AppConfig = toml::from_str(&config_text)?;
    let doc: toml_edit::DocumentMut = config_text.parse()?;
    Ok((config, doc))
}

/// Write the config document back to disk, preserving formatting.
pub fn write_config(dir: &Path, doc: &toml_edit::DocumentMut) -> Result<(), ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    atomic_write(&config_path, doc.to_string().as_bytes()).map_err(|e| ConfigError::WriteError {
        path: config_path,
        source: e,
    })
}

/// Set `section.key` to `raw`, typed according to the key.
pub fn set_value(doc: &mut toml_edit::DocumentMut, dotted: &str, raw: &str) -> Result<(), ConfigError> {
    let (section, key, kind) = dotted
        .split_once('.')
        .and_then(|(s, k)| {
            KNOWN_KEYS
                .iter()
                .find(|(ks, kk, _)| *ks == s && *kk == k)
                .copied()
        })
        .ok_or_else(|| ConfigError::UnknownKey(dotted.to_string()))?;

    let invalid = |expected: &'static str| ConfigError::InvalidValue {
        key: dotted.to_string(),
        value: raw.to_string(),
        expected,
    };
    let value = match kind {
        ValueKind::Integer => {
            let n: i64 = raw.trim().parse().map_err(|_| invalid("a non-negative integer"))?;
            if n < 0 {
                return Err(invalid("a non-negative integer"));
            }
            toml_edit::value(n)
        }
        ValueKind::Boolean => {
            let b: bool = raw.trim().parse().map_err(|_| invalid("true or false"))?;
            toml_edit::value(b)
        }
        ValueKind::Text => toml_edit::value(raw),
    };

    if !doc.contains_key(section) {
        doc[section] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    doc[section][key] = value;
    Ok(())
}

/// Parse an edited document into a typed config.
pub fn to_config(doc: &toml_edit::DocumentMut) -> Result<AppConfig, ConfigError> {
    Ok(toml::from_str(&doc.to_string())?)
}
