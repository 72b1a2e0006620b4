use crate::scanner::ScanOptions;
use crate::types::Column;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = ".findfolder_config";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    /// Column sorted right after every scan. `None` shows scan order.
    pub initial_sort: Option<Column>,
    pub date_width: u16,
    pub type_width: u16,
    pub ver_width: u16,
    pub skip_hidden: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            initial_sort: None,
            date_width: 14,
            type_width: 12,
            ver_width: 10,
            skip_hidden: false,
        }
    }
}

impl ViewConfig {
    /// Load `KEY=VALUE` settings.
    ///
    /// With an explicit path the file must exist. Without one, a missing
    /// `.findfolder_config` in the working directory means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if !required && e.kind() == io::ErrorKind::NotFound => {
                return Ok(ViewConfig::default());
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        log::debug!("Loading config from {}", path.display());
        ViewConfig::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut config = ViewConfig::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((k, v)) = line.split_once('=') else {
                log::warn!("Ignoring config line without '=': {line}");
                continue;
            };
            let key = k.trim();
            let val = v.trim().trim_matches('"');

            match key {
                "INITIAL_SORT" => {
                    config.initial_sort = if val.eq_ignore_ascii_case("none") || val.is_empty() {
                        None
                    } else {
                        Some(val.parse().map_err(|_| invalid(key, val))?)
                    };
                }
                "DATE_WIDTH" => config.date_width = parse_width(key, val)?,
                "TYPE_WIDTH" => config.type_width = parse_width(key, val)?,
                "VER_WIDTH" => config.ver_width = parse_width(key, val)?,
                "SKIP_HIDDEN" => {
                    config.skip_hidden = val.parse().map_err(|_| invalid(key, val))?;
                }
                _ => log::warn!("Ignoring unknown config key {key}"),
            }
        }

        Ok(config)
    }

    #[must_use]
    pub fn width(&self, column: Column) -> u16 {
        match column {
            Column::Date => self.date_width,
            Column::Type => self.type_width,
            Column::Version => self.ver_width,
        }
    }

    #[must_use]
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            skip_hidden: self.skip_hidden,
        }
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_width(key: &str, value: &str) -> Result<u16, ConfigError> {
    match value.parse::<u16>() {
        Ok(w) if w > 0 => Ok(w),
        _ => Err(invalid(key, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_all_keys() {
        let content = "\
# view settings
INITIAL_SORT=\"type\"
DATE_WIDTH = 14
TYPE_WIDTH=8
VER_WIDTH=4
SKIP_HIDDEN=true
";
        let config = ViewConfig::parse(content).unwrap();
        assert_eq!(config.initial_sort, Some(Column::Type));
        assert_eq!(config.width(Column::Date), 14);
        assert_eq!(config.width(Column::Type), 8);
        assert_eq!(config.width(Column::Version), 4);
        assert!(config.scan_options().skip_hidden);
    }

    #[test]
    fn test_parse_defaults_and_unknown_keys() {
        let config = ViewConfig::parse("COLOR=blue\nINITIAL_SORT=none\n").unwrap();
        assert_eq!(config, ViewConfig::default());
    }

    #[test]
    fn test_parse_invalid_values() {
        assert!(matches!(
            ViewConfig::parse("DATE_WIDTH=0"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(ViewConfig::parse("INITIAL_SORT=size").is_err());
        assert!(ViewConfig::parse("SKIP_HIDDEN=maybe").is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "INITIAL_SORT=date").unwrap();

        let config = ViewConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.initial_sort, Some(Column::Date));
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        assert!(matches!(
            ViewConfig::load(Some(&missing)),
            Err(ConfigError::Read { .. })
        ));
    }
}
