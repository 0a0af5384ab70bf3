//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;
use std::str::FromStr;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [cache] section
    if let Some(section) = ini.section(Some("cache")) {
        if let Some(v) = section.get("enabled") {
            config.cache.enabled = parse_bool(v);
        }
        if let Some(v) = section.get("max_entries") {
            config.cache.max_entries = parse_positive("cache", "max_entries", v)?;
        }
        if let Some(v) = section.get("ttl_secs") {
            config.cache.ttl_secs = parse_number("cache", "ttl_secs", v)?;
        }
    }

    // [request] section
    if let Some(section) = ini.section(Some("request")) {
        if let Some(v) = section.get("max_codes") {
            let parsed: usize = parse_number("request", "max_codes", v)?;
            if parsed < 2 {
                return Err(invalid("request", "max_codes", v, "must be at least 2"));
            }
            config.request.max_codes = parsed;
        }
    }

    // [scheduler] section
    if let Some(section) = ini.section(Some("scheduler")) {
        if let Some(v) = section.get("max_concurrency") {
            config.scheduler.max_concurrency = parse_number("scheduler", "max_concurrency", v)?;
        }
        if let Some(v) = section.get("channel_capacity") {
            config.scheduler.channel_capacity =
                parse_positive("scheduler", "channel_capacity", v)?;
        }
    }

    // [data] section
    if let Some(section) = ini.section(Some("data")) {
        if let Some(v) = section.get("points_file") {
            let v = v.trim();
            if !v.is_empty() {
                config.data.points_file = Some(expand_tilde(v));
            }
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.directory = expand_tilde(v);
            }
        }
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = v.to_string();
            }
        }
    }

    Ok(config)
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_number<T: FromStr>(section: &str, key: &str, value: &str) -> Result<T, ConfigFileError> {
    value
        .trim()
        .parse()
        .map_err(|_| invalid(section, key, value, "expected a non-negative integer"))
}

fn parse_positive(section: &str, key: &str, value: &str) -> Result<usize, ConfigFileError> {
    match parse_number::<usize>(section, key, value)? {
        0 => Err(invalid(section, key, value, "must be greater than 0")),
        n => Ok(n),
    }
}

/// Parse a boolean value from a config string.
/// Accepts: true/false, yes/no, 1/0, on/off (case-insensitive)
pub(super) fn parse_bool(value: &str) -> bool {
    let v = value.trim().to_lowercase();
    v == "true" || v == "1" || v == "yes" || v == "on"
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn load(content: &str) -> Result<ConfigFile, ConfigFileError> {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.ini");
        std::fs::write(&config_path, content).unwrap();
        ConfigFile::load_from(&config_path)
    }

    #[test]
    fn test_full_config() {
        let config = load(
            r#"
[cache]
enabled = no
max_entries = 50
ttl_secs = 30

[request]
max_codes = 20

[scheduler]
max_concurrency = 3
channel_capacity = 8

[data]
points_file = /tmp/points.json

[logging]
directory = /var/log/capdist
file = run.log
"#,
        )
        .unwrap();

        assert!(!config.cache.enabled);
        assert_eq!(config.cache.max_entries, 50);
        assert_eq!(config.cache.ttl_secs, 30);
        assert_eq!(config.request.max_codes, 20);
        assert_eq!(config.scheduler.max_concurrency, 3);
        assert_eq!(config.scheduler.channel_capacity, 8);
        assert_eq!(
            config.data.points_file,
            Some(PathBuf::from("/tmp/points.json"))
        );
        assert_eq!(config.logging.directory, PathBuf::from("/var/log/capdist"));
        assert_eq!(config.logging.file, "run.log");
    }

    #[test]
    fn test_partial_config() {
        let config = load(
            r#"
[cache]
ttl_secs = 5
"#,
        )
        .unwrap();
        let default = ConfigFile::default();

        assert_eq!(config.cache.ttl_secs, 5);
        assert_eq!(config.cache.max_entries, default.cache.max_entries);
        assert_eq!(config.request, default.request);
    }

    #[test]
    fn test_invalid_number() {
        let err = load(
            r#"
[cache]
max_entries = lots
"#,
        )
        .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("cache.max_entries"));
        assert!(message.contains("lots"));
    }

    #[test]
    fn test_zero_channel_capacity_rejected() {
        let err = load(
            r#"
[scheduler]
channel_capacity = 0
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("greater than 0"));
    }

    #[test]
    fn test_max_codes_below_two_rejected() {
        let err = ConfigFile::from_ini_str("[request]\nmax_codes = 1\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigFileError::InvalidValue { ref key, .. } if key == "max_codes"
        ));
    }

    #[test]
    fn test_empty_points_file_ignored() {
        let config = ConfigFile::from_ini_str("[data]\npoints_file =\n").unwrap();
        assert!(config.data.points_file.is_none());
    }

    #[test]
    fn test_expand_tilde() {
        let path = expand_tilde("~/test/path");
        assert!(!path.to_string_lossy().starts_with('~'));

        let path = expand_tilde("/absolute/path");
        assert_eq!(path, PathBuf::from("/absolute/path"));
    }

    #[test]
    fn test_parse_bool_values() {
        assert!(parse_bool("TRUE"));
        assert!(parse_bool("yes"));
        assert!(parse_bool(" on "));
        assert!(!parse_bool("false"));
        assert!(!parse_bool("0"));
    }
}
