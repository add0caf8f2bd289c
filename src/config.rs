//! Server configuration read from environment variables.
//!
//! `HOST` and `PORT` choose the bind address; `DEFAULT_MAX_TEAMS` and
//! `DEFAULT_TEAMS_PER_GROUP` fill in tournament settings a create request leaves out.

/// Invalid configuration value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConfigError {
    /// Variable is set but cannot be parsed.
    Invalid { var: &'static str, value: String },
    /// Variable parsed but is outside the allowed range.
    OutOfRange { var: &'static str, min: usize },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Invalid { var, value } => {
                write!(f, "Invalid value for {}: '{}'", var, value)
            }
            ConfigError::OutOfRange { var, min } => write!(f, "{} must be at least {}", var, min),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub default_max_teams: usize,
    pub default_teams_per_group: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            default_max_teams: 16,
            default_teams_per_group: 4,
        }
    }
}

impl ServerConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load using `lookup` for each variable; unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let host = lookup("HOST")
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or(defaults.host);
        let port = parse_var(&lookup, "PORT", defaults.port)?;
        let default_max_teams =
            parse_var(&lookup, "DEFAULT_MAX_TEAMS", defaults.default_max_teams)?;
        if default_max_teams < 2 {
            return Err(ConfigError::OutOfRange {
                var: "DEFAULT_MAX_TEAMS",
                min: 2,
            });
        }
        let default_teams_per_group = parse_var(
            &lookup,
            "DEFAULT_TEAMS_PER_GROUP",
            defaults.default_teams_per_group,
        )?;
        if default_teams_per_group < 1 {
            return Err(ConfigError::OutOfRange {
                var: "DEFAULT_TEAMS_PER_GROUP",
                min: 1,
            });
        }
        Ok(Self {
            host,
            port,
            default_max_teams,
            default_teams_per_group,
        })
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|var| map.get(var).cloned())
    }

    #[test]
    fn unset_vars_use_defaults() {
        assert_eq!(load(&[]).unwrap(), ServerConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let cfg = load(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("DEFAULT_TEAMS_PER_GROUP", "3"),
        ])
        .unwrap();
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.default_teams_per_group, 3);
        assert_eq!(cfg.default_max_teams, 16);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(load(&[("PORT", "http")]), Err(ConfigError::Invalid { var: "PORT", .. })));
        assert!(matches!(
            load(&[("DEFAULT_TEAMS_PER_GROUP", "0")]),
            Err(ConfigError::OutOfRange { .. })
        ));
    }
}
