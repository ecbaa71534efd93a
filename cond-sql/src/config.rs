//! Query configuration: dialect selection and validation rules.
//!
//! Loaded from TOML or from environment variables handed in by the host.
//!
//! ```
//! use cond_sql::{AnyDialect, QueryConfig};
//!
//! let config = QueryConfig::from_toml_str(r#"
//!     dialect = "sqlserver"
//!     allowed_columns = ["CardCode", "DocTotal"]
//!     max_depth = 4
//! "#)?;
//!
//! assert_eq!(config.dialect, AnyDialect::SqlServer);
//! assert_eq!(config.validator().max_depth, 4);
//! # Ok::<(), cond_sql::ConfigError>(())
//! ```

use serde::Deserialize;

use crate::dialect::AnyDialect;
use crate::validate::{DEFAULT_MAX_DEPTH, TreeValidator};
use crate::vocab::ComparisonKind;

/// Environment variable selecting the dialect.
pub const ENV_DIALECT: &str = "COND_SQL_DIALECT";
/// Environment variable overriding the maximum nesting depth.
pub const ENV_MAX_DEPTH: &str = "COND_SQL_MAX_DEPTH";
/// Environment variable with a comma-separated column whitelist.
pub const ENV_ALLOWED_COLUMNS: &str = "COND_SQL_ALLOWED_COLUMNS";

/// Failure to load a [`QueryConfig`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// TOML could not be parsed into a config.
    #[error("invalid query config: {0}")]
    Parse(#[from] toml::de::Error),
    /// Dialect name not recognized.
    #[error("unknown dialect '{0}', expected hana or sqlserver")]
    UnknownDialect(String),
    /// A numeric setting could not be parsed.
    #[error("invalid value '{value}' for {name}")]
    InvalidNumber { name: &'static str, value: String },
}

/// Dialect and validation settings for a host session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
#[non_exhaustive]
pub struct QueryConfig {
    /// Target dialect.
    pub dialect: AnyDialect,
    /// Column whitelist. Empty = all allowed.
    pub allowed_columns: Vec<String>,
    /// Comparison kinds to reject.
    pub denied_kinds: Vec<ComparisonKind>,
    /// Maximum subgroup nesting depth.
    pub max_depth: usize,
    /// Reject column names that are not plain identifiers.
    pub require_plain_identifiers: bool,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            dialect: AnyDialect::default(),
            allowed_columns: Vec::new(),
            denied_kinds: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
            require_plain_identifiers: false,
        }
    }
}

impl QueryConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        tracing::debug!(dialect = ?config.dialect, max_depth = config.max_depth, "loaded query config");
        Ok(config)
    }

    /// Build a config from environment variables, e.g. the host's
    /// `std::env::vars().collect::<Vec<_>>()`.
    ///
    /// `COND_SQL_DIALECT` accepts a dialect name, or a boolean meaning
    /// "is HANA" (`true`/`1`/`yes`, `false`/`0`/`no`). Unset variables keep
    /// their defaults.
    pub fn from_env(env: &[(String, String)]) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = get(env, ENV_DIALECT) {
            config.dialect = parse_dialect(raw)?;
        }

        if let Some(raw) = get(env, ENV_MAX_DEPTH) {
            config.max_depth = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber {
                    name: ENV_MAX_DEPTH,
                    value: raw.to_string(),
                })?;
        }

        if let Some(raw) = get(env, ENV_ALLOWED_COLUMNS) {
            config.allowed_columns = raw
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect();
        }

        tracing::debug!(dialect = ?config.dialect, max_depth = config.max_depth, "loaded query config from environment");
        Ok(config)
    }

    /// The validator these settings describe.
    #[must_use]
    pub fn validator(&self) -> TreeValidator {
        TreeValidator {
            allowed_columns: self.allowed_columns.clone(),
            denied_kinds: self.denied_kinds.clone(),
            max_depth: self.max_depth,
            require_plain_identifiers: self.require_plain_identifiers,
        }
    }
}

fn get<'a>(env: &'a [(String, String)], name: &str) -> Option<&'a str> {
    env.iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

fn parse_dialect(raw: &str) -> Result<AnyDialect, ConfigError> {
    if let Some(dialect) = AnyDialect::from_name(raw) {
        return Ok(dialect);
    }
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(AnyDialect::Hana),
        "false" | "0" | "no" => Ok(AnyDialect::SqlServer),
        _ => Err(ConfigError::UnknownDialect(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = QueryConfig::default();
        assert_eq!(config.dialect, AnyDialect::Hana);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.validator(), TreeValidator::new());
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(QueryConfig::from_toml_str("").unwrap(), QueryConfig::default());
    }

    #[test]
    fn test_full_toml() {
        let config = QueryConfig::from_toml_str(
            r#"
            dialect = "mssql"
            allowed_columns = ["A", "B"]
            denied_kinds = ["Exists", "NotExists"]
            max_depth = 2
            require_plain_identifiers = true
            "#,
        )
        .unwrap();

        assert_eq!(config.dialect, AnyDialect::SqlServer);
        let validator = config.validator();
        assert_eq!(validator.allowed_columns, vec!["A", "B"]);
        assert_eq!(
            validator.denied_kinds,
            vec![ComparisonKind::Exists, ComparisonKind::NotExists]
        );
        assert_eq!(validator.max_depth, 2);
        assert!(validator.require_plain_identifiers);
    }

    #[test]
    fn test_toml_rejects_unknown_keys_and_dialects() {
        assert!(matches!(
            QueryConfig::from_toml_str("dialect = \"oracle\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            QueryConfig::from_toml_str("dialekt = \"hana\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_toml_and_env_accept_same_dialect_names() {
        for (name, expected) in [
            ("HANA", AnyDialect::Hana),
            ("SqlServer", AnyDialect::SqlServer),
            ("MsSql", AnyDialect::SqlServer),
        ] {
            let from_toml = QueryConfig::from_toml_str(&format!("dialect = \"{name}\"")).unwrap();
            let from_env = QueryConfig::from_env(&env(&[(ENV_DIALECT, name)])).unwrap();
            assert_eq!(from_toml.dialect, expected, "{name}");
            assert_eq!(from_env.dialect, expected, "{name}");
        }
    }

    #[test]
    fn test_from_env() {
        let config = QueryConfig::from_env(&env(&[
            (ENV_DIALECT, "SqlServer"),
            (ENV_MAX_DEPTH, " 3 "),
            (ENV_ALLOWED_COLUMNS, "CardCode, DocTotal,,"),
            ("UNRELATED", "x"),
        ]))
        .unwrap();

        assert_eq!(config.dialect, AnyDialect::SqlServer);
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.allowed_columns, vec!["CardCode", "DocTotal"]);
    }

    #[test]
    fn test_env_dialect_flag() {
        let hana = QueryConfig::from_env(&env(&[(ENV_DIALECT, "1")])).unwrap();
        assert_eq!(hana.dialect, AnyDialect::Hana);
        let mssql = QueryConfig::from_env(&env(&[(ENV_DIALECT, "false")])).unwrap();
        assert_eq!(mssql.dialect, AnyDialect::SqlServer);
    }

    #[test]
    fn test_env_errors() {
        let err = QueryConfig::from_env(&env(&[(ENV_DIALECT, "db2")])).unwrap_err();
        assert_eq!(err.to_string(), "unknown dialect 'db2', expected hana or sqlserver");

        let err = QueryConfig::from_env(&env(&[(ENV_MAX_DEPTH, "deep")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { name: ENV_MAX_DEPTH, .. }));
    }

    #[test]
    fn test_empty_env_is_default() {
        assert_eq!(QueryConfig::from_env(&[]).unwrap(), QueryConfig::default());
    }
}
