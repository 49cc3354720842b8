/// Engine configuration
///
/// # Environment variables
///
/// Every field can be overridden from the environment:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | DATABASE_PATH | labour.db | SQLite database file |
/// | LOG_LEVEL | info | tracing filter directive |
/// | LOG_DIR | (unset) | daily rolling log files go here when set |
/// | LOG_JSON | false | emit JSON log lines |
/// | ENVIRONMENT | development | development / staging / production |
/// | LEGACY_COMPAT | false | reproduce the permissive legacy workflow behaviour |
/// | ALLOW_SELF_SUBSTITUTION | false | let a worker name themselves as substitute |
/// | OVERTIME_BONUS_RATE | 50 | bonus paid per extra hour |
/// | DB_MAX_CONNECTIONS | 5 | SQLite pool size |
///
/// # Example
///
/// ```ignore
/// DATABASE_PATH=/data/labour.db LEGACY_COMPAT=true cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub log_json: bool,
    /// development | staging | production
    pub environment: String,
    pub legacy_compat: bool,
    pub allow_self_substitution: bool,
    pub overtime_bonus_rate: f64,
    pub db_max_connections: u32,
}

impl Config {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            database_path: std::env::var("DATABASE_PATH").unwrap_or_else(|_| "labour.db".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty()),
            log_json: env_flag("LOG_JSON", false),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            legacy_compat: env_flag("LEGACY_COMPAT", false),
            allow_self_substitution: env_flag("ALLOW_SELF_SUBSTITUTION", false),
            overtime_bonus_rate: std::env::var("OVERTIME_BONUS_RATE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|r: &f64| r.is_finite() && *r >= 0.0)
                .unwrap_or(50.0),
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
        }
    }

    /// Defaults with the database at `database_path`
    ///
    /// Used by tests and embedders that do not read the environment
    pub fn with_database(database_path: impl Into<String>) -> Self {
        Self {
            database_path: database_path.into(),
            log_level: "info".into(),
            log_dir: None,
            log_json: false,
            environment: "development".into(),
            legacy_compat: false,
            allow_self_substitution: false,
            overtime_bonus_rate: 50.0,
            db_max_connections: 5,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Workflow switches derived from this configuration
    pub fn policy(&self) -> WorkflowPolicy {
        WorkflowPolicy {
            legacy_compat: self.legacy_compat,
            allow_self_substitution: self.allow_self_substitution,
        }
    }
}

/// Accepts `1/0`, `true/false`, `yes/no`, `on/off` (case-insensitive)
fn env_flag(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| parse_flag(&v))
        .unwrap_or(default)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Compatibility switches consumed by the attendance and substitute engines.
///
/// The default is strict: every precondition failure is an explicit error.
/// `legacy_compat` restores the permissive behaviour of the system this
/// engine replaces (second check-out overwrites, unauthorised accept and
/// premature approve are silent no-ops, approved requests can be rejected,
/// self-substitution allowed).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkflowPolicy {
    pub legacy_compat: bool,
    pub allow_self_substitution: bool,
}

impl WorkflowPolicy {
    pub fn permits_self_substitution(&self) -> bool {
        self.allow_self_substitution || self.legacy_compat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" yes "), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_defaults() {
        let config = Config::with_database("test.db");
        assert_eq!(config.overtime_bonus_rate, 50.0);
        assert!(!config.is_production());
        assert_eq!(config.policy(), WorkflowPolicy::default());
    }

    #[test]
    fn test_policy_self_substitution() {
        assert!(!WorkflowPolicy::default().permits_self_substitution());
        let legacy = WorkflowPolicy {
            legacy_compat: true,
            allow_self_substitution: false,
        };
        assert!(legacy.permits_self_substitution());
        let allowed = WorkflowPolicy {
            legacy_compat: false,
            allow_self_substitution: true,
        };
        assert!(allowed.permits_self_substitution());
    }
}
