use config::{Config, Environment};
use serde::{Deserialize, Serialize};
use crate::core::library::LibraryResult;

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable : Sync + Send {
    fn id(&self) -> String;
    fn version(&self) -> i64;
}

pub const DEFAULT_GRACE_PERIOD_DAYS: i64 = 14;
pub const DEFAULT_FINE_PER_DAY: f64 = 2.0;
pub const DEFAULT_DUE_SOON_DAYS: i64 = 3;

// Configuration abstracts config options for library system
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub branch_id: String,
    // an active loan older than this many days is overdue
    pub grace_period_days: i64,
    // fine charged for each day past the return date
    pub fine_per_day: f64,
    // window before the grace period ends in which a loan is reported as due soon
    pub due_soon_days: i64,
}

impl Configuration {
    pub fn new(branch_id: &str) -> Self {
        Configuration {
            branch_id: branch_id.to_string(),
            grace_period_days: DEFAULT_GRACE_PERIOD_DAYS,
            fine_per_day: DEFAULT_FINE_PER_DAY,
            due_soon_days: DEFAULT_DUE_SOON_DAYS,
        }
    }

    /// Loads configuration from `LMS_*` environment variables, e.g. `LMS_FINE_PER_DAY=1.5`,
    /// falling back to the defaults of [`Configuration::new`].
    pub fn load(branch_id: &str) -> LibraryResult<Self> {
        Self::load_from(Environment::with_prefix("LMS").try_parsing(true), branch_id)
    }

    pub(crate) fn load_from(env: Environment, branch_id: &str) -> LibraryResult<Self> {
        let defaults = Configuration::new(branch_id);
        let config = Config::builder()
            .set_default("branch_id", defaults.branch_id)?
            .set_default("grace_period_days", defaults.grace_period_days)?
            .set_default("fine_per_day", defaults.fine_per_day)?
            .set_default("due_soon_days", defaults.due_soon_days)?
            .add_source(env)
            .build()?;
        let loaded: Configuration = config.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    fn validate(&self) -> LibraryResult<()> {
        if self.grace_period_days < 0 || self.due_soon_days < 0 {
            return Err(crate::core::library::LibraryError::validation(
                format!("day counts must not be negative {:?}", self).as_str(), Some("400".to_string())));
        }
        if self.fine_per_day < 0.0 || !self.fine_per_day.is_finite() {
            return Err(crate::core::library::LibraryError::validation(
                format!("invalid fine per day {}", self.fine_per_day).as_str(), Some("400".to_string())));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use config::Environment;
    use crate::core::domain::Configuration;

    fn env_of(pairs: &[(&str, &str)]) -> Environment {
        let source: HashMap<String, String> = pairs.iter()
            .map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Environment::with_prefix("LMS").try_parsing(true).source(Some(source))
    }

    #[tokio::test]
    async fn test_should_build_config() {
        let config = Configuration::new("test");
        assert_eq!(14, config.grace_period_days);
        assert_eq!(2.0, config.fine_per_day);
        assert_eq!(3, config.due_soon_days);
    }

    #[tokio::test]
    async fn test_should_load_config_defaults() {
        let config = Configuration::load_from(env_of(&[]), "main").expect("should load config");
        assert_eq!(Configuration::new("main"), config);
    }

    #[tokio::test]
    async fn test_should_load_config_overrides() {
        let config = Configuration::load_from(
            env_of(&[("LMS_FINE_PER_DAY", "1.5"), ("LMS_GRACE_PERIOD_DAYS", "21")]), "main")
            .expect("should load config");
        assert_eq!(1.5, config.fine_per_day);
        assert_eq!(21, config.grace_period_days);
        assert_eq!(3, config.due_soon_days);
    }

    #[tokio::test]
    async fn test_should_reject_negative_fine() {
        let res = Configuration::load_from(env_of(&[("LMS_FINE_PER_DAY", "-1.0")]), "main");
        assert!(res.is_err());
    }
}
