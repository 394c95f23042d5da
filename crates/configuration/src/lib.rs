use crate::error::ConfigError;
use core_types::CalculatorInputs;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{
    Assumptions, Bound, ChannelSynergies, Config, FeatureIncrements, InputBounds,
};

/// Loads the benchmark tables.
///
/// Sources are layered: the built-in defaults, then the TOML file at `path`
/// (if given, it must exist), then `UPLIFT_*` environment variables using `__`
/// between nested keys, e.g. `UPLIFT_CEILINGS__OPEN_RATE=55`. The result is
/// validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut builder =
        config::Config::builder().add_source(config::Config::try_from(&Config::default())?);

    if let Some(path) = path {
        tracing::debug!(path = %path.display(), "Reading benchmark tables from file.");
        builder = builder.add_source(config::File::from(path).required(true));
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix("UPLIFT")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    let config = settings.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}

/// Reads a set of calculator inputs from a TOML file.
///
/// Any field the file leaves out takes the calculator's default value.
pub fn load_inputs(path: &Path) -> Result<CalculatorInputs, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path).required(true))
        .build()?;

    let inputs = settings.try_deserialize::<CalculatorInputs>()?;
    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;
    use std::sync::{Mutex, MutexGuard};
    use tempfile::NamedTempFile;

    /// `load_config` reads the process environment, so every test that calls it
    /// holds this lock.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Sets an environment variable for the lifetime of the value, removing it on drop
    /// even if the test panics.
    struct EnvVar(&'static str);

    impl EnvVar {
        fn set(key: &'static str, value: &str) -> Self {
            // SAFETY: callers hold ENV_LOCK, so no other test reads or writes the
            // environment concurrently.
            unsafe { std::env::set_var(key, value) };
            Self(key)
        }
    }

    impl Drop for EnvVar {
        fn drop(&mut self) {
            // SAFETY: see `EnvVar::set`.
            unsafe { std::env::remove_var(self.0) };
        }
    }

    fn toml_file(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn no_file_yields_defaults() {
        let _lock = env_lock();
        let config = load_config(None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn file_overrides_individual_keys() {
        let file = toml_file(
            r#"
            [ceilings]
            open_rate = 55

            [assumptions]
            sms_list_share = 0.25
            "#,
        );

        let _lock = env_lock();
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.ceilings.open_rate, dec!(55));
        assert_eq!(config.ceilings.deliverability, dec!(99));
        assert_eq!(config.assumptions.sms_list_share, dec!(0.25));
        assert_eq!(config.assumptions.sms_cadence_ratio, dec!(0.5));
    }

    #[test]
    fn invalid_file_is_rejected_by_validation() {
        let file = toml_file(
            r#"
            [input_bounds.open_rate]
            min = 90
            max = 10
            "#,
        );

        let _lock = env_lock();
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ValidationError { ref table, .. } if table == "input_bounds.open_rate"
        ));
    }

    #[test]
    fn environment_overrides_defaults() {
        let _lock = env_lock();
        let _ceiling = EnvVar::set("UPLIFT_CEILINGS__OPEN_RATE", "55");

        let config = load_config(None).unwrap();
        assert_eq!(config.ceilings.open_rate, dec!(55));
        assert_eq!(config.ceilings.click_through_rate, dec!(15));
    }

    #[test]
    fn environment_takes_precedence_over_file() {
        let file = toml_file(
            r#"
            [ceilings]
            open_rate = 50
            conversion_rate = 35
            "#,
        );

        let _lock = env_lock();
        let _ceiling = EnvVar::set("UPLIFT_CEILINGS__OPEN_RATE", "55");

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.ceilings.open_rate, dec!(55));
        assert_eq!(config.ceilings.conversion_rate, dec!(35));
    }

    #[test]
    fn invalid_environment_value_is_rejected() {
        let _lock = env_lock();
        let _ceiling = EnvVar::set("UPLIFT_CEILINGS__OPEN_RATE", "140");

        let err = load_config(None).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ValidationError { ref table, .. } if table == "ceilings"
        ));
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let _lock = env_lock();
        let err = load_config(Some(Path::new("/nonexistent/uplift.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }

    #[test]
    fn inputs_file_fills_gaps_with_defaults() {
        let file = toml_file(
            r#"
            monthly_revenue = 250000
            open_rate = 31.5

            [features]
            multi_channel = true
            "#,
        );

        let inputs = load_inputs(file.path()).unwrap();
        assert_eq!(inputs.monthly_revenue, dec!(250000));
        assert_eq!(inputs.open_rate, dec!(31.5));
        assert_eq!(inputs.average_order_value, dec!(150));
        assert!(inputs.features.multi_channel);
        assert!(!inputs.features.automation);
    }
}
