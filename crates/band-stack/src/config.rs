//! Configuration for the band stack assembler.

use grid_processor::ResamplingMethod;
use radiometry::Quantity;
use serde::{Deserialize, Serialize};

/// Configuration for one assembly run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Worker threads for per-band processing; None uses the global pool.
    pub threads: Option<usize>,

    /// Quantity carried by the stack.
    pub quantity: Quantity,

    /// Resampling method applied to every band.
    pub method: ResamplingMethod,

    /// Value written to cells without an observation.
    pub nodata: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            threads: None,
            quantity: Quantity::Reflectance,
            method: ResamplingMethod::Bilinear,
            nodata: f32::NAN,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from the `STACK_*` environment variables.
    ///
    /// Unset variables keep their defaults; a set variable that does not
    /// parse is an error.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup, using the `STACK_*` names.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(val) = lookup("STACK_THREADS") {
            let threads = val
                .trim()
                .parse()
                .map_err(|_| format!("STACK_THREADS: invalid thread count '{}'", val))?;
            config.threads = Some(threads);
        }

        if let Some(val) = lookup("STACK_RESAMPLING") {
            config.method = ResamplingMethod::from_str(val.trim())
                .ok_or_else(|| format!("STACK_RESAMPLING: unknown resampling method '{}'", val))?;
        }

        if let Some(val) = lookup("STACK_OUTPUT") {
            config.quantity = Quantity::from_str(val.trim())
                .ok_or_else(|| format!("STACK_OUTPUT: unknown quantity '{}'", val))?;
        }

        if let Some(val) = lookup("STACK_NODATA") {
            config.nodata = val
                .trim()
                .parse()
                .map_err(|_| format!("STACK_NODATA: invalid no-data value '{}'", val))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.threads == Some(0) {
            return Err("threads must be > 0".to_string());
        }

        if self.nodata.is_infinite() {
            return Err("nodata must be NaN or finite".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.quantity, Quantity::Reflectance);
        assert_eq!(config.method, ResamplingMethod::Bilinear);
        assert!(config.nodata.is_nan());
    }

    #[test]
    fn test_validate_rejects() {
        let zero_threads = PipelineConfig {
            threads: Some(0),
            ..Default::default()
        };
        assert!(zero_threads.validate().is_err());

        let infinite = PipelineConfig {
            nodata: f32::INFINITY,
            ..Default::default()
        };
        assert!(infinite.validate().is_err());
    }

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_lookup_overrides() {
        let config = PipelineConfig::from_lookup(lookup(&[
            ("STACK_THREADS", "3"),
            ("STACK_RESAMPLING", "Average"),
            ("STACK_OUTPUT", "radiance"),
            ("STACK_NODATA", " -9999 "),
        ]))
        .unwrap();
        assert_eq!(config.threads, Some(3));
        assert_eq!(config.method, ResamplingMethod::Average);
        assert_eq!(config.quantity, Quantity::Radiance);
        assert_eq!(config.nodata, -9999.0);

        let config = PipelineConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.threads, None);
        assert_eq!(config.method, ResamplingMethod::Bilinear);
    }

    #[test]
    fn test_lookup_rejects_unparsable_values() {
        for (key, value) in [
            ("STACK_RESAMPLING", "lanczos"),
            ("STACK_NODATA", "not-a-number"),
            ("STACK_THREADS", "many"),
            ("STACK_THREADS", "0"),
            ("STACK_OUTPUT", "brightness"),
            ("STACK_NODATA", "inf"),
        ] {
            let err = PipelineConfig::from_lookup(lookup(&[(key, value)])).unwrap_err();
            assert!(err.contains(key) || err.contains("must be"), "{}={}: {}", key, value, err);
        }
    }

    #[test]
    fn test_from_env() {
        std::env::set_var("STACK_RESAMPLING", "mode");
        std::env::set_var("STACK_NODATA", "-1");
        let config = PipelineConfig::from_env();
        std::env::set_var("STACK_RESAMPLING", "lanczos");
        let rejected = PipelineConfig::from_env();
        std::env::remove_var("STACK_RESAMPLING");
        std::env::remove_var("STACK_NODATA");

        let config = config.unwrap();
        assert_eq!(config.method, ResamplingMethod::Mode);
        assert_eq!(config.nodata, -1.0);
        assert!(rejected.is_err());
    }

    #[test]
    fn test_yaml_partial_config() {
        let config: PipelineConfig =
            serde_yaml::from_str("threads: 4\nmethod: cubic\nquantity: radiance\n").unwrap();
        assert_eq!(config.threads, Some(4));
        assert_eq!(config.method, ResamplingMethod::Cubic);
        assert_eq!(config.quantity, Quantity::Radiance);
        assert!(config.nodata.is_nan());
    }
}
