//! INI configuration adapter.
//!
//! Loads an [`EngineConfig`] from an INI file with `[data]`, `[indicators]`
//! and `[backtest]` sections. Every key is optional; absent keys fall back to
//! the engine defaults.

use crate::domain::config::EngineConfig;
use crate::domain::error::ChartmillError;
use configparser::ini::Ini;
use std::path::{Path, PathBuf};

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<EngineConfig, ChartmillError> {
    let mut ini = Ini::new();
    ini.load(&path).map_err(|e| ChartmillError::ConfigParse {
        file: path.as_ref().display().to_string(),
        reason: e,
    })?;
    config_from_ini(&ini)
}

pub fn load_config_from_str(content: &str) -> Result<EngineConfig, ChartmillError> {
    let mut ini = Ini::new();
    ini.read(content.to_string())
        .map_err(|e| ChartmillError::ConfigParse {
            file: "<inline>".to_string(),
            reason: e,
        })?;
    config_from_ini(&ini)
}

fn config_from_ini(ini: &Ini) -> Result<EngineConfig, ChartmillError> {
    let defaults = EngineConfig::default();

    Ok(EngineConfig {
        data_dir: ini
            .get("data", "dir")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir),
        rsi_window: get_usize(ini, "indicators", "rsi_window", defaults.rsi_window)?,
        macd_fast: get_usize(ini, "indicators", "macd_fast", defaults.macd_fast)?,
        macd_slow: get_usize(ini, "indicators", "macd_slow", defaults.macd_slow)?,
        macd_signal: get_usize(ini, "indicators", "macd_signal", defaults.macd_signal)?,
        bollinger_window: get_usize(
            ini,
            "indicators",
            "bollinger_window",
            defaults.bollinger_window,
        )?,
        bollinger_mult_x100: get_mult_x100(ini, defaults.bollinger_mult_x100)?,
        stochastic_window: get_usize(
            ini,
            "indicators",
            "stochastic_window",
            defaults.stochastic_window,
        )?,
        stochastic_smooth: get_usize(
            ini,
            "indicators",
            "stochastic_smooth",
            defaults.stochastic_smooth,
        )?,
        fast_window: get_usize(ini, "backtest", "fast_window", defaults.fast_window)?,
        slow_window: get_usize(ini, "backtest", "slow_window", defaults.slow_window)?,
        initial_capital: get_f64(ini, "backtest", "initial_capital", defaults.initial_capital)?,
    })
}

fn get_usize(ini: &Ini, section: &str, key: &str, default: usize) -> Result<usize, ChartmillError> {
    match ini.get(section, key) {
        None => Ok(default),
        Some(text) => match text.parse() {
            Ok(value) if value > 0 => Ok(value),
            _ => Err(ChartmillError::ConfigInvalid {
                section: section.to_string(),
                key: key.to_string(),
                reason: format!("expected positive integer, got '{}'", text),
            }),
        },
    }
}

fn get_f64(ini: &Ini, section: &str, key: &str, default: f64) -> Result<f64, ChartmillError> {
    match ini.get(section, key) {
        None => Ok(default),
        Some(text) => text.parse().map_err(|_| ChartmillError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: format!("expected number, got '{}'", text),
        }),
    }
}

fn get_mult_x100(ini: &Ini, default: u32) -> Result<u32, ChartmillError> {
    match ini.get("indicators", "bollinger_mult") {
        None => Ok(default),
        Some(text) => {
            let mult: f64 = text.parse().map_err(|_| ChartmillError::ConfigInvalid {
                section: "indicators".to_string(),
                key: "bollinger_mult".to_string(),
                reason: format!("expected number, got '{}'", text),
            })?;
            if mult <= 0.0 {
                return Err(ChartmillError::ConfigInvalid {
                    section: "indicators".to_string(),
                    key: "bollinger_mult".to_string(),
                    reason: format!("multiplier must be positive, got {}", mult),
                });
            }
            Ok((mult * 100.0).round() as u32)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn empty_config_uses_defaults() {
        let config = load_config_from_str("").unwrap();
        let defaults = EngineConfig::default();

        assert_eq!(config.rsi_window, defaults.rsi_window);
        assert_eq!(config.fast_window, defaults.fast_window);
        assert_eq!(config.initial_capital, defaults.initial_capital);
        assert_eq!(config.data_dir, defaults.data_dir);
    }

    #[test]
    fn overrides_take_effect() {
        let content = r#"
[data]
dir = /var/lib/bars

[indicators]
rsi_window = 7
bollinger_mult = 2.5

[backtest]
fast_window = 10
slow_window = 30
initial_capital = 25000
"#;
        let config = load_config_from_str(content).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/bars"));
        assert_eq!(config.rsi_window, 7);
        assert_eq!(config.bollinger_mult_x100, 250);
        assert_eq!(config.fast_window, 10);
        assert_eq!(config.slow_window, 30);
        assert_eq!(config.initial_capital, 25_000.0);
        // untouched keys keep defaults
        assert_eq!(config.macd_fast, 12);
    }

    #[test]
    fn invalid_int_is_config_invalid() {
        let err = load_config_from_str("[indicators]\nrsi_window = lots\n").unwrap_err();
        assert!(matches!(
            err,
            ChartmillError::ConfigInvalid { ref key, .. } if key == "rsi_window"
        ));
    }

    #[test]
    fn zero_window_is_config_invalid() {
        // A zero window would make every indicator point invalid; reject it
        // at load time instead.
        let err = load_config_from_str("[indicators]\nrsi_window = 0\n").unwrap_err();
        assert!(matches!(
            err,
            ChartmillError::ConfigInvalid { ref key, .. } if key == "rsi_window"
        ));
    }

    #[test]
    fn negative_multiplier_rejected() {
        let err = load_config_from_str("[indicators]\nbollinger_mult = -1\n").unwrap_err();
        assert!(matches!(err, ChartmillError::ConfigInvalid { .. }));
    }

    #[test]
    fn load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[backtest]\ninitial_capital = 5000\n").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.initial_capital, 5_000.0);
    }

    #[test]
    fn missing_file_is_parse_error() {
        let err = load_config("/nonexistent/chartmill.ini").unwrap_err();
        assert!(matches!(err, ChartmillError::ConfigParse { .. }));
    }
}
