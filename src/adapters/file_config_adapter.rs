//! INI file configuration adapter.

use std::path::Path;

use configparser::ini::Ini;

use crate::ports::config_port::ConfigPort;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v))
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
[trading]
symbol = SOL/USDC
interval_secs = 30
slippage_bps = 25

[risk]
trading_capital = 1000.0
max_drawdown_pct = 15.0

[simulation]
enabled = true
initial_balance = 2000.0
"#;

    #[test]
    fn from_string_parses_sections() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(
            adapter.get_string("trading", "symbol"),
            Some("SOL/USDC".to_string())
        );
        assert_eq!(adapter.get_int("trading", "interval_secs", 60), 30);
        assert_eq!(adapter.get_double("risk", "trading_capital", 0.0), 1000.0);
        assert!(adapter.get_bool("simulation", "enabled", false));
    }

    #[test]
    fn missing_key_returns_none_or_default() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(adapter.get_string("trading", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
        assert_eq!(adapter.get_int("trading", "missing", 42), 42);
        assert_eq!(adapter.get_double("risk", "missing", 9.5), 9.5);
        assert!(adapter.get_bool("simulation", "missing", true));
    }

    #[test]
    fn non_numeric_value_falls_back_to_default() {
        let adapter =
            FileConfigAdapter::from_string("[trading]\ninterval_secs = soon\n").unwrap();
        assert_eq!(adapter.get_int("trading", "interval_secs", 60), 60);
        assert_eq!(adapter.get_double("trading", "interval_secs", 60.0), 60.0);
    }

    #[test]
    fn bool_spellings() {
        let adapter = FileConfigAdapter::from_string(
            "[simulation]\na = true\nb = yes\nc = 1\nd = false\ne = no\nf = 0\n",
        )
        .unwrap();
        assert!(adapter.get_bool("simulation", "a", false));
        assert!(adapter.get_bool("simulation", "b", false));
        assert!(adapter.get_bool("simulation", "c", false));
        assert!(!adapter.get_bool("simulation", "d", true));
        assert!(!adapter.get_bool("simulation", "e", true));
        assert!(!adapter.get_bool("simulation", "f", true));
    }

    #[test]
    fn unparseable_bool_uses_default() {
        let adapter = FileConfigAdapter::from_string("[simulation]\nenabled = maybe\n").unwrap();
        assert!(adapter.get_bool("simulation", "enabled", true));
        assert!(!adapter.get_bool("simulation", "enabled", false));
    }

    #[test]
    fn from_file_reads_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", SAMPLE).unwrap();
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(adapter.get_int("trading", "slippage_bps", 0), 25);
    }

    #[test]
    fn from_file_missing_file_errors() {
        assert!(FileConfigAdapter::from_file("/nonexistent/path/bot.ini").is_err());
    }
}
