use crate::config::validate_provider;
use crate::core::render::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::core::{ChartJob, ConfigProvider};
use crate::utils::error::{PlotError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub paths: Option<PathsConfig>,
    pub render: Option<RenderConfig>,
    #[serde(default)]
    pub charts: Vec<ChartJob>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    pub input_dir: Option<String>,
    pub output_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub all_series: Option<bool>,
}

/// 命令列可覆蓋的設定
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub input_dir: Option<String>,
    pub output_dir: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub all_series: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PlotError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PlotError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${BENCH_DIR})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PlotError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        let paths = self.paths.get_or_insert_with(PathsConfig::default);
        if let Some(input_dir) = &overrides.input_dir {
            paths.input_dir = Some(input_dir.clone());
        }
        if let Some(output_dir) = &overrides.output_dir {
            paths.output_dir = Some(output_dir.clone());
        }

        let render = self.render.get_or_insert_with(RenderConfig::default);
        if overrides.width.is_some() {
            render.width = overrides.width;
        }
        if overrides.height.is_some() {
            render.height = overrides.height;
        }
        if overrides.all_series {
            render.all_series = Some(true);
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn input_dir(&self) -> &str {
        self.paths
            .as_ref()
            .and_then(|p| p.input_dir.as_deref())
            .unwrap_or(".")
    }

    fn output_dir(&self) -> &str {
        self.paths
            .as_ref()
            .and_then(|p| p.output_dir.as_deref())
            .unwrap_or(".")
    }

    fn charts(&self) -> &[ChartJob] {
        &self.charts
    }

    fn image_size(&self) -> (u32, u32) {
        let render = self.render.as_ref();
        (
            render.and_then(|r| r.width).unwrap_or(DEFAULT_WIDTH),
            render.and_then(|r| r.height).unwrap_or(DEFAULT_HEIGHT),
        )
    }

    fn all_series(&self) -> bool {
        self.render
            .as_ref()
            .and_then(|r| r.all_series)
            .unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC_CONFIG: &str = r#"
[render]
width = 1280
height = 720

[[charts]]
name = "insert"
input = "rhm-insert.txt"
output = "plot_insert.png"
x_label = "percent of keys inserted ({num_keys})"
y_label = "throughput (num inserts per sec)"
title = "rhm insert"

[[charts]]
name = "churn"
input = "rhm-churn.txt"
output = "plot_churn.png"
y_column = "y_1"
x_label = "percent of churn test({num_churn_ops})"
y_label = "throughput (num ops per sec)"
"#;

    #[test]
    fn test_parse_basic_toml_config() {
        let config = TomlConfig::from_toml_str(BASIC_CONFIG).unwrap();

        assert_eq!(config.charts.len(), 2);
        assert_eq!(config.charts[0].x_column, "x_0");
        assert_eq!(config.charts[0].title.as_deref(), Some("rhm insert"));
        assert_eq!(config.charts[1].y_column, "y_1");
        assert_eq!(config.image_size(), (1280, 720));
        assert_eq!(config.input_dir(), ".");
        assert!(!config.all_series());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("RHM_PLOT_TEST_BENCH_DIR", "/tmp/bench");

        let toml_content = r#"
[paths]
input_dir = "${RHM_PLOT_TEST_BENCH_DIR}"
output_dir = "${RHM_PLOT_TEST_UNSET_VAR}"

[[charts]]
name = "insert"
input = "rhm-insert.txt"
output = "plot_insert.png"
x_label = "x"
y_label = "y"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.input_dir(), "/tmp/bench");
        assert_eq!(config.output_dir(), "${RHM_PLOT_TEST_UNSET_VAR}");

        std::env::remove_var("RHM_PLOT_TEST_BENCH_DIR");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[render]
width = 20

[[charts]]
name = "insert"
input = "rhm-insert.txt"
output = "plot_insert.png"
x_label = "x"
y_label = "y"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let empty = TomlConfig::from_toml_str("[render]\nwidth = 640\n").unwrap();
        assert!(matches!(
            empty.validate(),
            Err(PlotError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_invalid_toml() {
        let result = TomlConfig::from_toml_str("[[charts]\nname = ");
        assert!(matches!(
            result,
            Err(PlotError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = TomlConfig::from_toml_str(BASIC_CONFIG).unwrap();
        config.apply_overrides(&Overrides {
            input_dir: Some("bench".to_string()),
            output_dir: None,
            width: Some(800),
            height: None,
            all_series: true,
        });

        assert_eq!(config.input_dir(), "bench");
        assert_eq!(config.output_dir(), ".");
        assert_eq!(config.image_size(), (800, 720));
        assert!(config.all_series());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC_CONFIG.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.charts[1].name, "churn");
    }
}
