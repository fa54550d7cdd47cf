use crate::domain::model::OutputFormat;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, ThicknessError};
use crate::utils::validation::{
    validate_file_extensions, validate_files_exist, validate_horizon_pairs, validate_non_empty_string,
    validate_path, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub job: JobConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
    pub processing: Option<ProcessingConfig>,
    pub monitoring: Option<MonitoringConfig>,

    /// Flattened `top, bottom, top, bottom...` paths, resolved against `input.base_dir`.
    #[serde(skip)]
    horizon_files: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub base_dir: Option<String>,
    pub pairs: Vec<HorizonPairConfig>,
}

/// One body delimited by a top and a bottom horizon file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HorizonPairConfig {
    pub top: String,
    pub bottom: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    #[serde(default)]
    pub format: OutputFormat,
    pub skip_zero_thickness: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    pub parallel: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub json_logs: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ThicknessError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        let mut config: TomlConfig =
            toml::from_str(&processed_content).map_err(|e| ThicknessError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;
        config.horizon_files = config.resolve_horizon_files();
        Ok(config)
    }

    /// 替換環境變數 (例如 ${DATA_DIR})；未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ThicknessError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    fn resolve_horizon_files(&self) -> Vec<String> {
        let resolve = |file: &str| match &self.input.base_dir {
            Some(base) => Path::new(base).join(file).to_string_lossy().into_owned(),
            None => file.to_string(),
        };

        self.input
            .pairs
            .iter()
            .flat_map(|pair| [resolve(&pair.top), resolve(&pair.bottom)])
            .collect()
    }

    /// 驗證配置的合理性 (不檢查檔案是否存在)
    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("job.name", &self.job.name)?;
        validate_horizon_pairs("input.pairs", &self.horizon_files)?;
        validate_file_extensions("input.pairs", &self.horizon_files, &["lmk"])?;
        validate_path("output.path", &self.output.path)?;
        Ok(())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.json_logs)
            .unwrap_or(false)
    }

    pub fn pair_count(&self) -> usize {
        self.input.pairs.len()
    }
}

impl ConfigProvider for TomlConfig {
    fn horizon_files(&self) -> &[String] {
        &self.horizon_files
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn output_format(&self) -> OutputFormat {
        self.output.format
    }

    fn skip_zero_thickness(&self) -> bool {
        self.output.skip_zero_thickness.unwrap_or(false)
    }

    fn parallel(&self) -> bool {
        self.processing
            .as_ref()
            .and_then(|p| p.parallel)
            .unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()?;
        validate_files_exist("input.pairs", &self.horizon_files)
    }
}
