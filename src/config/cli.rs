use crate::domain::model::OutputFormat;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_file_extensions, validate_files_exist, validate_horizon_pairs, validate_path,
    validate_required_field, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};

const LEGACY_OUTPUT_PREFIX: &str = "output=";

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "salt-thickness")]
#[command(about = "Net salt thickness per grid location from top/bottom horizon picks")]
#[command(override_usage = "salt-thickness T1.lmk B1.lmk [T2.lmk B2.lmk ...] --output <OUTPUT>")]
pub struct CliConfig {
    /// Horizon files in top/bottom order: T1.lmk B1.lmk [T2.lmk B2.lmk ...]
    #[arg(value_name = "HORIZON")]
    pub horizon_files: Vec<String>,

    /// Output thickness file (a trailing `output=<path>` argument also works)
    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Lmk)]
    pub format: OutputFormat,

    /// Leave locations with zero net thickness out of the output
    #[arg(long)]
    pub skip_zero: bool,

    /// Process locations in parallel
    #[arg(long)]
    pub parallel: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per stage")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl CliConfig {
    pub fn from_args() -> Self {
        Self::parse().normalize()
    }

    /// Accepts the legacy `... B1.lmk output=thickness.lmk` form by moving a
    /// trailing `output=` argument into `output`.
    pub fn normalize(mut self) -> Self {
        if self.output.is_none() {
            let legacy = self
                .horizon_files
                .last()
                .and_then(|last| last.strip_prefix(LEGACY_OUTPUT_PREFIX))
                .map(str::to_string);
            if let Some(path) = legacy {
                self.horizon_files.pop();
                self.output = Some(path);
            }
        }
        self
    }
}

impl ConfigProvider for CliConfig {
    fn horizon_files(&self) -> &[String] {
        &self.horizon_files
    }

    fn output_path(&self) -> &str {
        self.output.as_deref().unwrap_or_default()
    }

    fn output_format(&self) -> OutputFormat {
        self.format
    }

    fn skip_zero_thickness(&self) -> bool {
        self.skip_zero
    }

    fn parallel(&self) -> bool {
        self.parallel
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_horizon_pairs("horizon_files", &self.horizon_files)?;
        validate_file_extensions("horizon_files", &self.horizon_files, &["lmk"])?;
        validate_files_exist("horizon_files", &self.horizon_files)?;

        let output = validate_required_field("output", &self.output)?;
        validate_path("output", output)?;

        Ok(())
    }
}
