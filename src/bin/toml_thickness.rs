use anyhow::Context;
use clap::Parser;
use salt_thickness::adapters::lmk::parse_lmk;
use salt_thickness::core::ConfigProvider;
use salt_thickness::utils::error::ErrorSeverity;
use salt_thickness::utils::{logger, validation::Validate};
use salt_thickness::{LocalStorage, ThicknessEngine, ThicknessPipeline, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-thickness")]
#[command(about = "Salt thickness calculation driven by a TOML job file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "salt-thickness.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override parallel setting from config
    #[arg(long)]
    parallel: Option<bool>,

    /// Dry run - parse the horizon files and report, without writing output
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if config.json_logs() {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based salt thickness job");
    tracing::info!("📁 Configuration loaded from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(parallel) = args.parallel {
        let processing = config
            .processing
            .get_or_insert(salt_thickness::config::toml_config::ProcessingConfig { parallel: None });
        processing.parallel = Some(parallel);
        tracing::info!("🔧 Parallel mode overridden to: {}", parallel);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No output will be written");
        perform_dry_run(&config).await?;
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::default();
    let pipeline = ThicknessPipeline::new(storage, config);
    let engine = ThicknessEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Job completed successfully!");
            println!("✅ Salt thickness written to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Job failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    tracing::info!("📋 Job: {}", config.job.name);
    if let Some(description) = &config.job.description {
        tracing::info!("   {}", description);
    }
    for (i, pair) in config.input.pairs.iter().enumerate() {
        tracing::info!("   Pair {}: top={} bottom={}", i + 1, pair.top, pair.bottom);
    }
    tracing::info!(
        "   Output: {} ({}, skip zero: {}, parallel: {})",
        config.output_path(),
        config.output_format(),
        config.skip_zero_thickness(),
        config.parallel()
    );
}

async fn perform_dry_run(config: &TomlConfig) -> anyhow::Result<()> {
    for file in config.horizon_files() {
        let text = tokio::fs::read_to_string(file)
            .await
            .with_context(|| format!("reading horizon file {}", file))?;
        let content = parse_lmk(file, &text)?;
        tracing::info!(
            "   {}: {} records, {} usable picks",
            file,
            content.record_count,
            content.picks.len()
        );
    }
    tracing::info!("✅ Dry run completed - all horizon files parse cleanly");
    Ok(())
}
