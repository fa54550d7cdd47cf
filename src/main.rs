use salt_thickness::utils::error::{ErrorSeverity, ThicknessError};
use salt_thickness::utils::{logger, validation::Validate};
use salt_thickness::{CliConfig, LocalStorage, ThicknessEngine, ThicknessPipeline};

fn exit_code(e: &ThicknessError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::from_args();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting salt-thickness");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Arguments bad: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!(
            "Usage: salt-thickness T1.lmk B1.lmk [T2.lmk B2.lmk ...] --output thickness.lmk"
        );
        std::process::exit(exit_code(&e));
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::default();
    let pipeline = ThicknessPipeline::new(storage, config);
    let engine = ThicknessEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Salt thickness calculation completed");
            println!("✅ Salt thickness written to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Salt thickness calculation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let code = exit_code(&e);
            if code > 0 {
                std::process::exit(code);
            }
        }
    }

    Ok(())
}
