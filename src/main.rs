use clap::Parser;
use jsonld_safe::core::ConfigProvider;
use jsonld_safe::utils::error::{ErrorSeverity, JsonLdError};
use jsonld_safe::utils::{logger, validation::Validate};
use jsonld_safe::{CliConfig, LocalStorage, RenderEngine, TomlConfig};

fn main() -> anyhow::Result<()> {
    let mut config = CliConfig::parse();

    // 配置檔要在日誌初始化之前載入，因為它可以選擇日誌格式
    if let Some(path) = config.config.clone() {
        let file = match TomlConfig::from_file(&path) {
            Ok(file) => file,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        };
        if let Err(e) = file.validate().and_then(|_| config.merge_toml(&file)) {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting jsonld-safe");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let storage = LocalStorage::new(config.input.clone(), config.output.clone());
    let engine = RenderEngine::new(storage, config);

    match engine.run() {
        Ok(_) => {
            tracing::info!("✅ JSON-LD rendered successfully");
            if let Some(path) = engine.config().output_path() {
                tracing::info!("📁 Output saved to: {}", path);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Rendering failed: {} (Category: {:?}, Severity: {:?})",
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

fn exit_code(e: &JsonLdError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
