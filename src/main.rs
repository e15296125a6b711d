use clap::Parser;
use contact_normalizer::adapters::sink;
use contact_normalizer::core::etl::RunSummary;
use contact_normalizer::core::ConfigProvider;
use contact_normalizer::utils::error::ErrorSeverity;
use contact_normalizer::utils::{logger, validation::Validate};
use contact_normalizer::{
    CliConfig, ConvertEngine, LocalStorage, OutputFormat, Result, SpreadsheetPipeline, TomlConfig,
};

async fn run<C: ConfigProvider + Validate>(config: C) -> Result<RunSummary> {
    config.validate()?;

    let source = LocalStorage::new(".".to_string());
    let sink = LocalStorage::new(config.output_path().to_string());
    let preview_rows = config.preview_rows();
    let pipeline = SpreadsheetPipeline::new(source, sink, config);

    ConvertEngine::new(pipeline)
        .with_preview(preview_rows)
        .run()
        .await
}

async fn execute(cli: CliConfig) -> Result<RunSummary> {
    match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path);
            let config = TomlConfig::from_file(path)?.with_input(cli.input.as_deref());
            tracing::debug!("TOML config: {:?}", config);
            run(config).await
        }
        None => run(cli).await,
    }
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting contact-normalizer");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    match execute(cli).await {
        Ok(summary) => {
            if !summary.preview.is_empty() {
                let preview = sink::render(&summary.preview, OutputFormat::Csv)?;
                println!("{}", String::from_utf8_lossy(&preview).trim_end());
            }

            tracing::info!(
                "✅ Exported {} of {} rows ({} DNI values defaulted to 0)",
                summary.stats.rows_out,
                summary.stats.rows_in,
                summary.stats.defaulted_dni
            );
            match &summary.stats.phone_column {
                Some(column) => tracing::info!("📞 Phone numbers taken from '{}'", column),
                None => tracing::info!("📞 No phone column found, telefono left empty"),
            }
            for output in &summary.outputs {
                println!("📁 Output saved to: {}", output);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Conversion failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

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
