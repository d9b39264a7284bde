use clap::Parser;
use price_comparison::domain::ports::ConfigProvider;
use price_comparison::utils::{logger, validation::Validate};
use price_comparison::{
    CliConfig, CommandRunner, ModelPriceSource, ReportError, ReportGenerator, Result, TomlConfig,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting price-comparison");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let result = match &cli.config {
        Some(path) => run_with_file(path, &cli).await,
        None => run(&cli, cli.monitor).await,
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Report failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 建議: {}", e.recovery_suggestion());

        std::process::exit(e.exit_code());
    }

    Ok(())
}

async fn run_with_file(path: &str, cli: &CliConfig) -> Result<()> {
    tracing::info!("📁 Loading configuration from: {}", path);

    let mut config = TomlConfig::from_file(path).map_err(|e| match e {
        ReportError::IoError(io) => ReportError::ConfigError {
            message: format!("cannot read '{}': {}", path, io),
        },
        other => other,
    })?;

    // 命令列覆蓋設定
    if let Some(format) = cli.format {
        config.set_output_format(format);
    }
    let monitor = cli.monitor || config.monitoring_enabled();

    run(&config, monitor).await
}

async fn run<C: ConfigProvider + Validate>(config: &C, monitor: bool) -> Result<()> {
    // 驗證配置
    config.validate()?;

    if monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let runner = CommandRunner::from_config(config);
    tracing::info!(
        "Pricing model: {} {}",
        runner.program(),
        config.model_args().join(" ")
    );

    let source = ModelPriceSource::new(runner, config.horizon(), config.rate());
    let generator = ReportGenerator::from_config(source, config).with_monitoring(monitor);

    let report = generator.collect().await;

    // 全部模型呼叫結束後才鎖定 stdout
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    generator.write_report(&report, config.output_format(), &mut out)?;

    tracing::info!("✅ Report complete");
    Ok(())
}
