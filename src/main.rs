use clap::Parser;
use rhm_plot::config::toml_config::Overrides;
use rhm_plot::core::ConfigProvider;
use rhm_plot::utils::{logger, validation::Validate};
use rhm_plot::{
    BitmapRenderer, CliConfig, LabelValues, LocalStorage, PlotEngine, PlotError, PlotPipeline,
    TomlConfig,
};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting rhm-plot");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    println!("{} {}", config.num_keys, config.num_churn_ops);

    let result = match &config.config {
        Some(path) => {
            load_file_config(&config, path).and_then(|file_config| execute(&config, file_config))
        }
        None => execute(&config, config.clone()),
    };

    if let Err(e) = result {
        // 記錄詳細錯誤信息
        tracing::error!(
            "❌ Plotting failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        std::process::exit(e.severity().exit_code());
    }

    Ok(())
}

fn load_file_config(cli: &CliConfig, path: &str) -> Result<TomlConfig, PlotError> {
    tracing::info!("📁 Loading configuration from: {}", path);

    let mut file_config = TomlConfig::from_file(path)?;
    file_config.apply_overrides(&Overrides::from(cli));
    Ok(file_config)
}

fn execute<C: ConfigProvider + Validate>(cli: &CliConfig, config: C) -> Result<(), PlotError> {
    // 驗證配置
    config.validate()?;

    let (width, height) = config.image_size();
    tracing::debug!(
        "Input: {}, output: {}, image: {}x{}, charts: {}",
        config.input_dir(),
        config.output_dir(),
        width,
        height,
        config.charts().len()
    );

    if cli.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.input_dir(), config.output_dir());
    let labels = LabelValues::new(cli.num_keys, cli.num_churn_ops);
    let pipeline = PlotPipeline::new(storage, BitmapRenderer::new(width, height), config, labels);
    let engine = PlotEngine::new_with_monitoring(pipeline, cli.monitor);

    if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no images will be written");
        let plans = engine.plan()?;
        println!("{}", serde_json::to_string_pretty(&plans)?);
        return Ok(());
    }

    let outputs = engine.run()?;
    tracing::info!("✅ Rendered {} charts", outputs.len());
    for output in outputs {
        println!("📁 Output saved to: {}", output);
    }

    Ok(())
}
