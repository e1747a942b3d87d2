use board_export::core::report::render_summary;
use board_export::utils::error::ErrorSeverity;
use board_export::utils::{logger, validation::Validate};
use board_export::{
    BoardPipeline, CliConfig, Command, ExportConfig, ExportEngine, ExportError, LocalStorage,
    MondayClient,
};
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(cli.verbose, cli.log_json);

    tracing::info!("Starting board-export");

    let result = match cli.resolve() {
        Ok(config) => run(cli.command(), config).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Board export failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

async fn run(command: Command, config: ExportConfig) -> Result<(), ExportError> {
    config.validate()?;
    tracing::debug!("Resolved config: {:?}", config.clone().redacted());

    match command {
        Command::Groups => list_groups(&config).await,
        Command::Export => export(config).await,
    }
}

async fn list_groups(config: &ExportConfig) -> Result<(), ExportError> {
    use board_export::core::ConfigProvider;

    let client = MondayClient::new(config.api_url(), config.api_token(), config.timeout())?;
    let groups = client.fetch_groups(config.board_id()).await?;

    println!("=== GRUPOS ({}) ===", groups.len());
    for group in groups {
        println!(
            "- {} (ID: {}, Color: {})",
            group.title,
            group.id,
            group.color.as_deref().unwrap_or("N/A")
        );
    }
    Ok(())
}

async fn export(config: ExportConfig) -> Result<(), ExportError> {
    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = BoardPipeline::new(storage, config)?;
    let engine = ExportEngine::new(pipeline);

    let outcome = engine.run().await?;

    println!("{}", render_summary(&outcome.summary));
    println!("✅ Datos JSON guardados en {}", outcome.json_path);
    match &outcome.csv_path {
        Some(path) => println!("✅ Datos CSV con grupos guardados en {}", path),
        None => println!("No hay elementos para exportar"),
    }
    Ok(())
}
