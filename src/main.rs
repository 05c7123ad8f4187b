use clap::Parser;
use pagespeed_tracker::domain::ports::{ConfigProvider, MetricsApi, Storage};
use pagespeed_tracker::utils::error::TrackerError;
use pagespeed_tracker::utils::logger;
use pagespeed_tracker::{
    CliConfig, Command, FormData, HtmlPage, HttpMetricsApi, LocalStorage, MetricsTracker,
    Settings,
};

fn fail(e: &TrackerError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.severity().exit_code().max(1));
}

async fn save_page(settings: &Settings, page: &HtmlPage) {
    let storage = LocalStorage::new(settings.output_path().to_string());
    match storage
        .write_file(&settings.page_filename, page.to_html().as_bytes())
        .await
    {
        Ok(()) => {
            let path = storage.full_path(&settings.page_filename);
            tracing::info!("📁 Page saved to: {}", path);
            println!("📁 {}", path);
        }
        Err(e) => fail(&e),
    }
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting pagespeed-tracker");
    tracing::debug!("CLI config: {:?}", cli);

    let settings = match cli.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            fail(&e)
        }
    };

    let api = match HttpMetricsApi::new(settings.api_base_url(), settings.request_timeout()) {
        Ok(api) => api.with_save_error_message(settings.labels.save_failed.clone()),
        Err(e) => fail(&e),
    };
    let tracker = MetricsTracker::new(api)
        .with_list_limit(settings.list_limit())
        .with_labels(settings.labels.clone());

    match &cli.command {
        Command::Health => match tracker.api().health().await {
            Ok(()) => {
                tracing::info!("✅ {} is healthy", settings.api_base_url());
                println!("ok");
            }
            Err(e) => fail(&e),
        },
        Command::List => {
            let mut page = HtmlPage::new();
            if !tracker.load_metrics(&mut page).await {
                tracing::warn!("Could not load metrics from {}", settings.api_base_url());
            }
            println!("{} records", page.items().len());
            save_page(&settings, &page).await;
        }
        Command::Submit { fields } => {
            let form = match FormData::from_pairs(fields) {
                Ok(form) => form,
                Err(e) => fail(&e),
            };

            let mut page = HtmlPage::new();
            let outcome = tracker.submit(&form, &mut page).await;
            println!("{}", page.status());
            save_page(&settings, &page).await;

            if !outcome.is_saved() {
                std::process::exit(outcome.exit_code());
            }
        }
    }
}
