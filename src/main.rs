mod config;
mod errors;
mod handlers;
mod models;
mod services;
mod ui;

use anyhow::{Context, Result};
use dotenv::dotenv;
use std::io;
use std::sync::Arc;

use config::{Settings, DEFAULT_SYSTEM_PROMPT};
use handlers::ConversationHandler;
use services::food_log::{self, DEFAULT_FOOD_LOG};
use services::{
    AttributionTransport, ConfigStore, CredentialResolver, HttpTransport, OpenRouterService,
    TerminalPrompter, Transport,
};

#[tokio::main]
async fn main() {
    // Load environment variables first so RUST_LOG from .env applies
    dotenv().ok();

    // Initialize logger
    env_logger::init();

    log::info!("🚀 Starting IngredientIQ...");

    if let Err(e) = run().await {
        log::error!("❌ {:?}", e);
        if let Err(print_err) = ui::render_error(&mut io::stderr(), "Error", &format!("{:#}", e)) {
            log::warn!("⚠️ Could not print error: {}", print_err);
        }
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let settings = Settings::from_env();
    let mut stdout = io::stdout();
    let mut prompter = TerminalPrompter::new();

    ui::print_banner(&mut stdout)?;

    let store = match &settings.config_path {
        Some(path) => ConfigStore::new(path),
        None => ConfigStore::default_location()?,
    };
    log::debug!("Config store: {}", store.path().display());

    let credentials = CredentialResolver::from_process_env(&store)
        .resolve(&mut prompter)
        .context("Failed to resolve API credentials")?;

    let system_prompt = match &settings.system_prompt_path {
        Some(path) => food_log::load(path).context("Error reading system prompt")?,
        None => DEFAULT_SYSTEM_PROMPT.to_string(),
    };

    let default_log = food_log::last_used_or(&store, DEFAULT_FOOD_LOG);
    let food_log = food_log::select_and_load(
        settings.food_log_path.clone(),
        &default_log,
        &mut prompter,
        &mut stdout,
    )
    .context("Error reading food log")?;
    log::info!("✅ Food log loaded from {}", food_log.path.display());

    food_log::remember_last_used(&store, &food_log.path);

    let http = HttpTransport::with_timeout(settings.request_timeout)
        .context("Failed to build HTTP client")?;
    let http: Arc<dyn Transport> = Arc::new(http);
    let transport: Arc<dyn Transport> = Arc::new(AttributionTransport::new(Some(http)));
    let openrouter = Arc::new(OpenRouterService::new(credentials, transport));
    log::info!("✅ OpenRouter service initialized with model: {}", settings.model);

    let mut handler = ConversationHandler::new(
        openrouter,
        settings.model.clone(),
        Some(system_prompt.as_str()),
        &food_log.content,
    );

    ui::status(&mut stdout, "Analyzing your food log...")?;
    handler
        .first_analysis(&mut stdout)
        .await
        .context("Error sending request to API")?;

    handler.run(&mut prompter, &mut stdout).await;

    log::info!("🛑 Shutting down...");
    Ok(())
}
