use mealplan_telegram_rs::bot_command_handlers::start;
use mealplan_telegram_rs::data_types::{BotConfig, Command, HandlerResult};
use mealplan_telegram_rs::shared_main::{
    callback_handler, logger_init, send_shutdown_broadcast, send_startup_broadcast,
};

use clap::Parser;
use std::{collections::BTreeMap, fs, path::PathBuf};
use teloxide::{dispatching::UpdateHandler, prelude::*};

/// Telegram bot relaying "next meal" requests to a meal planning service.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// The telegram bot token to be used
    #[arg(short, long, env)]
    token: String,
    /// Base URL of the meal planning service
    #[arg(
        short,
        long,
        env = "MEAL_SERVICE_URL",
        default_value = "http://localhost:8080"
    )]
    service_url: String,
    /// JSON file mapping chat ids to user display names
    #[arg(short, long, env = "KNOWN_USERS_FILE")]
    users_file: PathBuf,
    /// Enable verbose logging (mostly performance metrics){n}[SETS env: RUST_LOG=debug]
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if args.verbose {
        std::env::set_var("RUST_LOG", "debug");
    }

    logger_init(module_path!());
    log::info!("Starting bot...");

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Cannot load user config {}: {}", args.users_file.display(), e);
            std::process::exit(1);
        }
    };

    if config.known_users.is_empty() {
        log::warn!("User config is empty, nobody will be able to request meals");
    }

    let bot = Bot::new(args.token);

    send_startup_broadcast(&bot, &config).await;
    log::info!("Ready.");

    Dispatcher::builder(bot.clone(), schema())
        .dependencies(dptree::deps![config.clone()])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    send_shutdown_broadcast(&bot, &config).await;
}

fn load_config(args: &Args) -> Result<BotConfig, Box<dyn std::error::Error>> {
    let data = fs::read_to_string(&args.users_file)?;
    let known_users: BTreeMap<String, String> = serde_json::from_str(&data)?;

    Ok(BotConfig {
        meal_service_url: args.service_url.clone(),
        known_users,
    })
}

fn schema() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    let command_handler =
        teloxide::filter_command::<Command, _>().branch(dptree::case![Command::Start].endpoint(start));

    let message_handler = Update::filter_message().branch(command_handler);
    let callback_query_handler = Update::filter_callback_query().endpoint(callback_handler);

    dptree::entry()
        .branch(message_handler)
        .branch(callback_query_handler)
}
