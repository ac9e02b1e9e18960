use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use taskora::cli::handlers::{self, AddParams, CommandContext};
use taskora::cli::{Cli, Commands, SettingsAction};
use taskora::config::TaskoraConfig;
use taskora::session::SessionGate;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = TaskoraConfig::load(cli.config.as_deref().map(Path::new))
        .context("Failed to load config")?
        .with_api_url(cli.api_url.clone());
    config.validate().context("Invalid API URL")?;

    let log_file = config.log_file.as_deref().map(PathBuf::from);
    let _log_guard = taskora::logging::init(cli.verbose, log_file.as_deref());

    let session_path = cli
        .session_file
        .as_deref()
        .map(PathBuf::from)
        .or_else(TaskoraConfig::default_session_path);
    let session = match session_path {
        Some(path) => SessionGate::with_file(&path)
            .with_context(|| format!("Failed to read session from {}", path.display()))?,
        None => SessionGate::new(),
    };

    let ctx = CommandContext::new(config, session)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let local = tokio::task::LocalSet::new();
    local
        .block_on(&runtime, run(&ctx, cli.command))
        .map_err(handlers::with_login_hint)
}

async fn run(ctx: &CommandContext, command: Commands) -> Result<()> {
    match command {
        Commands::Login { email, password } => handlers::handle_login(ctx, email, password).await,
        Commands::Logout => handlers::handle_logout(ctx),
        Commands::Whoami => handlers::handle_whoami(ctx),
        Commands::Tasks { view, json } => handlers::handle_tasks(ctx, view, json).await,
        Commands::Add {
            title,
            due,
            estimate,
            priority,
            description,
            json,
        } => {
            let params = AddParams {
                title,
                due,
                estimate,
                priority,
                description,
                json,
            };
            handlers::handle_add(ctx, params).await
        }
        Commands::Toggle { id } => handlers::handle_toggle(ctx, id).await,
        Commands::Delete { id } => handlers::handle_delete(ctx, id).await,
        Commands::Recurring {
            title,
            estimate,
            every,
        } => handlers::handle_recurring(ctx, title, estimate, every).await,
        Commands::Notifications { unread, json } => {
            handlers::handle_notifications(ctx, unread, json).await
        }
        Commands::Read { id } => handlers::handle_read(ctx, id).await,
        Commands::ReadAll => handlers::handle_read_all(ctx).await,
        Commands::Snooze { id, minutes } => handlers::handle_snooze(ctx, id, minutes).await,
        Commands::Watch { interval } => handlers::handle_watch(ctx, interval).await,
        Commands::Settings { action } => match action {
            SettingsAction::Show { json } => handlers::handle_settings_show(ctx, json).await,
            SettingsAction::Set {
                before_hours,
                percent,
                min_gap,
            } => handlers::handle_settings_set(ctx, before_hours, percent, min_gap).await,
        },
        Commands::TelegramLink => handlers::handle_telegram_link(ctx).await,
    }
}
