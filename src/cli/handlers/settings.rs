use crate::model::ReminderDefaults;
use crate::validation::validate_reminder_defaults;
use anyhow::Result;
use colored::Colorize;

use super::CommandContext;

fn join(values: &[u32]) -> String {
    if values.is_empty() {
        return "-".to_string();
    }
    values
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_defaults(defaults: &ReminderDefaults) {
    println!(
        "Before due (hours): {}",
        join(&defaults.default_notify_before_hours).cyan()
    );
    println!(
        "Elapsed (percent):  {}",
        join(&defaults.default_notify_percentage).cyan()
    );
    println!(
        "Min gap (minutes):  {}",
        defaults.default_min_gap_minutes.to_string().cyan()
    );
}

pub async fn handle_settings_show(ctx: &CommandContext, json: bool) -> Result<()> {
    ctx.require_session()?;
    let defaults = ctx.api.reminder_defaults().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&defaults)?);
    } else {
        print_defaults(&defaults);
    }
    Ok(())
}

pub async fn handle_settings_set(
    ctx: &CommandContext,
    before_hours: Vec<u32>,
    percent: Vec<u32>,
    min_gap: Option<u32>,
) -> Result<()> {
    ctx.require_session()?;
    let mut defaults = ctx.api.reminder_defaults().await?;
    if !before_hours.is_empty() {
        defaults.default_notify_before_hours = before_hours;
    }
    if !percent.is_empty() {
        defaults.default_notify_percentage = percent;
    }
    if let Some(gap) = min_gap {
        defaults.default_min_gap_minutes = gap;
    }
    validate_reminder_defaults(&defaults)?;

    ctx.api.save_reminder_defaults(&defaults).await?;
    println!("{}", "Saved reminder defaults".green());
    print_defaults(&defaults);
    Ok(())
}

pub async fn handle_telegram_link(ctx: &CommandContext) -> Result<()> {
    ctx.require_session()?;
    let code = ctx.api.generate_telegram_link().await?;
    println!("Send this code to the Taskora bot: {}", code.cyan().bold());
    Ok(())
}
