use crate::board::NotificationCenter;
use anyhow::{Context, Result};
use colored::Colorize;
use std::rc::Rc;
use std::time::Duration;

use super::CommandContext;
use super::utils::{print_notification_list, print_unread};

fn center(ctx: &CommandContext) -> NotificationCenter {
    NotificationCenter::new(Rc::clone(&ctx.api))
}

pub async fn handle_notifications(ctx: &CommandContext, unread: bool, json: bool) -> Result<()> {
    ctx.require_session()?;
    let center = center(ctx);
    center.refresh().await?;

    let mut notifications = center.notifications();
    if unread {
        notifications.retain(|n| !n.read);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&notifications)?);
    } else {
        print_notification_list(&notifications);
        print_unread(center.unread_count());
    }
    Ok(())
}

pub async fn handle_read(ctx: &CommandContext, id: String) -> Result<()> {
    crate::validation::validate_id(&id)?;
    ctx.require_session()?;
    let center = center(ctx);
    center.refresh().await?;

    match center.toggle_read(&id).await? {
        Some(n) => {
            let state = if n.read { "read" } else { "unread" };
            println!("{} {} as {}", "Marked".green(), n.id.cyan(), state);
        }
        None => println!("{} {}", "No such notification:".yellow(), id),
    }
    print_unread(center.unread_count());
    Ok(())
}

pub async fn handle_read_all(ctx: &CommandContext) -> Result<()> {
    ctx.require_session()?;
    let center = center(ctx);
    center.refresh().await?;

    let changed = center.mark_all_read().await?;
    println!("{} {} notification(s) read", "Marked".green(), changed);
    Ok(())
}

pub async fn handle_snooze(ctx: &CommandContext, id: String, minutes: Option<u32>) -> Result<()> {
    let minutes = minutes.unwrap_or(ctx.config.sync.default_snooze_minutes);
    crate::validation::validate_snooze_minutes(minutes)?;
    crate::validation::validate_id(&id)?;
    ctx.require_session()?;
    let center = center(ctx);
    center.refresh().await?;

    if center.snooze(&id, minutes).await? {
        println!("{} {} for {}m", "Snoozed".green(), id.cyan(), minutes);
    } else {
        println!("{} {}", "No such notification:".yellow(), id);
    }
    Ok(())
}

/// Poll until Ctrl-C, printing the unread count whenever it changes.
pub async fn handle_watch(ctx: &CommandContext, interval_secs: Option<u64>) -> Result<()> {
    let interval = interval_secs
        .map(Duration::from_secs)
        .unwrap_or_else(|| ctx.config.sync.poll_interval());
    ctx.require_session()?;

    let center = center(ctx);
    center.refresh().await?;
    print_unread(center.unread_count());

    let watcher = center.counter().watch(print_unread);
    center.start_polling(interval)?;
    println!(
        "{}",
        format!("Polling every {}s, Ctrl-C to stop", interval.as_secs()).dimmed()
    );

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;

    center.counter().unwatch(watcher);
    center.shutdown().await;
    Ok(())
}
