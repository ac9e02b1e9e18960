use crate::validation::validate_email;
use anyhow::{Context, Result};
use colored::Colorize;

use super::CommandContext;
use super::utils::read_password;

pub async fn handle_login(
    ctx: &CommandContext,
    email: String,
    password: Option<String>,
) -> Result<()> {
    validate_email(&email)?;
    let password = match password {
        Some(p) => p,
        None => read_password()?,
    };

    let grant = ctx
        .api
        .login(email.trim(), &password)
        .await
        .context("Login failed")?;
    ctx.session.login(grant.token, grant.email.clone())?;

    println!("{} {}", "Logged in as".green(), grant.email.cyan());
    Ok(())
}

pub fn handle_logout(ctx: &CommandContext) -> Result<()> {
    let was_authenticated = ctx.session.is_authenticated();
    ctx.session.logout()?;
    if was_authenticated {
        println!("{}", "Logged out".green());
    } else {
        println!("Not logged in.");
    }
    Ok(())
}

pub fn handle_whoami(ctx: &CommandContext) -> Result<()> {
    match ctx.session.identity() {
        Some(identity) => println!("{}", identity.cyan()),
        None => anyhow::bail!("Not logged in"),
    }
    Ok(())
}
