//! System status command.

use anyhow::Result;
use console::style;

use crate::state::AppState;

/// Display row counts and configuration for the local instance.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let (characters,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM characters")
        .fetch_one(&state.db_pool.reader)
        .await?;
    let (messages,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM messages")
        .fetch_one(&state.db_pool.reader)
        .await?;
    let (human,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM messages WHERE is_user = 1")
        .fetch_one(&state.db_pool.reader)
        .await?;
    let (users,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(&state.db_pool.reader)
        .await?;

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "model": state.config.llm.model,
            "characters": characters,
            "messages": {
                "total": messages,
                "human": human,
                "generated": messages - human,
            },
            "users": users,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Senpai v{}",
        style("⚡").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("  Data dir:   {}", style(state.data_dir.display()).dim());
    println!("  Model:      {}", style(&state.config.llm.model).cyan());
    println!();
    println!("  Characters: {}", style(characters).bold());
    println!(
        "  Messages:   {} ({} human / {} generated)",
        style(messages).bold(),
        human,
        messages - human
    );
    println!("  Users:      {}", style(users).bold());
    println!();

    Ok(())
}
