//! CLI administration tool for basket-api.
//!
//! Inspects and removes stored baskets directly in Redis, without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Show a basket with its lines and totals
//! cargo run --bin admin -- basket show cart-1
//!
//! # Show how long a basket has left before it expires
//! cargo run --bin admin -- basket ttl cart-1
//!
//! # Delete a basket (asks for confirmation)
//! cargo run --bin admin -- basket delete cart-1
//!
//! # Check the Redis connection
//! cargo run --bin admin -- store ping
//! ```
//!
//! # Environment Variables
//!
//! - `REDIS_URL` or `REDIS_HOST`/`REDIS_PORT`/`REDIS_PASSWORD`/`REDIS_DB` (required)
//! - `BASKET_KEY_PREFIX`, `BASKET_TTL_SECONDS`, `REDIS_TIMEOUT_MS` (same defaults as the server)

use basket_api::config::{self, Config, mask_connection_string};
use basket_api::domain::entities::CustomerBasket;
use basket_api::domain::repositories::BasketRepository;
use basket_api::infrastructure::persistence::{BasketTtl, StoreBasketRepository};
use basket_api::infrastructure::store::{BasketStore, RedisBasketStore};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use rust_decimal::Decimal;
use std::sync::Arc;

/// CLI tool for managing stored baskets.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Inspect or remove baskets
    Basket {
        #[command(subcommand)]
        action: BasketAction,
    },

    /// Store operations
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
}

/// Basket subcommands.
#[derive(Subcommand)]
enum BasketAction {
    /// Show a basket with its lines and totals
    Show {
        /// Basket id
        id: String,
    },

    /// Show the remaining time-to-live of a basket
    Ttl {
        /// Basket id
        id: String,
    },

    /// Delete a basket
    Delete {
        /// Basket id
        id: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Store diagnostic subcommands.
#[derive(Subcommand)]
enum StoreAction {
    /// Check the Redis connection
    Ping,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let redis_url = config
        .redis_url
        .clone()
        .context("REDIS_URL (or REDIS_HOST) must be set")?;

    let store = RedisBasketStore::connect(
        &redis_url,
        &config.basket_key_prefix,
        config.redis_timeout(),
    )
    .await
    .with_context(|| {
        format!(
            "Failed to connect to Redis at {}",
            mask_connection_string(&redis_url)
        )
    })?;
    let store = Arc::new(store);

    match cli.command {
        Commands::Basket { action } => handle_basket_action(action, store, &config).await?,
        Commands::Store { action } => handle_store_action(action, store, &redis_url).await?,
    }

    Ok(())
}

/// Dispatches basket commands.
async fn handle_basket_action(
    action: BasketAction,
    store: Arc<RedisBasketStore>,
    config: &Config,
) -> Result<()> {
    let repo = StoreBasketRepository::new(
        store.clone(),
        BasketTtl::from_secs(config.basket_ttl_seconds),
    );

    match action {
        BasketAction::Show { id } => show_basket(&repo, &id).await?,
        BasketAction::Ttl { id } => show_ttl(&store, &id).await?,
        BasketAction::Delete { id, yes } => delete_basket(&repo, &id, yes).await?,
    }

    Ok(())
}

/// Prints a basket as a table of lines followed by totals.
///
/// # Output Format
///
/// ```text
/// 🧺 Basket cart-1
///
///   Product          Name                       Qty   Unit price   Line total
///   ──────────────────────────────────────────────────────────────────────────
///   p1               Widget                       2         9.99        19.98
///
///   Delivery method: 1
///   Subtotal:        19.98
///   Shipping:        5.00
///   Total:           24.98
/// ```
async fn show_basket(repo: &StoreBasketRepository, id: &str) -> Result<()> {
    let basket = repo
        .get_basket(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read basket: {}", e))?;

    let Some(basket) = basket else {
        println!("{}", format!("  Basket '{}' not found", id).yellow());
        return Ok(());
    };

    println!("{}", format!("🧺 Basket {}", basket.id).bright_blue().bold());
    println!();

    print_lines(&basket);

    println!();
    println!(
        "  Delivery method: {}",
        basket
            .delivery_method_id
            .map(|m| m.to_string())
            .unwrap_or_else(|| "none".to_string())
            .cyan()
    );
    println!(
        "  Subtotal:        {}",
        format_amount(basket.subtotal()).bright_white()
    );
    println!(
        "  Shipping:        {}",
        basket.shipping_price.to_string().bright_white()
    );
    println!(
        "  Total:           {}",
        format_amount(basket.total()).bright_green().bold()
    );
    println!();

    Ok(())
}

fn print_lines(basket: &CustomerBasket) {
    if basket.is_empty() {
        println!("{}", "  (no items)".bright_black());
        return;
    }

    println!(
        "  {:<16} {:<26} {:>4} {:>12} {:>12}",
        "Product".bright_white().bold(),
        "Name".bright_white().bold(),
        "Qty".bright_white().bold(),
        "Unit price".bright_white().bold(),
        "Line total".bright_white().bold()
    );
    println!("  {}", "─".repeat(74).bright_black());

    for item in &basket.items {
        println!(
            "  {:<16} {:<26} {:>4} {:>12} {:>12}",
            item.product_id.bright_black(),
            item.name.cyan(),
            item.quantity,
            item.unit_price.to_string(),
            format_amount(item.line_total())
        );
    }

    println!();
    println!(
        "  Items: {}",
        basket.item_count().to_string().bright_white().bold()
    );
}

/// Prints the remaining lifetime of a basket and the wall-clock time it expires at.
async fn show_ttl(store: &RedisBasketStore, id: &str) -> Result<()> {
    let ttl = store
        .remaining_ttl(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read TTL: {}", e))?;

    match ttl {
        Some(ttl) => {
            let expires_at = chrono::Utc::now()
                + chrono::Duration::from_std(ttl).context("TTL out of range")?;

            println!("{}", format!("⏳ Basket {}", id).bright_blue().bold());
            println!();
            println!(
                "  Remaining: {}",
                format_duration(ttl.as_secs()).bright_white().bold()
            );
            println!(
                "  Expires:   {}",
                expires_at
                    .format("%Y-%m-%d %H:%M:%S UTC")
                    .to_string()
                    .bright_black()
            );
            println!();
        }
        None => {
            println!("{}", format!("  Basket '{}' not found", id).yellow());
        }
    }

    Ok(())
}

/// Deletes a basket after confirmation.
///
/// Deleting a basket that does not exist is not an error.
async fn delete_basket(repo: &StoreBasketRepository, id: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑  Delete Basket".bright_blue().bold());
    println!();
    println!("  Basket: {}", id.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this basket?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    repo.delete_basket(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete basket: {}", e))?;

    println!();
    println!("{}", "✅ Basket deleted".green().bold());
    println!();

    Ok(())
}

/// Handles store diagnostic commands.
async fn handle_store_action(
    action: StoreAction,
    store: Arc<RedisBasketStore>,
    redis_url: &str,
) -> Result<()> {
    match action {
        StoreAction::Ping => {
            println!(
                "{}",
                format!("🔍 Pinging {}...", mask_connection_string(redis_url)).bright_blue()
            );

            if store.ping().await {
                println!("{}", "✅ Redis connection OK".green().bold());
            } else {
                anyhow::bail!("Redis did not answer PING");
            }
        }
    }

    Ok(())
}

/// Formats a computed amount, marking totals that overflowed.
fn format_amount(amount: Option<Decimal>) -> String {
    amount
        .map(|a| a.to_string())
        .unwrap_or_else(|| "out of range".to_string())
}

/// Formats seconds as `Xd Yh Zm Ws`, omitting leading zero units.
fn format_duration(total: u64) -> String {
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;

    if days > 0 {
        format!("{}d {}h {}m {}s", days, hours, minutes, seconds)
    } else if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
