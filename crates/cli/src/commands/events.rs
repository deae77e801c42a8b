//! Event browsing commands.
//!
//! These hit the public catalog endpoints, so they work logged out. The
//! responses go through the client's tag cache like every other read.

use ticketgate_client::api::events::EventListParams;
use ticketgate_core::{Event, EventId};

use super::{CliContext, CliError};

/// List a page of the event catalog, optionally filtered by a search term.
#[allow(clippy::print_stdout)]
pub async fn list(ctx: &CliContext, page: u32, search: Option<String>) -> Result<(), CliError> {
    let params = EventListParams { page, search };
    let result = ctx.client().events().list(params).await?;

    println!(
        "Page {} ({} events total)",
        result.page, result.total_count
    );
    for event in &result.events {
        print_row(event);
    }
    Ok(())
}

/// Show one event with its ticket tiers.
#[allow(clippy::print_stdout)]
pub async fn show(ctx: &CliContext, id: i64) -> Result<(), CliError> {
    let event = ctx.client().events().get(EventId::new(id)).await?;

    println!("{} [{}]", event.title, event.category);
    println!("{} - {}", event.starts_at, event.ends_at);
    println!("{}", event.description);
    for tier in &event.ticket_types {
        println!(
            "  {} - {} ({} remaining)",
            tier.name,
            tier.price.display(),
            tier.remaining()
        );
    }
    Ok(())
}

/// List the curated featured events.
#[allow(clippy::print_stdout)]
pub async fn featured(ctx: &CliContext) -> Result<(), CliError> {
    let events = ctx.client().events().featured().await?;
    for event in &events {
        print_row(event);
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_row(event: &Event) {
    println!(
        "#{:<6} {}  [{}]  {}",
        event.id, event.starts_at, event.category, event.title
    );
}
