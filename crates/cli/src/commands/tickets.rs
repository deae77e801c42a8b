//! Ticket commands: list owned tickets, scan at the door, export.

use std::path::PathBuf;

use ticketgate_client::export;
use ticketgate_core::{EventId, Role, TicketCode};

use super::{CliContext, CliError, export_dir};

/// List the logged-in user's tickets.
#[allow(clippy::print_stdout)]
pub async fn list(ctx: &CliContext) -> Result<(), CliError> {
    let user = ctx.current_user()?;
    let tickets = ctx
        .client()
        .tickets()
        .for_user(Some(user.id))
        .await?
        .unwrap_or_default();

    if tickets.is_empty() {
        println!("No tickets");
        return Ok(());
    }
    for ticket in &tickets {
        let status = if ticket.scanned { "scanned" } else { "valid" };
        println!(
            "{}  event #{}  order #{}  [{status}]",
            ticket.code, ticket.event_id, ticket.order_id
        );
    }
    Ok(())
}

/// Validate an admission code at the door. Staff only.
#[allow(clippy::print_stdout)]
pub async fn scan(ctx: &CliContext, code: &str) -> Result<(), CliError> {
    ctx.require_role(&[Role::Staff], "scanning requires a staff session")?;

    // Accept either a raw admission code or a full QR payload.
    let code = match export::decode_qr_payload(code) {
        Ok(payload) => TicketCode::parse(&payload.code)?,
        Err(_) => TicketCode::parse(code)?,
    };

    let ticket = ctx.client().tickets().scan(&code).await?;
    println!("Admitted {} for event #{}", ticket.code, ticket.event_id);
    Ok(())
}

/// Export the user's tickets for one event as a renderable document.
#[allow(clippy::print_stdout)]
pub async fn export(
    ctx: &CliContext,
    event_id: i64,
    out_dir: Option<PathBuf>,
) -> Result<(), CliError> {
    let user = ctx.current_user()?;
    let event_id = EventId::new(event_id);

    let tickets: Vec<_> = ctx
        .client()
        .tickets()
        .for_user(Some(user.id))
        .await?
        .unwrap_or_default()
        .into_iter()
        .filter(|t| t.event_id == event_id)
        .collect();
    if tickets.is_empty() {
        println!("No tickets for event #{event_id}");
        return Ok(());
    }

    let event = ctx.client().events().get(event_id).await?;
    let venue = ctx.client().venues().get(event.venue_id).await?;

    let document = export::build_document(&tickets, &event, &venue, &user.display_name)?;
    let path = export::write_document(&document, &export_dir(out_dir))?;
    println!("Wrote {}", path.display());
    Ok(())
}
