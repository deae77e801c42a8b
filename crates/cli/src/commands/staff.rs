//! Staff and organizer commands around door duty.

use ticketgate_client::api::staff::AssignStaffRequest;
use ticketgate_core::{EventId, Role};

use super::{CliContext, CliError};

/// List the events the logged-in staff member is assigned to work.
#[allow(clippy::print_stdout)]
pub async fn assigned(ctx: &CliContext) -> Result<(), CliError> {
    ctx.require_role(&[Role::Staff], "assignments require a staff session")?;
    let user = ctx.current_user()?;

    let events = ctx
        .client()
        .staff()
        .assigned_events(Some(&user.email))
        .await?
        .unwrap_or_default();
    if events.is_empty() {
        println!("No assigned events");
        return Ok(());
    }
    for event in &events {
        println!("#{:<6} {}  {}", event.id, event.starts_at, event.title);
    }
    Ok(())
}

/// List the tickets this staff member has scanned.
#[allow(clippy::print_stdout)]
pub async fn scanned(ctx: &CliContext) -> Result<(), CliError> {
    ctx.require_role(&[Role::Staff], "scan history requires a staff session")?;
    let user = ctx.current_user()?;

    let tickets = ctx
        .client()
        .staff()
        .scanned_tickets(Some(&user.email))
        .await?
        .unwrap_or_default();
    if tickets.is_empty() {
        println!("No scanned tickets");
        return Ok(());
    }
    for ticket in &tickets {
        let at = ticket
            .scanned_at
            .map_or_else(|| "-".to_string(), |t| t.to_rfc3339());
        println!("{}  event #{}  at {at}", ticket.code, ticket.event_id);
    }
    Ok(())
}

/// Assign a staff member to an event. Organizer only.
#[allow(clippy::print_stdout)]
pub async fn assign(ctx: &CliContext, event_id: i64, staff_email: &str) -> Result<(), CliError> {
    ctx.require_role(&[Role::Organizer], "assigning staff requires an organizer session")?;
    let organizer = ctx.current_user()?;
    let request = AssignStaffRequest {
        event_id: EventId::new(event_id),
        staff_email: staff_email.parse()?,
    };

    let assignment = ctx
        .client()
        .staff()
        .assign_staff(&organizer.email, &request)
        .await?;
    println!(
        "Assigned {} to event #{}",
        assignment.staff_email, assignment.event_id
    );
    Ok(())
}
