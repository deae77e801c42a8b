//! Analytics commands for organizers and admins.

use ticketgate_core::Role;

use super::{CliContext, CliError};

/// Platform-wide dashboard numbers. Admin only.
#[allow(clippy::print_stdout)]
pub async fn summary(ctx: &CliContext) -> Result<(), CliError> {
    ctx.require_role(&[Role::Admin], "the summary requires an admin session")?;
    let user = ctx.current_user()?;

    let Some(summary) = ctx.client().admin().summary(Some(&user.email)).await? else {
        println!("No summary available");
        return Ok(());
    };
    println!("users:           {}", summary.users_count);
    println!("events:          {}", summary.events_count);
    println!("orders:          {}", summary.orders_count);
    println!("tickets scanned: {}", summary.tickets_scanned);
    println!("gross revenue:   {}", summary.gross_revenue.display());
    Ok(())
}

/// Wallet balances for the logged-in organizer.
#[allow(clippy::print_stdout)]
pub async fn wallet(ctx: &CliContext) -> Result<(), CliError> {
    ctx.require_role(&[Role::Organizer], "the wallet requires an organizer session")?;
    let user = ctx.current_user()?;

    let wallet = ctx.client().admin().organizer_wallet(user.id).await?;
    println!("balance: {}", wallet.balance.display());
    println!("pending: {}", wallet.pending.display());
    Ok(())
}

/// Per-event revenue report for the logged-in organizer.
#[allow(clippy::print_stdout)]
pub async fn revenue(ctx: &CliContext) -> Result<(), CliError> {
    ctx.require_role(&[Role::Organizer], "revenue requires an organizer session")?;
    let user = ctx.current_user()?;

    let report = ctx.client().admin().organizer_revenue(&user.email).await?;
    println!(
        "gross {}  net {}  over {} orders",
        report.gross.display(),
        report.net.display(),
        report.orders_count
    );
    for event in &report.per_event {
        println!(
            "  #{:<6} {}  {} sold, {}",
            event.event_id,
            event.title,
            event.tickets_sold,
            event.revenue.display()
        );
    }
    Ok(())
}
