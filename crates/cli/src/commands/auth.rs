//! Session commands: log in, log out, inspect the active identity.

use std::io::{BufRead, Write};

use ticketgate_core::Email;

use super::{CliContext, CliError};

/// Authenticate against the backend and persist the session slice.
///
/// Prompts for the password on stdin when it was not passed as a flag.
#[allow(clippy::print_stdout, clippy::print_stderr)]
pub async fn login(
    ctx: &CliContext,
    email: &str,
    password: Option<String>,
) -> Result<(), CliError> {
    let email = Email::parse(email)?;
    let password = match password {
        Some(p) => p,
        None => prompt_password()?,
    };
    let user = ctx.client().auth().login(&email, &password).await?;
    println!("Logged in as {} ({})", user.display_name(), user.role);
    Ok(())
}

#[allow(clippy::print_stderr)]
fn prompt_password() -> Result<String, CliError> {
    eprint!("Password: ");
    std::io::stderr()
        .flush()
        .map_err(|e| CliError::Input(e.to_string()))?;
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| CliError::Input(e.to_string()))?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Drop the bearer token and clear every cached response.
#[allow(clippy::print_stdout)]
pub async fn logout(ctx: &CliContext) -> Result<(), CliError> {
    ctx.client().auth().logout().await?;
    println!("Logged out");
    Ok(())
}

/// Show the identity carried by the current session, if any.
#[allow(clippy::print_stdout)]
pub fn whoami(ctx: &CliContext) -> Result<(), CliError> {
    match ctx.session().current_user() {
        Some(user) => {
            println!("{} <{}>", user.display_name, user.email);
            println!("role: {}", user.role);
        }
        None => println!("Not logged in"),
    }
    Ok(())
}
