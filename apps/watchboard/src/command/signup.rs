use log::{info, warn};

use crate::forms;
use crate::{App, Error};

/// Interactive account creation. Prompts for the password twice and only
/// proceeds when both entries agree; the password itself is never stored.
pub async fn run(app: &App, username: &str, email: &str) -> Result<(), Error> {
    info!("signup: invoked username={username}");

    let password = forms::prompt_line("Password: ")?;
    let confirmation = forms::prompt_line("Confirm password: ")?;

    if let Err(e) = forms::matching_passwords(&password, &confirmation) {
        warn!("signup: password confirmation failed username={username}");
        anyhow::bail!(e);
    }

    if app.store.register_user(username, email).await? {
        info!("signup: completed username={username}");
        println!("Account created successfully! You can now log in.");
    } else {
        println!("Username already exists.");
    }

    Ok(())
}
