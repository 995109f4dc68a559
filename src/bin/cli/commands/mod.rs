pub mod card;
pub mod category;
pub mod deck;
pub mod list;
pub mod show;
pub mod study;

use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};

/// Ask before a destructive action. Non-interactive callers must pass --yes.
pub fn confirm(message: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    if !crate::stdin_is_tty() {
        bail!("{} (pass --yes to confirm)", message);
    }

    print!("{} [y/N] ", message);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
