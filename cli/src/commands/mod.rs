//! Subcommand implementations.

pub mod catalog;
pub mod trends;
pub mod users;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use trendboard_shared::api::RequestContext;

use crate::{
    cli::{Cli, Commands},
    client::ApiClient,
};

/// Dispatches a parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    let client = ApiClient::new(RequestContext::new(cli.api_base, cli.token));
    match cli.command {
        Commands::Catalog {
            command,
        } => catalog::run(&client, command, cli.format).await,
        Commands::Trends {
            command,
        } => trends::run(&client, command, cli.format).await,
        Commands::Users {
            command,
        } => users::run(&client, command, cli.format).await,
    }
}

/// Asks a yes/no question on stdin unless `assume_yes` is set.
pub(crate) fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    print!("{prompt} [y/N] ");
    io::stdout().flush().context("failed to flush stdout")?;
    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("failed to read confirmation")?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_explicit_yes_confirms() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes(""));
        assert!(!is_yes("no"));
    }

    #[test]
    fn assume_yes_skips_prompt() {
        assert!(confirm("Delete?", true).expect("confirm"));
    }
}
