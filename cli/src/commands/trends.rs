//! `trends` subcommands.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use trendboard_shared::{
    model::{Trend, TrendId},
    moderation::{Moderation, ModerationAction, ModerationTarget},
    query::Pagination,
    users::Role,
};

use super::confirm;
use crate::{
    cli::{OutputFormat, TrendCommands},
    client::ApiClient,
    display::{detail_report, grouped_tree, page_footer, print_json, stats_report, trend_table},
};

#[derive(Serialize)]
struct TrendDetail<'a> {
    trend: &'a Trend,
    related: &'a [Trend],
}

/// Runs a `trends` subcommand.
pub async fn run(client: &ApiClient, command: TrendCommands, format: OutputFormat) -> Result<()> {
    match command {
        TrendCommands::List {
            filters,
            page,
            limit,
            grouped,
            role,
        } => {
            let filters = filters.to_filters()?;
            let mut pagination = Pagination::starting_at(page, limit);
            let listing = client
                .trends(&filters, &pagination)
                .await
                .context("failed to load trends")?;
            if format == OutputFormat::Json {
                return print_json(&listing);
            }
            pagination.set_total(listing.total());
            let body = if grouped {
                grouped_tree(&listing.trends)
            } else {
                trend_table(&listing.trends, Role::from(role))
            };
            println!("{body}\n\n{}", page_footer(&pagination));
            Ok(())
        },
        TrendCommands::Stats {
            filters,
        } => {
            let filters = filters.to_filters()?;
            let stats = client
                .stats(&filters)
                .await
                .context("failed to load statistics")?;
            match format {
                OutputFormat::Json => print_json(&stats),
                OutputFormat::Table => {
                    println!("{}", stats_report(&stats));
                    Ok(())
                },
            }
        },
        TrendCommands::Show {
            id,
            role,
        } => show(client, id, Role::from(role), format).await,
        TrendCommands::Approve {
            id,
        } => moderate(client, ModerationAction::Approve, ModerationTarget::Single(id), true, format).await,
        TrendCommands::Disapprove {
            id,
            yes,
        } => moderate(client, ModerationAction::Disapprove, ModerationTarget::Single(id), yes, format).await,
        TrendCommands::BulkApprove {
            ids,
        } => moderate(client, ModerationAction::Approve, ModerationTarget::Bulk(ids), true, format).await,
        TrendCommands::BulkDisapprove {
            ids,
            yes,
        } => moderate(client, ModerationAction::Disapprove, ModerationTarget::Bulk(ids), yes, format).await,
    }
}

async fn show(client: &ApiClient, id: TrendId, role: Role, format: OutputFormat) -> Result<()> {
    let trend = client
        .trend(id)
        .await
        .with_context(|| format!("failed to load trend {id}"))?;
    let related = match client.related(&trend).await {
        Ok(related) => related,
        Err(err) => {
            tracing::warn!(error = %err, id, "related lookup failed");
            Vec::new()
        },
    };
    match format {
        OutputFormat::Json => print_json(&TrendDetail {
            trend: &trend,
            related: &related,
        }),
        OutputFormat::Table => {
            println!("{}", detail_report(&trend, role, &related));
            Ok(())
        },
    }
}

async fn moderate(
    client: &ApiClient,
    action: ModerationAction,
    target: ModerationTarget,
    assume_yes: bool,
    format: OutputFormat,
) -> Result<()> {
    let moderation = Moderation {
        action,
        target,
    };
    if let Some(prompt) = moderation.confirmation_prompt() {
        if !confirm(&prompt, assume_yes)? {
            println!("Cancelled");
            return Ok(());
        }
    }
    match client.moderate(moderation.action, &moderation.target).await {
        Ok(response) => match format {
            OutputFormat::Json => print_json(&response),
            OutputFormat::Table => {
                println!("{}", moderation.success_message());
                Ok(())
            },
        },
        Err(err) => bail!(moderation.failure_message(&err.user_message())),
    }
}
