//! `catalog` subcommands.

use anyhow::{Context, Result};
use trendboard_shared::filters::{FilterField, FilterPatch, FilterState};

use crate::{
    cli::{CatalogCommands, OutputFormat},
    client::ApiClient,
    display::{option_list, print_json},
};

/// Prints one catalog list, narrowed by the parent selection.
pub async fn run(client: &ApiClient, command: CatalogCommands, format: OutputFormat) -> Result<()> {
    let catalog = client
        .catalog()
        .await
        .with_context(|| format!("failed to load catalog from {}", client.base_url()))?;

    let (field, parents) = match command {
        CatalogCommands::Departments => (FilterField::Department, FilterPatch::new()),
        CatalogCommands::Categories {
            departments,
        } => (
            FilterField::Category,
            FilterPatch::new().set(FilterField::Department, departments),
        ),
        CatalogCommands::Subcategories {
            categories,
        } => (
            FilterField::SubCategory,
            FilterPatch::new().set(FilterField::Category, categories),
        ),
    };
    let mut filters = FilterState::default();
    let _ = filters.apply_partial(parents);
    let options = catalog.options_for(field, &filters);

    match format {
        OutputFormat::Json => print_json(&options),
        OutputFormat::Table => {
            println!("{}", option_list(&options));
            Ok(())
        },
    }
}
