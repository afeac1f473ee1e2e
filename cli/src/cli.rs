//! Command-line surface.

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use trendboard_shared::{
    filters::{FilterField, FilterPatch, FilterState},
    model::{ImpactLabel, Scope, TimeHorizon, TrendId, TrendStatus, WireEnum},
    query::PageSize,
    users::{Role, UserId, UserType},
};

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text.
    Table,
    /// Pretty-printed JSON.
    Json,
}

/// Whose view to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    /// Moderation columns and all descriptions.
    Admin,
    /// Public columns and the caller's description.
    Member,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Admin => Role::Admin,
            RoleArg::Member => Role::Member,
        }
    }
}

/// Top-level arguments.
#[derive(Debug, Parser)]
#[command(name = "tb-cli", version, about = "Trendboard admin CLI")]
pub struct Cli {
    /// API server origin.
    #[arg(long, global = true, env = "TRENDBOARD_API_BASE", default_value = "http://localhost:5000")]
    pub api_base: String,
    /// Bearer token sent with every request.
    #[arg(long, global = true, env = "TRENDBOARD_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
    /// Subcommand.
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommand groups.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Filter option catalog.
    Catalog {
        /// Catalog subcommand.
        #[command(subcommand)]
        command: CatalogCommands,
    },
    /// Browse and moderate trends.
    Trends {
        /// Trends subcommand.
        #[command(subcommand)]
        command: TrendCommands,
    },
    /// Manage user accounts.
    Users {
        /// Users subcommand.
        #[command(subcommand)]
        command: UserCommands,
    },
}

/// `catalog ...`
#[derive(Debug, Subcommand)]
pub enum CatalogCommands {
    /// Active departments.
    Departments,
    /// Categories, narrowed to the given departments.
    Categories {
        /// Department name. Repeatable.
        #[arg(long = "department")]
        departments: Vec<String>,
    },
    /// Subcategories, narrowed to the given categories.
    Subcategories {
        /// Category name. Repeatable.
        #[arg(long = "category")]
        categories: Vec<String>,
    },
}

/// Filter flags shared by listing and statistics.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Department name. Repeatable.
    #[arg(long = "department")]
    pub departments: Vec<String>,
    /// Category name. Repeatable.
    #[arg(long = "category")]
    pub categories: Vec<String>,
    /// Subcategory name. Repeatable.
    #[arg(long = "sub-category")]
    pub sub_categories: Vec<String>,
    /// `short`, `medium` or `long`. Repeatable.
    #[arg(long = "time-horizon")]
    pub time_horizons: Vec<String>,
    /// `local`, `regional`, `national` or `international`. Repeatable.
    #[arg(long = "scope")]
    pub scopes: Vec<String>,
    /// `low`, `medium`, `high` or `very-high`. Repeatable.
    #[arg(long = "impact")]
    pub impacts: Vec<String>,
    /// `draft` or `confirmed`.
    #[arg(long)]
    pub status: Option<String>,
}

impl FilterArgs {
    /// Validates enum-backed flags and builds the filter state.
    pub fn to_filters(&self) -> Result<FilterState> {
        let patch = FilterPatch::new()
            .set(FilterField::Department, self.departments.iter().cloned())
            .set(FilterField::Category, self.categories.iter().cloned())
            .set(FilterField::SubCategory, self.sub_categories.iter().cloned())
            .set(FilterField::TimeHorizon, wire_values::<TimeHorizon>(&self.time_horizons)?)
            .set(FilterField::Scope, wire_values::<Scope>(&self.scopes)?)
            .set(FilterField::Impact, wire_values::<ImpactLabel>(&self.impacts)?)
            .set(FilterField::Status, wire_values::<TrendStatus>(self.status.as_slice())?);
        let mut filters = FilterState::default();
        let _ = filters.apply_partial(patch);
        Ok(filters)
    }
}

fn wire_values<T: WireEnum>(raw: &[String]) -> Result<Vec<&'static str>> {
    raw.iter()
        .map(|value| match T::parse(value) {
            Some(parsed) => Ok(parsed.as_str()),
            None => {
                let allowed: Vec<&str> = T::ALL.iter().map(|item| item.as_str()).collect();
                bail!("invalid {} '{value}', expected one of: {}", T::FIELD, allowed.join(", "))
            },
        })
        .collect()
}

/// Parses `--limit` into one of the supported page sizes.
pub fn parse_page_size(raw: &str) -> Result<PageSize, String> {
    let value: u32 = raw.trim().parse().map_err(|_| format!("not a number: {raw}"))?;
    PageSize::try_from(value)
}

/// `trends ...`
#[derive(Debug, Subcommand)]
pub enum TrendCommands {
    /// One page of trends.
    List {
        /// Filters.
        #[command(flatten)]
        filters: FilterArgs,
        /// 1-based page number.
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Rows per page: 10, 25, 50 or 100.
        #[arg(long, default_value = "10", value_parser = parse_page_size)]
        limit: PageSize,
        /// Group rows by category and subcategory.
        #[arg(long)]
        grouped: bool,
        /// Column set to render.
        #[arg(long, value_enum, default_value_t = RoleArg::Admin)]
        role: RoleArg,
    },
    /// Statistics summary for the filtered set.
    Stats {
        /// Filters.
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Full detail of one trend with related trends.
    Show {
        /// Trend id.
        id: TrendId,
        /// Description set to render.
        #[arg(long, value_enum, default_value_t = RoleArg::Admin)]
        role: RoleArg,
    },
    /// Approve a draft.
    Approve {
        /// Trend id.
        id: TrendId,
    },
    /// Disapprove (delete) a draft.
    Disapprove {
        /// Trend id.
        id: TrendId,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Approve several drafts in one request.
    BulkApprove {
        /// Trend ids.
        #[arg(required = true, num_args = 1..)]
        ids: Vec<TrendId>,
    },
    /// Disapprove several drafts in one request.
    BulkDisapprove {
        /// Trend ids.
        #[arg(required = true, num_args = 1..)]
        ids: Vec<TrendId>,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

/// `users ...`
#[derive(Debug, Subcommand)]
pub enum UserCommands {
    /// All accounts.
    List,
    /// Create an account.
    Create {
        /// Login email.
        #[arg(long)]
        email: String,
        /// Given name.
        #[arg(long)]
        first_name: String,
        /// Family name.
        #[arg(long)]
        last_name: String,
        /// `external`, `internal_teacher`, `internal_business` or `admin`.
        #[arg(long, default_value = "external", value_parser = parse_user_type)]
        user_type: UserType,
        /// `Male`, `Female` or `Other`.
        #[arg(long)]
        gender: Option<String>,
        /// `YYYY-MM-DD`.
        #[arg(long)]
        date_of_birth: Option<String>,
        /// Initial password.
        #[arg(long, conflicts_with = "generate_password")]
        password: Option<String>,
        /// Generate a random password and print it.
        #[arg(long)]
        generate_password: bool,
    },
    /// Re-enable an account.
    Activate {
        /// User id.
        id: UserId,
    },
    /// Disable an account without deleting it.
    Deactivate {
        /// User id.
        id: UserId,
    },
    /// Delete an account.
    Delete {
        /// User id.
        id: UserId,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

/// Parses `--user-type`.
pub fn parse_user_type(raw: &str) -> Result<UserType, String> {
    UserType::parse(raw).ok_or_else(|| format!("unknown user type: {raw}"))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn repeated_filter_flags_accumulate() {
        let cli = Cli::try_parse_from([
            "tb-cli",
            "trends",
            "list",
            "--department",
            "IT",
            "--department",
            "HR",
            "--impact",
            "very-high",
            "--limit",
            "25",
        ])
        .expect("parse");
        let Commands::Trends {
            command: TrendCommands::List {
                filters,
                limit,
                ..
            },
        } = cli.command
        else {
            panic!("expected trends list");
        };
        assert_eq!(limit, PageSize::TwentyFive);
        let state = filters.to_filters().expect("filters");
        assert_eq!(state.selected(FilterField::Department).len(), 2);
        assert!(state.selected(FilterField::Impact).contains("Very High"));
    }

    #[test]
    fn unsupported_page_size_is_rejected() {
        assert!(Cli::try_parse_from(["tb-cli", "trends", "list", "--limit", "30"]).is_err());
    }

    #[test]
    fn invalid_enum_filter_names_the_choices() {
        let args = FilterArgs {
            scopes: vec!["galactic".into()],
            ..FilterArgs::default()
        };
        let err = args.to_filters().expect_err("invalid scope").to_string();
        assert!(err.contains("local, regional, national, international"), "{err}");
    }
}
