use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use civic_client::render::{render_members, render_projects, render_taxes};
use civic_client::state::{
    MemberSection, MembersPage, ProjectSection, ProjectsPage, TaxPage, YearSelection,
};
use civic_client::{ApiClient, DEFAULT_API_URL};
use civic_core::ProjectStatus;
use civic_core::filters::normalize_selection;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Browse the city's tax records, council members and projects.
#[derive(Debug, Parser)]
#[command(name = "tino", version)]
struct Cli {
    /// Base URL of the civic API.
    #[arg(long, env = "TINO_API_URL", default_value = DEFAULT_API_URL, global = true)]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Revenue and budget allocation for one fiscal year.
    Taxes {
        /// Fiscal year such as `2023-2024`, or `overall` for every year.
        /// Defaults to the most recent year.
        #[arg(long)]
        year: Option<String>,
    },

    /// Council members.
    Members {
        /// Case-insensitive name search.
        #[arg(long, default_value = "")]
        search: String,

        /// Party affiliation, or `all`.
        #[arg(long)]
        party: Option<String>,

        /// Current position, or `all`.
        #[arg(long)]
        position: Option<String>,

        /// Only members currently serving.
        #[arg(long)]
        current_only: bool,

        /// Expand the member with this id.
        #[arg(long)]
        expand: Option<i32>,

        #[arg(long, value_enum, default_value_t = MemberSection::Background)]
        section: MemberSection,
    },

    /// City projects grouped by status.
    Projects {
        /// Case-insensitive name search.
        #[arg(long, default_value = "")]
        search: String,

        /// Fiscal year, or `all`.
        #[arg(long)]
        year: Option<String>,

        #[arg(long, value_enum, default_value_t = StatusArg::All)]
        status: StatusArg,

        /// Category, or `all`.
        #[arg(long)]
        category: Option<String>,

        /// Expand the project with this id.
        #[arg(long)]
        expand: Option<i32>,

        #[arg(long, value_enum, default_value_t = ProjectSection::Details)]
        section: ProjectSection,
    },

    /// Ask the API whether it can reach its database.
    Health,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StatusArg {
    All,
    Proposed,
    InProgress,
    Completed,
}

impl StatusArg {
    fn selection(self) -> Option<ProjectStatus> {
        match self {
            Self::All => None,
            Self::Proposed => Some(ProjectStatus::Proposed),
            Self::InProgress => Some(ProjectStatus::InProgress),
            Self::Completed => Some(ProjectStatus::Completed),
        }
    }
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Compact stderr logging. `RUST_LOG` overrides the default `warn` so the
/// rendered view stays readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let client = ApiClient::new(&cli.api_url).context("Failed to create API client")?;
    debug!(api = %client.base_url(), "using API");

    match cli.command {
        Command::Taxes { year } => {
            let mut page = TaxPage {
                selection: YearSelection::from_input(year.as_deref()),
                ..TaxPage::default()
            };
            page.load(&client).await;
            print!("{}", render_taxes(&page));
        }
        Command::Members {
            search,
            party,
            position,
            current_only,
            expand,
            section,
        } => {
            let mut page = MembersPage::default();
            page.filter.search = search;
            page.filter.party = normalize_selection(party.as_deref());
            page.filter.position = normalize_selection(position.as_deref());
            page.filter.current_only = current_only;
            if let Some(id) = expand {
                page.expanded.toggle(id, section);
            }
            page.load(&client).await;
            print!("{}", render_members(&page));
        }
        Command::Projects {
            search,
            year,
            status,
            category,
            expand,
            section,
        } => {
            let mut page = ProjectsPage::default();
            page.filter.search = search;
            page.filter.fiscal_year = normalize_selection(year.as_deref());
            page.filter.status = status.selection();
            page.filter.category = normalize_selection(category.as_deref());
            if let Some(id) = expand {
                page.expanded.toggle(id, section);
            }
            page.load(&client).await;
            print!("{}", render_projects(&page));
        }
        Command::Health => {
            let health = client
                .health()
                .await
                .with_context(|| format!("Health check against {} failed", client.base_url()))?;
            println!("{} ({})", health.message, health.time);
        }
    }

    Ok(())
}
