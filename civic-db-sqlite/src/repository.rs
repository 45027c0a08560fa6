use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use civic_core::{
    CivicRepository, CouncilMember, Project, ProjectStatus, RepositoryError, TaxRecord,
};
use sqlx::sqlite::{
    Sqlite, SqliteConnectOptions, SqliteConnection, SqlitePool, SqlitePoolOptions, SqliteRow,
};
use sqlx::{ConnectOptions, Connection, Decode, Row, Type};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::decimal::{get_decimal, get_optional_decimal};

pub struct SqliteRepository {
    pool: SqlitePool,
    /// Holds an in-memory database open while the pool recycles its own
    /// connections.
    keeper: Mutex<Option<SqliteConnection>>,
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Pool settings for `database_url`.
///
/// An in-memory database lives only as long as one of its connections, so
/// its pool never reaps idle ones.
pub(crate) fn pool_options(database_url: &str) -> SqlitePoolOptions {
    let options = SqlitePoolOptions::new();
    if is_in_memory(database_url) {
        options
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        options
    }
}

impl SqliteRepository {
    /// Open a pool on `database_url`.
    ///
    /// Accepts sqlx URLs (`sqlite:civic.db`), bare paths (`civic.db`) and
    /// `:memory:`. A missing database file is created.
    pub async fn new(database_url: &str) -> Result<Self> {
        Self::connect(database_url, pool_options(database_url)).await
    }

    pub(crate) async fn connect(database_url: &str, pool: SqlitePoolOptions) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid database URL: {}", database_url))?
            .create_if_missing(true);
        let keeper = if is_in_memory(database_url) {
            let conn = options
                .connect()
                .await
                .with_context(|| format!("Failed to connect to database: {}", database_url))?;
            Some(conn)
        } else {
            None
        };
        let pool = pool
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;
        Ok(Self {
            pool,
            keeper: Mutex::new(keeper),
        })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self {
            pool,
            keeper: Mutex::new(None),
        }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    /// Load and execute all SQL seed files from the specified directory.
    /// Files are executed in alphabetical order by filename.
    pub async fn run_seeds(&self, seeds_dir: &Path) -> Result<()> {
        let mut entries: Vec<_> = std::fs::read_dir(seeds_dir)
            .with_context(|| format!("Failed to read seeds directory '{}'", seeds_dir.display()))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "sql"))
            .collect();

        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let path = entry.path();
            let sql = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read seed file '{}'", path.display()))?;

            sqlx::raw_sql(&sql)
                .execute(&self.pool)
                .await
                .with_context(|| format!("Failed to execute seed file '{}'", path.display()))?;
            debug!(file = %path.display(), "applied seed file");
        }

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn column<'r, T>(row: &'r SqliteRow, name: &str) -> Result<T, RepositoryError>
where
    T: Decode<'r, Sqlite> + Type<Sqlite>,
{
    row.try_get(name)
        .map_err(|e| RepositoryError::Database(format!("Failed to get '{}': {}", name, e)))
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    // CURRENT_TIMESTAMP yields the first form; the others show up in hand-written data
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(|e| RepositoryError::Database(format!("Failed to parse datetime '{}': {}", s, e)))
}

fn row_to_tax_record(row: &SqliteRow) -> Result<TaxRecord, RepositoryError> {
    Ok(TaxRecord {
        id: column(row, "id")?,
        fiscal_year: column(row, "fiscal_year")?,
        total_tax_revenue: get_decimal(row, "total_tax_revenue")?,
        average_tax_per_resident: get_decimal(row, "average_tax_per_resident")?,
        population: column(row, "population")?,
        general_fund_percentage: get_decimal(row, "general_fund_percentage")?,
        infrastructure_percentage: get_decimal(row, "infrastructure_percentage")?,
        public_safety_percentage: get_decimal(row, "public_safety_percentage")?,
        education_percentage: get_decimal(row, "education_percentage")?,
        community_services_percentage: get_decimal(row, "community_services_percentage")?,
        sustainability_percentage: get_decimal(row, "sustainability_percentage")?,
        general_fund_amount: get_optional_decimal(row, "general_fund_amount")?,
        infrastructure_amount: get_optional_decimal(row, "infrastructure_amount")?,
        public_safety_amount: get_optional_decimal(row, "public_safety_amount")?,
        education_amount: get_optional_decimal(row, "education_amount")?,
        community_services_amount: get_optional_decimal(row, "community_services_amount")?,
        sustainability_amount: get_optional_decimal(row, "sustainability_amount")?,
        funding_sources: column(row, "funding_sources")?,
    })
}

fn row_to_council_member(row: &SqliteRow) -> Result<CouncilMember, RepositoryError> {
    Ok(CouncilMember {
        id: column(row, "id")?,
        name: column(row, "name")?,
        photo_url: column(row, "photo_url")?,
        current_position: column(row, "current_position")?,
        previous_positions: column(row, "previous_positions")?,
        term_start: column(row, "term_start")?,
        term_end: column(row, "term_end")?,
        party_affiliation: column(row, "party_affiliation")?,
        key_initiatives: column(row, "key_initiatives")?,
        voting_record: column(row, "voting_record")?,
        policy_stances: column(row, "policy_stances")?,
        committee_memberships: column(row, "committee_memberships")?,
        education: column(row, "education")?,
        awards: column(row, "awards")?,
        controversies: column(row, "controversies")?,
        achievements: column(row, "achievements")?,
        focus_areas: column(row, "focus_areas")?,
        contact_email: column(row, "contact_email")?,
        contact_phone: column(row, "contact_phone")?,
        is_current: column(row, "is_current")?,
    })
}

fn row_to_project(row: &SqliteRow) -> Result<Project, RepositoryError> {
    let status_str: String = column(row, "status")?;
    let status = ProjectStatus::parse(&status_str).ok_or_else(|| {
        RepositoryError::Database(format!("Invalid project status: {}", status_str))
    })?;

    Ok(Project {
        id: column(row, "id")?,
        name: column(row, "name")?,
        description: column(row, "description")?,
        fiscal_year: column(row, "fiscal_year")?,
        department: column(row, "department")?,
        category: column(row, "category")?,
        budget_allocation: get_decimal(row, "budget_allocation")?,
        funding_source: column(row, "funding_source")?,
        start_date: column(row, "start_date")?,
        end_date: column(row, "end_date")?,
        status,
        stakeholders: column(row, "stakeholders")?,
        community_impact: column(row, "community_impact")?,
        council_members: column(row, "council_members")?,
        major_initiatives: column(row, "major_initiatives")?,
    })
}

#[async_trait]
impl CivicRepository for SqliteRepository {
    async fn database_time(&self) -> Result<DateTime<Utc>, RepositoryError> {
        let row = sqlx::query("SELECT CURRENT_TIMESTAMP AS now")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let now: String = column(&row, "now")?;
        parse_datetime(&now)
    }

    async fn list_tax_records(&self) -> Result<Vec<TaxRecord>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM tax_records ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.iter().map(row_to_tax_record).collect()
    }

    async fn list_council_members(&self) -> Result<Vec<CouncilMember>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM council_members ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.iter().map(row_to_council_member).collect()
    }

    async fn list_projects(&self) -> Result<Vec<Project>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM projects ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.iter().map(row_to_project).collect()
    }

    async fn close(&self) {
        self.pool.close().await;
        if let Some(conn) = self.keeper.lock().await.take() {
            if let Err(e) = conn.close().await {
                warn!(error = %e, "failed to close in-memory keeper connection");
            }
        }
    }
}
