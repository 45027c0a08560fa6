use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use civic_core::db::{ServerAddress, TlsMode};
use civic_core::{
    CivicRepository, CouncilMember, Project, ProjectStatus, RepositoryError, TaxRecord,
};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgRow, PgSslMode, Postgres};
use sqlx::{Decode, Row, Type};

const MAX_CONNECTIONS: u32 = 10;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

pub struct PostgresRepository {
    pool: PgPool,
}

pub(crate) fn ssl_mode(tls: TlsMode) -> PgSslMode {
    match tls {
        TlsMode::Disable => PgSslMode::Disable,
        TlsMode::Require => PgSslMode::Require,
        TlsMode::VerifyFull => PgSslMode::VerifyFull,
    }
}

fn with_tls(options: PgConnectOptions, tls: Option<TlsMode>) -> PgConnectOptions {
    match tls {
        Some(tls) => options.ssl_mode(ssl_mode(tls)),
        None => options,
    }
}

/// Parse a `postgres://` URL. An explicit TLS mode wins over any `sslmode`
/// query parameter; without one the URL's own setting is kept.
pub(crate) fn connect_options(database_url: &str, tls: Option<TlsMode>) -> Result<PgConnectOptions> {
    let options = PgConnectOptions::from_str(database_url)
        .context("Invalid PostgreSQL connection string")?;
    Ok(with_tls(options, tls))
}

/// Build options from discrete fields, so hosts that cannot appear bare in
/// a URL (IPv6 literals, socket directories) pass through untouched.
pub(crate) fn server_options(server: &ServerAddress, tls: Option<TlsMode>) -> PgConnectOptions {
    let mut options = PgConnectOptions::new()
        .host(&server.host)
        .port(server.port)
        .username(&server.user)
        .database(&server.database);
    if let Some(password) = &server.password {
        options = options.password(password);
    }
    with_tls(options, tls)
}

impl PostgresRepository {
    /// Connect eagerly so an unreachable server fails here rather than on the
    /// first request.
    pub async fn new(database_url: &str, tls: Option<TlsMode>) -> Result<Self> {
        Self::connect(connect_options(database_url, tls)?).await
    }

    pub async fn connect(options: PgConnectOptions) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_with(options)
            .await
            .context("Failed to connect to PostgreSQL")?;
        Ok(Self { pool })
    }

    pub fn new_with_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, RepositoryError>
where
    T: Decode<'r, Postgres> + Type<Postgres>,
{
    row.try_get(name)
        .map_err(|e| RepositoryError::Database(format!("Failed to get '{}': {}", name, e)))
}

fn row_to_tax_record(row: &PgRow) -> Result<TaxRecord, RepositoryError> {
    Ok(TaxRecord {
        id: column(row, "id")?,
        fiscal_year: column(row, "fiscal_year")?,
        total_tax_revenue: column(row, "total_tax_revenue")?,
        average_tax_per_resident: column(row, "average_tax_per_resident")?,
        population: column(row, "population")?,
        general_fund_percentage: column(row, "general_fund_percentage")?,
        infrastructure_percentage: column(row, "infrastructure_percentage")?,
        public_safety_percentage: column(row, "public_safety_percentage")?,
        education_percentage: column(row, "education_percentage")?,
        community_services_percentage: column(row, "community_services_percentage")?,
        sustainability_percentage: column(row, "sustainability_percentage")?,
        general_fund_amount: column(row, "general_fund_amount")?,
        infrastructure_amount: column(row, "infrastructure_amount")?,
        public_safety_amount: column(row, "public_safety_amount")?,
        education_amount: column(row, "education_amount")?,
        community_services_amount: column(row, "community_services_amount")?,
        sustainability_amount: column(row, "sustainability_amount")?,
        funding_sources: column(row, "funding_sources")?,
    })
}

fn row_to_council_member(row: &PgRow) -> Result<CouncilMember, RepositoryError> {
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

fn row_to_project(row: &PgRow) -> Result<Project, RepositoryError> {
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
        budget_allocation: column(row, "budget_allocation")?,
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
impl CivicRepository for PostgresRepository {
    async fn database_time(&self) -> Result<DateTime<Utc>, RepositoryError> {
        let row = sqlx::query("SELECT NOW() AS now")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        column(&row, "now")
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
    }
}
