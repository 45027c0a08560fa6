use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle stage of a city project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    Proposed,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 3] = [Self::Proposed, Self::InProgress, Self::Completed];

    /// The label stored in the `projects.status` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Proposed => "Proposed",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }

    /// Parses a stored status label. Only the exact stored spelling is accepted.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Proposed" => Some(Self::Proposed),
            "In Progress" => Some(Self::InProgress),
            "Completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub fiscal_year: String,
    pub department: Option<String>,
    pub category: Option<String>,
    pub budget_allocation: Decimal,
    pub funding_source: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: ProjectStatus,
    pub stakeholders: Option<String>,
    pub community_impact: Option<String>,
    /// Council members associated with the project, as free text.
    pub council_members: Option<String>,
    pub major_initiatives: Option<String>,
}
