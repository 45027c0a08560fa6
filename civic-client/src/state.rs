//! Per-page view state for the client.
//!
//! Each page fetches its collection once, keeps it in memory and derives
//! everything it shows (filtered rows, dropdown options, breakdowns) from
//! that copy. A failed fetch is logged and leaves the previous state alone.

use civic_core::calculations::{CategoryBreakdown, budget_breakdown};
use civic_core::filters::{
    MemberFilter, ProjectFilter, RecordFilter, TaxRecordFilter, normalize_selection,
    unique_values,
};
use civic_core::{CouncilMember, Project, ProjectStatus, TaxRecord};
use clap::ValueEnum;
use tracing::error;

use crate::api::{ApiClient, ClientError};

/// A fetched collection plus whether any fetch has succeeded yet.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    records: Vec<T>,
    loaded: bool,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            loaded: false,
        }
    }
}

impl<T> Collection<T> {
    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Replace the contents on success; on failure log and keep what we had.
    pub fn apply(&mut self, resource: &'static str, result: Result<Vec<T>, ClientError>) {
        match result {
            Ok(records) => {
                self.records = records;
                self.loaded = true;
            }
            Err(error) => error!(resource, %error, "Error fetching {resource}"),
        }
    }
}

/// At most one `(item, section)` pair is expanded at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandState<K, S> {
    current: Option<(K, S)>,
}

impl<K, S> Default for ExpandState<K, S> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<K: PartialEq, S: PartialEq> ExpandState<K, S> {
    /// Re-selecting the expanded pair collapses it; anything else expands.
    pub fn toggle(&mut self, item: K, section: S) {
        let same = self
            .current
            .as_ref()
            .is_some_and(|(k, s)| *k == item && *s == section);
        self.current = if same { None } else { Some((item, section)) };
    }

    pub fn is_expanded(&self, item: &K, section: &S) -> bool {
        self.current
            .as_ref()
            .is_some_and(|(k, s)| k == item && s == section)
    }

    /// The expanded section of `item`, if it is the expanded one.
    pub fn section_for(&self, item: &K) -> Option<&S> {
        match &self.current {
            Some((k, s)) if k == item => Some(s),
            _ => None,
        }
    }

    pub fn collapse(&mut self) {
        self.current = None;
    }
}

/// Which fiscal year the tax page shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum YearSelection {
    /// The last record by id.
    #[default]
    Latest,
    Year(String),
    /// Every year side by side.
    Overall,
}

impl YearSelection {
    /// `""`/`"all"` or nothing selects the latest year; `"overall"` the trend.
    pub fn from_input(raw: Option<&str>) -> Self {
        match normalize_selection(raw) {
            None => Self::Latest,
            Some(year) if year.eq_ignore_ascii_case("overall") => Self::Overall,
            Some(year) => Self::Year(year),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TaxPage {
    pub records: Collection<TaxRecord>,
    pub selection: YearSelection,
}

impl TaxPage {
    pub async fn load(&mut self, client: &ApiClient) {
        self.records.apply("tax records", client.tax_records().await);
    }

    pub fn year_options(&self) -> Vec<String> {
        unique_values(self.records.records(), |r| Some(r.fiscal_year.as_str()))
    }

    /// The record for the current selection. `None` for an absent year, an
    /// empty collection or the overall view.
    pub fn selected_record(&self) -> Option<&TaxRecord> {
        match &self.selection {
            YearSelection::Latest => self.records.records().last(),
            YearSelection::Year(year) => {
                let filter = TaxRecordFilter {
                    fiscal_year: Some(year.clone()),
                };
                filter.apply(self.records.records()).into_iter().next()
            }
            YearSelection::Overall => None,
        }
    }

    pub fn breakdown(&self) -> Option<Vec<CategoryBreakdown>> {
        self.selected_record().map(budget_breakdown)
    }
}

/// Collapsible parts of a council member card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MemberSection {
    Background,
    Agenda,
    Record,
    Contact,
}

impl MemberSection {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Background => "Background",
            Self::Agenda => "Agenda",
            Self::Record => "Record",
            Self::Contact => "Contact",
        }
    }

    pub fn fields<'a>(&self, member: &'a CouncilMember) -> Vec<(&'static str, Option<&'a str>)> {
        match self {
            Self::Background => vec![
                ("Previous positions", member.previous_positions.as_deref()),
                ("Term start", member.term_start.as_deref()),
                ("Term end", member.term_end.as_deref()),
                ("Education", member.education.as_deref()),
                ("Awards", member.awards.as_deref()),
            ],
            Self::Agenda => vec![
                ("Key initiatives", member.key_initiatives.as_deref()),
                ("Focus areas", member.focus_areas.as_deref()),
                ("Achievements", member.achievements.as_deref()),
            ],
            Self::Record => vec![
                ("Voting record", member.voting_record.as_deref()),
                ("Policy stances", member.policy_stances.as_deref()),
                ("Committees", member.committee_memberships.as_deref()),
                ("Controversies", member.controversies.as_deref()),
            ],
            Self::Contact => vec![
                ("Email", member.contact_email.as_deref()),
                ("Phone", member.contact_phone.as_deref()),
            ],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MembersPage {
    pub members: Collection<CouncilMember>,
    pub filter: MemberFilter,
    pub expanded: ExpandState<i32, MemberSection>,
}

impl MembersPage {
    pub async fn load(&mut self, client: &ApiClient) {
        self.members.apply("council members", client.council_members().await);
    }

    pub fn party_options(&self) -> Vec<String> {
        unique_values(self.members.records(), |m| m.party_affiliation.as_deref())
    }

    pub fn position_options(&self) -> Vec<String> {
        unique_values(self.members.records(), |m| m.current_position.as_deref())
    }

    pub fn visible(&self) -> Vec<&CouncilMember> {
        self.filter.apply(self.members.records())
    }
}

/// Collapsible parts of a project card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProjectSection {
    Details,
    Impact,
    People,
}

impl ProjectSection {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Details => "Details",
            Self::Impact => "Impact",
            Self::People => "People",
        }
    }

    pub fn fields(&self, project: &Project) -> Vec<(&'static str, Option<String>)> {
        match self {
            Self::Details => vec![
                ("Department", project.department.clone()),
                ("Funding source", project.funding_source.clone()),
                ("Start date", project.start_date.map(|d| d.to_string())),
                ("End date", project.end_date.map(|d| d.to_string())),
            ],
            Self::Impact => vec![
                ("Stakeholders", project.stakeholders.clone()),
                ("Community impact", project.community_impact.clone()),
            ],
            Self::People => vec![
                ("Council members", project.council_members.clone()),
                ("Major initiatives", project.major_initiatives.clone()),
            ],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProjectsPage {
    pub projects: Collection<Project>,
    pub filter: ProjectFilter,
    pub expanded: ExpandState<i32, ProjectSection>,
}

impl ProjectsPage {
    pub async fn load(&mut self, client: &ApiClient) {
        self.projects.apply("projects", client.projects().await);
    }

    pub fn year_options(&self) -> Vec<String> {
        unique_values(self.projects.records(), |p| Some(p.fiscal_year.as_str()))
    }

    pub fn category_options(&self) -> Vec<String> {
        unique_values(self.projects.records(), |p| p.category.as_deref())
    }

    pub fn status_options(&self) -> [ProjectStatus; 3] {
        ProjectStatus::ALL
    }

    pub fn visible(&self) -> Vec<&Project> {
        self.filter.apply(self.projects.records())
    }

    /// Visible projects grouped by status, in lifecycle order. Empty groups
    /// are left out.
    pub fn grouped(&self) -> Vec<(ProjectStatus, Vec<&Project>)> {
        let visible = self.visible();
        ProjectStatus::ALL
            .into_iter()
            .map(|status| {
                let group: Vec<&Project> = visible
                    .iter()
                    .copied()
                    .filter(|p| p.status == status)
                    .collect();
                (status, group)
            })
            .filter(|(_, group)| !group.is_empty())
            .collect()
    }
}
