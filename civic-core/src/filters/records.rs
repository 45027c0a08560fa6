use crate::models::{CouncilMember, Project, ProjectStatus, TaxRecord};

use super::matching::{contains_ignore_case, equals_ignore_case};

/// A set of selections that decides which records of type `T` are shown.
pub trait RecordFilter<T> {
    fn matches(&self, record: &T) -> bool;

    /// Records that satisfy every selection, in their original order.
    fn apply<'a, I>(&self, records: I) -> Vec<&'a T>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        records
            .into_iter()
            .filter(|record| self.matches(record))
            .collect()
    }
}

/// Tax view: one fiscal year at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxRecordFilter {
    pub fiscal_year: Option<String>,
}

impl RecordFilter<TaxRecord> for TaxRecordFilter {
    fn matches(&self, record: &TaxRecord) -> bool {
        equals_ignore_case(Some(record.fiscal_year.as_str()), self.fiscal_year.as_deref())
    }
}

/// Council view: name search, party and position dropdowns, serving toggle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberFilter {
    pub search: String,
    pub party: Option<String>,
    pub position: Option<String>,
    pub current_only: bool,
}

impl RecordFilter<CouncilMember> for MemberFilter {
    fn matches(&self, member: &CouncilMember) -> bool {
        contains_ignore_case(&member.name, &self.search)
            && equals_ignore_case(member.party_affiliation.as_deref(), self.party.as_deref())
            && equals_ignore_case(member.current_position.as_deref(), self.position.as_deref())
            && (!self.current_only || member.is_current)
    }
}

/// Projects view: name search plus year, status and category dropdowns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    pub search: String,
    pub fiscal_year: Option<String>,
    pub status: Option<ProjectStatus>,
    pub category: Option<String>,
}

impl RecordFilter<Project> for ProjectFilter {
    fn matches(&self, project: &Project) -> bool {
        contains_ignore_case(&project.name, &self.search)
            && equals_ignore_case(Some(project.fiscal_year.as_str()), self.fiscal_year.as_deref())
            && self.status.is_none_or(|status| project.status == status)
            && equals_ignore_case(project.category.as_deref(), self.category.as_deref())
    }
}
