//! Plain-text views of the three pages.
//!
//! Each view is a [`fmt::Display`] wrapper over its page state; the
//! `render_*` functions collect one into a `String`.

use std::fmt;

use civic_core::calculations::BudgetCategory;
use civic_core::{CouncilMember, Project};

use crate::state::{MembersPage, ProjectsPage, TaxPage, YearSelection};
use crate::utils::{format_currency, format_percentage, opt_text};

pub const NO_DATA: &str = "No data available";

pub fn render_taxes(page: &TaxPage) -> String {
    TaxView(page).to_string()
}

pub fn render_members(page: &MembersPage) -> String {
    MembersView(page).to_string()
}

pub fn render_projects(page: &ProjectsPage) -> String {
    ProjectsView(page).to_string()
}

pub struct TaxView<'a>(pub &'a TaxPage);

impl fmt::Display for TaxView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let page = self.0;
        if !page.records.is_loaded() {
            return writeln!(f, "Loading tax data...");
        }

        let years = page.year_options();
        if !years.is_empty() {
            writeln!(f, "Fiscal years: {}", years.join(", "))?;
        }

        if page.selection == YearSelection::Overall {
            return write_trend(page, f);
        }

        let (Some(record), Some(breakdown)) = (page.selected_record(), page.breakdown()) else {
            return writeln!(f, "{NO_DATA}");
        };

        writeln!(f, "Tax Data for {}", record.fiscal_year)?;
        writeln!(f, "  Total tax revenue:        {}", format_currency(record.total_tax_revenue))?;
        writeln!(
            f,
            "  Average tax per resident: {}",
            format_currency(record.average_tax_per_resident)
        )?;
        writeln!(f, "  Population:               {}", record.population)?;
        writeln!(f, "Allocations:")?;
        for line in &breakdown {
            write!(
                f,
                "  {:<20} {:>8} {:>18}",
                line.category.label(),
                format_percentage(line.percentage),
                format_currency(line.amount)
            )?;
            if let Some(per_resident) = line.per_resident {
                write!(f, "  ({} per resident)", format_currency(per_resident))?;
            }
            writeln!(f)?;
        }

        let published: Vec<(BudgetCategory, _)> = BudgetCategory::ALL
            .into_iter()
            .filter_map(|c| c.published_amount_of(record).map(|amount| (c, amount)))
            .collect();
        if !published.is_empty() {
            writeln!(f, "Published budget amounts:")?;
            for (category, amount) in published {
                writeln!(f, "  {:<20} {:>18}", category.label(), format_currency(amount))?;
            }
        }

        if let Some(sources) = record.funding_sources.as_deref() {
            writeln!(f, "Funding sources: {}", sources)?;
        }
        Ok(())
    }
}

fn write_trend(page: &TaxPage, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let records = page.records.records();
    if records.is_empty() {
        return writeln!(f, "{NO_DATA}");
    }

    writeln!(f, "Tax trends")?;
    writeln!(
        f,
        "  {:<10} {:>20} {:>14} {:>12}",
        "Year", "Total revenue", "Per resident", "Population"
    )?;
    for record in records {
        writeln!(
            f,
            "  {:<10} {:>20} {:>14} {:>12}",
            record.fiscal_year,
            format_currency(record.total_tax_revenue),
            format_currency(record.average_tax_per_resident),
            record.population
        )?;
    }
    Ok(())
}

pub struct MembersView<'a>(pub &'a MembersPage);

impl fmt::Display for MembersView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let page = self.0;
        if !page.members.is_loaded() {
            return writeln!(f, "Loading council members...");
        }

        let parties = page.party_options();
        if !parties.is_empty() {
            writeln!(f, "Parties: {}", parties.join(", "))?;
        }
        let positions = page.position_options();
        if !positions.is_empty() {
            writeln!(f, "Positions: {}", positions.join(", "))?;
        }

        let visible = page.visible();
        if visible.is_empty() {
            return writeln!(f, "No council members match your search or filters.");
        }

        for member in visible {
            write_member(page, member, f)?;
        }
        Ok(())
    }
}

fn write_member(
    page: &MembersPage,
    member: &CouncilMember,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    write!(
        f,
        "[{}] {}, {}",
        member.id,
        member.name,
        opt_text(member.current_position.as_deref())
    )?;
    if let Some(party) = member.party_affiliation.as_deref() {
        write!(f, " ({party})")?;
    }
    if member.is_current {
        write!(f, " *serving*")?;
    }
    writeln!(f)?;

    if let Some(section) = page.expanded.section_for(&member.id) {
        writeln!(f, "    {}:", section.title())?;
        for (label, value) in section.fields(member) {
            writeln!(f, "      {label}: {}", opt_text(value))?;
        }
    }
    Ok(())
}

pub struct ProjectsView<'a>(pub &'a ProjectsPage);

impl fmt::Display for ProjectsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let page = self.0;
        if !page.projects.is_loaded() {
            return writeln!(f, "Loading project data...");
        }

        let years = page.year_options();
        if !years.is_empty() {
            writeln!(f, "Fiscal years: {}", years.join(", "))?;
        }
        let statuses: Vec<&str> = page.status_options().into_iter().map(|s| s.as_str()).collect();
        writeln!(f, "Statuses: {}", statuses.join(", "))?;
        let categories = page.category_options();
        if !categories.is_empty() {
            writeln!(f, "Categories: {}", categories.join(", "))?;
        }

        let groups = page.grouped();
        if groups.is_empty() {
            return writeln!(f, "No projects match your search or filters.");
        }

        for (status, projects) in groups {
            writeln!(f, "{} ({})", status.as_str(), projects.len())?;
            for project in projects {
                write_project(page, project, f)?;
            }
        }
        Ok(())
    }
}

fn write_project(
    page: &ProjectsPage,
    project: &Project,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    writeln!(
        f,
        "  [{}] {} | {} | {} | {}",
        project.id,
        project.name,
        project.fiscal_year,
        opt_text(project.category.as_deref()),
        format_currency(project.budget_allocation)
    )?;
    if let Some(description) = project.description.as_deref() {
        writeln!(f, "      {description}")?;
    }

    if let Some(section) = page.expanded.section_for(&project.id) {
        writeln!(f, "      {}:", section.title())?;
        for (label, value) in section.fields(project) {
            writeln!(f, "        {label}: {}", opt_text(value.as_deref()))?;
        }
    }
    Ok(())
}
