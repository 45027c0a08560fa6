use civic_core::{CouncilMember, Project, ProjectStatus, TaxRecord};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub fn tax_record(id: i32, fiscal_year: &str, total: Decimal, population: i32) -> TaxRecord {
    TaxRecord {
        id,
        fiscal_year: fiscal_year.to_string(),
        total_tax_revenue: total,
        average_tax_per_resident: dec!(1650.25),
        population,
        general_fund_percentage: dec!(30),
        infrastructure_percentage: dec!(20),
        public_safety_percentage: dec!(15),
        education_percentage: dec!(20),
        community_services_percentage: dec!(10),
        sustainability_percentage: dec!(5),
        general_fund_amount: None,
        infrastructure_amount: None,
        public_safety_amount: None,
        education_amount: None,
        community_services_amount: None,
        sustainability_amount: None,
        funding_sources: None,
    }
}

pub fn member(id: i32, name: &str, party: &str, position: &str, is_current: bool) -> CouncilMember {
    CouncilMember {
        id,
        name: name.to_string(),
        photo_url: None,
        current_position: Some(position.to_string()),
        previous_positions: None,
        term_start: Some("2022".to_string()),
        term_end: Some("2026".to_string()),
        party_affiliation: Some(party.to_string()),
        key_initiatives: Some("Housing element update".to_string()),
        voting_record: None,
        policy_stances: None,
        committee_memberships: None,
        education: None,
        awards: None,
        controversies: None,
        achievements: None,
        focus_areas: None,
        contact_email: Some(format!("member{id}@city.example")),
        contact_phone: None,
        is_current,
    }
}

pub fn project(
    id: i32,
    name: &str,
    fiscal_year: &str,
    status: ProjectStatus,
    category: &str,
) -> Project {
    Project {
        id,
        name: name.to_string(),
        description: None,
        fiscal_year: fiscal_year.to_string(),
        department: Some("Public Works".to_string()),
        category: Some(category.to_string()),
        budget_allocation: dec!(250000),
        funding_source: None,
        start_date: None,
        end_date: None,
        status,
        stakeholders: None,
        community_impact: None,
        council_members: None,
        major_initiatives: None,
    }
}

pub fn members() -> Vec<CouncilMember> {
    vec![
        member(1, "Maria Montes", "Nonpartisan", "Mayor", true),
        member(2, "Tom Moreno", "Democrat", "Vice Mayor", true),
        member(3, "Carla Nguyen", "Nonpartisan", "Council Member", false),
        member(4, "Dev Patel", "Republican", "Council Member", true),
    ]
}

pub fn projects() -> Vec<Project> {
    vec![
        project(1, "Memorial Park Renovation", "2022-2023", ProjectStatus::Completed, "Parks"),
        project(2, "Citywide Bike Lanes", "2023-2024", ProjectStatus::InProgress, "Transportation"),
        project(3, "Park Lighting Study", "2023-2024", ProjectStatus::Proposed, "Parks"),
        project(4, "Creekside Park Trail", "2023-2024", ProjectStatus::Completed, "Parks"),
        project(5, "Library Roof", "2022-2023", ProjectStatus::Completed, "Facilities"),
    ]
}
