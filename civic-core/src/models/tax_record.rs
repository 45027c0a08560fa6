use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One fiscal year of city revenue and how it was allocated.
///
/// Field names match the `tax_records` columns; they are serialized as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRecord {
    pub id: i32,
    pub fiscal_year: String,
    pub total_tax_revenue: Decimal,
    pub average_tax_per_resident: Decimal,
    pub population: i32,

    // Budget allocation, as a percentage of total revenue
    pub general_fund_percentage: Decimal,
    pub infrastructure_percentage: Decimal,
    pub public_safety_percentage: Decimal,
    pub education_percentage: Decimal,
    pub community_services_percentage: Decimal,
    pub sustainability_percentage: Decimal,

    // Budgeted dollar amounts, when the city published them
    pub general_fund_amount: Option<Decimal>,
    pub infrastructure_amount: Option<Decimal>,
    pub public_safety_amount: Option<Decimal>,
    pub education_amount: Option<Decimal>,
    pub community_services_amount: Option<Decimal>,
    pub sustainability_amount: Option<Decimal>,

    pub funding_sources: Option<String>,
}
