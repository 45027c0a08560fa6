//! Per-category budget breakdown of a [`TaxRecord`].
//!
//! The store keeps only each category's share of total revenue; the dollar
//! figure and the per-resident figure are computed here:
//!
//! ```text
//! amount       = total_tax_revenue × percentage / 100
//! per_resident = amount / population
//! ```
//!
//! No rounding is applied; callers round at display time with
//! [`round_half_up`](super::common::round_half_up).

use rust_decimal::Decimal;

use crate::models::TaxRecord;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Budget categories a tax record allocates revenue to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BudgetCategory {
    GeneralFund,
    Infrastructure,
    PublicSafety,
    Education,
    CommunityServices,
    Sustainability,
}

impl BudgetCategory {
    /// Display order.
    pub const ALL: [BudgetCategory; 6] = [
        Self::GeneralFund,
        Self::Infrastructure,
        Self::PublicSafety,
        Self::Education,
        Self::CommunityServices,
        Self::Sustainability,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::GeneralFund => "General Fund",
            Self::Infrastructure => "Infrastructure",
            Self::PublicSafety => "Public Safety",
            Self::Education => "Education",
            Self::CommunityServices => "Community Services",
            Self::Sustainability => "Sustainability",
        }
    }

    /// This category's share of total revenue, in percent.
    pub fn percentage_of(&self, record: &TaxRecord) -> Decimal {
        match self {
            Self::GeneralFund => record.general_fund_percentage,
            Self::Infrastructure => record.infrastructure_percentage,
            Self::PublicSafety => record.public_safety_percentage,
            Self::Education => record.education_percentage,
            Self::CommunityServices => record.community_services_percentage,
            Self::Sustainability => record.sustainability_percentage,
        }
    }

    /// The dollar amount the city published for this category, if any.
    pub fn published_amount_of(&self, record: &TaxRecord) -> Option<Decimal> {
        match self {
            Self::GeneralFund => record.general_fund_amount,
            Self::Infrastructure => record.infrastructure_amount,
            Self::PublicSafety => record.public_safety_amount,
            Self::Education => record.education_amount,
            Self::CommunityServices => record.community_services_amount,
            Self::Sustainability => record.sustainability_amount,
        }
    }
}

/// One row of the breakdown table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBreakdown {
    pub category: BudgetCategory,
    pub percentage: Decimal,
    pub amount: Decimal,
    /// `None` when the record has no population to divide by.
    pub per_resident: Option<Decimal>,
}

/// Dollar amount of `total` represented by `percentage` percent.
pub fn category_amount(total: Decimal, percentage: Decimal) -> Decimal {
    total * percentage / HUNDRED
}

/// `amount` spread evenly over `population` residents.
pub fn per_resident(amount: Decimal, population: i32) -> Option<Decimal> {
    if population <= 0 {
        return None;
    }
    amount.checked_div(Decimal::from(population))
}

/// Breakdown of every category, in [`BudgetCategory::ALL`] order.
pub fn budget_breakdown(record: &TaxRecord) -> Vec<CategoryBreakdown> {
    BudgetCategory::ALL
        .iter()
        .map(|&category| {
            let percentage = category.percentage_of(record);
            let amount = category_amount(record.total_tax_revenue, percentage);
            CategoryBreakdown {
                category,
                percentage,
                amount,
                per_resident: per_resident(amount, record.population),
            }
        })
        .collect()
}
