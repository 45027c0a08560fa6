//! Derived figures shown alongside tax records.
//!
//! Nothing here touches the store; every function works on records the
//! client has already fetched.

pub mod breakdown;
pub mod common;

pub use breakdown::{BudgetCategory, CategoryBreakdown, budget_breakdown, category_amount, per_resident};
