//! Client-side filtering over already-fetched collections.
//!
//! Every filter is a plain value describing the current selections; a
//! record is shown when it satisfies all of them. Because each criterion
//! is checked independently, applying filters one after another in any
//! order yields the same set as applying them together.

mod matching;
mod records;

pub use matching::{contains_ignore_case, equals_ignore_case, normalize_selection, unique_values};
pub use records::{MemberFilter, ProjectFilter, RecordFilter, TaxRecordFilter};
