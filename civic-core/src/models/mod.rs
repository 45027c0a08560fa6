mod council_member;
mod project;
mod tax_record;

pub use council_member::CouncilMember;
pub use project::{Project, ProjectStatus};
pub use tax_record::TaxRecord;
