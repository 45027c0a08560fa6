use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouncilMember {
    pub id: i32,
    pub name: String,
    pub photo_url: Option<String>,
    pub current_position: Option<String>,
    pub previous_positions: Option<String>,
    pub term_start: Option<String>,
    pub term_end: Option<String>,
    pub party_affiliation: Option<String>,

    // Free-text profile sections
    pub key_initiatives: Option<String>,
    pub voting_record: Option<String>,
    pub policy_stances: Option<String>,
    pub committee_memberships: Option<String>,
    pub education: Option<String>,
    pub awards: Option<String>,
    pub controversies: Option<String>,
    pub achievements: Option<String>,
    pub focus_areas: Option<String>,

    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    /// Whether the member currently holds a seat.
    pub is_current: bool,
}
