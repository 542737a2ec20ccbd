use serde::{Deserialize, Serialize};
use validator::Validate;

/// Contact details submitted from the booking form
///
/// GET /sent/?name=...&phone=...
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContactQuery {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub phone: String,
}

/// Guided-matching request submitted from the request form
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchRequestQuery {
    #[validate(length(min = 1))]
    pub goal: String,
    #[validate(length(min = 1))]
    pub duration: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub phone: String,
}
