//! Records exchanged with the user assignment resource.
//!
//! # Design
//! These types mirror the mock server's schema but are defined independently;
//! integration tests catch schema drift. Outbound option types skip every
//! unset field so a partial update never overwrites remote values with `null`.
//!
//! Rates, budgets and estimates are `Decimal` in memory and JSON numbers on the wire.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A user's assignment to a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAssignment {
    pub id: i64,
    pub project_id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub deactivated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_project_manager: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of the create call: the id of the user to assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAssignmentCreateOptions {
    pub id: i64,
}

/// Partial update payload. Only the fields that are `Some` are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserAssignmentOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deactivated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_project_manager: Option<bool>,
}

/// The optional fields accepted by `HarvestClient::update_user_assignment`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UserAssignmentUpdate {
    pub deactivated: Option<bool>,
    pub hourly_rate: Option<Decimal>,
    pub budget: Option<Decimal>,
    pub is_project_manager: Option<bool>,
}

impl UserAssignmentOptions {
    /// Options naming the assignment's project and user, plus the fields in `update`.
    pub fn for_assignment(project_id: i64, user_id: i64, update: UserAssignmentUpdate) -> Self {
        Self {
            user_id: Some(user_id),
            project_id: Some(project_id),
            deactivated: update.deactivated,
            hourly_rate: update.hourly_rate,
            budget: update.budget,
            is_project_manager: update.is_project_manager,
        }
    }
}
