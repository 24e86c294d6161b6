//! Request types for plan management endpoints.

use crate::features::auth::types::Plan;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdatePlanRequest {
    pub plan: Plan,
}
