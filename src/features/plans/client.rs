//! Client wrappers for plan management endpoints.

use crate::app_lib::{AppError, post_json_authed_empty};
use crate::features::plans::types::UpdatePlanRequest;

/// Moves the current organization onto the chosen plan.
pub async fn update_organization_plan(request: &UpdatePlanRequest) -> Result<(), AppError> {
    post_json_authed_empty("/v1/org/plan", request).await
}
