//! Handler functions for user-facing account data.

use axum::{Extension, Json};
use serde::Serialize;

use crate::auth::models::{AccountSummary, AuthorizedAccount};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub success: bool,
    pub user_data: AccountSummary,
}

/// `GET /dashboard`: echoes the authorized account's public data.
pub async fn dashboard(
    Extension(AuthorizedAccount(account)): Extension<AuthorizedAccount>,
) -> Json<DashboardResponse> {
    Json(DashboardResponse {
        success: true,
        user_data: account,
    })
}
