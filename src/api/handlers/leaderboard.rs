//! Handler for the winners leaderboard.

use axum::{Json, extract::State};

use crate::api::dto::leaderboard::LeaderboardItem;
use crate::error::AppError;
use crate::state::AppState;

/// Winning records grouped by email, most wins first.
///
/// # Endpoint
///
/// `GET /leaderboard`
///
/// # Response
///
/// ```json
/// [{"_id": "a@x.io", "name": "a", "img": null, "prizeMoney": 10.0, "totalWins": 2, "totalPrizeMoney": 30.0}]
/// ```
pub async fn leaderboard_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LeaderboardItem>>, AppError> {
    let entries = state.participation_service.leaderboard().await?;
    Ok(Json(entries.into_iter().map(LeaderboardItem::from).collect()))
}
