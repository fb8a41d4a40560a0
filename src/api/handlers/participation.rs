//! Handlers for participants, entered/won contests and winner selection.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::contest::{ContestItem, contest_items};
use crate::api::dto::participation::{
    ChooseWinnerRequest, ParticipationItem, WinnerResponse, participation_items,
};
use crate::error::AppError;
use crate::state::AppState;

/// Raw participation records of a contest, in payment order.
///
/// # Endpoint
///
/// `GET /participants/{contestId}`
pub async fn participants_handler(
    Path(contest_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Vec<ParticipationItem>>, AppError> {
    let records = state.participation_service.participants(contest_id).await?;
    Ok(Json(participation_items(records)))
}

/// Contests `email` has paid to enter.
///
/// # Endpoint
///
/// `GET /participatedContests/{email}` (credential)
pub async fn participated_contests_handler(
    Path(email): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<ContestItem>>, AppError> {
    let contests = state.participation_service.entered_contests(&email).await?;
    Ok(Json(contest_items(contests)))
}

/// Contests `email` has won.
///
/// # Endpoint
///
/// `GET /wonContests/{email}` (credential)
pub async fn won_contests_handler(
    Path(email): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<ContestItem>>, AppError> {
    let contests = state.participation_service.won_contests(&email).await?;
    Ok(Json(contest_items(contests)))
}

/// Draws a winner uniformly at random among the contest's participants.
///
/// # Endpoint
///
/// `POST /contests/{id}/winner/draw` (creator)
///
/// # Response
///
/// `{"declared": true, "method": "draw", "winner": {...}}`, or
/// `{"declared": false, "message": "winner already declared"}` when a winner
/// exists. A second call never changes the winner.
///
/// # Errors
///
/// Returns 404 if the contest has no participants.
pub async fn draw_winner_handler(
    Path(contest_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<WinnerResponse>, AppError> {
    let outcome = state.participation_service.draw_winner(contest_id).await?;
    Ok(Json(outcome.into()))
}

/// Declares the named participation record the winner.
///
/// # Endpoint
///
/// `POST /contests/{id}/winner` (creator) with `{"participationId": 12}`
///
/// # Errors
///
/// Returns 404 if the record does not belong to the contest.
pub async fn choose_winner_handler(
    Path(contest_id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<ChooseWinnerRequest>,
) -> Result<Json<WinnerResponse>, AppError> {
    let outcome = state
        .participation_service
        .choose_winner(contest_id, payload.participation_id)
        .await?;
    Ok(Json(outcome.into()))
}

/// Declared winner(s) of a contest; empty while undecided.
///
/// # Endpoint
///
/// `GET /contests/{id}/winner`
pub async fn contest_winner_handler(
    Path(contest_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Vec<ParticipationItem>>, AppError> {
    let winners = state.participation_service.winners_of(contest_id).await?;
    Ok(Json(participation_items(winners)))
}

/// Every winning record.
///
/// # Endpoint
///
/// `GET /winners`
pub async fn winners_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<ParticipationItem>>, AppError> {
    let winners = state.participation_service.all_winners().await?;
    Ok(Json(participation_items(winners)))
}
