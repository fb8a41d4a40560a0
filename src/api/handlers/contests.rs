//! Handlers for contest authoring, review and discovery.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use validator::Validate;

use crate::api::dto::contest::{
    ContestItem, ContestListQuery, CreateContestRequest, PopularQuery, StatusRequest,
    UpdateContestRequest, contest_items,
};
use crate::api::dto::results::{DeleteResult, InsertResult, UpdateResult};
use crate::application::services::CreatorChange;
use crate::domain::entities::{ContestStatus, User};
use crate::error::AppError;
use crate::state::AppState;

const APPROVED_MESSAGE: &str = "Already approved by admin";

/// Creates a pending contest owned by the caller.
///
/// # Endpoint
///
/// `POST /contests` (creator)
///
/// Unknown fields are stored as submitted. `creatorName`/`creatorImage`
/// default to the caller's profile.
///
/// # Errors
///
/// Returns 400 if name or type is missing, or an amount is negative.
pub async fn create_contest_handler(
    State(state): State<AppState>,
    Extension(creator): Extension<User>,
    Json(payload): Json<CreateContestRequest>,
) -> Result<Json<InsertResult>, AppError> {
    payload.validate()?;

    let mut new_contest = payload.into_new_contest(creator.email);
    if new_contest.creator_name.is_none() {
        new_contest.creator_name = creator.name;
    }
    if new_contest.creator_image.is_none() {
        new_contest.creator_image = creator.photo_url;
    }

    let contest = state.contest_service.create(new_contest).await?;
    Ok(Json(InsertResult::inserted(contest.id)))
}

/// Lists contests, optionally filtered with `?status=`.
///
/// # Endpoint
///
/// `GET /contests`
///
/// # Errors
///
/// Returns 400 for an unknown status.
pub async fn list_contests_handler(
    State(state): State<AppState>,
    Query(query): Query<ContestListQuery>,
) -> Result<Json<Vec<ContestItem>>, AppError> {
    let status = query
        .status
        .as_deref()
        .map(str::parse::<ContestStatus>)
        .transpose()?;

    let contests = state.contest_service.list(status).await?;
    Ok(Json(contest_items(contests)))
}

/// Fetches one contest.
///
/// # Endpoint
///
/// `GET /contests/{id}` and, with a credential, `GET /contestDetails/{id}`
///
/// # Errors
///
/// Returns 404 if the contest does not exist.
pub async fn get_contest_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<ContestItem>, AppError> {
    let contest = state.contest_service.get(id).await?;
    Ok(Json(contest.into()))
}

/// Lists the contests authored by `email`.
///
/// # Endpoint
///
/// `GET /specificContests/{email}` (creator)
pub async fn creator_contests_handler(
    Path(email): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<ContestItem>>, AppError> {
    let contests = state.contest_service.list_by_creator(&email).await?;
    Ok(Json(contest_items(contests)))
}

/// Merges edits into a contest that is not approved yet.
///
/// # Endpoint
///
/// `PATCH /contests/{id}` (creator)
///
/// An approved contest answers `{"modifiedCount": 0, "message": "Already approved by admin"}`.
///
/// # Errors
///
/// Returns 400 for invalid fields, 404 if the contest does not exist.
pub async fn update_contest_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateContestRequest>,
) -> Result<Json<UpdateResult>, AppError> {
    payload.validate()?;

    Ok(Json(
        match state.contest_service.update(id, payload.into()).await? {
            CreatorChange::Applied(_) => UpdateResult::modified(),
            CreatorChange::Locked => UpdateResult::refused(APPROVED_MESSAGE),
        },
    ))
}

/// Deletes a contest that is not approved yet.
///
/// # Endpoint
///
/// `DELETE /contests/{id}` (creator)
///
/// An approved contest answers `{"deletedCount": 0, "message": "Already approved by admin"}`.
///
/// # Errors
///
/// Returns 404 if the contest does not exist.
pub async fn delete_contest_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<DeleteResult>, AppError> {
    Ok(Json(match state.contest_service.delete_as_creator(id).await? {
        CreatorChange::Applied(()) => DeleteResult::deleted(),
        CreatorChange::Locked => DeleteResult::refused(APPROVED_MESSAGE),
    }))
}

/// Sets a contest's review status.
///
/// # Endpoint
///
/// `PATCH /admin/contests/{id}/status` (admin) with `{"status": "approved"}`
///
/// # Errors
///
/// Returns 400 for an unknown status, 404 if the contest does not exist.
pub async fn update_status_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<StatusRequest>,
) -> Result<Json<UpdateResult>, AppError> {
    let status: ContestStatus = payload.status.parse()?;
    state.contest_service.set_status(id, status).await?;
    Ok(Json(UpdateResult::modified()))
}

/// Deletes any contest, approved or not.
///
/// # Endpoint
///
/// `DELETE /admin/contests/{id}` (admin)
///
/// # Errors
///
/// Returns 404 if the contest does not exist.
pub async fn admin_delete_contest_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<DeleteResult>, AppError> {
    state.contest_service.delete_as_admin(id).await?;
    Ok(Json(DeleteResult::deleted()))
}

/// Contests whose type matches `?search=`, or the five most joined.
///
/// # Endpoint
///
/// `GET /popularContests`
pub async fn popular_contests_handler(
    State(state): State<AppState>,
    Query(query): Query<PopularQuery>,
) -> Result<Json<Vec<ContestItem>>, AppError> {
    let contests = state
        .contest_service
        .popular(query.search.as_deref())
        .await?;
    Ok(Json(contest_items(contests)))
}

/// The ten most joined contests.
///
/// # Endpoint
///
/// `GET /populerCreators`
///
/// Despite the path this ranks contests, not distinct creators; the path is
/// kept for existing clients.
pub async fn top_contests_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContestItem>>, AppError> {
    let contests = state.contest_service.top_contests().await?;
    Ok(Json(contest_items(contests)))
}
