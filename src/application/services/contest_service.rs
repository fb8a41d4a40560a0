//! Contest management and discovery service.

use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{Contest, ContestPatch, ContestStatus, NewContest};
use crate::domain::repositories::ContestRepository;
use crate::error::AppError;

/// Number of contests in the "popular" listing without a search term.
pub const POPULAR_LIMIT: i64 = 5;

/// Number of contests in the top-contests ranking.
pub const TOP_CONTESTS_LIMIT: i64 = 10;

/// Result of a creator-side mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum CreatorChange<T> {
    Applied(T),
    /// The contest is approved and therefore frozen for its creator.
    Locked,
}

/// Service for contest lifecycle, review and discovery.
///
/// Creator-side edits and deletes are refused once an admin approves a
/// contest. Admin deletes are unconditional.
pub struct ContestService {
    repository: Arc<dyn ContestRepository>,
}

impl ContestService {
    /// Creates a new contest service.
    pub fn new(repository: Arc<dyn ContestRepository>) -> Self {
        Self { repository }
    }

    /// Creates a contest in `pending` status.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if name or type is blank, or an amount is
    /// negative or not finite.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn create(&self, new_contest: NewContest) -> Result<Contest, AppError> {
        require_text("contestName", &new_contest.name)?;
        require_text("contestType", &new_contest.contest_type)?;
        require_amount("price", new_contest.price)?;
        require_amount("prizeMoney", new_contest.prize_money)?;

        let contest = self.repository.create(new_contest).await?;
        tracing::info!(
            contest_id = contest.id,
            creator = %contest.creator_email,
            "Contest created"
        );
        Ok(contest)
    }

    /// Lists all contests, optionally restricted to one status.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn list(&self, status: Option<ContestStatus>) -> Result<Vec<Contest>, AppError> {
        self.repository.list(status).await
    }

    /// Lists the contests authored by a creator.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn list_by_creator(&self, creator_email: &str) -> Result<Vec<Contest>, AppError> {
        self.repository.list_by_creator(creator_email).await
    }

    /// Fetches one contest.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the contest does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn get(&self, id: i64) -> Result<Contest, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| contest_not_found(id))
    }

    /// Merges creator edits into a contest that is not yet approved.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for blank names or invalid amounts.
    /// Returns [`AppError::NotFound`] if the contest does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn update(
        &self,
        id: i64,
        patch: ContestPatch,
    ) -> Result<CreatorChange<Contest>, AppError> {
        if let Some(name) = &patch.name {
            require_text("contestName", name)?;
        }
        if let Some(contest_type) = &patch.contest_type {
            require_text("contestType", contest_type)?;
        }
        if let Some(price) = patch.price {
            require_amount("price", price)?;
        }
        if let Some(prize) = patch.prize_money {
            require_amount("prizeMoney", prize)?;
        }

        if let Some(contest) = self.repository.update_unless_approved(id, patch).await? {
            tracing::info!(contest_id = id, "Contest updated by creator");
            return Ok(CreatorChange::Applied(contest));
        }

        // Nothing matched: tell a missing contest apart from an approved one.
        self.get(id).await?;
        Ok(CreatorChange::Locked)
    }

    /// Deletes a contest on behalf of its creator unless it is approved.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the contest does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn delete_as_creator(&self, id: i64) -> Result<CreatorChange<()>, AppError> {
        if self.repository.delete_unless_approved(id).await? {
            tracing::info!(contest_id = id, "Contest deleted by creator");
            return Ok(CreatorChange::Applied(()));
        }

        self.get(id).await?;
        Ok(CreatorChange::Locked)
    }

    /// Sets the review status of a contest.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the contest does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn set_status(&self, id: i64, status: ContestStatus) -> Result<(), AppError> {
        if !self.repository.set_status(id, status).await? {
            return Err(contest_not_found(id));
        }
        tracing::info!(contest_id = id, status = %status, "Contest status changed");
        Ok(())
    }

    /// Deletes a contest regardless of its status.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the contest does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn delete_as_admin(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(contest_not_found(id));
        }
        tracing::info!(contest_id = id, "Contest deleted by admin");
        Ok(())
    }

    /// Contests whose type contains `search` (case-insensitive), or the
    /// [`POPULAR_LIMIT`] most joined contests when no search term is given.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn popular(&self, search: Option<&str>) -> Result<Vec<Contest>, AppError> {
        match search.map(str::trim).filter(|s| !s.is_empty()) {
            Some(term) => self.repository.search_by_type(term).await,
            None => self.repository.top_by_participation(POPULAR_LIMIT).await,
        }
    }

    /// The [`TOP_CONTESTS_LIMIT`] most joined contests.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn top_contests(&self) -> Result<Vec<Contest>, AppError> {
        self.repository
            .top_by_participation(TOP_CONTESTS_LIMIT)
            .await
    }
}

fn contest_not_found(id: i64) -> AppError {
    AppError::not_found("Contest not found", json!({ "id": id }))
}

fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::bad_request(
            "Field must not be blank",
            json!({ "field": field }),
        ));
    }
    Ok(())
}

fn require_amount(field: &str, value: f64) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::bad_request(
            "Amount must be a non-negative number",
            json!({ "field": field }),
        ));
    }
    Ok(())
}
