//! Paid entries, winner selection and the winners leaderboard.

use chrono::Utc;
use rand::Rng;
use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{
    Contest, LeaderboardEntry, NewParticipation, Participation, WinnerSelection,
};
use crate::domain::repositories::ParticipationRepository;
use crate::error::AppError;

/// Outcome of a winner selection attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum WinnerOutcome {
    Declared {
        winner: Participation,
        selection: WinnerSelection,
    },
    /// The contest already had a winner; nothing changed.
    AlreadyDeclared,
}

/// Service for participation records and everything derived from them.
pub struct ParticipationService {
    repository: Arc<dyn ParticipationRepository>,
}

impl ParticipationService {
    /// Creates a new participation service.
    pub fn new(repository: Arc<dyn ParticipationRepository>) -> Self {
        Self { repository }
    }

    /// Records a completed payment and bumps the contest's participant count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the amount is negative or not finite.
    /// Returns [`AppError::NotFound`] if the contest does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn record_payment(
        &self,
        new_participation: NewParticipation,
    ) -> Result<Participation, AppError> {
        let amount = new_participation.amount;
        if !amount.is_finite() || amount < 0.0 {
            return Err(AppError::bad_request(
                "Amount must be a non-negative number",
                json!({ "field": "amount" }),
            ));
        }

        let record = self.repository.record(new_participation).await?;
        tracing::info!(
            payment_id = record.id,
            contest_id = record.contest_id,
            email = %record.email,
            "Payment recorded"
        );
        Ok(record)
    }

    /// Raw participation records of a contest.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn participants(&self, contest_id: i64) -> Result<Vec<Participation>, AppError> {
        self.repository.list_by_contest(contest_id).await
    }

    /// Contests the email has paid to enter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn entered_contests(&self, email: &str) -> Result<Vec<Contest>, AppError> {
        self.repository.contests_entered_by(email, false).await
    }

    /// Contests the email has won.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn won_contests(&self, email: &str) -> Result<Vec<Contest>, AppError> {
        self.repository.contests_entered_by(email, true).await
    }

    /// Picks one participant uniformly at random and declares them the winner.
    ///
    /// The drawn index and timestamp are stored on the winning record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the contest has no participants.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn draw_winner(&self, contest_id: i64) -> Result<WinnerOutcome, AppError> {
        if self.repository.has_winner(contest_id).await? {
            return Ok(WinnerOutcome::AlreadyDeclared);
        }

        let participants = self.repository.list_by_contest(contest_id).await?;
        if participants.is_empty() {
            return Err(AppError::not_found(
                "Contest has no participants",
                json!({ "contestId": contest_id }),
            ));
        }

        let index = rand::rng().random_range(0..participants.len());
        let picked = &participants[index];
        let selection = WinnerSelection::Draw(i32::try_from(index).unwrap_or(i32::MAX));

        self.declare(contest_id, picked.id, selection).await
    }

    /// Declares the named participation record the winner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the record does not belong to the contest.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn choose_winner(
        &self,
        contest_id: i64,
        participation_id: i64,
    ) -> Result<WinnerOutcome, AppError> {
        if self.repository.has_winner(contest_id).await? {
            return Ok(WinnerOutcome::AlreadyDeclared);
        }

        match self
            .declare(contest_id, participation_id, WinnerSelection::Chosen)
            .await?
        {
            WinnerOutcome::AlreadyDeclared if !self.repository.has_winner(contest_id).await? => {
                Err(AppError::not_found(
                    "Participation record not found for contest",
                    json!({ "contestId": contest_id, "participationId": participation_id }),
                ))
            }
            outcome => Ok(outcome),
        }
    }

    async fn declare(
        &self,
        contest_id: i64,
        participation_id: i64,
        selection: WinnerSelection,
    ) -> Result<WinnerOutcome, AppError> {
        let declared = self
            .repository
            .declare_winner(
                contest_id,
                participation_id,
                selection.draw_index(),
                Utc::now(),
            )
            .await?;

        match declared {
            Some(winner) => {
                tracing::info!(
                    contest_id,
                    payment_id = winner.id,
                    email = %winner.email,
                    method = selection.as_str(),
                    "Winner declared"
                );
                Ok(WinnerOutcome::Declared { winner, selection })
            }
            // Lost a race against another declaration.
            None => Ok(WinnerOutcome::AlreadyDeclared),
        }
    }

    /// Declared winner(s) of one contest.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn winners_of(&self, contest_id: i64) -> Result<Vec<Participation>, AppError> {
        self.repository.winners(Some(contest_id)).await
    }

    /// Every winning record on the platform.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn all_winners(&self) -> Result<Vec<Participation>, AppError> {
        self.repository.winners(None).await
    }

    /// Wins grouped per email, most wins first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, AppError> {
        self.repository.leaderboard().await
    }
}
