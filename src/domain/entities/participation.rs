//! Participation records (paid contest entries) and leaderboard rows.

use chrono::{DateTime, Utc};

/// Proof of a participant's paid entry into a contest.
///
/// `is_win` flips to `true` at most once per contest. `won_at` and
/// `draw_index` record when and how the winner was picked; `draw_index` is
/// `None` when the creator named the winner directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Participation {
    pub id: i64,
    pub contest_id: i64,
    pub email: String,
    pub name: Option<String>,
    pub img: Option<String>,
    pub amount: f64,
    pub prize_money: f64,
    pub transaction_id: Option<String>,
    pub is_win: bool,
    pub won_at: Option<DateTime<Utc>>,
    pub draw_index: Option<i32>,
    pub paid_at: DateTime<Utc>,
}

/// Input data for recording a completed payment.
///
/// The record's prize money is copied from the contest when it is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewParticipation {
    pub contest_id: i64,
    pub email: String,
    pub name: Option<String>,
    pub img: Option<String>,
    pub amount: f64,
    pub transaction_id: Option<String>,
}

/// How a winner was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinnerSelection {
    /// Uniform draw over the participant list; carries the drawn index.
    Draw(i32),
    /// Creator named the participation record explicitly.
    Chosen,
}

impl WinnerSelection {
    pub fn draw_index(&self) -> Option<i32> {
        match self {
            WinnerSelection::Draw(i) => Some(*i),
            WinnerSelection::Chosen => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WinnerSelection::Draw(_) => "draw",
            WinnerSelection::Chosen => "chosen",
        }
    }
}

/// Wins aggregated per participant email.
///
/// `name`, `img` and `prize_money` come from one representative winning record
/// of the group.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    pub email: String,
    pub name: Option<String>,
    pub img: Option<String>,
    pub prize_money: f64,
    pub total_wins: i64,
    pub total_prize_money: f64,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn participation(id: i64, contest_id: i64, email: &str) -> Participation {
        Participation {
            id,
            contest_id,
            email: email.to_string(),
            name: Some(email.split('@').next().unwrap_or_default().to_string()),
            img: None,
            amount: 10.0,
            prize_money: 100.0,
            transaction_id: None,
            is_win: false,
            won_at: None,
            draw_index: None,
            paid_at: Utc::now(),
        }
    }
}
