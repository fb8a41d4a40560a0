//! DTO for the winners leaderboard.

use serde::Serialize;

use crate::domain::entities::LeaderboardEntry;

/// One participant's aggregated wins.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardItem {
    #[serde(rename = "_id")]
    pub email: String,
    pub name: Option<String>,
    pub img: Option<String>,
    pub prize_money: f64,
    pub total_wins: i64,
    pub total_prize_money: f64,
}

impl From<LeaderboardEntry> for LeaderboardItem {
    fn from(e: LeaderboardEntry) -> Self {
        Self {
            email: e.email,
            name: e.name,
            img: e.img,
            prize_money: e.prize_money,
            total_wins: e.total_wins,
            total_prize_money: e.total_prize_money,
        }
    }
}
