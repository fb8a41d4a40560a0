//! DTOs for payments records, participants and winners.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::WinnerOutcome;
use crate::domain::entities::{NewParticipation, Participation};

/// Request body for `POST /payments`.
///
/// The payer email comes from the credential and the prize money from the
/// contest, so a client-sent `prizeMoney` is ignored.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecordPaymentRequest {
    pub contest_id: i64,
    pub name: Option<String>,
    pub img: Option<String>,

    #[serde(alias = "price")]
    #[validate(range(min = 0.0))]
    pub amount: f64,

    #[validate(length(max = 255))]
    pub transaction_id: Option<String>,
}

impl RecordPaymentRequest {
    pub fn into_new_participation(self, email: String) -> NewParticipation {
        NewParticipation {
            contest_id: self.contest_id,
            email,
            name: self.name,
            img: self.img,
            amount: self.amount,
            transaction_id: self.transaction_id,
        }
    }
}

/// Request body for `POST /contests/{id}/winner`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChooseWinnerRequest {
    pub participation_id: i64,
}

/// Stored participation record as returned by the API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipationItem {
    #[serde(rename = "_id")]
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

impl From<Participation> for ParticipationItem {
    fn from(p: Participation) -> Self {
        Self {
            id: p.id,
            contest_id: p.contest_id,
            email: p.email,
            name: p.name,
            img: p.img,
            amount: p.amount,
            prize_money: p.prize_money,
            transaction_id: p.transaction_id,
            is_win: p.is_win,
            won_at: p.won_at,
            draw_index: p.draw_index,
            paid_at: p.paid_at,
        }
    }
}

pub fn participation_items(records: Vec<Participation>) -> Vec<ParticipationItem> {
    records.into_iter().map(ParticipationItem::from).collect()
}

/// Response of both winner selection endpoints.
#[derive(Debug, Serialize)]
pub struct WinnerResponse {
    pub declared: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<ParticipationItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<WinnerOutcome> for WinnerResponse {
    fn from(outcome: WinnerOutcome) -> Self {
        match outcome {
            WinnerOutcome::Declared { winner, selection } => Self {
                declared: true,
                method: Some(selection.as_str()),
                winner: Some(winner.into()),
                message: None,
            },
            WinnerOutcome::AlreadyDeclared => Self {
                declared: false,
                method: None,
                winner: None,
                message: Some("winner already declared".to_string()),
            },
        }
    }
}
