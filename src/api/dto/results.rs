//! Write-result envelopes shared by create/update/delete endpoints.
//!
//! Refused creator actions and duplicate registrations answer with `200` and
//! a zero count plus `message` instead of an error status.

use serde::Serialize;

/// Result of an insert.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsertResult {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub acknowledged: bool,
    pub inserted_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl InsertResult {
    pub fn inserted(id: i64) -> Self {
        Self {
            acknowledged: true,
            inserted_id: Some(id),
            message: None,
        }
    }

    pub fn skipped(message: impl Into<String>) -> Self {
        Self {
            acknowledged: false,
            inserted_id: None,
            message: Some(message.into()),
        }
    }
}

/// Result of an update.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub acknowledged: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_count: Option<u64>,
    pub modified_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl UpdateResult {
    pub fn modified() -> Self {
        Self {
            acknowledged: true,
            matched_count: Some(1),
            modified_count: 1,
            message: None,
        }
    }

    pub fn refused(message: impl Into<String>) -> Self {
        Self {
            acknowledged: false,
            matched_count: None,
            modified_count: 0,
            message: Some(message.into()),
        }
    }
}

/// Result of a delete.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub acknowledged: bool,
    pub deleted_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DeleteResult {
    pub fn deleted() -> Self {
        Self {
            acknowledged: true,
            deleted_count: 1,
            message: None,
        }
    }

    pub fn refused(message: impl Into<String>) -> Self {
        Self {
            acknowledged: false,
            deleted_count: 0,
            message: Some(message.into()),
        }
    }
}
