//! In-process document store for development and tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use std::collections::{BTreeMap, HashSet};
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::{
    Contest, ContestPatch, ContestStatus, LeaderboardEntry, NewContest, NewParticipation,
    NewUser, Participation, ProfilePatch, Role, User,
};
use crate::domain::repositories::{ContestRepository, ParticipationRepository, UserRepository};
use crate::error::AppError;

#[derive(Default)]
struct Collections {
    users: BTreeMap<i64, User>,
    contests: BTreeMap<i64, Contest>,
    payments: BTreeMap<i64, Participation>,
    next_id: i64,
}

impl Collections {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Volatile store implementing every repository trait.
///
/// All collections sit behind one lock, so each repository call (including
/// the cross-collection payment record) is atomic with respect to the others.
/// Ids come from a single sequence shared by the collections.
///
/// # Use Cases
///
/// - Local development without PostgreSQL (`STORAGE_BACKEND=memory`)
/// - HTTP integration tests
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        debug!("Using MemoryStore (data is not persisted)");
        Self::default()
    }
}

fn sort_newest_first(contests: &mut [Contest]) {
    contests.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
}

fn sort_by_participation(contests: &mut [Contest]) {
    contests.sort_by(|a, b| {
        b.participate_count
            .cmp(&a.participate_count)
            .then(a.id.cmp(&b.id))
    });
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_if_absent(&self, new_user: NewUser) -> Result<Option<User>, AppError> {
        let mut db = self.inner.write().await;

        if db.users.values().any(|u| u.email == new_user.email) {
            return Ok(None);
        }

        let now = Utc::now();
        let user = User {
            id: db.next_id(),
            email: new_user.email,
            name: new_user.name,
            photo_url: new_user.photo_url,
            role: new_user.role,
            extra: new_user.extra,
            created_at: now,
            updated_at: now,
        };
        db.users.insert(user.id, user.clone());

        Ok(Some(user))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let db = self.inner.read().await;
        Ok(db.users.values().find(|u| u.email == email).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let db = self.inner.read().await;
        Ok(db.users.values().cloned().collect())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut db = self.inner.write().await;
        Ok(db.users.remove(&id).is_some())
    }

    async fn update_role(&self, id: i64, role: Role) -> Result<bool, AppError> {
        let mut db = self.inner.write().await;
        match db.users.get_mut(&id) {
            Some(user) => {
                user.role = role;
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_profile(
        &self,
        email: &str,
        patch: ProfilePatch,
    ) -> Result<Option<User>, AppError> {
        let mut db = self.inner.write().await;
        let Some(user) = db.users.values_mut().find(|u| u.email == email) else {
            return Ok(None);
        };

        if let Some(name) = patch.name {
            user.name = Some(name);
        }
        if let Some(photo_url) = patch.photo_url {
            user.photo_url = Some(photo_url);
        }
        user.updated_at = Utc::now();

        Ok(Some(user.clone()))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[async_trait]
impl ContestRepository for MemoryStore {
    async fn create(&self, new_contest: NewContest) -> Result<Contest, AppError> {
        let mut db = self.inner.write().await;

        let now = Utc::now();
        let contest = Contest {
            id: db.next_id(),
            creator_email: new_contest.creator_email,
            creator_name: new_contest.creator_name,
            creator_image: new_contest.creator_image,
            name: new_contest.name,
            contest_type: new_contest.contest_type,
            image: new_contest.image,
            description: new_contest.description,
            task: new_contest.task,
            price: new_contest.price,
            prize_money: new_contest.prize_money,
            deadline: new_contest.deadline,
            status: ContestStatus::Pending,
            participate_count: 0,
            extra: new_contest.extra,
            created_at: now,
            updated_at: now,
        };
        db.contests.insert(contest.id, contest.clone());

        Ok(contest)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Contest>, AppError> {
        let db = self.inner.read().await;
        Ok(db.contests.get(&id).cloned())
    }

    async fn list(&self, status: Option<ContestStatus>) -> Result<Vec<Contest>, AppError> {
        let db = self.inner.read().await;
        let mut contests: Vec<Contest> = db
            .contests
            .values()
            .filter(|c| status.is_none_or(|s| c.status == s))
            .cloned()
            .collect();
        sort_newest_first(&mut contests);
        Ok(contests)
    }

    async fn list_by_creator(&self, creator_email: &str) -> Result<Vec<Contest>, AppError> {
        let db = self.inner.read().await;
        let mut contests: Vec<Contest> = db
            .contests
            .values()
            .filter(|c| c.creator_email == creator_email)
            .cloned()
            .collect();
        sort_newest_first(&mut contests);
        Ok(contests)
    }

    async fn update_unless_approved(
        &self,
        id: i64,
        patch: ContestPatch,
    ) -> Result<Option<Contest>, AppError> {
        let mut db = self.inner.write().await;
        match db.contests.get_mut(&id) {
            Some(contest) if !contest.is_approved() => {
                patch.apply(contest);
                contest.updated_at = Utc::now();
                Ok(Some(contest.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn set_status(&self, id: i64, status: ContestStatus) -> Result<bool, AppError> {
        let mut db = self.inner.write().await;
        match db.contests.get_mut(&id) {
            Some(contest) => {
                contest.status = status;
                contest.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_unless_approved(&self, id: i64) -> Result<bool, AppError> {
        let mut db = self.inner.write().await;
        match db.contests.get(&id) {
            Some(contest) if !contest.is_approved() => {
                db.contests.remove(&id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut db = self.inner.write().await;
        Ok(db.contests.remove(&id).is_some())
    }

    async fn top_by_participation(&self, limit: i64) -> Result<Vec<Contest>, AppError> {
        let db = self.inner.read().await;
        let mut contests: Vec<Contest> = db.contests.values().cloned().collect();
        sort_by_participation(&mut contests);
        contests.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(contests)
    }

    async fn search_by_type(&self, query: &str) -> Result<Vec<Contest>, AppError> {
        let needle = query.to_lowercase();
        let db = self.inner.read().await;
        let mut contests: Vec<Contest> = db
            .contests
            .values()
            .filter(|c| c.contest_type.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        sort_by_participation(&mut contests);
        Ok(contests)
    }
}

#[async_trait]
impl ParticipationRepository for MemoryStore {
    async fn record(&self, new_participation: NewParticipation) -> Result<Participation, AppError> {
        let mut db = self.inner.write().await;

        let Some(contest) = db.contests.get_mut(&new_participation.contest_id) else {
            return Err(AppError::not_found(
                "Contest not found",
                json!({ "contestId": new_participation.contest_id }),
            ));
        };
        contest.participate_count += 1;
        contest.updated_at = Utc::now();
        let prize_money = contest.prize_money;

        let participation = Participation {
            id: db.next_id(),
            contest_id: new_participation.contest_id,
            email: new_participation.email,
            name: new_participation.name,
            img: new_participation.img,
            amount: new_participation.amount,
            prize_money,
            transaction_id: new_participation.transaction_id,
            is_win: false,
            won_at: None,
            draw_index: None,
            paid_at: Utc::now(),
        };
        db.payments.insert(participation.id, participation.clone());

        Ok(participation)
    }

    async fn list_by_contest(&self, contest_id: i64) -> Result<Vec<Participation>, AppError> {
        let db = self.inner.read().await;
        Ok(db
            .payments
            .values()
            .filter(|p| p.contest_id == contest_id)
            .cloned()
            .collect())
    }

    async fn contests_entered_by(
        &self,
        email: &str,
        won_only: bool,
    ) -> Result<Vec<Contest>, AppError> {
        let db = self.inner.read().await;
        let ids: HashSet<i64> = db
            .payments
            .values()
            .filter(|p| p.email == email && (!won_only || p.is_win))
            .map(|p| p.contest_id)
            .collect();

        let mut contests: Vec<Contest> = db
            .contests
            .values()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect();
        // Soonest deadline first, open-ended contests last.
        contests.sort_by(|a, b| match (a.deadline, b.deadline) {
            (Some(x), Some(y)) => x.cmp(&y).then(a.id.cmp(&b.id)),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.id.cmp(&b.id),
        });
        Ok(contests)
    }

    async fn has_winner(&self, contest_id: i64) -> Result<bool, AppError> {
        let db = self.inner.read().await;
        Ok(db
            .payments
            .values()
            .any(|p| p.contest_id == contest_id && p.is_win))
    }

    async fn declare_winner(
        &self,
        contest_id: i64,
        participation_id: i64,
        draw_index: Option<i32>,
        won_at: DateTime<Utc>,
    ) -> Result<Option<Participation>, AppError> {
        let mut db = self.inner.write().await;

        if db
            .payments
            .values()
            .any(|p| p.contest_id == contest_id && p.is_win)
        {
            return Ok(None);
        }

        match db.payments.get_mut(&participation_id) {
            Some(p) if p.contest_id == contest_id => {
                p.is_win = true;
                p.won_at = Some(won_at);
                p.draw_index = draw_index;
                Ok(Some(p.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn winners(&self, contest_id: Option<i64>) -> Result<Vec<Participation>, AppError> {
        let db = self.inner.read().await;
        let mut winners: Vec<Participation> = db
            .payments
            .values()
            .filter(|p| p.is_win && contest_id.is_none_or(|id| p.contest_id == id))
            .cloned()
            .collect();
        winners.sort_by(|a, b| b.won_at.cmp(&a.won_at).then(b.id.cmp(&a.id)));
        Ok(winners)
    }

    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, AppError> {
        let db = self.inner.read().await;

        // Payments iterate in id order, so the first record seen per email is
        // the group representative.
        let mut groups: BTreeMap<&str, LeaderboardEntry> = BTreeMap::new();
        for p in db.payments.values().filter(|p| p.is_win) {
            let entry = groups
                .entry(p.email.as_str())
                .or_insert_with(|| LeaderboardEntry {
                    email: p.email.clone(),
                    name: p.name.clone(),
                    img: p.img.clone(),
                    prize_money: p.prize_money,
                    total_wins: 0,
                    total_prize_money: 0.0,
                });
            entry.total_wins += 1;
            entry.total_prize_money += p.prize_money;
        }

        // Stable sort keeps the email order for equal win counts.
        let mut entries: Vec<LeaderboardEntry> = groups.into_values().collect();
        entries.sort_by(|a, b| b.total_wins.cmp(&a.total_wins));
        Ok(entries)
    }
}
