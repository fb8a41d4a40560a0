//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod auth;
pub mod contests;
pub mod health;
pub mod leaderboard;
pub mod participation;
pub mod payments;
pub mod users;

pub use auth::issue_token_handler;
pub use contests::{
    admin_delete_contest_handler, create_contest_handler, creator_contests_handler,
    delete_contest_handler, get_contest_handler, list_contests_handler, popular_contests_handler,
    top_contests_handler, update_contest_handler, update_status_handler,
};
pub use health::{health_handler, root_handler};
pub use leaderboard::leaderboard_handler;
pub use participation::{
    choose_winner_handler, contest_winner_handler, draw_winner_handler, participants_handler,
    participated_contests_handler, winners_handler, won_contests_handler,
};
pub use payments::{payment_intent_handler, record_payment_handler};
pub use users::{
    delete_user_handler, list_users_handler, profile_handler, register_handler,
    update_profile_handler, update_role_handler, user_role_handler,
};
