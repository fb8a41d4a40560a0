//! API route tables, grouped by the protection each group needs.
//!
//! The groups share paths (e.g. `GET /contests` is public, `POST /contests`
//! needs a creator); axum merges the method routers when the groups are merged.

use crate::api::handlers::{
    admin_delete_contest_handler, choose_winner_handler, contest_winner_handler,
    create_contest_handler, creator_contests_handler, delete_contest_handler,
    delete_user_handler, draw_winner_handler, get_contest_handler, health_handler,
    issue_token_handler, leaderboard_handler, list_contests_handler, list_users_handler,
    participants_handler, participated_contests_handler, payment_intent_handler,
    popular_contests_handler, profile_handler, record_payment_handler, register_handler,
    root_handler, top_contests_handler, update_contest_handler, update_profile_handler,
    update_role_handler, update_status_handler, user_role_handler, winners_handler,
    won_contests_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, patch, post},
};

/// Routes open to anyone.
///
/// - `GET  /`                        - Liveness banner
/// - `GET  /health`                  - Storage and gateway status
/// - `POST /jwt`                     - Issue a credential
/// - `POST /users`                   - Register
/// - `GET  /contests`                - List contests (`?status=`)
/// - `GET  /contests/{id}`           - One contest
/// - `GET  /contests/{id}/winner`    - Declared winner(s)
/// - `GET  /participants/{id}`       - Participation records of a contest
/// - `GET  /winners`                 - All winners
/// - `GET  /popularContests`         - Search by type or top 5
/// - `GET  /populerCreators`         - Top 10 contests
/// - `GET  /leaderboard`             - Wins per participant
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/jwt", post(issue_token_handler))
        .route("/users", post(register_handler))
        .route("/contests", get(list_contests_handler))
        .route("/contests/{id}", get(get_contest_handler))
        .route("/contests/{id}/winner", get(contest_winner_handler))
        .route("/participants/{contest_id}", get(participants_handler))
        .route("/winners", get(winners_handler))
        .route("/popularContests", get(popular_contests_handler))
        .route("/populerCreators", get(top_contests_handler))
        .route("/leaderboard", get(leaderboard_handler))
}

/// Routes that need a valid credential but no particular role.
///
/// - `GET   /userRole/{email}`              - Stored role of an email
/// - `GET   /profile`, `PATCH /profile`     - Caller's own record
/// - `GET   /contestDetails/{id}`           - One contest
/// - `GET   /participatedContests/{email}`  - Contests entered
/// - `GET   /wonContests/{email}`           - Contests won
/// - `POST  /create-payment-intent`         - Gateway intent
/// - `POST  /payments`                      - Record a completed payment
pub fn authenticated_routes() -> Router<AppState> {
    Router::new()
        .route("/userRole/{email}", get(user_role_handler))
        .route(
            "/profile",
            get(profile_handler).patch(update_profile_handler),
        )
        .route("/contestDetails/{id}", get(get_contest_handler))
        .route(
            "/participatedContests/{email}",
            get(participated_contests_handler),
        )
        .route("/wonContests/{email}", get(won_contests_handler))
        .route("/create-payment-intent", post(payment_intent_handler))
        .route("/payments", post(record_payment_handler))
}

/// Routes reserved for creators.
///
/// - `POST   /contests`                    - Create
/// - `PATCH  /contests/{id}`               - Edit unless approved
/// - `DELETE /contests/{id}`               - Delete unless approved
/// - `GET    /specificContests/{email}`    - Contests by creator
/// - `POST   /contests/{id}/winner/draw`   - Random winner
/// - `POST   /contests/{id}/winner`        - Named winner
pub fn creator_routes() -> Router<AppState> {
    Router::new()
        .route("/contests", post(create_contest_handler))
        .route(
            "/contests/{id}",
            patch(update_contest_handler).delete(delete_contest_handler),
        )
        .route("/specificContests/{email}", get(creator_contests_handler))
        .route("/contests/{id}/winner/draw", post(draw_winner_handler))
        .route("/contests/{id}/winner", post(choose_winner_handler))
}

/// Routes reserved for admins.
///
/// - `GET    /users`                       - List users
/// - `PATCH  /users/{id}`                  - Set role
/// - `DELETE /users/{id}`                  - Delete user
/// - `PATCH  /admin/contests/{id}/status`  - Review status
/// - `DELETE /admin/contests/{id}`         - Unconditional delete
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users_handler))
        .route(
            "/users/{id}",
            patch(update_role_handler).delete(delete_user_handler),
        )
        .route(
            "/admin/contests/{id}/status",
            patch(update_status_handler),
        )
        .route("/admin/contests/{id}", delete(admin_delete_contest_handler))
}
