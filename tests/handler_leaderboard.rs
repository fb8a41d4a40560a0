mod common;

use common::CREATOR;
use serde_json::{Value, json};

/// Creates a contest with one entry by `email` and declares that entry the winner.
async fn win(app: &common::TestApp, email: &str, prize_money: f64) {
    let id = app
        .create_contest_with_prize("Weekly", "Design", prize_money)
        .await;
    let record = app.pay(id, email).await;

    app.as_user(app.server.post(&format!("/contests/{id}/winner")), CREATOR)
        .json(&json!({ "participationId": record }))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_leaderboard_empty() {
    let app = common::create_test_app().await;

    let response = app.server.get("/leaderboard").await;

    response.assert_status_ok();
    response.assert_json(&json!([]));
}

#[tokio::test]
async fn test_leaderboard_groups_wins_by_email() {
    let app = common::create_test_app().await;
    win(&app, "b@example.com", 5.0).await;
    win(&app, "a@example.com", 10.0).await;
    win(&app, "a@example.com", 20.0).await;

    let response = app.server.get("/leaderboard").await;

    response.assert_status_ok();
    let entries = response.json::<Vec<Value>>();
    assert_eq!(entries.len(), 2);

    assert_eq!(entries[0]["_id"], "a@example.com");
    assert_eq!(entries[0]["totalWins"], 2);
    assert_eq!(entries[0]["totalPrizeMoney"], 30.0);
    assert_eq!(entries[0]["name"], "a");

    assert_eq!(entries[1]["_id"], "b@example.com");
    assert_eq!(entries[1]["totalWins"], 1);
    assert_eq!(entries[1]["totalPrizeMoney"], 5.0);
}

#[tokio::test]
async fn test_leaderboard_ignores_losing_entries() {
    let app = common::create_test_app().await;
    let id = app.create_contest("Weekly", "Design").await;
    app.pay(id, "loser@example.com").await;
    win(&app, "winner@example.com", 50.0).await;

    let entries = app.server.get("/leaderboard").await.json::<Vec<Value>>();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["_id"], "winner@example.com");
}
