mod common;

use axum::http::StatusCode;
use common::{ADMIN, CREATOR, PARTICIPANT};
use contest_hub::domain::entities::ContestStatus;
use contest_hub::domain::repositories::ContestRepository;
use serde_json::{Value, json};

// ─── CREATE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_contest_as_creator() {
    let app = common::create_test_app().await;

    let response = app
        .as_user(app.server.post("/contests"), CREATOR)
        .json(&json!({
            "contestName": "Logo Sprint",
            "contestType": "Design",
            "price": 15,
            "prizeMoney": 250,
            "deadline": "2026-12-01T00:00:00Z",
            "tags": ["vector", "brand"]
        }))
        .await;

    response.assert_status_ok();
    let id = response.json::<Value>()["insertedId"].as_i64().unwrap();

    let contest = app.store.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(contest.name, "Logo Sprint");
    assert_eq!(contest.creator_email, CREATOR);
    assert_eq!(contest.status, ContestStatus::Pending);
    assert_eq!(contest.participate_count, 0);
    assert_eq!(contest.extra["tags"], json!(["vector", "brand"]));
    // Filled from the creator's profile.
    assert_eq!(contest.creator_name.as_deref(), Some("creator"));
}

#[tokio::test]
async fn test_create_contest_ignores_client_owned_fields() {
    let app = common::create_test_app().await;

    let response = app
        .as_user(app.server.post("/contests"), CREATOR)
        .json(&json!({
            "contestName": "Essay",
            "contestType": "Writing",
            "status": "approved",
            "participateCount": 99,
            "creatorEmail": "someone@else.com"
        }))
        .await;

    response.assert_status_ok();
    let id = response.json::<Value>()["insertedId"].as_i64().unwrap();

    let contest = app.store.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(contest.status, ContestStatus::Pending);
    assert_eq!(contest.participate_count, 0);
    assert_eq!(contest.creator_email, CREATOR);
    assert!(!contest.extra.contains_key("status"));
}

#[tokio::test]
async fn test_create_contest_requires_name_and_type() {
    let app = common::create_test_app().await;

    app.as_user(app.server.post("/contests"), CREATOR)
        .json(&json!({ "contestName": "", "contestType": "Design" }))
        .await
        .assert_status_bad_request();

    app.as_user(app.server.post("/contests"), CREATOR)
        .json(&json!({ "contestName": "Logo", "contestType": "Design", "price": -1 }))
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_participant_cannot_create_contest() {
    let app = common::create_test_app().await;

    let response = app
        .as_user(app.server.post("/contests"), PARTICIPANT)
        .json(&json!({ "contestName": "Logo", "contestType": "Design" }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert!(app.store.list(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_admin_is_not_a_creator() {
    let app = common::create_test_app().await;

    app.as_user(app.server.post("/contests"), ADMIN)
        .json(&json!({ "contestName": "Logo", "contestType": "Design" }))
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_contest_without_credential() {
    let app = common::create_test_app().await;

    app.server
        .post("/contests")
        .json(&json!({ "contestName": "Logo", "contestType": "Design" }))
        .await
        .assert_status_unauthorized();
}

// ─── READ ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_contests_with_status_filter() {
    let app = common::create_test_app().await;
    let first = app.create_contest("One", "Design").await;
    let _second = app.create_contest("Two", "Writing").await;
    app.set_status(first, "approved").await;

    let all = app.server.get("/contests").await.json::<Vec<Value>>();
    assert_eq!(all.len(), 2);

    let response = app.server.get("/contests").add_query_param("status", "approved").await;
    response.assert_status_ok();
    let approved = response.json::<Vec<Value>>();
    assert_eq!(approved.len(), 1);
    assert_eq!(approved[0]["_id"], first);
    assert_eq!(approved[0]["status"], "approved");

    app.server
        .get("/contests")
        .add_query_param("status", "archived")
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_get_contest() {
    let app = common::create_test_app().await;
    let id = app.create_contest("One", "Design").await;

    let response = app.server.get(&format!("/contests/{id}")).await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["_id"], id);
    assert_eq!(body["contestName"], "One");
    assert_eq!(body["participateCount"], 0);

    app.server.get("/contests/9999").await.assert_status_not_found();
}

#[tokio::test]
async fn test_contest_details_requires_credential() {
    let app = common::create_test_app().await;
    let id = app.create_contest("One", "Design").await;

    app.server
        .get(&format!("/contestDetails/{id}"))
        .await
        .assert_status_unauthorized();

    app.as_user(app.server.get(&format!("/contestDetails/{id}")), PARTICIPANT)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_contests_by_creator() {
    let app = common::create_test_app().await;
    app.create_contest("One", "Design").await;
    app.create_contest("Two", "Design").await;

    let response = app
        .as_user(app.server.get(&format!("/specificContests/{CREATOR}")), CREATOR)
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Vec<Value>>().len(), 2);

    let response = app
        .as_user(app.server.get("/specificContests/nobody@example.com"), CREATOR)
        .await;
    response.assert_status_ok();
    assert!(response.json::<Vec<Value>>().is_empty());
}

// ─── UPDATE / DELETE ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_creator_updates_pending_contest() {
    let app = common::create_test_app().await;
    let id = app.create_contest("One", "Design").await;

    let response = app
        .as_user(app.server.patch(&format!("/contests/{id}")), CREATOR)
        .json(&json!({ "contestName": "One (revised)", "prizeMoney": 500, "rules": "none" }))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({ "acknowledged": true, "matchedCount": 1, "modifiedCount": 1 }));

    let contest = app.store.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(contest.name, "One (revised)");
    assert_eq!(contest.prize_money, 500.0);
    assert_eq!(contest.contest_type, "Design");
    assert_eq!(contest.extra["rules"], "none");
}

#[tokio::test]
async fn test_approved_contest_is_locked_for_creator() {
    let app = common::create_test_app().await;
    let id = app.create_contest("One", "Design").await;
    app.set_status(id, "approved").await;

    let response = app
        .as_user(app.server.patch(&format!("/contests/{id}")), CREATOR)
        .json(&json!({ "contestName": "Changed" }))
        .await;
    response.assert_status_ok();
    response.assert_json(&json!({ "modifiedCount": 0, "message": "Already approved by admin" }));

    let response = app
        .as_user(app.server.delete(&format!("/contests/{id}")), CREATOR)
        .await;
    response.assert_status_ok();
    response.assert_json(&json!({ "deletedCount": 0, "message": "Already approved by admin" }));

    let contest = app.store.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(contest.name, "One");
}

#[tokio::test]
async fn test_rejected_contest_can_still_be_edited() {
    let app = common::create_test_app().await;
    let id = app.create_contest("One", "Design").await;
    app.set_status(id, "rejected").await;

    app.as_user(app.server.patch(&format!("/contests/{id}")), CREATOR)
        .json(&json!({ "contestName": "Resubmitted" }))
        .await
        .assert_json(&json!({ "acknowledged": true, "matchedCount": 1, "modifiedCount": 1 }));
}

#[tokio::test]
async fn test_update_missing_contest_is_not_found() {
    let app = common::create_test_app().await;

    app.as_user(app.server.patch("/contests/9999"), CREATOR)
        .json(&json!({ "contestName": "Ghost" }))
        .await
        .assert_status_not_found();

    app.as_user(app.server.delete("/contests/9999"), CREATOR)
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_creator_deletes_pending_contest() {
    let app = common::create_test_app().await;
    let id = app.create_contest("One", "Design").await;

    let response = app
        .as_user(app.server.delete(&format!("/contests/{id}")), CREATOR)
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({ "acknowledged": true, "deletedCount": 1 }));
    assert!(app.store.find_by_id(id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_participant_cannot_modify_contest() {
    let app = common::create_test_app().await;
    let id = app.create_contest("One", "Design").await;

    app.as_user(app.server.patch(&format!("/contests/{id}")), PARTICIPANT)
        .json(&json!({ "contestName": "Hijacked" }))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    app.as_user(app.server.delete(&format!("/contests/{id}")), PARTICIPANT)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let contest = app.store.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(contest.name, "One");
}

// ─── ADMIN REVIEW ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_admin_sets_status() {
    let app = common::create_test_app().await;
    let id = app.create_contest("One", "Design").await;

    let response = app
        .as_user(app.server.patch(&format!("/admin/contests/{id}/status")), ADMIN)
        .json(&json!({ "status": "approved" }))
        .await;

    response.assert_status_ok();
    let contest = app.store.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(contest.status, ContestStatus::Approved);
}

#[tokio::test]
async fn test_admin_status_validation() {
    let app = common::create_test_app().await;
    let id = app.create_contest("One", "Design").await;

    app.as_user(app.server.patch(&format!("/admin/contests/{id}/status")), ADMIN)
        .json(&json!({ "status": "maybe" }))
        .await
        .assert_status_bad_request();

    app.as_user(app.server.patch("/admin/contests/9999/status"), ADMIN)
        .json(&json!({ "status": "approved" }))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_creator_cannot_review() {
    let app = common::create_test_app().await;
    let id = app.create_contest("One", "Design").await;

    app.as_user(app.server.patch(&format!("/admin/contests/{id}/status")), CREATOR)
        .json(&json!({ "status": "approved" }))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let contest = app.store.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(contest.status, ContestStatus::Pending);
}

#[tokio::test]
async fn test_admin_deletes_approved_contest() {
    let app = common::create_test_app().await;
    let id = app.create_contest("One", "Design").await;
    app.set_status(id, "approved").await;

    let response = app
        .as_user(app.server.delete(&format!("/admin/contests/{id}")), ADMIN)
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({ "acknowledged": true, "deletedCount": 1 }));
    assert!(app.store.find_by_id(id).await.unwrap().is_none());

    app.as_user(app.server.delete(&format!("/admin/contests/{id}")), ADMIN)
        .await
        .assert_status_not_found();
}

// ─── DISCOVERY ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_popular_contests_ranked_by_participation() {
    let app = common::create_test_app().await;
    let ids = [
        app.create_contest("A", "Design").await,
        app.create_contest("B", "Writing").await,
        app.create_contest("C", "Gaming").await,
    ];
    app.pay(ids[2], PARTICIPANT).await;
    app.pay(ids[2], "other@example.com").await;
    app.pay(ids[1], PARTICIPANT).await;

    let response = app.server.get("/popularContests").await;
    response.assert_status_ok();
    let contests = response.json::<Vec<Value>>();

    let order: Vec<i64> = contests.iter().map(|c| c["_id"].as_i64().unwrap()).collect();
    assert_eq!(order, vec![ids[2], ids[1], ids[0]]);
    assert_eq!(contests[0]["participateCount"], 2);
}

#[tokio::test]
async fn test_popular_contests_limited_to_five() {
    let app = common::create_test_app().await;
    for i in 0..7 {
        app.create_contest(&format!("C{i}"), "Design").await;
    }

    let contests = app.server.get("/popularContests").await.json::<Vec<Value>>();
    assert_eq!(contests.len(), 5);

    let top = app.server.get("/populerCreators").await.json::<Vec<Value>>();
    assert_eq!(top.len(), 7);
}

#[tokio::test]
async fn test_popular_contests_search_by_type() {
    let app = common::create_test_app().await;
    let design = app.create_contest("Logo", "Graphic Design").await;
    app.create_contest("Essay", "Writing").await;

    let response = app
        .server
        .get("/popularContests")
        .add_query_param("search", "design")
        .await;

    response.assert_status_ok();
    let contests = response.json::<Vec<Value>>();
    assert_eq!(contests.len(), 1);
    assert_eq!(contests[0]["_id"], design);
}

#[tokio::test]
async fn test_top_contests_limited_to_ten() {
    let app = common::create_test_app().await;
    for i in 0..12 {
        app.create_contest(&format!("C{i}"), "Design").await;
    }

    let contests = app.server.get("/populerCreators").await.json::<Vec<Value>>();
    assert_eq!(contests.len(), 10);
}
