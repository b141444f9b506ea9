//! List endpoint: filtering, search, sorting, pagination, response shape.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{body_json, create_todo, detail, request, send, test_app};
use serde_json::Value;

/// Three todos; "Walk the dog" is completed.
async fn seeded_app() -> Router {
    let app = test_app().await;
    create_todo(&app, "Buy milk").await;
    let dog = create_todo(&app, "Walk the dog").await;
    create_todo(&app, "Buy eggs").await;
    send(&app, request("POST", &format!("/todos/{}/complete", dog.id))).await;
    app
}

fn titles(items: &Value) -> Vec<String> {
    items
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap().to_string())
        .collect()
}

// --- response shape ---

#[tokio::test]
async fn no_params_returns_bare_array_newest_first() {
    let app = seeded_app().await;
    let resp = send(&app, request("GET", "/todos")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let value: Value = body_json(resp).await;
    assert!(value.is_array());
    assert_eq!(
        titles(&value),
        vec!["Buy eggs", "Walk the dog", "Buy milk"]
    );
}

#[tokio::test]
async fn empty_search_param_still_selects_the_envelope() {
    let app = seeded_app().await;
    let resp = send(&app, request("GET", "/todos?search=")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let value: Value = body_json(resp).await;
    assert!(value.is_object());
    assert_eq!(value["page"], 1);
    assert_eq!(value["per_page"], 10);
    assert_eq!(value["total"], 3);
    assert_eq!(value["items"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn unknown_param_selects_the_envelope_without_filtering() {
    let app = seeded_app().await;
    let resp = send(&app, request("GET", "/todos?foo=bar")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let value: Value = body_json(resp).await;
    assert!(value.is_object());
    assert_eq!(value["total"], 3);
}

#[tokio::test]
async fn envelope_has_exactly_four_keys() {
    let app = seeded_app().await;
    let resp = send(&app, request("GET", "/todos?page=1")).await;
    let value: Value = body_json(resp).await;
    let obj = value.as_object().unwrap();
    assert_eq!(obj.len(), 4);
    for key in ["items", "page", "per_page", "total"] {
        assert!(obj.contains_key(key), "missing {key}");
    }
}

// --- filtering ---

#[tokio::test]
async fn filter_completed_true() {
    let app = seeded_app().await;
    let resp = send(&app, request("GET", "/todos?completed=true")).await;
    let value: Value = body_json(resp).await;
    assert_eq!(titles(&value["items"]), vec!["Walk the dog"]);
    assert_eq!(value["total"], 1);
}

#[tokio::test]
async fn filter_completed_false() {
    let app = seeded_app().await;
    let resp = send(&app, request("GET", "/todos?completed=false")).await;
    let value: Value = body_json(resp).await;
    assert_eq!(value["items"].as_array().unwrap().len(), 2);
    assert_eq!(value["total"], 2);
}

#[tokio::test]
async fn filter_completed_rejects_anything_else() {
    let app = test_app().await;
    let resp = send(&app, request("GET", "/todos?completed=maybe")).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(detail(resp).await, "completed must be true or false");

    // Case-sensitive: "True" is not accepted.
    let resp = send(&app, request("GET", "/todos?completed=True")).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- search ---

#[tokio::test]
async fn search_is_case_insensitive_substring_match() {
    let app = seeded_app().await;
    let resp = send(&app, request("GET", "/todos?search=BUY")).await;
    let value: Value = body_json(resp).await;
    let mut found = titles(&value["items"]);
    found.sort();
    assert_eq!(found, vec!["Buy eggs", "Buy milk"]);
    assert_eq!(value["total"], 2);
}

#[tokio::test]
async fn search_combines_with_completed_filter() {
    let app = seeded_app().await;
    let resp = send(&app, request("GET", "/todos?search=buy&completed=false")).await;
    let value: Value = body_json(resp).await;
    assert_eq!(value["total"], 2);
}

#[tokio::test]
async fn search_treats_like_wildcards_as_literals() {
    let app = test_app().await;
    create_todo(&app, "Save 50% on milk").await;
    create_todo(&app, "Save 500 on rent").await;
    create_todo(&app, "snapshot_2024").await;
    create_todo(&app, "snapshotX2024").await;

    let resp = send(&app, request("GET", "/todos?search=50%25")).await;
    let value: Value = body_json(resp).await;
    assert_eq!(titles(&value["items"]), vec!["Save 50% on milk"]);

    let resp = send(&app, request("GET", "/todos?search=shot_")).await;
    let value: Value = body_json(resp).await;
    assert_eq!(titles(&value["items"]), vec!["snapshot_2024"]);
}

#[tokio::test]
async fn search_with_no_match_returns_empty_page() {
    let app = seeded_app().await;
    let resp = send(&app, request("GET", "/todos?search=zzz")).await;
    let value: Value = body_json(resp).await;
    assert_eq!(value["items"].as_array().unwrap().len(), 0);
    assert_eq!(value["total"], 0);
}

// --- sorting ---

#[tokio::test]
async fn sort_title_asc_is_case_insensitive() {
    let app = test_app().await;
    create_todo(&app, "banana").await;
    create_todo(&app, "Apple").await;
    create_todo(&app, "cherry").await;
    let resp = send(&app, request("GET", "/todos?sort=title&order=asc")).await;
    let value: Value = body_json(resp).await;
    assert_eq!(titles(&value["items"]), vec!["Apple", "banana", "cherry"]);
}

#[tokio::test]
async fn sort_title_desc() {
    let app = test_app().await;
    create_todo(&app, "banana").await;
    create_todo(&app, "Apple").await;
    create_todo(&app, "cherry").await;
    let resp = send(&app, request("GET", "/todos?sort=title&order=desc")).await;
    let value: Value = body_json(resp).await;
    assert_eq!(titles(&value["items"]), vec!["cherry", "banana", "Apple"]);
}

#[tokio::test]
async fn sort_id_asc_is_oldest_first() {
    let app = seeded_app().await;
    let resp = send(&app, request("GET", "/todos?sort=id&order=asc")).await;
    let value: Value = body_json(resp).await;
    assert_eq!(
        titles(&value["items"]),
        vec!["Buy milk", "Walk the dog", "Buy eggs"]
    );
}

#[tokio::test]
async fn default_sort_inside_envelope_is_id_desc() {
    let app = seeded_app().await;
    let resp = send(&app, request("GET", "/todos?per_page=10")).await;
    let value: Value = body_json(resp).await;
    assert_eq!(
        titles(&value["items"]),
        vec!["Buy eggs", "Walk the dog", "Buy milk"]
    );
}

#[tokio::test]
async fn invalid_sort_and_order_are_rejected() {
    let app = test_app().await;
    let resp = send(&app, request("GET", "/todos?sort=created")).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(detail(resp).await, "sort must be 'id' or 'title'");

    let resp = send(&app, request("GET", "/todos?order=sideways")).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(detail(resp).await, "order must be 'asc' or 'desc'");
}

// --- pagination ---

#[tokio::test]
async fn pagination_slices_and_reports_the_full_total() {
    let app = test_app().await;
    for title in ["Apple", "Banana", "Cherry", "Date", "Elderberry"] {
        create_todo(&app, title).await;
    }
    let resp = send(
        &app,
        request("GET", "/todos?sort=id&order=asc&page=2&per_page=2"),
    )
    .await;
    let value: Value = body_json(resp).await;
    assert_eq!(titles(&value["items"]), vec!["Cherry", "Date"]);
    assert_eq!(value["page"], 2);
    assert_eq!(value["per_page"], 2);
    assert_eq!(value["total"], 5);
}

#[tokio::test]
async fn page_beyond_the_total_is_empty_with_correct_total() {
    let app = seeded_app().await;
    let resp = send(&app, request("GET", "/todos?page=100")).await;
    let value: Value = body_json(resp).await;
    assert_eq!(value["items"].as_array().unwrap().len(), 0);
    assert_eq!(value["total"], 3);
}

#[tokio::test]
async fn page_must_be_a_positive_integer() {
    let app = test_app().await;
    for bad in ["0", "-1", "abc", "1.5"] {
        let resp = send(&app, request("GET", &format!("/todos?page={bad}"))).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY, "page={bad}");
        assert_eq!(detail(resp).await, "page must be a positive integer");
    }
}

#[tokio::test]
async fn per_page_must_be_between_1_and_100() {
    let app = test_app().await;
    for bad in ["0", "101", "abc", "1.5"] {
        let resp = send(&app, request("GET", &format!("/todos?per_page={bad}"))).await;
        assert_eq!(
            resp.status(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "per_page={bad}"
        );
        assert_eq!(
            detail(resp).await,
            "per_page must be an integer between 1 and 100"
        );
    }
}

// --- validation order across params ---

#[tokio::test]
async fn completed_is_checked_before_sort_order_and_paging() {
    let app = test_app().await;
    let resp = send(
        &app,
        request(
            "GET",
            "/todos?completed=maybe&sort=bad&order=bad&page=x&per_page=y",
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(detail(resp).await, "completed must be true or false");
}

#[tokio::test]
async fn sort_is_checked_before_order() {
    let app = test_app().await;
    let resp = send(&app, request("GET", "/todos?sort=bad&order=bad")).await;
    assert_eq!(detail(resp).await, "sort must be 'id' or 'title'");
}

#[tokio::test]
async fn page_is_checked_before_per_page() {
    let app = test_app().await;
    let resp = send(&app, request("GET", "/todos?page=x&per_page=y")).await;
    assert_eq!(detail(resp).await, "page must be a positive integer");
}
