mod common;

use blog_core::ports::{BaseRepository, PostRepository};
use reqwest::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use common::{SEED_COUNT, TestApp, generate_post_data};

fn id_of(body: &Value) -> Uuid {
    body["id"]
        .as_str()
        .and_then(|s| s.parse().ok())
        .expect("response id should be a uuid")
}

#[actix_rt::test]
async fn get_returns_all_existing_posts() {
    let app = TestApp::spawn().await;

    let res = app.client.get(app.url("/posts")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: Vec<Value> = res.json().await.unwrap();
    assert!(!body.is_empty());
    assert_eq!(body.len() as u64, app.store.count().await.unwrap());
    assert_eq!(body.len(), SEED_COUNT);

    app.teardown().await;
}

#[actix_rt::test]
async fn get_returns_posts_with_right_fields() {
    let app = TestApp::spawn().await;

    let res = app.client.get(app.url("/posts")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(
        res.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("application/json")
    );

    let body: Vec<Value> = res.json().await.unwrap();
    for post in &body {
        let mut keys: Vec<_> = post.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, ["author", "content", "id", "title"]);
    }

    let first = &body[0];
    let stored = app.store.find_by_id(id_of(first)).await.unwrap().unwrap();
    assert_eq!(first["title"], stored.title.as_str());
    assert_eq!(first["content"], stored.content.as_str());
    assert_eq!(first["author"], stored.author.full_name().as_str());

    app.teardown().await;
}

#[actix_rt::test]
async fn get_on_empty_store_returns_empty_array() {
    let app = TestApp::spawn_empty().await;

    let res = app.client.get(app.url("/posts")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Vec<Value> = res.json().await.unwrap();
    assert!(body.is_empty());

    app.teardown().await;
}

#[actix_rt::test]
async fn get_single_post_by_id() {
    let app = TestApp::spawn().await;
    let post = app.store.find_one().await.unwrap().unwrap();

    let res = app
        .client
        .get(app.url(&format!("/posts/{}", post.id)))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await.unwrap();
    assert_eq!(id_of(&body), post.id);
    assert_eq!(body["title"], post.title.as_str());
    assert_eq!(body["author"], post.author.full_name().as_str());

    app.teardown().await;
}

#[actix_rt::test]
async fn get_unknown_or_malformed_id_is_not_found() {
    let app = TestApp::spawn().await;

    for path in [format!("/posts/{}", Uuid::new_v4()), "/posts/not-a-uuid".to_string()] {
        let res = app.client.get(app.url(&path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "{path}");

        let problem: Value = res.json().await.unwrap();
        assert_eq!(problem["status"], 404);
        assert_eq!(problem["title"], "Not Found");
    }

    app.teardown().await;
}

#[actix_rt::test]
async fn post_adds_a_new_blog_post() {
    let app = TestApp::spawn().await;
    let new_post = generate_post_data();

    let res = app
        .client
        .post(app.url("/posts"))
        .json(&new_post)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let body: Value = res.json().await.unwrap();
    let expected_author = format!(
        "{} {}",
        new_post["author"]["firstName"].as_str().unwrap(),
        new_post["author"]["lastName"].as_str().unwrap()
    );
    assert_eq!(body["title"], new_post["title"]);
    assert_eq!(body["content"], new_post["content"]);
    assert_eq!(body["author"], expected_author.as_str());
    assert!(!body["id"].is_null());

    let stored = app.store.find_by_id(id_of(&body)).await.unwrap().unwrap();
    assert_eq!(stored.title, new_post["title"].as_str().unwrap());
    assert_eq!(stored.content, new_post["content"].as_str().unwrap());
    assert_eq!(stored.author.first_name, new_post["author"]["firstName"].as_str().unwrap());
    assert_eq!(stored.author.last_name, new_post["author"]["lastName"].as_str().unwrap());
    assert_eq!(app.store.count().await.unwrap(), SEED_COUNT as u64 + 1);

    app.teardown().await;
}

#[actix_rt::test]
async fn post_round_trips_fixed_values() {
    let app = TestApp::spawn_empty().await;

    let res = app
        .client
        .post(app.url("/posts"))
        .json(&json!({
            "title": "T",
            "content": "C",
            "author": {"firstName": "F", "lastName": "L"}
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["title"], "T");
    assert_eq!(body["content"], "C");
    assert_eq!(body["author"], "F L");

    let stored = app.store.find_by_id(id_of(&body)).await.unwrap().unwrap();
    assert_eq!(stored.author.first_name, "F");
    assert_eq!(stored.author.last_name, "L");

    app.teardown().await;
}

#[actix_rt::test]
async fn post_with_missing_key_is_bad_request() {
    let app = TestApp::spawn().await;

    let res = app
        .client
        .post(app.url("/posts"))
        .json(&json!({"title": "no author", "content": "C"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let problem: Value = res.json().await.unwrap();
    assert_eq!(problem["status"], 400);
    assert_eq!(app.store.count().await.unwrap(), SEED_COUNT as u64);

    app.teardown().await;
}

#[actix_rt::test]
async fn post_with_malformed_json_is_bad_request() {
    let app = TestApp::spawn().await;

    let res = app
        .client
        .post(app.url("/posts"))
        .header("content-type", "application/json")
        .body("{\"title\": ")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    app.teardown().await;
}

#[actix_rt::test]
async fn put_updates_fields_you_send_over() {
    let app = TestApp::spawn().await;
    let post = app.store.find_one().await.unwrap().unwrap();

    let update_data = json!({
        "id": post.id,
        "title": "fofofofofofofof",
        "content": "futuristic fusion",
        "author": {"firstName": "newname", "lastName": "newlastname"}
    });

    let res = app
        .client
        .put(app.url(&format!("/posts/{}", post.id)))
        .json(&update_data)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let body: Value = res.json().await.unwrap();
    assert_eq!(id_of(&body), post.id);
    assert_eq!(body["title"], "fofofofofofofof");
    assert_eq!(body["content"], "futuristic fusion");
    assert_eq!(body["author"], "newname newlastname");

    let stored = app.store.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(stored.title, "fofofofofofofof");
    assert_eq!(stored.content, "futuristic fusion");
    assert_eq!(stored.author.first_name, "newname");
    assert_eq!(stored.author.last_name, "newlastname");
    assert_eq!(stored.created_at, post.created_at);
    assert_eq!(app.store.count().await.unwrap(), SEED_COUNT as u64);

    app.teardown().await;
}

#[actix_rt::test]
async fn put_on_unknown_id_is_not_found() {
    let app = TestApp::spawn().await;

    let res = app
        .client
        .put(app.url(&format!("/posts/{}", Uuid::new_v4())))
        .json(&generate_post_data())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.store.count().await.unwrap(), SEED_COUNT as u64);

    app.teardown().await;
}

#[actix_rt::test]
async fn delete_removes_a_blog_post_by_id() {
    let app = TestApp::spawn().await;
    let post = app.store.find_one().await.unwrap().unwrap();

    let res = app
        .client
        .delete(app.url(&format!("/posts/{}", post.id)))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(res.bytes().await.unwrap().is_empty());

    assert!(app.store.find_by_id(post.id).await.unwrap().is_none());
    assert_eq!(app.store.count().await.unwrap(), SEED_COUNT as u64 - 1);

    app.teardown().await;
}

#[actix_rt::test]
async fn delete_on_unknown_id_is_not_found() {
    let app = TestApp::spawn().await;

    let res = app
        .client
        .delete(app.url(&format!("/posts/{}", Uuid::new_v4())))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.store.count().await.unwrap(), SEED_COUNT as u64);

    app.teardown().await;
}
