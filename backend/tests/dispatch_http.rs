//! End-to-end behaviour of the resource dispatcher over the in-memory store.

use std::sync::Arc;

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use rstest::rstest;
use serde_json::{Value, json};

use postms::Trace;
use postms::domain::TRACE_ID_HEADER;
use postms::inbound::http::dispatch::{Dispatcher, dispatch};
use postms::inbound::http::resources::build_registry;
use postms::inbound::http::state::{HttpState, HttpStatePorts};
use postms::outbound::memory::InMemoryStore;

async fn app() -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error> {
    let store = Arc::new(InMemoryStore::new());
    let state = HttpState::new(HttpStatePorts {
        posts: store.clone(),
        comments: store.clone(),
        votes: store.clone(),
        saves: store,
    });
    let dispatcher = Dispatcher::new(build_registry().expect("registry builds"));
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(web::Data::new(dispatcher))
            .wrap(Trace)
            .default_service(web::to(dispatch)),
    )
    .await
}

async fn send<S>(app: &S, request: test::TestRequest) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body = test::read_body(response).await;
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("response body is JSON")
    };
    (status, json)
}

async fn create_post<S>(app: &S, user: &str, tags: &[&str]) -> Value
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let (status, post) = send(
        app,
        test::TestRequest::post().uri("/posts").set_json(json!({
            "userId": user,
            "title": "A post",
            "body": "text",
            "tags": tags,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    post
}

fn ids(page: &Value) -> Vec<i64> {
    page["results"]
        .as_array()
        .expect("results array")
        .iter()
        .map(|post| post["id"].as_i64().expect("numeric id"))
        .collect()
}

#[rstest]
#[case(test::TestRequest::get().uri("/comments"))]
#[case(test::TestRequest::get().uri("/widgets"))]
#[case(test::TestRequest::get().uri("/posts/1/likes"))]
#[case(test::TestRequest::get().uri("/posts/abc"))]
#[case(test::TestRequest::get().uri("/posts/"))]
#[case(test::TestRequest::get().uri("/posts/1/comments/2"))]
#[case(test::TestRequest::patch().uri("/posts/1"))]
#[case(test::TestRequest::post().uri("/tags"))]
#[actix_web::test]
async fn unroutable_requests_are_not_found(#[case] request: test::TestRequest) {
    let app = app().await;
    let response = test::call_service(&app, request.to_request()).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().contains_key(TRACE_ID_HEADER));
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body, json!({"status": 404, "message": "Not found"}));
}

#[actix_web::test]
async fn comments_are_listed_under_their_post() {
    let app = app().await;
    create_post(&app, "u1", &[]).await;
    for text in ["one", "two"] {
        let (status, _) = send(
            &app,
            test::TestRequest::post()
                .uri("/comments")
                .set_json(json!({"userId": "u2", "postId": 1, "body": text})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, comments) = send(&app, test::TestRequest::get().uri("/posts/1/comments")).await;
    assert_eq!(status, StatusCode::OK);
    let bodies: Vec<&str> = comments
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|comment| comment["body"].as_str())
        .collect();
    assert_eq!(bodies, vec!["two", "one"]);
}

#[actix_web::test]
async fn comment_on_missing_post_is_bad_request() {
    let app = app().await;
    let (status, body) = send(
        &app,
        test::TestRequest::post()
            .uri("/comments")
            .set_json(json!({"userId": "u2", "postId": 9, "body": "hi"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"status": 400, "message": "Can not create comment for non-existent post"})
    );
}

#[actix_web::test]
async fn pagination_walks_with_an_inclusive_cursor() {
    let app = app().await;
    for _ in 0..101 {
        create_post(&app, "u1", &[]).await;
    }

    let (status, first) = send(&app, test::TestRequest::get().uri("/posts")).await;
    assert_eq!(status, StatusCode::OK);
    let first_ids = ids(&first);
    assert_eq!(first_ids.len(), 100);
    assert_eq!(first_ids.first(), Some(&101));
    assert_eq!(first_ids.last(), Some(&2));
    let cursor = first["nextCursor"].as_str().expect("cursor string");
    assert!(!cursor.is_empty());

    let (status, second) = send(
        &app,
        test::TestRequest::get().uri(&format!("/posts?cursor={cursor}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&second), vec![1]);
    assert_eq!(second["nextCursor"], json!(""));
}

#[actix_web::test]
async fn exactly_one_page_has_no_cursor() {
    let app = app().await;
    for _ in 0..100 {
        create_post(&app, "u1", &[]).await;
    }
    let (_, page) = send(&app, test::TestRequest::get().uri("/posts")).await;
    assert_eq!(ids(&page).len(), 100);
    assert_eq!(page["nextCursor"], json!(""));
}

#[rstest]
#[case("/posts?cursor=***")]
#[case("/posts?cursor=MTJh")]
#[actix_web::test]
async fn foreign_cursors_are_bad_requests(#[case] uri: &str) {
    let app = app().await;
    let (status, body) = send(&app, test::TestRequest::get().uri(uri)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"status": 400, "message": "Unable to decode cursor"})
    );
}

#[actix_web::test]
async fn list_filters_by_user_and_tag() {
    let app = app().await;
    create_post(&app, "ann", &["rust"]).await;
    create_post(&app, "bob", &["rust"]).await;
    create_post(&app, "ann", &["go"]).await;

    let (_, by_user) = send(&app, test::TestRequest::get().uri("/posts?userId=ann")).await;
    assert_eq!(ids(&by_user), vec![3, 1]);
    let (_, both) = send(
        &app,
        test::TestRequest::get().uri("/posts?userId=ann&tag=rust"),
    )
    .await;
    assert_eq!(ids(&both), vec![1]);
    let (_, tags) = send(&app, test::TestRequest::get().uri("/tags")).await;
    assert_eq!(tags, json!(["go", "rust"]));
}

#[actix_web::test]
async fn saves_are_created_once_and_revived() {
    let app = app().await;
    let save = json!({"userId": "u1", "postId": 3});

    let (status, first) = send(
        &app,
        test::TestRequest::post().uri("/post-saves").set_json(&save),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, again) = send(
        &app,
        test::TestRequest::post().uri("/post-saves").set_json(&save),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(again["id"], first["id"]);

    let delete_uri = format!("/post-saves/{}", first["id"]);
    let (status, body) = send(&app, test::TestRequest::delete().uri(&delete_uri)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
    let (_, live) = send(&app, test::TestRequest::get().uri("/posts/3/saves")).await;
    assert_eq!(live, json!([]));

    let (status, revived) = send(
        &app,
        test::TestRequest::post().uri("/post-saves").set_json(&save),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(revived["id"], first["id"]);
    let (_, live) = send(&app, test::TestRequest::get().uri("/posts/3/saves")).await;
    assert_eq!(live.as_array().map(Vec::len), Some(1));
}

#[actix_web::test]
async fn votes_are_normalised_and_totalled() {
    let app = app().await;
    for (user, value) in [("a", -57), ("b", 0), ("c", 4)] {
        let (status, vote) = send(
            &app,
            test::TestRequest::post()
                .uri("/post-votes")
                .set_json(json!({"userId": user, "postId": 7, "value": value})),
        )
        .await;
        let expected = if value < 0 { -1 } else { 1 };
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(vote["value"], json!(expected));
    }

    let (_, total) = send(&app, test::TestRequest::get().uri("/posts/7/total-votes")).await;
    assert_eq!(total, json!({"total": 1}));
    let (_, voters) = send(&app, test::TestRequest::get().uri("/posts/7/voted-users")).await;
    assert_eq!(voters, json!(["a", "b", "c"]));
}

#[actix_web::test]
async fn post_lifecycle_through_the_dispatcher() {
    let app = app().await;
    let post = create_post(&app, "u1", &["Rust"]).await;
    assert_eq!(post["tags"], json!(["rust"]));
    assert!(post.get("deletedAt").is_none());

    let (status, updated) = send(
        &app,
        test::TestRequest::put()
            .uri("/posts/1")
            .set_json(json!({"title": "New Title", "body": "new"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["slug"], json!("new-title"));

    let (status, _) = send(&app, test::TestRequest::delete().uri("/posts/1")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, body) = send(&app, test::TestRequest::get().uri("/posts/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], json!(404));
    let (status, _) = send(&app, test::TestRequest::delete().uri("/posts/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn malformed_bodies_are_bad_requests() {
    let app = app().await;
    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/posts")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"userId\":")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    assert!(trace_id.is_some_and(|id| !id.is_empty()));
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["status"], json!(400));
}
