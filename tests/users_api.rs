//! End-to-end tests for the `/api/users` endpoints against stub upstreams.

use axum::http::StatusCode;
use serde_json::{json, Value};
use wiremock::matchers::{body_bytes, body_json, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

mod common;

#[tokio::test]
async fn test_list_relays_users() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "A", "username": "a", "email": "a@x.com"}
        ])))
        .expect(1)
        .mount(&upstream)
        .await;

    let service = common::spawn_service(&upstream.uri()).await;
    let res = common::client()
        .get(service.url("/api/users"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "application/json");
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body,
        json!([{"id": 1, "name": "A", "username": "a", "email": "a@x.com"}])
    );
}

#[tokio::test]
async fn test_list_drops_unknown_fields() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 3, "name": "C", "username": "c", "email": "c@x.com",
             "phone": "555-0100", "address": {"city": "Gwenborough"}},
            {"id": 4}
        ])))
        .mount(&upstream)
        .await;

    let service = common::spawn_service(&upstream.uri()).await;
    let body: Value = common::client()
        .get(service.url("/api/users"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(
        body,
        json!([
            {"id": 3, "name": "C", "username": "c", "email": "c@x.com"},
            {"id": 4, "name": "", "username": "", "email": ""}
        ])
    );
}

#[tokio::test]
async fn test_list_with_unparseable_upstream_body_is_500() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"error":"not found"}"#))
        .mount(&upstream)
        .await;

    let service = common::spawn_service(&upstream.uri()).await;
    let res = common::client()
        .get(service.url("/api/users"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.text().await.unwrap(), "Failed to parse JSON response\n");
}

#[tokio::test]
async fn test_create_relays_upstream_body_with_201() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .and(header("content-type", "application/json"))
        .and(body_bytes(
            br#"{"id":0,"name":"B","username":"","email":""}"#.to_vec(),
        ))
        .respond_with(ResponseTemplate::new(201).set_body_string(r#"{"id":2,"name":"B"}"#))
        .expect(1)
        .mount(&upstream)
        .await;

    let service = common::spawn_service(&upstream.uri()).await;
    let res = common::client()
        .post(service.url("/api/users"))
        .body(r#"{"name":"B"}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.headers()["content-type"], "application/json");
    assert_eq!(res.text().await.unwrap(), r#"{"id":2,"name":"B"}"#);
}

#[tokio::test]
async fn test_create_forwards_reencoded_record() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .and(body_json(json!({
            "id": 9, "name": "N", "username": "n", "email": "n@x.com"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_string("{}"))
        .expect(1)
        .mount(&upstream)
        .await;

    let service = common::spawn_service(&upstream.uri()).await;
    let res = common::client()
        .post(service.url("/api/users"))
        .json(&json!({
            "email": "n@x.com", "username": "n", "name": "N", "id": 9, "extra": true
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_accepts_lenient_payloads() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .and(body_bytes(
            br#"{"id":0,"name":"B","username":"","email":""}"#.to_vec(),
        ))
        .respond_with(ResponseTemplate::new(201).set_body_string("{}"))
        .expect(1)
        .mount(&upstream)
        .await;

    let service = common::spawn_service(&upstream.uri()).await;
    let res = common::client()
        .post(service.url("/api/users"))
        .body("{\"Name\":\"B\",\"id\":null}\n{\"x\":1}")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_list_relays_null_as_null() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .expect(1)
        .mount(&upstream)
        .await;

    let service = common::spawn_service(&upstream.uri()).await;
    let res = common::client()
        .get(service.url("/api/users"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "null");
}

#[tokio::test]
async fn test_create_is_201_even_when_upstream_fails() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&upstream)
        .await;

    let service = common::spawn_service(&upstream.uri()).await;
    let res = common::client()
        .post(service.url("/api/users"))
        .body("{}")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.text().await.unwrap(), "upstream exploded");
}

#[tokio::test]
async fn test_create_replays_are_byte_identical_against_echo() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .respond_with(|req: &Request| {
            ResponseTemplate::new(201).set_body_bytes(req.body.clone())
        })
        .expect(3)
        .mount(&upstream)
        .await;

    let service = common::spawn_service(&upstream.uri()).await;
    let client = common::client();
    let payload = r#"{"id":1,"name":"Leanne","username":"Bret","email":"l@x.com"}"#;

    let mut bodies = Vec::new();
    for _ in 0..3 {
        let res = client
            .post(service.url("/api/users"))
            .body(payload)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        bodies.push(res.bytes().await.unwrap());
    }

    assert_eq!(&bodies[0][..], payload.as_bytes());
    assert!(bodies.windows(2).all(|w| w[0] == w[1]));
}

#[tokio::test]
async fn test_update_returns_200_even_on_upstream_404() {
    let upstream = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/users/5"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"error":"not found"}"#))
        .expect(1)
        .mount(&upstream)
        .await;

    let service = common::spawn_service(&upstream.uri()).await;
    let res = common::client()
        .put(service.url("/api/users/5"))
        .body(r#"{"id":5,"name":"E"}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "application/json");
    assert_eq!(res.text().await.unwrap(), r#"{"error":"not found"}"#);
}

#[tokio::test]
async fn test_update_uses_id_verbatim() {
    let upstream = MockServer::start().await;
    for id in ["abc", "user-42_x", "0007"] {
        Mock::given(method("PUT"))
            .and(path(format!("/users/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_string(id))
            .expect(1)
            .mount(&upstream)
            .await;
    }

    let service = common::spawn_service(&upstream.uri()).await;
    let client = common::client();
    for id in ["abc", "user-42_x", "0007"] {
        let res = client
            .put(service.url(&format!("/api/users/{id}")))
            .body("{}")
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.text().await.unwrap(), id);
    }
}

#[tokio::test]
async fn test_unreachable_upstream_is_plain_text_500() {
    let service = common::spawn_service(&common::unreachable_base()).await;
    let client = common::client();

    let cases = [
        (
            client.get(service.url("/api/users")),
            "Failed to fetch data from external API\n",
        ),
        (
            client.post(service.url("/api/users")).body("{}"),
            "Failed to send request to external API\n",
        ),
        (
            client.put(service.url("/api/users/1")).body("{}"),
            "Failed to send request to external API\n",
        ),
    ];

    for (request, expected) in cases {
        let res = request.send().await.unwrap();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(res.headers()["content-type"], "text/plain; charset=utf-8");
        let text = res.text().await.unwrap();
        assert_eq!(text, expected);
        assert!(serde_json::from_str::<Value>(&text).is_err());
    }
}

#[tokio::test]
async fn test_truncated_upstream_body_is_read_error() {
    let service = common::spawn_service(&common::start_truncated_upstream().await).await;
    let client = common::client();

    let res = client.get(service.url("/api/users")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        res.text().await.unwrap(),
        "Failed to read response from external API\n"
    );

    let res = client
        .post(service.url("/api/users"))
        .body("{}")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        res.text().await.unwrap(),
        "Failed to read response from external API\n"
    );

    let res = client
        .put(service.url("/api/users/1"))
        .body("{}")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        res.text().await.unwrap(),
        "Failed to read response from external API\n"
    );
}

#[tokio::test]
async fn test_malformed_payloads_never_reach_upstream() {
    let upstream = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&upstream)
        .await;

    let service = common::spawn_service(&upstream.uri()).await;
    let client = common::client();

    let res = client
        .post(service.url("/api/users"))
        .body(r#"{"name": 5}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.text().await.unwrap(), "Invalid request payload\n");

    let res = client
        .put(service.url("/api/users/1"))
        .body("{")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
