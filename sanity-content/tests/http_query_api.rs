//! Facade against a mock of the hosted query API

use sanity_content::queries::{POST_BY_SLUG_QUERY, POST_SLUGS_QUERY, SETTINGS_QUERY};
use sanity_content::{ClientConfig, ContentClient, ContentError, ContentFacade, PostSlug};
use serde_json::json;
use wiremock::matchers::{
    header, header_exists, method, path, query_param, query_param_is_missing,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BASE_PATH: &str = "/v2022-11-15/data/query/production";
const PREVIEW_PATH: &str = "/vX/data/query/production";

fn facade_for(server: &MockServer) -> ContentFacade {
    let config = ClientConfig {
        api_host: Some(server.uri()),
        encode_source_map: false,
        ..ClientConfig::for_project("abc123")
    };
    ContentFacade::with_client(ContentClient::new(config).unwrap())
}

fn query_response(result: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "ms": 3,
        "query": "...",
        "result": result
    }))
}

#[tokio::test]
async fn test_settings_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(BASE_PATH))
        .and(query_param("query", SETTINGS_QUERY))
        .and(query_param_is_missing("perspective"))
        .respond_with(query_response(json!({ "title": "My Blog" })))
        .expect(1)
        .mount(&server)
        .await;

    let settings = facade_for(&server).get_settings(None).await.unwrap();
    assert_eq!(settings.title.as_deref(), Some("My Blog"));
}

#[tokio::test]
async fn test_null_result_is_empty_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(BASE_PATH))
        .respond_with(query_response(json!(null)))
        .mount(&server)
        .await;

    let settings = facade_for(&server).get_settings(None).await.unwrap();
    assert!(settings.is_empty());
}

#[tokio::test]
async fn test_slugs_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(BASE_PATH))
        .and(query_param("query", POST_SLUGS_QUERY))
        .respond_with(query_response(json!(["first-post", "second-post"])))
        .mount(&server)
        .await;

    let slugs = facade_for(&server).get_all_posts_slugs(None).await.unwrap();
    assert_eq!(
        slugs,
        vec![
            PostSlug { slug: "first-post".into() },
            PostSlug { slug: "second-post".into() },
        ]
    );
}

#[tokio::test]
async fn test_preview_request_is_token_scoped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PREVIEW_PATH))
        .and(query_param("query", POST_BY_SLUG_QUERY))
        .and(query_param("$slug", "\"draft-post\""))
        .and(query_param("perspective", "previewDrafts"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(query_response(json!({ "slug": "draft-post", "title": "Draft" })))
        .expect(1)
        .mount(&server)
        .await;

    let post = facade_for(&server)
        .get_post_by_slug("draft-post", Some("secret"))
        .await
        .unwrap();
    assert_eq!(post.title.as_deref(), Some("Draft"));
}

#[tokio::test]
async fn test_base_request_after_preview_is_unscoped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PREVIEW_PATH))
        .respond_with(query_response(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(BASE_PATH))
        .and(query_param_is_missing("perspective"))
        .respond_with(query_response(json!([{ "slug": "public" }])))
        .expect(1)
        .mount(&server)
        .await;

    let facade = facade_for(&server);
    assert!(facade.get_all_posts(Some("secret")).await.unwrap().is_empty());
    assert_eq!(facade.get_all_posts(None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_more_stories_without_token_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(query_response(json!({ "post": { "slug": "a" }, "morePosts": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let pair = facade_for(&server)
        .get_post_and_more_stories("a", None)
        .await
        .unwrap();
    assert!(pair.post.is_none());
    assert!(pair.more_posts.is_empty());
}

#[tokio::test]
async fn test_missing_slug_is_empty_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PREVIEW_PATH))
        .and(query_param("$slug", "\"missing-slug\""))
        .respond_with(query_response(json!(null)))
        .mount(&server)
        .await;

    let post = facade_for(&server)
        .get_post_by_slug("missing-slug", Some("secret"))
        .await
        .unwrap();
    assert!(post.is_empty());
}

#[tokio::test]
async fn test_source_map_flag_is_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(BASE_PATH))
        .and(query_param("resultSourceMap", "true"))
        .respond_with(query_response(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig {
        api_host: Some(server.uri()),
        encode_source_map: true,
        ..ClientConfig::for_project("abc123")
    };
    let facade = ContentFacade::with_client(ContentClient::new(config).unwrap());
    facade.get_all_posts(None).await.unwrap();
}

#[tokio::test]
async fn test_store_error_propagates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "description": "param $slug referenced, but not provided",
                "type": "queryParseError"
            }
        })))
        .mount(&server)
        .await;

    let err = facade_for(&server).get_all_posts(None).await.unwrap_err();
    match err {
        ContentError::Server { status, message } => {
            assert_eq!(status, 400);
            assert!(message.contains("queryParseError"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_config_file_token_does_not_authenticate_base_client() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header_exists("authorization"))
        .respond_with(query_response(json!([{ "slug": "draft" }])))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(BASE_PATH))
        .and(query_param_is_missing("perspective"))
        .respond_with(query_response(json!([{ "slug": "public" }])))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::from_toml_str(&format!(
        r#"
[sanity]
project_id = "abc123"
api_host = "{}"
encode_source_map = false
token = "leaked"
perspective = "previewDrafts"
"#,
        server.uri()
    ))
    .unwrap();

    let facade = ContentFacade::new(config).unwrap();
    let posts = facade.get_all_posts(None).await.unwrap();
    assert_eq!(posts[0].slug.as_deref(), Some("public"));
}

#[tokio::test]
async fn test_empty_error_body_uses_status_reason() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = facade_for(&server).get_settings(None).await.unwrap_err();
    match err {
        ContentError::Server { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "Service Unavailable");
        }
        other => panic!("unexpected error: {other}"),
    }
}
