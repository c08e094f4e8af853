use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use axum::extract::RawQuery;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use td_client::{ApiConfig, HttpCatalogClient};
use td_core::{ArticleQuery, CatalogApi, Error, RecordId};

type Seen = Arc<Mutex<Vec<String>>>;

async fn spawn_backend(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn catalog_backend(seen: Seen) -> Router {
    let articles_seen = seen.clone();
    let tags_seen = seen;
    Router::new()
        .route(
            "/tags",
            get(|| async { Json(json!([{"id": 1, "name": "ai", "type": "topic"}])) }),
        )
        .route(
            "/getArticlesByTag",
            get(move |RawQuery(query): RawQuery| {
                let seen = articles_seen.clone();
                async move {
                    seen.lock().unwrap().push(query.unwrap_or_default());
                    Json(json!([
                        {"id": 10, "name": "Transformers explained", "source": {"name": "habr"},
                         "tagScores": [{"tag": {"id": 1, "name": "ai"}, "model": {"name": "bert"}, "weight": 91}]},
                        {"id": 11, "name": "Vector databases", "source": {"name": "lwn"}, "tagScores": []}
                    ]))
                }
            }),
        )
        .route(
            "/getArticleTags",
            get(move |RawQuery(query): RawQuery| {
                let seen = tags_seen.clone();
                async move {
                    seen.lock().unwrap().push(query.unwrap_or_default());
                    Json(json!([{"tagId": 1, "tagName": "ai", "weight": 91, "model": "bert"}]))
                }
            }),
        )
}

fn client_for(addr: SocketAddr) -> HttpCatalogClient {
    HttpCatalogClient::new(ApiConfig::new(&format!("http://{}", addr)).unwrap())
}

#[tokio::test]
async fn test_list_tags() {
    let addr = spawn_backend(catalog_backend(Seen::default())).await;
    let tags = client_for(addr).list_tags().await.unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].name, "ai");
    assert_eq!(tags[0].kind, "topic");
}

#[tokio::test]
async fn test_articles_query_string() {
    let seen = Seen::default();
    let addr = spawn_backend(catalog_backend(seen.clone())).await;

    let mut query = ArticleQuery::new("ai");
    query.models = vec!["bert".to_string(), "gpt".to_string()];
    query.sources = vec!["habr".to_string()];
    let articles = client_for(addr).articles_by_tag(&query).await.unwrap();

    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].tag_scores[0].weight, 91);
    assert_eq!(
        seen.lock().unwrap().as_slice(),
        ["tag=ai&minScore=50&model=bert&model=gpt&source=habr"]
    );
}

#[tokio::test]
async fn test_article_tags_sends_id() {
    let seen = Seen::default();
    let addr = spawn_backend(catalog_backend(seen.clone())).await;

    let tags = client_for(addr).article_tags(&RecordId::Int(10)).await.unwrap();
    assert_eq!(tags[0].tag_name, "ai");
    assert_eq!(tags[0].model, "bert");
    assert_eq!(seen.lock().unwrap().as_slice(), ["id=10"]);
}

#[tokio::test]
async fn test_non_success_status_is_reported() {
    let app = Router::new().route("/tags", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }));
    let addr = spawn_backend(app).await;

    let err = client_for(addr).list_tags().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "HTTP error! status: 500");
}

#[tokio::test]
async fn test_prefix_is_prepended() {
    let app = Router::new().route(
        "/api/tags",
        get(|| async { Json(json!([{"id": "t", "name": "rust", "type": "lang"}])) }),
    );
    let addr = spawn_backend(app).await;
    let client = HttpCatalogClient::new(ApiConfig::new(&format!("http://{}", addr)).unwrap().with_prefix("/api"));

    let tags = client.list_tags().await.unwrap();
    assert_eq!(tags[0].id, RecordId::Text("t".to_string()));
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client_for(addr).list_tags().await.unwrap_err();
    assert!(matches!(err, Error::Network(_)));
}

#[tokio::test]
async fn test_malformed_body_is_an_error() {
    let app = Router::new().route("/tags", get(|| async { "not json" }));
    let addr = spawn_backend(app).await;
    let err = client_for(addr).list_tags().await.unwrap_err();
    assert!(matches!(err, Error::Serialization(_)));
}
