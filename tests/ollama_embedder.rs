use axum::{http::StatusCode, routing::post, Json, Router};
use pozo_rag::{
    embedding::{ollama::OllamaEmbedder, Embedder},
    Error,
};
use serde_json::{json, Value};

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn embed(Json(request): Json<Value>) -> Json<Value> {
    let embeddings = request["input"]
        .as_array()
        .unwrap()
        .iter()
        .map(|text| vec![text.as_str().unwrap().len() as f32, 0.5])
        .collect::<Vec<_>>();

    Json(json!({ "model": request["model"], "embeddings": embeddings }))
}

#[tokio::test]
async fn test_embed_batch() {
    let host = serve(Router::new().route("/api/embed", post(embed))).await;
    let embedder = OllamaEmbedder::new(host, "deepseek-r1:14b");

    let texts = vec!["depth: 10".to_string(), "well_legal_name: A".to_string()];
    let embeddings = embedder.embed_batch(&texts).await.unwrap();
    assert_eq!(embeddings, vec![vec![9.0, 0.5], vec![18.0, 0.5]]);

    let single = embedder.embed("abc").await.unwrap();
    assert_eq!(single, vec![3.0, 0.5]);
}

#[tokio::test]
async fn test_server_error_message() {
    let router = Router::new().route(
        "/api/embed",
        post(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "model \"nomic\" not found, try pulling it first" })),
            )
        }),
    );
    let host = serve(router).await;
    let embedder = OllamaEmbedder::new(host, "nomic");

    let err = embedder
        .embed_batch(&["a".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(&err, Error::Provider(message) if message.contains("not found")));
}

#[tokio::test]
async fn test_wrong_vector_count() {
    let router = Router::new().route(
        "/api/embed",
        post(|| async { Json(json!({ "embeddings": [[1.0]] })) }),
    );
    let host = serve(router).await;
    let embedder = OllamaEmbedder::new(host, "m");

    let err = embedder
        .embed_batch(&["a".to_string(), "b".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::EmbeddingCount { expected: 2, got: 1 }));
}

#[tokio::test]
async fn test_empty_batch_skips_request() {
    let embedder = OllamaEmbedder::new("http://127.0.0.1:9", "m");
    assert!(embedder.embed_batch(&[]).await.unwrap().is_empty());
}
