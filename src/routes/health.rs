use poem_openapi::{OpenApi, payload::Json};

pub struct ApiHealth;

#[OpenApi()]
impl ApiHealth {
    #[oai(path = "/health", method = "get")]
    async fn health(&self) -> Json<serde_json::Value> {
        Json(serde_json::json!({
            "status": "healthy",
            "version": env!("CARGO_PKG_VERSION"),
        }))
    }
}
