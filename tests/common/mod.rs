#![allow(dead_code)]

use actix_web::{test, web, App};
use secrecy::Secret;
use serde_json::Value;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use pefi::config::ApiKey;
use pefi::{db, routes};

pub const API_KEY: &str = "test_api_key_for_integration_tests";

pub struct TestApp {
    pub pool: SqlitePool,
}

pub struct TestResponse {
    status: u16,
    body: bytes::Bytes,
}

impl TestResponse {
    pub fn status(&self) -> u16 {
        self.status
    }

    pub async fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }
}

impl TestApp {
    /// Fresh in-memory database per test. A single connection that never
    /// expires, since every new in-memory connection is an empty database.
    pub async fn new() -> Self {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");

        db::migrate(&pool).await.expect("Failed to run migrations");

        TestApp { pool }
    }

    async fn call(&self, req: test::TestRequest) -> TestResponse {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(self.pool.clone()))
                .app_data(web::Data::new(ApiKey(Secret::new(API_KEY.to_string()))))
                .service(routes::health_check)
                .configure(routes::configure_api),
        )
        .await;

        let resp = test::call_service(&app, req.to_request()).await;

        let status = resp.status().as_u16();
        let body = test::read_body(resp).await;

        TestResponse { status, body }
    }

    fn authorized(req: test::TestRequest) -> test::TestRequest {
        req.insert_header(("Authorization", format!("Bearer {API_KEY}")))
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.call(Self::authorized(test::TestRequest::get().uri(path)))
            .await
    }

    pub async fn get_with_token(&self, path: &str, token: Option<&str>) -> TestResponse {
        let mut req = test::TestRequest::get().uri(path);
        if let Some(token) = token {
            req = req.insert_header(("Authorization", format!("Bearer {token}")));
        }
        self.call(req).await
    }

    pub async fn post(&self, path: &str, payload: &Value) -> TestResponse {
        self.call(Self::authorized(
            test::TestRequest::post().uri(path).set_json(payload),
        ))
        .await
    }

    pub async fn post_raw(&self, path: &str, body: &'static str) -> TestResponse {
        self.call(Self::authorized(
            test::TestRequest::post()
                .uri(path)
                .insert_header(("Content-Type", "application/json"))
                .set_payload(body),
        ))
        .await
    }

    pub async fn put(&self, path: &str, payload: &Value) -> TestResponse {
        self.call(Self::authorized(
            test::TestRequest::put().uri(path).set_json(payload),
        ))
        .await
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        self.call(Self::authorized(test::TestRequest::delete().uri(path)))
            .await
    }
}
