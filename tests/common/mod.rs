//! Shared helpers for the API integration tests
//!
//! Every test gets its own PostgreSQL and Redis containers; the handles live
//! in [`TestApp`] so the containers stop when the test ends.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::{postgres::Postgres, redis::Redis};
use tower::ServiceExt;
use uuid::Uuid;

use eventhub::{
    config::{AuthConfig, Config, DatabaseConfig, JwtConfig, LogFormat, RedisConfig, ServerConfig},
    create_router,
    db::{self, connection::create_pool},
    services::ResetTokenNotifier,
    state::AppState,
};

pub const PASSWORD: &str = "Passw0rdOk";

/// Keeps every reset link it is asked to deliver
#[derive(Default)]
pub struct CapturingNotifier {
    pub links: Mutex<Vec<String>>,
}

#[async_trait]
impl ResetTokenNotifier for CapturingNotifier {
    async fn send_reset_link(&self, _email: &str, _name: &str, link: &str) -> anyhow::Result<()> {
        self.links.lock().unwrap().push(link.to_string());
        Ok(())
    }
}

impl CapturingNotifier {
    /// Token carried by the most recent link
    pub fn last_token(&self) -> Option<String> {
        let links = self.links.lock().unwrap();
        links
            .last()
            .and_then(|link| link.split("token=").nth(1))
            .map(str::to_string)
    }
}

pub struct TestApp {
    pub router: Router,
    pub pool: PgPool,
    pub notifier: Arc<CapturingNotifier>,
    _postgres: ContainerAsync<Postgres>,
    _redis: ContainerAsync<Redis>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let postgres = Postgres::default()
            .start()
            .await
            .expect("Failed to start PostgreSQL container");
        let redis = Redis::default()
            .start()
            .await
            .expect("Failed to start Redis container");

        let pg_host = postgres.get_host().await.unwrap();
        let pg_port = postgres.get_host_port_ipv4(5432).await.unwrap();
        let redis_host = redis.get_host().await.unwrap();
        let redis_port = redis.get_host_port_ipv4(6379).await.unwrap();

        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                rust_log: "warn".to_string(),
                log_format: LogFormat::Text,
                request_timeout_secs: 30,
            },
            database: DatabaseConfig {
                url: format!(
                    "postgres://postgres:postgres@{}:{}/postgres",
                    pg_host, pg_port
                ),
                max_connections: 20,
            },
            redis: RedisConfig {
                url: format!("redis://{}:{}", redis_host, redis_port),
            },
            jwt: JwtConfig {
                secret: "test_secret_key_for_testing_only".to_string(),
                expiry_hours: 1,
            },
            auth: AuthConfig {
                reset_token_expiry_minutes: 60,
                password_reset_url: "http://localhost:3000/reset-password".to_string(),
            },
        };

        let pool = create_pool(&config.database)
            .await
            .expect("Failed to connect to test database");
        db::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let redis_client = redis::Client::open(config.redis.url.as_str()).unwrap();
        let redis_conn = redis::aio::ConnectionManager::new(redis_client)
            .await
            .expect("Failed to connect to Redis");

        let notifier = Arc::new(CapturingNotifier::default());
        let state = AppState::new(pool.clone(), redis_conn, notifier.clone(), config);

        Self {
            router: create_router(state),
            pool,
            notifier,
            _postgres: postgres,
            _redis: redis,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, value)
    }

    /// Register an account and return its id and access token
    pub async fn signup(&self, name: &str, email: &str, role: &str) -> (Uuid, String) {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/v1/auth/register",
                None,
                Some(json!({
                    "name": name,
                    "email": email,
                    "password": PASSWORD,
                    "role": role,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "signup failed: {}", body);

        (
            body["user"]["id"].as_str().unwrap().parse().unwrap(),
            body["access_token"].as_str().unwrap().to_string(),
        )
    }

    /// Register an account and promote it to admin directly in the store
    pub async fn signup_admin(&self, name: &str, email: &str) -> (Uuid, String) {
        let (id, token) = self.signup(name, email, "attendee").await;
        sqlx::query("UPDATE users SET role = 'admin' WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .unwrap();
        (id, token)
    }

    /// Create an event as `token` and return its id
    pub async fn create_event(&self, token: &str, date: chrono::NaiveDate, seats: i32) -> Uuid {
        self.create_event_in(token, date, seats, None).await
    }

    pub async fn create_event_in(
        &self,
        token: &str,
        date: chrono::NaiveDate,
        seats: i32,
        category_id: Option<Uuid>,
    ) -> Uuid {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/v1/events",
                Some(token),
                Some(json!({
                    "title": "Rust Meetup",
                    "description": "Talks and pizza",
                    "date": date.format("%Y-%m-%d").to_string(),
                    "time": "18:30",
                    "location": "Hall A",
                    "category_id": category_id,
                    "max_attendees": seats,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "event creation failed: {}", body);
        body["id"].as_str().unwrap().parse().unwrap()
    }

    pub async fn register(&self, token: &str, event_id: Uuid) -> (StatusCode, Value) {
        self.request(
            Method::POST,
            "/api/v1/registrations",
            Some(token),
            Some(json!({ "event_id": event_id })),
        )
        .await
    }
}

pub fn error_code(body: &Value) -> &str {
    body["error"]["code"].as_str().unwrap_or_default()
}

pub fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}
