use std::net::SocketAddr;

use chrono::{DateTime, Utc};
use reqwest::Client;
use sea_orm::prelude::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use serde_json::Value;

use genred_server::config::{AppConfig, CorsConfig, DatabaseConfig, ServerConfig};
use genred_server::database;
use genred_server::entity::{genre, problem, result, user};
use genred_server::state::AppState;

pub mod routes {
    pub const ROOT: &str = "/";
    pub const PROBLEMS: &str = "/problems";
    pub const OPENAPI: &str = "/api-docs/openapi.json";
}

/// A running test server.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub db: DatabaseConnection,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

pub fn test_config(database: DatabaseConfig) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors: CorsConfig {
                allow_origins: vec![],
                max_age: 3600,
            },
        },
        database,
    }
}

/// In-memory SQLite settings. A single connection keeps every query on the
/// same in-memory database.
pub fn sqlite_config() -> DatabaseConfig {
    DatabaseConfig {
        max_connections: 1,
        min_connections: 1,
        sqlx_logging: false,
        ..DatabaseConfig::with_url("sqlite::memory:")
    }
}

impl TestApp {
    /// Spawn the server against a fresh in-memory SQLite database with the
    /// full schema created.
    pub async fn spawn() -> Self {
        let config = sqlite_config();
        let db = database::init_db(&config)
            .await
            .expect("Failed to initialize test database");
        Self::spawn_with_db(db).await
    }

    /// Spawn the server on top of an arbitrary connection (mock, lazy, ...).
    pub async fn spawn_with_db(db: DatabaseConnection) -> Self {
        let state = AppState {
            db: db.clone(),
            config: test_config(sqlite_config()),
        };

        let app = genred_server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            db,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let text = res.text().await.unwrap_or_default();
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, text, body }
    }

    /// The `problems` array of a listing response.
    pub fn problems(&self) -> &Vec<Value> {
        self.body["problems"]
            .as_array()
            .expect("response body should contain a 'problems' array")
    }

    /// Ids of the listed problems, in response order.
    pub fn problem_ids(&self) -> Vec<i64> {
        self.problems()
            .iter()
            .map(|p| p["id"].as_i64().expect("problem should have an integer id"))
            .collect()
    }
}

pub async fn insert_genre(db: &DatabaseConnection, name: &str) -> genre::Model {
    genre::ActiveModel {
        name: Set(name.to_string()),
        display_name: Set(name.to_uppercase()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert genre")
}

/// Insert a problem. `created_at: None` leaves the timestamp to the database.
pub async fn insert_problem(
    db: &DatabaseConnection,
    genre_id: i32,
    text: &str,
    created_at: Option<DateTime<Utc>>,
) -> problem::Model {
    let mut model = problem::ActiveModel {
        genre_id: Set(genre_id),
        text: Set(text.to_string()),
        answer_file_path: Set(format!("answers/{text}.mp3")),
        ..Default::default()
    };
    if let Some(ts) = created_at {
        model.created_at = Set(ts);
    }
    model.insert(db).await.expect("insert problem")
}

pub async fn insert_user(db: &DatabaseConnection, name: &str) -> user::Model {
    user::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert user")
}

pub async fn insert_result(
    db: &DatabaseConnection,
    user_id: i64,
    problem_id: i64,
) -> result::Model {
    result::ActiveModel {
        user_id: Set(user_id),
        problem_id: Set(problem_id),
        score: Set(Decimal::new(8550, 2)),
        try_file_path: Set(format!("tries/{user_id}-{problem_id}.mp3")),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert result")
}
