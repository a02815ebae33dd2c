use std::sync::Arc;

use auth::Authenticator;
use auth::EncryptedTokenMaker;
use bank_service::domain::user::service::UserService;
use bank_service::inbound::http::router::create_router;
use bank_service::outbound::repositories::InMemoryUserRepository;
use chrono::Duration;
use serde_json::json;

/// Symmetric key shared by every test server, exactly 32 bytes long
pub const TEST_SYMMETRIC_KEY: &[u8; 32] = b"test-symmetric-key-32-bytes-long";

/// Harness around a live server on an OS-assigned local port.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    /// Token maker holding the same key as the server, for forging test tokens
    pub token_maker: EncryptedTokenMaker,
}

impl TestApp {
    /// Boot the full router in a background task and hand back a harness.
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("No free local port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let token_maker =
            EncryptedTokenMaker::new(TEST_SYMMETRIC_KEY).expect("Token maker rejected test key");
        let authenticator = Arc::new(Authenticator::new(Arc::new(token_maker)));

        let user_repository = Arc::new(InMemoryUserRepository::new());
        let user_service = Arc::new(UserService::new(user_repository));

        let router = create_router(user_service, authenticator, Duration::minutes(15));

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server crashed");
        });

        let token_maker =
            EncryptedTokenMaker::new(TEST_SYMMETRIC_KEY).expect("Token maker rejected test key");

        Self {
            address,
            api_client: reqwest::Client::new(),
            token_maker,
        }
    }

    /// GET against the running server.
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// POST against the running server.
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// GET with a bearer token attached.
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Register a user through the API, panicking unless the server says 201.
    pub async fn register_user(&self, username: &str, password: &str) {
        let response = self
            .post("/api/users")
            .json(&json!({
                "username": username,
                "full_name": "Test User",
                "email_address": format!("{}@example.com", username),
                "password": password
            }))
            .send()
            .await
            .expect("Failed to send request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    }

    /// Register a user and log in, returning the issued access token.
    pub async fn register_and_login(&self, username: &str, password: &str) -> String {
        self.register_user(username, password).await;

        let response = self
            .post("/api/users/login")
            .json(&json!({
                "username": username,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to send request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to decode body");
        body["data"]["access_token"]
            .as_str()
            .expect("Missing access token")
            .to_string()
    }
}
