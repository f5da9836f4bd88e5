use std::sync::Arc;

use account_service::domain::user::service::UserService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::InMemoryUserStore;
use auth::Authenticator;
use auth::JwtHandler;
use chrono::Duration;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server on an ephemeral port,
/// backed by the in-memory store so the suite needs no external services.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub store: Arc<InMemoryUserStore>,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(InMemoryUserStore::new());
        let user_service = Arc::new(UserService::new(Arc::clone(&store)));
        let authenticator = Arc::new(Authenticator::new(TEST_SECRET, Duration::days(30)));

        let router = create_router(user_service, authenticator);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        // Handler signing with the same secret, for minting and decoding
        // tokens directly in tests
        let jwt_handler = JwtHandler::new(TEST_SECRET, Duration::days(30));

        Self {
            address,
            api_client: reqwest::Client::new(),
            store,
            jwt_handler,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Register a user and return the response body.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> serde_json::Value {
        let response = self
            .post("/users/register")
            .json(&serde_json::json!({
                "username": username,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");

        response.json().await.expect("Failed to parse response")
    }
}
