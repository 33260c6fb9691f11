use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use inkbound_adapters::{
    Argon2PasswordHasher, HashMapComicStore, HashMapUserStore, HashMapVerificationStore,
    JwtConfig, MockMediaStore,
};
use inkbound_core::{Email, EmailClient, PasswordHasher, UserId};
use inkbound_service::ComicService;
use secrecy::{ExposeSecret, Secret};
use serde_json::{json, Value};
use tokio::sync::RwLock;

const TEST_APP_ADDRESS: &str = "127.0.0.1:0";

#[derive(Clone)]
pub struct SentEmail {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// Email double that records every send and can be told to fail.
#[derive(Clone, Default)]
pub struct CapturingEmailClient {
    sent: Arc<RwLock<Vec<SentEmail>>>,
    fail: Arc<AtomicBool>,
}

impl CapturingEmailClient {
    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    pub async fn last_email(&self) -> Option<SentEmail> {
        self.sent.read().await.last().cloned()
    }

    pub async fn sent_count(&self) -> usize {
        self.sent.read().await.len()
    }
}

#[async_trait]
impl EmailClient for CapturingEmailClient {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        if self.fail.load(Ordering::SeqCst) {
            return Err("mail provider rejected the message".to_string());
        }
        self.sent.write().await.push(SentEmail {
            recipient: recipient.as_ref().expose_secret().clone(),
            subject: subject.to_string(),
            body: content.to_string(),
        });
        Ok(())
    }
}

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
    pub email_client: CapturingEmailClient,
    pub user_store: HashMapUserStore,
    pub token_store: HashMapVerificationStore,
    pub media_store: MockMediaStore,
    pub hasher: Argon2PasswordHasher,
}

impl TestApp {
    /// Boot the full router on an ephemeral port against in-memory stores.
    pub async fn spawn() -> Self {
        let user_store = HashMapUserStore::new();
        let token_store = HashMapVerificationStore::new();
        let comic_store = HashMapComicStore::new();
        let email_client = CapturingEmailClient::default();
        let media_store = MockMediaStore::new();
        let hasher = Argon2PasswordHasher;

        let jwt_config = JwtConfig {
            access_secret: Secret::from("test-jwt-secret".to_string()),
            refresh_secret: None,
            token_ttl_seconds: 600,
            require_distinct_secrets: false,
        };

        let listener = tokio::net::TcpListener::bind(TEST_APP_ADDRESS).await.unwrap();
        let address = format!("http://{}", listener.local_addr().unwrap());

        let service = ComicService::new(
            user_store.clone(),
            token_store.clone(),
            comic_store.clone(),
            comic_store,
            hasher,
            email_client.clone(),
            media_store.clone(),
            jwt_config,
            address.clone(),
        );

        tokio::spawn(async move {
            service.run_standalone(listener, None).await.unwrap();
        });

        Self {
            address,
            client: reqwest::Client::new(),
            email_client,
            user_store,
            token_store,
            media_store,
            hasher,
        }
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("request failed")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("request failed")
    }

    pub async fn get_authed(&self, path: &str, token: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .bearer_auth(token)
            .send()
            .await
            .expect("request failed")
    }

    pub async fn post_json_authed(&self, path: &str, token: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("request failed")
    }

    pub async fn delete_authed(&self, path: &str, token: &str) -> reqwest::Response {
        self.client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
            .send()
            .await
            .expect("request failed")
    }

    pub async fn register(&self, email: &str, password: &str, name: &str) -> reqwest::Response {
        self.post_json(
            "/api/register",
            &json!({ "email": email, "password": password, "name": name }),
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post_json("/api/login", &json!({ "email": email, "password": password }))
            .await
    }

    /// Pull the verification code out of the most recent mail.
    pub async fn last_verification_code(&self) -> String {
        let email = self
            .email_client
            .last_email()
            .await
            .expect("no email was sent");
        extract_between(&email.body, "/api/verify/", "\"")
            .expect("verification link not found in email body")
    }

    /// Pull the temporary password out of the most recent reset mail.
    pub async fn last_temporary_password(&self) -> String {
        let email = self
            .email_client
            .last_email()
            .await
            .expect("no email was sent");
        extract_between(&email.body, "<strong>", "</strong>")
            .expect("temporary password not found in email body")
    }

    pub async fn verify(&self, code: &str) -> reqwest::Response {
        self.get(&format!("/api/verify/{code}")).await
    }

    /// Register + verify + login; returns the access token.
    pub async fn register_verified_user(&self, email: &str, password: &str) -> String {
        let response = self.register(email, password, "Test Reader").await;
        assert_eq!(response.status(), 201);

        let code = self.last_verification_code().await;
        assert_eq!(self.verify(&code).await.status(), 200);

        let response = self.login(email, password).await;
        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.unwrap();
        body["access_token"].as_str().unwrap().to_string()
    }

    /// The user id recorded for `email`, for tests that reach into stores.
    pub async fn user_id(&self, email: &str) -> UserId {
        let email = Email::try_from(Secret::from(email.to_string())).unwrap();
        use inkbound_core::UserStore;
        self.user_store.get_user_by_email(&email).await.unwrap().id()
    }

    /// Hash a plaintext the way the running service does.
    pub async fn hash_secret(&self, plaintext: &str) -> Secret<String> {
        self.hasher
            .hash(&Secret::from(plaintext.to_string()))
            .await
            .unwrap()
    }
}

fn extract_between(haystack: &str, start: &str, end: &str) -> Option<String> {
    let from = haystack.find(start)? + start.len();
    let len = haystack[from..].find(end)?;
    Some(haystack[from..from + len].to_string())
}

pub async fn body_json(response: reqwest::Response) -> Value {
    response.json().await.expect("response was not JSON")
}
