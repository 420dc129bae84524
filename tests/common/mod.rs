#![allow(dead_code)]

use async_trait::async_trait;
use axum::http::header::SET_COOKIE;
use axum_test::{TestResponse, TestServer};
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use link_shortener::application::services::{AuthService, LinkService};
use link_shortener::domain::credentials::CredentialVerifier;
use link_shortener::domain::entities::{
    Link, NewLink, NewSession, NewUser, SessionRecord, User,
};
use link_shortener::domain::repositories::{LinkRepository, SessionRepository, UserRepository};
use link_shortener::error::AppError;
use link_shortener::infrastructure::security::Argon2Verifier;
use link_shortener::routes::router;
use link_shortener::state::AppState;
use link_shortener::utils::code_generator::CodeGenerator;

pub const TEST_SECRET: &str = "test-signing-secret";

/// Links in insertion order. Inserts check and push under one lock, so a
/// duplicate code fails the same way a primary key violation does.
#[derive(Default)]
pub struct MemoryLinkRepository {
    links: Mutex<Vec<Link>>,
}

impl MemoryLinkRepository {
    pub fn len(&self) -> usize {
        self.links.lock().unwrap().len()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.links
            .lock()
            .unwrap()
            .iter()
            .any(|l| l.short_path == code)
    }

    pub fn get(&self, code: &str) -> Option<Link> {
        self.links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.short_path == code)
            .cloned()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut links = self.links.lock().unwrap();

        if links.iter().any(|l| l.short_path == new_link.short_path) {
            return Err(AppError::already_exists(
                "Unique constraint violation",
                json!({ "constraint": "links_pkey" }),
            ));
        }

        let link = Link::from(new_link);
        links.push(link.clone());
        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.get(code))
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        let mut links = self.links.lock().unwrap();
        let before = links.len();
        links.retain(|l| l.short_path != code);
        Ok(links.len() < before)
    }

    async fn delete_expired(&self, code: &str, now: i64) -> Result<bool, AppError> {
        let mut links = self.links.lock().unwrap();
        let before = links.len();
        links.retain(|l| !(l.short_path == code && l.is_expired_at(now)));
        Ok(links.len() < before)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Link>, AppError> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.len() as i64)
    }
}

#[derive(Default)]
pub struct MemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl MemoryUserRepository {
    fn find_by_id(&self, id: i64) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();

        if users.iter().any(|u| u.username == new_user.username) {
            return Err(AppError::already_exists(
                "Unique constraint violation",
                json!({ "constraint": "users_username_key" }),
            ));
        }

        let user = User::new(
            users.len() as i64 + 1,
            new_user.username,
            new_user.password_hash,
            new_user.is_admin,
        );
        users.push(user.clone());
        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn delete(&self, username: &str) -> Result<bool, AppError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.username != username);
        Ok(users.len() < before)
    }
}

/// Sessions keyed by token hash; the owning user is joined on lookup.
pub struct MemorySessionRepository {
    sessions: Mutex<HashMap<String, NewSession>>,
    users: Arc<MemoryUserRepository>,
}

impl MemorySessionRepository {
    pub fn new(users: Arc<MemoryUserRepository>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            users,
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    pub fn stored_hashes(&self) -> Vec<String> {
        self.sessions.lock().unwrap().keys().cloned().collect()
    }

    /// Moves every session's expiry into the past.
    pub fn expire_all(&self) {
        let past = chrono::Utc::now() - chrono::Duration::seconds(1);
        for session in self.sessions.lock().unwrap().values_mut() {
            session.expires_at = past;
        }
    }
}

#[async_trait]
impl SessionRepository for MemorySessionRepository {
    async fn create(&self, new_session: NewSession) -> Result<(), AppError> {
        self.sessions
            .lock()
            .unwrap()
            .insert(new_session.token_hash.clone(), new_session);
        Ok(())
    }

    async fn find_by_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<SessionRecord>, AppError> {
        let Some(session) = self.sessions.lock().unwrap().get(token_hash).cloned() else {
            return Ok(None);
        };

        Ok(self
            .users
            .find_by_id(session.user_id)
            .map(|user| SessionRecord {
                token_hash: session.token_hash,
                user,
                expires_at: session.expires_at,
            }))
    }

    async fn delete(&self, token_hash: &str) -> Result<bool, AppError> {
        Ok(self.sessions.lock().unwrap().remove(token_hash).is_some())
    }
}

/// Application wired to in-memory stores, with handles kept for assertions.
pub struct TestApp {
    pub state: AppState,
    pub links: Arc<MemoryLinkRepository>,
    pub users: Arc<MemoryUserRepository>,
    pub sessions: Arc<MemorySessionRepository>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_generator(CodeGenerator::from_entropy())
    }

    pub fn with_generator(code_generator: CodeGenerator) -> Self {
        let links = Arc::new(MemoryLinkRepository::default());
        let users = Arc::new(MemoryUserRepository::default());
        let sessions = Arc::new(MemorySessionRepository::new(users.clone()));

        let link_repository: Arc<dyn LinkRepository> = links.clone();
        let user_repository: Arc<dyn UserRepository> = users.clone();
        let session_repository: Arc<dyn SessionRepository> = sessions.clone();
        let verifier: Arc<dyn CredentialVerifier> = Arc::new(Argon2Verifier::new());

        let link_service = Arc::new(LinkService::new(link_repository, code_generator));
        let auth_service = Arc::new(AuthService::new(
            session_repository,
            user_repository,
            verifier,
            TEST_SECRET.to_string(),
            chrono::Duration::seconds(3600),
        ));

        Self {
            state: AppState::new(link_service, auth_service, false),
            links,
            users,
            sessions,
        }
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(router(self.state.clone())).unwrap()
    }

    pub async fn seed_user(&self, username: &str, password: &str) -> User {
        self.state
            .auth_service
            .register_user(username, password, true)
            .await
            .unwrap()
    }

    pub async fn seed_link(&self, code: &str, url: &str, expiration_time: i64) {
        self.links
            .insert(NewLink::new(code.to_string(), url.to_string(), expiration_time))
            .await
            .unwrap();
    }

    /// Seeds `admin`/`secret`, logs in and returns the `Cookie` header value.
    pub async fn login(&self, server: &TestServer) -> String {
        self.seed_user("admin", "secret").await;

        let response = server
            .post("/login")
            .json(&json!({ "username": "admin", "password": "secret" }))
            .await;
        response.assert_status_ok();

        session_cookie(&response)
    }
}

/// Turns a login response's `Set-Cookie` into a `Cookie` request header value.
pub fn session_cookie(response: &TestResponse) -> String {
    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .expect("login sets a cookie")
        .to_str()
        .unwrap()
        .to_string();

    set_cookie
        .split(';')
        .next()
        .unwrap()
        .trim()
        .to_string()
}

/// Raw token out of a `LinkSession=<token>` pair.
pub fn token_of(cookie: &str) -> String {
    cookie.trim_start_matches("LinkSession=").to_string()
}
