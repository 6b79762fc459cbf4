#![allow(dead_code)]

//! Shared fixtures: in-memory repository implementations and state builders.
//!
//! The suite runs against the real handlers, services, and middleware with
//! the persistence layer swapped for in-memory implementations of the
//! repository traits, so no database is required.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::ConnectInfo;
use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use chrono::{DateTime, Utc};
use serde_json::json;
use tokio::sync::mpsc;

use linkdash::api::handlers::{
    create_link_handler, delete_link_handler, link_analytics_handler, list_links_handler,
    login_handler, redirect_handler,
};
use linkdash::api::middleware::auth;
use linkdash::application::services::{
    AnalyticsService, AuthService, LinkService, hash_with_secret,
};
use linkdash::domain::click_event::ClickEvent;
use linkdash::domain::entities::{Click, Link, NewClick, NewLink, User};
use linkdash::domain::repositories::{
    ClickRepository, LinkRepository, SessionRepository, UserRepository,
};
use linkdash::error::AppError;
use linkdash::infrastructure::cache::NullCache;
use linkdash::state::AppState;

pub const TEST_SECRET: &str = "test-signing-secret";
pub const BASE_URL: &str = "http://localhost:3000";

// ── In-memory repositories ──────────────────────────────────────────────────

pub struct InMemoryLinkRepository {
    links: Mutex<Vec<Link>>,
    next_id: AtomicI64,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self {
            links: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn get_by_code(&self, code: &str) -> Option<Link> {
        self.links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.code == code)
            .cloned()
    }
}

fn matches_search(link: &Link, search: &str) -> bool {
    let needle = search.to_lowercase();
    link.long_url.to_lowercase().contains(&needle)
        || link.code.to_lowercase().contains(&needle)
        || link
            .alias
            .as_ref()
            .is_some_and(|a| a.to_lowercase().contains(&needle))
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut links = self.links.lock().unwrap();

        let collides = links.iter().any(|l| {
            l.code == new_link.code
                || new_link
                    .alias
                    .as_ref()
                    .is_some_and(|a| &l.code == a || l.alias.as_ref() == Some(a))
        });
        if collides {
            return Err(AppError::bad_request(
                "Value is already in use",
                json!({ "code": new_link.code }),
            ));
        }

        let link = Link {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            code: new_link.code,
            alias: new_link.alias,
            long_url: new_link.long_url,
            user_id: new_link.user_id,
            clicks: 0,
            expires_at: new_link.expires_at,
            created_at: Utc::now(),
        };
        links.push(link.clone());

        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.get_by_code(code))
    }

    async fn find_by_id_for_user(&self, id: i64, user_id: i64) -> Result<Option<Link>, AppError> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.id == id && l.user_id == user_id)
            .cloned())
    }

    async fn list_for_user(
        &self,
        user_id: i64,
        search: Option<String>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Link>, AppError> {
        let mut matching: Vec<Link> = self
            .links
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.user_id == user_id)
            .filter(|l| search.as_deref().is_none_or(|s| matches_search(l, s)))
            .cloned()
            .collect();

        // Newest first; ids break ties between rows created in the same instant.
        matching.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));

        Ok(matching
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count_for_user(
        &self,
        user_id: i64,
        search: Option<String>,
    ) -> Result<i64, AppError> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.user_id == user_id)
            .filter(|l| search.as_deref().is_none_or(|s| matches_search(l, s)))
            .count() as i64)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.links.lock().unwrap().retain(|l| l.id != id);
        Ok(())
    }

    async fn increment_clicks(&self, id: i64) -> Result<(), AppError> {
        if let Some(link) = self.links.lock().unwrap().iter_mut().find(|l| l.id == id) {
            link.clicks += 1;
        }
        Ok(())
    }
}

pub struct InMemoryClickRepository {
    clicks: Mutex<Vec<Click>>,
    next_id: AtomicI64,
}

impl InMemoryClickRepository {
    pub fn new() -> Self {
        Self {
            clicks: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Inserts a click with an explicit timestamp, for analytics fixtures.
    pub fn insert_click_at(
        &self,
        link_id: i64,
        clicked_at: DateTime<Utc>,
        device: &str,
        browser: &str,
    ) {
        let mut clicks = self.clicks.lock().unwrap();
        clicks.push(Click {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            link_id,
            clicked_at,
            device: device.to_string(),
            browser: browser.to_string(),
            os: "Unknown".to_string(),
            referrer: "Direct".to_string(),
            ip: None,
        });
    }

    pub fn count_for_link(&self, link_id: i64) -> usize {
        self.clicks
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.link_id == link_id)
            .count()
    }
}

#[async_trait]
impl ClickRepository for InMemoryClickRepository {
    async fn record(&self, new_click: NewClick) -> Result<(), AppError> {
        let mut clicks = self.clicks.lock().unwrap();
        clicks.push(Click {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            link_id: new_click.link_id,
            clicked_at: Utc::now(),
            device: new_click.device,
            browser: new_click.browser,
            os: new_click.os,
            referrer: new_click.referrer,
            ip: new_click.ip,
        });
        Ok(())
    }

    async fn list_for_link(&self, link_id: i64) -> Result<Vec<Click>, AppError> {
        Ok(self
            .clicks
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.link_id == link_id)
            .cloned()
            .collect())
    }

    async fn delete_for_link(&self, link_id: i64) -> Result<u64, AppError> {
        let mut clicks = self.clicks.lock().unwrap();
        let before = clicks.len();
        clicks.retain(|c| c.link_id != link_id);
        Ok((before - clicks.len()) as u64)
    }
}

pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, email: &str, password_hash: &str) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();

        if users.iter().any(|u| u.email == email) {
            return Err(AppError::bad_request(
                "Value is already in use",
                json!({ "email": email }),
            ));
        }

        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        users.push(user.clone());

        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        Ok(self.users.lock().unwrap().clone())
    }
}

#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: Mutex<HashMap<String, i64>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create(&self, token_hash: &str, user_id: i64) -> Result<(), AppError> {
        self.sessions
            .lock()
            .unwrap()
            .insert(token_hash.to_string(), user_id);
        Ok(())
    }

    async fn find_user_id(&self, token_hash: &str) -> Result<Option<i64>, AppError> {
        Ok(self.sessions.lock().unwrap().get(token_hash).copied())
    }

    async fn touch(&self, _token_hash: &str) -> Result<(), AppError> {
        Ok(())
    }
}

// ── State and router builders ───────────────────────────────────────────────

pub struct TestContext {
    pub state: AppState,
    pub click_rx: mpsc::Receiver<ClickEvent>,
    pub links: Arc<InMemoryLinkRepository>,
    pub clicks: Arc<InMemoryClickRepository>,
    pub users: Arc<InMemoryUserRepository>,
}

pub fn test_context() -> TestContext {
    test_context_with_queue(100)
}

pub fn test_context_with_queue(click_queue_capacity: usize) -> TestContext {
    let links = Arc::new(InMemoryLinkRepository::new());
    let clicks = Arc::new(InMemoryClickRepository::new());
    let users = Arc::new(InMemoryUserRepository::new());
    let sessions = Arc::new(InMemorySessionRepository::new());
    let cache = Arc::new(NullCache::new());

    let (click_tx, click_rx) = mpsc::channel(click_queue_capacity);

    let link_service = Arc::new(LinkService::new(
        links.clone(),
        clicks.clone(),
        cache.clone(),
        BASE_URL.to_string(),
    ));
    let analytics_service = Arc::new(AnalyticsService::new(links.clone(), clicks.clone()));
    let auth_service = Arc::new(AuthService::new(
        users.clone(),
        sessions,
        TEST_SECRET.to_string(),
    ));

    let state = AppState {
        link_service,
        analytics_service,
        auth_service,
        cache,
        click_tx,
    };

    TestContext {
        state,
        click_rx,
        links,
        clicks,
        users,
    }
}

/// Seeds a user account the way the admin CLI does.
pub async fn seed_user(ctx: &TestContext, email: &str, password: &str) -> i64 {
    ctx.users
        .create(email, &hash_with_secret(TEST_SECRET, password))
        .await
        .unwrap()
        .id
}

/// The redirect route, with a fixed peer address injected for `ConnectInfo`.
pub fn redirect_app(state: AppState) -> Router {
    Router::new()
        .route("/{code}", get(redirect_handler))
        .layer(MockConnectInfoLayer)
        .with_state(state)
}

/// The management API surface: login plus the bearer-protected /links routes.
pub fn api_app(state: AppState) -> Router {
    let protected = Router::new()
        .route("/links", post(create_link_handler).get(list_links_handler))
        .route("/links/{id}", delete(delete_link_handler))
        .route("/links/{id}/analytics", get(link_analytics_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .route("/auth/login", post(login_handler))
        .merge(protected)
        .with_state(state)
}

/// Logs in and returns the bearer token.
pub async fn login(server: &axum_test::TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/auth/login")
        .json(&json!({ "email": email, "password": password }))
        .await;

    assert_eq!(response.status_code(), 200);

    response.json::<serde_json::Value>()["token"]
        .as_str()
        .unwrap()
        .to_string()
}

// ── ConnectInfo injection ───────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> tower::Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
