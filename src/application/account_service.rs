//! Login, profile and watch history

use crate::domain::{LoginResult, UserProfile, WatchedItem};
use crate::error::{ScraperError, ScraperResult};
use crate::infrastructure::config::site;
use crate::infrastructure::parsing::ParseContext;
use crate::infrastructure::parsing::account_parser::{parse_profile, user_id_from_cookies};
use crate::infrastructure::parsing::dates::local_today;
use crate::infrastructure::parsing::watch_history_parser::parse_watch_history;
use crate::infrastructure::transport::{Transport, TransportRequest};
use scraper::Html;
use std::sync::{Arc, RwLock};
use tracing::{info, warn};

/// Session-bound account operations
///
/// The session cookie itself lives in the transport; this service only
/// remembers the user id needed to address the profile page.
pub struct AccountService {
    transport: Arc<dyn Transport>,
    user_id: RwLock<Option<String>>,
}

impl AccountService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            user_id: RwLock::new(None),
        }
    }

    pub async fn login(&self, login: &str, password: &str) -> ScraperResult<LoginResult> {
        info!("Logging in as {}", login);
        let request = TransportRequest::post(site::LOGIN)
            .with_form("login_name", login)
            .with_form("login_password", password)
            .with_form("login_not_save", 0);
        let response = self.transport.send(request).await?;
        let result: LoginResult = response.json()?;

        match user_id_from_cookies(&response.set_cookies) {
            Some(user_id) => {
                info!("Signed in as user {}", user_id);
                self.set_user_id(Some(user_id));
            }
            None if result.success => warn!("Login succeeded but no user id cookie was set"),
            None => {}
        }
        Ok(result)
    }

    pub fn user_id(&self) -> Option<String> {
        self.user_id.read().ok().and_then(|guard| guard.clone())
    }

    fn set_user_id(&self, user_id: Option<String>) {
        if let Ok(mut guard) = self.user_id.write() {
            *guard = user_id;
        }
    }

    pub async fn profile(&self) -> ScraperResult<UserProfile> {
        let user_id = self.user_id().ok_or(ScraperError::NotLoggedIn)?;
        let response = self
            .transport
            .send(TransportRequest::get(site::user_profile(&user_id)))
            .await?;
        let html = Html::parse_document(&response.body);
        Ok(parse_profile(&html))
    }

    /// "Continue watching" list of the signed-in user
    pub async fn watch_history(&self) -> ScraperResult<Vec<WatchedItem>> {
        let response = self
            .transport
            .send(TransportRequest::get(site::CONTINUE_WATCHING))
            .await?;
        let html = Html::parse_document(&response.body);
        let context = ParseContext::new("watch history", site::CONTINUE_WATCHING);
        Ok(parse_watch_history(&html, local_today(), &context)?)
    }
}
