//! Cookie-session HTTP client for fitocracy.com

use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{HeaderValue, ACCEPT, REFERER};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use super::{
    validate_activity_id, ApiActivity, ApiActivityHistory, RemoteClient, RemoteError,
    RemoteOptions, RemoteResult,
};
use crate::util::compact_text;

pub const DEFAULT_BASE_URL: &str = "https://www.fitocracy.com";

/// Header carrying the numeric user id after a successful login
const USER_ID_HEADER: &str = "X-Fitocracy-User";
const CSRF_COOKIE: &str = "csrftoken";

/// An authenticated Fitocracy session
///
/// Holds the cookie jar established by the login form; every later request
/// rides on those cookies.
#[derive(Debug, Clone)]
pub struct FitocracySession {
    base_url: String,
    user_id: i64,
    client: Client,
}

impl FitocracySession {
    /// Log in with the web form and return a session for the account
    pub async fn login(
        options: &RemoteOptions,
        username: &str,
        password: &str,
    ) -> RemoteResult<Self> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(RemoteError::Auth(
                "username and password are required".to_string(),
            ));
        }

        let base_url = normalize_base_url(&options.base_url)?;
        let site = Url::parse(&base_url)
            .map_err(|error| RemoteError::InvalidArgument(format!("invalid base URL: {error}")))?;

        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .timeout(options.timeout)
            .build()?;

        let landing = client.get(format!("{base_url}/")).send().await?;
        if !landing.status().is_success() {
            return Err(RemoteError::Auth(format!(
                "landing page returned HTTP {}",
                landing.status().as_u16()
            )));
        }

        let csrf_token = jar
            .cookies(&site)
            .and_then(|header| find_cookie(&header, CSRF_COOKIE));

        let mut form = vec![("username", username), ("password", password)];
        if let Some(token) = csrf_token.as_deref() {
            form.push(("csrfmiddlewaretoken", token));
        }

        let response = client
            .post(format!("{base_url}/accounts/login/"))
            .header(REFERER, format!("{base_url}/"))
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Auth(format!(
                "login returned HTTP {}",
                status.as_u16()
            )));
        }

        let user_id = parse_user_id(response.headers().get(USER_ID_HEADER))?;
        tracing::info!("Logged in to Fitocracy as {username} ({user_id})");

        Ok(Self {
            base_url,
            user_id,
            client,
        })
    }

    /// Remote user id of the logged-in account
    pub const fn user_id(&self) -> i64 {
        self.user_id
    }

    fn activities_url(&self, user_id: i64) -> String {
        format!("{}/get_user_activities/{user_id}/", self.base_url)
    }

    /// History URL requesting every set of every workout in one page
    fn activity_history_url(&self, activity_id: i64) -> String {
        format!(
            "{}/get_history_json_from_activity/{activity_id}/?max_sets=-1&max_workouts=-1&reverse=1",
            self.base_url
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> RemoteResult<T> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(RemoteError::Api {
                status: status.as_u16(),
                message: compact_text(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

impl RemoteClient for FitocracySession {
    async fn list_activity_counts(&self, remote_user_id: i64) -> RemoteResult<Vec<ApiActivity>> {
        tracing::info!("Getting activities for user {remote_user_id}");
        self.get_json(&self.activities_url(remote_user_id)).await
    }

    async fn fetch_activity_history(
        &self,
        activity_id: i64,
    ) -> RemoteResult<Vec<ApiActivityHistory>> {
        validate_activity_id(activity_id)?;
        let histories: Vec<ApiActivityHistory> = self
            .get_json(&self.activity_history_url(activity_id))
            .await?;
        tracing::debug!(
            "Fetched {} history entries for activity {activity_id}",
            histories.len()
        );
        Ok(histories)
    }
}

fn normalize_base_url(raw: &str) -> RemoteResult<String> {
    let trimmed = raw.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.trim_end_matches('/').to_string())
    } else {
        Err(RemoteError::InvalidArgument(
            "base URL must include http:// or https://".to_string(),
        ))
    }
}

fn find_cookie(header: &HeaderValue, name: &str) -> Option<String> {
    header.to_str().ok()?.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name && !value.is_empty()).then(|| value.to_string())
    })
}

fn parse_user_id(header: Option<&HeaderValue>) -> RemoteResult<i64> {
    let raw = header
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .ok_or_else(|| {
            RemoteError::Auth(format!(
                "login response did not include {USER_ID_HEADER}; check the credentials"
            ))
        })?;

    match raw.parse::<i64>() {
        Ok(user_id) if user_id > 0 => Ok(user_id),
        _ => Err(RemoteError::Auth(format!(
            "login response carried an invalid {USER_ID_HEADER} value: {raw}"
        ))),
    }
}
