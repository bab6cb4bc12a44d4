use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Deserialize;

use crate::config::Settings;
use crate::error::{AppError, AppResult};

use super::token::TokenSet;
use super::token_store::TokenStore;

const GOOGLE_TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";

/// Refresh side of the OAuth collaborator. The interactive authorization
/// flow is a one-time external setup step and lives outside this crate; here
/// we only exchange the persisted refresh token for a fresh access token.
#[derive(Debug, Default)]
pub struct AuthService;

impl AuthService {
    pub async fn refresh<S: TokenStore>(settings: &Settings, store: &S) -> AppResult<TokenSet> {
        let current = store.load()?.ok_or_else(|| {
            AppError::MissingCredentials(
                "no stored token. complete the one-time authorization flow first".to_string(),
            )
        })?;

        if !current.is_expired(SystemTime::now()) {
            return Ok(current);
        }

        let refresh_token = current.refresh_token.clone().ok_or_else(|| {
            AppError::Auth("access token expired and no refresh token is stored".to_string())
        })?;

        let mut refreshed = exchange_refresh_token(settings, &refresh_token).await?;
        if refreshed.refresh_token.is_none() {
            refreshed.refresh_token = Some(refresh_token);
        }

        store.save(&refreshed)?;
        Ok(refreshed)
    }
}

async fn exchange_refresh_token(settings: &Settings, refresh_token: &str) -> AppResult<TokenSet> {
    let mut form = HashMap::from([
        ("grant_type", "refresh_token".to_string()),
        ("refresh_token", refresh_token.to_string()),
        ("client_id", settings.client_id()?.to_string()),
    ]);

    if let Some(client_secret) = settings.client_secret() {
        form.insert("client_secret", client_secret.to_string());
    }

    let response = reqwest::Client::new()
        .post(GOOGLE_TOKEN_ENDPOINT)
        .form(&form)
        .send()
        .await
        .map_err(|err| AppError::Auth(format!("token refresh request failed: {err}")))?;

    parse_token_response(response).await
}

async fn parse_token_response(response: reqwest::Response) -> AppResult<TokenSet> {
    if response.status().is_success() {
        let payload: OAuthTokenResponse = response.json().await?;
        return Ok(TokenSet {
            access_token: payload.access_token,
            refresh_token: payload.refresh_token,
            expires_at_unix: expires_at_unix(payload.expires_in),
            token_type: payload.token_type,
            scope: payload.scope,
        });
    }

    let status = response.status();
    let body = response.text().await?;
    if let Ok(err_payload) = serde_json::from_str::<OAuthErrorResponse>(&body) {
        let error = err_payload
            .error
            .unwrap_or_else(|| "unknown_oauth_error".to_string());
        let description = err_payload
            .error_description
            .unwrap_or_else(|| "no description".to_string());
        return Err(AppError::Auth(format!(
            "token refresh failed ({status}): {error} ({description})"
        )));
    }

    Err(AppError::Auth(format!(
        "token refresh failed ({status}): {body}"
    )))
}

fn expires_at_unix(expires_in: Option<u64>) -> Option<u64> {
    let expires_in = expires_in?;
    let now = SystemTime::now().duration_since(UNIX_EPOCH).ok()?.as_secs();
    Some(now.saturating_add(expires_in))
}

#[derive(Debug, Deserialize)]
struct OAuthTokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<u64>,
    token_type: Option<String>,
    scope: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OAuthErrorResponse {
    error: Option<String>,
    error_description: Option<String>,
}
