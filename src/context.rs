use crate::api::client::GmailClient;
use crate::auth::token_store::TokenStore;
use crate::auth::{AuthService, FileTokenStore};
use crate::config::{self, AppPaths, Settings};
use crate::error::{AppError, AppResult};

#[derive(Debug)]
pub struct AppContext {
    pub verbose: bool,
    pub paths: AppPaths,
    pub settings: Settings,
    pub token_store: FileTokenStore,
    pub client: GmailClient,
}

impl AppContext {
    pub fn bootstrap(verbose: bool) -> AppResult<Self> {
        let paths = AppPaths::discover()?;
        let settings = config::load_settings(&paths)?;
        let token_store = FileTokenStore::new(paths.clone());
        let client = GmailClient::new();

        Ok(Self {
            verbose,
            paths,
            settings,
            token_store,
            client,
        })
    }

    /// Current access token, refreshed through the stored refresh token when
    /// expired. Refresh failure means the stored grant is no longer usable.
    pub async fn access_token(&self) -> AppResult<String> {
        let token = self.token_store.load()?.ok_or_else(|| {
            AppError::MissingCredentials(format!(
                "no stored token at {}. complete the one-time authorization flow first",
                self.paths.token_file().display()
            ))
        })?;

        if token.is_expired(std::time::SystemTime::now()) {
            log::debug!("access token expired, refreshing");
            let refreshed = AuthService::refresh(&self.settings, &self.token_store).await?;
            return Ok(refreshed.access_token);
        }

        Ok(token.access_token)
    }
}
