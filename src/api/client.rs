use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, AppResult};
use crate::retry;

use super::labels;
use super::messages;
use super::models::{Format, LabelView, ProjectedMessage, RawMessage, SearchRequest};
use super::projection;

const GMAIL_API_BASE_URL: &str = "https://gmail.googleapis.com";

/// Which command a request belongs to. Remote rejections are folded into the
/// matching domain error so the envelope taxonomy stays uniform.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ApiScope {
    Search,
    Send,
    Label,
}

#[derive(Debug, Clone)]
pub struct GmailClient {
    http: Client,
    base_url: String,
}

impl GmailClient {
    pub fn new() -> Self {
        Self::with_base_url(GMAIL_API_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Lists message ids matching the opaque query string, fetches each one,
    /// and projects it into the requested shape. Ordering follows the list
    /// endpoint; results are never re-sorted or cached locally.
    pub async fn search(
        &self,
        request: &SearchRequest,
        access_token: &str,
    ) -> AppResult<Vec<ProjectedMessage>> {
        request.validate()?;

        let params = messages::list_query(request.max_results, &request.query);
        let list: MessageListResource = self
            .get_json(ApiScope::Search, messages::list_endpoint(), access_token, &params)
            .await?;

        let entries = list.messages.unwrap_or_default();
        log::debug!("query matched {} message(s)", entries.len());

        let mut results = Vec::with_capacity(entries.len());
        for entry in entries {
            let raw = self.get_message(&entry.id, request.format, access_token).await?;
            results.push(projection::project(&raw, request.format));
        }

        Ok(results)
    }

    async fn get_message(
        &self,
        id: &str,
        format: Format,
        access_token: &str,
    ) -> AppResult<RawMessage> {
        let endpoint = messages::message_endpoint(id);
        let params = messages::get_query(format);
        self.get_json(ApiScope::Search, &endpoint, access_token, &params)
            .await
    }

    /// Submits a base64url-encoded RFC822 message to the send endpoint.
    pub async fn send(&self, raw_message: &str, access_token: &str) -> AppResult<SendResponse> {
        let request = SendResource {
            raw: raw_message.to_string(),
        };
        self.post_json(ApiScope::Send, messages::send_endpoint(), access_token, &request)
            .await
    }

    pub async fn list_labels(&self, access_token: &str) -> AppResult<Vec<LabelView>> {
        let response: LabelListResource = self
            .get_json(ApiScope::Label, labels::labels_endpoint(), access_token, &[])
            .await?;

        Ok(response
            .labels
            .unwrap_or_default()
            .into_iter()
            .map(LabelResource::into_view)
            .collect())
    }

    /// Creates a user label. Reserved system names are rejected locally,
    /// before the request is issued; a provider 409 surfaces as a duplicate.
    pub async fn create_label(&self, name: &str, access_token: &str) -> AppResult<LabelView> {
        if labels::is_system_label(name) {
            return Err(AppError::Validation(format!(
                "`{name}` is a reserved system label and cannot be created"
            )));
        }

        let request = CreateLabelResource {
            name: name.to_string(),
            message_list_visibility: "show".to_string(),
            label_list_visibility: "labelShow".to_string(),
        };
        let created: LabelResource = self
            .post_json(ApiScope::Label, labels::labels_endpoint(), access_token, &request)
            .await?;

        Ok(created.into_view())
    }

    /// Resolves a label name to its wire identifier via a list call. Labels
    /// are addressed by opaque id on the wire, by name at this interface.
    pub async fn resolve_label(&self, name: &str, access_token: &str) -> AppResult<LabelView> {
        let needle = name.trim();
        let known = self.list_labels(access_token).await?;

        known
            .into_iter()
            .find(|label| label.id == needle || label.name.eq_ignore_ascii_case(needle))
            .ok_or_else(|| AppError::Label(format!("label not found: {needle}")))
    }

    /// Adds or removes label ids on one message. Idempotent on the provider
    /// side: re-adding a present label or re-removing an absent one is a
    /// successful no-op.
    pub async fn modify_message_labels(
        &self,
        message_id: &str,
        add_label_ids: &[String],
        remove_label_ids: &[String],
        access_token: &str,
    ) -> AppResult<()> {
        let endpoint = labels::modify_message_endpoint(message_id);
        let request = ModifyLabelsResource {
            add_label_ids: add_label_ids.to_vec(),
            remove_label_ids: remove_label_ids.to_vec(),
        };
        let _: ModifyLabelsResponse = self
            .post_json(ApiScope::Label, &endpoint, access_token, &request)
            .await?;
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        scope: ApiScope,
        endpoint: &str,
        access_token: &str,
        query: &[(String, String)],
    ) -> AppResult<T> {
        let url = self.endpoint_url(endpoint)?;
        let mut request = self.http.get(url).bearer_auth(access_token);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = self.execute(request).await?;
        parse_json_response(scope, response).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        scope: ApiScope,
        endpoint: &str,
        access_token: &str,
        body: &B,
    ) -> AppResult<T> {
        let url = self.endpoint_url(endpoint)?;
        let request = self.http.post(url).bearer_auth(access_token).json(body);

        let response = self.execute(request).await?;
        parse_json_response(scope, response).await
    }

    /// Sends the request, retrying 429 and 5xx responses per the backoff
    /// policy. Other statuses are returned to the caller unchanged.
    async fn execute(&self, builder: reqwest::RequestBuilder) -> AppResult<reqwest::Response> {
        let mut attempt = 1;
        loop {
            let request = builder.try_clone().ok_or_else(|| {
                AppError::Validation("request body does not support retry".to_string())
            })?;
            let response = request.send().await?;
            let status = response.status();

            if status.is_success() {
                return Ok(response);
            }

            let decision = retry::decide(status, attempt);
            if !decision.retry {
                return Ok(response);
            }

            log::debug!(
                "transient {status} on attempt {attempt}, retrying in {:?}",
                decision.delay
            );
            tokio::time::sleep(decision.delay).await;
            attempt += 1;
        }
    }

    fn endpoint_url(&self, endpoint: &str) -> AppResult<Url> {
        let mut url = Url::parse(&self.base_url)?;
        url.set_path(endpoint.trim_start_matches('/'));
        Ok(url)
    }
}

impl Default for GmailClient {
    fn default() -> Self {
        Self::new()
    }
}

async fn parse_json_response<T: DeserializeOwned>(
    scope: ApiScope,
    response: reqwest::Response,
) -> AppResult<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let body = response.text().await.unwrap_or_default();
    Err(map_api_error(scope, status, &body))
}

fn map_api_error(scope: ApiScope, status: StatusCode, body: &str) -> AppError {
    let message = parse_api_error_message(body).unwrap_or_else(|| {
        let body = body.trim();
        if body.is_empty() {
            format!("gmail api request failed ({status}) with no error details")
        } else {
            body.to_string()
        }
    });

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return AppError::Auth(format!(
            "gmail api authorization failed ({status}): {message}"
        ));
    }

    match scope {
        // The provider is the only query interpreter; its rejection message
        // is surfaced verbatim to aid debugging.
        ApiScope::Search if status == StatusCode::BAD_REQUEST => AppError::Search(message),
        ApiScope::Search => AppError::Search(format!(
            "gmail api request failed ({status}): {message}"
        )),
        ApiScope::Send => AppError::Send(format!(
            "gmail api rejected the send ({status}): {message}"
        )),
        ApiScope::Label if status == StatusCode::CONFLICT => {
            AppError::Label(format!("label already exists: {message}"))
        }
        ApiScope::Label => AppError::Label(format!(
            "gmail api rejected the label operation ({status}): {message}"
        )),
    }
}

/// Extracts `error.message` from the provider's error envelope, verbatim.
fn parse_api_error_message(body: &str) -> Option<String> {
    let envelope = serde_json::from_str::<ApiErrorEnvelope>(body).ok()?;
    envelope.error.message
}

#[derive(Debug, Deserialize)]
struct MessageListResource {
    messages: Option<Vec<MessageListEntry>>,
}

#[derive(Debug, Deserialize)]
struct MessageListEntry {
    id: String,
}

#[derive(Debug, Serialize)]
struct SendResource {
    raw: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendResponse {
    pub id: String,
    #[serde(default)]
    pub thread_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LabelListResource {
    labels: Option<Vec<LabelResource>>,
}

#[derive(Debug, Deserialize)]
struct LabelResource {
    id: String,
    name: String,
    #[serde(rename = "type", default = "default_label_kind")]
    kind: String,
}

fn default_label_kind() -> String {
    "user".to_string()
}

impl LabelResource {
    fn into_view(self) -> LabelView {
        LabelView {
            id: self.id,
            name: self.name,
            kind: self.kind.to_ascii_lowercase(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateLabelResource {
    name: String,
    message_list_visibility: String,
    label_list_visibility: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ModifyLabelsResource {
    add_label_ids: Vec<String>,
    remove_label_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ModifyLabelsResponse {}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: Option<String>,
}
