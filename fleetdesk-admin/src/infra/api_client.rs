use log::{debug, info};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use url::Url;

use fleetdesk_model::IdentityId;

/// Failures talking to the hosted data service.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid service url `{0}`")]
    InvalidUrl(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to decode response")]
    Decode(#[source] serde_json::Error),
}

/// Client for the hosted data service: collection endpoints under
/// `/rest/v1` and the identity endpoints under `/auth/v1`.
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: Url,
    api_key: String,
    access_token: Option<String>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("has_api_key", &!self.api_key.is_empty())
            .field("has_token", &self.access_token.is_some())
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// The sign-up endpoint answers with either a session wrapping the user or
/// the bare user when confirmation is pending.
#[derive(Debug, Deserialize)]
struct SignUpResponse {
    #[serde(default)]
    user: Option<SignedUpUser>,
    #[serde(default)]
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SignedUpUser {
    id: String,
}

impl SignUpResponse {
    fn identity(self) -> Option<IdentityId> {
        self.user
            .map(|user| user.id)
            .or(self.id)
            .filter(|id| !id.is_empty())
            .map(IdentityId::new)
    }
}

impl ApiClient {
    /// Create a new API client
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
    ) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| ApiError::InvalidUrl(base_url.to_string()))?;

        let client = Client::builder().build()?;

        info!("[ApiClient] Creating API client for {}", base_url);

        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
            access_token: None,
        })
    }

    /// Attach the signed-in operator's access token.
    pub fn with_access_token(mut self, token: Option<String>) -> Self {
        self.access_token = token;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// URL of a named collection.
    pub fn collection_url(&self, collection: &str) -> Result<Url, ApiError> {
        self.endpoint(&["rest", "v1", collection])
    }

    /// URL of an identity endpoint.
    pub fn auth_url(&self, path: &str) -> Result<Url, ApiError> {
        self.endpoint(&["auth", "v1", path])
    }

    /// URL selecting `columns` of every row, ascending by `order_by`.
    pub fn select_url(
        &self,
        collection: &str,
        columns: &str,
        order_by: &str,
    ) -> Result<Url, ApiError> {
        let mut url = self.collection_url(collection)?;
        url.query_pairs_mut()
            .append_pair("select", columns)
            .append_pair("order", &format!("{order_by}.asc"));
        Ok(url)
    }

    /// URL scoping a mutation to a single primary key.
    pub fn row_url(&self, collection: &str, id: &str) -> Result<Url, ApiError> {
        let mut url = self.collection_url(collection)?;
        url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));
        Ok(url)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let bearer =
            self.access_token.as_deref().unwrap_or(self.api_key.as_str());
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(bearer)
    }

    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(ApiError::Status { status, body })
    }

    async fn decode<T: DeserializeOwned>(
        response: Response,
    ) -> Result<T, ApiError> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(ApiError::Decode)
    }

    /// Fetch every row of a collection.
    pub async fn select<T: DeserializeOwned>(
        &self,
        collection: &str,
        columns: &str,
        order_by: &str,
    ) -> Result<Vec<T>, ApiError> {
        let url = self.select_url(collection, columns, order_by)?;
        debug!("[ApiClient] GET {}", url);
        let response = self.authorize(self.client.get(url)).send().await?;
        Self::decode(Self::check(response).await?).await
    }

    /// Insert rows into a collection.
    pub async fn insert<T: Serialize>(
        &self,
        collection: &str,
        rows: &[T],
    ) -> Result<(), ApiError> {
        let url = self.collection_url(collection)?;
        debug!("[ApiClient] POST {} ({} rows)", url, rows.len());
        let response = self
            .authorize(self.client.post(url))
            .header("Prefer", "return=minimal")
            .json(rows)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Update fields of the row whose primary key is `id`.
    pub async fn update_by_id<T: Serialize>(
        &self,
        collection: &str,
        id: &str,
        changes: &T,
    ) -> Result<(), ApiError> {
        let url = self.row_url(collection, id)?;
        debug!("[ApiClient] PATCH {}", url);
        let response = self
            .authorize(self.client.patch(url))
            .header("Prefer", "return=minimal")
            .json(changes)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Register a new authentication identity. Returns `None` when the
    /// service accepted the request without issuing an identity.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        redirect_to: &str,
    ) -> Result<Option<IdentityId>, ApiError> {
        let mut url = self.auth_url("signup")?;
        url.query_pairs_mut().append_pair("redirect_to", redirect_to);
        debug!("[ApiClient] POST {}", url.path());
        let response = self
            .client
            .post(url)
            .header("apikey", &self.api_key)
            .json(&SignUpRequest { email, password })
            .send()
            .await?;
        let response = Self::check(response).await?;
        let body: SignUpResponse = Self::decode(response).await?;
        Ok(body.identity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, "anon").expect("valid base url")
    }

    #[test]
    fn select_url_orders_ascending() {
        let url = client("https://fleet.example.com")
            .select_url("vehicles", "*", "unit_number")
            .unwrap();
        assert_eq!(url.path(), "/rest/v1/vehicles");
        assert_eq!(url.query(), Some("select=*&order=unit_number.asc"));
    }

    #[test]
    fn base_path_is_preserved() {
        let url = client("https://gateway.example.com/fleet/")
            .collection_url("profiles")
            .unwrap();
        assert_eq!(url.path(), "/fleet/rest/v1/profiles");
    }

    #[test]
    fn row_url_scopes_by_id() {
        let url = client("http://localhost:54321")
            .row_url("profiles", "abc")
            .unwrap();
        assert_eq!(url.query(), Some("id=eq.abc"));
    }

    #[test]
    fn rejects_non_base_urls() {
        assert!(matches!(
            ApiClient::new("mailto:ops@example.com", "anon"),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(matches!(
            ApiClient::new("not a url", "anon"),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn sign_up_response_accepts_both_shapes() {
        let wrapped: SignUpResponse =
            serde_json::from_str(r#"{"user":{"id":"u-1"},"session":null}"#)
                .unwrap();
        assert_eq!(wrapped.identity(), Some(IdentityId::new("u-1")));

        let bare: SignUpResponse =
            serde_json::from_str(r#"{"id":"u-2","email":"a@b.c"}"#).unwrap();
        assert_eq!(bare.identity(), Some(IdentityId::new("u-2")));

        let empty: SignUpResponse =
            serde_json::from_str(r#"{"user":null}"#).unwrap();
        assert_eq!(empty.identity(), None);
    }

    #[test]
    fn debug_hides_credentials() {
        let client = client("https://fleet.example.com")
            .with_access_token(Some("secret-token".into()));
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("has_token: true"));
    }
}
