use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::Serialize;
use tokenward_core::config::ApiSettings;
use tokenward_core::entities::{Credentials, TokenPair, UserProfile};
use tokenward_core::ports::AuthApi;
use tokenward_core::Error;
use tracing::{debug, info, instrument};

use crate::network::build_api_client;

const LOGIN_PATH: &str = "login/";
const USER_PATH: &str = "user/";
const LOGOUT_PATH: &str = "logout/";

/// Maximum length for error response bodies kept in errors
const MAX_ERROR_BODY_LENGTH: usize = 500;

#[derive(Debug, Serialize)]
struct LogoutRequest<'a> {
    refresh: &'a str,
}

/// REST client for the auth API (`login/`, `user/`, `logout/`)
pub struct RestAuthApi {
    client: Client,
    base_url: Url,
}

impl RestAuthApi {
    pub fn new(settings: &ApiSettings) -> Result<Self, Error> {
        Self::with_base_url(
            &settings.base_url,
            &settings.user_agent,
            settings.timeout_secs.map(Duration::from_secs),
        )
    }

    pub fn with_base_url(
        base_url: &str,
        user_agent: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, Error> {
        let base_url = normalize_base_url(base_url)?;
        let client = build_api_client(user_agent, timeout)?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, Error> {
        self.base_url
            .join(path)
            .map_err(|e| Error::Configuration(format!("invalid endpoint '{}': {}", path, e)))
    }
}

#[async_trait]
impl AuthApi for RestAuthApi {
    #[instrument(skip_all, fields(username = %credentials.username))]
    async fn login(&self, credentials: &Credentials) -> Result<TokenPair, Error> {
        let url = self.endpoint(LOGIN_PATH)?;
        debug!(url = %url, "sending login request");

        let response = self
            .client
            .post(url)
            .json(credentials)
            .send()
            .await
            .map_err(|e| Error::Network(format!("login request failed: {}", e)))?;

        let tokens: TokenPair = check_response(response)
            .await?
            .json()
            .await
            .map_err(|e| {
                Error::InvalidServerResponse(format!("failed to parse login response: {}", e))
            })?;

        info!("login accepted by server");
        Ok(tokens)
    }

    #[instrument(skip_all)]
    async fn fetch_user(&self, access_token: &str) -> Result<UserProfile, Error> {
        let url = self.endpoint(USER_PATH)?;
        debug!(url = %url, "fetching user profile");

        let response = self
            .client
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| Error::Network(format!("profile request failed: {}", e)))?;

        check_response(response)
            .await?
            .json()
            .await
            .map_err(|e| {
                Error::InvalidServerResponse(format!("failed to parse profile response: {}", e))
            })
    }

    #[instrument(skip_all)]
    async fn logout(&self, access_token: &str, refresh_token: &str) -> Result<(), Error> {
        let url = self.endpoint(LOGOUT_PATH)?;
        debug!(url = %url, "sending logout request");

        let response = self
            .client
            .post(url)
            .bearer_auth(access_token)
            .json(&LogoutRequest {
                refresh: refresh_token,
            })
            .send()
            .await
            .map_err(|e| Error::Network(format!("logout request failed: {}", e)))?;

        // Acknowledgement body is not used
        check_response(response).await?;
        Ok(())
    }
}

/// Parse the base URL, making sure endpoint paths are joined below it
fn normalize_base_url(raw: &str) -> Result<Url, Error> {
    let mut url = Url::parse(raw)
        .map_err(|e| Error::Configuration(format!("invalid API base URL '{}': {}", raw, e)))?;

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

/// Pass 2xx responses through, turn anything else into an error
async fn check_response(response: Response) -> Result<Response, Error> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(error_from_status(status, &body))
}

fn error_from_status(status: StatusCode, body: &str) -> Error {
    if status == StatusCode::UNAUTHORIZED {
        return Error::Unauthorized;
    }

    Error::Http {
        status: status.as_u16(),
        body: truncate_body(body),
    }
}

/// Truncate a response body to avoid carrying excessive data in errors
fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_LENGTH {
        return body.to_string();
    }

    let mut end = MAX_ERROR_BODY_LENGTH;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
}
