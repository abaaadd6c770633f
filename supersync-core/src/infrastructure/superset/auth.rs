// supersync-core/src/infrastructure/superset/auth.rs

// Superset accepts either a username/password login (which yields a JWT access
// token) or a JWT handed over by the caller. Both then need a CSRF token for
// mutating calls.

use reqwest::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue, REFERER};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument};
use url::Url;

use crate::infrastructure::error::InfrastructureError;

const LOGIN_PATH: &str = "api/v1/security/login";
const CSRF_PATH: &str = "api/v1/security/csrf_token/";
const CSRF_HEADER: HeaderName = HeaderName::from_static("x-csrftoken");

pub const DEFAULT_PROVIDER: &str = "ldap";

#[derive(Clone)]
pub enum SupersetAuth {
    UsernamePassword {
        username: String,
        password: Option<String>,
        provider: String,
    },
    Jwt {
        token: String,
    },
}

// Secrets stay out of logs
impl std::fmt::Debug for SupersetAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UsernamePassword {
                username, provider, ..
            } => f
                .debug_struct("UsernamePassword")
                .field("username", username)
                .field("provider", provider)
                .finish_non_exhaustive(),
            Self::Jwt { .. } => f.debug_struct("Jwt").finish_non_exhaustive(),
        }
    }
}

#[derive(Deserialize)]
struct LoginResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct CsrfResponse {
    result: Option<String>,
}

impl SupersetAuth {
    pub fn username_password(username: impl Into<String>, password: Option<String>) -> Self {
        Self::UsernamePassword {
            username: username.into(),
            password,
            provider: DEFAULT_PROVIDER.to_string(),
        }
    }

    pub fn jwt(token: impl Into<String>) -> Self {
        Self::Jwt {
            token: token.into(),
        }
    }

    /// Logs in if needed and returns the headers every API call must carry.
    #[instrument(skip(http))]
    pub async fn authenticate(
        &self,
        http: &Client,
        base_url: &Url,
    ) -> Result<HeaderMap, InfrastructureError> {
        let csrf_url = base_url.join(CSRF_PATH)?;
        let mut headers = HeaderMap::new();

        match self {
            Self::UsernamePassword {
                username,
                password,
                provider,
            } => {
                let body = json!({
                    "username": username,
                    "password": password,
                    "provider": provider,
                });
                let response = http.post(base_url.join(LOGIN_PATH)?).json(&body).send().await?;
                let login: LoginResponse = read_json(response).await?;
                debug!("Logged in to Superset");

                headers.insert(AUTHORIZATION, bearer(&login.access_token)?);
                if let Some(csrf) = fetch_csrf_token(http, &csrf_url, &login.access_token).await? {
                    headers.insert(CSRF_HEADER, header_value(&csrf)?);
                    headers.insert(REFERER, header_value(csrf_url.as_str())?);
                }
            }
            Self::Jwt { token } => {
                headers.insert(AUTHORIZATION, bearer(token)?);
                if let Some(csrf) = fetch_csrf_token(http, &csrf_url, token).await? {
                    headers.insert(CSRF_HEADER, header_value(&csrf)?);
                }
            }
        }

        Ok(headers)
    }
}

/// `None` when the instance runs with CSRF protection disabled.
async fn fetch_csrf_token(
    http: &Client,
    csrf_url: &Url,
    access_token: &str,
) -> Result<Option<String>, InfrastructureError> {
    let response = http
        .get(csrf_url.clone())
        .bearer_auth(access_token)
        .send()
        .await?;
    let payload: CsrfResponse = read_json(response).await?;
    Ok(payload.result.filter(|token| !token.is_empty()))
}

async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, InfrastructureError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(InfrastructureError::Auth(format!(
            "Superset answered {}: {}",
            status.as_u16(),
            body
        )));
    }
    Ok(response.json().await?)
}

fn bearer(token: &str) -> Result<HeaderValue, InfrastructureError> {
    let mut value = header_value(&format!("Bearer {}", token))?;
    value.set_sensitive(true);
    Ok(value)
}

fn header_value(raw: &str) -> Result<HeaderValue, InfrastructureError> {
    HeaderValue::from_str(raw)
        .map_err(|_| InfrastructureError::Auth("token contains invalid characters".to_string()))
}
