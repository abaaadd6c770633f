// supersync-core/src/infrastructure/superset/client.rs

// REST adapter of the DatabaseRegistry port.
//
// GET  api/v1/database/?q=(page:N,page_size:100)
// POST api/v1/database/
// PUT  api/v1/database/{id}

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, instrument};
use url::Url;

use super::auth::SupersetAuth;
use crate::error::SupersyncError;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::uri::mask_password;
use crate::ports::registry::{DatabaseRegistry, DatabaseUpdate, NewDatabase, RemoteDatabase};

const DATABASE_PATH: &str = "api/v1/database/";
const PAGE_SIZE: usize = 100;

#[derive(Debug, Clone)]
pub struct SupersetClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl SupersetClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
            user_agent: format!("supersync/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[derive(Deserialize)]
struct ListResponse {
    count: Option<usize>,
    result: Vec<RemoteDatabase>,
}

#[derive(Deserialize)]
struct MutationResponse {
    id: i64,
    result: serde_json::Map<String, serde_json::Value>,
}

impl MutationResponse {
    // The API returns the id next to the record instead of inside it
    fn into_database(mut self) -> Result<RemoteDatabase, InfrastructureError> {
        self.result
            .insert("id".to_string(), serde_json::Value::from(self.id));
        Ok(serde_json::from_value(serde_json::Value::Object(
            self.result,
        ))?)
    }
}

pub struct SupersetClient {
    http: Client,
    base_url: Url,
    headers: HeaderMap,
}

impl SupersetClient {
    /// Builds the HTTP client and authenticates right away.
    #[instrument(skip(config), fields(url = %config.base_url))]
    pub async fn connect(
        config: SupersetClientConfig,
        auth: SupersetAuth,
    ) -> Result<Self, InfrastructureError> {
        let base_url = normalize_base_url(&config.base_url)?;
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .cookie_store(true)
            .build()?;

        let headers = auth.authenticate(&http, &base_url).await?;
        info!("🔐 Authenticated against Superset");

        Ok(Self {
            http,
            base_url,
            headers,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, InfrastructureError> {
        Ok(self.base_url.join(path)?)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, InfrastructureError> {
        let response = request.headers(self.headers.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InfrastructureError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl DatabaseRegistry for SupersetClient {
    async fn get_databases(&self) -> Result<Vec<RemoteDatabase>, SupersyncError> {
        let url = self.endpoint(DATABASE_PATH)?;
        let mut databases = Vec::new();

        // Superset pages with a rison query. A short page or a reached
        // `count` ends the listing, even if the server ignores `page`.
        for page in 0.. {
            let query = format!("(page:{},page_size:{})", page, PAGE_SIZE);
            let request = self.http.get(url.clone()).query(&[("q", query)]);
            let payload: ListResponse = self.send(request).await?;

            let fetched = payload.result.len();
            debug!(page, count = fetched, "Fetched database page");
            databases.extend(payload.result);

            let total_reached = payload.count.is_some_and(|total| databases.len() >= total);
            if fetched < PAGE_SIZE || total_reached {
                break;
            }
        }

        Ok(databases)
    }

    async fn create_database(
        &self,
        database: NewDatabase,
    ) -> Result<RemoteDatabase, SupersyncError> {
        info!(
            name = %database.database_name,
            uri = %mask_password(&database.sqlalchemy_uri),
            "Creating database"
        );
        let request = self.http.post(self.endpoint(DATABASE_PATH)?).json(&database);
        let payload: MutationResponse = self.send(request).await?;
        Ok(payload.into_database()?)
    }

    async fn update_database(
        &self,
        database_id: i64,
        update: DatabaseUpdate,
    ) -> Result<RemoteDatabase, SupersyncError> {
        info!(id = database_id, name = %update.database_name, "Updating database");
        let url = self.endpoint(&format!("{}{}", DATABASE_PATH, database_id))?;
        let request = self.http.put(url).json(&update);
        let payload: MutationResponse = self.send(request).await?;
        Ok(payload.into_database()?)
    }
}

// Url::join drops the last segment unless the base ends with '/'
fn normalize_base_url(raw: &str) -> Result<Url, InfrastructureError> {
    let mut url = Url::parse(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_login(server: &MockServer, csrf: &str) {
        Mock::given(method("POST"))
            .and(path("/api/v1/security/login"))
            .and(body_json(json!({
                "username": "admin",
                "password": "admin",
                "provider": "ldap",
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"access_token": "jwt-123"})),
            )
            .expect(1)
            .mount(server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/v1/security/csrf_token/"))
            .and(header("authorization", "Bearer jwt-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": csrf})))
            .mount(server)
            .await;
    }

    async fn connect(server: &MockServer) -> Result<SupersetClient> {
        let auth = SupersetAuth::username_password("admin", Some("admin".to_string()));
        Ok(SupersetClient::connect(SupersetClientConfig::new(server.uri()), auth).await?)
    }

    #[test]
    fn test_normalize_base_url() -> Result<()> {
        assert_eq!(
            normalize_base_url("https://superset.example.org/bi")?.as_str(),
            "https://superset.example.org/bi/"
        );
        assert_eq!(
            normalize_base_url("https://superset.example.org")?.as_str(),
            "https://superset.example.org/"
        );
        assert!(normalize_base_url("not a url").is_err());
        Ok(())
    }

    fn database_page(first_id: i64, len: usize) -> serde_json::Value {
        (0..len as i64)
            .map(|i| json!({"id": first_id + i, "database_name": format!("db_{}", first_id + i)}))
            .collect()
    }

    #[tokio::test]
    async fn test_get_databases_paginates() -> Result<()> {
        let server = MockServer::start().await;
        mount_login(&server, "csrf-abc").await;

        Mock::given(method("GET"))
            .and(path("/api/v1/database/"))
            .and(query_param("q", "(page:0,page_size:100)"))
            .and(header("authorization", "Bearer jwt-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 102,
                "result": database_page(1, 100),
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/v1/database/"))
            .and(query_param("q", "(page:1,page_size:100)"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 102,
                "result": [
                    {"id": 101, "database_name": "a_dev", "sqlalchemy_uri": "dummy://", "backend": "postgresql"},
                    {"id": 102, "database_name": "b_dev"},
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/v1/database/"))
            .and(query_param("q", "(page:2,page_size:100)"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": []})))
            .expect(0)
            .mount(&server)
            .await;

        let client = connect(&server).await?;
        let databases = client.get_databases().await?;

        assert_eq!(databases.len(), 102);
        assert_eq!(databases[100].database_name, "a_dev");
        assert_eq!(databases[100].sqlalchemy_uri, "dummy://");
        assert_eq!(databases[100].extra.get("backend"), Some(&json!("postgresql")));
        assert_eq!(databases[101].sqlalchemy_uri, "");
        Ok(())
    }

    #[tokio::test]
    async fn test_get_databases_stops_when_page_is_ignored() -> Result<()> {
        let server = MockServer::start().await;
        mount_login(&server, "csrf-abc").await;

        // Same full page whatever `q` says
        Mock::given(method("GET"))
            .and(path("/api/v1/database/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 100,
                "result": database_page(1, 100),
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = connect(&server).await?;
        assert_eq!(client.get_databases().await?.len(), 100);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_databases_empty() -> Result<()> {
        let server = MockServer::start().await;
        mount_login(&server, "csrf-abc").await;

        Mock::given(method("GET"))
            .and(path("/api/v1/database/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 0, "result": []})))
            .expect(1)
            .mount(&server)
            .await;

        let client = connect(&server).await?;
        assert!(client.get_databases().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_create_database_sends_csrf_and_payload() -> Result<()> {
        let server = MockServer::start().await;
        mount_login(&server, "csrf-abc").await;

        Mock::given(method("POST"))
            .and(path("/api/v1/database/"))
            .and(header("x-csrftoken", "csrf-abc"))
            .and(body_json(json!({
                "database_name": "my_project_dev",
                "sqlalchemy_uri": "dummy://",
                "external_url": "https://dbt.example.org/#!/overview",
                "is_managed_externally": true,
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 7,
                "result": {"database_name": "my_project_dev", "sqlalchemy_uri": "dummy://"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = connect(&server).await?;
        let created = client
            .create_database(NewDatabase {
                database_name: "my_project_dev".to_string(),
                sqlalchemy_uri: "dummy://".to_string(),
                external_url: Some("https://dbt.example.org/#!/overview".to_string()),
                is_managed_externally: true,
            })
            .await?;

        assert_eq!(created.id, 7);
        assert_eq!(created.database_name, "my_project_dev");
        Ok(())
    }

    #[tokio::test]
    async fn test_update_database() -> Result<()> {
        let server = MockServer::start().await;
        mount_login(&server, "").await;

        Mock::given(method("PUT"))
            .and(path("/api/v1/database/3"))
            .and(body_json(json!({"database_name": "my_project_dev"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 3,
                "result": {"database_name": "my_project_dev", "sqlalchemy_uri": "dummy://"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = connect(&server).await?;
        let updated = client
            .update_database(
                3,
                DatabaseUpdate {
                    database_name: "my_project_dev".to_string(),
                },
            )
            .await?;

        assert_eq!(updated.id, 3);
        assert_eq!(updated.sqlalchemy_uri, "dummy://");
        Ok(())
    }

    #[tokio::test]
    async fn test_api_error_is_reported() -> Result<()> {
        let server = MockServer::start().await;
        mount_login(&server, "csrf-abc").await;

        Mock::given(method("GET"))
            .and(path("/api/v1/database/"))
            .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
            .mount(&server)
            .await;

        let client = connect(&server).await?;
        let err = client.get_databases().await.unwrap_err();

        assert!(matches!(
            err,
            SupersyncError::Infrastructure(InfrastructureError::Api { status: 403, ref body }) if body == "Forbidden"
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_login() -> Result<()> {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/security/login"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid login"})))
            .mount(&server)
            .await;

        let auth = SupersetAuth::username_password("admin", Some("wrong".to_string()));
        let result = SupersetClient::connect(SupersetClientConfig::new(server.uri()), auth).await;

        assert!(matches!(result, Err(InfrastructureError::Auth(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_jwt_auth_skips_login() -> Result<()> {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/security/csrf_token/"))
            .and(header("authorization", "Bearer my-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "csrf-jwt"})))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/v1/database/"))
            .and(header("authorization", "Bearer my-token"))
            .and(header("x-csrftoken", "csrf-jwt"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": []})))
            .expect(1)
            .mount(&server)
            .await;

        let client =
            SupersetClient::connect(SupersetClientConfig::new(server.uri()), SupersetAuth::jwt("my-token"))
                .await?;
        assert!(client.get_databases().await?.is_empty());
        Ok(())
    }
}
