//! HTTP session for the portal: connection ownership, login, token header.
//!
//! The session owns the `reqwest::Client` unless the caller supplied one.
//! `close` releases only a self-created client and may be called any number
//! of times. Every authenticated request carries the login token in the
//! `x-access-token` header; a 401 maps to [`Error::SessionExpired`] so the
//! orchestrator can drop its state and force a fresh login.

use reqwest::{Client as HttpClient, Method, StatusCode};
use serde_derive::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::endpoint::Endpoint;
use crate::config::RymProConfig;
use crate::error::{Error, Result};

const ACCESS_TOKEN_HEADER: &str = "x-access-token";

/// Error code the portal returns for invalid credentials.
const INVALID_CREDENTIALS_CODE: i64 = 5060;

#[derive(Deserialize, Debug)]
struct LoginResponse {
    token: Option<String>,
    code: Option<i64>,
    error: Option<String>,
}

pub struct HttpSession {
    client: Option<HttpClient>,
    created_client: bool,
    config: RymProConfig,
    access_token: Option<String>,
}

impl HttpSession {
    /// Session that builds and owns its own connection pool on first login.
    pub fn new(config: RymProConfig) -> Self {
        Self {
            client: None,
            created_client: false,
            config,
            access_token: None,
        }
    }

    /// Session over a caller-supplied client. `close` will not release it.
    pub fn with_client(config: RymProConfig, client: HttpClient) -> Self {
        Self {
            client: Some(client),
            created_client: false,
            config,
            access_token: None,
        }
    }

    pub fn has_token(&self) -> bool {
        self.access_token.is_some()
    }

    /// Forgets the token, forcing a login before the next request.
    pub fn clear_token(&mut self) {
        self.access_token = None;
    }

    /// Releases the connection pool if this session created it. Idempotent,
    /// and a no-op for caller-supplied clients.
    pub fn close(&mut self) {
        if self.created_client {
            self.client = None;
            self.created_client = false;
        }
        self.access_token = None;
    }

    /// Logs in with the configured credentials and stores the token.
    ///
    /// Error code 5060 means invalid credentials; any other non-success
    /// outcome (missing token, other error code, transport failure) is a
    /// connectivity error.
    pub async fn login(&mut self) -> Result<String> {
        if self.client.is_none() {
            self.created_client = true;
        }
        // Cheap handle clone; reqwest clients share their pool internally.
        let client = self.client.get_or_insert_with(HttpClient::new).clone();

        let url = Endpoint::Login.url(&self.config.url);
        let body = serde_json::json!({
            "email": self.config.username,
            "pw": self.config.password,
            "deviceId": self.config.device_id,
        });

        debug!(url = %url, "logging in");
        let response = client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(Error::cannot_connect)?;
        let payload: LoginResponse = response.json().await.map_err(Error::cannot_connect)?;

        match payload {
            LoginResponse {
                code: Some(INVALID_CREDENTIALS_CODE),
                error,
                ..
            } => Err(Error::Unauthorized(
                error.unwrap_or_else(|| "invalid credentials".to_string()),
            )),
            // The portal sends either no code or a zero code on success.
            LoginResponse {
                token: Some(token),
                code: None | Some(0),
                ..
            } => {
                self.access_token = Some(token.clone());
                Ok(token)
            }
            LoginResponse { code, error, .. } => Err(Error::CannotConnect(format!(
                "code: {:?}, error: {:?}",
                code, error
            ))),
        }
    }

    /// Authenticated GET returning the raw JSON payload.
    pub async fn get(&self, endpoint: &Endpoint<'_>) -> Result<Value> {
        self.request(Method::GET, endpoint, None).await
    }

    /// Authenticated PUT with a JSON body.
    pub async fn put(&self, endpoint: &Endpoint<'_>, body: &Value) -> Result<Value> {
        self.request(Method::PUT, endpoint, Some(body)).await
    }

    /// Authenticated DELETE with a JSON body.
    pub async fn delete(&self, endpoint: &Endpoint<'_>, body: &Value) -> Result<Value> {
        self.request(Method::DELETE, endpoint, Some(body)).await
    }

    async fn request(
        &self,
        method: Method,
        endpoint: &Endpoint<'_>,
        body: Option<&Value>,
    ) -> Result<Value> {
        let token = self.access_token.as_ref().ok_or(Error::NotLoggedIn)?;
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| Error::cannot_connect("session is closed"))?;

        let path = endpoint.path();
        let url = endpoint.url(&self.config.url);
        debug!(method = %method, url = %url, "sending request");

        let mut request = client.request(method, &url).header(ACCESS_TOKEN_HEADER, token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::request(&path, e))?;

        match response.status() {
            StatusCode::UNAUTHORIZED => Err(Error::SessionExpired),
            status if status.is_success() => response
                .json::<Value>()
                .await
                .map_err(|e| Error::request(&path, e)),
            status => Err(Error::request(&path, format!("status {}", status))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AlertType;

    fn test_config(url: String) -> RymProConfig {
        RymProConfig {
            url,
            username: "user@example.com".to_string(),
            password: "secret".to_string(),
            device_id: "test-device".to_string(),
        }
    }

    mod login {
        use super::*;

        #[tokio::test]
        async fn test_success_stores_token() {
            let mut server = mockito::Server::new_async().await;
            let mock = server
                .mock("POST", "/consumer/login")
                .match_body(mockito::Matcher::Json(serde_json::json!({
                    "email": "user@example.com",
                    "pw": "secret",
                    "deviceId": "test-device",
                })))
                .with_status(200)
                .with_body(r#"{"token": "tok-1"}"#)
                .create_async()
                .await;

            let mut session = HttpSession::new(test_config(server.url()));
            let token = session.login().await.unwrap();

            assert_eq!(token, "tok-1");
            assert!(session.has_token());
            mock.assert_async().await;
        }

        #[tokio::test]
        async fn test_success_with_zero_code() {
            let mut server = mockito::Server::new_async().await;
            let _mock = server
                .mock("POST", "/consumer/login")
                .with_status(200)
                .with_body(r#"{"token": "tok-1", "code": 0}"#)
                .create_async()
                .await;

            let mut session = HttpSession::new(test_config(server.url()));
            let token = session.login().await.unwrap();

            assert_eq!(token, "tok-1");
            assert!(session.has_token());
        }

        #[tokio::test]
        async fn test_invalid_credentials_code() {
            let mut server = mockito::Server::new_async().await;
            let _mock = server
                .mock("POST", "/consumer/login")
                .with_status(200)
                .with_body(r#"{"code": 5060, "error": "wrong email or password"}"#)
                .create_async()
                .await;

            let mut session = HttpSession::new(test_config(server.url()));
            let err = session.login().await.unwrap_err();

            assert!(matches!(err, Error::Unauthorized(_)));
            assert!(err.to_string().contains("wrong email or password"));
            assert!(!session.has_token());
        }

        #[tokio::test]
        async fn test_other_error_code_is_cannot_connect() {
            let mut server = mockito::Server::new_async().await;
            let _mock = server
                .mock("POST", "/consumer/login")
                .with_status(200)
                .with_body(r#"{"code": 5001, "error": "maintenance"}"#)
                .create_async()
                .await;

            let mut session = HttpSession::new(test_config(server.url()));
            let err = session.login().await.unwrap_err();

            assert!(matches!(err, Error::CannotConnect(_)));
            assert!(err.to_string().contains("5001"));
        }

        #[tokio::test]
        async fn test_missing_token_is_cannot_connect() {
            let mut server = mockito::Server::new_async().await;
            let _mock = server
                .mock("POST", "/consumer/login")
                .with_status(200)
                .with_body(r#"{}"#)
                .create_async()
                .await;

            let mut session = HttpSession::new(test_config(server.url()));
            let err = session.login().await.unwrap_err();

            assert!(matches!(err, Error::CannotConnect(_)));
        }

        #[tokio::test]
        async fn test_connection_error_is_cannot_connect() {
            let config = test_config("http://127.0.0.1:1".to_string());
            let mut session = HttpSession::new(config);
            let err = session.login().await.unwrap_err();

            assert!(matches!(err, Error::CannotConnect(_)));
        }
    }

    mod requests {
        use super::*;

        #[tokio::test]
        async fn test_get_without_login() {
            let session = HttpSession::new(test_config("http://localhost".to_string()));
            let err = session.get(&Endpoint::Profile).await.unwrap_err();
            assert!(matches!(err, Error::NotLoggedIn));
        }

        #[tokio::test]
        async fn test_get_sends_token_header() {
            let mut server = mockito::Server::new_async().await;
            let _login = server
                .mock("POST", "/consumer/login")
                .with_status(200)
                .with_body(r#"{"token": "tok-1"}"#)
                .create_async()
                .await;
            let profile = server
                .mock("GET", "/consumer/me")
                .match_header("x-access-token", "tok-1")
                .with_status(200)
                .with_body(r#"{"firstName": "Dana"}"#)
                .create_async()
                .await;

            let mut session = HttpSession::new(test_config(server.url()));
            session.login().await.unwrap();
            let value = session.get(&Endpoint::Profile).await.unwrap();

            assert_eq!(value["firstName"], "Dana");
            profile.assert_async().await;
        }

        #[tokio::test]
        async fn test_get_401_is_session_expired() {
            let mut server = mockito::Server::new_async().await;
            let _login = server
                .mock("POST", "/consumer/login")
                .with_status(200)
                .with_body(r#"{"token": "tok-1"}"#)
                .create_async()
                .await;
            let _expired = server
                .mock("GET", "/consumption/last-read")
                .with_status(401)
                .create_async()
                .await;

            let mut session = HttpSession::new(test_config(server.url()));
            session.login().await.unwrap();
            let err = session.get(&Endpoint::LastRead).await.unwrap_err();

            assert!(matches!(err, Error::SessionExpired));
        }

        #[tokio::test]
        async fn test_get_500_is_soft_request_error() {
            let mut server = mockito::Server::new_async().await;
            let _login = server
                .mock("POST", "/consumer/login")
                .with_status(200)
                .with_body(r#"{"token": "tok-1"}"#)
                .create_async()
                .await;
            let _broken = server
                .mock("GET", "/consumption/last-read")
                .with_status(500)
                .with_body("boom")
                .create_async()
                .await;

            let mut session = HttpSession::new(test_config(server.url()));
            session.login().await.unwrap();
            let err = session.get(&Endpoint::LastRead).await.unwrap_err();

            assert!(err.is_soft());
            assert!(err.to_string().contains("/consumption/last-read"));
        }

        #[tokio::test]
        async fn test_put_and_delete_send_body() {
            let mut server = mockito::Server::new_async().await;
            let _login = server
                .mock("POST", "/consumer/login")
                .with_status(200)
                .with_body(r#"{"token": "tok-1"}"#)
                .create_async()
                .await;
            let put = server
                .mock("PUT", "/consumer/alerts/settings/23")
                .match_header("x-access-token", "tok-1")
                .match_body(mockito::Matcher::Json(serde_json::json!([4])))
                .with_status(200)
                .with_body("{}")
                .create_async()
                .await;
            let delete = server
                .mock("DELETE", "/consumer/alerts/settings/23")
                .match_body(mockito::Matcher::Json(serde_json::json!([4])))
                .with_status(200)
                .with_body("{}")
                .create_async()
                .await;

            let mut session = HttpSession::new(test_config(server.url()));
            session.login().await.unwrap();

            let endpoint = Endpoint::AlertSettings {
                alert_type: AlertType::Leak,
            };
            let body = serde_json::json!([4]);
            session.put(&endpoint, &body).await.unwrap();
            session.delete(&endpoint, &body).await.unwrap();

            put.assert_async().await;
            delete.assert_async().await;
        }
    }

    mod close {
        use super::*;

        #[tokio::test]
        async fn test_close_is_idempotent() {
            let mut server = mockito::Server::new_async().await;
            let _login = server
                .mock("POST", "/consumer/login")
                .with_status(200)
                .with_body(r#"{"token": "tok-1"}"#)
                .create_async()
                .await;

            let mut session = HttpSession::new(test_config(server.url()));
            session.login().await.unwrap();

            session.close();
            assert!(!session.has_token());
            session.close();

            let err = session.get(&Endpoint::Profile).await.unwrap_err();
            assert!(matches!(err, Error::NotLoggedIn));
        }

        #[tokio::test]
        async fn test_close_keeps_caller_supplied_client() {
            let mut server = mockito::Server::new_async().await;
            let _login = server
                .mock("POST", "/consumer/login")
                .with_status(200)
                .with_body(r#"{"token": "tok-1"}"#)
                .expect(2)
                .create_async()
                .await;

            let mut session =
                HttpSession::with_client(test_config(server.url()), HttpClient::new());
            session.login().await.unwrap();
            session.close();

            // The client remains usable for a fresh login after close.
            session.login().await.unwrap();
            assert!(session.has_token());
        }
    }
}
