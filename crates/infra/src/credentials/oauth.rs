//! OAuth password-grant token issuer

use async_trait::async_trait;
use etims_core::TokenIssuer;
use etims_domain::constants::TOKEN_ENDPOINT_PATH;
use etims_domain::{CredentialRecord, EtimsError, HttpMethod, Result, TokenGrant};
use tracing::{debug, instrument, warn};

use crate::http::{read_body, HttpClient};

/// Exchanges a record's username and password for a new access token at
/// `{auth_server_url}/oauth2/token/`.
#[derive(Debug, Clone)]
pub struct OAuthTokenIssuer {
    http: HttpClient,
}

impl OAuthTokenIssuer {
    /// Issuer sending token requests through `http`.
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    fn token_url(auth_server_url: &str) -> String {
        format!("{}{}", auth_server_url.trim_end_matches('/'), TOKEN_ENDPOINT_PATH)
    }
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| EtimsError::Config(format!("Missing {name} for token refresh")))
}

#[async_trait]
impl TokenIssuer for OAuthTokenIssuer {
    #[instrument(skip(self, record), fields(company = %record.company, branch_id = %record.branch_id))]
    async fn issue(&self, record: &CredentialRecord) -> Result<TokenGrant> {
        let auth_server_url = required(&record.auth_server_url, "auth server URL")?;
        let form = [
            ("username", required(&record.username, "username")?),
            ("password", required(&record.password, "password")?),
            ("grant_type", "password"),
            ("client_id", required(&record.client_id, "client id")?),
            ("client_secret", required(&record.client_secret, "client secret")?),
        ];

        let url = Self::token_url(auth_server_url);
        debug!(%url, "requesting access token");

        let response = self.http.send(self.http.request(HttpMethod::Post, &url).form(&form)).await?;
        let raw = read_body(response).await?;

        if !raw.is_success() {
            let detail = raw.parse_lossy().error_detail();
            warn!(status = raw.status, %detail, "token request rejected");
            return Err(EtimsError::Auth(format!(
                "Token request failed with HTTP {}: {detail}",
                raw.status
            )));
        }

        serde_json::from_slice::<TokenGrant>(&raw.bytes)
            .map_err(|err| EtimsError::Auth(format!("Invalid token response: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn refreshable(auth_server_url: &str) -> CredentialRecord {
        let mut record = CredentialRecord::new("Acme", "00", "https://etims.example");
        record.auth_server_url = Some(auth_server_url.to_string());
        record.client_id = Some("client".into());
        record.client_secret = Some("secret".into());
        record.username = Some("user".into());
        record.password = Some("pass".into());
        record
    }

    #[tokio::test]
    async fn posts_password_grant_form() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth2/token/"))
            .and(body_string_contains("grant_type=password"))
            .and(body_string_contains("username=user"))
            .and(body_string_contains("client_id=client"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "fresh",
                "refresh_token": "r1",
                "expires_in": 3600,
                "token_type": "Bearer",
                "scope": "read write"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let issuer = OAuthTokenIssuer::new(HttpClient::new().unwrap());
        let grant = issuer.issue(&refreshable(&format!("{}/", server.uri()))).await.unwrap();

        assert_eq!(grant.access_token, "fresh");
        assert_eq!(grant.expires_in, 3600);
    }

    #[tokio::test]
    async fn rejected_grant_is_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth2/token/"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"error": "invalid_grant"})),
            )
            .mount(&server)
            .await;

        let issuer = OAuthTokenIssuer::new(HttpClient::new().unwrap());
        let err = issuer.issue(&refreshable(&server.uri())).await.unwrap_err();

        assert!(matches!(err, EtimsError::Auth(msg) if msg.contains("invalid_grant")));
    }

    #[tokio::test]
    async fn missing_secret_is_config_error() {
        let mut record = refreshable("https://auth.example");
        record.client_secret = None;

        let issuer = OAuthTokenIssuer::new(HttpClient::new().unwrap());
        let err = issuer.issue(&record).await.unwrap_err();

        assert!(matches!(err, EtimsError::Config(msg) if msg.contains("client secret")));
    }
}
