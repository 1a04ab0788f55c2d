//! Conversions from external infrastructure errors into domain errors.

use etims_domain::EtimsError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub EtimsError);

impl From<InfraError> for EtimsError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<EtimsError> for InfraError {
    fn from(value: EtimsError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoEtimsError {
    fn into_etims(self) -> EtimsError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → EtimsError */
/* -------------------------------------------------------------------------- */

impl IntoEtimsError for HttpError {
    fn into_etims(self) -> EtimsError {
        if self.is_timeout() {
            return EtimsError::Network(format!("HTTP request timed out: {self}"));
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return EtimsError::Network(format!("HTTP connection failure: {self}"));
        }

        if self.is_builder() {
            return EtimsError::Config(format!("Invalid HTTP request: {self}"));
        }

        if self.is_decode() {
            return EtimsError::MalformedResponse(self.to_string());
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => EtimsError::Auth(message),
                404 => EtimsError::NotFound(message),
                400..=499 => EtimsError::InvalidInput(message),
                _ => EtimsError::Network(message),
            };
        }

        EtimsError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_etims())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → EtimsError */
/* -------------------------------------------------------------------------- */

impl IntoEtimsError for serde_json::Error {
    fn into_etims(self) -> EtimsError {
        EtimsError::MalformedResponse(format!("invalid JSON body: {self}"))
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(value.into_etims())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
