//! Integration constants
//!
//! Wire-level names shared by the dispatcher, the payload rules and the
//! credentials layer.

/// Payload key naming the originating document. Used for error attribution.
pub const DOCUMENT_NAME_KEY: &str = "document_name";
/// Payload key naming the company whose credentials should be used.
pub const COMPANY_NAME_KEY: &str = "company_name";
/// Payload key naming the branch whose credentials should be used.
pub const BRANCH_ID_KEY: &str = "branch_id";
/// Payload key that PATCH/PUT requests move into the URL path.
pub const RECORD_ID_KEY: &str = "id";

/// Keys stripped from GET payloads before transmission.
pub const BOOKKEEPING_KEYS: [&str; 2] = [DOCUMENT_NAME_KEY, COMPANY_NAME_KEY];

/// Response field carrying the next-page cursor URL.
pub const NEXT_PAGE_KEY: &str = "next";

/// Branch identifier used when neither payload nor configuration names one.
pub const DEFAULT_BRANCH_ID: &str = "00";

/// Service name recorded in integration logs.
pub const SERVICE_NAME: &str = "Slade360";

/// Doctype used for error attribution when the caller names none.
pub const DEFAULT_DOCTYPE: &str = "Navari KRA eTims Settings";

/// Header carrying the workstation assigned to a branch.
pub const WORKSTATION_HEADER: &str = "X-Workstation";

/// Path appended to the auth server URL for the OAuth token exchange.
pub const TOKEN_ENDPOINT_PATH: &str = "/oauth2/token/";

pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("etims-dispatcher/", env!("CARGO_PKG_VERSION"));
