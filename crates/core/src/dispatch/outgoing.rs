//! Turn a caller payload into what actually goes on the wire

use etims_domain::constants::{BOOKKEEPING_KEYS, RECORD_ID_KEY};
use etims_domain::{EtimsError, HttpMethod, Payload, Result};
use serde_json::{Map, Value};

/// Wire-ready parts derived from a payload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outgoing {
    /// Record id moved out of a PATCH/PUT payload into the URL.
    pub record_id: Option<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

/// Split `payload` into query parameters or a JSON body for `method`.
///
/// GET payloads lose their bookkeeping keys and travel as query parameters;
/// they must be a single mapping. Other methods send the payload as JSON,
/// with PATCH/PUT first moving a top-level `id` into `record_id`.
///
/// # Errors
/// `EtimsError::Config` when a GET request carries a sequence payload.
pub fn prepare(method: HttpMethod, mut payload: Payload) -> Result<Outgoing> {
    if !method.has_body() {
        strip_bookkeeping(&mut payload);
        return match payload {
            Payload::Object(map) => Ok(Outgoing { query: query_pairs(&map), ..Outgoing::default() }),
            Payload::List(_) => Err(EtimsError::Config(
                "GET requests cannot carry a sequence payload; send sequences with POST".into(),
            )),
        };
    }

    let record_id = if method.addresses_record() { take_record_id(&mut payload) } else { None };

    Ok(Outgoing { record_id, query: Vec::new(), body: Some(payload.into_value()) })
}

/// Remove `document_name` and `company_name` from every mapping.
pub fn strip_bookkeeping(payload: &mut Payload) {
    let strip = |map: &mut Map<String, Value>| {
        for key in BOOKKEEPING_KEYS {
            map.remove(key);
        }
    };

    match payload {
        Payload::Object(map) => strip(map),
        Payload::List(entries) => entries.iter_mut().for_each(strip),
    }
}

/// Remove and return a usable top-level `id`. Sequences carry none.
pub fn take_record_id(payload: &mut Payload) -> Option<String> {
    let Payload::Object(map) = payload else {
        return None;
    };

    match map.remove(RECORD_ID_KEY)? {
        Value::String(id) if !id.trim().is_empty() => Some(id),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// `{url}/{id}/`, without doubling a trailing slash on `url`.
pub fn append_record_id(url: &str, record_id: &str) -> String {
    format!("{}/{}/", url.trim_end_matches('/'), urlencoding::encode(record_id))
}

/// Encode a mapping as query parameters. Nulls are skipped, sequences of
/// scalars repeat the key, nested structures are sent as JSON text.
pub fn query_pairs(map: &Map<String, Value>) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(map.len());

    for (key, value) in map {
        match value {
            Value::Null => {}
            Value::Array(items) if items.iter().all(is_scalar) => {
                pairs.extend(items.iter().filter_map(scalar_text).map(|v| (key.clone(), v)));
            }
            other => {
                let text = scalar_text(other).unwrap_or_else(|| other.to_string());
                pairs.push((key.clone(), text));
            }
        }
    }

    pairs
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
