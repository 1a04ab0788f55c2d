use etims_domain::constants::NEXT_PAGE_KEY;
use etims_domain::ResponseBody;
use serde_json::Value;

/// Cursor URL for the following page, if the response names one.
///
/// Only a JSON mapping whose `next` field is a non-blank string continues
/// pagination. Bare sequences, non-JSON bodies, and falsy or non-string
/// `next` values all end it.
pub fn next_page_url(body: &ResponseBody) -> Option<String> {
    match body.as_json()? {
        Value::Object(map) => match map.get(NEXT_PAGE_KEY)? {
            Value::String(url) if !url.trim().is_empty() => Some(url.trim().to_string()),
            _ => None,
        },
        _ => None,
    }
}
