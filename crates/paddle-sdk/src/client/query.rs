//! Query string flattening for list operations.
//!
//! Paddle expects list filters as flat `key=value` pairs where multi-valued
//! filters are comma-joined (`status=active,paused`). Parameter structs derive
//! `Serialize` and are flattened here, so unset `Option` fields simply drop out.

use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

/// Render a single query value as Paddle expects it.
///
/// Booleans become `true`/`false`, numbers use their decimal form and arrays
/// are comma-joined. Nested objects are not valid query values.
///
/// # Examples
///
/// ```rust
/// use paddle_sdk::client::stringify_query;
/// use serde_json::json;
///
/// assert_eq!(stringify_query(&json!("test")).unwrap(), "test");
/// assert_eq!(stringify_query(&json!(123)).unwrap(), "123");
/// assert_eq!(stringify_query(&json!(["draft", "active"])).unwrap(), "draft,active");
/// ```
pub fn stringify_query(value: &Value) -> Result<String, ApiError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Bool(b) => Ok(if *b { "true" } else { "false" }.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Array(items) => {
            let parts = items
                .iter()
                .map(stringify_query)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(parts.join(","))
        }
        Value::Null => Ok(String::new()),
        Value::Object(_) => Err(ApiError::InvalidRequest {
            message: "Nested objects cannot be used as query values".to_string(),
        }),
    }
}

/// Flatten a parameter struct into query pairs.
///
/// `None` fields are skipped. Pairs are ordered by key.
///
/// # Errors
///
/// Returns `ApiError::InvalidRequest` if the parameters do not serialize to a
/// flat JSON object.
pub fn prepare_query<P: Serialize>(params: &P) -> Result<Vec<(String, String)>, ApiError> {
    let value = serde_json::to_value(params)?;

    let map = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Object(map) => map,
        other => {
            return Err(ApiError::InvalidRequest {
                message: format!("Query parameters must be an object, got: {}", other),
            })
        }
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        if value.is_null() {
            continue;
        }
        pairs.push((key, stringify_query(&value)?));
    }

    Ok(pairs)
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
