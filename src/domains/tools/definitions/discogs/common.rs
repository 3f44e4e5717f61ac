//! Common utilities shared across Discogs tools.
//!
//! Every tool answers with a JSON record: the pretty-printed text goes into
//! the content block and the same value into `structured_content`.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content, JsonObject},
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::warn;

use crate::domains::catalog::{CatalogError, CatalogResult, ErrorRecord};

/// Turn the outcome of a catalog operation into a tool result.
pub fn outcome_result<T: Serialize>(outcome: CatalogResult<T>) -> CallToolResult {
    match outcome {
        Ok(record) => record_result(&record),
        Err(err) => error_record_result(&err),
    }
}

/// Create a success result from a record.
pub fn record_result<T: Serialize>(record: &T) -> CallToolResult {
    match serde_json::to_value(record) {
        Ok(value) => json_result(value, false),
        Err(e) => {
            warn!("Failed to serialize tool result: {}", e);
            let record = ErrorRecord::new(format!("Failed to serialize result: {}", e));
            json_result(error_record_value(&record), true)
        }
    }
}

/// Create an error result carrying an [`ErrorRecord`].
pub fn error_record_result(err: &CatalogError) -> CallToolResult {
    json_result(error_record_value(&err.to_record()), true)
}

fn error_record_value(record: &ErrorRecord) -> Value {
    serde_json::json!({ "error": record.error })
}

fn json_result(value: Value, is_error: bool) -> CallToolResult {
    let text = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
    CallToolResult {
        content: vec![Content::text(text)],
        structured_content: Some(value),
        is_error: Some(is_error),
        meta: None,
    }
}

/// Decode tool arguments into a params struct.
pub fn parse_params<T: DeserializeOwned>(args: JsonObject) -> Result<T, McpError> {
    serde_json::from_value(Value::Object(args))
        .map_err(|e| McpError::invalid_params(e.to_string(), None))
}

/// Render a tool result as the JSON-RPC `tools/call` result body.
#[cfg(feature = "http")]
pub fn http_response(result: CallToolResult) -> Value {
    let mut response = serde_json::json!({
        "content": result.content,
        "isError": result.is_error.unwrap_or(false)
    });

    if let (Some(structured), Some(object)) =
        (result.structured_content, response.as_object_mut())
    {
        object.insert("structuredContent".to_string(), structured);
    }

    response
}
