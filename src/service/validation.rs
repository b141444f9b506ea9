//! Path and body validation in strict priority order.
//!
//! Bodies are draft-parsed into an untyped JSON map first, then checked
//! field by field, so the ordering contract is ours and never the
//! decoder's: missing, then type (title before completed), then blank,
//! then length. The first failure is the only one reported. Uniqueness is
//! store-side and checked last.

use crate::error::ValidationError;
use serde_json::{Map, Value};

pub const MAX_TITLE_CHARS: usize = 500;

/// Draft accepted by the create operation. The title is already trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTodo {
    pub title: String,
}

/// Draft accepted by full update. `completed` carries the PUT default:
/// omitting it resets the flag to false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutTodo {
    pub title: String,
    pub completed: bool,
}

/// Draft accepted by partial update; at least one field is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchTodo {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

/// Parse an `{id}` path segment as a positive integer.
///
/// `str::parse::<i64>` already rejects empty input, embedded decimal
/// points, stray characters and anything outside the i64 range, all of
/// which collapse into the same error. Leading zeros parse as their
/// numeric value.
pub fn parse_path_id(raw: &str) -> Result<i64, ValidationError> {
    let id: i64 = raw.parse().map_err(|_| ValidationError::InvalidPathId)?;
    if id <= 0 {
        return Err(ValidationError::InvalidPathId);
    }
    Ok(id)
}

/// Decode a raw request body into a JSON object. An empty or unparseable
/// body is malformed; any other JSON document is the wrong shape. Both
/// outcomes precede every field-level check.
pub fn parse_object(body: &[u8]) -> Result<Map<String, Value>, ValidationError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|_| ValidationError::MalformedBody)?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ValidationError::BodyNotObject),
    }
}

/// Create body: `title` required; `completed` is recognized and
/// type-checked when present, but its value is discarded because a new
/// todo always starts incomplete. Unknown fields are ignored.
pub fn validate_create(map: &Map<String, Value>) -> Result<CreateTodo, ValidationError> {
    let title_raw = require_field(map, "title")?;
    let title = as_str(title_raw, "title")?;
    check_completed_type(map)?;
    let title = normalize_title(title)?;
    Ok(CreateTodo { title })
}

/// Full-update body: `title` required, `completed` optional with a false
/// default. An explicit `null` for `completed` is a type error, not an
/// omission.
pub fn validate_put(map: &Map<String, Value>) -> Result<PutTodo, ValidationError> {
    let title_raw = require_field(map, "title")?;
    let title = as_str(title_raw, "title")?;
    let completed = match map.get("completed") {
        None => false,
        Some(v) => as_bool(v, "completed")?,
    };
    let title = normalize_title(title)?;
    Ok(PutTodo { title, completed })
}

/// Partial-update body: explicit `null` counts as not provided, and at
/// least one recognized field must remain. A present-but-wrong-typed
/// field counts as provided and reports its type error.
pub fn validate_patch(map: &Map<String, Value>) -> Result<PatchTodo, ValidationError> {
    let title_raw = map.get("title").filter(|v| !v.is_null());
    let completed_raw = map.get("completed").filter(|v| !v.is_null());
    if title_raw.is_none() && completed_raw.is_none() {
        return Err(ValidationError::NoFieldsProvided);
    }
    let title = match title_raw {
        None => None,
        Some(v) => Some(as_str(v, "title")?),
    };
    let completed = match completed_raw {
        None => None,
        Some(v) => Some(as_bool(v, "completed")?),
    };
    let title = match title {
        None => None,
        Some(s) => Some(normalize_title(s)?),
    };
    Ok(PatchTodo { title, completed })
}

fn require_field<'a>(
    map: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a Value, ValidationError> {
    match map.get(field) {
        None | Some(Value::Null) => Err(ValidationError::MissingField(field)),
        Some(v) => Ok(v),
    }
}

fn as_str<'a>(v: &'a Value, field: &'static str) -> Result<&'a str, ValidationError> {
    v.as_str().ok_or(ValidationError::TypeMismatch {
        field,
        expected: "string",
    })
}

fn as_bool(v: &Value, field: &'static str) -> Result<bool, ValidationError> {
    v.as_bool().ok_or(ValidationError::TypeMismatch {
        field,
        expected: "boolean",
    })
}

fn check_completed_type(map: &Map<String, Value>) -> Result<(), ValidationError> {
    match map.get("completed") {
        None | Some(Value::Null) => Ok(()),
        Some(v) => as_bool(v, "completed").map(|_| ()),
    }
}

/// Trim surrounding whitespace, then reject blank before over-long input.
/// Length is counted in characters so multibyte titles are not penalized.
fn normalize_title(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::BlankTitle);
    }
    if trimmed.chars().count() > MAX_TITLE_CHARS {
        return Err(ValidationError::TitleTooLong);
    }
    Ok(trimmed.to_string())
}
