use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChoiceError {
    #[error("expected choice to be a string or object, got {found}")]
    InvalidChoice { found: &'static str },

    #[error("choice object needs a `name` or a `value`")]
    MissingName,

    #[error("expected index to be a number or string, got {found}")]
    InvalidIndex { found: &'static str },

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("interactive session failed: {0}")]
    Session(String),
}

pub type Result<T> = std::result::Result<T, ChoiceError>;

// Name of a JSON value's kind, used in error messages.
pub(crate) fn kind_of(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_of_names_every_json_shape() {
        assert_eq!(kind_of(&json!(null)), "null");
        assert_eq!(kind_of(&json!(true)), "boolean");
        assert_eq!(kind_of(&json!(3)), "number");
        assert_eq!(kind_of(&json!("x")), "string");
        assert_eq!(kind_of(&json!([1])), "array");
        assert_eq!(kind_of(&json!({"a": 1})), "object");
    }

    #[test]
    fn invalid_choice_message_mentions_found_kind() {
        let err = ChoiceError::InvalidChoice { found: "number" };
        assert_eq!(
            err.to_string(),
            "expected choice to be a string or object, got number"
        );
    }
}
