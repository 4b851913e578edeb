use serde_json::Value;

use parley_types::error::ChatValidationError;

/// Name of the payload field carrying the user's text.
pub const MESSAGE_FIELD: &str = "message";

/// Extract the chat message from a parsed request body.
///
/// `None` means the body was absent or not a JSON object. Missing, `null` and
/// empty-string messages are all "required"; any other non-string value is
/// "must be a string". This is stricter than a plain falsy check: `false` and
/// `0` are reported as non-strings rather than as missing. Whitespace-only
/// text is accepted as-is.
pub fn validate_message(payload: Option<&Value>) -> Result<&str, ChatValidationError> {
    let field = payload
        .and_then(Value::as_object)
        .and_then(|body| body.get(MESSAGE_FIELD));

    match field {
        None | Some(Value::Null) => Err(ChatValidationError::MissingMessage),
        Some(Value::String(text)) if text.is_empty() => Err(ChatValidationError::MissingMessage),
        Some(Value::String(text)) => Ok(text),
        Some(_) => Err(ChatValidationError::NotAString),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_message() {
        let body = json!({ "message": "hello" });
        assert_eq!(validate_message(Some(&body)), Ok("hello"));
    }

    #[test]
    fn test_missing_forms_are_required() {
        for body in [json!({}), json!({ "message": null }), json!({ "message": "" })] {
            assert_eq!(
                validate_message(Some(&body)),
                Err(ChatValidationError::MissingMessage),
                "body: {body}"
            );
        }
        assert_eq!(validate_message(None), Err(ChatValidationError::MissingMessage));
    }

    #[test]
    fn test_non_object_body_is_required() {
        let body = json!(["message", "hello"]);
        assert_eq!(
            validate_message(Some(&body)),
            Err(ChatValidationError::MissingMessage)
        );
    }

    #[test]
    fn test_non_string_values() {
        for body in [
            json!({ "message": 42 }),
            json!({ "message": 0 }),
            json!({ "message": false }),
            json!({ "message": ["hi"] }),
            json!({ "message": { "text": "hi" } }),
        ] {
            assert_eq!(
                validate_message(Some(&body)),
                Err(ChatValidationError::NotAString),
                "body: {body}"
            );
        }
    }

    #[test]
    fn test_whitespace_is_accepted() {
        let body = json!({ "message": "   " });
        assert_eq!(validate_message(Some(&body)), Ok("   "));
    }

    #[test]
    fn test_extra_fields_ignored() {
        let body = json!({ "message": "hi", "lang": "fr" });
        assert_eq!(validate_message(Some(&body)), Ok("hi"));
    }
}
