use serde_json::Value;

/// `{ success: false, message, code }` as rendered outside production
pub fn assert_error_envelope(response: &Value, expected_code: &str) {
    assert_eq!(response.get("success").and_then(Value::as_bool), Some(false));
    assert!(
        response.get("message").and_then(Value::as_str).is_some(),
        "Missing error message"
    );
    assert_eq!(
        response.get("code").and_then(Value::as_str),
        Some(expected_code),
        "Error code mismatch"
    );
}

/// Production envelope: nothing but the generic message
pub fn assert_redacted_envelope(response: &Value) {
    assert_eq!(
        response,
        &serde_json::json!({ "success": false, "message": "Internal Server Error" })
    );
}

pub fn assert_success_envelope(response: &Value) -> &Value {
    assert_eq!(response.get("success").and_then(Value::as_bool), Some(true));
    response.get("data").expect("Missing data field")
}

pub fn assert_activity_shape(activity: &Value) {
    assert!(activity.get("id").and_then(Value::as_str).is_some());
    assert!(activity.get("type").and_then(Value::as_str).is_some());
    assert!(activity.get("description").and_then(Value::as_str).is_some());
    assert!(activity.get("createdAt").and_then(Value::as_str).is_some());
    assert_eq!(activity.get("user").and_then(Value::as_str), Some("Admin"));
}
