use serde_json::Value;

use super::ValidationIssue;

/// Rejects whitespace-only strings anywhere in a field bag.
///
/// Walks the top-level object and one level of nested objects (embedded
/// addresses and the like); arrays are left alone. A field offends when its
/// value is non-empty before trimming and empty after, so a genuinely empty
/// string passes here and is left to schema-level required checks. All
/// offenders are reported in one message, comma-joined.
pub fn check_blank_fields(bag: &Value) -> Result<(), ValidationIssue> {
    let mut offenders: Vec<String> = Vec::new();

    if let Value::Object(fields) = bag {
        for (name, value) in fields {
            match value {
                Value::String(s) => {
                    if is_blank(s) {
                        offenders.push(name.clone());
                    }
                }
                Value::Object(nested) => {
                    for (nested_name, nested_value) in nested {
                        if let Value::String(s) = nested_value {
                            if is_blank(s) {
                                offenders.push(nested_name.clone());
                            }
                        }
                    }
                }
                _ => {}
            }
        }
    }

    if offenders.is_empty() {
        Ok(())
    } else {
        Err(ValidationIssue::new(format!(
            "{} cannot be blank or whitespace only",
            offenders.join(", ")
        )))
    }
}

fn is_blank(s: &str) -> bool {
    !s.is_empty() && s.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn whitespace_only_top_level_field_is_named() {
        let bag = json!({"desc": "   ", "email": "a@b.com"});
        let err = check_blank_fields(&bag).unwrap_err();
        assert!(err.message().contains("desc"));
        assert!(!err.message().contains("email"));
    }

    #[test]
    fn nested_object_fields_are_reported_alongside_top_level() {
        let bag = json!({
            "name": "\t",
            "address": {"street1": "   ", "city": "Austin"}
        });
        let err = check_blank_fields(&bag).unwrap_err();
        assert!(err.message().contains("name"));
        assert!(err.message().contains("street1"));
        assert!(!err.message().contains("city"));
        // Offenders arrive comma-joined in one message
        assert!(err.message().contains(", "));
    }

    #[test]
    fn empty_string_is_not_blank() {
        let bag = json!({"desc": ""});
        assert!(check_blank_fields(&bag).is_ok());
    }

    #[test]
    fn arrays_are_not_walked() {
        let bag = json!({"tags": ["   ", "ok"]});
        assert!(check_blank_fields(&bag).is_ok());
    }

    #[test]
    fn clean_bag_passes() {
        let bag = json!({
            "name": "HQ",
            "address": {"street1": "501 Congress Ave", "city": "Austin"},
            "count": 3,
            "active": true
        });
        assert!(check_blank_fields(&bag).is_ok());
    }
}
