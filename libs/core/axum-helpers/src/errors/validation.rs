//! Translation of `validator` failures into client-facing field errors.

use convert_case::{Case, Casing};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;
use validator::{ValidationError, ValidationErrors};

/// One offending field in a `VALIDATION_ERROR` response.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FieldError {
    /// Field name as the client sent it (camelCase)
    pub field: String,
    /// Failed rule: `required`, `min`, `max`, `len`, `email`, `url`, ...
    pub tag: String,
    /// The rejected value, when the validator reported it
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub value: Option<Value>,
    /// Rule parameter, e.g. the bound for `min`/`max`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    pub message: String,
}

/// Builds one [`FieldError`] per field (first failure only), sorted by field name.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            errs.first()
                .map(|err| to_field_error(&field.as_ref().to_case(Case::Camel), err))
        })
        .collect();

    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}

fn to_field_error(field: &str, err: &ValidationError) -> FieldError {
    let (tag, bound) = translate(err);
    let bound_text = bound.as_deref().unwrap_or("");
    let message = match tag.as_str() {
        "required" => "This field is required.".to_string(),
        "email" => "Invalid email format.".to_string(),
        "min" => format!("Value must be at least {bound_text}."),
        "max" => format!("Value must not exceed {bound_text}."),
        "len" => format!("Length must be exactly {bound_text}."),
        _ => format!("Invalid value for field {field}."),
    };

    FieldError {
        field: field.to_string(),
        tag,
        value: param(err, "value").cloned(),
        param: bound,
        message,
    }
}

/// Maps validator's `length`/`range` codes onto the bound that actually failed.
fn translate(err: &ValidationError) -> (String, Option<String>) {
    let code = err.code.as_ref();
    if code != "length" && code != "range" {
        return (code.to_string(), param(err, "param").map(render));
    }

    if let Some(equal) = param(err, "equal") {
        return ("len".to_string(), Some(render(equal)));
    }

    let min = param(err, "min");
    let max = param(err, "max");
    let actual = param(err, "value").and_then(measure);
    let below_min = match (min.and_then(Value::as_f64), actual) {
        (Some(min), Some(actual)) => actual < min,
        _ => max.is_none(),
    };

    match (below_min, min, max) {
        (true, Some(min), _) => ("min".to_string(), Some(render(min))),
        (_, _, Some(max)) => ("max".to_string(), Some(render(max))),
        (_, Some(min), None) => ("min".to_string(), Some(render(min))),
        _ => (code.to_string(), None),
    }
}

fn param<'a>(err: &'a ValidationError, key: &str) -> Option<&'a Value> {
    err.params.get(key).filter(|v| !v.is_null())
}

fn measure(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => Some(s.chars().count() as f64),
        Value::Array(items) => Some(items.len() as f64),
        Value::Object(map) => Some(map.len() as f64),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(required, length(min = 3, max = 5))]
        name: Option<String>,
        #[validate(length(max = 4))]
        short_description: String,
        #[validate(range(min = 0))]
        stock_quantity: i32,
        #[validate(length(equal = 2))]
        code: String,
        #[validate(email)]
        contact: String,
    }

    fn valid() -> Sample {
        Sample {
            name: Some("abcd".into()),
            short_description: "ok".into(),
            stock_quantity: 1,
            code: "AB".into(),
            contact: "a@example.com".into(),
        }
    }

    fn errors_for(sample: Sample) -> Vec<FieldError> {
        field_errors(&sample.validate().unwrap_err())
    }

    #[test]
    fn test_missing_required_field() {
        let fields = errors_for(Sample { name: None, ..valid() });
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field, "name");
        assert_eq!(fields[0].tag, "required");
        assert_eq!(fields[0].message, "This field is required.");
        assert!(fields[0].value.is_none());
    }

    #[test]
    fn test_length_below_min_reports_min() {
        let fields = errors_for(Sample { name: Some("ab".into()), ..valid() });
        assert_eq!(fields[0].tag, "min");
        assert_eq!(fields[0].param.as_deref(), Some("3"));
        assert_eq!(fields[0].message, "Value must be at least 3.");
        assert_eq!(fields[0].value, Some(Value::String("ab".into())));
    }

    #[test]
    fn test_length_above_max_reports_max() {
        let fields = errors_for(Sample { name: Some("abcdef".into()), ..valid() });
        assert_eq!(fields[0].tag, "max");
        assert_eq!(fields[0].message, "Value must not exceed 5.");
    }

    #[test]
    fn test_strings_are_measured_in_chars() {
        assert_eq!(measure(&Value::String("ééé".into())), Some(3.0));
        assert_eq!(measure(&serde_json::json!([1, 2])), Some(2.0));
        assert_eq!(measure(&serde_json::json!(-1.5)), Some(-1.5));
        assert_eq!(measure(&Value::Null), None);
    }

    #[test]
    fn test_range_and_equal_and_email() {
        let fields = errors_for(Sample {
            stock_quantity: -1,
            code: "ABC".into(),
            contact: "not-an-email".into(),
            ..valid()
        });
        let by_field = |name: &str| fields.iter().find(|f| f.field == name).unwrap();

        assert_eq!(by_field("stockQuantity").tag, "min");
        assert_eq!(by_field("code").tag, "len");
        assert_eq!(by_field("code").message, "Length must be exactly 2.");
        assert_eq!(by_field("contact").message, "Invalid email format.");
    }

    #[test]
    fn test_fields_are_sorted_and_camel_cased() {
        let fields = errors_for(Sample {
            name: None,
            short_description: "too long".into(),
            code: "X".into(),
            ..valid()
        });
        let names: Vec<&str> = fields.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(names, vec!["code", "name", "shortDescription"]);
    }

    #[test]
    fn test_unknown_tag_uses_generic_message() {
        let mut err = ValidationError::new("oneof")
            .with_message("Value must be one of: active, inactive.".into());
        err.add_param("param".into(), &"active inactive");

        let field = to_field_error("status", &err);
        assert_eq!(field.tag, "oneof");
        assert_eq!(field.param.as_deref(), Some("active inactive"));
        assert_eq!(field.message, "Invalid value for field status.");
    }

    #[test]
    fn test_multi_word_fields_are_camel_cased() {
        let mut errors = ValidationErrors::new();
        errors.add("product_id", ValidationError::new("required"));
        errors.add("is_primary", ValidationError::new("required"));

        let names: Vec<String> = field_errors(&errors).into_iter().map(|f| f.field).collect();
        assert_eq!(names, vec!["isPrimary", "productId"]);
    }

    #[test]
    fn test_value_is_reported_alongside_bound() {
        let fields = errors_for(Sample { name: Some("abcdefg".into()), ..valid() });
        assert_eq!(fields[0].param.as_deref(), Some("5"));
        assert_eq!(fields[0].value, Some(Value::String("abcdefg".into())));
    }
}
