// ── Publish-readiness guard ──
//
// Advisory pre-submit checks for owner product edits. The backend is the
// authority and may reject for reasons not checked here; passing this guard
// only means the obvious gaps are filled.

use partshop_api::models::ProductInput;
use partshop_api::{Error, FieldErrors};

/// Part types (and category slugs) that count as wheels.
const WHEEL_KINDS: &[&str] = &["wheels", "wheel", "rims", "rim"];

/// Attributes a wheel listing must declare, with their labels.
const WHEEL_FIELDS: &[(&str, &str)] = &[
    ("wheelDiameter", "diameter"),
    ("wheelWidth", "width"),
    ("boltPattern", "bolt pattern"),
    ("wheelOffset", "offset"),
];

/// One missing or invalid field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishIssue {
    /// Backend field name.
    pub field: &'static str,
    pub message: String,
}

/// Whether `input` describes a wheel, by `partType` or by category slug.
pub fn is_wheel_part(input: &ProductInput, category_slug: Option<&str>) -> bool {
    let is_wheel = |s: &str| WHEEL_KINDS.iter().any(|k| s.trim().eq_ignore_ascii_case(k));
    input.attribute_str("partType").is_some_and(is_wheel) || category_slug.is_some_and(is_wheel)
}

/// Everything that keeps `input` from being published.
///
/// Drafts (inactive products) are never blocked.
pub fn publish_issues(input: &ProductInput, category_slug: Option<&str>) -> Vec<PublishIssue> {
    let mut issues = Vec::new();
    if !input.active {
        return issues;
    }

    if input
        .condition
        .as_deref()
        .is_none_or(|c| c.trim().is_empty())
    {
        issues.push(PublishIssue {
            field: "condition",
            message: "Active products must declare a condition".into(),
        });
    }

    if is_wheel_part(input, category_slug) {
        for &(field, label) in WHEEL_FIELDS {
            if !input.has_attribute(field) {
                issues.push(PublishIssue {
                    field,
                    message: format!("Wheels must declare a {label}"),
                });
            }
        }
    }

    issues
}

/// Run the guard, turning any issues into a 400-status validation error.
pub fn ensure_publishable(input: &ProductInput, category_slug: Option<&str>) -> Result<(), Error> {
    let issues = publish_issues(input, category_slug);
    if issues.is_empty() {
        return Ok(());
    }
    let field_errors: FieldErrors = issues
        .into_iter()
        .map(|i| (i.field.to_owned(), i.message))
        .collect();
    Err(Error::Validation {
        message: "Product is not ready to publish".into(),
        field_errors,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn active_wheel() -> ProductInput {
        let mut input = ProductInput {
            sku: "WHL-1".into(),
            name: "Alloy".into(),
            active: true,
            condition: Some("USED".into()),
            ..ProductInput::default()
        };
        input.attributes.insert("partType".into(), json!("Wheels"));
        input
    }

    #[test]
    fn drafts_are_never_blocked() {
        let input = ProductInput::default();
        assert!(publish_issues(&input, Some("wheels")).is_empty());
    }

    #[test]
    fn active_product_needs_condition() {
        let input = ProductInput {
            active: true,
            condition: Some("  ".into()),
            ..ProductInput::default()
        };
        let issues = publish_issues(&input, None);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "condition");
    }

    #[test]
    fn wheel_needs_all_fitment_fields() {
        let mut input = active_wheel();
        input.attributes.insert("wheelDiameter".into(), json!(18));
        input.attributes.insert("boltPattern".into(), json!("5x112"));

        let fields: Vec<_> = publish_issues(&input, None)
            .into_iter()
            .map(|i| i.field)
            .collect();
        assert_eq!(fields, vec!["wheelWidth", "wheelOffset"]);
    }

    #[test]
    fn wheel_detected_by_category_slug() {
        let mut input = active_wheel();
        input.attributes.remove("partType");
        assert!(!is_wheel_part(&input, Some("brakes")));
        assert!(is_wheel_part(&input, Some("rims")));
        assert_eq!(publish_issues(&input, Some("rims")).len(), 4);
    }

    #[test]
    fn complete_wheel_passes() {
        let mut input = active_wheel();
        for (field, value) in [
            ("wheelDiameter", json!(18)),
            ("wheelWidth", json!("8.5")),
            ("boltPattern", json!("5x112")),
            ("wheelOffset", json!(0)),
        ] {
            input.attributes.insert(field.into(), value);
        }
        assert!(ensure_publishable(&input, None).is_ok());
    }

    #[test]
    fn guard_error_is_status_400_with_fields() {
        let input = ProductInput {
            active: true,
            ..ProductInput::default()
        };
        let err = ensure_publishable(&input, None).unwrap_err();
        assert_eq!(err.status(), 400);
        assert!(err.field_errors().unwrap().contains_key("condition"));
    }
}
