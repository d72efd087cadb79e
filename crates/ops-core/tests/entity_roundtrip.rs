//! Serde roundtrip and JsonSchema validation tests for wire types.

use std::collections::BTreeMap;

use ops_core::entities::*;
use ops_core::responses::*;
use schemars::schema_for;
use serde_json::json;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn sample_form() -> Form {
    Form {
        id: "form_1".into(),
        supplier_id: "sup_1".into(),
        form_key: "wholesale".into(),
        version: 3,
        schema: FormSchema {
            title: "Wholesale".into(),
            description: None,
            questions: vec![FormQuestion {
                id: "q1".into(),
                text: "Store name".into(),
                kind: "text".into(),
                options: None,
            }],
            contact_fields: Some(BTreeMap::from([(
                "phone".to_string(),
                ContactField {
                    required: false,
                    label: "Phone".into(),
                },
            )])),
            submission_title: Some("Send".into()),
            submission_description: None,
            completion_title: None,
            completion_description: None,
        },
        created_at: "2025-01-02T03:04:05Z".into(),
        updated_at: "2025-01-02T03:04:05Z".into(),
    }
}

fn sample_submission() -> Submission {
    Submission {
        id: "sub_1".into(),
        form_id: "form_1".into(),
        supplier_id: "sup_1".into(),
        answers: json!({"q1": "Corner Shop"}).as_object().cloned().unwrap(),
        contact: json!({"email": "owner@example.com"}).as_object().cloned().unwrap(),
        submitted_at: "2025-01-03T00:00:00Z".into(),
        request_ip: Some("203.0.113.9".into()),
        user_agent: None,
        referer: None,
        origin: Some("https://shop.example.com".into()),
        widget_version: Some("1.4.0".into()),
        created_at: "2025-01-03T00:00:00Z".into(),
        updated_at: "2025-01-03T00:00:00Z".into(),
    }
}

roundtrip_and_validate!(form_roundtrip, Form, sample_form());
roundtrip_and_validate!(submission_roundtrip, Submission, sample_submission());
roundtrip_and_validate!(
    user_profile_roundtrip,
    UserProfile,
    UserProfile {
        id: "user_01".into(),
        email: "ada@example.com".into(),
        email_verified: true,
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        profile_picture_url: "https://cdn.example.com/ada.png".into(),
    }
);
roundtrip_and_validate!(
    organizations_roundtrip,
    OrganizationsResponse,
    OrganizationsResponse {
        organizations: vec![Membership {
            id: "org_1".into(),
            kind: OrganizationKind::Supplier,
            display_name: "Acme Teas".into(),
            role: "owner".into(),
        }],
    }
);
roundtrip_and_validate!(
    submissions_page_roundtrip,
    SubmissionsPage,
    SubmissionsPage {
        submissions: vec![sample_submission()],
        total: 41,
        page: 2,
        per_page: 10,
    }
);

#[test]
fn token_schema_rejects_numeric_access_token() {
    let schema = serde_json::to_value(schema_for!(TokenResponse)).unwrap();
    let errors = validate_against_schema(&schema, &json!({"accessToken": 42}));
    assert!(!errors.is_empty());
}

#[test]
fn user_schema_requires_boolean_email_verified() {
    let schema = serde_json::to_value(schema_for!(UserProfile)).unwrap();
    let errors = validate_against_schema(
        &schema,
        &json!({
            "id": "u",
            "email": "e",
            "emailVerified": "yes",
            "firstName": "f",
            "lastName": "l",
            "profilePictureUrl": "p"
        }),
    );
    assert!(!errors.is_empty());
}
