use super::*;

#[test]
fn validate_credentials_trims_email_only() {
    assert_eq!(
        validate_credentials("  admin@example.com ", " secret "),
        Ok(("admin@example.com".to_owned(), " secret ".to_owned()))
    );
}

#[test]
fn validate_credentials_requires_both_fields() {
    assert_eq!(validate_credentials("   ", "pw"), Err("Enter both email and password."));
    assert_eq!(validate_credentials("a@b.com", ""), Err("Enter both email and password."));
}
