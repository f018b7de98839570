use domain::credential::validate_api_key;
use domain::session::Session;

#[test]
fn rejected_key_leaves_session_without_credential() {
    let mut session = Session::new();

    let attempt = "bad-key";
    if validate_api_key(attempt).is_ok() {
        session.set_api_key(attempt.to_string());
    }
    assert!(session.needs_credential());
    assert_eq!(session.api_key(), None);
}

#[test]
fn second_valid_submission_is_stored_verbatim() {
    let mut session = Session::new();

    for attempt in ["bad-key", "AIzaXXXXXXXX"] {
        if validate_api_key(attempt).is_ok() {
            session.set_api_key(attempt.to_string());
        }
    }
    assert!(!session.needs_credential());
    assert_eq!(session.api_key(), Some("AIzaXXXXXXXX"));
}
