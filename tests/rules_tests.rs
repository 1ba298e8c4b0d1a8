// tests/rules_tests.rs
//
// Pure-function coverage for the field rules and the ownership guard;
// the HTTP-level behavior is covered in users_tests / posts_tests.

use techlog::authz::{can_create_post, can_delete_post};
use techlog::models::{post::PostForm, user::SignUpForm};
use techlog::session::Session;
use techlog::validation::{messages, validate_post, validate_sign_up};

fn sign_up_form(nickname: &str, email: &str, password: &str, confirmation: &str) -> SignUpForm {
    SignUpForm {
        nickname: nickname.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        password_confirmation: confirmation.to_string(),
    }
}

fn valid_form() -> SignUpForm {
    sign_up_form("テスト太郎", "test@example.com", "password", "password")
}

fn messages_of(form: &SignUpForm) -> Vec<&'static str> {
    validate_sign_up(form).iter().map(|e| e.message).collect()
}

#[test]
fn valid_sign_up_has_no_errors() {
    assert!(validate_sign_up(&valid_form()).is_empty());
}

#[test]
fn nickname_is_required() {
    let form = sign_up_form("", "test@example.com", "password", "password");
    assert_eq!(messages_of(&form), vec![messages::NICKNAME_REQUIRED]);
}

#[test]
fn nickname_length_counts_characters_not_bytes() {
    // 20 multi-byte characters pass even though they exceed 20 bytes.
    let form = sign_up_form(&"あ".repeat(20), "test@example.com", "password", "password");
    assert!(validate_sign_up(&form).is_empty());

    let form = sign_up_form(&"あ".repeat(21), "test@example.com", "password", "password");
    assert_eq!(messages_of(&form), vec![messages::NICKNAME_TOO_LONG]);
}

#[test]
fn email_is_required() {
    let form = sign_up_form("テスト太郎", "", "password", "password");
    assert_eq!(messages_of(&form), vec![messages::EMAIL_REQUIRED]);
}

#[test]
fn blank_password_reports_only_the_presence_rule() {
    let form = sign_up_form("テスト太郎", "test@example.com", "", "");
    assert_eq!(messages_of(&form), vec![messages::PASSWORD_REQUIRED]);
}

#[test]
fn password_length_bounds() {
    let form = sign_up_form("テスト太郎", "test@example.com", "aaaaa", "aaaaa");
    assert_eq!(messages_of(&form), vec![messages::PASSWORD_TOO_SHORT]);

    let six = "a".repeat(6);
    let form = sign_up_form("テスト太郎", "test@example.com", &six, &six);
    assert!(validate_sign_up(&form).is_empty());

    let max = "a".repeat(128);
    let form = sign_up_form("テスト太郎", "test@example.com", &max, &max);
    assert!(validate_sign_up(&form).is_empty());

    let over = "a".repeat(129);
    let form = sign_up_form("テスト太郎", "test@example.com", &over, &over);
    assert_eq!(messages_of(&form), vec![messages::PASSWORD_TOO_LONG]);
}

#[test]
fn confirmation_must_match_password() {
    let form = sign_up_form("テスト太郎", "test@example.com", "password", "passwordhoge");
    assert_eq!(messages_of(&form), vec![messages::CONFIRMATION_MISMATCH]);
}

#[test]
fn all_violations_are_reported_together() {
    let form = sign_up_form(&"あ".repeat(21), "", "aaaaa", "bbbbb");
    let found = messages_of(&form);
    assert_eq!(
        found,
        vec![
            messages::NICKNAME_TOO_LONG,
            messages::EMAIL_REQUIRED,
            messages::PASSWORD_TOO_SHORT,
            messages::CONFIRMATION_MISMATCH,
        ]
    );
}

#[test]
fn field_errors_name_their_field() {
    let form = sign_up_form("", "", "", "");
    let fields: Vec<&str> = validate_sign_up(&form).iter().map(|e| e.field).collect();
    assert_eq!(fields, vec!["nickname", "email", "password"]);
}

#[test]
fn post_title_and_content_are_required() {
    let form = PostForm {
        title: String::new(),
        content: "本文".to_string(),
    };
    let errors = validate_post(&form);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "title");
    assert_eq!(errors[0].message, messages::TITLE_REQUIRED);

    let form = PostForm {
        title: "タイトル".to_string(),
        content: String::new(),
    };
    let errors = validate_post(&form);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "content");

    let form = PostForm {
        title: String::new(),
        content: String::new(),
    };
    assert_eq!(validate_post(&form).len(), 2);

    let form = PostForm {
        title: "タイトル".to_string(),
        content: "本文".to_string(),
    };
    assert!(validate_post(&form).is_empty());
}

#[test]
fn only_authenticated_sessions_may_create_posts() {
    assert!(!can_create_post(&Session::anonymous()));
    assert!(can_create_post(&Session::authenticated(1)));
}

#[test]
fn only_the_owner_may_delete_a_post() {
    let owner = Session::authenticated(1);
    let other = Session::authenticated(2);
    let anonymous = Session::anonymous();

    assert!(can_delete_post(&owner, 1));
    assert!(!can_delete_post(&other, 1));
    assert!(!can_delete_post(&anonymous, 1));
}
