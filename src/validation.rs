// src/validation.rs

use serde::Serialize;

use crate::models::{post::PostForm, user::SignUpForm};

/// A validation failure attributed to one named input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// User-facing field error catalog.
pub mod messages {
    pub const NICKNAME_REQUIRED: &str = "ニックネーム が入力されていません。";
    pub const NICKNAME_TOO_LONG: &str = "ニックネーム は20文字以下に設定して下さい。";
    pub const EMAIL_REQUIRED: &str = "メールアドレス が入力されていません。";
    pub const EMAIL_TAKEN: &str = "メールアドレス は既に使用されています。";
    pub const PASSWORD_REQUIRED: &str = "パスワード が入力されていません。";
    pub const PASSWORD_TOO_SHORT: &str = "パスワード は6文字以上に設定して下さい。";
    pub const PASSWORD_TOO_LONG: &str = "パスワード は128文字以下に設定して下さい。";
    pub const CONFIRMATION_MISMATCH: &str = "確認用パスワード が一致していません。";
    pub const TITLE_REQUIRED: &str = "タイトル が入力されていません。";
    pub const CONTENT_REQUIRED: &str = "本文 が入力されていません。";
}

pub const NICKNAME_MAX_CHARS: usize = 20;
pub const PASSWORD_MIN_CHARS: usize = 6;
pub const PASSWORD_MAX_CHARS: usize = 128;

type Rule<T> = fn(&T) -> Option<FieldError>;

fn violation(field: &'static str, message: &'static str) -> Option<FieldError> {
    Some(FieldError { field, message })
}

/// Logical character count, not bytes. A 20-character multi-byte
/// nickname passes; a 21-character one does not.
fn char_len(value: &str) -> usize {
    value.chars().count()
}

// Length rules skip empty values so a blank field reports exactly its
// "required" message and nothing else.

fn nickname_required(form: &SignUpForm) -> Option<FieldError> {
    if form.nickname.is_empty() {
        return violation("nickname", messages::NICKNAME_REQUIRED);
    }
    None
}

fn nickname_max_length(form: &SignUpForm) -> Option<FieldError> {
    if !form.nickname.is_empty() && char_len(&form.nickname) > NICKNAME_MAX_CHARS {
        return violation("nickname", messages::NICKNAME_TOO_LONG);
    }
    None
}

fn email_required(form: &SignUpForm) -> Option<FieldError> {
    if form.email.is_empty() {
        return violation("email", messages::EMAIL_REQUIRED);
    }
    None
}

fn password_required(form: &SignUpForm) -> Option<FieldError> {
    if form.password.is_empty() {
        return violation("password", messages::PASSWORD_REQUIRED);
    }
    None
}

fn password_min_length(form: &SignUpForm) -> Option<FieldError> {
    if !form.password.is_empty() && char_len(&form.password) < PASSWORD_MIN_CHARS {
        return violation("password", messages::PASSWORD_TOO_SHORT);
    }
    None
}

fn password_max_length(form: &SignUpForm) -> Option<FieldError> {
    if !form.password.is_empty() && char_len(&form.password) > PASSWORD_MAX_CHARS {
        return violation("password", messages::PASSWORD_TOO_LONG);
    }
    None
}

fn password_confirmation_matches(form: &SignUpForm) -> Option<FieldError> {
    if form.password != form.password_confirmation {
        return violation("password_confirmation", messages::CONFIRMATION_MISMATCH);
    }
    None
}

/// Registration rules, in display order. Every violated rule reports
/// its own message; evaluation never short-circuits.
///
/// Email uniqueness is not here: it needs the store, so the handler
/// checks it alongside these and merges the result into the same list.
const SIGN_UP_RULES: &[Rule<SignUpForm>] = &[
    nickname_required,
    nickname_max_length,
    email_required,
    password_required,
    password_min_length,
    password_max_length,
    password_confirmation_matches,
];

pub fn validate_sign_up(form: &SignUpForm) -> Vec<FieldError> {
    SIGN_UP_RULES.iter().filter_map(|rule| rule(form)).collect()
}

fn title_required(form: &PostForm) -> Option<FieldError> {
    if form.title.is_empty() {
        return violation("title", messages::TITLE_REQUIRED);
    }
    None
}

fn content_required(form: &PostForm) -> Option<FieldError> {
    if form.content.is_empty() {
        return violation("content", messages::CONTENT_REQUIRED);
    }
    None
}

/// Post rules: both title and content must be present.
const POST_RULES: &[Rule<PostForm>] = &[title_required, content_required];

pub fn validate_post(form: &PostForm) -> Vec<FieldError> {
    POST_RULES.iter().filter_map(|rule| rule(form)).collect()
}
