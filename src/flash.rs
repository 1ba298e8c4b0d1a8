// src/flash.rs
//
// One-time notices: attached to a redirect as a short-lived cookie,
// reported by the next page view, then cleared.

use axum::{
    http::{HeaderMap, HeaderName, HeaderValue, header},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use cookie::Cookie;
use percent_encoding::{NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::session::find_cookie;

pub const FLASH_COOKIE: &str = "flash";

/// Flash message catalog.
pub const SIGNED_IN: &str = "ログインしました";
pub const SIGNED_OUT: &str = "ログアウトしました。";
pub const BAD_CREDENTIALS: &str = "メールアドレスまたはパスワードが違います。";
pub const SIGN_IN_REQUIRED: &str = "ログインしてください。";
pub const POST_CREATED: &str = "投稿しました";
pub const POST_CREATE_FAILED: &str = "投稿に失敗しました";
pub const POST_DELETED: &str = "投稿が削除されました";

/// Set-Cookie header carrying a flash notice. Messages are
/// percent-encoded: cookie values must stay ASCII.
pub fn set_header(message: &str) -> Option<(HeaderName, HeaderValue)> {
    let encoded = utf8_percent_encode(message, NON_ALPHANUMERIC).to_string();
    let cookie = Cookie::build((FLASH_COOKIE, encoded)).path("/").build();

    HeaderValue::from_str(&cookie.to_string())
        .ok()
        .map(|value| (header::SET_COOKIE, value))
}

/// 303 redirect carrying a flash notice.
pub fn redirect_with_flash(to: &str, message: &str) -> Response {
    match set_header(message) {
        Some(header) => ([header], Redirect::to(to)).into_response(),
        None => Redirect::to(to).into_response(),
    }
}

/// Reads the pending flash notice from the request, if any, and
/// returns it together with the Set-Cookie headers that clear it.
/// Page handlers attach the headers to their response so the notice
/// shows exactly once.
pub fn take(headers: &HeaderMap) -> (Option<String>, AppendHeaders<Vec<(HeaderName, HeaderValue)>>) {
    let message = headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| find_cookie(raw, FLASH_COOKIE))
        .and_then(|encoded| {
            percent_decode_str(&encoded)
                .decode_utf8()
                .ok()
                .map(|decoded| decoded.into_owned())
        });

    let mut clear = Vec::new();
    if message.is_some() {
        let mut removal = Cookie::new(FLASH_COOKIE, "");
        removal.set_path("/");
        removal.make_removal();
        if let Ok(value) = HeaderValue::from_str(&removal.to_string()) {
            clear.push((header::SET_COOKIE, value));
        }
    }

    (message, AppendHeaders(clear))
}
