// src/authz.rs

use crate::session::Session;

/// True iff the session carries an authenticated identity.
/// Anonymous sessions must never reach the post creation flow.
pub fn can_create_post(session: &Session) -> bool {
    session.user_id().is_some()
}

/// True iff the session's user owns the post.
///
/// This is the single ownership gate: every mutating handler calls it
/// before touching the store, and rendered views consult it only to
/// decide whether to show the delete control. Hiding the control is
/// not the security boundary; this function is.
pub fn can_delete_post(session: &Session, post_owner_id: i64) -> bool {
    session.user_id() == Some(post_owner_id)
}
