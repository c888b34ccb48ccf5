use super::user::User;

/// Phase of the authentication lifecycle.
///
/// Transitions: `Uninitialized → Loading → {Authenticated, Anonymous}`,
/// `Authenticated → Anonymous` on logout or token rejection, and
/// `Anonymous → Authenticated` on a successful login/signup. There are no
/// other edges. While `Loading`, neither public nor protected content
/// should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Uninitialized,
    Loading,
    Authenticated,
    Anonymous,
}

/// The authenticated user together with the bearer token that proves it.
///
/// Owned exclusively by the session service; the rest of the application
/// only ever sees `&Session`.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: User,
    pub token: String,
}
