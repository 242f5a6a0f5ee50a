#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
  pub user_id: String,
  pub display_name: String,
  pub photo_url: String,
}

/// Per-call information about who is acting, passed down to every controller operation.
#[derive(Debug, Clone, Default)]
pub struct Context {
  pub session: Session,
  pub request_id: String,
}

impl Context {
  pub fn new(session: Session, request_id: impl Into<String>) -> Self {
    Self { session, request_id: request_id.into() }
  }

  pub fn session(&self) -> &Session {
    &self.session
  }

  pub fn user_id(&self) -> &str {
    &self.session.user_id
  }

  pub fn is_signed_in(&self) -> bool {
    !self.session.user_id.is_empty()
  }
}
