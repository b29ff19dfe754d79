use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbotError {
    #[error("Bot error: {0}")]
    Bot(String),

    /// The platform refused the action for lack of permission (e.g. HTTP 403). Never retried.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
}

impl DbotError {
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, DbotError::PermissionDenied(_))
    }
}

pub type Result<T> = std::result::Result<T, DbotError>;
