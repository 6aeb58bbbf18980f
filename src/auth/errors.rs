use tower_sessions::session;

use crate::{db, users::password};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    DB(#[from] db::Error),

    #[error(transparent)]
    Password(#[from] password::Error),

    #[error(transparent)]
    Session(#[from] session::Error),
}

impl<AuthBackend> From<axum_login::Error<AuthBackend>> for Error
where
    AuthBackend: axum_login::AuthnBackend<Error = Error>,
{
    fn from(error: axum_login::Error<AuthBackend>) -> Self {
        match error {
            axum_login::Error::Session(err) => Error::Session(err),
            axum_login::Error::Backend(err) => err,
        }
    }
}

impl From<Error> for crate::Error {
    fn from(error: Error) -> Self {
        match error {
            Error::DB(err) => err.into(),
            err => Self::Unexpected(err.to_string()),
        }
    }
}
