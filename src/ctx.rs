use axum::{
    extract::{Extension, FromRequestParts},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use schemars::JsonSchema;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    access::{self, Capabilities, Role},
    auth::AuthSession,
    errors::{Error, Result},
    users, DB,
};

#[derive(Clone, Debug, FromRequestParts)]
pub struct BaseParams {
    pub ctx: Ctx,
    #[from_request(via(Extension))]
    pub db: DB,
}

impl BaseParams {
    pub fn new(db: DB, ctx: Ctx) -> Self {
        Self { db, ctx }
    }
}

#[derive(Debug, Serialize, Clone, JsonSchema)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub role: Option<Role>,
}

impl From<users::User> for CurrentUser {
    fn from(user: users::User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role,
        }
    }
}

/// Per-request context: the session's user, if any. Core operations receive
/// this explicitly via [`BaseParams`]; there is no ambient session state.
#[derive(Clone, Debug)]
pub struct Ctx {
    pub user: Option<CurrentUser>,
}

impl Ctx {
    pub fn new(user: Option<CurrentUser>) -> Self {
        Self { user }
    }

    pub fn capabilities(&self) -> Capabilities {
        access::capabilities(self.user.as_ref().and_then(|u| u.role))
    }

    /// Policy gate used by every handler before it touches the store:
    /// no session is `Unauthorized`, an insufficient role is `Forbidden`.
    pub fn require(&self, check: impl FnOnce(&Capabilities) -> bool) -> Result<&CurrentUser> {
        let user = self.user.as_ref().ok_or(Error::Unauthorized)?;
        if !check(&access::capabilities(user.role)) {
            return Err(Error::Forbidden);
        }
        Ok(user)
    }
}

impl<S> FromRequestParts<S> for Ctx
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> std::result::Result<Self, Self::Rejection> {
        let auth_session = AuthSession::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        Ok(Self::new(auth_session.user.map(CurrentUser::from)))
    }
}
