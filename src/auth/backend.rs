use axum_login::AuthUser;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::{
    db::{self, DB},
    users::{
        self, password,
        store::{GetUserByEmailParameters, GetUserByIdParameters},
        User, UserId,
    },
};

use super::Error;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl AuthUser for User {
    type Id = UserId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn session_auth_hash(&self) -> &[u8] {
        // Rotating the password invalidates existing sessions.
        self.password.as_bytes()
    }
}

#[derive(Clone)]
pub struct AuthBackend {
    db: DB,
}

impl AuthBackend {
    pub fn new(db: DB) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl axum_login::AuthnBackend for AuthBackend {
    type User = User;
    type Credentials = Credentials;
    type Error = Error;

    async fn authenticate(&self, creds: Self::Credentials) -> Result<Option<Self::User>, Self::Error> {
        let user = match users::store::find_one_by_email(
            self.db.clone(),
            GetUserByEmailParameters {
                user_email: creds.email,
            },
        )
        .await
        {
            Ok(user) => user,
            // Unknown email and bad password are indistinguishable to the caller.
            Err(db::Error::NotFound(_)) => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let valid = password::verify(creds.password, user.password.clone()).await?;

        Ok(valid.then_some(user))
    }

    async fn get_user(&self, user_id: &axum_login::UserId<Self>) -> Result<Option<Self::User>, Self::Error> {
        let user = match users::store::find_one_by_id(
            self.db.clone(),
            GetUserByIdParameters {
                user_id: user_id.to_owned(),
            },
        )
        .await
        {
            Ok(user) => user,
            Err(db::Error::NotFound(_)) => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        Ok(Some(user))
    }
}

pub type AuthSession = axum_login::AuthSession<AuthBackend>;
