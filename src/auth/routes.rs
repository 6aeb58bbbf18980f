use aide::{
    axum::{
        routing::{get, post, post_with},
        ApiRouter, IntoApiResponse,
    },
    NoApi,
};
use axum::{http::StatusCode, Json};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    access::{Capabilities, Role},
    ctx::{BaseParams, Ctx, CurrentUser},
    errors::{Error, Result},
    state::AppState,
    users::{self, password, store::CreateUserParameters},
};

use super::backend::{AuthSession, Credentials};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SignupPayload {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct MeResponse {
    pub user: CurrentUser,
    /// The capability row for the session's role; UI affordances read this
    /// instead of re-deriving rights from the role name.
    pub capabilities: Capabilities,
}

pub fn router(state: AppState) -> ApiRouter {
    ApiRouter::new()
        .api_route(
            "/auth/signup",
            post_with(signup, |t| t.response::<201, Json<CurrentUser>>()),
        )
        .api_route("/auth/login", post(login))
        .api_route("/auth/logout", get(logout))
        .api_route("/auth/me", get(me))
        .with_state(state)
}

/// New accounts always start as viewers; other roles are assigned out of band.
async fn signup(
    NoApi(mut auth_session): NoApi<AuthSession>,
    NoApi(BaseParams { db, .. }): NoApi<BaseParams>,
    Json(SignupPayload { email, password }): Json<SignupPayload>,
) -> Result<(StatusCode, Json<CurrentUser>)> {
    let email = email.trim().to_owned();
    if email.is_empty() || password.is_empty() {
        return Err(Error::Validation("Email and password must not be empty".into()));
    }

    let password_hash = password::hash(password)
        .await
        .map_err(super::Error::from)
        .map_err(Error::from)?;

    let user = users::store::create(
        db,
        CreateUserParameters {
            email,
            password_hash,
            role: Role::Viewer,
        },
    )
    .await?;

    auth_session
        .login(&user)
        .await
        .map_err(super::Error::from)
        .map_err(Error::from)?;

    tracing::info!("{} signed up", user.email);

    Ok((StatusCode::CREATED, Json(user.into())))
}

async fn login(
    NoApi(mut auth_session): NoApi<AuthSession>,
    Json(creds): Json<Credentials>,
) -> Result<Json<CurrentUser>> {
    let user = auth_session
        .authenticate(creds)
        .await
        .map_err(super::Error::from)
        .map_err(Error::from)?
        .ok_or(Error::Unauthorized)?;

    auth_session
        .login(&user)
        .await
        .map_err(super::Error::from)
        .map_err(Error::from)?;

    tracing::info!("{} logged in", user.email);

    Ok(Json(user.into()))
}

async fn logout(NoApi(mut auth_session): NoApi<AuthSession>) -> impl IntoApiResponse {
    auth_session
        .logout()
        .await
        .map_err(super::Error::from)
        .map_err(Error::from)
        .map(|_| Json(json!({ "status": "ok" })))
}

async fn me(NoApi(ctx): NoApi<Ctx>) -> Result<Json<MeResponse>> {
    let capabilities = ctx.capabilities();
    let user = ctx.user.ok_or(Error::Unauthorized)?;

    Ok(Json(MeResponse { user, capabilities }))
}

#[cfg(test)]
mod tests {
    use aide::axum::ApiRouter;
    use axum_test::TestServer;
    use serde_json::json;

    use crate::{
        access::Role,
        db::{init_test_db, DB},
        errors::Result,
        tests::{create_user, login},
    };

    async fn test_server(db: DB) -> Result<TestServer> {
        crate::tests::test_server(db, |_| ApiRouter::new()).await
    }

    #[tokio::test]
    async fn signup_creates_a_viewer_and_logs_in() -> Result<()> {
        let db = init_test_db().await?;
        let server = test_server(db).await?;

        let response = server
            .post("/auth/signup")
            .json(&json!({ "email": "new@mail.com", "password": "secret" }))
            .await;
        assert_eq!(response.status_code(), 201);

        let me = server.get("/auth/me").await.json::<serde_json::Value>();
        assert_eq!(me["user"]["email"], "new@mail.com");
        assert_eq!(me["user"]["role"], "viewer");
        assert_eq!(me["capabilities"]["can_view"], true);
        assert_eq!(me["capabilities"]["can_create"], false);
        Ok(())
    }

    #[tokio::test]
    async fn signup_rejects_duplicate_emails() -> Result<()> {
        let db = init_test_db().await?;
        let server = test_server(db).await?;

        server
            .post("/auth/signup")
            .json(&json!({ "email": "new@mail.com", "password": "secret" }))
            .await;

        let response = server
            .post("/auth/signup")
            .json(&json!({ "email": "new@mail.com", "password": "other" }))
            .expect_failure()
            .await;
        assert_eq!(response.status_code(), 409);
        Ok(())
    }

    #[tokio::test]
    async fn signup_rejects_empty_input() -> Result<()> {
        let db = init_test_db().await?;
        let server = test_server(db).await?;

        let response = server
            .post("/auth/signup")
            .json(&json!({ "email": "   ", "password": "secret" }))
            .expect_failure()
            .await;
        assert_eq!(response.status_code(), 400);

        let response = server
            .post("/auth/signup")
            .json(&json!({ "email": "new@mail.com", "password": "" }))
            .expect_failure()
            .await;
        assert_eq!(response.status_code(), 400);
        Ok(())
    }

    #[tokio::test]
    async fn login_accepts_the_seeded_admin() -> Result<()> {
        let db = init_test_db().await?;
        let server = test_server(db).await?;

        let response = server
            .post("/auth/login")
            .json(&json!({ "email": "admin@mail.com", "password": "admin" }))
            .await;
        assert_eq!(response.status_code(), 200);

        let me = server.get("/auth/me").await.json::<serde_json::Value>();
        assert_eq!(me["user"]["role"], "admin");
        assert_eq!(me["capabilities"]["can_delete"], true);
        Ok(())
    }

    #[tokio::test]
    async fn login_rejects_bad_credentials() -> Result<()> {
        let db = init_test_db().await?;
        create_user(&db, "user@mail.com", Role::Editor, "secret").await;
        let server = test_server(db).await?;

        let response = server
            .post("/auth/login")
            .json(&json!({ "email": "user@mail.com", "password": "wrong" }))
            .expect_failure()
            .await;
        assert_eq!(response.status_code(), 401);

        let response = server
            .post("/auth/login")
            .json(&json!({ "email": "nobody@mail.com", "password": "secret" }))
            .expect_failure()
            .await;
        assert_eq!(response.status_code(), 401);
        Ok(())
    }

    #[tokio::test]
    async fn logout_ends_the_session() -> Result<()> {
        let db = init_test_db().await?;
        create_user(&db, "user@mail.com", Role::Viewer, "secret").await;
        let server = test_server(db).await?;

        login(&server, "user@mail.com", "secret").await;
        server.get("/auth/me").await;

        server.get("/auth/logout").await;

        let response = server.get("/auth/me").expect_failure().await;
        assert_eq!(response.status_code(), 401);
        Ok(())
    }

    #[tokio::test]
    async fn me_without_a_session_is_unauthorized() -> Result<()> {
        let db = init_test_db().await?;
        let server = test_server(db).await?;

        let response = server.get("/auth/me").expect_failure().await;
        assert_eq!(response.status_code(), 401);
        Ok(())
    }
}
