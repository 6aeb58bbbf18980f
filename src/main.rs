mod config;

mod access;
mod app;
mod auth;
mod ctx;
mod db;
mod errors;
mod notes;
mod shared;
mod state;
mod users;

use std::net::SocketAddr;

use aide::axum::ApiRouter;
use app::AppParams;
pub use config::config;
pub use db::{init_db, DB};
pub use errors::{Error, Result};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> errors::Result<()> {
    let config = config();

    shared::tracing::setup_tracing(false);

    let conn = init_db().await?;

    let (app, _api) = app::create(AppParams {
        db: conn,
        router: |state| ApiRouter::new().merge(notes::router(state)),
    })
    .await?;

    let app = shared::tracing::add_tracing_layer(app);

    let port = config.port;
    let listener = TcpListener::bind(format!("127.0.0.1:{port}")).await.unwrap();

    tracing::info!("listening on http://{}", listener.local_addr().unwrap());

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .unwrap();

    Ok(())
}

#[cfg(test)]
pub mod tests {
    use crate::{
        access::Role,
        app::{create, AppParams},
        errors::Result,
        state::AppState,
        users::{self, UserId},
        DB,
    };
    use aide::axum::ApiRouter;
    use axum_test::{TestServer, TestServerConfig};
    use rusqlite::params;
    use serde_json::json;

    pub async fn test_server<R>(db: DB, router: R) -> Result<TestServer>
    where
        R: FnOnce(AppState) -> ApiRouter,
    {
        let (app, _) = create(AppParams { db, router }).await?;

        let config = TestServerConfig::builder()
            .save_cookies()
            .expect_success_by_default()
            .mock_transport()
            .build();

        Ok(TestServer::new_with_config(app, config).unwrap())
    }

    /// Inserts a user with the given role, hashing `password` on the
    /// connection thread.
    pub async fn create_user(db: &DB, email: &str, role: Role, password: &str) -> UserId {
        let email = email.to_owned();
        let password = password.to_owned();
        db.call(move |conn| -> rusqlite::Result<uuid::Uuid> {
            let hash = users::password::hash_blocking(&password).unwrap();
            let id = conn.query_row(
                "INSERT INTO users (email, password, role) VALUES (?, ?, ?) RETURNING id",
                params![email, hash, role.to_string()],
                |row| row.get::<_, uuid::Uuid>(0),
            )?;
            Ok(id)
        })
        .await
        .unwrap()
    }

    pub async fn login(server: &TestServer, email: &str, password: &str) {
        server
            .post("/auth/login")
            .json(&json!({ "email": email, "password": password }))
            .await;
    }

    /// The dev fixture migration seeds this account.
    pub async fn login_as_admin(server: &TestServer) {
        login(server, "admin@mail.com", "admin").await;
    }
}
