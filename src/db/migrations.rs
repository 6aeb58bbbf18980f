use lazy_static::lazy_static;
use rusqlite_migration::{Migrations, M};

lazy_static! {
    static ref DEV_FIXTURES: String = _dev_fixtures();
    pub static ref MIGRATIONS: Migrations<'static> = Migrations::new(vec![
        M::up(
            r#"
            CREATE TABLE users (
                id BLOB PRIMARY KEY CHECK(length(id) = 16) NOT NULL UNIQUE DEFAULT (uuid7_now()),
                email TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL,

                role TEXT NOT NULL DEFAULT 'viewer', -- admin | editor | viewer

                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME
            );
        "#
        ),
        M::up(
            r#"
            CREATE TABLE notes (
                id BLOB PRIMARY KEY CHECK(length(id) = 16) NOT NULL UNIQUE DEFAULT (uuid7_now()),
                user_id BLOB NOT NULL CHECK(length(user_id) = 16),

                title TEXT NOT NULL,
                content TEXT,
                is_pinned BOOLEAN NOT NULL DEFAULT FALSE,

                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,

                FOREIGN KEY (user_id) REFERENCES users (id)
            );
        "#
        ),
        M::up(&DEV_FIXTURES),
    ]);
}

fn _dev_fixtures() -> String {
    let password = crate::users::password::hash_blocking("admin").unwrap();
    format!(
        r#"
        INSERT INTO users (email, password, role) VALUES ('admin@mail.com', '{password}', 'admin');
        "#
    )
}
