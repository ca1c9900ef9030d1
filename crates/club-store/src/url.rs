use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use std::path::PathBuf;

/// Assembles a Postgres connection URL from `CLUB_POSTGRES_*` environment
/// variables. Mirrors the teacher's `postgres_url_from_environment`,
/// including the newline-safety guard on the password.
pub fn postgres_url_from_environment() -> String {
    #[derive(Debug, PartialEq, Deserialize)]
    struct PostgresConfig {
        user: String,
        password: Option<String>,
        password_file: Option<PathBuf>,
        db: String,
        host: Option<String>,
    }

    let provider = figment::providers::Env::prefixed("CLUB_POSTGRES_");
    let postgres_config: PostgresConfig = figment::Figment::from(provider)
        .extract()
        .expect("Postgres configuration environment variable(s) missing or invalid");

    let password = if let Some(password) = postgres_config.password {
        password
    } else if let Some(password_file) = postgres_config.password_file {
        std::fs::read_to_string(password_file).expect("Failed to read postgres password file")
    } else {
        panic!("One of CLUB_POSTGRES_PASSWORD or CLUB_POSTGRES_PASSWORD_FILE must be provided");
    };

    let password = password.strip_suffix('\n').unwrap_or(&password);

    if password.contains('\n') {
        panic!(
            "Postgres admin password contains a non-terminal newline. This password would be \
            insecurely truncated by some Postgres clients. Please use a password without \
            non-terminal newlines."
        );
    }

    let password = utf8_percent_encode(password, NON_ALPHANUMERIC);
    let host = postgres_config.host.as_deref().unwrap_or("db");

    format!(
        "postgres://{}:{}@{}/{}",
        postgres_config.user, password, host, postgres_config.db
    )
}
