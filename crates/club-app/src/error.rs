//! HTTP error mapping (spec.md §7): transient errors become 5xx so the
//! pub/sub substrate retries; everything else is a terminal 4xx/5xx.

use log::error;
use miette::Diagnostic;
use rocket::http::Status;
use rocket::response::Responder;
use rocket::{Request, Response};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] club_core::CoreError),

    #[error(transparent)]
    Store(#[from] club_store::StoreError),

    #[error(transparent)]
    Bus(#[from] club_bus::BusError),

    #[error("request signature is missing or invalid")]
    BadSignature,

    #[error("bad request: {0}")]
    InvalidInput(String),

    #[error("pool error acquiring a connection")]
    PoolError(#[source] diesel::r2d2::PoolError),
}

impl AppError {
    fn status(&self) -> Status {
        match self {
            AppError::Core(e) if e.is_transient() => Status::ServiceUnavailable,
            AppError::Core(_) => Status::BadRequest,
            AppError::Store(e) if e.is_transient() => Status::ServiceUnavailable,
            AppError::Store(club_store::StoreError::MatchNotFound(_)) => Status::NotFound,
            AppError::Store(club_store::StoreError::PlayerNotFoundByName(_)) => Status::NotFound,
            AppError::Store(_) => Status::InternalServerError,
            AppError::Bus(e) if e.is_transient() => Status::ServiceUnavailable,
            AppError::Bus(_) => Status::BadRequest,
            AppError::BadSignature => Status::Unauthorized,
            AppError::InvalidInput(_) => Status::BadRequest,
            AppError::PoolError(_) => Status::ServiceUnavailable,
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for AppError {
    fn respond_to(self, _: &'r Request<'_>) -> rocket::response::Result<'o> {
        error!("{:#?}", self);
        let status = self.status();
        let rendered = self.to_string();

        Response::build()
            .status(status)
            .header(rocket::http::ContentType::Plain)
            .sized_body(rendered.len(), std::io::Cursor::new(rendered))
            .ok()
    }
}
