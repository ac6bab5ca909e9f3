//! Extractors that report rejections as [`AppError`] JSON bodies.

use axum::extract::{FromRequest, FromRequestParts};

use super::errors::AppError;

/// JSON body; malformed input becomes a 400 `{error}`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Query string; malformed input becomes a 400 `{error}`.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

/// Path parameters, e.g. the numeric id in `/events/{id}`.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);
