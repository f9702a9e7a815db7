//! Request extractors whose rejections render as [`AppError`] bodies

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON request body
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Path parameters
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// Query string as raw pairs, in request order, repeated keys included
#[derive(FromRequestParts, serde::Deserialize)]
#[serde(transparent)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct QueryPairs(pub Vec<(String, String)>);
