pub mod health;
pub mod mission;
pub mod planet;
pub mod scientist;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Method};
use axum::Router;

use crate::state::AppState;

/// Every method the resource routes below answer to.
pub const RESOURCE_METHODS: [Method; 4] = [Method::GET, Method::POST, Method::PATCH, Method::DELETE];

/// Request headers clients send to the resource routes. Bodies are JSON.
pub const RESOURCE_HEADERS: [HeaderName; 1] = [CONTENT_TYPE];

/// Build the resource route tree.
///
/// ```text
/// /planets        list, create
/// /planets/{id}   get, patch, delete (cascades to missions)
///
/// /scientists       list, create
/// /scientists/{id}  get, patch, delete (cascades to missions)
///
/// /missions       list, create
/// /missions/{id}  get, patch, delete
/// ```
///
/// Every read and write response accepts `?exclude=` rules.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/planets", planet::router())
        .nest("/scientists", scientist::router())
        .nest("/missions", mission::router())
}
