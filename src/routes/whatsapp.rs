use axum::{routing::post, Router};

use crate::whatsapp::controller;

/// Set up the Messaging Gateway stub route
pub fn routes() -> Router {
    Router::new().route("/api/whatsapp/send", post(controller::send))
}
