pub mod admin;
pub mod auth;
pub mod chat;
pub mod upload;
pub mod user;

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Auth
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login))
        // User profile + records
        .route("/api/user/me", get(user::me).put(user::update_me))
        .route("/api/user/qr", get(user::qr))
        .route("/api/user/public/{share_token}", get(user::public_record))
        // Uploads
        .route("/api/upload/prescription", post(upload::upload_prescription))
        .route("/api/upload/test", post(upload::upload_test))
        .route("/api/upload/avatar", post(upload::upload_avatar))
        .route(
            "/api/upload/prescription/{id}",
            delete(upload::delete_prescription),
        )
        .route("/api/upload/test/{id}", delete(upload::delete_test))
        // Admin
        .route("/api/admin/login", post(admin::login))
        .route("/api/admin/patients", get(admin::list_patients))
        .route(
            "/api/admin/patients/{id}",
            get(admin::get_patient).delete(admin::delete_patient),
        )
        .route("/api/admin/stats", get(admin::stats))
        .route("/api/admin/profile", put(admin::update_profile))
        // Chatbot
        .route("/api/chat/sessions", get(chat::list_sessions))
        .route(
            "/api/chat/sessions/{id}",
            get(chat::get_session).delete(chat::delete_session),
        )
        .route("/api/chat/message", post(chat::send_message))
}
