pub mod health;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::state::AppState;
use crate::{admin, chat, feed, jobs, matching, personas, profiles};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Profiles
        .route("/api/v1/profiles", put(profiles::handlers::handle_upsert_profile))
        .route(
            "/api/v1/profiles/:id",
            get(profiles::handlers::handle_get_profile),
        )
        // Personas
        .route(
            "/api/v1/personas",
            post(personas::handlers::handle_create_persona)
                .get(personas::handlers::handle_list_personas),
        )
        .route(
            "/api/v1/personas/generate",
            post(personas::handlers::handle_generate_persona),
        )
        .route(
            "/api/v1/personas/:id",
            get(personas::handlers::handle_get_persona)
                .patch(personas::handlers::handle_update_persona)
                .delete(personas::handlers::handle_delete_persona),
        )
        .route(
            "/api/v1/personas/:id/refine",
            post(personas::handlers::handle_refine_persona),
        )
        .route(
            "/api/v1/personas/:id/resume",
            post(personas::handlers::handle_generate_resume),
        )
        // Jobs
        .route(
            "/api/v1/jobs",
            post(jobs::handlers::handle_create_job).get(jobs::handlers::handle_list_jobs),
        )
        .route(
            "/api/v1/jobs/browse",
            get(matching::handlers::handle_browse_jobs),
        )
        .route(
            "/api/v1/jobs/saved",
            get(matching::handlers::handle_saved_jobs),
        )
        .route(
            "/api/v1/jobs/:id",
            get(jobs::handlers::handle_get_job)
                .patch(jobs::handlers::handle_update_job)
                .delete(jobs::handlers::handle_deactivate_job),
        )
        .route(
            "/api/v1/jobs/:id/save",
            post(matching::handlers::handle_save_job),
        )
        .route(
            "/api/v1/matches/:id/status",
            patch(matching::handlers::handle_update_match_status),
        )
        // Feed
        .route(
            "/api/v1/posts",
            post(feed::handlers::handle_create_post).get(feed::handlers::handle_list_feed),
        )
        .route(
            "/api/v1/posts/mine",
            get(feed::handlers::handle_list_own_posts),
        )
        // Chat
        .route(
            "/api/v1/chat/conversations",
            post(chat::handlers::handle_open_conversation)
                .get(chat::handlers::handle_list_conversations),
        )
        .route(
            "/api/v1/chat/conversations/:id/messages",
            get(chat::handlers::handle_list_messages).post(chat::handlers::handle_send_message),
        )
        .route(
            "/api/v1/chat/conversations/:id/ai-reply",
            post(chat::handlers::handle_ai_reply),
        )
        // Admin
        .route(
            "/api/v1/admin/posts",
            get(admin::handlers::handle_moderation_queue),
        )
        .route(
            "/api/v1/admin/posts/:id",
            patch(admin::handlers::handle_moderate_post),
        )
        .route(
            "/api/v1/admin/ai-settings",
            get(admin::handlers::handle_get_ai_settings)
                .put(admin::handlers::handle_update_ai_settings),
        )
        .with_state(state)
}
