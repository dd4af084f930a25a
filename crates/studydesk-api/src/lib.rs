pub mod admin;
pub mod error;
pub mod middleware;
pub mod notifications;

use std::sync::Arc;

use axum::{
    Router, middleware as mw,
    routing::{get, post, put},
};
use tracing::{info, warn};

use studydesk_core::Backend;
use studydesk_core::broadcast::BroadcastSender;
use studydesk_core::directory::DirectoryService;
use studydesk_core::i18n::Catalog;
use studydesk_core::moderation::ModerationWorkflow;
use studydesk_core::prompt::{Prompt, Surface, Ui};
use studydesk_core::reconciler::NotificationReconciler;
use studydesk_types::models::Language;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub backend: Backend,
    pub jwt_secret: String,
    pub directory: DirectoryService,
    pub moderation: ModerationWorkflow,
    pub broadcasts: BroadcastSender,
    pub reconciler: NotificationReconciler,
}

impl AppStateInner {
    pub fn new(backend: Backend, jwt_secret: String, language: Language) -> Self {
        let ui = Ui::new(Arc::new(LogSurface), Arc::new(Catalog::new(language)));
        Self {
            directory: DirectoryService::new(backend.clone()),
            moderation: ModerationWorkflow::new(backend.clone(), ui),
            broadcasts: BroadcastSender::new(backend.clone()),
            reconciler: NotificationReconciler::new(backend.clone()),
            backend,
            jwt_secret,
        }
    }
}

/// Server-side prompt surface. Notices become log lines; there is nobody to
/// answer a confirmation, so those are cancelled. HTTP clients confirm before
/// calling.
pub struct LogSurface;

impl Surface for LogSurface {
    fn present(&self, prompt: Prompt) {
        if !prompt.is_confirmation() {
            info!("{}", prompt.text());
            return;
        }
        warn!("Cannot confirm '{}' on the server, cancelling", prompt.text());
        if let Some(reply) = prompt.into_reply() {
            reply.cancel();
        }
    }
}

/// All routes. Everything except `/health` needs a bearer token; `/admin`
/// routes also need the admin claim.
pub fn build_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/admin/users", get(admin::list_users))
        .route("/admin/users/{uid}/status", put(admin::set_user_status))
        .route("/admin/broadcasts", post(admin::send_broadcast))
        .route_layer(mw::from_fn(middleware::require_admin));

    let user_routes = Router::new()
        .route("/notifications", get(notifications::list_notifications))
        .route("/notifications/read", post(notifications::mark_read));

    let protected_routes = Router::new()
        .merge(admin_routes)
        .merge(user_routes)
        .route_layer(mw::from_fn_with_state(state.clone(), middleware::require_auth))
        .with_state(state);

    Router::new()
        .route("/health", get(health))
        .merge(protected_routes)
}

async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use studydesk_core::prompt::Decision;

    #[tokio::test]
    async fn log_surface_cancels_confirmations() {
        let (prompt, pending) = Prompt::confirmation("Disable Ann?");
        LogSurface.present(prompt);
        assert_eq!(pending.decision().await, Decision::Cancelled);
    }
}
