use studydesk_types::models::AppUser;
use tracing::warn;

use crate::broadcast::{BroadcastComposer, BroadcastSender};
use crate::directory::{Directory, DirectoryService, UserRow};
use crate::error::AdminError;
use crate::moderation::{ModerationOutcome, ModerationWorkflow};
use crate::prompt::Ui;
use crate::Backend;

/// State behind the admin dashboard for one signed-in administrator.
pub struct AdminConsole {
    admin: AppUser,
    directory: Directory,
    moderation: ModerationWorkflow,
    composer: BroadcastComposer,
    search: String,
}

impl AdminConsole {
    pub fn new(backend: Backend, ui: Ui, admin: AppUser) -> Self {
        Self {
            admin,
            directory: Directory::new(DirectoryService::new(backend.clone()), ui.clone()),
            moderation: ModerationWorkflow::new(backend.clone(), ui.clone()),
            composer: BroadcastComposer::new(BroadcastSender::new(backend), ui),
            search: String::new(),
        }
    }

    /// Load the directory for the first time.
    pub async fn open(&mut self) -> bool {
        self.directory.refresh().await
    }

    pub async fn refresh(&mut self) -> bool {
        self.directory.refresh().await
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn is_loading(&self) -> bool {
        self.directory.is_loading()
    }

    pub fn rows(&self) -> Vec<UserRow> {
        self.directory.rows(&self.search)
    }

    pub fn total_users(&self) -> usize {
        self.directory.total(&self.search)
    }

    /// Toggle the user with `uid` from the current snapshot.
    pub async fn toggle_user(&mut self, uid: &str) -> Option<ModerationOutcome> {
        let Some(target) = self.directory.find(uid).cloned() else {
            warn!("Toggle requested for unknown user {}", uid);
            return None;
        };
        Some(self.moderation.toggle_user_status(&mut self.directory, &target).await)
    }

    pub fn composer(&mut self) -> &mut BroadcastComposer {
        &mut self.composer
    }

    /// Send the composer's draft under the administrator's display name.
    pub async fn send_broadcast(&mut self) -> Result<String, AdminError> {
        self.composer.send(&self.admin.user_name).await
    }
}
