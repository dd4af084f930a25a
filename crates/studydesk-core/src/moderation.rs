use serde_json::json;
use studydesk_types::models::AppUser;
use tracing::{error, info};

use crate::directory::Directory;
use crate::error::AdminError;
use crate::prompt::{Decision, Ui};
use crate::Backend;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationState {
    Active,
    Disabled,
}

impl ModerationState {
    pub fn of(user: &AppUser) -> Self {
        if user.disabled {
            Self::Disabled
        } else {
            Self::Active
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Disabled,
            Self::Disabled => Self::Active,
        }
    }

    pub fn is_disabled(self) -> bool {
        self == Self::Disabled
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationOutcome {
    /// The moderator declined; nothing was written
    Cancelled,
    /// The store now holds this state and the directory was re-read
    Updated(ModerationState),
    /// The write failed; the directory snapshot is as it was
    Failed,
}

/// Enables and disables user accounts.
#[derive(Clone)]
pub struct ModerationWorkflow {
    backend: Backend,
    ui: Ui,
}

impl ModerationWorkflow {
    pub fn new(backend: Backend, ui: Ui) -> Self {
        Self { backend, ui }
    }

    /// Merge `{disabled}` into the user's record, leaving every other field alone.
    pub async fn set_disabled(&self, uid: &str, disabled: bool) -> Result<(), AdminError> {
        let collection = self.backend.paths.users();
        let id = uid.to_string();
        self.backend
            .run(move |store| store.merge(&collection, &id, json!({ "disabled": disabled })))
            .await
            .map_err(AdminError::Write)?;

        info!("User {} disabled={}", uid, disabled);
        Ok(())
    }

    /// Ask for confirmation, flip the user's state, then re-read the directory.
    pub async fn toggle_user_status(&self, directory: &mut Directory, target: &AppUser) -> ModerationOutcome {
        let next = ModerationState::of(target).toggled();
        let key = match next {
            ModerationState::Disabled => "confirm_disable_user",
            ModerationState::Active => "confirm_enable_user",
        };
        let text = self.ui.t(key, &[("name", target.user_name.as_str())]);

        if self.ui.confirm(text).await == Decision::Cancelled {
            return ModerationOutcome::Cancelled;
        }

        match self.set_disabled(&target.uid, next.is_disabled()).await {
            Ok(()) => {
                self.ui.notify("user_status_updated");
                directory.refresh().await;
                ModerationOutcome::Updated(next)
            }
            Err(e) => {
                error!("Error updating user status for {}: {:#}", target.uid, e);
                self.ui.notify("error_user_status_update");
                ModerationOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::DirectoryService;
    use crate::testing::*;
    use std::sync::Arc;
    use studydesk_db::Paths;

    async fn setup(
        answer: Decision,
        target: &AppUser,
    ) -> (Arc<RecordingStore>, Arc<RecordingSurface>, ModerationWorkflow, Directory) {
        let store = RecordingStore::new();
        let mut stored = target.clone();
        stored.school_name = "Het Lyceum".into();
        seed_user(&store, &stored);

        let surface = RecordingSurface::answering(answer);
        let workflow = ModerationWorkflow::new(backend(&store), ui(&surface));
        let mut directory = Directory::new(DirectoryService::new(backend(&store)), ui(&surface));
        directory.refresh().await;
        (store, surface, workflow, directory)
    }

    #[test]
    fn states_toggle_symmetrically() {
        assert_eq!(ModerationState::Active.toggled(), ModerationState::Disabled);
        assert_eq!(ModerationState::Disabled.toggled(), ModerationState::Active);
        assert!(ModerationState::Disabled.is_disabled());
    }

    #[tokio::test]
    async fn confirmed_disable_merges_then_refetches() {
        let ann = user("u1", "Ann", "a@x.com", 1);
        let (store, surface, workflow, mut directory) = setup(Decision::Confirmed, &ann).await;
        let lists_before = store.list_count();

        let outcome = workflow.toggle_user_status(&mut directory, &ann).await;
        assert_eq!(outcome, ModerationOutcome::Updated(ModerationState::Disabled));

        assert_eq!(
            surface.confirmations(),
            vec!["Are you sure you want to disable Ann?".to_string()]
        );
        assert_eq!(
            store.writes(),
            vec![Call::Merge {
                collection: Paths::new(APP_ID).users(),
                id: "u1".into(),
                fields: json!({ "disabled": true }),
            }]
        );
        assert_eq!(store.list_count(), lists_before + 1);
        assert_eq!(surface.notices(), vec!["User status updated.".to_string()]);

        // The snapshot comes from the re-read, and other fields survived the merge
        let refreshed = directory.find("u1").unwrap();
        assert!(refreshed.disabled);
        assert_eq!(refreshed.school_name, "Het Lyceum");
    }

    #[tokio::test]
    async fn confirmed_enable_uses_enable_prompt() {
        let mut bob = user("u2", "Bob", "b@x.com", 1);
        bob.disabled = true;
        let (store, surface, workflow, mut directory) = setup(Decision::Confirmed, &bob).await;

        let outcome = workflow.toggle_user_status(&mut directory, &bob).await;
        assert_eq!(outcome, ModerationOutcome::Updated(ModerationState::Active));
        assert_eq!(
            surface.confirmations(),
            vec!["Are you sure you want to enable Bob?".to_string()]
        );
        assert!(matches!(
            &store.writes()[..],
            [Call::Merge { fields, .. }] if *fields == json!({ "disabled": false })
        ));
        assert!(!directory.find("u2").unwrap().disabled);
    }

    #[tokio::test]
    async fn cancel_has_no_side_effects() {
        let ann = user("u1", "Ann", "a@x.com", 1);
        let (store, surface, workflow, mut directory) = setup(Decision::Cancelled, &ann).await;
        let calls_before = store.calls().len();

        let outcome = workflow.toggle_user_status(&mut directory, &ann).await;
        assert_eq!(outcome, ModerationOutcome::Cancelled);
        assert_eq!(store.calls().len(), calls_before);
        assert!(surface.notices().is_empty());
        assert!(!directory.find("u1").unwrap().disabled);
    }

    #[tokio::test]
    async fn failed_write_keeps_snapshot() {
        let ann = user("u1", "Ann", "a@x.com", 1);
        let (store, surface, workflow, mut directory) = setup(Decision::Confirmed, &ann).await;
        let lists_before = store.list_count();
        store.fail_writes(true);

        let outcome = workflow.toggle_user_status(&mut directory, &ann).await;
        assert_eq!(outcome, ModerationOutcome::Failed);
        assert_eq!(store.list_count(), lists_before);
        assert_eq!(directory.users().len(), 1);
        assert!(!directory.find("u1").unwrap().disabled);
        assert_eq!(
            surface.notices(),
            vec!["Could not update the user status.".to_string()]
        );
    }
}
