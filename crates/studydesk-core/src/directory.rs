use studydesk_db::Direction;
use studydesk_types::models::AppUser;
use tracing::{debug, error};

use crate::error::AdminError;
use crate::moderation::ModerationState;
use crate::prompt::Ui;
use crate::Backend;

/// Reads the user directory from the store.
#[derive(Clone)]
pub struct DirectoryService {
    backend: Backend,
}

impl DirectoryService {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// All users, newest first, without the reserved admin account.
    pub async fn list_users(&self) -> Result<Vec<AppUser>, AdminError> {
        let collection = self.backend.paths.users();
        let docs = self
            .backend
            .run(move |store| store.list(&collection, "createdAt", Direction::Descending))
            .await
            .map_err(AdminError::Fetch)?;

        let users = docs
            .iter()
            .map(|doc| {
                let mut user: AppUser = doc.decode()?;
                user.uid = doc.id.clone();
                Ok(user)
            })
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(AdminError::Fetch)?;

        Ok(users
            .into_iter()
            .filter(|u| u.email != self.backend.reserved_admin_email)
            .collect())
    }
}

/// Users whose name or email contains `query`, ignoring case. Order is kept.
pub fn filter<'a>(users: &'a [AppUser], query: &str) -> Vec<&'a AppUser> {
    let needle = query.to_lowercase();
    users
        .iter()
        .filter(|u| {
            u.user_name.to_lowercase().contains(&needle) || u.email.to_lowercase().contains(&needle)
        })
        .collect()
}

/// The admin panel's snapshot of the directory.
///
/// The snapshot only ever changes by a full [`Directory::refresh`]; writes
/// elsewhere never patch it in place.
pub struct Directory {
    service: DirectoryService,
    ui: Ui,
    users: Vec<AppUser>,
    loading: bool,
}

impl Directory {
    pub fn new(service: DirectoryService, ui: Ui) -> Self {
        Self {
            service,
            ui,
            users: Vec::new(),
            loading: false,
        }
    }

    pub fn users(&self) -> &[AppUser] {
        &self.users
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn find(&self, uid: &str) -> Option<&AppUser> {
        self.users.iter().find(|u| u.uid == uid)
    }

    /// Re-read the directory. On failure the snapshot is cleared, not kept
    /// stale, and a notice is shown. Returns whether the fetch succeeded.
    pub async fn refresh(&mut self) -> bool {
        self.loading = true;
        let result = self.service.list_users().await;
        self.loading = false;

        match result {
            Ok(users) => {
                debug!("Directory refreshed with {} users", users.len());
                self.users = users;
                true
            }
            Err(e) => {
                error!("Error fetching users: {:#}", e);
                self.users.clear();
                self.ui.notify("error_fetch_users");
                false
            }
        }
    }

    pub fn visible(&self, query: &str) -> Vec<&AppUser> {
        filter(&self.users, query)
    }

    /// The "Total Users" figure, which counts the filtered list.
    pub fn total(&self, query: &str) -> usize {
        self.visible(query).len()
    }

    pub fn rows(&self, query: &str) -> Vec<UserRow> {
        self.visible(query)
            .into_iter()
            .map(|u| UserRow::build(u, &self.ui))
            .collect()
    }
}

/// One line of the user table, with every label already translated.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRow {
    pub uid: String,
    pub name: String,
    pub email: String,
    pub education_level: String,
    pub last_login: String,
    pub state: ModerationState,
    pub status: String,
    pub action: String,
}

impl UserRow {
    pub fn build(user: &AppUser, ui: &Ui) -> Self {
        let state = ModerationState::of(user);
        let (status, action) = match state {
            ModerationState::Active => ("active", "disable_user"),
            ModerationState::Disabled => ("disabled", "enable_user"),
        };

        Self {
            uid: user.uid.clone(),
            name: user.user_name.clone(),
            email: user.email.clone(),
            education_level: ui.t(&user.education_level, &[]),
            last_login: user
                .last_login_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| ui.t("not_available", &[])),
            state,
            status: ui.t(status, &[]),
            action: ui.t(action, &[]),
        }
    }
}
