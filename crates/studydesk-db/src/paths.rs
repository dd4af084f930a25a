/// Collection path conventions, scoped under one application id.
#[derive(Debug, Clone)]
pub struct Paths {
    app_id: String,
}

impl Paths {
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
        }
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn users(&self) -> String {
        format!("artifacts/{}/public/data/users", self.app_id)
    }

    pub fn notifications(&self, uid: &str) -> String {
        format!("artifacts/{}/users/{}/notifications", self.app_id, uid)
    }

    pub fn broadcasts(&self) -> String {
        format!("artifacts/{}/public/data/broadcasts", self.app_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_scoped_by_app() {
        let paths = Paths::new("study-app");
        assert_eq!(paths.users(), "artifacts/study-app/public/data/users");
        assert_eq!(paths.broadcasts(), "artifacts/study-app/public/data/broadcasts");
        assert_eq!(
            paths.notifications("u42"),
            "artifacts/study-app/users/u42/notifications"
        );
    }
}
