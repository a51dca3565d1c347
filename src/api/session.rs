use tracing::info;

use crate::db::KeyValueStore;
use crate::error::{HrmError, Result};
use crate::model::user::User;
use crate::state::{AppState, require};
use crate::store::CollectionKey;

impl<S: KeyValueStore> AppState<S> {
    /// Picks the acting user. There is no credential check.
    pub fn login(&mut self, user_id: &str) -> Result<&User> {
        let user = self
            .users
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
            .ok_or_else(|| HrmError::not_found("User", user_id))?;

        self.persist(CollectionKey::CurrentUser, &Some(&user))?;
        info!(user_id, role = %user.role, "Logged in");
        Ok(&*self.current_user.insert(user))
    }

    pub fn logout(&mut self) -> Result<()> {
        self.current_user = None;
        self.persist(CollectionKey::CurrentUser, &None::<User>)
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// Saves profile changes; the session follows if it is the same user.
    pub fn update_user(&mut self, updated: User) -> Result<()> {
        require(&updated.username, "Username")?;

        let slot = self
            .users
            .iter_mut()
            .find(|u| u.id == updated.id)
            .ok_or_else(|| HrmError::not_found("User", updated.id.clone()))?;
        *slot = updated.clone();
        self.persist(CollectionKey::Users, &self.users)?;

        if self.current_user.as_ref().is_some_and(|u| u.id == updated.id) {
            self.persist(CollectionKey::CurrentUser, &Some(&updated))?;
            self.current_user = Some(updated);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::model::role::Role;

    #[test]
    fn login_and_logout_persist_the_session() {
        let mut state = AppState::load(MemoryStore::new());
        assert!(state.current_user().is_none());

        let user = state.login("user-2").unwrap();
        assert_eq!(user.role, Role::Employee);

        let stored: Option<User> = state.store().load(CollectionKey::CurrentUser, None);
        assert_eq!(stored.map(|u| u.id), Some("user-2".to_string()));

        state.logout().unwrap();
        let stored: Option<User> = state.store().load(CollectionKey::CurrentUser, None);
        assert!(stored.is_none());
    }

    #[test]
    fn unknown_user_cannot_log_in() {
        let mut state = AppState::load(MemoryStore::new());
        assert!(matches!(state.login("user-9"), Err(HrmError::NotFound { .. })));
    }

    #[test]
    fn renaming_current_user_updates_session() {
        let mut state = AppState::load(MemoryStore::new());
        state.login("user-1").unwrap();

        let mut admin = state.users()[0].clone();
        admin.username = "Head of HR".into();
        state.update_user(admin).unwrap();

        assert_eq!(state.current_user().unwrap().username, "Head of HR");
        assert_eq!(state.users()[0].username, "Head of HR");
    }
}
