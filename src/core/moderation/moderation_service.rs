// Autorole service - core business logic for emoji -> role bindings.
//
// This service handles:
// - Listing configured autoroles
// - Adding bindings without duplicates
// - Removing bindings
// - Resolving which roles a reaction grants
//
// NO Discord dependencies here - just pure domain logic.

use super::moderation_models::Autorole;
use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum AutoroleError {
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("{0} is already bound to that role")]
    Duplicate(String),

    #[error("{0} is not bound to that role")]
    NotFound(String),

    #[error("An autorole needs an emoji")]
    MissingEmoji,
}

// ============================================================================
// STORAGE TRAIT (PORT)
// ============================================================================

/// Trait for persisting autorole bindings.
#[async_trait]
pub trait AutoroleStore: Send + Sync {
    /// All bindings, oldest first.
    async fn list(&self) -> Result<Vec<Autorole>, AutoroleError>;

    /// Insert a binding unless the same (emoji, role) pair exists.
    /// Returns `false` if nothing was inserted.
    async fn insert_unique(&self, autorole: Autorole) -> Result<bool, AutoroleError>;

    /// Delete a binding. Returns `false` if it did not exist.
    async fn delete(&self, emoji: &str, role_id: u64) -> Result<bool, AutoroleError>;

    /// All bindings for an emoji.
    async fn find_by_emoji(&self, emoji: &str) -> Result<Vec<Autorole>, AutoroleError>;
}

// ============================================================================
// CORE SERVICE
// ============================================================================

pub struct AutoroleService<S: AutoroleStore> {
    store: S,
}

impl<S: AutoroleStore> AutoroleService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Autorole>, AutoroleError> {
        self.store.list().await
    }

    /// Bind `emoji` to `role_id`.
    pub async fn add(
        &self,
        emoji: &str,
        role_id: u64,
        description: &str,
    ) -> Result<Autorole, AutoroleError> {
        let emoji = emoji.trim();
        if emoji.is_empty() {
            return Err(AutoroleError::MissingEmoji);
        }

        let autorole = Autorole {
            emoji: emoji.to_string(),
            role_id,
            description: description.trim().to_string(),
            created_at: Utc::now(),
        };

        if !self.store.insert_unique(autorole.clone()).await? {
            return Err(AutoroleError::Duplicate(autorole.emoji));
        }
        Ok(autorole)
    }

    /// Remove the binding of `emoji` to `role_id`.
    pub async fn remove(&self, emoji: &str, role_id: u64) -> Result<(), AutoroleError> {
        let emoji = emoji.trim();
        if !self.store.delete(emoji, role_id).await? {
            return Err(AutoroleError::NotFound(emoji.to_string()));
        }
        Ok(())
    }

    /// Roles granted by reacting with `emoji`.
    pub async fn roles_for_emoji(&self, emoji: &str) -> Result<Vec<u64>, AutoroleError> {
        Ok(self
            .store
            .find_by_emoji(emoji)
            .await?
            .into_iter()
            .map(|a| a.role_id)
            .collect())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use dashmap::DashMap;

    /// In-memory store for testing
    struct MockAutoroleStore {
        roles: DashMap<(String, u64), Autorole>,
    }

    impl MockAutoroleStore {
        fn new() -> Self {
            Self {
                roles: DashMap::new(),
            }
        }
    }

    #[async_trait]
    impl AutoroleStore for MockAutoroleStore {
        async fn list(&self) -> Result<Vec<Autorole>, AutoroleError> {
            let mut all: Vec<Autorole> = self.roles.iter().map(|r| r.value().clone()).collect();
            all.sort_by_key(|a| a.created_at);
            Ok(all)
        }

        async fn insert_unique(&self, autorole: Autorole) -> Result<bool, AutoroleError> {
            let key = (autorole.emoji.clone(), autorole.role_id);
            if self.roles.contains_key(&key) {
                return Ok(false);
            }
            self.roles.insert(key, autorole);
            Ok(true)
        }

        async fn delete(&self, emoji: &str, role_id: u64) -> Result<bool, AutoroleError> {
            Ok(self.roles.remove(&(emoji.to_string(), role_id)).is_some())
        }

        async fn find_by_emoji(&self, emoji: &str) -> Result<Vec<Autorole>, AutoroleError> {
            Ok(self
                .roles
                .iter()
                .filter(|r| r.key().0 == emoji)
                .map(|r| r.value().clone())
                .collect())
        }
    }

    #[tokio::test]
    async fn test_add_and_list() {
        let service = AutoroleService::new(MockAutoroleStore::new());

        let added = service.add(" 🎮 ", 10, "  Game nights ").await.unwrap();
        assert_eq!(added.emoji, "🎮");
        assert_eq!(added.description, "Game nights");

        let all = service.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].role_id, 10);
    }

    #[tokio::test]
    async fn test_add_refuses_duplicates() {
        let service = AutoroleService::new(MockAutoroleStore::new());

        service.add("🎮", 10, "first").await.unwrap();
        let err = service.add("🎮", 10, "second").await.unwrap_err();
        assert!(matches!(err, AutoroleError::Duplicate(_)));

        // Same emoji on a different role is a different binding
        service.add("🎮", 11, "other role").await.unwrap();
        assert_eq!(service.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_add_requires_emoji() {
        let service = AutoroleService::new(MockAutoroleStore::new());
        let err = service.add("  ", 10, "desc").await.unwrap_err();
        assert!(matches!(err, AutoroleError::MissingEmoji));
    }

    #[tokio::test]
    async fn test_remove() {
        let service = AutoroleService::new(MockAutoroleStore::new());
        service.add("🎨", 20, "Artists").await.unwrap();

        service.remove("🎨", 20).await.unwrap();
        assert!(service.list().await.unwrap().is_empty());

        let err = service.remove("🎨", 20).await.unwrap_err();
        assert!(matches!(err, AutoroleError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_roles_for_emoji() {
        let service = AutoroleService::new(MockAutoroleStore::new());
        service.add("🎨", 20, "Artists").await.unwrap();
        service.add("🎨", 21, "Designers").await.unwrap();
        service.add("🎵", 30, "Musicians").await.unwrap();

        let mut roles = service.roles_for_emoji("🎨").await.unwrap();
        roles.sort();
        assert_eq!(roles, vec![20, 21]);
        assert!(service.roles_for_emoji("🚀").await.unwrap().is_empty());
    }
}
