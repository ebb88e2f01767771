//! In-memory user repository.
//!
//! Records live in an `id -> User` map with an `email -> id` index beside
//! it. Both sit behind one reader/writer lock, so every mutation updates the
//! pair atomically and a duplicate check always sees the insert that
//! preceded it.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::Config;
use crate::domain::{
    id_generator_for, normalize_email, Argon2Hasher, CredentialHasher, IdGenerator, User, UserId,
    UserInput, UuidIdGenerator,
};
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(test)]
use mockall::automock;

/// Id collisions tolerated per insert before the generator is deemed broken
const MAX_ID_ATTEMPTS: usize = 16;

/// User repository trait for dependency injection.
///
/// Operations run to completion without suspending; callers on an async
/// runtime may invoke them directly or from a blocking task.
#[cfg_attr(test, automock)]
pub trait UserRepository: Send + Sync {
    /// Insert a new user. Fails with `DuplicateEmail` if the email is taken.
    fn create(&self, input: UserInput) -> AppResult<User>;

    /// Find a live user by ID
    fn find_by_id(&self, id: &UserId) -> AppResult<User>;

    /// Find a live user by email (case-insensitive)
    fn find_by_email(&self, email: &str) -> AppResult<User>;

    /// Overwrite name, email and type; replace the credential only when a
    /// non-empty password is supplied.
    fn update(&self, id: &UserId, input: UserInput) -> AppResult<User>;

    /// Remove a user permanently
    fn delete(&self, id: &UserId) -> AppResult<()>;

    /// Snapshot of all live users
    fn list(&self) -> AppResult<Vec<User>>;

    /// Number of live users
    fn count(&self) -> AppResult<usize>;
}

#[derive(Default)]
struct StoreState {
    users: HashMap<UserId, User>,
    by_email: HashMap<String, UserId>,
}

/// Concurrency-safe in-memory implementation of `UserRepository`
pub struct InMemoryUserStore {
    state: RwLock<StoreState>,
    ids: Arc<dyn IdGenerator>,
    hasher: Arc<dyn CredentialHasher>,
}

impl InMemoryUserStore {
    /// Create a store with explicit id and credential strategies
    pub fn new(ids: Arc<dyn IdGenerator>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            ids,
            hasher,
        }
    }

    /// Create a store with the strategies selected by configuration.
    ///
    /// # Errors
    /// Returns an internal error if the Argon2 parameters are invalid.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let hasher = Argon2Hasher::from_config(&config.hashing)?;
        Ok(Self::new(
            Arc::from(id_generator_for(config.id_strategy)),
            Arc::new(hasher),
        ))
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, StoreState>> {
        self.state
            .read()
            .map_err(|_| AppError::internal("User store lock poisoned"))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, StoreState>> {
        self.state
            .write()
            .map_err(|_| AppError::internal("User store lock poisoned"))
    }

    fn fresh_id(&self, state: &StoreState) -> AppResult<UserId> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.ids.next_id();
            if !state.users.contains_key(&id) {
                return Ok(id);
            }
        }
        Err(AppError::internal(format!(
            "No unused user id after {} attempts",
            MAX_ID_ATTEMPTS
        )))
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new(Arc::new(UuidIdGenerator), Arc::new(Argon2Hasher::default()))
    }
}

impl UserRepository for InMemoryUserStore {
    fn create(&self, input: UserInput) -> AppResult<User> {
        let input = input.normalized();
        input.check_required(true)?;

        if self.read()?.by_email.contains_key(&input.email) {
            return Err(AppError::DuplicateEmail);
        }

        // Hash before taking the lock; the critical section is map work only
        let password = self.hasher.hash(&input.password)?;

        // Authoritative check: another writer may have claimed the email meanwhile
        let mut state = self.write()?;
        if state.by_email.contains_key(&input.email) {
            return Err(AppError::DuplicateEmail);
        }

        let id = self.fresh_id(&state)?;
        let user = User::new(id.clone(), input.name, input.email, password, input.user_type);

        state.by_email.insert(user.email.clone(), id.clone());
        state.users.insert(id, user.clone());

        Ok(user)
    }

    fn find_by_id(&self, id: &UserId) -> AppResult<User> {
        self.read()?.users.get(id).cloned().ok_or_not_found()
    }

    fn find_by_email(&self, email: &str) -> AppResult<User> {
        let key = normalize_email(email);
        let state = self.read()?;
        state
            .by_email
            .get(&key)
            .and_then(|id| state.users.get(id))
            .cloned()
            .ok_or_not_found()
    }

    fn update(&self, id: &UserId, input: UserInput) -> AppResult<User> {
        let input = input.normalized();
        input.check_required(false)?;

        // Fail fast before paying for a hash
        if !self.read()?.users.contains_key(id) {
            return Err(AppError::NotFound);
        }

        let password = if input.password.is_empty() {
            None
        } else {
            Some(self.hasher.hash(&input.password)?)
        };

        let mut state = self.write()?;
        let StoreState { users, by_email } = &mut *state;

        // Re-checked under the write lock: a concurrent delete may have won
        let user = users.get_mut(id).ok_or(AppError::NotFound)?;

        if let Some(owner) = by_email.get(&input.email) {
            if owner != id {
                return Err(AppError::DuplicateEmail);
            }
        }

        if user.email != input.email {
            by_email.remove(&user.email);
            by_email.insert(input.email.clone(), id.clone());
        }

        user.apply_update(input.name, input.email, input.user_type, password);
        Ok(user.clone())
    }

    fn delete(&self, id: &UserId) -> AppResult<()> {
        let mut state = self.write()?;
        let user = state.users.remove(id).ok_or(AppError::NotFound)?;
        state.by_email.remove(&user.email);
        Ok(())
    }

    fn list(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.read()?.users.values().cloned().collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(users)
    }

    fn count(&self) -> AppResult<usize> {
        Ok(self.read()?.users.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SequentialIdGenerator, UserType};

    fn store() -> InMemoryUserStore {
        InMemoryUserStore::new(
            Arc::new(SequentialIdGenerator::new()),
            Arc::new(Argon2Hasher::with_params(1024, 1, 1).unwrap()),
        )
    }

    fn ana() -> UserInput {
        UserInput::new("Ana", "a@x.com", "abcdef", UserType::Buyer)
    }

    #[test]
    fn test_create_assigns_id_and_hashes_password() {
        let store = store();
        let user = store.create(ana()).unwrap();

        assert_eq!(user.id.as_str(), "user_1");
        assert_eq!(user.name, "Ana");
        assert_eq!(user.user_type, UserType::Buyer);
        assert_eq!(user.created_at, user.updated_at);
        assert_ne!(user.password.as_str(), "abcdef");
        assert!(user.password.verify("abcdef"));
    }

    #[test]
    fn test_create_duplicate_email_leaves_store_unchanged() {
        let store = store();
        let first = store.create(ana()).unwrap();

        let again = UserInput::new("Other", "A@X.com", "zzzzzz", UserType::Seller);
        assert_eq!(store.create(again), Err(AppError::DuplicateEmail));

        assert_eq!(store.count().unwrap(), 1);
        let kept = store.find_by_email("a@x.com").unwrap();
        assert_eq!(kept.id, first.id);
        assert_eq!(kept.name, "Ana");
    }

    #[test]
    fn test_create_rejects_missing_fields() {
        let store = store();
        let no_password = UserInput::new("Ana", "a@x.com", "", UserType::Buyer);
        let blank_email = UserInput::new("Ana", "   ", "abcdef", UserType::Buyer);

        assert!(matches!(store.create(no_password), Err(AppError::Validation(_))));
        assert!(matches!(store.create(blank_email), Err(AppError::Validation(_))));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_find_by_id_roundtrip() {
        let store = store();
        let created = store.create(ana()).unwrap();
        let found = store.find_by_id(&created.id).unwrap();

        assert_eq!(found.id, created.id);
        assert_eq!(found.email, created.email);
        assert_eq!(found.password, created.password);
        assert_eq!(found.created_at, created.created_at);
        assert_eq!(found.updated_at, created.updated_at);
    }

    #[test]
    fn test_find_by_id_not_found() {
        let store = store();
        assert_eq!(
            store.find_by_id(&UserId::from("nonexistent")).unwrap_err(),
            AppError::NotFound
        );
    }

    #[test]
    fn test_find_by_email_case_insensitive() {
        let store = store();
        let created = store.create(ana()).unwrap();

        assert_eq!(store.find_by_email(" A@X.COM ").unwrap().id, created.id);
        assert_eq!(
            store.find_by_email("b@x.com").unwrap_err(),
            AppError::NotFound
        );
    }

    #[test]
    fn test_update_preserves_identity() {
        let store = store();
        let created = store.create(ana()).unwrap();

        let change = UserInput::new("Ana Maria", "am@x.com", "", UserType::Seller);
        let updated = store.update(&created.id, change).unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
        assert_eq!(updated.name, "Ana Maria");
        assert_eq!(updated.user_type, UserType::Seller);
        // Empty password keeps the credential
        assert_eq!(updated.password, created.password);
    }

    #[test]
    fn test_update_moves_email_index() {
        let store = store();
        let created = store.create(ana()).unwrap();

        let change = UserInput::new("Ana", "new@x.com", "", UserType::Buyer);
        store.update(&created.id, change).unwrap();

        assert_eq!(store.find_by_email("new@x.com").unwrap().id, created.id);
        assert_eq!(
            store.find_by_email("a@x.com").unwrap_err(),
            AppError::NotFound
        );

        // The old email is free again
        let reuse = UserInput::new("Bia", "a@x.com", "abcdef", UserType::Seller);
        assert!(store.create(reuse).is_ok());
    }

    #[test]
    fn test_update_replaces_password() {
        let store = store();
        let created = store.create(ana()).unwrap();

        let change = UserInput::new("Ana", "a@x.com", "newsecret", UserType::Buyer);
        let updated = store.update(&created.id, change).unwrap();

        assert!(updated.password.verify("newsecret"));
        assert!(!updated.password.verify("abcdef"));
    }

    #[test]
    fn test_update_rejects_email_of_other_user() {
        let store = store();
        let ana = store.create(ana()).unwrap();
        let bia = store
            .create(UserInput::new("Bia", "b@x.com", "abcdef", UserType::Seller))
            .unwrap();

        let steal = UserInput::new("Bia", "a@x.com", "", UserType::Seller);
        assert_eq!(store.update(&bia.id, steal), Err(AppError::DuplicateEmail));

        let unchanged = store.find_by_id(&bia.id).unwrap();
        assert_eq!(unchanged.email, "b@x.com");
        assert_eq!(unchanged.updated_at, bia.updated_at);
        assert_eq!(store.find_by_email("a@x.com").unwrap().id, ana.id);
    }

    #[test]
    fn test_update_keeping_own_email() {
        let store = store();
        let created = store.create(ana()).unwrap();

        let rename = UserInput::new("Ana Paula", "a@x.com", "", UserType::Buyer);
        assert_eq!(store.update(&created.id, rename).unwrap().name, "Ana Paula");
    }

    #[test]
    fn test_update_not_found() {
        let store = store();
        assert_eq!(
            store.update(&UserId::from("user_99"), ana()).unwrap_err(),
            AppError::NotFound
        );
    }

    #[test]
    fn test_delete_is_terminal() {
        let store = store();
        let created = store.create(ana()).unwrap();

        store.delete(&created.id).unwrap();

        assert_eq!(store.find_by_id(&created.id), Err(AppError::NotFound));
        assert_eq!(store.update(&created.id, ana()), Err(AppError::NotFound));
        assert_eq!(store.delete(&created.id), Err(AppError::NotFound));
        assert_eq!(store.find_by_email("a@x.com"), Err(AppError::NotFound));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let store = store();
        let first = store.create(ana()).unwrap();
        store.delete(&first.id).unwrap();

        let second = store.create(ana()).unwrap();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_list_snapshot() {
        let store = store();
        let a = store.create(ana()).unwrap();
        let b = store
            .create(UserInput::new("Bia", "b@x.com", "abcdef", UserType::Seller))
            .unwrap();
        store.delete(&a.id).unwrap();

        let users = store.list().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, b.id);
    }

    /// Id generator that replays a fixed sequence
    struct ReplayIds(std::sync::Mutex<Vec<&'static str>>);

    impl IdGenerator for ReplayIds {
        fn next_id(&self) -> UserId {
            UserId::from(self.0.lock().unwrap().remove(0))
        }
    }

    #[test]
    fn test_live_id_never_handed_out_twice() {
        let ids = ReplayIds(std::sync::Mutex::new(vec!["dup", "dup", "fresh"]));
        let store = InMemoryUserStore::new(
            Arc::new(ids),
            Arc::new(Argon2Hasher::with_params(1024, 1, 1).unwrap()),
        );

        let first = store.create(ana()).unwrap();
        let second = store
            .create(UserInput::new("Bia", "b@x.com", "abcdef", UserType::Seller))
            .unwrap();

        assert_eq!(first.id.as_str(), "dup");
        assert_eq!(second.id.as_str(), "fresh");
    }

    /// Id generator that always yields the same id
    struct StuckIds;

    impl IdGenerator for StuckIds {
        fn next_id(&self) -> UserId {
            UserId::from("stuck")
        }
    }

    #[test]
    fn test_exhausted_id_generator_fails_without_insert() {
        let store = InMemoryUserStore::new(
            Arc::new(StuckIds),
            Arc::new(Argon2Hasher::with_params(1024, 1, 1).unwrap()),
        );
        store.create(ana()).unwrap();

        let result = store.create(UserInput::new("Bia", "b@x.com", "abcdef", UserType::Seller));

        assert!(matches!(result, Err(AppError::Internal(_))));
        assert_eq!(store.count().unwrap(), 1);
        assert_eq!(store.find_by_email("b@x.com"), Err(AppError::NotFound));
    }
}
