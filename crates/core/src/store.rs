use crate::turn_tracker::TurnState;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Turn state for one scope. Holding the lock for a whole request keeps two
/// requests on the same scope from interleaving their read and write.
pub type SharedTurnState = Arc<tokio::sync::Mutex<TurnState>>;

// The handler owns a `TurnStore` rather than a global, so every conversation
// scope gets its own `TurnState`. Tests swap in `MockTurnStore` to simulate a
// failing backend.
#[async_trait]
#[cfg_attr(test, automock)]
pub trait TurnStore: Send + Sync {
    /// Returns the state for `scope_id`, creating an empty one if the scope is new.
    async fn entry(&self, scope_id: &str) -> Result<SharedTurnState>;

    /// Forgets `scope_id`. Unknown scopes are ignored.
    async fn remove(&self, scope_id: &str) -> Result<()>;

    /// Number of scopes currently tracked.
    async fn scope_count(&self) -> Result<usize>;
}

/// Process-local store. Everything is lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryTurnStore {
    scopes: Mutex<HashMap<String, SharedTurnState>>,
}

impl InMemoryTurnStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TurnStore for InMemoryTurnStore {
    async fn entry(&self, scope_id: &str) -> Result<SharedTurnState> {
        let mut scopes = self
            .scopes
            .lock()
            .map_err(|_| anyhow!("Turn store lock poisoned"))?;
        let state = scopes
            .entry(scope_id.to_string())
            .or_insert_with(|| {
                tracing::debug!("Creating turn state for scope {}", scope_id);
                SharedTurnState::default()
            })
            .clone();
        Ok(state)
    }

    async fn remove(&self, scope_id: &str) -> Result<()> {
        let mut scopes = self
            .scopes
            .lock()
            .map_err(|_| anyhow!("Turn store lock poisoned"))?;
        if scopes.remove(scope_id).is_some() {
            tracing::debug!("Dropped turn state for scope {}", scope_id);
        }
        Ok(())
    }

    async fn scope_count(&self) -> Result<usize> {
        let scopes = self
            .scopes
            .lock()
            .map_err(|_| anyhow!("Turn store lock poisoned"))?;
        Ok(scopes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Roster;
    use crate::turn_tracker::TurnTracker;

    #[tokio::test]
    async fn test_entry_creates_empty_state() -> Result<()> {
        let store = InMemoryTurnStore::new();

        let state = store.entry("session-1").await?;

        assert_eq!(state.lock().await.last_turn(), None);
        assert_eq!(store.scope_count().await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_entry_returns_same_state_for_same_scope() -> Result<()> {
        let store = InMemoryTurnStore::new();
        let tracker = TurnTracker::new(Roster::default());

        {
            let state = store.entry("session-1").await?;
            tracker.record_last_turn(&mut *state.lock().await, "Angela");
        }

        let state = store.entry("session-1").await?;
        assert_eq!(state.lock().await.last_turn(), Some("Angela"));
        assert_eq!(store.scope_count().await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_scopes_are_isolated() -> Result<()> {
        let store = InMemoryTurnStore::new();
        let tracker = TurnTracker::new(Roster::default());

        let first = store.entry("session-1").await?;
        tracker.record_last_turn(&mut *first.lock().await, "Isaiah");

        let second = store.entry("session-2").await?;
        assert_eq!(second.lock().await.last_turn(), None);
        assert_eq!(store.scope_count().await?, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_forgets_scope() -> Result<()> {
        let store = InMemoryTurnStore::new();
        let tracker = TurnTracker::new(Roster::default());

        let state = store.entry("session-1").await?;
        tracker.record_last_turn(&mut *state.lock().await, "Odelia");
        store.remove("session-1").await?;
        store.remove("never-seen").await?;

        assert_eq!(store.scope_count().await?, 0);
        let fresh = store.entry("session-1").await?;
        assert_eq!(fresh.lock().await.last_turn(), None);
        Ok(())
    }

    #[tokio::test]
    async fn test_concurrent_updates_on_one_scope_are_serialized() -> Result<()> {
        let store = Arc::new(InMemoryTurnStore::new());
        let tracker = Arc::new(TurnTracker::new(Roster::default()));

        let mut handles = Vec::new();
        for _ in 0..32 {
            let store = store.clone();
            let tracker = tracker.clone();
            handles.push(tokio::spawn(async move {
                let shared = store.entry("shared").await?;
                let mut state = shared.lock().await;
                let previous = state.last_turn().map(str::to_string);
                tokio::task::yield_now().await;
                let next = {
                    let mut rng = rand::thread_rng();
                    tracker.pick_next_turn(&mut state, previous.as_deref(), &mut rng)
                };
                anyhow::Ok((previous, next))
            }));
        }

        for handle in handles {
            let (previous, next) = handle.await??;
            assert_ne!(previous.as_deref(), Some(next.as_str()));
        }
        Ok(())
    }
}
