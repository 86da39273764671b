use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::account::models::User;
use crate::account::ports::UserCache;

struct CacheEntry {
    user: User,
    expires_at: Instant,
}

/// In-process implementation of [`UserCache`].
///
/// Entries carry a per-entry expiry and are evicted lazily on read. Concurrent
/// fills for the same username race last-writer-wins; the values are
/// equivalent snapshots within the TTL window. A multi-process deployment
/// needs a shared external cache behind the same port instead.
#[derive(Clone)]
pub struct InMemoryUserCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    ttl: Duration,
}

impl InMemoryUserCache {
    /// Create a cache whose entries live for `ttl` after each put.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }
}

#[async_trait]
impl UserCache for InMemoryUserCache {
    async fn get(&self, username: &str) -> Option<User> {
        {
            let entries = self.entries.read().await;
            match entries.get(username) {
                Some(entry) if entry.expires_at > Instant::now() => {
                    return Some(entry.user.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }

        // Entry lapsed: evict it so the map does not accumulate stale users
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get(username) {
            if entry.expires_at <= Instant::now() {
                entries.remove(username);
            }
        }
        None
    }

    async fn put(&self, username: &str, user: &User) {
        let entry = CacheEntry {
            user: user.clone(),
            expires_at: Instant::now() + self.ttl,
        };
        self.entries.write().await.insert(username.to_string(), entry);
    }

    async fn invalidate(&self, username: &str) {
        if self.entries.write().await.remove(username).is_some() {
            tracing::debug!(username, "Cache entry invalidated");
        }
    }
}
