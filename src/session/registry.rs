//! Session Registry
//!
//! Maps session ids to running widget tasks. Every lookup counts as activity;
//! sessions with no activity for longer than the idle timeout are reaped.

use super::actor::{spawn_widget, WidgetHandle, WidgetSettings};
use crate::catalog::client::CatalogClient;
use crate::debounce::scheduler::TokioScheduler;
use crate::view::render::ViewRenderer;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Identifier of one open page.
///
/// UUID v4 string, unguessable enough that sessions cannot be hijacked by enumeration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

struct SessionEntry {
    handle: WidgetHandle,
    task: JoinHandle<()>,
    /// Milliseconds since registry creation.
    last_seen_ms: AtomicU64,
}

pub struct SessionRegistry {
    sessions: DashMap<SessionId, SessionEntry>,
    client: Arc<dyn CatalogClient>,
    settings: WidgetSettings,
    idle_timeout: Duration,
    started: Instant,
}

impl SessionRegistry {
    pub fn new(
        client: Arc<dyn CatalogClient>,
        settings: WidgetSettings,
        idle_timeout: Duration,
    ) -> Arc<Self> {
        Arc::new(Self {
            sessions: DashMap::new(),
            client,
            settings,
            idle_timeout,
            started: Instant::now(),
        })
    }

    pub fn renderer(&self) -> &ViewRenderer {
        &self.settings.renderer
    }

    fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Starts a new widget task and registers it.
    pub fn open(&self) -> SessionId {
        let id = SessionId::new();
        let (handle, task) =
            spawn_widget(self.client.clone(), TokioScheduler, self.settings.clone());

        self.sessions.insert(
            id.clone(),
            SessionEntry {
                handle,
                task,
                last_seen_ms: AtomicU64::new(self.now_ms()),
            },
        );

        tracing::info!("Opened session {} ({} active)", id.0, self.sessions.len());
        id
    }

    /// Looks up a session and marks it as active.
    pub fn handle(&self, id: &SessionId) -> Option<WidgetHandle> {
        let entry = self.sessions.get(id)?;
        entry.last_seen_ms.store(self.now_ms(), Ordering::Relaxed);
        Some(entry.handle.clone())
    }

    /// Removes a session and stops its task. Returns `false` if it was unknown.
    pub fn close(&self, id: &SessionId) -> bool {
        match self.sessions.remove(id) {
            Some((_, entry)) => {
                entry.task.abort();
                tracing::info!("Closed session {}", id.0);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Closes every session idle for longer than the idle timeout.
    ///
    /// # Returns
    /// The number of sessions closed.
    pub fn reap_idle(&self) -> usize {
        let now = self.now_ms();
        let limit = self.idle_timeout.as_millis() as u64;

        let idle: Vec<SessionId> = self
            .sessions
            .iter()
            .filter(|entry| now.saturating_sub(entry.value().last_seen_ms.load(Ordering::Relaxed)) > limit)
            .map(|entry| entry.key().clone())
            .collect();

        idle.iter().filter(|id| self.close(id)).count()
    }

    /// Spawns the background loop that reaps idle sessions every `every`.
    pub fn start_reaper(self: Arc<Self>, every: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);

            loop {
                interval.tick().await;
                let reaped = self.reap_idle();
                if reaped > 0 {
                    tracing::info!("Reaped {} idle session(s), {} active", reaped, self.len());
                }
            }
        })
    }
}
