//! Per-Session Widget Task
//!
//! Owns one `WidgetState` and drives it: applies events with `update`, carries out
//! the returned effects, and publishes the re-rendered view.

use super::protocol::ViewResponse;
use crate::catalog::client::CatalogClient;
use crate::debounce::debouncer::Debouncer;
use crate::debounce::scheduler::Scheduler;
use crate::view::render::ViewRenderer;
use crate::widget::types::{Effect, Event, FetchOutcome, RequestToken, WidgetState};
use crate::widget::update::update;

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Per-session knobs.
#[derive(Clone)]
pub struct WidgetSettings {
    pub renderer: Arc<ViewRenderer>,
    pub debounce_delay: Duration,
}

/// Cloneable front door to a running widget task.
///
/// The task stops once every handle is dropped.
#[derive(Clone)]
pub struct WidgetHandle {
    events: mpsc::UnboundedSender<Event>,
    view: watch::Receiver<ViewResponse>,
}

impl WidgetHandle {
    /// Queues an event for the widget task.
    pub fn send(&self, event: Event) -> Result<()> {
        self.events
            .send(event)
            .map_err(|_| anyhow::anyhow!("widget session has stopped"))
    }

    pub fn current_view(&self) -> ViewResponse {
        self.view.borrow().clone()
    }

    /// Waits up to `wait` for a view newer than `since`, then returns whatever is current.
    pub async fn view_after(&self, since: u64, wait: Duration) -> ViewResponse {
        let mut view = self.view.clone();
        let timed_out = tokio::time::timeout(wait, view.wait_for(|v| v.version > since))
            .await
            .is_err();
        if timed_out {
            tracing::trace!("No view change after version {} within {:?}", since, wait);
        }
        let current = view.borrow().clone();
        current
    }
}

struct WidgetTask<S: Scheduler> {
    state: WidgetState,
    client: Arc<dyn CatalogClient>,
    debouncer: Debouncer<S>,
    renderer: Arc<ViewRenderer>,
    inbox: mpsc::WeakUnboundedSender<Event>,
    view: watch::Sender<ViewResponse>,
}

/// Starts a widget task and returns its handle and join handle.
///
/// Must be called from within a tokio runtime.
pub fn spawn_widget<S>(
    client: Arc<dyn CatalogClient>,
    scheduler: S,
    settings: WidgetSettings,
) -> (WidgetHandle, JoinHandle<()>)
where
    S: Scheduler + 'static,
{
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let state = WidgetState::new();
    let html = settings.renderer.render_widget(&state).unwrap_or_else(|e| {
        tracing::error!("Failed to render initial view: {:#}", e);
        String::new()
    });
    let (view_tx, view_rx) = watch::channel(ViewResponse { version: 0, html });

    let task = WidgetTask {
        state,
        client,
        debouncer: Debouncer::new(scheduler, settings.debounce_delay),
        renderer: settings.renderer,
        inbox: events_tx.downgrade(),
        view: view_tx,
    };
    let join = tokio::spawn(task.run(events_rx));

    (
        WidgetHandle {
            events: events_tx,
            view: view_rx,
        },
        join,
    )
}

impl<S: Scheduler> WidgetTask<S> {
    async fn run(mut self, mut events: mpsc::UnboundedReceiver<Event>) {
        while let Some(event) = events.recv().await {
            for effect in update(&mut self.state, event) {
                self.apply(effect);
            }
            self.publish();
        }

        tracing::debug!("Widget task stopped");
        // Dropping self cancels any pending debounce.
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::ScheduleCommit { epoch } => {
                let inbox = self.inbox.clone();
                self.debouncer.trigger(move || {
                    if let Some(events) = inbox.upgrade() {
                        let _ = events.send(Event::DebounceElapsed { epoch });
                    }
                });
            }
            Effect::Fetch(token) => self.spawn_fetch(token),
        }
    }

    fn spawn_fetch(&self, token: RequestToken) {
        tracing::info!(
            "Searching '{}' page {} (request #{})",
            token.query,
            token.page,
            token.generation
        );

        let client = self.client.clone();
        let inbox = self.inbox.clone();

        tokio::spawn(async move {
            let outcome = match client.fetch_page(token.query.clone(), token.page).await {
                Ok(page) => FetchOutcome::Page(page),
                Err(e) => {
                    tracing::warn!(
                        "Search '{}' page {} failed: {:#}",
                        token.query,
                        token.page,
                        e
                    );
                    FetchOutcome::Failed
                }
            };

            match inbox.upgrade() {
                Some(events) => {
                    let _ = events.send(Event::FetchCompleted { token, outcome });
                }
                None => {
                    tracing::trace!("Session closed before request #{} finished", token.generation);
                }
            }
        });
    }

    /// Re-renders and bumps the version only if the markup changed.
    fn publish(&self) {
        let html = match self.renderer.render_widget(&self.state) {
            Ok(html) => html,
            Err(e) => {
                tracing::error!("Failed to render view: {:#}", e);
                return;
            }
        };
        self.view.send_if_modified(|current| {
            if current.html == html {
                return false;
            }
            current.version += 1;
            current.html = html;
            true
        });
    }
}
