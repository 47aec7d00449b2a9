//! Widget transition function.
//!
//! `update` is the only place `WidgetState` changes. It is synchronous and
//! deterministic; the returned effects tell the owner which timers to arm and
//! which pages to fetch.

use super::pagination::{next_page, previous_page};
use super::types::*;

/// Applies `event` to `state` and returns the effects the owner must run.
pub fn update(state: &mut WidgetState, event: Event) -> Vec<Effect> {
    match event {
        Event::InputChanged { text, seq } => {
            if seq <= state.input_seq {
                tracing::debug!(
                    "Dropping out-of-order input #{} (already at #{})",
                    seq,
                    state.input_seq
                );
                return Vec::new();
            }
            state.input_seq = seq;
            state.raw_query = text;
            state.input_epoch += 1;
            vec![Effect::ScheduleCommit {
                epoch: state.input_epoch,
            }]
        }
        Event::DebounceElapsed { epoch } => commit_query(state, epoch),
        Event::PreviousPage => {
            let target = previous_page(state.page);
            go_to_page(state, target)
        }
        Event::NextPage => {
            let target = next_page(state.page, state.total_pages());
            go_to_page(state, target)
        }
        Event::FetchCompleted { token, outcome } => complete_fetch(state, token, outcome),
        Event::Select { key } => {
            if state.results.iter().any(|item| item.key == key) {
                state.selected = Some(key);
            } else {
                tracing::debug!("Ignoring selection of {} (not on current page)", key);
            }
            Vec::new()
        }
        Event::CloseDetail => {
            state.selected = None;
            Vec::new()
        }
    }
}

fn commit_query(state: &mut WidgetState, epoch: u64) -> Vec<Effect> {
    if epoch != state.input_epoch {
        tracing::trace!(
            "Dropping debounce expiry for epoch {} (current {})",
            epoch,
            state.input_epoch
        );
        return Vec::new();
    }

    let committed = state.raw_query.trim().to_string();
    if committed == state.effective_query && state.page == 1 {
        return Vec::new();
    }

    if committed != state.effective_query {
        // Nothing is known about the new query's size until its first page lands.
        state.results.clear();
        state.total = 0;
    }
    state.effective_query = committed;
    state.page = 1;
    request_current_page(state)
}

fn go_to_page(state: &mut WidgetState, target: u32) -> Vec<Effect> {
    if target == state.page {
        return Vec::new();
    }

    state.page = target;
    request_current_page(state)
}

/// Starts (or skips, for an empty query) the fetch for the current (query, page).
///
/// Supersedes any fetch already in flight: its completion will no longer match.
fn request_current_page(state: &mut WidgetState) -> Vec<Effect> {
    state.selected = None;

    if state.effective_query.is_empty() {
        state.results.clear();
        state.total = 0;
        state.status = RequestStatus::Idle;
        state.in_flight = None;
        return Vec::new();
    }

    let token = RequestToken {
        generation: state.next_generation,
        query: state.effective_query.clone(),
        page: state.page,
    };
    state.next_generation += 1;
    state.status = RequestStatus::Loading;
    state.in_flight = Some(token.clone());

    vec![Effect::Fetch(token)]
}

fn complete_fetch(state: &mut WidgetState, token: RequestToken, outcome: FetchOutcome) -> Vec<Effect> {
    let is_current = state.in_flight.as_ref() == Some(&token)
        && token.query == state.effective_query
        && token.page == state.page;

    if !is_current {
        tracing::debug!(
            "Discarding stale response #{} for '{}' page {}",
            token.generation,
            token.query,
            token.page
        );
        return Vec::new();
    }

    state.in_flight = None;

    match outcome {
        FetchOutcome::Page(page) => {
            state.results = page.items;
            state.total = page.total;
            state.status = RequestStatus::Success;

            if state.selected_item().is_none() {
                state.selected = None;
            }

            // The result set shrank under us; land on the last page that exists.
            let last_page = state.total_pages();
            if state.page > last_page {
                state.page = last_page;
                return request_current_page(state);
            }

            Vec::new()
        }
        FetchOutcome::Failed => {
            // Total and page are left alone; the page stays within total pages.
            state.results.clear();
            state.selected = None;
            state.status = RequestStatus::Failure {
                message: FAILURE_MESSAGE.to_string(),
            };
            Vec::new()
        }
    }
}
