//! Widget Module Tests
//!
//! Exercises the state machine without any rendering surface or network.
//!
//! ## Test Scopes
//! - **Pagination**: page count derivation and bounded navigation.
//! - **Query commit**: trimming, page reset, empty-query handling, stale debounce expiries.
//! - **Fetch ordering**: late responses never overwrite newer state.
//! - **Selection**: opening, closing, and clearing on page changes.
//! - **Debounce wiring**: keystrokes through a real `Debouncer` on a virtual clock.

#[cfg(test)]
mod tests {
    use crate::catalog::types::{SearchResultItem, SearchResultPage};
    use crate::debounce::debouncer::{Debouncer, DEBOUNCE_DELAY};
    use crate::debounce::manual::ManualScheduler;
    use crate::widget::pagination::{
        has_next, has_previous, next_page, previous_page, total_pages, PAGE_SIZE,
    };
    use crate::widget::types::*;
    use crate::widget::update::update;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn dune() -> SearchResultItem {
        SearchResultItem {
            title: Some("Dune".to_string()),
            author_name: vec!["Frank Herbert".to_string()],
            first_publish_year: Some(1965),
            ..SearchResultItem::bare("/works/OL1")
        }
    }

    fn page_of(keys: &[&str], total: u64) -> FetchOutcome {
        FetchOutcome::Page(SearchResultPage {
            items: keys.iter().map(|k| SearchResultItem::bare(k)).collect(),
            total,
        })
    }

    /// The next keystroke on the page.
    fn typed(state: &WidgetState, text: &str) -> Event {
        Event::InputChanged {
            text: text.to_string(),
            seq: state.input_seq + 1,
        }
    }

    /// Types `text` and lets the debounce timer expire immediately.
    fn commit(state: &mut WidgetState, text: &str) -> Vec<Effect> {
        let event = typed(state, text);
        update(state, event);
        let epoch = state.input_epoch;
        update(state, Event::DebounceElapsed { epoch })
    }

    fn fetched_token(effects: &[Effect]) -> RequestToken {
        match effects {
            [Effect::Fetch(token)] => token.clone(),
            other => panic!("expected a single fetch, got {:?}", other),
        }
    }

    /// A state showing `query` with `total` matches, resolved on page 1.
    fn loaded(query: &str, keys: &[&str], total: u64) -> WidgetState {
        let mut state = WidgetState::new();
        let token = fetched_token(&commit(&mut state, query));
        update(
            &mut state,
            Event::FetchCompleted {
                token,
                outcome: page_of(keys, total),
            },
        );
        state
    }

    // ============================================================
    // PAGINATION
    // ============================================================

    #[test]
    fn test_total_pages_never_zero() {
        assert_eq!(total_pages(0, PAGE_SIZE), 1);
        assert_eq!(total_pages(1, PAGE_SIZE), 1);
        assert_eq!(total_pages(20, PAGE_SIZE), 1);
        assert_eq!(total_pages(21, PAGE_SIZE), 2);
        assert_eq!(total_pages(45, PAGE_SIZE), 3);
    }

    #[test]
    fn test_navigation_is_bounded() {
        let pages = total_pages(45, PAGE_SIZE);

        assert_eq!(next_page(3, pages), 3);
        assert_eq!(next_page(2, pages), 3);
        assert_eq!(previous_page(1), 1);
        assert_eq!(previous_page(2), 1);
        assert!(!has_next(3, pages));
        assert!(!has_previous(1));
        assert!(has_next(1, pages) && has_previous(2));
    }

    #[test]
    fn test_zero_matches_makes_both_directions_inert() {
        let mut state = loaded("zzzz", &[], 0);

        assert_eq!(state.total_pages(), 1);
        assert!(update(&mut state, Event::NextPage).is_empty());
        assert!(update(&mut state, Event::PreviousPage).is_empty());
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_next_page_stops_at_last_page() {
        let mut state = loaded("foo", &["/works/a"], 45);

        let token = fetched_token(&update(&mut state, Event::NextPage));
        update(&mut state, Event::FetchCompleted { token, outcome: page_of(&["/works/b"], 45) });
        let token = fetched_token(&update(&mut state, Event::NextPage));
        update(&mut state, Event::FetchCompleted { token, outcome: page_of(&["/works/c"], 45) });

        assert_eq!(state.page, 3);
        assert!(update(&mut state, Event::NextPage).is_empty());
        assert_eq!(state.page, 3);
    }

    // ============================================================
    // QUERY COMMIT
    // ============================================================

    #[test]
    fn test_keystroke_updates_raw_query_only() {
        let mut state = WidgetState::new();

        let event = typed(&state, "Du");
        let effects = update(&mut state, event);

        assert_eq!(effects, vec![Effect::ScheduleCommit { epoch: 1 }]);
        assert_eq!(state.raw_query, "Du");
        assert_eq!(state.effective_query, "");
        assert_eq!(state.status, RequestStatus::Idle);
    }

    #[test]
    fn test_commit_trims_and_fetches_first_page() {
        let mut state = WidgetState::new();

        let token = fetched_token(&commit(&mut state, "  Dune  "));

        assert_eq!(state.effective_query, "Dune");
        assert_eq!(token.query, "Dune");
        assert_eq!(token.page, 1);
        assert_eq!(state.status, RequestStatus::Loading);
    }

    #[test]
    fn test_stale_debounce_expiry_is_ignored() {
        let mut state = WidgetState::new();
        update(&mut state, Event::InputChanged { text: "Du".to_string(), seq: 1 });
        update(&mut state, Event::InputChanged { text: "Dune".to_string(), seq: 2 });

        let effects = update(&mut state, Event::DebounceElapsed { epoch: 1 });

        assert!(effects.is_empty());
        assert_eq!(state.effective_query, "");
    }

    #[test]
    fn test_out_of_order_input_is_dropped() {
        // ARRANGE: "Dune" (#4) reaches the session before "Dun" (#3)
        let mut state = WidgetState::new();
        update(&mut state, Event::InputChanged { text: "Dune".to_string(), seq: 4 });

        // ACT
        let effects = update(&mut state, Event::InputChanged { text: "Dun".to_string(), seq: 3 });
        let epoch = state.input_epoch;
        let token = fetched_token(&update(&mut state, Event::DebounceElapsed { epoch }));

        // ASSERT
        assert!(effects.is_empty());
        assert_eq!(state.raw_query, "Dune");
        assert_eq!(token.query, "Dune");
    }

    #[test]
    fn test_query_change_resets_page_before_fetch() {
        // ARRANGE: sitting on page 2 of "foo"
        let mut state = loaded("foo", &["/works/a"], 45);
        let token = fetched_token(&update(&mut state, Event::NextPage));
        update(&mut state, Event::FetchCompleted { token, outcome: page_of(&["/works/b"], 45) });
        assert_eq!(state.page, 2);

        // ACT
        let token = fetched_token(&commit(&mut state, "bar"));

        // ASSERT
        assert_eq!(state.page, 1);
        assert_eq!(token.page, 1);
        assert_eq!(token.query, "bar");
    }

    #[test]
    fn test_recommitting_same_query_does_not_refetch() {
        let mut state = loaded("Dune", &["/works/OL1"], 1);

        let effects = commit(&mut state, "Dune ");

        assert!(effects.is_empty());
        assert_eq!(state.status, RequestStatus::Success);
    }

    #[test]
    fn test_recommitting_same_query_on_later_page_returns_to_first_page() {
        let mut state = loaded("foo", &["/works/a"], 45);
        let token = fetched_token(&update(&mut state, Event::NextPage));
        update(&mut state, Event::FetchCompleted { token, outcome: page_of(&["/works/b"], 45) });

        let token = fetched_token(&commit(&mut state, " foo"));

        assert_eq!(token.page, 1);
        assert_eq!(state.page, 1);
        assert_eq!(state.total, 45);
    }

    #[test]
    fn test_clearing_query_goes_idle_without_fetch() {
        let mut state = loaded("Dune", &["/works/OL1"], 1);

        let effects = commit(&mut state, "   ");

        assert!(effects.is_empty());
        assert!(state.results.is_empty());
        assert_eq!(state.total, 0);
        assert_eq!(state.status, RequestStatus::Idle);
        assert!(state.in_flight.is_none());
    }

    #[test]
    fn test_clearing_query_while_loading_discards_late_response() {
        let mut state = WidgetState::new();
        let token = fetched_token(&commit(&mut state, "Dune"));
        commit(&mut state, "");

        update(&mut state, Event::FetchCompleted { token, outcome: page_of(&["/works/OL1"], 1) });

        assert!(state.results.is_empty());
        assert_eq!(state.status, RequestStatus::Idle);
    }

    // ============================================================
    // FETCH COMPLETION & ORDERING
    // ============================================================

    #[test]
    fn test_successful_fetch_replaces_results() {
        let mut state = WidgetState::new();
        let token = fetched_token(&commit(&mut state, "Dune"));

        update(
            &mut state,
            Event::FetchCompleted {
                token,
                outcome: FetchOutcome::Page(SearchResultPage { items: vec![dune()], total: 1 }),
            },
        );

        assert_eq!(state.status, RequestStatus::Success);
        assert_eq!(state.results, vec![dune()]);
        assert_eq!(state.total, 1);
        assert_eq!(state.total_pages(), 1);
        assert!(state.in_flight.is_none());
    }

    #[test]
    fn test_late_page_one_does_not_overwrite_page_two() {
        // ARRANGE: on page 2, go back to page 1 and forward again before page 1 answers
        let mut state = loaded("foo", &["/works/a"], 45);
        let token = fetched_token(&update(&mut state, Event::NextPage));
        update(&mut state, Event::FetchCompleted { token, outcome: page_of(&["/works/b"], 45) });
        let page_one = fetched_token(&update(&mut state, Event::PreviousPage));
        let page_two = fetched_token(&update(&mut state, Event::NextPage));

        // ACT: page 2 lands first, page 1 arrives late
        update(&mut state, Event::FetchCompleted { token: page_two, outcome: page_of(&["/works/p2"], 45) });
        update(&mut state, Event::FetchCompleted { token: page_one, outcome: page_of(&["/works/p1"], 45) });

        // ASSERT
        assert_eq!(state.page, 2);
        assert_eq!(state.results[0].key, "/works/p2");
        assert_eq!(state.status, RequestStatus::Success);
    }

    #[test]
    fn test_superseded_request_for_same_page_is_ignored() {
        // foo p1 -> p2 -> p1 again: only the newest p1 request may land
        let mut state = loaded("foo", &["/works/a"], 45);
        fetched_token(&update(&mut state, Event::NextPage));
        let newest = fetched_token(&update(&mut state, Event::PreviousPage));
        let older = RequestToken { generation: newest.generation - 2, ..newest.clone() };

        update(&mut state, Event::FetchCompleted { token: older, outcome: page_of(&["/works/old"], 45) });
        assert_eq!(state.status, RequestStatus::Loading);

        update(&mut state, Event::FetchCompleted { token: newest, outcome: page_of(&["/works/new"], 45) });
        assert_eq!(state.results[0].key, "/works/new");
    }

    #[test]
    fn test_failure_sets_static_message_and_clears_results() {
        let mut state = loaded("foo", &["/works/a"], 45);
        let token = fetched_token(&update(&mut state, Event::NextPage));

        update(&mut state, Event::FetchCompleted { token, outcome: FetchOutcome::Failed });

        assert_eq!(
            state.status,
            RequestStatus::Failure { message: FAILURE_MESSAGE.to_string() }
        );
        assert!(state.results.is_empty());
        assert!(state.selected.is_none());
    }

    #[test]
    fn test_failure_on_last_page_keeps_page_within_bounds() {
        // ARRANGE: on page 3 of 45 matches
        let mut state = loaded("foo", &["/works/a"], 45);
        for _ in 0..2 {
            let token = fetched_token(&update(&mut state, Event::NextPage));
            update(&mut state, Event::FetchCompleted { token, outcome: page_of(&["/works/x"], 45) });
        }
        let token = fetched_token(&update(&mut state, Event::PreviousPage));
        update(&mut state, Event::FetchCompleted { token, outcome: page_of(&["/works/y"], 45) });
        let token = fetched_token(&update(&mut state, Event::NextPage));
        assert_eq!(token.page, 3);

        // ACT
        let effects = update(&mut state, Event::FetchCompleted { token, outcome: FetchOutcome::Failed });

        // ASSERT: no automatic retry, and the pager still describes a real page
        assert!(effects.is_empty());
        assert_eq!(state.page, 3);
        assert!(state.page <= state.total_pages());
        assert!(has_previous(state.page));
        assert!(!has_next(state.page, state.total_pages()));

        // retrying by paging works
        let retry = fetched_token(&update(&mut state, Event::PreviousPage));
        assert_eq!(retry.page, 2);
    }

    #[test]
    fn test_new_query_pager_is_inert_until_first_page_lands() {
        // ARRANGE: "foo" has 200 matches
        let mut state = loaded("foo", &["/works/a"], 200);
        assert_eq!(state.total_pages(), 10);

        // ACT
        let bar = fetched_token(&commit(&mut state, "bar"));
        let next_while_loading = update(&mut state, Event::NextPage);

        // ASSERT
        assert_eq!(state.status, RequestStatus::Loading);
        assert!(state.results.is_empty());
        assert_eq!(state.total, 0);
        assert_eq!(state.total_pages(), 1);
        assert!(next_while_loading.is_empty());
        assert_eq!(state.in_flight, Some(bar.clone()));

        // the new query's size arrives and paging opens up
        update(&mut state, Event::FetchCompleted { token: bar, outcome: page_of(&["/works/b"], 45) });
        let token = fetched_token(&update(&mut state, Event::NextPage));
        assert_eq!((token.query.as_str(), token.page), ("bar", 2));
    }

    #[test]
    fn test_shrinking_result_set_clamps_page() {
        // ARRANGE: on page 3 of 45 matches
        let mut state = loaded("foo", &["/works/a"], 45);
        for _ in 0..2 {
            let token = fetched_token(&update(&mut state, Event::NextPage));
            update(&mut state, Event::FetchCompleted { token, outcome: page_of(&["/works/x"], 45) });
        }
        assert_eq!(state.page, 3);

        // ACT: back on page 2, the catalog now reports only 10 matches
        let token = fetched_token(&update(&mut state, Event::PreviousPage));
        let effects = update(&mut state, Event::FetchCompleted { token, outcome: page_of(&[], 10) });

        // ASSERT: page 2 reports 10 matches -> clamp to 1 and fetch it
        let clamped = fetched_token(&effects);
        assert_eq!(state.page, 1);
        assert_eq!(clamped.page, 1);
        assert_eq!(state.status, RequestStatus::Loading);
    }

    // ============================================================
    // SELECTION
    // ============================================================

    #[test]
    fn test_select_and_close() {
        let mut state = loaded("foo", &["/works/a", "/works/b"], 2);

        update(&mut state, Event::Select { key: "/works/b".to_string() });
        assert_eq!(state.selected_item().map(|i| i.key.as_str()), Some("/works/b"));

        update(&mut state, Event::CloseDetail);
        assert!(state.selected.is_none());
    }

    #[test]
    fn test_select_unknown_key_is_ignored() {
        let mut state = loaded("foo", &["/works/a"], 1);

        update(&mut state, Event::Select { key: "/works/zzz".to_string() });

        assert!(state.selected.is_none());
    }

    #[test]
    fn test_page_change_clears_selection() {
        let mut state = loaded("foo", &["/works/a"], 45);
        update(&mut state, Event::Select { key: "/works/a".to_string() });

        update(&mut state, Event::NextPage);

        assert!(state.selected.is_none());
        assert!(state.selected_item().is_none());
    }

    // ============================================================
    // DEBOUNCE WIRING - virtual clock
    // ============================================================

    #[test]
    fn test_typing_dune_then_waiting_fetches_once() {
        // ARRANGE
        let clock = ManualScheduler::new();
        let mut debouncer = Debouncer::new(clock.clone(), DEBOUNCE_DELAY);
        let mailbox: Arc<Mutex<Vec<Event>>> = Arc::new(Mutex::new(Vec::new()));
        let mut state = WidgetState::new();
        let mut fetches = Vec::new();

        let mut run = |state: &mut WidgetState, debouncer: &mut Debouncer<ManualScheduler>, event| {
            for effect in update(state, event) {
                match effect {
                    Effect::ScheduleCommit { epoch } => {
                        let mailbox = mailbox.clone();
                        debouncer.trigger(move || {
                            mailbox.lock().unwrap().push(Event::DebounceElapsed { epoch })
                        });
                    }
                    Effect::Fetch(token) => fetches.push(token),
                }
            }
        };

        // ACT: four keystrokes 80ms apart, then a 500ms pause
        for (seq, text) in ["D", "Du", "Dun", "Dune"].into_iter().enumerate() {
            let event = Event::InputChanged { text: text.to_string(), seq: seq as u64 + 1 };
            run(&mut state, &mut debouncer, event);
            clock.advance(Duration::from_millis(80));
        }
        clock.advance(Duration::from_millis(420));
        let delivered: Vec<Event> = mailbox.lock().unwrap().drain(..).collect();
        for event in delivered {
            run(&mut state, &mut debouncer, event);
        }

        // ASSERT
        assert_eq!(
            fetches,
            vec![RequestToken { generation: 1, query: "Dune".to_string(), page: 1 }]
        );
        assert_eq!(state.effective_query, "Dune");
    }
}
