use crate::catalog::types::{SearchResultItem, SearchResultPage};

/// The only failure text ever shown to the user.
pub const FAILURE_MESSAGE: &str = "Something went wrong while searching. Please try again.";

/// Outcome of the most recent authoritative fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestStatus {
    /// No query; nothing fetched.
    Idle,
    /// A fetch for the current (query, page) is in flight.
    Loading,
    Success,
    Failure { message: String },
}

/// Identifies one fetch attempt.
///
/// The generation alone is unique per session; query and page are carried so
/// the completion can be checked against what the user currently wants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestToken {
    pub generation: u64,
    pub query: String,
    pub page: u32,
}

/// What a fetch produced, as seen by the state machine.
///
/// Failures carry no detail: it is logged at the transport boundary and never rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Page(SearchResultPage),
    Failed,
}

/// Inputs to the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The text box now holds this text.
    ///
    /// `seq` increases with every keystroke on the page; an input older than the
    /// last one applied is dropped.
    InputChanged { text: String, seq: u64 },
    /// The debounce timer scheduled for this input epoch elapsed.
    DebounceElapsed { epoch: u64 },
    PreviousPage,
    NextPage,
    FetchCompleted {
        token: RequestToken,
        outcome: FetchOutcome,
    },
    /// Open the detail overlay for the record with this key.
    Select { key: String },
    CloseDetail,
}

/// Side effects requested by a transition, carried out by the owning task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Restart the quiet-period timer; deliver `DebounceElapsed { epoch }` when it fires.
    ScheduleCommit { epoch: u64 },
    /// Fetch the page described by the token; deliver `FetchCompleted` when done.
    Fetch(RequestToken),
}

/// Complete UI state of one widget instance.
#[derive(Debug, Clone)]
pub struct WidgetState {
    /// Text as typed, updated per keystroke.
    pub raw_query: String,
    /// Trimmed query actually searched for; only changes on a debounce commit.
    pub effective_query: String,
    /// Bumped on every applied keystroke.
    pub input_epoch: u64,
    /// Sequence number of the last applied keystroke.
    pub input_seq: u64,
    /// 1-based current page.
    pub page: u32,
    pub results: Vec<SearchResultItem>,
    /// Matches for the whole query, not just this page.
    pub total: u64,
    pub status: RequestStatus,
    /// Key of the record shown in the detail overlay.
    pub selected: Option<String>,
    /// The one fetch whose completion will be applied.
    pub in_flight: Option<RequestToken>,
    pub(crate) next_generation: u64,
}

impl Default for WidgetState {
    fn default() -> Self {
        Self {
            raw_query: String::new(),
            effective_query: String::new(),
            input_epoch: 0,
            input_seq: 0,
            page: 1,
            results: Vec::new(),
            total: 0,
            status: RequestStatus::Idle,
            selected: None,
            in_flight: None,
            next_generation: 1,
        }
    }
}

impl WidgetState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.status == RequestStatus::Loading
    }

    pub fn has_query(&self) -> bool {
        !self.effective_query.is_empty()
    }

    pub fn total_pages(&self) -> u32 {
        super::pagination::total_pages(self.total, super::pagination::PAGE_SIZE)
    }

    /// The selected record, looked up in the current results.
    ///
    /// Resolves to `None` if the record is no longer on the page, so a selection never dangles.
    pub fn selected_item(&self) -> Option<&SearchResultItem> {
        let key = self.selected.as_ref()?;
        self.results.iter().find(|item| &item.key == key)
    }
}
