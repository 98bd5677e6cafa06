use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api::{CourseApi, ListEndpoint, Page};
use crate::error::FetchError;
use crate::models::Course;
use crate::sync::fetcher::ResourceFetcher;
use crate::sync::query::{Filter, QueryDescriptor};

/// What a list view renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub query: QueryDescriptor,
    pub items: Vec<Course>,
    pub total_pages: u32,
    pub loading: bool,
    pub error: Option<String>,
}

impl ViewState {
    fn initial(query: QueryDescriptor) -> Self {
        Self {
            query,
            items: Vec::new(),
            total_pages: 1,
            loading: false,
            error: None,
        }
    }
}

/// How a fetch cycle ended.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The result was the newest and is now in the view state.
    Applied,
    /// The newest fetch failed; `error` is set and `items` kept.
    Failed(FetchError),
    /// A later fetch was issued before this one finished; its result was dropped.
    Superseded,
}

/// Keeps one list view in step with the backend.
///
/// Every fetch gets a sequence number when it is issued. A finished fetch
/// only touches the view state if its number is still the newest, so a
/// slow response for an old query can never overwrite a newer one. The
/// superseded request is left to run; only its effect is suppressed.
/// If the newest cycle's future is dropped mid-request, `loading` is
/// cleared and the previous items stay.
///
/// Each view owns its own controller.
pub struct SyncController {
    fetcher: ResourceFetcher,
    latest: AtomicU64,
    state: watch::Sender<ViewState>,
}

impl SyncController {
    pub fn new(api: Arc<dyn CourseApi>, endpoint: ListEndpoint, query: QueryDescriptor) -> Self {
        Self::with_fetcher(ResourceFetcher::new(api, endpoint), query)
    }

    pub fn with_fetcher(fetcher: ResourceFetcher, query: QueryDescriptor) -> Self {
        let (state, _) = watch::channel(ViewState::initial(query));
        Self {
            fetcher,
            latest: AtomicU64::new(0),
            state,
        }
    }

    pub fn endpoint(&self) -> ListEndpoint {
        self.fetcher.endpoint()
    }

    pub fn snapshot(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub fn query(&self) -> QueryDescriptor {
        self.state.borrow().query.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    /// Change one filter. The page goes back to 1.
    pub async fn set_filter(&self, filter: Filter) -> FetchOutcome {
        self.run_cycle(|query| query.with_filter(filter)).await
    }

    /// Change the page. Filters stay as they are.
    pub async fn set_page(&self, page: u32) -> FetchOutcome {
        self.run_cycle(|query| query.with_page(page)).await
    }

    /// Re-run the current query unchanged, e.g. after a write.
    pub async fn refresh(&self) -> FetchOutcome {
        self.run_cycle(|query| query.clone()).await
    }

    async fn run_cycle<F>(&self, edit: F) -> FetchOutcome
    where
        F: FnOnce(&QueryDescriptor) -> QueryDescriptor,
    {
        let (seq, query) = self.issue(edit);
        debug!("Issuing fetch #{} for {:?}", seq, query);

        let mut pending = PendingFetch {
            controller: self,
            seq,
            settled: false,
        };
        let result = self.fetcher.fetch(&query).await;
        pending.settled = true;
        self.apply(seq, result)
    }

    /// Clear `loading` for a fetch whose future was dropped before it finished.
    /// Items and error are left as they were.
    fn abandon(&self, seq: u64) {
        let cleared = self.state.send_if_modified(|state| {
            if self.latest.load(Ordering::SeqCst) != seq || !state.loading {
                return false;
            }
            state.loading = false;
            true
        });
        if cleared {
            debug!("Fetch #{} abandoned before completion", seq);
        }
    }

    /// Swap in the edited descriptor and allocate its sequence number in one step.
    fn issue<F>(&self, edit: F) -> (u64, QueryDescriptor)
    where
        F: FnOnce(&QueryDescriptor) -> QueryDescriptor,
    {
        let mut issued = (0, QueryDescriptor::default());
        self.state.send_modify(|state| {
            state.query = edit(&state.query);
            state.loading = true;
            let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
            issued = (seq, state.query.clone());
        });
        issued
    }

    fn apply(&self, seq: u64, result: Result<Page<Course>, FetchError>) -> FetchOutcome {
        let mut outcome = FetchOutcome::Superseded;
        let message = self.endpoint().failure_message();
        self.state.send_if_modified(|state| {
            if self.latest.load(Ordering::SeqCst) != seq {
                return false;
            }
            state.loading = false;
            match result {
                Ok(page) => {
                    state.items = page.items;
                    state.total_pages = page.total_pages;
                    state.error = None;
                    outcome = FetchOutcome::Applied;
                }
                Err(err) => {
                    state.error = Some(message.to_string());
                    outcome = FetchOutcome::Failed(err);
                }
            }
            true
        });

        match &outcome {
            FetchOutcome::Applied => {
                info!("Applied fetch #{} from {}", seq, self.endpoint().path());
            }
            FetchOutcome::Failed(err) => {
                warn!(
                    "Fetch #{} from {} failed (transient={}): {}",
                    seq,
                    self.endpoint().path(),
                    err.is_transient(),
                    err
                );
            }
            FetchOutcome::Superseded => {
                debug!("Dropping stale fetch #{}", seq);
            }
        }
        outcome
    }
}

struct PendingFetch<'a> {
    controller: &'a SyncController,
    seq: u64,
    settled: bool,
}

impl Drop for PendingFetch<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.controller.abandon(self.seq);
        }
    }
}
