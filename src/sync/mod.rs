pub mod controller;
pub mod fetcher;
pub mod mutation;
pub mod query;

pub use controller::{FetchOutcome, SyncController, ViewState};
pub use fetcher::ResourceFetcher;
pub use mutation::MutationPipeline;
pub use query::{Filter, QueryDescriptor};
