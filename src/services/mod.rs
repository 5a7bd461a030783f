pub mod commit_host;
pub mod generation;
pub mod publisher;

pub use commit_host::{CommitHostService, MAX_TOTAL_COMMITS};
pub use generation::GenerationService;
pub use publisher::PublisherService;
