//! Git integration for remote roots
//!
//! Remote repositories are fetched with the system `git` client rather than a
//! linked library, so the only requirement is a `git` executable on `PATH`.

pub mod remote;

pub use remote::{RemoteOperations, is_github_url};
