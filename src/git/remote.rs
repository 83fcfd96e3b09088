use crate::error::ForgeError;
use regex::Regex;
use std::path::PathBuf;
use std::process::Command;
use std::sync::LazyLock;
use tempfile::TempDir;

/// Prefix of every temporary checkout directory
pub const TEMP_DIR_PREFIX: &str = "contextforge_";

static GITHUB_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://github\.com/([^/]+)/([^/]+)").expect("GitHub URL pattern is valid")
});

/// Check whether a root refers to a GitHub repository rather than a local path
pub fn is_github_url(root: &str) -> bool {
    GITHUB_URL.is_match(root)
}

/// Shallow clones of remote repositories into self-deleting temporary directories
#[derive(Debug, Clone, Default)]
pub struct RemoteOperations {
    git: Option<PathBuf>,
}

impl RemoteOperations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific `git` executable instead of looking one up on `PATH`
    pub fn with_git(git: impl Into<PathBuf>) -> Self {
        Self {
            git: Some(git.into()),
        }
    }

    fn git_executable(&self, repo_url: &str) -> Result<PathBuf, ForgeError> {
        if let Some(git) = &self.git {
            return Ok(git.clone());
        }
        which::which("git").map_err(|e| ForgeError::CloneFailure {
            url: repo_url.to_string(),
            reason: format!("git executable not found: {e}"),
        })
    }

    /// Clone the default branch of `repo_url` at depth 1
    ///
    /// The checkout lives as long as the returned guard and is removed when it drops.
    /// On failure the half-written directory is removed before returning.
    pub fn clone_repository(&self, repo_url: &str) -> Result<TempDir, ForgeError> {
        let git = self.git_executable(repo_url)?;
        let clone_failure = |reason: String| ForgeError::CloneFailure {
            url: repo_url.to_string(),
            reason,
        };

        let checkout = tempfile::Builder::new()
            .prefix(TEMP_DIR_PREFIX)
            .tempdir()
            .map_err(|e| clone_failure(format!("could not create temporary directory: {e}")))?;

        tracing::info!("Cloning {} into {}", repo_url, checkout.path().display());
        let output = Command::new(git)
            .args(["clone", "--depth", "1", "--quiet", repo_url])
            .arg(checkout.path())
            .output()
            .map_err(|e| clone_failure(format!("could not run git: {e}")))?;

        if !output.status.success() {
            let error_msg = String::from_utf8_lossy(&output.stderr);
            return Err(clone_failure(error_msg.trim().to_string()));
        }

        tracing::debug!("Cloned {}", repo_url);
        Ok(checkout)
    }
}
