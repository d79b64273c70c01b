use super::types::{ChooserRequest, PackageInfo};
use async_trait::async_trait;
use thiserror::Error;

/// Failure reported by the OS when a chooser cannot be started or an
/// application cannot be found.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("No application can handle the request")]
    NoHandler,
    #[error("Malformed URI: {0}")]
    MalformedUri(String),
    #[error("Application not found: {0}")]
    NotFound(String),
    #[error("Failed to start application: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Access to the platform's activity resolution and application registry.
#[async_trait]
pub trait ApplicationLauncher: Send + Sync {
    /// Human-readable name of the launcher
    fn name(&self) -> &'static str;

    /// Hand the chooser to the OS. Returns once the OS has accepted the
    /// request; it does not wait for the chosen application to open.
    async fn resolve_and_start(&self, chooser: &ChooserRequest) -> Result<(), LaunchError>;

    /// Look up registry metadata for an application id
    async fn query_package(&self, package_id: &str) -> Result<PackageInfo, LaunchError>;
}
