use super::{
    is_valid_application_id,
    launcher::{ApplicationLauncher, LaunchError},
    roster::PlayerRoster,
    types::{ChooserRequest, PackageInfo},
};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, warn};

type Opener = Box<dyn Fn(&str) -> std::io::Result<()> + Send + Sync>;

/// Desktop launcher. The roster acts as the application registry: ids map to
/// executables looked up on `PATH`. The chooser is resolved without user
/// interaction by starting the highest-priority player that starts, falling
/// back to the platform's default opener.
pub struct SystemLauncher {
    roster: PlayerRoster,
    opener: Opener,
}

impl SystemLauncher {
    pub fn new(roster: PlayerRoster) -> Self {
        Self {
            roster,
            opener: Box::new(|url: &str| open::that_detached(url)),
        }
    }

    #[cfg(test)]
    fn with_opener(roster: PlayerRoster, opener: Opener) -> Self {
        Self { roster, opener }
    }

    fn spawn_detached(program: &Path, url: &str) -> Result<(), LaunchError> {
        debug!("Spawning {} {}", program.display(), url);

        Command::new(program)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        Ok(())
    }

    fn start_default_opener(&self, url: &str) -> Result<(), LaunchError> {
        info!("Opening {} with the default handler", url);

        (self.opener)(url).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => LaunchError::NoHandler,
            _ => LaunchError::Spawn(e),
        })
    }
}

#[async_trait]
impl ApplicationLauncher for SystemLauncher {
    fn name(&self) -> &'static str {
        "system"
    }

    async fn resolve_and_start(&self, chooser: &ChooserRequest) -> Result<(), LaunchError> {
        let target = &chooser.primary.target;
        let url = match target.url() {
            Some(url) => url.as_str().to_string(),
            None => return Err(LaunchError::MalformedUri(target.to_string())),
        };

        debug!("{}", chooser.prompt);

        for candidate in &chooser.alternatives {
            let Some(id) = candidate.pinned_application_id.as_deref() else {
                continue;
            };

            let package = match self.query_package(id).await {
                Ok(package) => package,
                Err(e) => {
                    warn!("Pinned player {} disappeared: {}", id, e);
                    continue;
                }
            };

            match Self::spawn_detached(Path::new(&package.location), &url) {
                Ok(()) => {
                    info!("Started {} for {}", id, url);
                    return Ok(());
                }
                Err(e) => warn!("Failed to start {}: {}", id, e),
            }
        }

        self.start_default_opener(&url)
    }

    async fn query_package(&self, package_id: &str) -> Result<PackageInfo, LaunchError> {
        let not_found = || LaunchError::NotFound(package_id.to_string());

        if !is_valid_application_id(package_id) {
            return Err(not_found());
        }

        let entry = self.roster.find(package_id).ok_or_else(not_found)?;
        let executable = entry.executable.as_deref().unwrap_or(package_id);

        which::which(executable)
            .map(|path| PackageInfo {
                id: package_id.to_string(),
                location: path.display().to_string(),
            })
            .map_err(|e| {
                debug!("{} ({}) not found: {}", package_id, executable, e);
                not_found()
            })
    }
}
