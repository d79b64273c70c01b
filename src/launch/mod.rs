mod launcher;
mod roster;
mod system;
mod types;

pub use launcher::{ApplicationLauncher, LaunchError};
pub use roster::{PlayerEntry, PlayerRoster};
pub use system::SystemLauncher;
pub use types::{ChooserRequest, LaunchFlag, LaunchRequest, Uri, DEFAULT_PROMPT};

#[cfg(test)]
pub use launcher::fake::FakeLauncher;

use thiserror::Error;
use tracing::{debug, info, warn};

/// Why a single pinned candidate was left out of the chooser.
#[derive(Debug, Error)]
pub enum CandidateError {
    #[error("Invalid application id: {0:?}")]
    InvalidId(String),
    #[error("Duplicate application id: {0}")]
    Duplicate(String),
    #[error("{id} is not available: {source}")]
    Unresolvable {
        id: String,
        #[source]
        source: LaunchError,
    },
}

pub struct LaunchResolver {
    launcher: Box<dyn ApplicationLauncher>,
    roster: PlayerRoster,
    prompt: String,
}

impl LaunchResolver {
    pub fn new(launcher: Box<dyn ApplicationLauncher>, roster: PlayerRoster, prompt: &str) -> Self {
        info!(
            "Launch resolver initialized - {} launcher with {} known players",
            launcher.name(),
            roster.len()
        );

        Self {
            launcher,
            roster,
            prompt: prompt.to_string(),
        }
    }

    /// Open `url` through a chooser. Returns `true` when the OS accepted the
    /// request, `false` on any launch failure.
    pub async fn launch(&self, url: &str) -> bool {
        match self.launch_detailed(url).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to launch {}: {}", url, e);
                false
            }
        }
    }

    /// Same as [`launch`](Self::launch) but keeps the failure kind.
    pub async fn launch_detailed(&self, url: &str) -> Result<(), LaunchError> {
        let chooser = self.build_chooser(url).await;

        info!(
            "Starting chooser for {} with {} pinned players: {:?}",
            url,
            chooser.alternatives.len(),
            chooser.pinned_ids()
        );

        self.launcher.resolve_and_start(&chooser).await
    }

    pub async fn build_chooser(&self, url: &str) -> ChooserRequest {
        let target = Uri::parse(url);
        let primary = LaunchRequest::generic(target.clone());
        let alternatives = self.build_candidates(&target).await;

        ChooserRequest::new(primary, alternatives, &self.prompt)
    }

    /// Build pinned candidates in roster order. A failed candidate is skipped
    /// and never affects the others.
    async fn build_candidates(&self, target: &Uri) -> Vec<LaunchRequest> {
        let mut candidates = Vec::new();
        for entry in self.roster.enabled() {
            match self.build_candidate(target, entry, &candidates).await {
                Ok(request) => candidates.push(request),
                Err(e) => debug!("Skipping candidate: {}", e),
            }
        }
        candidates
    }

    async fn build_candidate(
        &self,
        target: &Uri,
        entry: &PlayerEntry,
        accepted: &[LaunchRequest],
    ) -> Result<LaunchRequest, CandidateError> {
        if !is_valid_application_id(&entry.id) {
            return Err(CandidateError::InvalidId(entry.id.clone()));
        }

        if accepted
            .iter()
            .any(|c| c.pinned_application_id.as_deref() == Some(entry.id.as_str()))
        {
            return Err(CandidateError::Duplicate(entry.id.clone()));
        }

        self.launcher
            .query_package(&entry.id)
            .await
            .map_err(|source| CandidateError::Unresolvable {
                id: entry.id.clone(),
                source,
            })?;

        Ok(LaunchRequest::pinned(target.clone(), &entry.id))
    }

    pub async fn is_installed(&self, package_id: &str) -> bool {
        match self.launcher.query_package(package_id).await {
            Ok(info) => {
                debug!("{} is installed at {}", info.id, info.location);
                true
            }
            Err(e) => {
                debug!("{} is not installed: {}", package_id, e);
                false
            }
        }
    }
}

fn is_valid_application_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VLC: &str = "org.videolan.vlc";
    const MX: &str = "com.mxtech.videoplayer.ad";
    const ACE: &str = "org.acestream.media";

    fn resolver(launcher: &FakeLauncher) -> LaunchResolver {
        LaunchResolver::new(
            Box::new(launcher.clone()),
            PlayerRoster::embedded().unwrap(),
            DEFAULT_PROMPT,
        )
    }

    fn entry(id: &str) -> PlayerEntry {
        PlayerEntry {
            id: id.to_string(),
            name: String::new(),
            executable: None,
            enabled: true,
        }
    }

    #[tokio::test]
    async fn test_launch_without_pinned_players() {
        let launcher = FakeLauncher::new(&[]);
        let resolver = resolver(&launcher);

        assert!(resolver.launch("https://example.com/video.mp4").await);

        let started = launcher.started();
        assert_eq!(started.len(), 1);
        let chooser = &started[0];
        assert!(chooser.alternatives.is_empty());
        assert_eq!(chooser.prompt, DEFAULT_PROMPT);
        assert_eq!(chooser.primary.media_type_hint, "video/mp4");
        assert_eq!(chooser.primary.target.as_str(), "https://example.com/video.mp4");
        assert!(chooser.flags.contains(&LaunchFlag::NewTask));
    }

    #[tokio::test]
    async fn test_alternatives_follow_roster_order() {
        // Installed set is given out of order on purpose.
        let launcher = FakeLauncher::new(&[ACE, VLC]);
        let resolver = resolver(&launcher);

        let chooser = resolver.build_chooser("https://example.com/video.mp4").await;
        assert_eq!(chooser.pinned_ids(), vec![VLC, ACE]);
        assert!(chooser.primary.pinned_application_id.is_none());
        assert!(!chooser.alternatives.contains(&chooser.primary));
        for alt in &chooser.alternatives {
            assert_eq!(alt.media_type_hint, "video/*");
            assert!(alt.has_flag(LaunchFlag::NewTask));
        }
    }

    #[tokio::test]
    async fn test_all_players_installed() {
        let launcher = FakeLauncher::new(&[VLC, MX, ACE]);
        let resolver = resolver(&launcher);

        assert!(resolver.launch("https://example.com/stream.m3u8").await);
        assert_eq!(launcher.started()[0].pinned_ids(), vec![VLC, MX, ACE]);
    }

    #[tokio::test]
    async fn test_bad_candidates_do_not_abort() {
        let launcher = FakeLauncher::new(&[VLC, MX, "bad id"]);
        let roster = PlayerRoster::new(vec![
            entry("bad id"),
            entry(VLC),
            entry(""),
            entry(VLC),
            entry("not.installed"),
            entry(MX),
        ]);
        let resolver = LaunchResolver::new(Box::new(launcher.clone()), roster, "Pick");

        let chooser = resolver.build_chooser("https://example.com/video.mp4").await;
        assert_eq!(chooser.pinned_ids(), vec![VLC, MX]);
        assert_eq!(chooser.prompt, "Pick");
        // Invalid and duplicate ids never reach the registry.
        assert_eq!(launcher.query_count(), 3);
    }

    #[tokio::test]
    async fn test_malformed_uri_returns_false() {
        let launcher = FakeLauncher::new(&[VLC]);
        let resolver = resolver(&launcher);

        assert!(!resolver.launch("not a valid uri").await);
        // The chooser was still built and handed over.
        assert_eq!(launcher.started().len(), 1);

        let err = resolver.launch_detailed("not a valid uri").await.unwrap_err();
        assert!(matches!(err, LaunchError::MalformedUri(_)));
    }

    #[tokio::test]
    async fn test_rejected_launch_returns_false() {
        let launcher = FakeLauncher::rejecting(&[]);
        let resolver = resolver(&launcher);

        assert!(!resolver.launch("https://example.com/video.mp4").await);
    }

    #[tokio::test]
    async fn test_is_installed() {
        let launcher = FakeLauncher::new(&[VLC]);
        let resolver = resolver(&launcher);

        assert!(resolver.is_installed(VLC).await);
        assert!(!resolver.is_installed("com.example.missing").await);
    }

    #[test]
    fn test_application_id_validation() {
        assert!(is_valid_application_id("org.videolan.vlc"));
        assert!(is_valid_application_id("my-player_2"));
        assert!(!is_valid_application_id(""));
        assert!(!is_valid_application_id("has space"));
        assert!(!is_valid_application_id("semi;colon"));
    }
}
