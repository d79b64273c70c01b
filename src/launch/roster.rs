use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Embedded roster of known players, in priority order.
const EMBEDDED_ROSTER: &str = include_str!("../../data/players.toml");

/// A known media player offered as a pinned chooser candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerEntry {
    /// Application identifier the candidate is pinned to.
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Binary the desktop launcher runs for this id.
    #[serde(default)]
    pub executable: Option<String>,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct RosterFile {
    #[serde(rename = "player", default)]
    players: Vec<PlayerEntry>,
}

#[derive(Debug, Clone, Default)]
pub struct PlayerRoster {
    players: Vec<PlayerEntry>,
}

impl PlayerRoster {
    pub fn new(players: Vec<PlayerEntry>) -> Self {
        Self { players }
    }

    pub fn embedded() -> Result<Self> {
        Self::from_toml(EMBEDDED_ROSTER).context("Embedded player roster is invalid")
    }

    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let file: RosterFile = toml::from_str(toml_str)?;
        Ok(Self::new(file.players))
    }

    /// Merge user entries into this roster.
    /// Entries with a matching id replace the existing one in place; new ids
    /// are appended after the built-in players.
    pub fn merge(&mut self, entries: &[PlayerEntry]) {
        for entry in entries {
            if let Some(existing) = self.players.iter_mut().find(|p| p.id == entry.id) {
                *existing = entry.clone();
            } else {
                self.players.push(entry.clone());
            }
        }
    }

    pub fn enabled(&self) -> impl Iterator<Item = &PlayerEntry> {
        self.players.iter().filter(|p| p.enabled)
    }

    pub fn find(&self, id: &str) -> Option<&PlayerEntry> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str) -> PlayerEntry {
        PlayerEntry {
            id: id.to_string(),
            name: id.to_string(),
            executable: None,
            enabled: true,
        }
    }

    #[test]
    fn test_embedded_roster_order() {
        let roster = PlayerRoster::embedded().unwrap();
        let ids: Vec<&str> = roster.enabled().map(|p| p.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "org.videolan.vlc",
                "com.mxtech.videoplayer.ad",
                "org.acestream.media"
            ]
        );
        assert_eq!(
            roster.find("org.videolan.vlc").unwrap().executable.as_deref(),
            Some("vlc")
        );
    }

    #[test]
    fn test_merge_replaces_and_appends() {
        let mut roster = PlayerRoster::embedded().unwrap();
        let mut vlc = entry("org.videolan.vlc");
        vlc.executable = Some("/opt/vlc/bin/vlc".to_string());
        roster.merge(&[vlc, entry("is.xyz.mpv")]);

        assert_eq!(roster.len(), 4);
        let ids: Vec<&str> = roster.enabled().map(|p| p.id.as_str()).collect();
        assert_eq!(ids[0], "org.videolan.vlc");
        assert_eq!(ids[3], "is.xyz.mpv");
        assert_eq!(
            roster.find("org.videolan.vlc").unwrap().executable.as_deref(),
            Some("/opt/vlc/bin/vlc")
        );
    }

    #[test]
    fn test_disabled_entries_skipped() {
        let roster = PlayerRoster::from_toml(
            r#"
            [[player]]
            id = "a.b"
            enabled = false

            [[player]]
            id = "c.d"
            "#,
        )
        .unwrap();
        let ids: Vec<&str> = roster.enabled().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["c.d"]);
    }
}
