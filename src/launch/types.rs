use std::collections::BTreeSet;
use std::fmt;
use url::Url;

/// Media type every video-capable handler is expected to accept.
pub const GENERIC_MEDIA_TYPE: &str = "video/mp4";

/// Media type used for pinned candidates (any video subtype).
pub const CANDIDATE_MEDIA_TYPE: &str = "video/*";

pub const DEFAULT_PROMPT: &str = "Play with...";

/// A launch target. Parsing never fails; malformed input is kept as-is and
/// only rejected by the launcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uri {
    raw: String,
    parsed: Option<Url>,
}

impl Uri {
    pub fn parse(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            parsed: Url::parse(raw).ok(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn url(&self) -> Option<&Url> {
        self.parsed.as_ref()
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LaunchFlag {
    NewTask,
    DefaultCategory,
}

/// One "open this URI as this media type" instruction, optionally restricted
/// to a single application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub target: Uri,
    pub media_type_hint: String,
    pub pinned_application_id: Option<String>,
    pub flags: BTreeSet<LaunchFlag>,
}

impl LaunchRequest {
    /// The generic request handed to any capable handler.
    pub fn generic(target: Uri) -> Self {
        Self {
            target,
            media_type_hint: GENERIC_MEDIA_TYPE.to_string(),
            pinned_application_id: None,
            flags: BTreeSet::from([LaunchFlag::NewTask, LaunchFlag::DefaultCategory]),
        }
    }

    pub fn pinned(target: Uri, application_id: &str) -> Self {
        Self {
            target,
            media_type_hint: CANDIDATE_MEDIA_TYPE.to_string(),
            pinned_application_id: Some(application_id.to_string()),
            flags: BTreeSet::from([LaunchFlag::NewTask]),
        }
    }

    pub fn has_flag(&self, flag: LaunchFlag) -> bool {
        self.flags.contains(&flag)
    }
}

/// The composite request shown to the user as a single selection prompt.
/// `alternatives` are listed first, in order, ahead of the generic handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChooserRequest {
    pub primary: LaunchRequest,
    pub alternatives: Vec<LaunchRequest>,
    pub prompt: String,
    pub flags: BTreeSet<LaunchFlag>,
}

impl ChooserRequest {
    pub fn new(primary: LaunchRequest, alternatives: Vec<LaunchRequest>, prompt: &str) -> Self {
        Self {
            primary,
            alternatives,
            prompt: prompt.to_string(),
            flags: BTreeSet::from([LaunchFlag::NewTask]),
        }
    }

    pub fn pinned_ids(&self) -> Vec<&str> {
        self.alternatives
            .iter()
            .filter_map(|r| r.pinned_application_id.as_deref())
            .collect()
    }
}

/// Registry metadata returned for an installed application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    pub id: String,
    pub location: String,
}
