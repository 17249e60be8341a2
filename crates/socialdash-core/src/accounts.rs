//! Account submission input handling and collection membership diffs.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::filters::Platform;
use crate::models::AccountId;
use crate::CoreError;

static PROFILE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:https?://)?(?:www\.|m\.)?(tiktok|instagram)\.com/(@?)([A-Za-z0-9._]+)")
        .expect("valid regex")
});

static PREFIXED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(instagram|ig|tiktok|tt):\s*@?([A-Za-z0-9._]+)$").expect("valid regex")
});

static HANDLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@?([A-Za-z0-9._]+)$").expect("valid regex"));

/// Instagram path segments that name a page type rather than a profile.
const INSTAGRAM_RESERVED: &[&str] = &["p", "reel", "reels", "tv", "explore", "stories"];

/// A single account reference typed by the user, classified by platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountInput {
    pub platform: Platform,
    pub username: String,
}

impl AccountInput {
    /// Classifies one line of user input.
    ///
    /// Accepts profile URLs (`https://www.tiktok.com/@user`,
    /// `instagram.com/user/`), platform-prefixed handles (`ig:user`,
    /// `tiktok:@user`), and bare handles with or without `@`, which default to
    /// TikTok. Returns `None` for blank or unrecognised input.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if let Some(caps) = PROFILE_URL.captures(raw) {
            let platform = platform_from_tag(&caps[1])?;
            let has_at = !caps[2].is_empty();
            let username = &caps[3];
            return match platform {
                Platform::TikTok if !has_at => None,
                Platform::Instagram
                    if INSTAGRAM_RESERVED.contains(&username.to_ascii_lowercase().as_str()) =>
                {
                    None
                }
                _ => Some(Self {
                    platform,
                    username: username.to_owned(),
                }),
            };
        }

        if let Some(caps) = PREFIXED.captures(raw) {
            return Some(Self {
                platform: platform_from_tag(&caps[1])?,
                username: caps[2].to_owned(),
            });
        }

        HANDLE.captures(raw).map(|caps| Self {
            platform: Platform::TikTok,
            username: caps[1].to_owned(),
        })
    }
}

fn platform_from_tag(tag: &str) -> Option<Platform> {
    match tag.to_ascii_lowercase().as_str() {
        "tiktok" | "tt" => Some(Platform::TikTok),
        "instagram" | "ig" => Some(Platform::Instagram),
        _ => None,
    }
}

/// Trims each entry and drops blanks, keeping input order.
///
/// The backend classifies the strings itself, so they are sent as typed.
///
/// # Errors
///
/// Returns [`CoreError::EmptySubmission`] when no non-blank entry remains.
pub fn prepare_submission<I, S>(inputs: I) -> Result<Vec<String>, CoreError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let urls: Vec<String> = inputs
        .into_iter()
        .map(|s| s.as_ref().trim().to_owned())
        .filter(|s| !s.is_empty())
        .collect();
    if urls.is_empty() {
        return Err(CoreError::EmptySubmission);
    }
    Ok(urls)
}

/// Changes needed to move a collection from its current members to a new
/// selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MembershipDiff {
    pub to_add: Vec<AccountId>,
    pub to_remove: Vec<AccountId>,
}

impl MembershipDiff {
    /// Both lists come out sorted ascending and free of duplicates.
    #[must_use]
    pub fn between(current: &[AccountId], selected: &[AccountId]) -> Self {
        let current: BTreeSet<AccountId> = current.iter().copied().collect();
        let selected: BTreeSet<AccountId> = selected.iter().copied().collect();
        Self {
            to_add: selected.difference(&current).copied().collect(),
            to_remove: current.difference(&selected).copied().collect(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}
