//! Display names for playlist sources
//!
//! The name is only used as a header annotation in the combined output, so it
//! never fails: anything that produces an empty label falls back to
//! [`UNNAMED_PLAYLIST`].

use regex::Regex;
use std::sync::OnceLock;

use crate::models::SourceDescriptor;

/// Label used when a locator yields no usable name
pub const UNNAMED_PLAYLIST: &str = "Unnamed_Playlist";

fn playlist_extension() -> &'static Regex {
    static EXTENSION: OnceLock<Regex> = OnceLock::new();
    EXTENSION.get_or_init(|| {
        Regex::new(r"(?i)(\.m3u8?|\.txt)$").expect("playlist extension pattern is valid")
    })
}

/// Derive a display name from a source locator.
///
/// Takes the text after the last `/`, strips a trailing `.m3u`, `.m3u8` or
/// `.txt` (any case) and trims whitespace.
///
/// ```rust
/// use m3u_combiner::sources::naming::playlist_display_name;
///
/// assert_eq!(playlist_display_name("https://host/path/My-Streams/Backup.m3u"), "Backup");
/// assert_eq!(playlist_display_name("https://host/feed?x=1"), "feed?x=1");
/// ```
pub fn playlist_display_name(locator: &str) -> String {
    let segment = locator.rsplit('/').next().unwrap_or(locator);
    let name = playlist_extension().replace(segment, "");
    let name = name.trim();

    if name.is_empty() {
        UNNAMED_PLAYLIST.to_string()
    } else {
        name.to_string()
    }
}

impl SourceDescriptor {
    /// Build a descriptor for `url`, deriving its display name
    pub fn from_url(url: impl Into<String>) -> Self {
        let url = url.into();
        let display_name = playlist_display_name(&url);
        Self { url, display_name }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://host/path/My-Streams/Backup.m3u", "Backup")]
    #[case("https://host/path/TheTVApp.m3u8", "TheTVApp")]
    #[case("https://host/en/videoall.M3U", "videoall")]
    #[case("https://host/lists/channels.TXT", "channels")]
    #[case("https://host/feed?x=1", "feed?x=1")]
    #[case("https://world-proxifier.xyz/streamed/playlist?timezone=et", "playlist?timezone=et")]
    #[case("https://host/archive.m3u.gz", "archive.m3u.gz")]
    #[case("plain-name.m3u8", "plain-name")]
    fn test_display_name(#[case] locator: &str, #[case] expected: &str) {
        assert_eq!(playlist_display_name(locator), expected);
    }

    #[rstest]
    #[case("https://host/dir/")]
    #[case("https://host/.m3u")]
    #[case("https://host/   ")]
    #[case("")]
    fn test_display_name_falls_back(#[case] locator: &str) {
        assert_eq!(playlist_display_name(locator), UNNAMED_PLAYLIST);
    }

    #[test]
    fn test_only_trailing_extension_is_stripped() {
        assert_eq!(playlist_display_name("https://host/my.m3u.list"), "my.m3u.list");
        assert_eq!(playlist_display_name("https://host/ spaced .m3u"), "spaced");
    }

    #[test]
    fn test_descriptor_from_url() {
        let source = SourceDescriptor::from_url("https://host/Backup.m3u");
        assert_eq!(source.url, "https://host/Backup.m3u");
        assert_eq!(source.display_name, "Backup");
    }
}
