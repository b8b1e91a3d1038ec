/// Configuration default values
///
/// This module contains all the default values for configuration options,
/// making them easily changeable in one central location.
// Sources
pub const DEFAULT_SOURCES: &[&str] = &[
    "https://raw.githubusercontent.com/BuddyChewChew/My-Streams/refs/heads/main/Backup.m3u",
    "https://raw.githubusercontent.com/BuddyChewChew/My-Streams/refs/heads/main/TheTVApp.m3u8",
    "https://raw.githubusercontent.com/BuddyChewChew/buddylive/refs/heads/main/en/videoall.m3u",
    "https://world-proxifier.xyz/streamed/playlist?timezone=et",
];

// EPG defaults
pub const DEFAULT_EPG_URL: &str =
    "https://github.com/BuddyChewChew/My-Streams/raw/refs/heads/main/epgs/Backup-epg.xml.gz";

// Output defaults
pub const DEFAULT_OUTPUT_PATH: &str = "combined_playlist.m3u";

// HTTP defaults
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_FETCH_CONCURRENCY: usize = 1;

// Config file
pub const DEFAULT_CONFIG_FILE: &str = "combiner.toml";
