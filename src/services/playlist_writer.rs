//! Combined playlist rendering and output
//!
//! Layout of the generated file:
//!
//! ```text
//! #EXTM3U x-tvg-url="<epg url>"
//! # Generated on <timestamp> UTC
//!
//! #PLAYLIST:◻️ <source name>
//! #EXTGRP:◻️ <source name>
//!
//! #GROUP:<group>
//! <info line>
//! <stream url>
//!
//!
//! ==================================================
//!
//! ```

use chrono::{DateTime, Utc};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::AppResult;
use crate::models::SourceBlock;

/// Marker prefixed to source names in the per-source header lines
pub const SOURCE_MARKER: &str = "◻️";

/// Width of the `=` rule between source blocks
pub const SEPARATOR_WIDTH: usize = 50;

/// Timestamp layout of the "Generated on" line (UTC, microsecond precision)
pub const GENERATED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Layout used when the timestamp falls on a whole second
pub const GENERATED_AT_WHOLE_SECOND_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub struct PlaylistWriter;

impl PlaylistWriter {
    /// Render the complete combined playlist
    pub fn render(epg_url: &str, generated_at: DateTime<Utc>, blocks: &[SourceBlock]) -> String {
        let mut m3u = Self::render_header(epg_url, generated_at);
        for block in blocks {
            m3u.push_str(&Self::render_source(block));
        }
        m3u
    }

    /// Global header referencing the EPG and the generation time
    pub fn render_header(epg_url: &str, generated_at: DateTime<Utc>) -> String {
        let layout = if generated_at.timestamp_subsec_micros() == 0 {
            GENERATED_AT_WHOLE_SECOND_FORMAT
        } else {
            GENERATED_AT_FORMAT
        };
        format!(
            "#EXTM3U x-tvg-url=\"{}\"\n# Generated on {} UTC\n\n",
            epg_url,
            generated_at.format(layout)
        )
    }

    /// One source: header lines, its groups in first-seen order, then the separator
    pub fn render_source(block: &SourceBlock) -> String {
        let name = &block.source.display_name;
        let mut m3u = format!("#PLAYLIST:{SOURCE_MARKER} {name}\n#EXTGRP:{SOURCE_MARKER} {name}\n\n");

        for (group, channels) in block.groups.iter() {
            m3u.push_str(&format!("#GROUP:{group}\n"));
            for channel in channels {
                m3u.push_str(&format!("{}\n{}\n", channel.info_line(), channel.stream_url()));
            }
            m3u.push('\n');
        }

        m3u.push_str(&format!("\n{}\n\n", "=".repeat(SEPARATOR_WIDTH)));
        m3u
    }

    /// Write `content` to `path` through a temporary sibling file and a rename
    pub async fn write_atomic(path: &Path, content: &str) -> AppResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let temp_path = Self::temp_path(path);
        tokio::fs::write(&temp_path, content).await?;
        tokio::fs::rename(&temp_path, path).await?;

        debug!("Wrote {} bytes to {}", content.len(), path.display());
        Ok(())
    }

    fn temp_path(path: &Path) -> PathBuf {
        let mut temp: OsString = path.as_os_str().to_owned();
        temp.push(".tmp");
        PathBuf::from(temp)
    }
}
