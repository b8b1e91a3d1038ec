//! Playlist data model shared by the grouper, the combiner and the writer.

use indexmap::IndexMap;

/// Group assigned to channels when neither a directive nor an inline
/// attribute names one.
pub const UNGROUPED: &str = "Ungrouped";

/// One channel as it appeared in the source playlist.
///
/// Both lines are kept verbatim so the combined output reproduces the
/// source's metadata exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelEntry {
    info_line: String,
    stream_url: String,
}

impl ChannelEntry {
    pub fn new(info_line: impl Into<String>, stream_url: impl Into<String>) -> Self {
        Self {
            info_line: info_line.into(),
            stream_url: stream_url.into(),
        }
    }

    /// The `#EXTINF` line carrying name, logo and attributes
    pub fn info_line(&self) -> &str {
        &self.info_line
    }

    /// The locator line that followed the info line
    pub fn stream_url(&self) -> &str {
        &self.stream_url
    }
}

/// Channels of a single playlist bucketed by group.
///
/// Groups iterate in the order they were first seen in the source text and
/// channels keep their source order within a group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistGroups {
    groups: IndexMap<String, Vec<ChannelEntry>>,
}

impl PlaylistGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a channel to `group`, creating the group on first sight
    pub fn push(&mut self, group: &str, entry: ChannelEntry) {
        match self.groups.get_mut(group) {
            Some(channels) => channels.push(entry),
            None => {
                self.groups.insert(group.to_string(), vec![entry]);
            }
        }
    }

    pub fn get(&self, group: &str) -> Option<&[ChannelEntry]> {
        self.groups.get(group).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ChannelEntry])> {
        self.groups
            .iter()
            .map(|(name, channels)| (name.as_str(), channels.as_slice()))
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn channel_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// A configured playlist source and the label shown for it in the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDescriptor {
    pub url: String,
    pub display_name: String,
}

/// A fetched and grouped source, ready to be rendered.
#[derive(Debug, Clone)]
pub struct SourceBlock {
    pub source: SourceDescriptor,
    pub groups: PlaylistGroups,
}

/// A source that contributed nothing, and why
#[derive(Debug, Clone)]
pub struct SkippedSource {
    pub url: String,
    pub reason: String,
}

/// Outcome of one combine run
#[derive(Debug, Clone, Default)]
pub struct CombineReport {
    pub sources_configured: usize,
    pub sources_added: Vec<String>,
    pub sources_skipped: Vec<SkippedSource>,
    pub total_groups: usize,
    pub total_channels: usize,
}

impl CombineReport {
    pub fn has_failures(&self) -> bool {
        !self.sources_skipped.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_keep_first_seen_order() {
        let mut groups = PlaylistGroups::new();
        groups.push("News", ChannelEntry::new("#EXTINF:-1,A", "http://x/a"));
        groups.push("Sports", ChannelEntry::new("#EXTINF:-1,B", "http://x/b"));
        groups.push("News", ChannelEntry::new("#EXTINF:-1,C", "http://x/c"));

        let names: Vec<_> = groups.group_names().collect();
        assert_eq!(names, vec!["News", "Sports"]);
        assert_eq!(groups.group_count(), 2);
        assert_eq!(groups.channel_count(), 3);

        let news = groups.get("News").unwrap();
        assert_eq!(news[0].info_line(), "#EXTINF:-1,A");
        assert_eq!(news[1].stream_url(), "http://x/c");
    }

    #[test]
    fn test_empty_groups() {
        let groups = PlaylistGroups::new();
        assert!(groups.is_empty());
        assert_eq!(groups.channel_count(), 0);
        assert!(groups.get("Ungrouped").is_none());
    }
}
