//! M3U playlist grouping
//!
//! Re-buckets the channels of one playlist by group while keeping every
//! `#EXTINF` line and its stream URL exactly as received.
//!
//! Two line kinds drive the grouping:
//! - `#EXTGRP:<name>` sets the ambient group for every following channel.
//! - `#EXTINF...` starts a channel. A `group-title="..."` attribute on the line
//!   overrides the ambient group for that channel only.
//!
//! Everything else (the `#EXTM3U` header, comments, blank lines, stray URLs)
//! is skipped. Parsing never fails.

use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, trace};

use crate::models::{ChannelEntry, PlaylistGroups, UNGROUPED};

/// Standalone group directive
pub const GROUP_DIRECTIVE: &str = "#EXTGRP:";

/// Channel info line
pub const CHANNEL_INFO: &str = "#EXTINF";

/// Any line starting with this is a directive or comment, never a stream URL
pub const DIRECTIVE_MARKER: char = '#';

fn group_title_attribute() -> &'static Regex {
    static GROUP_TITLE: OnceLock<Regex> = OnceLock::new();
    GROUP_TITLE.get_or_init(|| {
        Regex::new(r#"group-title="([^"]*)""#).expect("group-title pattern is valid")
    })
}

/// Extract the inline group of a channel info line.
///
/// Returns `None` when the line has no `group-title` attribute. Values listing
/// several categories (`"Sports,Live"`) keep the first one; an empty value
/// resolves to [`UNGROUPED`].
pub fn inline_group(info_line: &str) -> Option<String> {
    let captures = group_title_attribute().captures(info_line)?;
    let value = captures.get(1).map_or("", |m| m.as_str());
    let first = value.split(',').next().unwrap_or("").trim();

    Some(if first.is_empty() {
        UNGROUPED.to_string()
    } else {
        first.to_string()
    })
}

/// Result of feeding one position of the playlist to [`GroupingState::step`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Lines consumed: 2 when a channel was emitted, otherwise 1
    pub consumed: usize,
    /// Group and channel completed by this step, if any
    pub emitted: Option<(String, ChannelEntry)>,
}

impl Step {
    fn skip() -> Self {
        Self {
            consumed: 1,
            emitted: None,
        }
    }
}

/// Scan state carried between lines: the ambient group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupingState {
    ambient: String,
}

impl Default for GroupingState {
    fn default() -> Self {
        Self {
            ambient: UNGROUPED.to_string(),
        }
    }
}

impl GroupingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ambient_group(&self) -> &str {
        &self.ambient
    }

    /// Consume `line` (and `next` when it completes a channel).
    ///
    /// Inline `group-title` values only apply to their own channel; the
    /// ambient group changes only on `#EXTGRP:`.
    pub fn step(&mut self, line: &str, next: Option<&str>) -> Step {
        if let Some(group) = line.strip_prefix(GROUP_DIRECTIVE) {
            let group = group.trim();
            self.ambient = if group.is_empty() {
                UNGROUPED.to_string()
            } else {
                group.to_string()
            };
            return Step::skip();
        }

        if !line.starts_with(CHANNEL_INFO) {
            return Step::skip();
        }

        match next {
            Some(url) if !url.starts_with(DIRECTIVE_MARKER) => {
                let group = inline_group(line).unwrap_or_else(|| self.ambient.clone());
                Step {
                    consumed: 2,
                    emitted: Some((group, ChannelEntry::new(line, url))),
                }
            }
            _ => {
                trace!("Dropping channel info without stream URL: {}", line);
                Step::skip()
            }
        }
    }
}

/// Group an already split playlist.
pub fn group_lines<S: AsRef<str>>(lines: &[S]) -> PlaylistGroups {
    let mut state = GroupingState::new();
    let mut groups = PlaylistGroups::new();
    let mut index = 0;

    while index < lines.len() {
        let line = lines[index].as_ref();
        let next: Option<&str> = lines.get(index + 1).map(|next| next.as_ref());

        let step = state.step(line, next);
        if let Some((group, entry)) = step.emitted {
            groups.push(&group, entry);
        }
        index += step.consumed;
    }

    debug!(
        "Grouped {} channels into {} groups from {} lines",
        groups.channel_count(),
        groups.group_count(),
        lines.len()
    );
    groups
}

/// Split playlist text into lines.
///
/// `\r\n`, `\n` and a bare `\r` all end a line. A trailing line break does
/// not produce an extra empty line.
pub fn split_lines(content: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = content;

    while !rest.is_empty() {
        match rest.find(['\r', '\n']) {
            Some(pos) => {
                lines.push(&rest[..pos]);
                let break_len = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[pos + break_len..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }

    lines
}

/// Group the text of one playlist.
pub fn group_playlist(content: &str) -> PlaylistGroups {
    group_lines(&split_lines(content))
}

/// Group the text of a source that may not have been retrieved.
///
/// Absent content and content without any lines contribute nothing and yield
/// `None`.
pub fn group_source(content: Option<&str>) -> Option<PlaylistGroups> {
    let content = content?;
    let lines = split_lines(content);
    if lines.is_empty() {
        return None;
    }
    Some(group_lines(&lines))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn channels(groups: &PlaylistGroups, group: &str) -> Vec<(String, String)> {
        groups
            .get(group)
            .unwrap_or_default()
            .iter()
            .map(|c| (c.info_line().to_string(), c.stream_url().to_string()))
            .collect()
    }

    #[test]
    fn test_inline_attribute_and_ambient_directive() {
        let lines = [
            "#EXTINF:-1 group-title=\"Sports\",Channel A",
            "http://x/a.ts",
            "#EXTGRP:News",
            "#EXTINF:-1,Channel B",
            "http://x/b.ts",
        ];

        let groups = group_lines(&lines);

        assert_eq!(groups.group_names().collect::<Vec<_>>(), vec!["Sports", "News"]);
        assert_eq!(
            channels(&groups, "Sports"),
            vec![(lines[0].to_string(), "http://x/a.ts".to_string())]
        );
        assert_eq!(
            channels(&groups, "News"),
            vec![(lines[3].to_string(), "http://x/b.ts".to_string())]
        );
    }

    #[test]
    fn test_inline_group_does_not_become_ambient() {
        let lines = [
            "#EXTGRP:Movies",
            "#EXTINF:-1 group-title=\"Sports\",A",
            "http://x/a",
            "#EXTINF:-1,B",
            "http://x/b",
        ];

        let groups = group_lines(&lines);

        assert_eq!(channels(&groups, "Sports").len(), 1);
        assert_eq!(channels(&groups, "Movies")[0].1, "http://x/b");
    }

    #[test]
    fn test_ambient_group_is_sticky() {
        let lines = [
            "#EXTM3U",
            "#EXTGRP:Kids",
            "#EXTINF:-1,A",
            "http://x/a",
            "#EXTINF:-1,B",
            "http://x/b",
            "#EXTGRP: Docs ",
            "#EXTINF:-1,C",
            "http://x/c",
        ];

        let groups = group_lines(&lines);

        assert_eq!(groups.group_names().collect::<Vec<_>>(), vec!["Kids", "Docs"]);
        assert_eq!(channels(&groups, "Kids").len(), 2);
        assert_eq!(channels(&groups, "Docs").len(), 1);
    }

    #[test]
    fn test_channels_without_any_group_are_ungrouped() {
        let groups = group_playlist("#EXTM3U\n#EXTINF:-1,A\nhttp://x/a\n");
        assert_eq!(channels(&groups, UNGROUPED).len(), 1);
    }

    #[test]
    fn test_directive_alone_creates_no_group() {
        let groups = group_lines(&["#EXTGRP:News"]);
        assert!(groups.is_empty());
    }

    #[test]
    fn test_empty_inline_group_resolves_to_sentinel() {
        let groups = group_lines(&["#EXTINF:-1 group-title=\"\",A", "http://x/a"]);
        assert_eq!(groups.group_names().collect::<Vec<_>>(), vec![UNGROUPED]);
    }

    #[test]
    fn test_empty_directive_resolves_to_sentinel() {
        let groups = group_lines(&["#EXTGRP:   ", "#EXTINF:-1,A", "http://x/a"]);
        assert_eq!(groups.group_names().collect::<Vec<_>>(), vec![UNGROUPED]);
    }

    #[test]
    fn test_dangling_info_line_at_end_is_dropped() {
        let groups = group_lines(&["#EXTINF:-1,A", "http://x/a", "#EXTINF:-1,B"]);
        assert_eq!(groups.channel_count(), 1);
    }

    #[test]
    fn test_info_line_followed_by_directive_is_dropped() {
        let lines = [
            "#EXTINF:-1,A",
            "#EXTVLCOPT:http-user-agent=Mozilla",
            "#EXTINF:-1 group-title=\"Live\",B",
            "http://x/b",
        ];

        let groups = group_lines(&lines);

        assert_eq!(groups.channel_count(), 1);
        assert_eq!(channels(&groups, "Live")[0].0, lines[2]);
    }

    #[test]
    fn test_info_line_followed_by_info_line_resumes_there() {
        let lines = ["#EXTINF:-1,A", "#EXTINF:-1,B", "http://x/b"];
        let groups = group_lines(&lines);
        assert_eq!(channels(&groups, UNGROUPED), vec![(lines[1].to_string(), lines[2].to_string())]);
    }

    #[test]
    fn test_stray_urls_and_blank_lines_are_ignored() {
        let content = "#EXTM3U\n\nhttp://orphan/stream\n# comment\n#EXTINF:-1,A\nhttp://x/a\n";
        let groups = group_playlist(content);
        assert_eq!(groups.channel_count(), 1);
    }

    #[test]
    fn test_blank_line_counts_as_stream_locator() {
        // Only `#` lines disqualify the follower; a blank line is taken verbatim.
        let groups = group_lines(&["#EXTINF:-1,A", "", "http://x/a"]);
        assert_eq!(channels(&groups, UNGROUPED), vec![("#EXTINF:-1,A".to_string(), String::new())]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let groups = group_playlist("#EXTM3U\r\n#EXTGRP:News\r\n#EXTINF:-1,A\r\nhttp://x/a\r\n");
        assert_eq!(channels(&groups, "News"), vec![("#EXTINF:-1,A".to_string(), "http://x/a".to_string())]);
    }

    #[test]
    fn test_cr_only_line_endings() {
        let groups = group_playlist("#EXTM3U\r#EXTGRP:News\r#EXTINF:-1,A\rhttp://x/a\r");
        assert_eq!(groups.channel_count(), 1);
        assert_eq!(channels(&groups, "News"), vec![("#EXTINF:-1,A".to_string(), "http://x/a".to_string())]);
    }

    #[rstest]
    #[case("", vec![])]
    #[case("\n", vec![""])]
    #[case("a\r\nb\rc\nd", vec!["a", "b", "c", "d"])]
    #[case("a\r\r\nb\n", vec!["a", "", "b"])]
    fn test_split_lines(#[case] content: &str, #[case] expected: Vec<&str>) {
        assert_eq!(split_lines(content), expected);
    }

    #[test]
    fn test_grouping_is_idempotent() {
        let content = "#EXTINF:-1 group-title=\"A\",1\nu1\n#EXTGRP:B\n#EXTINF:-1,2\nu2\n#EXTINF:-1\n";
        assert_eq!(group_playlist(content), group_playlist(content));
    }

    #[test]
    fn test_group_source_absent_or_empty() {
        assert!(group_source(None).is_none());
        assert!(group_source(Some("")).is_none());

        let groups = group_source(Some("#EXTM3U\n")).unwrap();
        assert!(groups.is_empty());
    }

    #[rstest]
    #[case("#EXTINF:-1 tvg-id=\"a\" group-title=\"Sports\",A", Some("Sports"))]
    #[case("#EXTINF:-1 group-title=\"  Padded  \",A", Some("Padded"))]
    #[case("#EXTINF:-1 group-title=\"Sports,Live\",A", Some("Sports"))]
    #[case("#EXTINF:-1 group-title=\"\",A", Some(UNGROUPED))]
    #[case("#EXTINF:-1 group-title=\" , Live\",A", Some(UNGROUPED))]
    #[case("#EXTINF:-1 tvg-name=\"x\",A", None)]
    #[case("#EXTINF:-1,A", None)]
    fn test_inline_group(#[case] line: &str, #[case] expected: Option<&str>) {
        assert_eq!(inline_group(line).as_deref(), expected);
    }

    #[test]
    fn test_step_reports_consumed_lines() {
        let mut state = GroupingState::new();

        let step = state.step("#EXTGRP:News", Some("#EXTINF:-1,A"));
        assert_eq!(step, Step { consumed: 1, emitted: None });
        assert_eq!(state.ambient_group(), "News");

        let step = state.step("#EXTINF:-1,A", Some("http://x/a"));
        assert_eq!(step.consumed, 2);
        assert_eq!(
            step.emitted,
            Some(("News".to_string(), ChannelEntry::new("#EXTINF:-1,A", "http://x/a")))
        );

        let step = state.step("#EXTINF:-1,B", None);
        assert_eq!(step, Step { consumed: 1, emitted: None });
    }
}
