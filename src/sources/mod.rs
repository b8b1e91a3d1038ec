//! Playlist source handling
//!
//! - [`naming`] derives the label shown for each source in the output.
//! - [`m3u`] regroups the channels of one playlist by category.
//!
//! Both are pure functions of their input; retrieval lives in
//! [`crate::utils::http_client`].

pub mod m3u;
pub mod naming;

pub use m3u::{group_lines, group_playlist, group_source, split_lines, GroupingState};
pub use naming::{playlist_display_name, UNNAMED_PLAYLIST};
