//! Services that drive a combine run
//!
//! [`PlaylistCombiner`] orchestrates fetching and grouping;
//! [`PlaylistWriter`] turns the grouped sources into the output file.

pub mod playlist_combiner;
pub mod playlist_writer;

pub use playlist_combiner::PlaylistCombiner;
pub use playlist_writer::PlaylistWriter;
