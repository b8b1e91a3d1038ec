//! Combine remote M3U playlists into one playlist grouped by category.
//!
//! Each configured source is fetched, its channels are regrouped by
//! `#EXTGRP` directives and `group-title` attributes, and the result is
//! written as one block per source under a shared EPG header.

pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod sources;
pub mod utils;
