//! Playlist combining service
//!
//! Runs every configured source through fetch, naming and grouping, then
//! renders and writes the combined playlist. A source that cannot be fetched
//! is logged and skipped; it never aborts the run.

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::errors::{AppResult, SourceResult};
use crate::models::{CombineReport, SkippedSource, SourceBlock, SourceDescriptor};
use crate::services::playlist_writer::PlaylistWriter;
use crate::sources::group_source;
use crate::utils::DecompressingHttpClient;
use crate::utils::url::UrlUtils;

/// What happened to one configured source
#[derive(Debug)]
enum SourceOutcome {
    Added(SourceBlock),
    Skipped(SkippedSource),
}

pub struct PlaylistCombiner<C> {
    client: C,
    config: Config,
}

impl<C: DecompressingHttpClient> PlaylistCombiner<C> {
    pub fn new(client: C, config: Config) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetch and group every source, in configured order.
    ///
    /// Up to `http.fetch_concurrency` sources are in flight at once; results
    /// are still yielded in configured order.
    pub async fn collect(&self) -> (Vec<SourceBlock>, CombineReport) {
        let sources = &self.config.sources;
        let concurrency = self.config.http.fetch_concurrency.max(1);

        info!("Starting to combine {} playlists", sources.len());

        let outcomes: Vec<SourceOutcome> = stream::iter(sources.iter())
            .map(|url| self.process_source(url))
            .buffered(concurrency)
            .collect()
            .await;

        let mut report = CombineReport {
            sources_configured: sources.len(),
            ..CombineReport::default()
        };
        let mut blocks = Vec::with_capacity(outcomes.len());

        for outcome in outcomes {
            match outcome {
                SourceOutcome::Added(block) => {
                    report.total_groups += block.groups.group_count();
                    report.total_channels += block.groups.channel_count();
                    report.sources_added.push(block.source.display_name.clone());
                    blocks.push(block);
                }
                SourceOutcome::Skipped(skipped) => report.sources_skipped.push(skipped),
            }
        }

        (blocks, report)
    }

    /// Collect all sources and render the combined playlist for `generated_at`
    pub async fn combine(&self, generated_at: DateTime<Utc>) -> (String, CombineReport) {
        let (blocks, report) = self.collect().await;
        let content = PlaylistWriter::render(&self.config.epg.url, generated_at, &blocks);
        (content, report)
    }

    /// Combine all sources and write the result to the configured output path
    pub async fn run(&self) -> AppResult<CombineReport> {
        let (content, report) = self.combine(Utc::now()).await;
        let output_path = &self.config.output.path;

        PlaylistWriter::write_atomic(output_path, &content).await?;

        info!(
            "Combined playlist saved as '{}' ({} of {} sources, {} groups, {} channels)",
            output_path.display(),
            report.sources_added.len(),
            report.sources_configured,
            report.total_groups,
            report.total_channels
        );
        info!("EPG URL: {}", self.config.epg.url);

        Ok(report)
    }

    async fn process_source(&self, url: &str) -> SourceOutcome {
        let display_url = UrlUtils::obfuscate_credentials(url);
        info!("Processing: {}", display_url);

        let content: SourceResult<String> = match UrlUtils::parse_source_url(url) {
            Ok(_) => self.client.fetch_text(url).await,
            Err(e) => Err(e),
        };
        let content = match content {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to fetch {}: {}", display_url, e);
                return SourceOutcome::Skipped(SkippedSource {
                    url: display_url,
                    reason: e.to_string(),
                });
            }
        };

        let Some(groups) = group_source(Some(&content)) else {
            warn!("Playlist {} is empty, skipping", display_url);
            return SourceOutcome::Skipped(SkippedSource {
                url: display_url,
                reason: "playlist is empty".to_string(),
            });
        };

        let source = SourceDescriptor::from_url(url);
        info!(
            "Added: {} with {} groups ({} channels)",
            source.display_name,
            groups.group_count(),
            groups.channel_count()
        );
        debug!(
            "Groups for {}: {:?}",
            source.display_name,
            groups.group_names().collect::<Vec<_>>()
        );

        SourceOutcome::Added(SourceBlock { source, groups })
    }
}
