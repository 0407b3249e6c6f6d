//! Top-level orchestration: feed list -> fetch -> parse -> filter -> write.
//!
//! Failures scoped to one feed are logged and skipped; only a missing feed
//! list or a run that produces zero stories is fatal. Progress goes to
//! stdout, diagnostics go through `tracing`.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Utc;
use tracing::{error, info, warn};

use crate::blacklist::Blacklist;
use crate::config::{self, Config, ConfigError};
use crate::fetcher::Fetcher;
use crate::parser::{self, Story};
use crate::render;
use crate::slug;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("failed to render page: {0}")]
    Render(#[from] askama::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("no stories were written")]
    NoStories,
}

pub struct RunSummary {
    pub stories_written: usize,
    pub index_file: PathBuf,
}

/// Run the whole pipeline once. Feeds are processed sequentially in
/// feed-list order; the used-filenames set and the accumulated story list
/// live here and are threaded through each step.
pub async fn run(config: &Config) -> Result<RunSummary, PipelineError> {
    let blacklist = Blacklist::new(config.blacklist.iter().cloned());
    let feed_urls = config::read_feed_urls(&config.feeds_file, &blacklist)?;
    info!("processing {} feeds from {}", feed_urls.len(), config.feeds_file.display());

    let stories_dir = config.output_dir.join("stories");
    fs::create_dir_all(&stories_dir)?;

    let fetcher = Fetcher::new(&config.user_agent, Duration::from_secs(config.timeout_secs))?;

    let mut used_names: HashSet<String> = HashSet::new();
    let mut stories: Vec<Story> = Vec::new();

    for url in &feed_urls {
        println!("--- BEGIN FEED: {url} ---");
        process_feed(
            &fetcher,
            url,
            &blacklist,
            &stories_dir,
            &mut used_names,
            &mut stories,
        )
        .await?;
        println!("--- END FEED: {url} ---\n");
    }

    if stories.is_empty() {
        return Err(PipelineError::NoStories);
    }

    let index_file = config.output_dir.join("index.html");
    let index_html = render::render_index(&stories, Utc::now().timestamp())?;
    fs::write(&index_file, index_html)?;

    Ok(RunSummary {
        stories_written: stories.len(),
        index_file,
    })
}

/// Fetch and process one feed. Fetch and parse failures are logged and turn
/// into an early `Ok` so the run continues with the next feed; filesystem
/// and render errors still propagate.
async fn process_feed(
    fetcher: &Fetcher,
    url: &str,
    blacklist: &Blacklist,
    stories_dir: &Path,
    used_names: &mut HashSet<String>,
    stories: &mut Vec<Story>,
) -> Result<(), PipelineError> {
    let body = match fetcher.fetch(url).await {
        Ok(body) => body,
        Err(err) => {
            error!("failed to fetch {url}: {err}");
            return Ok(());
        }
    };

    let parsed = match parser::parse_feed(&body) {
        Ok(parsed) => parsed,
        Err(err) => {
            error!("failed to parse {url}: {err}");
            return Ok(());
        }
    };

    if parsed.stories.is_empty() {
        println!("No stories found in feed.");
        return Ok(());
    }

    for mut story in parsed.stories {
        if let Some(link) = story.link.as_deref() {
            if blacklist.matches_link(link) {
                warn!(
                    "skipping story {:?} from blacklisted domain {link}",
                    story.title
                );
                continue;
            }
        }

        story.file_name = slug::unique_file_name(&story.title, used_names);
        let page = render::render_story(&story)?;
        fs::write(stories_dir.join(&story.file_name), page)?;

        println!("Title: {}", story.title);
        println!(
            "Link: {}\n",
            story.link.as_deref().unwrap_or("No link available")
        );
        stories.push(story);
    }

    Ok(())
}
