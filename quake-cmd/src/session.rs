//! Wiring the stores to a feed source for one command invocation.

use crate::{FilterArgs, SourceArgs};
use anyhow::{anyhow, bail};
use log::info;
use quake_core::config::SourceConfig;
use quake_core::error::FetchError;
use quake_core::http::HttpSource;
use quake_core::record::EarthquakeRecord;
use quake_core::source::{CsvTextSource, RecordSource};
use quake_store::bridge::SelectionContext;
use quake_store::dataset::{DatasetHandle, DatasetStore};
use quake_store::focus::FocusHandle;

/// The feed source picked on the command line.
pub enum FeedSource {
    Http(HttpSource),
    Local(CsvTextSource),
}

impl RecordSource for FeedSource {
    async fn fetch_records(&self) -> Result<Vec<EarthquakeRecord>, FetchError> {
        match self {
            FeedSource::Http(source) => source.fetch_records().await,
            FeedSource::Local(source) => source.fetch_records().await,
        }
    }

    fn describe(&self) -> String {
        match self {
            FeedSource::Http(source) => source.describe(),
            FeedSource::Local(source) => source.describe(),
        }
    }
}

impl SourceArgs {
    pub fn build(&self) -> anyhow::Result<FeedSource> {
        if let Some(path) = &self.file {
            return Ok(FeedSource::Local(CsvTextSource::File(path.clone())));
        }
        let config = SourceConfig {
            url: self.url.clone(),
            timeout_secs: self.timeout_secs,
        };
        Ok(FeedSource::Http(HttpSource::new(config)?))
    }
}

/// Fetch from the configured source, then page and filter.
pub async fn open(
    args: &SourceArgs,
    page: usize,
    filters: &FilterArgs,
) -> anyhow::Result<SelectionContext> {
    let source = args.build()?;
    open_with(&source, page, filters).await
}

/// Wire fresh stores, fetch once from `source`, move to the zero-based
/// `page` and apply `filters` to it.
pub async fn open_with<S: RecordSource>(
    source: &S,
    page: usize,
    filters: &FilterArgs,
) -> anyhow::Result<SelectionContext> {
    let dataset = DatasetHandle::new(DatasetStore::new());
    let ctx = SelectionContext::builder()
        .dataset(dataset.clone())
        .focus(FocusHandle::default())
        .build()?;

    dataset.fetch(page.saturating_add(1), source).await;
    if let Some(message) = dataset.read().error() {
        bail!("{}", message);
    }

    dataset.set_page(page);
    let patch = filters.to_patch();
    if !patch.is_empty() {
        dataset.set_filters(patch);
    }
    {
        let store = dataset.read();
        info!(
            "Page {} of {}: {} records, {} after filters",
            page,
            store.page_summary().page_count,
            store.page_slice().len(),
            store.filtered_view().len()
        );
    }
    Ok(ctx)
}

fn find_on_page(ctx: &SelectionContext, id: &str) -> anyhow::Result<EarthquakeRecord> {
    let store = ctx.dataset().read();
    store.find_on_page(id).cloned().ok_or_else(|| {
        anyhow!(
            "No record with id {} on page {} (0-based)",
            id,
            store.page_index().saturating_sub(1)
        )
    })
}

/// Persist and emphasize the record with `id` on the current page.
pub fn click_by_id(ctx: &SelectionContext, id: &str) -> anyhow::Result<()> {
    let record = find_on_page(ctx, id)?;
    ctx.click(&record);
    Ok(())
}

/// Emphasize the record with `id` on the current page without selecting it.
pub fn hover_by_id(ctx: &SelectionContext, id: &str) -> anyhow::Result<()> {
    let record = find_on_page(ctx, id)?;
    ctx.hover(Some(&record));
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn feed(count: usize) -> CsvTextSource {
        let mut text = String::from("time,latitude,longitude,depth,mag,id,place,type,status\n");
        for i in 0..count {
            text.push_str(&format!(
                "2024-05-{:02}T00:00:00.000Z,{},{},{},{},ev{},\"{} km N of Town{}, CA\",earthquake,reviewed\n",
                (i % 28) + 1,
                i,
                -(i as i64),
                i * 10,
                i as f64 / 2.0,
                i,
                i,
                i
            ));
        }
        CsvTextSource::Text(text)
    }

    #[tokio::test]
    async fn test_open_with_moves_to_page_and_filters() {
        let filters = FilterArgs {
            min_mag: Some(6.0),
            ..FilterArgs::default()
        };
        let ctx = open_with(&feed(25), 1, &filters).await.unwrap();
        let store = ctx.dataset().read();
        assert_eq!(store.total_items(), 25);
        assert_eq!(store.page_slice()[0].id, "ev10");
        let ids: Vec<&str> = store.filtered_view().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["ev12", "ev13", "ev14", "ev15", "ev16", "ev17", "ev18", "ev19"]);
    }

    #[tokio::test]
    async fn test_open_with_reports_fetch_error() {
        let missing = CsvTextSource::File("missing/feed.csv".into());
        let err = open_with(&missing, 0, &FilterArgs::default())
            .await
            .err()
            .unwrap();
        assert!(err.to_string().starts_with("Failed to read feed file"));
    }

    #[tokio::test]
    async fn test_open_with_huge_page_is_empty() {
        let ctx = open_with(&feed(25), usize::MAX, &FilterArgs::default())
            .await
            .unwrap();
        let store = ctx.dataset().read();
        assert_eq!(store.total_items(), 25);
        assert!(store.page_slice().is_empty());
        assert!(store.filtered_view().is_empty());
    }

    #[tokio::test]
    async fn test_click_and_hover_by_id() {
        let ctx = open_with(&feed(25), 0, &FilterArgs::default()).await.unwrap();
        click_by_id(&ctx, "ev3").unwrap();
        hover_by_id(&ctx, "ev5").unwrap();
        assert_eq!(ctx.selected().unwrap().id, "ev3");
        assert_eq!(ctx.highlighted_id().as_deref(), Some("ev5"));

        let err = click_by_id(&ctx, "ev13").unwrap_err();
        assert_eq!(err.to_string(), "No record with id ev13 on page 0 (0-based)");
        assert_eq!(ctx.selected().unwrap().id, "ev3");
    }

    #[test]
    fn test_build_prefers_file() {
        let args = SourceArgs {
            url: "http://localhost:9/feed.csv".to_string(),
            file: Some("local.csv".into()),
            timeout_secs: 5,
        };
        assert!(matches!(args.build().unwrap(), FeedSource::Local(_)));

        let args = SourceArgs {
            file: None,
            ..args
        };
        match args.build().unwrap() {
            FeedSource::Http(source) => assert_eq!(source.config().timeout_secs, 5),
            FeedSource::Local(_) => panic!("expected http source"),
        }
    }
}
