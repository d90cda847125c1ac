use crate::feed::{CatalogResult, FeedSource, fetch_pictures};
use chrono::{DateTime, Months, Utc};
use gallery_config::FilterKind;
use shared::{LoadingEvent, LoadingState, PictureRecord, PictureSequence, empty_sequence};
use std::{ops::Range, time::Duration};
use tokio::sync::watch;
use tracing::{debug, error};

/// Infinite-scroll trigger: the bottom of the grid has scrolled into view.
pub fn should_load_more(container_height: f64, viewport_height: f64, scroll_y: f64) -> bool {
    container_height <= viewport_height + scroll_y
}

/// The in-memory picture list behind the grid and the overlay.
///
/// Every time the filtered sequence is rebuilt it is published on a
/// [`watch`] channel so the overlay can pick up the new sequence.
#[derive(Debug)]
pub struct PictureCatalog {
    pictures: Vec<PictureRecord>,
    filtered: PictureSequence,
    active_filter: FilterKind,
    page_size: usize,
    rendered_pages: usize,
    state: LoadingState,
    reference_time: Option<DateTime<Utc>>,
    changes: watch::Sender<PictureSequence>,
}

impl PictureCatalog {
    pub fn new(page_size: usize, active_filter: FilterKind) -> Self {
        Self {
            pictures: Vec::new(),
            filtered: empty_sequence(),
            active_filter,
            page_size: page_size.max(1),
            rendered_pages: 0,
            state: LoadingState::default(),
            reference_time: None,
            changes: watch::Sender::new(empty_sequence()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<PictureSequence> {
        self.changes.subscribe()
    }

    pub fn state(&self) -> &LoadingState {
        &self.state
    }

    pub fn active_filter(&self) -> FilterKind {
        self.active_filter
    }

    pub fn filtered(&self) -> PictureSequence {
        self.filtered.clone()
    }

    pub fn len(&self) -> usize {
        self.filtered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }

    /// Pins "now" for the `New` filter. Without it the wall clock is used.
    pub fn set_reference_time(&mut self, now: DateTime<Utc>) {
        self.reference_time = Some(now);
    }

    /// Loads the feed and applies the active filter, or records the failure.
    ///
    /// Failures are left in [`LoadingState::Error`]; nothing is retried.
    pub async fn load(&mut self, source: &FeedSource, timeout: Duration) -> CatalogResult<()> {
        self.transition(LoadingEvent::StartLoading);

        match fetch_pictures(source, timeout).await {
            Ok(pictures) => {
                self.replace_pictures(pictures);
                Ok(())
            }
            Err(err) => {
                error!("Failed to load pictures from {source}: {err}");
                self.transition(LoadingEvent::LoadError(err.to_string()));
                Err(err)
            }
        }
    }

    /// Moves a failed catalog back to loading. Returns `false`, leaving the
    /// state untouched, unless the last load failed.
    pub fn request_retry(&mut self) -> bool {
        let failed = self.state.is_error();
        self.transition(LoadingEvent::RetryRequested);
        failed
    }

    fn transition(&mut self, event: LoadingEvent) {
        self.state = event.apply_to_state(std::mem::take(&mut self.state));
        debug!("Catalog state: {}", self.state);
    }

    pub fn replace_pictures(&mut self, pictures: Vec<PictureRecord>) {
        self.pictures = pictures;
        self.transition(LoadingEvent::LoadComplete);
        self.set_active_filter(self.active_filter, true);
    }

    /// Rebuilds the filtered sequence. Re-selecting the active filter is a
    /// no-op unless `force` is set.
    pub fn set_active_filter(&mut self, filter: FilterKind, force: bool) -> bool {
        if self.active_filter == filter && !force {
            return false;
        }

        let now = self.reference_time.unwrap_or_else(Utc::now);
        self.filtered = apply_filter(&self.pictures, filter, now).into();
        self.active_filter = filter;
        self.rendered_pages = 0;

        debug!(
            "Filter {filter} selected {} of {} pictures",
            self.filtered.len(),
            self.pictures.len()
        );
        self.changes.send_replace(self.filtered.clone());
        true
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_count(&self) -> usize {
        self.filtered.len().div_ceil(self.page_size)
    }

    pub fn rendered_pages(&self) -> usize {
        self.rendered_pages
    }

    /// Index range of page `page` within the filtered sequence.
    pub fn page_range(&self, page: usize) -> Range<usize> {
        let start = page.saturating_mul(self.page_size).min(self.filtered.len());
        let end = start.saturating_add(self.page_size).min(self.filtered.len());
        start..end
    }

    pub fn page(&self, page: usize) -> &[PictureRecord] {
        &self.filtered[self.page_range(page)]
    }

    /// Marks the next page as rendered and returns its index range.
    pub fn next_page(&mut self) -> Option<Range<usize>> {
        if self.rendered_pages >= self.page_count() {
            return None;
        }

        let range = self.page_range(self.rendered_pages);
        self.rendered_pages += 1;
        Some(range)
    }

    pub fn load_more_if_needed(
        &mut self,
        container_height: f64,
        viewport_height: f64,
        scroll_y: f64,
    ) -> Option<Range<usize>> {
        if should_load_more(container_height, viewport_height, scroll_y) {
            self.next_page()
        } else {
            None
        }
    }
}

fn apply_filter(
    pictures: &[PictureRecord],
    filter: FilterKind,
    now: DateTime<Utc>,
) -> Vec<PictureRecord> {
    match filter {
        FilterKind::Popular => pictures.to_vec(),
        FilterKind::New => {
            let cutoff = now
                .checked_sub_months(Months::new(3))
                .unwrap_or(DateTime::<Utc>::MIN_UTC);

            let mut recent: Vec<(DateTime<Utc>, &PictureRecord)> = pictures
                .iter()
                .filter_map(|record| record.published_at().map(|date| (date, record)))
                .filter(|(date, _)| *date > cutoff)
                .collect();
            recent.sort_by(|a, b| b.0.cmp(&a.0));

            recent.into_iter().map(|(_, record)| record.clone()).collect()
        }
        FilterKind::Discussed => {
            let mut discussed = pictures.to_vec();
            discussed.sort_by(|a, b| b.comments.cmp(&a.comments));
            discussed
        }
    }
}
