use crate::loader::{ImageLoadError, ImageLoadResult, ImageLoader, LoadedImage};
use shared::PictureRecord;
use std::{collections::HashMap, fmt, sync::Arc, time::Duration};
use tokio::task::{self, AbortHandle, JoinError, JoinSet};
use tracing::{debug, error, warn};

/// How long a thumbnail may stay in the loading state before it is marked failed.
pub const IMAGE_TIMEOUT: Duration = Duration::from_millis(10_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThumbnailHandle(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThumbnailState {
    Loading,
    Loaded(LoadedImage),
    Failed(ImageLoadError),
}

impl ThumbnailState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ThumbnailState::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ThumbnailState::Failed(_))
    }
}

/// A finished load that was applied to a live thumbnail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailUpdate {
    pub handle: ThumbnailHandle,
    pub index: usize,
    pub state: ThumbnailState,
}

/// What the overlay needs to open the clicked picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailClick {
    pub handle: ThumbnailHandle,
    pub index: usize,
    pub identifier: String,
}

struct Tile {
    index: usize,
    record: PictureRecord,
    state: ThumbnailState,
    task: AbortHandle,
}

type Joined = Result<(task::Id, ImageLoadResult<LoadedImage>), JoinError>;

type ClickCallback = Box<dyn FnMut(&ThumbnailClick)>;

/// Builds one grid tile per picture and tracks its image load.
///
/// Each load races its timeout inside a single task, so a load that
/// finishes first cancels the timer and a late timer can never overwrite a
/// success. A load task that panics fails its tile. Outcomes for disposed
/// tiles are discarded.
pub struct ThumbnailRenderer<L: ImageLoader> {
    loader: Arc<L>,
    timeout: Duration,
    next_handle: u64,
    tiles: HashMap<ThumbnailHandle, Tile>,
    loads: JoinSet<ImageLoadResult<LoadedImage>>,
    tasks: HashMap<task::Id, ThumbnailHandle>,
    on_click: Option<ClickCallback>,
}

impl<L: ImageLoader> ThumbnailRenderer<L> {
    pub fn new(loader: L) -> Self {
        Self::with_timeout(loader, IMAGE_TIMEOUT)
    }

    pub fn with_timeout(loader: L, timeout: Duration) -> Self {
        Self {
            loader: Arc::new(loader),
            timeout,
            next_handle: 0,
            tiles: HashMap::new(),
            loads: JoinSet::new(),
            tasks: HashMap::new(),
            on_click: None,
        }
    }

    pub fn set_on_click(&mut self, callback: impl FnMut(&ThumbnailClick) + 'static) {
        self.on_click = Some(Box::new(callback));
    }

    /// Creates a tile in the loading state and starts fetching its image.
    ///
    /// Must be called from within a tokio runtime.
    pub fn render(&mut self, index: usize, record: &PictureRecord) -> ThumbnailHandle {
        let handle = ThumbnailHandle(self.next_handle);
        self.next_handle += 1;

        let loader = Arc::clone(&self.loader);
        let url = record.url.clone();
        let timeout = self.timeout;

        let task = self.loads.spawn(async move {
            tokio::time::timeout(timeout, loader.load(url))
                .await
                .unwrap_or(Err(ImageLoadError::Timeout(timeout)))
        });
        self.tasks.insert(task.id(), handle);

        self.tiles.insert(
            handle,
            Tile {
                index,
                record: record.clone(),
                state: ThumbnailState::Loading,
                task,
            },
        );

        handle
    }

    /// Removes a tile and cancels its pending load. Unknown handles are ignored.
    pub fn dispose(&mut self, handle: ThumbnailHandle) -> bool {
        match self.tiles.remove(&handle) {
            Some(tile) => {
                self.tasks.remove(&tile.task.id());
                tile.task.abort();
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
        self.tasks.clear();
        self.loads.abort_all();
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.tiles
            .values()
            .filter(|tile| tile.state.is_loading())
            .count()
    }

    pub fn state(&self, handle: ThumbnailHandle) -> Option<&ThumbnailState> {
        self.tiles.get(&handle).map(|tile| &tile.state)
    }

    pub fn record(&self, handle: ThumbnailHandle) -> Option<&PictureRecord> {
        self.tiles.get(&handle).map(|tile| &tile.record)
    }

    /// Link target of the tile: the image url once loaded, `#` otherwise.
    pub fn link(&self, handle: ThumbnailHandle) -> Option<&str> {
        self.tiles.get(&handle).map(|tile| match tile.state {
            ThumbnailState::Loaded(_) => tile.record.url.as_str(),
            _ => "#",
        })
    }

    pub fn click(&mut self, handle: ThumbnailHandle) -> Option<ThumbnailClick> {
        let tile = self.tiles.get(&handle)?;
        let click = ThumbnailClick {
            handle,
            index: tile.index,
            identifier: tile.record.identifier().to_string(),
        };

        if let Some(callback) = self.on_click.as_mut() {
            callback(&click);
        }

        Some(click)
    }

    /// Handle of the live tile showing catalog position `index`.
    pub fn handle_for_index(&self, index: usize) -> Option<ThumbnailHandle> {
        self.tiles
            .iter()
            .find(|(_, tile)| tile.index == index)
            .map(|(handle, _)| *handle)
    }

    /// Applies every finished load without waiting.
    pub fn poll_outcomes(&mut self) -> Vec<ThumbnailUpdate> {
        let mut updates = Vec::new();
        while let Some(joined) = self.loads.try_join_next_with_id() {
            if let Some(update) = self.finish(joined) {
                updates.push(update);
            }
        }
        updates
    }

    /// Waits for the next load to finish. Returns `None` once no load task is left.
    pub async fn next_outcome(&mut self) -> Option<ThumbnailUpdate> {
        loop {
            let joined = self.loads.join_next_with_id().await?;
            if let Some(update) = self.finish(joined) {
                return Some(update);
            }
        }
    }

    fn finish(&mut self, joined: Joined) -> Option<ThumbnailUpdate> {
        let (id, result) = match joined {
            Ok((id, result)) => (id, result),
            Err(err) if err.is_cancelled() => {
                self.tasks.remove(&err.id());
                return None;
            }
            Err(err) => {
                let id = err.id();
                let url = self
                    .tasks
                    .get(&id)
                    .and_then(|handle| self.tiles.get(handle))
                    .map(|tile| tile.record.url.clone())
                    .unwrap_or_default();
                error!("Image loader for {url} panicked: {err}");
                (id, Err(ImageLoadError::Panicked(url)))
            }
        };

        let Some(handle) = self.tasks.remove(&id) else {
            debug!("Dropping load outcome for disposed thumbnail task {id}");
            return None;
        };
        self.apply(handle, result)
    }

    fn apply(
        &mut self,
        handle: ThumbnailHandle,
        result: ImageLoadResult<LoadedImage>,
    ) -> Option<ThumbnailUpdate> {
        let tile = self.tiles.get_mut(&handle)?;

        if !tile.state.is_loading() {
            return None;
        }

        tile.state = match result {
            Ok(image) => ThumbnailState::Loaded(image),
            Err(err) => {
                warn!("Thumbnail for {} failed: {err}", tile.record.url);
                ThumbnailState::Failed(err)
            }
        };

        Some(ThumbnailUpdate {
            handle,
            index: tile.index,
            state: tile.state.clone(),
        })
    }
}

impl<L: ImageLoader> fmt::Debug for ThumbnailRenderer<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThumbnailRenderer")
            .field("timeout", &self.timeout)
            .field("tiles", &self.tiles.len())
            .field("pending", &self.pending())
            .finish()
    }
}
