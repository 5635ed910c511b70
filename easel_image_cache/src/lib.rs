// Copyright 2026 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easel Image Cache: memoized asynchronous image loading.
//!
//! [`ImageCache`] wraps an [`ImageLoader`] (the platform primitive that turns a
//! URL into a decoded image) and guarantees that each URL is loaded at most
//! once while it is cached:
//!
//! - A URL that finished loading is served from memory.
//! - A URL that is still loading is *joined*: every caller waits on the same
//!   underlying load rather than starting another one.
//! - A failed load is reported to every waiter and forgotten, so a later
//!   request tries again.
//!
//! Successful entries live as long as the cache. There is no eviction.
//!
//! [`ImageCache::prefetch`] resolves a whole set of URLs at once and produces
//! the [`ImageTable`] the renderer draws from.
//!
//! The cache is single-threaded: futures are `!Send` and internal state lives
//! behind `Rc<RefCell<_>>`. No borrow is held across an await point.
//!
//! A load only makes progress while something polls it. Without a spawner, a
//! load whose waiters were all dropped stays in the loading state until the
//! next [`fetch`](ImageCache::fetch) of its URL joins it. Give the cache an
//! executor with [`ImageCache::with_spawner`] and every load runs to
//! completion on its own.
//!
//! ```rust
//! use easel_image_cache::{ImageCache, ImageLoadError, ImageLoader};
//! use futures::future::{FutureExt, LocalBoxFuture, ready};
//!
//! struct Lengths;
//!
//! impl ImageLoader for Lengths {
//!     type Image = usize;
//!     fn load(&self, url: &str) -> LocalBoxFuture<'static, Result<usize, ImageLoadError>> {
//!         ready(Ok(url.len())).boxed_local()
//!     }
//! }
//!
//! let cache = ImageCache::new(Lengths);
//! let table = pollster::block_on(cache.prefetch(["a.png", "bb.png", "a.png"])).unwrap();
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.get("bb.png"), Some(&6));
//! assert_eq!(cache.loads_started(), 2);
//! ```

use core::cell::{Cell, RefCell};
use core::fmt;
use std::rc::{Rc, Weak};

use futures::future::{self, FutureExt, LocalBoxFuture, Shared};
use hashbrown::HashMap;

pub use easel_imaging::ImageTable;

/// Error returned when an image cannot be loaded or decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageLoadError {
    /// The URL that failed.
    pub url: String,
    /// Human-readable cause, as reported by the loader.
    pub reason: String,
}

impl ImageLoadError {
    /// Create a new error.
    pub fn new(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ImageLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to load image {:?}: {}", self.url, self.reason)
    }
}

impl core::error::Error for ImageLoadError {}

/// Platform primitive that loads and decodes one image.
pub trait ImageLoader {
    /// Decoded image handle. Cloned for every cache hit, so it should be cheap.
    type Image: Clone + 'static;

    /// Start loading `url`.
    ///
    /// The returned future must resolve once the image is decoded, or fail
    /// with an [`ImageLoadError`]. It must not hang on failure.
    fn load(&self, url: &str) -> LocalBoxFuture<'static, Result<Self::Image, ImageLoadError>>;
}

type PendingLoad<I> = Shared<LocalBoxFuture<'static, Result<I, ImageLoadError>>>;

enum Entry<I> {
    Loading(PendingLoad<I>),
    Ready(I),
}

type Entries<I> = RefCell<HashMap<String, Entry<I>>>;

type Spawner = Box<dyn Fn(LocalBoxFuture<'static, ()>)>;

/// Memoized, request-coalescing image cache.
pub struct ImageCache<L: ImageLoader> {
    loader: L,
    entries: Rc<Entries<L::Image>>,
    loads_started: Cell<usize>,
    spawner: Option<Spawner>,
}

impl<L: ImageLoader> ImageCache<L> {
    /// Create an empty cache that loads through `loader`.
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            entries: Rc::new(RefCell::new(HashMap::new())),
            loads_started: Cell::new(0),
            spawner: None,
        }
    }

    /// Hand every new load to `spawn` so it settles even if nobody awaits it.
    ///
    /// `spawn` is typically a local executor's spawn function, such as
    /// `wasm_bindgen_futures::spawn_local`.
    #[must_use]
    pub fn with_spawner(mut self, spawn: impl Fn(LocalBoxFuture<'static, ()>) + 'static) -> Self {
        self.spawner = Some(Box::new(spawn));
        self
    }

    /// The underlying loader.
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Resolve one image.
    ///
    /// Cached images resolve immediately. If `url` is already loading, the
    /// returned future waits on that load. Otherwise exactly one new load is
    /// started. The image is stored in the cache before any waiter sees it.
    pub fn fetch(&self, url: &str) -> LocalBoxFuture<'static, Result<L::Image, ImageLoadError>> {
        let mut entries = self.entries.borrow_mut();
        match entries.get(url) {
            Some(Entry::Ready(image)) => return future::ready(Ok(image.clone())).boxed_local(),
            Some(Entry::Loading(pending)) => {
                log::trace!("joining in-flight load of {url}");
                return pending.clone().boxed_local();
            }
            None => {}
        }

        log::debug!("loading image {url}");
        self.loads_started.set(self.loads_started.get() + 1);
        let pending = settle(
            Rc::downgrade(&self.entries),
            url.to_owned(),
            self.loader.load(url),
        )
        .boxed_local()
        .shared();
        entries.insert(url.to_owned(), Entry::Loading(pending.clone()));
        drop(entries);

        if let Some(spawn) = &self.spawner {
            spawn(pending.clone().map(drop).boxed_local());
        }
        pending.boxed_local()
    }

    /// Resolve every distinct URL in `urls`.
    ///
    /// The table has one entry per distinct URL. Fails with the first load
    /// error; loads that were already running keep running for later callers.
    pub fn prefetch<I>(
        &self,
        urls: I,
    ) -> LocalBoxFuture<'static, Result<ImageTable<L::Image>, ImageLoadError>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut keys: Vec<String> = Vec::new();
        let mut loads = Vec::new();
        for url in urls {
            let url = url.as_ref();
            if keys.iter().any(|k| k == url) {
                continue;
            }
            keys.push(url.to_owned());
            loads.push(self.fetch(url));
        }

        async move {
            let images = future::try_join_all(loads).await?;
            Ok(keys.into_iter().zip(images).collect())
        }
        .boxed_local()
    }

    /// Whether `url` has finished loading and is cached.
    pub fn is_cached(&self, url: &str) -> bool {
        matches!(self.entries.borrow().get(url), Some(Entry::Ready(_)))
    }

    /// Whether a load of `url` is in flight.
    pub fn is_loading(&self, url: &str) -> bool {
        matches!(self.entries.borrow().get(url), Some(Entry::Loading(_)))
    }

    /// Number of cached images.
    pub fn len(&self) -> usize {
        self.entries
            .borrow()
            .values()
            .filter(|entry| matches!(entry, Entry::Ready(_)))
            .count()
    }

    /// Whether no image is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of underlying loads this cache has started.
    pub fn loads_started(&self) -> usize {
        self.loads_started.get()
    }
}

/// Await `load`, then record its outcome under `url`.
async fn settle<I: Clone>(
    entries: Weak<Entries<I>>,
    url: String,
    load: LocalBoxFuture<'static, Result<I, ImageLoadError>>,
) -> Result<I, ImageLoadError> {
    let result = load.await;
    if let Some(entries) = entries.upgrade() {
        let mut entries = entries.borrow_mut();
        match &result {
            Ok(image) => {
                entries.insert(url, Entry::Ready(image.clone()));
            }
            Err(err) => {
                log::warn!("{err}");
                entries.remove(&url);
            }
        }
    }
    result
}

impl<L: ImageLoader + fmt::Debug> fmt::Debug for ImageCache<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries.borrow();
        let loading = entries
            .values()
            .filter(|entry| matches!(entry, Entry::Loading(_)))
            .count();
        f.debug_struct("ImageCache")
            .field("loader", &self.loader)
            .field("cached", &(entries.len() - loading))
            .field("loading", &loading)
            .field("loads_started", &self.loads_started.get())
            .field("spawner", &self.spawner.is_some())
            .finish()
    }
}
