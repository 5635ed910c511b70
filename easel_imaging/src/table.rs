// Copyright 2026 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use hashbrown::HashMap;

/// Resolved images for one render, keyed by URL.
#[derive(Clone)]
pub struct ImageTable<I> {
    images: HashMap<String, I>,
}

impl<I> ImageTable<I> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            images: HashMap::new(),
        }
    }

    /// Insert an image, returning the one previously stored under `url`.
    pub fn insert(&mut self, url: impl Into<String>, image: I) -> Option<I> {
        self.images.insert(url.into(), image)
    }

    /// Look up the image for `url`.
    pub fn get(&self, url: &str) -> Option<&I> {
        self.images.get(url)
    }

    /// Whether `url` has a resolved image.
    pub fn contains(&self, url: &str) -> bool {
        self.images.contains_key(url)
    }

    /// Number of distinct URLs in the table.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Iterate over the URLs in the table, in arbitrary order.
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.images.keys().map(String::as_str)
    }
}

impl<I> Default for ImageTable<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, K: Into<String>> FromIterator<(K, I)> for ImageTable<I> {
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        Self {
            images: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl<I> fmt::Debug for ImageTable<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageTable")
            .field("urls", &self.images.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
