// Copyright 2026 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::borrow::ToOwned;
use alloc::rc::Rc;
use alloc::string::String;
use core::cell::RefCell;

use easel_image_cache::{ImageLoadError, ImageLoader};
use futures::channel::oneshot;
use futures::future::{FutureExt, LocalBoxFuture, ready};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::HtmlImageElement;

type Settle = Rc<RefCell<Option<oneshot::Sender<Result<(), &'static str>>>>>;

fn settle_with(tx: &Settle, outcome: Result<(), &'static str>) -> Closure<dyn FnMut()> {
    let tx = Rc::clone(tx);
    Closure::new(move || {
        if let Some(tx) = tx.borrow_mut().take() {
            let _ = tx.send(outcome);
        }
    })
}

/// Loads images through detached `HTMLImageElement`s.
///
/// The load starts as soon as [`load`](ImageLoader::load) is called; the
/// returned future resolves on the element's `load` event and fails on its
/// `error` event.
#[derive(Clone, Debug, Default)]
pub struct HtmlImageLoader {
    cross_origin: Option<String>,
}

impl HtmlImageLoader {
    /// Create a loader that sends no CORS request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `crossOrigin` attribute on every image, e.g. `"anonymous"`.
    #[must_use]
    pub fn with_cross_origin(mut self, mode: impl Into<String>) -> Self {
        self.cross_origin = Some(mode.into());
        self
    }
}

impl ImageLoader for HtmlImageLoader {
    type Image = HtmlImageElement;

    fn load(&self, url: &str) -> LocalBoxFuture<'static, Result<HtmlImageElement, ImageLoadError>> {
        let image = match HtmlImageElement::new() {
            Ok(image) => image,
            Err(err) => {
                return ready(Err(ImageLoadError::new(
                    url,
                    alloc::format!("cannot create image element: {err:?}"),
                )))
                .boxed_local();
            }
        };

        let (tx, rx) = oneshot::channel();
        let tx: Settle = Rc::new(RefCell::new(Some(tx)));
        let onload = settle_with(&tx, Ok(()));
        let onerror = settle_with(&tx, Err("image failed to load or decode"));
        image.set_onload(Some(onload.as_ref().unchecked_ref()));
        image.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        if let Some(mode) = &self.cross_origin {
            image.set_cross_origin(Some(mode.as_str()));
        }
        image.set_src(url);

        let url = url.to_owned();
        async move {
            let outcome = rx.await;
            image.set_onload(None);
            image.set_onerror(None);
            // The callbacks must outlive the load.
            drop((onload, onerror));
            match outcome {
                Ok(Ok(())) => Ok(image),
                Ok(Err(reason)) => Err(ImageLoadError::new(url, reason)),
                Err(oneshot::Canceled) => Err(ImageLoadError::new(url, "load abandoned")),
            }
        }
        .boxed_local()
    }
}
