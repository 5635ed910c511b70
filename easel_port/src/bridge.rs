// Copyright 2026 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::{Cell, Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use easel_image_cache::{ImageCache, ImageLoader};
use easel_imaging::{RenderOptions, Surface, render_scene};
use easel_scene::Scene;
use futures::future::{AbortHandle, Aborted, FutureExt, LocalBoxFuture, abortable};

use crate::{BridgeError, InboundMessage};

/// How a render task ended, when it did not fail.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The scene was drawn to the surface.
    Drawn,
    /// A newer render started first; nothing was drawn.
    Superseded,
}

/// A pending render. Must be polled to completion on the thread that owns the bridge.
pub type RenderTask = LocalBoxFuture<'static, Result<RenderOutcome, BridgeError>>;

/// Bridge settings.
#[derive(Clone, Debug)]
pub struct BridgeOptions {
    /// Passed to the renderer on every render.
    pub render: RenderOptions,
    /// Abort a render that is still waiting for images when a newer one starts.
    pub cancel_superseded: bool,
}

impl Default for BridgeOptions {
    fn default() -> Self {
        Self {
            render: RenderOptions::default(),
            cancel_superseded: true,
        }
    }
}

/// Owns the surface and image cache, and turns port messages into render tasks.
pub struct PortBridge<S, L>
where
    S: Surface,
    L: ImageLoader<Image = S::Image>,
{
    surface: Rc<RefCell<S>>,
    cache: ImageCache<L>,
    options: Rc<BridgeOptions>,
    in_flight: RefCell<Option<AbortHandle>>,
    renders_started: Cell<u64>,
}

impl<S, L> PortBridge<S, L>
where
    S: Surface + 'static,
    L: ImageLoader<Image = S::Image> + 'static,
{
    /// Create a bridge drawing to `surface` with images from `cache`.
    pub fn new(surface: S, cache: ImageCache<L>, options: BridgeOptions) -> Self {
        Self {
            surface: Rc::new(RefCell::new(surface)),
            cache,
            options: Rc::new(options),
            in_flight: RefCell::new(None),
            renders_started: Cell::new(0),
        }
    }

    /// Handle one message from the application's outgoing port.
    ///
    /// Returns the render task for a `RENDER` message and `None` for any other
    /// action. Decode failures are returned without touching the surface or
    /// cancelling an earlier render.
    pub fn dispatch(&self, text: &str) -> Result<Option<RenderTask>, BridgeError> {
        match InboundMessage::from_json(text)? {
            InboundMessage::Render(scene) => Ok(Some(self.render(scene))),
            InboundMessage::Unrecognized(action) => {
                log::debug!("ignoring port message with action {action:?}");
                Ok(None)
            }
        }
    }

    /// Start rendering `scene`.
    ///
    /// Image loads start immediately. The returned task waits for every image
    /// the scene uses, then draws the whole scene in one step.
    pub fn render(&self, scene: Scene) -> RenderTask {
        let id = self.renders_started.get() + 1;
        self.renders_started.set(id);

        let images = self.cache.prefetch(scene.image_urls());
        let surface = Rc::clone(&self.surface);
        let options = Rc::clone(&self.options);
        let work = async move {
            let images = images.await?;
            let mut surface = surface.borrow_mut();
            render_scene(&scene, &mut *surface, &images, &options.render)?;
            Ok::<_, BridgeError>(())
        };

        let (work, handle) = abortable(work);
        if self.options.cancel_superseded
            && let Some(previous) = self.in_flight.replace(Some(handle))
        {
            previous.abort();
        }

        async move {
            match work.await {
                Ok(Ok(())) => {
                    log::trace!("render {id} drawn");
                    Ok(RenderOutcome::Drawn)
                }
                Ok(Err(err)) => Err(err),
                Err(Aborted) => {
                    log::debug!("render {id} superseded before its images arrived");
                    Ok(RenderOutcome::Superseded)
                }
            }
        }
        .boxed_local()
    }

    /// Borrow the surface.
    ///
    /// # Panics
    ///
    /// Panics if called while a render task is drawing.
    pub fn surface(&self) -> Ref<'_, S> {
        self.surface.borrow()
    }

    /// The shared image cache.
    pub fn cache(&self) -> &ImageCache<L> {
        &self.cache
    }

    /// Bridge settings.
    pub fn options(&self) -> &BridgeOptions {
        &self.options
    }

    /// Number of render tasks created so far.
    pub fn renders_started(&self) -> u64 {
        self.renders_started.get()
    }
}

impl<S, L> fmt::Debug for PortBridge<S, L>
where
    S: Surface,
    L: ImageLoader<Image = S::Image> + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PortBridge")
            .field("cache", &self.cache)
            .field("options", &self.options)
            .field("renders_started", &self.renders_started.get())
            .finish_non_exhaustive()
    }
}

/// Drive `task` to completion, logging how it ended.
///
/// For platforms whose executors take `Future<Output = ()>`.
pub async fn report(task: RenderTask) {
    match task.await {
        Ok(RenderOutcome::Drawn | RenderOutcome::Superseded) => {}
        Err(err) => log::error!("render failed: {err}"),
    }
}
