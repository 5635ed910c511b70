// Copyright 2026 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CPU raster surface for Easel, backed by [`tiny_skia`].
//!
//! [`PixmapSurface`] implements [`Surface`] by drawing into a
//! [`tiny_skia::Pixmap`]. It is used for headless rendering and for tests that
//! need to look at actual pixels.
//!
//! Notes:
//! - Supported: rectangles, polygons, images (whole or sprite-sliced) with
//!   nearest-neighbor or bilinear sampling.
//! - Not supported: text. Text draws are skipped and logged at debug level;
//!   tiny-skia has no font rasterizer.
//!
//! Images are `Arc<Pixmap>`. Two loaders are provided:
//! [`PngFileLoader`] decodes PNG files under a root directory, and
//! [`MemoryLoader`] serves pixmaps registered up front.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use easel_image_cache::{ImageLoadError, ImageLoader};
use easel_imaging::{Color, DrawOp, Point, Rect, Size, StateOp, Surface};
use futures::future::{self, FutureExt, LocalBoxFuture};
use hashbrown::HashMap;
use tiny_skia::{
    FillRule, FilterQuality, IntRect, Paint, PathBuilder, Pixmap, PixmapPaint, Transform,
};

#[allow(
    clippy::cast_possible_truncation,
    reason = "tiny-skia works in f32; scene coordinates are well within f32 range."
)]
fn f64_to_f32(v: f64) -> f32 {
    v as f32
}

fn to_skia_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    let rect = rect.abs();
    tiny_skia::Rect::from_ltrb(
        f64_to_f32(rect.x0),
        f64_to_f32(rect.y0),
        f64_to_f32(rect.x1),
        f64_to_f32(rect.y1),
    )
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "Sprite rectangles are rounded to whole source pixels; negative sizes are rejected first."
)]
fn to_int_rect(rect: Rect) -> Option<IntRect> {
    let rect = rect.abs().round();
    IntRect::from_xywh(
        rect.x0 as i32,
        rect.y0 as i32,
        rect.width() as u32,
        rect.height() as u32,
    )
}

fn to_skia_path(path: &kurbo::BezPath) -> Option<tiny_skia::Path> {
    use kurbo::PathEl;

    let p = |pt: Point| (f64_to_f32(pt.x), f64_to_f32(pt.y));
    let mut builder = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(a) => {
                let (x, y) = p(a);
                builder.move_to(x, y);
            }
            PathEl::LineTo(a) => {
                let (x, y) = p(a);
                builder.line_to(x, y);
            }
            PathEl::QuadTo(a, b) => {
                let ((x1, y1), (x, y)) = (p(a), p(b));
                builder.quad_to(x1, y1, x, y);
            }
            PathEl::CurveTo(a, b, c) => {
                let ((x1, y1), (x2, y2), (x, y)) = (p(a), p(b), p(c));
                builder.cubic_to(x1, y1, x2, y2, x, y);
            }
            PathEl::ClosePath => builder.close(),
        }
    }
    // Degenerate paths (a single point) finish to `None` and fill nothing.
    builder.finish()
}

/// Raster surface drawing into a [`Pixmap`].
#[derive(Debug)]
pub struct PixmapSurface {
    /// `None` while the surface has a zero dimension.
    pixmap: Option<Pixmap>,
    fill: Color,
    image_smoothing: bool,
}

impl Default for PixmapSurface {
    fn default() -> Self {
        Self {
            pixmap: None,
            fill: Color::BLACK,
            image_smoothing: true,
        }
    }
}

impl PixmapSurface {
    /// Create a zero-sized surface. The first render resizes it.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current pixmap, if the surface has a non-zero size.
    pub fn pixmap(&self) -> Option<&Pixmap> {
        self.pixmap.as_ref()
    }

    /// Current surface size.
    pub fn size(&self) -> Size {
        self.pixmap
            .as_ref()
            .map_or(Size::default(), |p| Size::new(p.width(), p.height()))
    }

    /// Unpremultiplied RGBA of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.as_ref()?.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    fn paint(&self) -> Paint<'static> {
        let rgba = self.fill.to_rgba8();
        let mut paint = Paint::default();
        paint.set_color_rgba8(rgba.r, rgba.g, rgba.b, rgba.a);
        paint.anti_alias = true;
        paint
    }

    fn draw_image(&mut self, image: &Pixmap, dst: Rect, src: Option<Rect>) {
        let quality = if self.image_smoothing {
            FilterQuality::Bilinear
        } else {
            FilterQuality::Nearest
        };
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };

        let bounds = Rect::new(
            0.0,
            0.0,
            f64::from(image.width()),
            f64::from(image.height()),
        );
        let src = src.map_or(bounds, |src| src.abs());
        if src.is_zero_area() {
            return;
        }
        // Scale comes from the requested slice; only the part inside the
        // image is drawn, at the matching offset within `dst`.
        let sx = dst.width() / src.width();
        let sy = dst.height() / src.height();

        let cropped;
        let (source, origin) = if src == bounds {
            (image.as_ref(), Point::new(dst.x0, dst.y0))
        } else {
            let Some(visible) = to_int_rect(src.intersect(bounds)) else {
                log::debug!("sprite {src:?} lies outside its image; skipping");
                return;
            };
            let Some(slice) = image.clone_rect(visible) else {
                log::debug!("sprite {src:?} lies outside its image; skipping");
                return;
            };
            cropped = slice;
            let origin = Point::new(
                dst.x0 + (f64::from(visible.x()) - src.x0) * sx,
                dst.y0 + (f64::from(visible.y()) - src.y0) * sy,
            );
            (cropped.as_ref(), origin)
        };

        let transform = Transform::from_row(
            f64_to_f32(sx),
            0.0,
            0.0,
            f64_to_f32(sy),
            f64_to_f32(origin.x),
            f64_to_f32(origin.y),
        );
        let paint = PixmapPaint {
            quality,
            ..PixmapPaint::default()
        };
        pixmap.draw_pixmap(0, 0, source, &paint, transform, None);
    }
}

impl Surface for PixmapSurface {
    type Image = Arc<Pixmap>;

    fn state(&mut self, op: StateOp) {
        match op {
            StateOp::Resize(size) => {
                // Like a canvas, resizing clears the pixels and resets state.
                *self = Self {
                    pixmap: Pixmap::new(size.width, size.height),
                    ..Self::default()
                };
            }
            StateOp::SetImageSmoothing(on) => self.image_smoothing = on,
            StateOp::SetFill(color) => self.fill = color,
            StateOp::SetFont(_) => {}
        }
    }

    fn draw(&mut self, op: DrawOp<Arc<Pixmap>>) {
        match op {
            DrawOp::FillRect(rect) => {
                let paint = self.paint();
                if let (Some(pixmap), Some(rect)) = (self.pixmap.as_mut(), to_skia_rect(rect)) {
                    pixmap.fill_rect(rect, &paint, Transform::identity(), None);
                }
            }
            DrawOp::FillPath(path) => {
                let paint = self.paint();
                if let (Some(pixmap), Some(path)) = (self.pixmap.as_mut(), to_skia_path(&path)) {
                    pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
                }
            }
            DrawOp::DrawImage { image, dst, src } => self.draw_image(&image, dst, src),
            DrawOp::FillText { text, .. } => {
                log::debug!("PixmapSurface does not rasterize text; skipping {text:?}");
            }
        }
    }
}

/// Loads PNG files from a directory, treating URLs as relative paths.
#[derive(Clone, Debug)]
pub struct PngFileLoader {
    root: PathBuf,
}

impl PngFileLoader {
    /// Resolve URLs relative to `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ImageLoader for PngFileLoader {
    type Image = Arc<Pixmap>;

    fn load(&self, url: &str) -> LocalBoxFuture<'static, Result<Arc<Pixmap>, ImageLoadError>> {
        let path = self.root.join(url.trim_start_matches('/'));
        let url = url.to_owned();
        async move {
            Pixmap::load_png(&path)
                .map(Arc::new)
                .map_err(|err| ImageLoadError::new(url, err.to_string()))
        }
        .boxed_local()
    }
}

/// Serves pixmaps registered ahead of time; unknown URLs fail.
#[derive(Clone, Debug, Default)]
pub struct MemoryLoader {
    images: HashMap<String, Arc<Pixmap>>,
}

impl MemoryLoader {
    /// Create an empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `pixmap` under `url`.
    #[must_use]
    pub fn with_image(mut self, url: impl Into<String>, pixmap: Pixmap) -> Self {
        self.images.insert(url.into(), Arc::new(pixmap));
        self
    }
}

impl ImageLoader for MemoryLoader {
    type Image = Arc<Pixmap>;

    fn load(&self, url: &str) -> LocalBoxFuture<'static, Result<Arc<Pixmap>, ImageLoadError>> {
        let result = self
            .images
            .get(url)
            .cloned()
            .ok_or_else(|| ImageLoadError::new(url, "not found"));
        future::ready(result).boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use easel_image_cache::ImageCache;
    use easel_imaging::{ImageTable, RenderOptions, render_scene};
    use easel_scene::{ImageItem, PolygonItem, RectangleItem, Scene, Sprite, parse_css_color};
    use tiny_skia::PremultipliedColorU8;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];
    const WHITE: [u8; 4] = [255, 255, 255, 255];

    fn all_pixels(surface: &PixmapSurface) -> Vec<[u8; 4]> {
        let size = surface.size();
        let mut out = Vec::new();
        for y in 0..size.height {
            for x in 0..size.width {
                out.push(surface.pixel(x, y).expect("pixel in bounds"));
            }
        }
        out
    }

    /// A 2x1 image: red on the left, blue on the right.
    fn red_blue() -> Pixmap {
        let mut pixmap = Pixmap::new(2, 1).unwrap();
        let pixels = pixmap.pixels_mut();
        pixels[0] = PremultipliedColorU8::from_rgba(255, 0, 0, 255).unwrap();
        pixels[1] = PremultipliedColorU8::from_rgba(0, 0, 255, 255).unwrap();
        pixmap
    }

    fn render(scene: &Scene, images: &ImageTable<Arc<Pixmap>>) -> PixmapSurface {
        let mut surface = PixmapSurface::new();
        render_scene(scene, &mut surface, images, &RenderOptions::default()).unwrap();
        surface
    }

    #[test]
    fn empty_scene_is_background_only() {
        let scene = Scene::new(Size::new(6, 3), parse_css_color("#336699").unwrap());

        let surface = render(&scene, &ImageTable::new());

        assert_eq!(surface.size(), Size::new(6, 3));
        let pixels = all_pixels(&surface);
        assert_eq!(pixels.len(), 18);
        assert!(pixels.iter().all(|p| *p == [0x33, 0x66, 0x99, 255]));
    }

    #[test]
    fn full_white_rectangle_covers_surface() {
        let scene = Scene::new(Size::new(10, 10), Color::BLACK).with_item(RectangleItem {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
            color: parse_css_color("#fff").unwrap(),
        });

        let surface = render(&scene, &ImageTable::new());

        assert!(all_pixels(&surface).iter().all(|p| *p == WHITE));
    }

    #[test]
    fn later_items_paint_over_earlier_ones() {
        let scene = Scene::new(Size::new(4, 4), Color::BLACK)
            .with_item(RectangleItem {
                x: 0.0,
                y: 0.0,
                width: 4.0,
                height: 4.0,
                color: Color::WHITE,
            })
            .with_item(RectangleItem {
                x: 0.0,
                y: 0.0,
                width: 2.0,
                height: 4.0,
                color: parse_css_color("red").unwrap(),
            });

        let surface = render(&scene, &ImageTable::new());

        assert_eq!(surface.pixel(0, 0), Some(RED));
        assert_eq!(surface.pixel(3, 3), Some(WHITE));
    }

    #[test]
    fn polygon_fills_its_interior() {
        let scene = Scene::new(Size::new(10, 10), Color::BLACK).with_item(PolygonItem {
            path: vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(0.0, 10.0),
            ],
            color: Color::WHITE,
        });

        let surface = render(&scene, &ImageTable::new());

        assert_eq!(surface.pixel(1, 1), Some(WHITE));
        assert_eq!(surface.pixel(8, 8), Some([0, 0, 0, 255]));
    }

    #[test]
    fn single_point_polygon_draws_nothing() {
        let scene = Scene::new(Size::new(3, 3), Color::BLACK).with_item(PolygonItem {
            path: vec![Point::new(1.0, 1.0)],
            color: Color::WHITE,
        });

        let surface = render(&scene, &ImageTable::new());

        assert!(all_pixels(&surface).iter().all(|p| *p == [0, 0, 0, 255]));
    }

    #[test]
    fn sprite_slices_source_with_nearest_sampling() {
        let scene = Scene::new(Size::new(4, 4), Color::BLACK).with_item(ImageItem {
            url: "sheet.png".into(),
            x: 0.0,
            y: 0.0,
            width: 4.0,
            height: 4.0,
            sprite: Some(Sprite {
                x: 1.0,
                y: 0.0,
                width: 1.0,
                height: 1.0,
            }),
        });
        let images = [("sheet.png", Arc::new(red_blue()))].into_iter().collect();

        let surface = render(&scene, &images);

        assert!(all_pixels(&surface).iter().all(|p| *p == BLUE));
    }

    #[test]
    fn sprite_past_image_edge_is_clipped_not_stretched() {
        // Two source pixels wide starting at the blue pixel: only one exists.
        let scene = Scene::new(Size::new(4, 1), Color::BLACK).with_item(ImageItem {
            url: "sheet.png".into(),
            x: 0.0,
            y: 0.0,
            width: 4.0,
            height: 1.0,
            sprite: Some(Sprite {
                x: 1.0,
                y: 0.0,
                width: 2.0,
                height: 1.0,
            }),
        });
        let images = [("sheet.png", Arc::new(red_blue()))].into_iter().collect();

        let surface = render(&scene, &images);

        assert_eq!(
            all_pixels(&surface),
            vec![BLUE, BLUE, [0, 0, 0, 255], [0, 0, 0, 255]]
        );
    }

    #[test]
    fn sprite_before_image_origin_shifts_destination() {
        let scene = Scene::new(Size::new(4, 1), Color::BLACK).with_item(ImageItem {
            url: "sheet.png".into(),
            x: 0.0,
            y: 0.0,
            width: 4.0,
            height: 1.0,
            sprite: Some(Sprite {
                x: -1.0,
                y: 0.0,
                width: 2.0,
                height: 1.0,
            }),
        });
        let images = [("sheet.png", Arc::new(red_blue()))].into_iter().collect();

        let surface = render(&scene, &images);

        assert_eq!(
            all_pixels(&surface),
            vec![[0, 0, 0, 255], [0, 0, 0, 255], RED, RED]
        );
    }

    #[test]
    fn whole_image_scales_crisply() {
        let scene = Scene::new(Size::new(4, 2), Color::BLACK).with_item(ImageItem {
            url: "sheet.png".into(),
            x: 0.0,
            y: 0.0,
            width: 4.0,
            height: 2.0,
            sprite: None,
        });
        let images = [("sheet.png", Arc::new(red_blue()))].into_iter().collect();

        let surface = render(&scene, &images);

        for y in 0..2 {
            assert_eq!(surface.pixel(0, y), Some(RED));
            assert_eq!(surface.pixel(1, y), Some(RED));
            assert_eq!(surface.pixel(2, y), Some(BLUE));
            assert_eq!(surface.pixel(3, y), Some(BLUE));
        }
    }

    #[test]
    fn zero_sized_scene_is_tolerated() {
        let scene = Scene::new(Size::new(0, 5), Color::BLACK).with_item(RectangleItem {
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
            color: Color::WHITE,
        });

        let surface = render(&scene, &ImageTable::new());

        assert!(surface.pixmap().is_none());
        assert_eq!(surface.size(), Size::default());
    }

    #[test]
    fn memory_loader_feeds_the_cache() {
        let cache = ImageCache::new(MemoryLoader::new().with_image("sheet.png", red_blue()));

        let table = pollster::block_on(cache.prefetch(["sheet.png"])).unwrap();
        assert_eq!(table.get("sheet.png").map(|p| p.width()), Some(2));

        let err = pollster::block_on(cache.fetch("other.png")).unwrap_err();
        assert_eq!(err.url, "other.png");
    }

    #[test]
    fn png_loader_reports_missing_files() {
        let loader = PngFileLoader::new(std::env::temp_dir().join("easel-no-such-dir"));

        let err = pollster::block_on(loader.load("/nope.png")).unwrap_err();

        assert_eq!(err.url, "/nope.png");
        assert!(!err.reason.is_empty());
    }
}
