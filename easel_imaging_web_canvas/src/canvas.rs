// Copyright 2026 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::format;
use alloc::string::{String, ToString};
use core::fmt;

use easel_imaging::{BezPath, Color, DrawOp, StateOp, Surface};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement};

fn color_to_css(color: Color) -> String {
    // `Rgba8` formats as a CSS `rgb(...)`/`rgba(...)` string.
    color.to_rgba8().to_string()
}

fn begin_path_from_bez(ctx: &CanvasRenderingContext2d, path: &BezPath) {
    ctx.begin_path();
    for el in path.elements() {
        use kurbo::PathEl;
        match *el {
            PathEl::MoveTo(p) => ctx.move_to(p.x, p.y),
            PathEl::LineTo(p) => ctx.line_to(p.x, p.y),
            PathEl::QuadTo(p1, p) => ctx.quadratic_curve_to(p1.x, p1.y, p.x, p.y),
            PathEl::CurveTo(p1, p2, p) => ctx.bezier_curve_to(p1.x, p1.y, p2.x, p2.y, p.x, p.y),
            PathEl::ClosePath => ctx.close_path(),
        }
    }
}

/// Canvas 2D surface (only available on `wasm32`).
pub struct WebCanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl fmt::Debug for WebCanvasSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebCanvasSurface")
            .field("width", &self.canvas.width())
            .field("height", &self.canvas.height())
            .finish_non_exhaustive()
    }
}

impl WebCanvasSurface {
    /// Create a surface for a DOM canvas element.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("missing 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    /// Create a surface for the first canvas element matching `selector`.
    pub fn from_selector(document: &Document, selector: &str) -> Result<Self, JsValue> {
        let canvas = document
            .query_selector(selector)?
            .ok_or_else(|| JsValue::from_str(&format!("no element matches {selector:?}")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str(&format!("{selector:?} is not a canvas")))?;
        Self::new(canvas)
    }

    /// The canvas element being drawn to.
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// The canvas 2D context.
    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }
}

impl Surface for WebCanvasSurface {
    type Image = HtmlImageElement;

    fn state(&mut self, op: StateOp) {
        match op {
            StateOp::Resize(size) => {
                self.canvas.set_width(size.width);
                self.canvas.set_height(size.height);
            }
            StateOp::SetImageSmoothing(on) => self.ctx.set_image_smoothing_enabled(on),
            StateOp::SetFill(color) => self.ctx.set_fill_style_str(&color_to_css(color)),
            StateOp::SetFont(font) => self.ctx.set_font(&font),
        }
    }

    fn draw(&mut self, op: DrawOp<HtmlImageElement>) {
        match op {
            DrawOp::FillRect(rect) => {
                self.ctx
                    .fill_rect(rect.x0, rect.y0, rect.width(), rect.height());
            }
            DrawOp::FillPath(path) => {
                begin_path_from_bez(&self.ctx, &path);
                self.ctx.fill();
            }
            DrawOp::DrawImage { image, dst, src } => {
                let drawn = match src {
                    Some(src) => self
                        .ctx
                        .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                            &image,
                            src.x0,
                            src.y0,
                            src.width(),
                            src.height(),
                            dst.x0,
                            dst.y0,
                            dst.width(),
                            dst.height(),
                        ),
                    None => self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                        &image,
                        dst.x0,
                        dst.y0,
                        dst.width(),
                        dst.height(),
                    ),
                };
                if let Err(err) = drawn {
                    log::warn!("drawImage({}) failed: {err:?}", image.src());
                }
            }
            DrawOp::FillText { text, origin } => {
                if let Err(err) = self.ctx.fill_text(&text, origin.x, origin.y) {
                    log::warn!("fillText failed: {err:?}");
                }
            }
        }
    }
}
