//! Canvas2D presenter
//!
//! Replays a display list onto a `CanvasRenderingContext2d`. Sprites that have
//! not loaded are skipped; failed canvas calls are ignored. A broken draw only
//! ever costs a missing visual.

use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::draw::{DrawCmd, blit_rect};
use crate::platform::AssetTable;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    pub width: f64,
    pub height: f64,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;
        // Pixel art: no smoothing
        ctx.set_image_smoothing_enabled(false);
        Ok(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }

    /// Draw `cmds` in order
    pub fn present(&self, cmds: &[DrawCmd], assets: &AssetTable<HtmlImageElement>) {
        let ctx = &self.ctx;
        ctx.set_global_alpha(1.0);

        for cmd in cmds {
            match cmd {
                DrawCmd::Clear => ctx.clear_rect(0.0, 0.0, self.width, self.height),
                DrawCmd::Fill { rect, color } => {
                    ctx.set_fill_style_str(color);
                    ctx.fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
                }
                DrawCmd::Sprite {
                    id,
                    rect,
                    alpha,
                    snap,
                } => {
                    let Some(img) = assets.get(*id) else {
                        continue;
                    };
                    let r = blit_rect(rect, *snap);
                    ctx.set_global_alpha(*alpha as f64);
                    let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
                        img, r.x as f64, r.y as f64, r.w as f64, r.h as f64,
                    );
                    ctx.set_global_alpha(1.0);
                }
                DrawCmd::Polyline {
                    points,
                    width,
                    color,
                } => {
                    let Some((first, rest)) = points.split_first() else {
                        continue;
                    };
                    ctx.save();
                    ctx.set_line_width(*width as f64);
                    ctx.set_line_cap("round");
                    ctx.set_stroke_style_str(color);
                    ctx.begin_path();
                    ctx.move_to(first.x as f64, first.y as f64);
                    for p in rest {
                        ctx.line_to(p.x as f64, p.y as f64);
                    }
                    ctx.stroke();
                    ctx.restore();
                }
                DrawCmd::Text {
                    text,
                    pos,
                    font,
                    color,
                    align,
                } => {
                    ctx.set_font(font);
                    ctx.set_fill_style_str(color);
                    ctx.set_text_align(align.as_str());
                    let _ = ctx.fill_text(text, pos.x as f64, pos.y as f64);
                }
            }
        }
    }
}
