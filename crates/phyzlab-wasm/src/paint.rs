//! Canvas2D backend for [`Scene`].

use std::f64::consts::TAU;

use phyzlab::phyzlab_draw::{Scene, Shape, TextAlign, Vec2};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::dom;

pub struct Painter {
    ctx: CanvasRenderingContext2d,
    /// Logical surface the scene was authored for.
    width: f64,
    height: f64,
}

impl Painter {
    /// Size the backing store for the device pixel ratio and scale the
    /// context so scenes paint in logical units.
    pub fn new(canvas: HtmlCanvasElement, width: f64, height: f64) -> Result<Self, JsValue> {
        let dpr = dom::device_pixel_ratio();
        canvas.set_width((width * dpr) as u32);
        canvas.set_height((height * dpr) as u32);

        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("not a 2d context"))?;
        ctx.scale(dpr, dpr)?;

        dom::log(&format!("phyzlab painter: {width}x{height} @{dpr}x"));
        Ok(Self {
            ctx,
            width,
            height,
        })
    }

    pub fn clear(&self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    pub fn paint(&self, scene: &Scene) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.save();
        // Scenes may be authored for a different surface than the canvas.
        ctx.scale(self.width / scene.width, self.height / scene.height)?;
        ctx.set_fill_style_str(&scene.background.css());
        ctx.fill_rect(0.0, 0.0, scene.width, scene.height);
        for shape in &scene.shapes {
            self.shape(shape)?;
        }
        ctx.restore();
        Ok(())
    }

    fn shape(&self, shape: &Shape) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        match shape {
            Shape::Line {
                from,
                to,
                stroke,
                width,
            } => {
                ctx.set_stroke_style_str(&stroke.css());
                ctx.set_line_width(*width);
                ctx.begin_path();
                ctx.move_to(from.x, from.y);
                ctx.line_to(to.x, to.y);
                ctx.stroke();
            }
            Shape::Polyline {
                points,
                stroke,
                width,
            } => {
                let Some((first, rest)) = points.split_first() else {
                    return Ok(());
                };
                ctx.set_stroke_style_str(&stroke.css());
                ctx.set_line_width(*width);
                ctx.begin_path();
                ctx.move_to(first.x, first.y);
                for p in rest {
                    ctx.line_to(p.x, p.y);
                }
                ctx.stroke();
            }
            Shape::Circle {
                center,
                diameter,
                fill,
                stroke,
            } => {
                ctx.begin_path();
                ctx.arc(center.x, center.y, diameter / 2.0, 0.0, TAU)?;
                ctx.set_fill_style_str(&fill.css());
                ctx.fill();
                if let Some(stroke) = stroke {
                    ctx.set_stroke_style_str(&stroke.css());
                    ctx.set_line_width(1.0);
                    ctx.stroke();
                }
            }
            Shape::Rect {
                origin,
                size,
                fill,
                stroke,
                corner_radius,
            } => {
                self.rect_path(*origin, *size, *corner_radius)?;
                if let Some(fill) = fill {
                    ctx.set_fill_style_str(&fill.css());
                    ctx.fill();
                }
                if let Some(stroke) = stroke {
                    ctx.set_stroke_style_str(&stroke.css());
                    ctx.set_line_width(1.0);
                    ctx.stroke();
                }
            }
            Shape::Text {
                at,
                text,
                size,
                fill,
                align,
                rotation,
            } => {
                ctx.save();
                ctx.translate(at.x, at.y)?;
                if *rotation != 0.0 {
                    ctx.rotate(*rotation)?;
                }
                ctx.set_font(&format!("{size}px system-ui, sans-serif"));
                ctx.set_text_align(match align {
                    TextAlign::Left => "left",
                    TextAlign::Center => "center",
                });
                ctx.set_fill_style_str(&fill.css());
                ctx.fill_text(text, 0.0, 0.0)?;
                ctx.restore();
            }
        }
        Ok(())
    }

    fn rect_path(&self, origin: Vec2, size: Vec2, radius: f64) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.begin_path();
        let r = radius.min(size.x / 2.0).min(size.y / 2.0);
        if r <= 0.0 {
            ctx.rect(origin.x, origin.y, size.x, size.y);
            return Ok(());
        }
        let (x0, y0) = (origin.x, origin.y);
        let (x1, y1) = (x0 + size.x, y0 + size.y);
        ctx.move_to(x0 + r, y0);
        ctx.arc_to(x1, y0, x1, y1, r)?;
        ctx.arc_to(x1, y1, x0, y1, r)?;
        ctx.arc_to(x0, y1, x0, y0, r)?;
        ctx.arc_to(x0, y0, x1, y0, r)?;
        ctx.close_path();
        Ok(())
    }
}
