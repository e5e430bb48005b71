//! Browser binding for phyzlab.
//!
//! `LabRuntime` wraps the experiment controller for JavaScript. Attaching a
//! canvas starts a `requestAnimationFrame` loop that drives the active
//! experiment and paints its scene with Canvas2D.

use std::cell::RefCell;
use std::rc::Rc;

use phyzlab::{AuthContext, Catalog, CatalogQuery, InMemoryCatalog, Lab, LabError, OpenOutcome, RuntimeConfig, navigation_slug};
use serde_json::json;
use wasm_bindgen::prelude::*;

mod dom;
mod frame_loop;
mod paint;

use frame_loop::FrameLoop;
use paint::Painter;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn js_err(e: LabError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen(start)]
pub fn main() {
    std::panic::set_hook(Box::new(|info| {
        web_sys::console::error_1(&info.to_string().into());
    }));
}

#[wasm_bindgen]
pub struct LabRuntime {
    lab: Rc<RefCell<Lab>>,
    painter: Rc<RefCell<Option<Painter>>>,
    frame_loop: Rc<RefCell<FrameLoop>>,
    frame_cb: FrameCallback,
}

#[wasm_bindgen]
impl LabRuntime {
    /// Runtime over a JSON catalog (seeded with the sample experiments when
    /// absent or empty) and an optional JSON config.
    #[wasm_bindgen(constructor)]
    pub fn new(catalog_json: Option<String>, config_json: Option<String>) -> Result<LabRuntime, JsValue> {
        let catalog = match catalog_json {
            Some(json) => InMemoryCatalog::from_json(&json).map_err(js_err)?,
            None => InMemoryCatalog::new(),
        };
        let config = match config_json {
            Some(json) => RuntimeConfig::from_json(&json).map_err(js_err)?,
            None => RuntimeConfig::default(),
        };
        let mut lab = phyzlab::lab(catalog, config).map_err(js_err)?;
        lab.on_lifecycle(|event| dom::log(&format!("phyzlab: {event:?}")));

        Ok(LabRuntime {
            lab: Rc::new(RefCell::new(lab)),
            painter: Rc::new(RefCell::new(None)),
            frame_loop: Rc::new(RefCell::new(FrameLoop::default())),
            frame_cb: Rc::new(RefCell::new(None)),
        })
    }

    pub fn sign_in(&mut self, display_name: &str) -> Result<(), JsValue> {
        self.lab
            .borrow_mut()
            .set_auth(AuthContext::signed_in(display_name))
            .map_err(js_err)?;
        Ok(())
    }

    pub fn sign_out(&mut self) -> Result<(), JsValue> {
        self.lab
            .borrow_mut()
            .set_auth(AuthContext::default())
            .map_err(js_err)?;
        Ok(())
    }

    /// Open by id, simulation id or title slug. Returns `"opened"`,
    /// `"notFound"` or `"deferred"`.
    pub fn open(&mut self, ident: &str) -> Result<String, JsValue> {
        let outcome = self.lab.borrow_mut().open(ident).map_err(js_err)?;
        let label = match outcome {
            OpenOutcome::Opened(_) => "opened",
            OpenOutcome::NotFound => {
                dom::warn(&format!("phyzlab: no experiment matches {ident:?}"));
                "notFound"
            }
            OpenOutcome::Deferred => "deferred",
        };
        Ok(label.to_string())
    }

    pub fn close(&mut self) {
        self.lab.borrow_mut().close();
    }

    /// Returns the stored (clamped) value.
    pub fn set_param(&mut self, key: &str, value: f64) -> Result<f64, JsValue> {
        self.lab.borrow_mut().update_param(key, value).map_err(js_err)
    }

    pub fn start(&mut self) {
        self.lab.borrow_mut().start();
    }

    pub fn pause(&mut self) {
        self.lab.borrow_mut().pause();
    }

    pub fn reset(&mut self) {
        self.lab.borrow_mut().reset();
    }

    pub fn is_running(&self) -> bool {
        self.lab.borrow().run_state() == phyzlab::RunState::Running
    }

    /// Catalog entries matching `text` and `subject` (`"all"` for any).
    pub fn catalog_json(&self, text: &str, subject: &str) -> Result<String, JsValue> {
        let lab = self.lab.borrow();
        let all = lab.catalog().list().map_err(js_err)?;
        let query = CatalogQuery::new(text).subject(subject);
        let entries: Vec<_> = query
            .filter(&all)
            .into_iter()
            .map(|def| {
                json!({
                    "id": def.id,
                    "title": def.title,
                    "description": def.description,
                    "subject": def.subject,
                    "difficulty": def.difficulty,
                    "durationMinutes": def.duration_minutes,
                    "slug": navigation_slug(def),
                })
            })
            .collect();
        to_json(&entries)
    }

    /// The open experiment's definition, or `null`.
    pub fn experiment_json(&self) -> Result<String, JsValue> {
        to_json(&self.lab.borrow().definition().map(|d| d.as_ref()))
    }

    pub fn params_json(&self) -> Result<String, JsValue> {
        to_json(&self.lab.borrow().params())
    }

    /// Readout card, or the companion card beside a module; `null` otherwise.
    pub fn readout_json(&self) -> Result<String, JsValue> {
        let lab = self.lab.borrow();
        match lab.readout() {
            Some(readout) => to_json(readout),
            None => to_json(&lab.companion_readout()),
        }
    }

    pub fn samples_json(&self) -> Result<String, JsValue> {
        let lab = self.lab.borrow();
        let samples: Vec<_> = lab.samples().iter().collect();
        to_json(&samples)
    }

    pub fn session_json(&self, ended_at_ms: f64) -> Result<String, JsValue> {
        to_json(&self.lab.borrow().session_attempt(ended_at_ms))
    }

    /// Called with each sample as a JSON string. The callback must not call
    /// back into this runtime.
    pub fn on_sample(&mut self, callback: js_sys::Function) {
        self.lab.borrow_mut().on_sample(move |sample| {
            let Ok(json) = serde_json::to_string(sample) else {
                return;
            };
            if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                dom::warn(&format!("phyzlab: sample callback failed: {e:?}"));
            }
        });
    }

    /// Paint into the canvas with this id and start the frame loop.
    pub fn attach(&mut self, canvas_id: &str) -> Result<(), JsValue> {
        let (width, height) = {
            let lab = self.lab.borrow();
            (lab.config().canvas_width, lab.config().canvas_height)
        };
        let painter = Painter::new(dom::canvas(canvas_id)?, width, height)?;
        *self.painter.borrow_mut() = Some(painter);

        if !self.frame_loop.borrow_mut().begin() {
            return Ok(());
        }
        if self.frame_cb.borrow().is_none() {
            self.install_frame_callback();
        }
        if let Some(cb) = self.frame_cb.borrow().as_ref() {
            let id = dom::request_animation_frame(cb).inspect_err(|_| {
                self.frame_loop.borrow_mut().stop();
            })?;
            self.frame_loop.borrow_mut().scheduled(id);
        }
        Ok(())
    }

    /// Stop the frame loop and cancel the pending frame. The experiment stays
    /// open.
    pub fn detach(&mut self) -> Result<(), JsValue> {
        match self.frame_loop.borrow_mut().stop() {
            Some(id) => dom::cancel_animation_frame(id),
            None => Ok(()),
        }
    }

    /// Whether the frame loop is attached and running.
    pub fn is_attached(&self) -> bool {
        self.frame_loop.borrow().is_running()
    }

    /// Drive and paint one frame by hand.
    pub fn frame(&mut self, now_ms: f64) -> Result<(), JsValue> {
        render(&self.lab, &self.painter, now_ms)
    }
}

impl LabRuntime {
    fn install_frame_callback(&self) {
        let f = Rc::clone(&self.frame_cb);
        let lab = Rc::clone(&self.lab);
        let painter = Rc::clone(&self.painter);
        let state = Rc::clone(&self.frame_loop);

        *self.frame_cb.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
            if !state.borrow_mut().fire() {
                return;
            }
            if let Err(e) = render(&lab, &painter, now) {
                dom::warn(&format!("phyzlab: paint failed: {e:?}"));
            }
            if let Some(cb) = f.borrow().as_ref() {
                match dom::request_animation_frame(cb) {
                    Ok(id) => state.borrow_mut().scheduled(id),
                    Err(e) => {
                        dom::warn(&format!("phyzlab: requestAnimationFrame failed: {e:?}"));
                        state.borrow_mut().stop();
                    }
                }
            }
        }) as Box<dyn FnMut(f64)>));
    }
}

fn render(lab: &RefCell<Lab>, painter: &RefCell<Option<Painter>>, now_ms: f64) -> Result<(), JsValue> {
    let scene = lab.borrow_mut().frame(now_ms);
    let painter = painter.borrow();
    let Some(painter) = painter.as_ref() else {
        return Ok(());
    };
    match scene {
        Some(scene) => painter.paint(&scene),
        None => {
            painter.clear();
            Ok(())
        }
    }
}
