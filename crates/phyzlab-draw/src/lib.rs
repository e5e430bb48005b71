//! 2D scene primitives for phyzlab.
//!
//! Simulation modules and readouts describe what to draw as a [`Scene`] in
//! logical pixel units; a backend (Canvas2D in the browser, nothing at all in
//! tests) paints it.

pub mod scene;
pub mod spring;

pub use scene::{Color, FrameContext, Scene, Shape, TextAlign};
pub use spring::{SpringLayout, draw_spring_assembly};

use nalgebra as na;

/// 2D vector alias (logical pixels unless stated otherwise).
pub type Vec2 = na::Vector2<f64>;

/// Logical width of the drawing surface.
pub const CANVAS_WIDTH: f64 = 700.0;
/// Logical height of the drawing surface.
pub const CANVAS_HEIGHT: f64 = 350.0;
