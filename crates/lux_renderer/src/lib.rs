//! Lux Renderer - progressive CPU path tracing
//!
//! A Lambertian path tracer with next-event estimation and temporal
//! accumulation. Each call to [`Renderer::render_frame`] traces a few samples
//! per pixel and blends them into a running average, so the image converges
//! over successive frames.
//!
//! The integrator talks to geometry only through the [`SceneQuery`] trait.
//! [`TriangleScene`] is the bundled BVH-backed implementation.

mod accumulation;
mod bvh;
mod camera;
mod color;
mod config;
mod error;
mod integrator;
mod material;
mod nee;
mod random;
mod renderer;
mod sampling;
mod scene;
mod state;
mod triangle;
mod triangle_scene;

pub use accumulation::{blend, AccumulationBuffer, DisplayBuffer};
pub use camera::CameraBasis;
pub use color::DisplayEncoder;
pub use config::RenderConfig;
pub use error::{RenderError, RenderResult};
pub use integrator::{trace_path, PathSample};
pub use material::{Color, Material};
pub use nee::sample_direct_light;
pub use random::Seed;
pub use renderer::{render_frame, render_pixel, FrameParams, FrameStats, Renderer};
pub use sampling::{sample_hemisphere, Jitter};
pub use scene::{SceneQuery, SurfaceRecord};
pub use state::PathState;
pub use triangle::Triangle;
pub use triangle_scene::{MaterialId, SceneBuilder, ShadowPolicy, TriangleScene};

/// Re-export common math types from lux_math
pub use lux_math::{Interval, Ray, Vec2, Vec3, Vec4};
