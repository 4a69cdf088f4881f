//! Frame launch and progressive accumulation.
//!
//! Every pixel is an independent task: rayon hands out pixels, each task
//! traces its samples sequentially and writes only its own accumulation and
//! display cells.

use crate::accumulation::check_size;
use crate::{
    blend, trace_path, AccumulationBuffer, CameraBasis, Color, DisplayBuffer, RenderConfig,
    RenderError, RenderResult, SceneQuery, Seed,
};
use lux_math::Vec2;
use rayon::prelude::*;
use std::time::{Duration, Instant};

/// Read-only inputs broadcast to every pixel of one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameParams<'a> {
    pub width: u32,
    pub height: u32,
    pub camera: CameraBasis,
    /// Frames already accumulated before this one
    pub frame_index: u32,
    pub config: &'a RenderConfig,
}

impl FrameParams<'_> {
    /// Normalized device coordinates of a point in pixel (x, y).
    ///
    /// `offset` in `[-1, 1]^2` moves from the pixel center to its edges.
    /// Row 0 is the top of the image.
    fn pixel_ndc(&self, x: u32, y: u32, offset: Vec2) -> Vec2 {
        let size = Vec2::new(self.width as f32, self.height as f32);
        let pixel = Vec2::new(x as f32, y as f32) + Vec2::splat(0.5) + 0.5 * offset;
        let uv = pixel / size;
        Vec2::new(2.0 * uv.x - 1.0, 1.0 - 2.0 * uv.y)
    }
}

/// Average of `samples_per_frame` path samples through pixel (x, y).
///
/// The pixel's seed depends only on its index and the frame index, so the
/// result is reproducible.
pub fn render_pixel(params: &FrameParams, scene: &dyn SceneQuery, x: u32, y: u32) -> Color {
    let config = params.config;
    let mut seed = Seed::for_pixel(y * params.width + x, params.frame_index);
    let mut mean = Color::ZERO;

    // Running mean: a constant radiance stays exact for any sample count
    for i in 0..config.samples_per_frame {
        let offset = config.jitter.sample(&mut seed);
        let ray = params.camera.primary_ray(params.pixel_ndc(x, y, offset));
        let radiance = trace_path(scene, ray, &mut seed, config).radiance;
        mean += (radiance - mean) / (i + 1) as f32;
    }

    mean
}

/// Trace one frame, blend it into `accumulation` and refresh `display`.
///
/// Frames for the same buffers must be submitted in order with
/// `frame_index` 0, 1, 2, ...
pub fn render_frame(
    params: &FrameParams,
    scene: &dyn SceneQuery,
    accumulation: &mut AccumulationBuffer,
    display: &mut DisplayBuffer,
) -> RenderResult<()> {
    if params.width == 0 || params.height == 0 {
        return Err(RenderError::EmptyImage {
            width: params.width,
            height: params.height,
        });
    }
    params.config.validate()?;
    check_size(params.width, params.height, accumulation.width(), accumulation.height())?;
    check_size(params.width, params.height, display.width(), display.height())?;

    let width = params.width;
    let encoder = params.config.encoder;

    accumulation
        .cells_mut()
        .par_iter_mut()
        .zip(display.pixels_mut().par_iter_mut())
        .enumerate()
        .for_each(|(index, (cell, pixel))| {
            let x = index as u32 % width;
            let y = index as u32 / width;
            let estimate = render_pixel(params, scene, x, y);
            *cell = blend(*cell, estimate.extend(1.0), params.frame_index);
            *pixel = encoder.encode(*cell);
        });

    Ok(())
}

/// Summary of one rendered frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameStats {
    /// Index of the frame just rendered
    pub frame_index: u32,
    /// Samples per pixel accumulated so far, this frame included
    pub total_samples: u32,
    pub elapsed: Duration,
}

/// Owns the buffers and frame counter for progressive rendering.
///
/// Call [`Renderer::render_frame`] repeatedly; the image refines every frame
/// until the camera moves, the size changes, or [`Renderer::reset`] is
/// called (e.g. after editing the scene).
pub struct Renderer {
    config: RenderConfig,
    accumulation: AccumulationBuffer,
    display: DisplayBuffer,
    frame_index: u32,
    camera: Option<CameraBasis>,
}

impl Renderer {
    pub fn new(width: u32, height: u32, config: RenderConfig) -> RenderResult<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyImage { width, height });
        }
        config.validate()?;

        log::info!(
            "Renderer {}x{}: {} spp/frame, {} bounces, {} shadow rays",
            width,
            height,
            config.samples_per_frame,
            config.max_bounces,
            config.shadow_samples
        );

        Ok(Self {
            config,
            accumulation: AccumulationBuffer::new(width, height),
            display: DisplayBuffer::new(width, height),
            frame_index: 0,
            camera: None,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Swap settings; accumulated frames are discarded.
    pub fn set_config(&mut self, config: RenderConfig) -> RenderResult<()> {
        config.validate()?;
        self.config = config;
        self.reset();
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.accumulation.width()
    }

    pub fn height(&self) -> u32 {
        self.accumulation.height()
    }

    /// Index the next rendered frame will get (frames accumulated so far).
    pub fn frame_index(&self) -> u32 {
        self.frame_index
    }

    pub fn accumulation(&self) -> &AccumulationBuffer {
        &self.accumulation
    }

    pub fn display(&self) -> &DisplayBuffer {
        &self.display
    }

    /// Reallocate buffers for a new image size.
    pub fn resize(&mut self, width: u32, height: u32) -> RenderResult<()> {
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyImage { width, height });
        }
        if (width, height) == (self.width(), self.height()) {
            return Ok(());
        }

        log::info!("Resized to {}x{}", width, height);
        self.accumulation.resize(width, height);
        self.display.resize(width, height);
        self.frame_index = 0;
        Ok(())
    }

    /// Discard accumulated frames.
    pub fn reset(&mut self) {
        self.accumulation.reset();
        self.frame_index = 0;
    }

    /// Trace one more frame of `scene` as seen from `camera`.
    ///
    /// A camera different from the previous frame's restarts accumulation.
    pub fn render_frame(&mut self, scene: &dyn SceneQuery, camera: &CameraBasis) -> RenderResult<FrameStats> {
        if self.camera != Some(*camera) {
            if self.camera.is_some() {
                log::debug!("Camera changed; restarting accumulation");
            }
            self.reset();
            self.camera = Some(*camera);
        }

        let start = Instant::now();
        let params = FrameParams {
            width: self.width(),
            height: self.height(),
            camera: *camera,
            frame_index: self.frame_index,
            config: &self.config,
        };
        render_frame(&params, scene, &mut self.accumulation, &mut self.display)?;

        let stats = FrameStats {
            frame_index: self.frame_index,
            total_samples: (self.frame_index + 1) * self.config.samples_per_frame,
            elapsed: start.elapsed(),
        };
        self.frame_index += 1;

        log::debug!(
            "Frame {} done in {:?} ({} spp total)",
            stats.frame_index,
            stats.elapsed,
            stats.total_samples
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Jitter, Material, SceneBuilder, TriangleScene};
    use lux_math::{Vec3, Vec4};

    const BACKGROUND: Color = Color::new(0.25, 0.5, 0.75);

    fn camera() -> CameraBasis {
        CameraBasis::look_at(Vec3::new(0.0, 0.5, 3.0), Vec3::new(0.0, 0.5, 0.0), Vec3::Y, 60.0, 1.0)
    }

    /// Diffuse floor under a tilted emissive panel, open to the background.
    fn lit_floor() -> TriangleScene {
        let v = Vec3::new;
        let mut builder = SceneBuilder::new().with_background(Color::splat(0.1));
        let floor = builder.add_material(Material::diffuse(Color::new(0.7, 0.6, 0.5)));
        let light = builder.add_material(Material::emitter(Color::splat(6.0)));
        builder.add_quad([v(-3., 0., -3.), v(-3., 0., 3.), v(3., 0., 3.), v(3., 0., -3.)], floor);
        builder.add_triangle([v(-1., 2., -1.), v(1., 2., -1.), v(-0.5, 1.5, 0.5)], light);
        builder.build().unwrap()
    }

    fn to_bits(cells: &[Vec4]) -> Vec<[u32; 4]> {
        cells.iter().map(|c| c.to_array().map(f32::to_bits)).collect()
    }

    #[test]
    fn test_pixel_ndc() {
        let config = RenderConfig::default();
        let params = FrameParams {
            width: 3,
            height: 3,
            camera: camera(),
            frame_index: 0,
            config: &config,
        };

        assert_eq!(params.pixel_ndc(1, 1, Vec2::ZERO), Vec2::ZERO);
        assert_eq!(params.pixel_ndc(0, 0, Vec2::new(-1.0, -1.0)), Vec2::new(-1.0, 1.0));
        assert_eq!(params.pixel_ndc(2, 2, Vec2::new(1.0, 1.0)), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_background_is_exact_from_first_frame() {
        let scene = TriangleScene::empty(BACKGROUND);
        let mut renderer = Renderer::new(8, 6, RenderConfig::default()).unwrap();

        for frame in 0..5 {
            let stats = renderer.render_frame(&scene, &camera()).unwrap();
            assert_eq!(stats.frame_index, frame);

            for cell in renderer.accumulation().cells() {
                assert_eq!(*cell, BACKGROUND.extend(1.0));
            }
        }

        let expected = RenderConfig::default().encoder.encode(BACKGROUND.extend(1.0));
        assert!(renderer.display().pixels().iter().all(|p| *p == expected));
    }

    #[test]
    fn test_background_is_exact_for_any_sample_count() {
        for background in [0.1, 0.3, 0.7, 0.123, 0.9, 1.7] {
            let scene = TriangleScene::empty(Color::splat(background));

            for samples in 1..=9 {
                let config = RenderConfig::default().with_samples_per_frame(samples);
                let params = FrameParams {
                    width: 3,
                    height: 2,
                    camera: camera(),
                    frame_index: 0,
                    config: &config,
                };

                let pixel = render_pixel(&params, &scene, 2, 1);
                assert_eq!(
                    pixel.to_array().map(f32::to_bits),
                    [background.to_bits(); 3],
                    "background {} with {} spp gave {:?}",
                    background,
                    samples,
                    pixel
                );
            }
        }
    }

    #[test]
    fn test_frames_are_deterministic() {
        let scene = lit_floor();
        let config = RenderConfig::default().with_samples_per_frame(2);

        let mut a = Renderer::new(12, 9, config.clone()).unwrap();
        let mut b = Renderer::new(12, 9, config).unwrap();
        for _ in 0..2 {
            a.render_frame(&scene, &camera()).unwrap();
            b.render_frame(&scene, &camera()).unwrap();
        }

        assert_eq!(to_bits(a.accumulation().cells()), to_bits(b.accumulation().cells()));
        assert_eq!(a.display().pixels(), b.display().pixels());
    }

    #[test]
    fn test_parallel_frame_matches_per_pixel_render() {
        let scene = lit_floor();
        let config = RenderConfig::default().with_jitter(Jitter::Tent);
        let params = FrameParams {
            width: 7,
            height: 5,
            camera: camera(),
            frame_index: 0,
            config: &config,
        };
        let mut accumulation = AccumulationBuffer::new(7, 5);
        let mut display = DisplayBuffer::new(7, 5);

        render_frame(&params, &scene, &mut accumulation, &mut display).unwrap();

        for y in 0..5 {
            for x in 0..7 {
                let expected = render_pixel(&params, &scene, x, y).extend(1.0);
                assert_eq!(accumulation.get(x, y), expected, "pixel ({}, {})", x, y);
                assert_eq!(display.get(x, y), config.encoder.encode(expected));
            }
        }
    }

    #[test]
    fn test_accumulation_is_non_negative() {
        let scene = lit_floor();
        let mut renderer = Renderer::new(16, 16, RenderConfig::default()).unwrap();

        for _ in 0..3 {
            renderer.render_frame(&scene, &camera()).unwrap();
        }
        assert!(renderer
            .accumulation()
            .cells()
            .iter()
            .all(|c| c.min_element() >= 0.0 && c.is_finite()));
    }

    #[test]
    fn test_camera_change_restarts_accumulation() {
        let scene = TriangleScene::empty(BACKGROUND);
        let mut renderer = Renderer::new(4, 4, RenderConfig::default()).unwrap();

        renderer.render_frame(&scene, &camera()).unwrap();
        renderer.render_frame(&scene, &camera()).unwrap();
        assert_eq!(renderer.frame_index(), 2);

        let moved = CameraBasis::look_at(Vec3::new(1.0, 0.5, 3.0), Vec3::ZERO, Vec3::Y, 60.0, 1.0);
        let stats = renderer.render_frame(&scene, &moved).unwrap();
        assert_eq!(stats.frame_index, 0);
        assert_eq!(stats.total_samples, RenderConfig::default().samples_per_frame);
        assert_eq!(renderer.frame_index(), 1);
    }

    #[test]
    fn test_resize_and_reset() {
        let scene = TriangleScene::empty(BACKGROUND);
        let mut renderer = Renderer::new(4, 4, RenderConfig::default()).unwrap();
        renderer.render_frame(&scene, &camera()).unwrap();

        renderer.resize(4, 4).unwrap();
        assert_eq!(renderer.frame_index(), 1);

        renderer.resize(6, 2).unwrap();
        assert_eq!((renderer.width(), renderer.height()), (6, 2));
        assert_eq!(renderer.display().pixels().len(), 12);
        assert_eq!(renderer.frame_index(), 0);

        renderer.render_frame(&scene, &camera()).unwrap();
        renderer.reset();
        assert_eq!(renderer.frame_index(), 0);
        assert!(renderer.accumulation().cells().iter().all(|c| *c == Vec4::ZERO));

        assert!(matches!(renderer.resize(0, 3), Err(RenderError::EmptyImage { .. })));
    }

    #[test]
    fn test_set_config_validates_and_resets() {
        let scene = TriangleScene::empty(BACKGROUND);
        let mut renderer = Renderer::new(2, 2, RenderConfig::default()).unwrap();
        renderer.render_frame(&scene, &camera()).unwrap();

        assert!(renderer
            .set_config(RenderConfig::default().with_samples_per_frame(0))
            .is_err());
        assert_eq!(renderer.frame_index(), 1);

        renderer
            .set_config(RenderConfig::default().with_max_bounces(5))
            .unwrap();
        assert_eq!(renderer.config().max_bounces, 5);
        assert_eq!(renderer.frame_index(), 0);
    }

    #[test]
    fn test_mismatched_buffers_are_rejected() {
        let scene = TriangleScene::empty(BACKGROUND);
        let config = RenderConfig::default();
        let params = FrameParams {
            width: 4,
            height: 4,
            camera: camera(),
            frame_index: 0,
            config: &config,
        };

        let mut accumulation = AccumulationBuffer::new(4, 4);
        let mut display = DisplayBuffer::new(4, 3);
        assert!(matches!(
            render_frame(&params, &scene, &mut accumulation, &mut display),
            Err(RenderError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn test_invalid_renderer_setup() {
        assert!(matches!(
            Renderer::new(0, 4, RenderConfig::default()),
            Err(RenderError::EmptyImage { .. })
        ));
        assert!(matches!(
            Renderer::new(4, 4, RenderConfig::default().with_max_bounces(0)),
            Err(RenderError::InvalidConfig(_))
        ));
    }
}
