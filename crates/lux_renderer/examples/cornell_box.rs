//! Progressive Cornell box render.
//!
//! Usage: `cargo run --release --example cornell_box -- [frames] [output.png] [config.json]`

use anyhow::{Context, Result};
use lux_renderer::{
    CameraBasis, Color, Material, MaterialId, RenderConfig, Renderer, SceneBuilder, TriangleScene,
    Vec3,
};
use std::time::Instant;

const WIDTH: u32 = 400;
const HEIGHT: u32 = 400;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut args = std::env::args().skip(1);
    let frames: u32 = match args.next() {
        Some(arg) => arg.parse().with_context(|| format!("Invalid frame count: {}", arg))?,
        None => 64,
    };
    let output = args.next().unwrap_or_else(|| "cornell_box.png".to_string());
    let config = match args.next() {
        Some(path) => RenderConfig::from_json_file(&path)
            .with_context(|| format!("Failed to load config from {}", path))?,
        None => RenderConfig::default(),
    };

    let start = Instant::now();
    let scene = build_scene()?;
    log::info!("Scene built in {:?}", start.elapsed());

    let camera = CameraBasis::look_at(
        Vec3::new(0.0, 0.0, 3.4),  // look_from
        Vec3::new(0.0, 0.0, 0.0),  // look_at
        Vec3::Y,
        40.0,
        WIDTH as f32 / HEIGHT as f32,
    );

    let mut renderer = Renderer::new(WIDTH, HEIGHT, config)?;
    let start = Instant::now();
    for _ in 0..frames {
        let stats = renderer.render_frame(&scene, &camera)?;
        if (stats.frame_index + 1) % 16 == 0 {
            log::info!("{} frames, {} spp", stats.frame_index + 1, stats.total_samples);
        }
    }
    log::info!("Rendered {} frames in {:?}", frames, start.elapsed());

    renderer.display().save(&output)?;
    Ok(())
}

/// Add a quad centered at `center` spanning `±u` and `±v`, facing `u × v`.
fn add_face(builder: &mut SceneBuilder, center: Vec3, u: Vec3, v: Vec3, material: MaterialId) {
    builder.add_quad([center - u - v, center + u - v, center + u + v, center - u + v], material);
}

/// Axis-aligned box with outward-facing sides.
fn add_block(builder: &mut SceneBuilder, center: Vec3, half: Vec3, material: MaterialId) {
    let (x, y, z) = (Vec3::X * half.x, Vec3::Y * half.y, Vec3::Z * half.z);
    add_face(builder, center + x, y, z, material);
    add_face(builder, center - x, z, y, material);
    add_face(builder, center + y, z, x, material);
    add_face(builder, center - y, x, z, material);
    add_face(builder, center + z, x, y, material);
    add_face(builder, center - z, y, x, material);
}

fn build_scene() -> Result<TriangleScene> {
    let mut builder = SceneBuilder::new().with_background(Color::ZERO);

    let white = builder.add_material(Material::diffuse(Color::splat(0.73)));
    let red = builder.add_material(Material::diffuse(Color::new(0.65, 0.05, 0.05)));
    let green = builder.add_material(Material::diffuse(Color::new(0.12, 0.45, 0.15)));
    let light = builder.add_material(Material::emitter(Color::splat(15.0)));

    // Room interior, open towards the camera
    add_face(&mut builder, Vec3::new(0.0, -1.0, 0.0), Vec3::Z, Vec3::X, white);
    add_face(&mut builder, Vec3::new(0.0, 1.0, 0.0), Vec3::X, Vec3::Z, white);
    add_face(&mut builder, Vec3::new(0.0, 0.0, -1.0), Vec3::X, Vec3::Y, white);
    add_face(&mut builder, Vec3::new(-1.0, 0.0, 0.0), Vec3::Y, Vec3::Z, red);
    add_face(&mut builder, Vec3::new(1.0, 0.0, 0.0), Vec3::Z, Vec3::Y, green);

    // Ceiling light, just below the ceiling and facing down
    add_face(&mut builder, Vec3::new(0.0, 0.99, 0.0), Vec3::X * 0.25, Vec3::Z * 0.25, light);

    add_block(&mut builder, Vec3::new(-0.35, -0.4, -0.3), Vec3::new(0.28, 0.6, 0.28), white);
    add_block(&mut builder, Vec3::new(0.4, -0.7, 0.3), Vec3::splat(0.3), white);

    Ok(builder.build()?)
}
