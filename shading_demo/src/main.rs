//! Material sweep renderer
//!
//! Shades a grid of spheres on the CPU, metalness increasing left to right and
//! roughness increasing top to bottom, and writes the result as a PNG.

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use image::{Rgba, RgbaImage};
use surface_shading::prelude::*;

const DEFAULT_OUTPUT: &str = "material_sweep.png";
const SPHERE_DEPTH: f32 = -9.0;
const SPHERE_SPACING: f32 = 2.2;
const MIN_ROUGHNESS: f32 = 0.05;

#[derive(Debug)]
struct SweepSettings {
    cell_size: u32,
    columns: u32,
    rows: u32,
    base_color: Vec4,
}

fn main() -> Result<()> {
    env_logger::init();

    let matches = Command::new("shading_demo")
        .about("Renders a metalness/roughness sphere sweep through the surface shading pipeline")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Shading configuration (.toml or .ron)"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Output PNG path")
                .default_value(DEFAULT_OUTPUT),
        )
        .arg(
            Arg::new("cell-size")
                .short('s')
                .long("cell-size")
                .value_name("PIXELS")
                .help("Edge length of each sphere's cell")
                .value_parser(clap::value_parser!(u32).range(8..=1024))
                .default_value("96"),
        )
        .arg(
            Arg::new("grid")
                .short('g')
                .long("grid")
                .value_name("N")
                .help("Number of metalness and roughness steps")
                .value_parser(clap::value_parser!(u32).range(2..=16))
                .default_value("5"),
        )
        .arg(
            Arg::new("base-color-texture")
                .long("base-color-texture")
                .value_name("FILE")
                .help("sRGB image wrapped around every sphere"),
        )
        .arg(
            Arg::new("dump-config")
                .long("dump-config")
                .value_name("FILE")
                .help("Write the effective configuration and exit"),
        )
        .arg(
            Arg::new("uniform-sizes")
                .long("uniform-sizes")
                .action(ArgAction::SetTrue)
                .help("Print the byte sizes of the uploaded uniform blocks"),
        )
        .get_matches();

    let config = match matches.get_one::<String>("config") {
        Some(path) => {
            log::info!("Loading shading config from {}", path);
            ShadingConfig::load_from_file(path)
                .with_context(|| format!("failed to load config {path}"))?
        }
        None => ShadingConfig::default(),
    };

    if let Some(path) = matches.get_one::<String>("dump-config") {
        config
            .save_to_file(path)
            .with_context(|| format!("failed to write config {path}"))?;
        log::info!("Wrote effective config to {}", path);
        return Ok(());
    }

    let pipeline = ShadingPipeline::new(&config).context("invalid shading configuration")?;
    let frame = PerFrameData::indoor_warm()?;

    if matches.get_flag("uniform-sizes") {
        print_uniform_sizes(&frame);
    }

    let mut bank = TextureBank::new();
    let mut textures = MaterialTextures::new(bank.add_sampler(SamplerParams::default()));
    let mut flags = TextureFlags::empty();
    if let Some(path) = matches.get_one::<String>("base-color-texture") {
        let texture = Texture::load(path, TexelEncoding::Srgb)
            .with_context(|| format!("failed to load base color texture {path}"))?;
        textures = textures.with(TextureSlot::BaseColor, bank.add_texture(texture));
        flags |= TextureFlags::BASE_COLOR;
    }

    let grid = *matches.get_one::<u32>("grid").unwrap_or(&5);
    let settings = SweepSettings {
        cell_size: *matches.get_one::<u32>("cell-size").unwrap_or(&96),
        columns: grid,
        rows: grid,
        base_color: Vec4::new(0.9, 0.55, 0.3, 1.0),
    };

    log::info!(
        "Rendering {}x{} sweep with {:?} shading, {} lights",
        settings.columns,
        settings.rows,
        pipeline.model(),
        frame.light_count()
    );

    let image = render_sweep(&pipeline, &frame, &settings, &textures, &bank, flags);

    let output = matches
        .get_one::<String>("output")
        .map_or(DEFAULT_OUTPUT, String::as_str);
    image
        .save(output)
        .with_context(|| format!("failed to write {output}"))?;
    log::info!("Saved {}x{} image to {}", image.width(), image.height(), output);

    Ok(())
}

fn print_uniform_sizes(frame: &PerFrameData) {
    use surface_shading::uniforms::{MaterialUniform, PerFrameUniform};

    let per_frame = PerFrameUniform::from_frame(frame);
    let material = MaterialUniform::from(&MaterialData::default());
    println!("per-frame block: {} bytes", per_frame.as_bytes().len());
    println!("material block:  {} bytes", material.as_bytes().len());
}

fn render_sweep(
    pipeline: &ShadingPipeline,
    frame: &PerFrameData,
    settings: &SweepSettings,
    textures: &MaterialTextures,
    bank: &TextureBank,
    flags: TextureFlags,
) -> RgbaImage {
    let width = settings.columns * settings.cell_size;
    let height = settings.rows * settings.cell_size;
    let mut image = RgbaImage::new(width, height);

    for row in 0..settings.rows {
        let roughness = step(row, settings.rows).max(MIN_ROUGHNESS);
        for column in 0..settings.columns {
            let metalness = step(column, settings.columns);
            let material = MaterialData::default()
                .with_base_color(settings.base_color)
                .with_metallic_roughness(metalness, roughness)
                .with_textures(flags);
            let draw = DrawInputs::new(&material, textures, bank);
            let center = sphere_center(column, row, settings);

            for y in 0..settings.cell_size {
                for x in 0..settings.cell_size {
                    let pixel = match sphere_fragment(x, y, settings.cell_size, &center) {
                        Some(fragment) => to_rgba8(&pipeline.shade(frame, &draw, &fragment)),
                        None => Rgba([0, 0, 0, 0]),
                    };
                    image.put_pixel(column * settings.cell_size + x, row * settings.cell_size + y, pixel);
                }
            }
        }
    }

    image
}

/// Position of `index` within `count` evenly spaced steps over [0, 1]
fn step(index: u32, count: u32) -> f32 {
    index as f32 / (count - 1) as f32
}

fn sphere_center(column: u32, row: u32, settings: &SweepSettings) -> Vec3 {
    let half_width = (settings.columns - 1) as f32 * 0.5;
    let half_height = (settings.rows - 1) as f32 * 0.5;
    Vec3::new(
        (column as f32 - half_width) * SPHERE_SPACING,
        (half_height - row as f32) * SPHERE_SPACING,
        SPHERE_DEPTH,
    )
}

/// Fragment on the visible hemisphere of a unit sphere under pixel (x, y) of its cell
fn sphere_fragment(x: u32, y: u32, cell_size: u32, center: &Vec3) -> Option<FragmentInput> {
    let half = cell_size as f32 * 0.5;
    let sx = (x as f32 + 0.5 - half) / half;
    let sy = (half - y as f32 - 0.5) / half;
    let r2 = sx * sx + sy * sy;
    if r2 > 1.0 {
        return None;
    }

    let normal = Vec3::new(sx, sy, (1.0 - r2).sqrt());
    // tangent follows increasing longitude; degenerate only at the poles, which are off-screen
    let tangent = Vec3::new(normal.z, 0.0, -normal.x).normalize();
    let binormal = normal.cross(&tangent);
    let uv = Vec2::new(
        normal.x.atan2(normal.z) / std::f32::consts::TAU + 0.5,
        normal.y.clamp(-1.0, 1.0).acos() / std::f32::consts::PI,
    );

    Some(FragmentInput {
        position: center + normal,
        normal,
        tangent,
        binormal,
        uv,
    })
}

fn to_rgba8(color: &Vec4) -> Rgba<u8> {
    let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    Rgba([
        quantize(color.x),
        quantize(color.y),
        quantize(color.z),
        quantize(color.w),
    ])
}
