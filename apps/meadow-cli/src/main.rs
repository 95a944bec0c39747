use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use glam::Vec3;
use meadow_common::{TimeUniform, Vertex};
use meadow_input::{Action, InputEvent, InputSettings, InputState, Key};
use meadow_mesh::{ground_plane, uv_sphere, SphereParams};
use meadow_render_wgpu::{
    time_bind_group, time_bind_group_layout, GpuContext, GpuModel, WgpuTimeBuffer,
};
use meadow_scene::{
    HostBlades, HostMirror, HostModel, ManualTimeSource, SceneConfig, SceneRegistry, TimeMirror,
    TransformTarget,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "meadow-cli", about = "Headless driver for the meadow scene layer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Scene configuration file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and GPU layout sizes
    Info,
    /// Generate a UV sphere and report its topology
    Mesh {
        #[arg(short, long, default_value = "1.0")]
        radius: f32,
        #[arg(long, default_value = "20")]
        lat: u32,
        #[arg(long, default_value = "20")]
        lon: u32,
    },
    /// Run the scene frame loop on host memory with a scripted clock
    Simulate {
        /// Number of frames to run
        #[arg(short, long, default_value = "60")]
        frames: u32,
        /// Seconds per frame
        #[arg(long, default_value = "0.016666")]
        frame_time: f64,
        /// Direction keys held for the whole run, e.g. "wd"
        #[arg(long, default_value = "")]
        hold: String,
    },
    /// Run the scene frame loop against a headless GPU device
    Gpu {
        #[arg(short, long, default_value = "60")]
        frames: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = match &cli.config {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SceneConfig::default(),
    };

    match cli.command {
        Commands::Info => {
            println!("meadow-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("time uniform: {} bytes", TimeUniform::SIZE);
            println!("vertex: {} bytes", Vertex::SIZE);
            println!("interactive object: {}", config.interactive_object);
        }
        Commands::Mesh { radius, lat, lon } => {
            let mesh = uv_sphere(&SphereParams::new(radius, lat, lon))?;
            let max_error = mesh
                .vertices
                .iter()
                .map(|v| (Vec3::from(v.position).length() - radius).abs())
                .fold(0.0_f32, f32::max);
            println!("UV sphere r={radius} lat={lat} lon={lon}");
            println!(
                "vertices={} indices={} triangles={}",
                mesh.vertex_count(),
                mesh.index_count(),
                mesh.triangle_count()
            );
            println!(
                "indices in range: {}, max radius error: {max_error:e}",
                mesh.indices_in_range()
            );
        }
        Commands::Simulate {
            frames,
            frame_time,
            hold,
        } => simulate(&config, frames, frame_time, &hold)?,
        Commands::Gpu { frames } => run_gpu(&config, frames)?,
    }

    Ok(())
}

fn input_settings(config: &SceneConfig) -> InputSettings {
    InputSettings {
        move_speed: config.move_speed,
        orbit_sensitivity: config.orbit_sensitivity as f64,
        zoom_sensitivity: config.zoom_sensitivity as f64,
    }
}

fn parse_keys(hold: &str) -> Result<Vec<Key>> {
    hold.chars()
        .map(|c| match c.to_ascii_lowercase() {
            'w' => Ok(Key::W),
            'a' => Ok(Key::A),
            's' => Ok(Key::S),
            'd' => Ok(Key::D),
            other => bail!("unsupported key {other:?}; expected any of w, a, s, d"),
        })
        .collect()
}

/// Apply one frame's actions. Camera orbit belongs to the renderer; it is only logged here.
fn apply_actions<M, B, T>(scene: &mut SceneRegistry<M, B, T>, actions: &[Action]) -> Result<()>
where
    M: TransformTarget,
    T: TimeMirror,
{
    for action in actions {
        match *action {
            Action::MoveObject(d) => scene.move_object(d.x, d.y, d.z)?,
            Action::Orbit { yaw, pitch, zoom } => {
                tracing::debug!(yaw, pitch, zoom, "camera orbit");
            }
        }
    }
    Ok(())
}

fn simulate(config: &SceneConfig, frames: u32, frame_time: f64, hold: &str) -> Result<()> {
    let _span = tracing::info_span!("simulate", frames).entered();

    let plane = Rc::new(HostModel::new("plane"));
    let sphere = Rc::new(HostModel::new("sphere"));
    let blades = Rc::new(HostBlades::new("grass", config.plane_size));

    let clock = ManualTimeSource::new(0.0);
    let mut scene: SceneRegistry<HostModel, HostBlades, HostMirror> =
        SceneRegistry::with_time_source(HostMirror::new(), Box::new(clock.clone()), config)?;
    scene.add_model(&plane);
    if config.interactive_object {
        scene.add_model(&sphere);
        scene.set_interactive_target(&sphere);
    }
    scene.add_blade_system(&blades);

    let mut input = InputState::new(input_settings(config));
    for key in parse_keys(hold)? {
        input.push(InputEvent::Key { key, pressed: true });
    }

    for _ in 0..frames {
        let actions = input.poll();
        apply_actions(&mut scene, &actions)?;
        clock.advance(frame_time);
        scene.update_time();
    }

    let time = scene.clock().mirror().read();
    println!(
        "frames={frames} total_time={:.4}s last_delta={:.4}s",
        time.total_time, time.delta_time
    );
    if let Some(object) = scene.object() {
        let s = object.state();
        println!(
            "sphere position=({:.3}, {:.3}, {:.3}) radius={:.2} pushes={}",
            s.position().x,
            s.position().y,
            s.position().z,
            s.radius(),
            sphere.updates()
        );
    }
    let order: Vec<String> = scene.live_models().map(|m| m.name().to_string()).collect();
    println!("draw order: {}", order.join(", "));
    Ok(())
}

fn run_gpu(config: &SceneConfig, frames: u32) -> Result<()> {
    let ctx = GpuContext::headless()?;
    println!("adapter: {}", ctx.adapter_info().name);

    let plane = Rc::new(GpuModel::upload(
        &ctx.device,
        ctx.queue.clone(),
        "plane",
        ground_plane(config.plane_size)?,
    )?);
    let sphere = Rc::new(GpuModel::upload(
        &ctx.device,
        ctx.queue.clone(),
        "sphere",
        uv_sphere(&config.sphere_params())?,
    )?);
    let blades = Rc::new(HostBlades::new("grass", config.plane_size));

    let mirror = WgpuTimeBuffer::new(&ctx.device, ctx.queue.clone())?;
    let mut scene: SceneRegistry<GpuModel, HostBlades, WgpuTimeBuffer> =
        SceneRegistry::new(mirror, config)?;
    scene.add_model(&plane);
    if config.interactive_object {
        scene.add_model(&sphere);
        scene.set_interactive_target(&sphere);
    }
    scene.add_blade_system(&blades);

    let layout = time_bind_group_layout(&ctx.device);
    let _time_binding = time_bind_group(&ctx.device, &layout, scene.time_buffer());

    let mut input = InputState::new(input_settings(config));
    input.push(InputEvent::Key {
        key: Key::D,
        pressed: true,
    });

    for _ in 0..frames {
        let actions = input.poll();
        apply_actions(&mut scene, &actions)?;
        scene.update_time();
        ctx.queue.submit(std::iter::empty());
    }

    let time = scene.time();
    println!(
        "frames={frames} total_time={:.4}s models={} indices={}",
        time.total_time,
        scene.live_models().count(),
        scene.live_models().map(|m| m.index_count()).sum::<u32>()
    );

    ctx.wait_idle();
    drop(scene);
    tracing::info!("GPU run finished");
    Ok(())
}
