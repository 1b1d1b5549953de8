use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "rtisff", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a light position file and print the rig.
    Lights(LightsArgs),
    /// Print the focus heights an acquisition config produces.
    Sweep(SweepArgs),
    /// Build the frame schedule and write the metadata CSV.
    Plan(PlanArgs),
}

#[derive(Parser, Debug)]
struct LightsArgs {
    /// Input `.lp` file.
    #[arg(long)]
    lp: PathBuf,
}

#[derive(Parser, Debug)]
struct SweepArgs {
    /// Acquisition config JSON.
    #[arg(long)]
    config: PathBuf,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Acquisition config JSON.
    #[arg(long)]
    config: PathBuf,

    /// Also write render settings, timeline and keyframes as JSON.
    #[arg(long)]
    plan_json: Option<PathBuf>,

    /// Build and validate everything but write no files.
    #[arg(long)]
    dry_run: bool,
}

#[derive(serde::Serialize)]
struct PlanDocument<'a> {
    render: rtisff::RenderSettings,
    timeline: &'a rtisff::ScheduleTimeline,
    keyframes: &'a [rtisff::Keyframe],
    markers: &'a [rtisff::Marker],
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Lights(args) => cmd_lights(args),
        Command::Sweep(args) => cmd_sweep(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn load_config(path: &Path) -> anyhow::Result<rtisff::AcquisitionConfig> {
    let cfg = rtisff::AcquisitionConfig::load(path)
        .with_context(|| format!("load acquisition config '{}'", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

fn cmd_lights(args: LightsArgs) -> anyhow::Result<()> {
    let rig = rtisff::LightRig::load_lp(&args.lp)
        .with_context(|| format!("read light rig '{}'", args.lp.display()))?;

    println!("index,x,y,z,dir_x,dir_y,dir_z");
    for light in &rig {
        let dir = light.direction_to_origin().unwrap_or_else(rtisff::Vec3::zeros);
        println!(
            "{},{},{},{},{},{},{}",
            light.index,
            light.position.x,
            light.position.y,
            light.position.z,
            dir.x,
            dir.y,
            dir.z
        );
    }
    eprintln!("{} lights", rig.len());
    Ok(())
}

fn cmd_sweep(args: SweepArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.config)?;
    let sweep = cfg.focus_sweep()?;
    for (i, z) in sweep.heights().enumerate() {
        let state = cfg.camera.mode.state_for(z);
        println!(
            "{i},{z},{},{}",
            state.location.z, state.focus_distance
        );
    }
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.config)?;

    let mut session = rtisff::AcquisitionSession::new(cfg.camera);
    session.set_lights(cfg.light_rig()?);
    session.set_focus(cfg.focus_sweep()?);

    let total = session.rebuild_schedule()?.total_frames();
    tracing::info!(
        lights = session.lights().len(),
        samples = session.focus().len(),
        frames = total,
        "schedule built"
    );

    let render = session.render_settings(&cfg.output)?;
    let mut sink = rtisff::InMemoryKeyframeSink::new();
    session.apply_keyframes(&mut sink)?;

    if args.dry_run {
        session.emit_metadata(&cfg.output.base_filename)?;
        eprintln!(
            "dry run: {} frames, {} metadata lines, template {}",
            total,
            session.metadata().len(),
            render.filepath_template
        );
        return Ok(());
    }

    let csv = session.write_csv(&cfg.output)?;
    eprintln!("wrote {}", csv.display());

    if let Some(out) = &args.plan_json {
        let timeline = session
            .timeline()
            .context("schedule missing after rebuild (bug)")?;
        let doc = PlanDocument {
            render,
            timeline,
            keyframes: sink.keyframes(),
            markers: sink.markers(),
        };
        if let Some(parent) = out.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        let f = std::fs::File::create(out)
            .with_context(|| format!("create plan json '{}'", out.display()))?;
        serde_json::to_writer_pretty(std::io::BufWriter::new(f), &doc)
            .with_context(|| format!("write plan json '{}'", out.display()))?;
        eprintln!("wrote {}", out.display());
    }

    Ok(())
}
