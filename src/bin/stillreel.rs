use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use stillreel::{
    CapabilityReport, ConversionSession, ConvertOutcome, FfmpegCliBackend, FfmpegCliOpts,
    ProbeOptions, Selection, SessionOpts, StillreelConfig, TerminalView, collect_inputs,
    common_extension, render_load_failure, render_unsupported,
};

const EXIT_FAILED: u8 = 1;
const EXIT_UNSUPPORTED: u8 = 2;
const EXIT_LOAD_FAILED: u8 = 3;

#[derive(Parser, Debug)]
#[command(name = "stillreel", version, about = "Join numbered still images into an MP4")]
struct Cli {
    /// JSON config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// ffmpeg executable to use (overrides the config file).
    #[arg(long, global = true)]
    ffmpeg: Option<PathBuf>,

    /// More log output (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert images (files or directories of images) into an MP4.
    Convert(ConvertArgs),
    /// Show the frame order the inputs would be converted in.
    List(ListArgs),
    /// Check platform capabilities and the ffmpeg binary.
    Probe,
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input images or directories.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output MP4 path. Defaults to the configured download name in the current directory.
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Overwrite the output if it already exists.
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// Input images or directories.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut cfg = match &cli.config {
        Some(path) => StillreelConfig::from_path(path)?,
        None => StillreelConfig::default(),
    };
    if let Some(ffmpeg) = &cli.ffmpeg {
        cfg = cfg.with_ffmpeg_path(ffmpeg);
    }
    cfg.validate()?;

    match cli.cmd {
        Command::Convert(args) => cmd_convert(&cfg, args),
        Command::List(args) => cmd_list(args),
        Command::Probe => cmd_probe(&cfg),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn probe_options(cfg: &StillreelConfig) -> ProbeOptions {
    ProbeOptions {
        scratch_root: cfg.scratch_root.clone(),
    }
}

fn cmd_convert(cfg: &StillreelConfig, args: ConvertArgs) -> anyhow::Result<ExitCode> {
    let report = CapabilityReport::detect(&probe_options(cfg));
    if !report.is_supported() {
        eprint!("{}", render_unsupported(&report).red());
        return Ok(ExitCode::from(EXIT_UNSUPPORTED));
    }

    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(&cfg.download_name));
    if !args.overwrite && out.exists() {
        anyhow::bail!(
            "output file '{}' already exists (pass --overwrite to replace it)",
            out.display()
        );
    }

    let files = collect_inputs(&args.inputs)?;

    let backend = FfmpegCliBackend::new(FfmpegCliOpts::from(cfg));
    let opts = SessionOpts {
        download_name: cfg.download_name.clone(),
        ..SessionOpts::default()
    };

    let mut session = ConversionSession::new(backend, TerminalView::new(), opts);
    if let Err(err) = session.load_encoder() {
        eprint!("{}", render_load_failure(&err, &cfg.ffmpeg_path).red());
        return Ok(ExitCode::from(EXIT_LOAD_FAILED));
    }
    session.view_mut().render();
    session.prepare_files(files);

    match session.convert() {
        ConvertOutcome::Completed(link) => {
            let written = link.save_to(session.urls(), &out)?;
            eprintln!(
                "{} {} ({written} bytes)",
                "saved".green().bold(),
                out.display()
            );
            Ok(ExitCode::SUCCESS)
        }
        ConvertOutcome::Skipped => {
            eprintln!("{}", "no input images found".yellow());
            Ok(ExitCode::from(EXIT_FAILED))
        }
        ConvertOutcome::Rejected(_) | ConvertOutcome::Failed(_) => {
            Ok(ExitCode::from(EXIT_FAILED))
        }
    }
}

fn cmd_list(args: ListArgs) -> anyhow::Result<ExitCode> {
    let files = collect_inputs(&args.inputs)?;
    let selection = Selection::from_unsorted(files);
    for entry in selection.entries() {
        println!("{}", entry.label());
    }
    if selection.is_empty() {
        return Ok(ExitCode::SUCCESS);
    }
    match common_extension(selection.files()) {
        Ok(ext) => {
            println!(
                "{} frame(s), {} bytes, extension .{ext}",
                selection.len(),
                selection.total_bytes()
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            Ok(ExitCode::from(EXIT_FAILED))
        }
    }
}

fn cmd_probe(cfg: &StillreelConfig) -> anyhow::Result<ExitCode> {
    let report = CapabilityReport::detect(&probe_options(cfg));
    for check in &report.checks {
        let mark = if check.supported {
            "ok".green()
        } else {
            "missing".red()
        };
        println!("{:<16} {mark} {}", check.name, check.detail);
    }

    let ffmpeg = ffmpeg_line(&cfg.ffmpeg_path);
    println!("{:<16} {}", "ffmpeg", ffmpeg.as_deref().unwrap_or("not found"));

    if !report.is_supported() {
        return Ok(ExitCode::from(EXIT_UNSUPPORTED));
    }
    if ffmpeg.is_err() {
        return Ok(ExitCode::from(EXIT_LOAD_FAILED));
    }
    Ok(ExitCode::SUCCESS)
}

fn ffmpeg_line(path: &Path) -> anyhow::Result<String> {
    stillreel::probe_ffmpeg_version(path).with_context(|| format!("probe '{}'", path.display()))
}
