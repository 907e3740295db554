mod config;
mod logging;
mod manifest;
mod output;
mod profile;
mod prompt;
mod quiz;
mod simulate;
mod submit;

use clap::Parser;
use reqwest::Client;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use tastequiz_core::{Level, TasteSession};

use crate::config::TastequizConfig;
use crate::output::ResultExport;
use crate::quiz::QuizOutcome;

pub fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

#[derive(Parser)]
#[command(name = "tastequiz", version, about = "Find your art taste through quick pairwise picks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Show debug logs on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (default: ~/.config/tastequiz/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Take the quiz interactively
    Run(RunArgs),
    /// Play a full session with a scripted preference
    Simulate(SimulateArgs),
    /// List the quiz levels
    Levels,
    /// Send an exported result to the taste vector service
    Submit(SubmitArgs),
    /// Create a default config file at ~/.config/tastequiz/config.toml
    Init,
}

/// Options shared by `run` and `simulate`.
#[derive(clap::Args)]
struct SessionArgs {
    /// Scored quiz manifest (JSON)
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Quiz level: l1, l2 or l3
    #[arg(long)]
    level: Option<String>,

    /// Style to focus on (repeatable). Default: every style in the manifest
    #[arg(long = "style")]
    styles: Vec<String>,

    /// Output JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Write the result export to this file
    #[arg(long)]
    export: Option<PathBuf>,
}

#[derive(clap::Args)]
struct RunArgs {
    #[command(flatten)]
    session: SessionArgs,

    /// Mood (repeatable, 1 to 3)
    #[arg(long = "mood")]
    moods: Vec<String>,

    /// Color (repeatable, 1 to 3)
    #[arg(long = "color")]
    colors: Vec<String>,

    /// Prefix shown before image paths (e.g. your local quiz image directory)
    #[arg(long)]
    image_root: Option<String>,
}

#[derive(clap::Args)]
struct SimulateArgs {
    #[command(flatten)]
    session: SessionArgs,

    /// Style the simulated user always prefers (repeatable)
    #[arg(long = "prefer")]
    prefer: Vec<String>,

    /// RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Stop an l3 session as soon as early finish is allowed
    #[arg(long)]
    finish_early: bool,
}

#[derive(clap::Args)]
struct SubmitArgs {
    /// Exported result file
    #[arg(long)]
    result: PathBuf,

    /// Taste vector service URL (also reads TASTE_SERVICE_URL env var)
    #[arg(long)]
    url: Option<String>,

    /// User ID to submit under
    #[arg(long)]
    user_id: Option<String>,

    /// Output JSON instead of a summary
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let config_path = cli.config.clone().unwrap_or_else(config::config_path);

    match cli.command {
        Commands::Run(args) => {
            let cfg = config::load_config(&config_path);
            run_quiz(args, &cfg, &config_path);
        }
        Commands::Simulate(args) => {
            let cfg = config::load_config(&config_path);
            run_simulate(args, &cfg, &config_path);
        }
        Commands::Levels => output::print_levels(),
        Commands::Submit(args) => {
            let cfg = config::load_config(&config_path);
            run_submit(args, cfg, &config_path).await;
        }
        Commands::Init => {
            let path = config::create_default_config();
            println!("Created config at {}", path.display());
            println!("Edit it to set your default manifest, level, etc.");
        }
    }
}

/// Build a session from CLI args merged with the config file (CLI wins).
fn start_session(args: &SessionArgs, cfg: &TastequizConfig, config_path: &Path) -> TasteSession {
    let manifest_path = args.manifest.clone()
        .or_else(|| cfg.manifest.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| {
            bail(format!("No manifest specified. Pass --manifest or set it in {}", config_path.display()));
        });

    let level: Level = args.level.as_deref()
        .or(cfg.level.as_deref())
        .unwrap_or("l1")
        .parse()
        .unwrap_or_else(|e| bail(e));

    let catalog = manifest::load_catalog(&manifest_path);
    let picked = if args.styles.is_empty() {
        None
    } else {
        Some(manifest::resolve_styles(&catalog, &args.styles))
    };

    TasteSession::new(catalog, level, picked.as_deref()).unwrap_or_else(|e| bail(e))
}

fn run_quiz(args: RunArgs, cfg: &TastequizConfig, config_path: &Path) {
    let moods = profile::pick_from(&args.moods, &profile::MOODS, "mood").unwrap_or_else(|e| bail(e));
    let colors = profile::pick_from(&args.colors, &profile::color_names(), "color").unwrap_or_else(|e| bail(e));

    let mut session = start_session(&args.session, cfg, config_path);
    let level_config = session.level().config();

    eprintln!("{} · {}", level_config.label, level_config.description);
    eprintln!("Styles: {}", session.active_styles().join(", "));
    eprintln!("Pick the image you prefer: 1/l or 2/r. q quits.\n");

    let outcome = quiz::play(&mut session, io::stdin().lock(), &mut io::stderr(), args.image_root.as_deref())
        .unwrap_or_else(|e| bail(e));
    if outcome == QuizOutcome::Abandoned {
        return;
    }

    finish_session(session, &moods, &colors, &args.session, cfg);
}

fn run_simulate(args: SimulateArgs, cfg: &TastequizConfig, config_path: &Path) {
    let mut session = start_session(&args.session, cfg, config_path);

    let preferred: HashSet<String> = preferred_styles(&session, &args.prefer);
    let mut rng = simulate::make_rng(args.seed);

    tracing::info!(
        level = %session.level(),
        preferred = preferred.len(),
        seed = ?args.seed,
        "simulating session"
    );

    simulate::run_simulation(&mut session, &preferred, args.finish_early, &mut rng)
        .unwrap_or_else(|e| bail(e));

    finish_session(session, &[], &[], &args.session, cfg);
}

/// Match `--prefer` values against the active styles, case-insensitively.
fn preferred_styles(session: &TasteSession, requested: &[String]) -> HashSet<String> {
    requested
        .iter()
        .map(|r| {
            session
                .active_styles()
                .iter()
                .find(|s| s.eq_ignore_ascii_case(r.trim()))
                .cloned()
                .unwrap_or_else(|| bail(format!("Preferred style \"{}\" is not in the active selection", r.trim())))
        })
        .collect()
}

fn finish_session(
    mut session: TasteSession,
    moods: &[String],
    colors: &[String],
    args: &SessionArgs,
    cfg: &TastequizConfig,
) {
    let result = session.result().unwrap_or_else(|e| bail(e)).clone();
    let export = ResultExport::new(&session, &result, moods, colors);

    if args.json {
        output::print_json(&export);
    } else {
        output::print_table(&export);
    }

    let path = args.export.clone().or_else(|| {
        cfg.export_dir
            .as_deref()
            .map(|dir| output::default_export_path(Path::new(dir), session.level()))
    });

    if let Some(path) = path {
        output::write_export(&path, &export).unwrap_or_else(|e| bail(e));
        eprintln!("Saved result to {}", path.display());
    }
}

async fn run_submit(args: SubmitArgs, cfg: TastequizConfig, config_path: &Path) {
    let url = args.url
        .or(cfg.taste_service_url)
        .or_else(|| std::env::var("TASTE_SERVICE_URL").ok())
        .unwrap_or_else(|| {
            bail(format!("No taste service URL. Pass --url, set TASTE_SERVICE_URL, or set it in {}", config_path.display()));
        });
    let user_id = args.user_id
        .or(cfg.user_id)
        .unwrap_or_else(|| {
            bail(format!("No user ID. Pass --user-id or set it in {}", config_path.display()));
        });

    let export = output::read_export(&args.result).unwrap_or_else(|e| bail(e));

    tracing::info!(url = %url, answered = export.questions_answered, "submitting result");

    let client = Client::new();
    let vector = submit::submit_result(&client, &url, &user_id, &export)
        .await
        .unwrap_or_else(|e| bail(e));

    if args.json {
        println!("{}", serde_json::json!({ "baselineVector": vector }));
    } else {
        let preview: Vec<String> = vector.iter().take(8).map(|v| format!("{v:.4}")).collect();
        let ellipsis = if vector.len() > 8 { ", …" } else { "" };
        println!("Baseline vector ({} dims): [{}{}]", vector.len(), preview.join(", "), ellipsis);
    }
}
