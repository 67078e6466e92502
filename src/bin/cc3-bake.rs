use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "cc3-bake", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Bake one character into flattened PBR materials and a prefab.
    Bake(BakeArgs),
    /// List the kernels the CPU backend can run.
    Kernels,
}

#[derive(Parser, Debug)]
struct BakeArgs {
    /// Character manifest JSON.
    #[arg(long)]
    manifest: PathBuf,

    /// Project root that asset paths are relative to.
    #[arg(long)]
    project: PathBuf,

    /// Optional bake settings JSON.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Directory holding `<Type>.mat` template overrides.
    #[arg(long)]
    templates: Option<PathBuf>,

    /// Backend to use.
    #[arg(long, value_enum, default_value_t = BackendChoice::Cpu)]
    backend: BackendChoice,

    /// Worker threads for the CPU backend; overrides the settings file.
    #[arg(long)]
    threads: Option<usize>,

    /// Skip every kernel dispatch and only rebuild materials and the prefab.
    #[arg(long)]
    no_backend: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendChoice {
    Cpu,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Bake(args) => cmd_bake(args),
        Command::Kernels => {
            for name in cc3_bake::CpuBackend::kernel_names() {
                println!("{name}");
            }
            Ok(())
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_settings(path: Option<&Path>) -> anyhow::Result<cc3_bake::BakeSettings> {
    let Some(path) = path else {
        return Ok(cc3_bake::BakeSettings::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read settings '{}'", path.display()))?;
    cc3_bake::BakeSettings::from_json(&text)
        .with_context(|| format!("parse settings '{}'", path.display()))
}

fn make_backend(
    choice: BackendChoice,
    threads: Option<usize>,
) -> anyhow::Result<Box<dyn cc3_bake::ComputeBackend>> {
    let kind = match choice {
        BackendChoice::Cpu => cc3_bake::BackendKind::Cpu,
    };
    Ok(cc3_bake::create_backend(
        kind,
        cc3_bake::CpuBackendOpts { threads },
    )?)
}

fn cmd_bake(args: BakeArgs) -> anyhow::Result<()> {
    let mut settings = read_settings(args.settings.as_deref())?;
    if args.threads.is_some() {
        settings.threads = args.threads;
    }
    settings.validate()?;

    let mut db = cc3_bake::FsAssetDatabase::open(&args.project)
        .with_context(|| format!("open project '{}'", args.project.display()))?;
    let manifest = cc3_bake::CharacterManifest::from_path(&args.manifest)?;
    let character = cc3_bake::Character::load(&manifest, &mut db)
        .with_context(|| format!("load character '{}'", manifest.model_path))?;

    let mut templates = cc3_bake::BuiltinTemplates::new(&settings);
    if let Some(dir) = &args.templates {
        templates = templates
            .with_overrides_from(dir)
            .with_context(|| format!("load templates from '{}'", dir.display()))?;
    }

    let mut backend = if args.no_backend {
        None
    } else {
        Some(make_backend(args.backend, settings.threads)?)
    };

    let report = cc3_bake::bake_character(
        &character,
        backend
            .as_deref_mut()
            .map(|b| b as &mut dyn cc3_bake::ComputeBackend),
        &mut db,
        &templates,
        &settings,
    )?;

    let failed = report.failed.len();
    println!("{}", serde_json::to_string_pretty(&report)?);
    if failed > 0 {
        anyhow::bail!("{failed} material(s) failed to bake");
    }
    Ok(())
}
