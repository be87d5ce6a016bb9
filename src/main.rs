use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use zinfer::select::Selection;
use zinfer::{FlagOptions, Result, command, dump, render, synth};

#[derive(Parser)]
#[command(name = "zinfer")]
#[command(
    about = "Infer zpool/zfs create commands from current pool and dataset properties",
    long_about = None
)]
struct Cli {
    /// Omit enabled pool features that are not currently active.
    #[arg(long)]
    minimal_features: bool,

    /// Also include descendant datasets of the named datasets.
    #[arg(short = 'R', long, requires = "datasets")]
    recursive: bool,

    /// Read pool properties from a saved `zpool get all` dump.
    #[arg(long, value_name = "FILE", requires = "zfs_dump")]
    zpool_dump: Option<PathBuf>,

    /// Read dataset properties from a saved `zfs get all` dump.
    #[arg(long, value_name = "FILE", requires = "zpool_dump")]
    zfs_dump: Option<PathBuf>,

    /// zpool binary to run when no dumps are given.
    #[arg(long, default_value = command::DEFAULT_ZPOOL)]
    zpool: PathBuf,

    /// zfs binary to run when no dumps are given.
    #[arg(long, default_value = command::DEFAULT_ZFS)]
    zfs: PathBuf,

    #[arg(long, value_enum, default_value_t = Format::Shell)]
    format: Format,

    /// Pools or datasets to print. Prints everything if empty.
    datasets: Vec<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Shell,
    Json,
}

fn read_dump(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read dump file {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    // 1) Acquire both dumps.
    let (zpool_text, zfs_text) = match (&cli.zpool_dump, &cli.zfs_dump) {
        (Some(zpool), Some(zfs)) => (read_dump(zpool)?, read_dump(zfs)?),
        _ => (
            command::zpool_get_all(&cli.zpool)?,
            command::zfs_get_all(&cli.zfs)?,
        ),
    };

    // 2) Parse + resolve provenance.
    let forest = dump::parse_dumps(&zpool_text, &zfs_text)
        .context("error parsing pool properties")?
        .resolve()
        .context("error resolving inherited properties")?;

    // 3) Synthesize, then keep only what was asked for.
    let opts = FlagOptions {
        minimal_features: cli.minimal_features,
    };
    let mut selection = Selection::new(&cli.datasets, cli.recursive);
    let commands = selection.filter(synth::plan(&forest, &opts)?);

    // 4) Render.
    let out = match cli.format {
        Format::Shell => render::render_shell(&commands),
        Format::Json => render::render_json(&commands)?,
    };
    print!("{out}");

    let missing = render::render_unmatched(selection.unmatched());
    if !missing.is_empty() {
        if !commands.is_empty() {
            println!();
        }
        eprint!("{missing}");
    }

    Ok(())
}
