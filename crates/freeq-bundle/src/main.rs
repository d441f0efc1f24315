use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use freeq_bundle::{default_vst3_root, env_search_paths, uninstall, BundleConfig, Profile};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .ok();

    let cli = Cli::parse();
    match cli.command {
        Commands::Install(args) => execute_install(args),
        Commands::Uninstall(args) => execute_uninstall(args),
    }
}

#[derive(Parser)]
#[command(author, version, about = "Build, patch, and install the FreeQ VST3 bundle")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the plugin, embed rpath entries, and install the bundle.
    Install(InstallArgs),
    /// Remove the installed bundle.
    Uninstall(UninstallArgs),
}

#[derive(Args)]
struct InstallArgs {
    /// Build with the debug profile instead of release.
    #[arg(long)]
    debug: bool,
    /// Cargo target directory holding the build output.
    #[arg(long, default_value = "target")]
    target_dir: PathBuf,
    /// Install root (defaults to ~/.vst3).
    #[arg(long)]
    vst3_dir: Option<PathBuf>,
    /// Reuse an existing artifact instead of building.
    #[arg(long)]
    skip_build: bool,
    /// Do not embed LD_LIBRARY_PATH entries into the library's rpath.
    #[arg(long)]
    no_rpath: bool,
}

#[derive(Args)]
struct UninstallArgs {
    /// Install root (defaults to ~/.vst3).
    #[arg(long)]
    vst3_dir: Option<PathBuf>,
}

fn execute_install(args: InstallArgs) -> Result<()> {
    let vst3_root = match args.vst3_dir {
        Some(dir) => dir,
        None => default_vst3_root()?,
    };
    let rpath_dirs = if args.no_rpath {
        Vec::new()
    } else {
        env_search_paths()
    };

    let config = BundleConfig {
        profile: if args.debug {
            Profile::Debug
        } else {
            Profile::Release
        },
        target_dir: args.target_dir,
        vst3_root,
        rpath_dirs,
        skip_build: args.skip_build,
    };

    let report = freeq_bundle::run(&config)?;
    println!("Installed {}", report.installed.display());
    if report.rpaths_patched > 0 {
        println!("  rpath entries embedded: {}", report.rpaths_patched);
    }
    Ok(())
}

fn execute_uninstall(args: UninstallArgs) -> Result<()> {
    let vst3_root = match args.vst3_dir {
        Some(dir) => dir,
        None => default_vst3_root()?,
    };
    if uninstall(&vst3_root)? {
        println!("Removed {}", vst3_root.join(freeq_bundle::BUNDLE_NAME).display());
    } else {
        println!("Nothing to remove");
    }
    Ok(())
}
