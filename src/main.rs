use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use wallpaper_gal::config::{self, GalleryConfig};
use wallpaper_gal::rename::{self, Policy, RenameOptions};
use wallpaper_gal::store::DiskStore;
use wallpaper_gal::{logging, manifest, output};

#[derive(Parser)]
#[command(name = "wallpaper-gal")]
#[command(about = "Manifest builder and themed renamer for wallpaper galleries")]
#[command(long_about = "\
Manifest builder and themed renamer for wallpaper galleries

Every subfolder of the source root is a collection. Images pair up by name:
a file whose stem ends in the minified marker is the light copy of the file
without it.

  assets/wallpapers/
  ├── Nature/
  │   ├── sunset.jpg          # Full variant  → download_path
  │   ├── sunset-min.jpg      # Minified      → image_path
  │   └── river-min.webp      # Minified only → both paths
  └── Empty/                  # No images     → left out of the manifest

'build' merges the scan into the existing manifest: collections it can no
longer see are kept as they were.

'rename' gives every pair in one folder a new themed name. It is destructive:
there is no dry run and no undo.

Run 'wallpaper-gal gen-config' to print a documented gallery.toml.")]
#[command(version = env!("VERSION_LABEL"))]
struct Cli {
    /// Config file (stock defaults when it does not exist)
    #[arg(long, default_value = config::CONFIG_FILENAME, global = true)]
    config: PathBuf,

    /// More diagnostics on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

/// Per-run overrides for the manifest section of the config.
#[derive(clap::Args, Clone)]
struct ManifestArgs {
    /// Folder of collection folders
    #[arg(long)]
    source: Option<String>,

    /// Directory the manifest is written to
    #[arg(long)]
    output_dir: Option<String>,
}

impl ManifestArgs {
    fn apply(self, config: &mut GalleryConfig) {
        if let Some(source) = self.source {
            config.manifest.source_root = source;
        }
        if let Some(output_dir) = self.output_dir {
            config.manifest.output_dir = output_dir;
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Scan collections, merge with the existing manifest and write it
    Build(ManifestArgs),
    /// Show what build would write, without writing
    Check(ManifestArgs),
    /// Rename image pairs in a folder to themed names
    Rename {
        /// Folder holding the images
        folder: PathBuf,

        /// Prepended to every new name
        #[arg(long)]
        prefix: Option<String>,

        /// Word assignment policy: exhausting or cycle
        #[arg(long)]
        policy: Option<Policy>,
    },
    /// Print a stock gallery.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Command::Build(args) => {
            let mut config = config::load_config(&cli.config)?;
            args.apply(&mut config);
            println!("==> Building manifest from {}", config.manifest.source_root);
            let report = manifest::build(&DiskStore, &config)?;
            output::print_build_output(&report);
        }
        Command::Check(args) => {
            let mut config = config::load_config(&cli.config)?;
            args.apply(&mut config);
            println!("==> Checking {}", config.manifest.source_root);
            let report = manifest::plan(&DiskStore, &config)?;
            output::print_build_output(&report);
        }
        Command::Rename {
            folder,
            prefix,
            policy,
        } => {
            let config = config::load_config(&cli.config)?;
            let mut options = RenameOptions::from_config(&config).with_prefix(prefix);
            if let Some(policy) = policy {
                options = options.with_policy(policy);
            }
            let words = rename::shuffled(&config.rename.vocabulary, &mut rand::thread_rng());
            println!(
                "==> Renaming {} ({} policy)",
                folder.display(),
                options.policy
            );
            let report = rename::rename_folder(&DiskStore, &folder, &options, words)?;
            output::print_rename_output(&report);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
