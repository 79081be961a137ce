use anyhow::{bail, Context, Result};
use cadence_fs::{MAX_ENTRIES, SECTOR_SIZE};
use cadence_inject::{
    inject_file, DiskImage, APP_START_SECTOR, DEFAULT_IMAGE, DEFAULT_IMAGE_SECTORS,
    LOAD_WINDOW_SECTORS,
};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a binary into the image and link it in the file table
    Inject {
        /// Binary to store
        source: PathBuf,

        /// Path to the disk image
        #[arg(short, long, default_value = DEFAULT_IMAGE)]
        image: PathBuf,

        /// Name in the file table (defaults to the source file name)
        #[arg(short, long)]
        name: Option<String>,

        /// Absolute sector where the content starts
        #[arg(short, long, default_value_t = APP_START_SECTOR)]
        sector: u32,
    },
    /// List the occupied file table slots
    List {
        /// Path to the disk image
        #[arg(short, long, default_value = DEFAULT_IMAGE)]
        image: PathBuf,
    },
    /// Create a zero-filled image with an empty file table
    Create {
        /// Path to the disk image
        #[arg(short, long, default_value = DEFAULT_IMAGE)]
        image: PathBuf,

        /// Image size in sectors
        #[arg(long, default_value_t = DEFAULT_IMAGE_SECTORS)]
        sectors: u32,

        /// Force overwrite
        #[arg(short, long)]
        force: bool,
    },
    /// Dump the sectors of a linked file
    Read {
        /// Name in the file table
        name: String,

        /// Path to the disk image
        #[arg(short, long, default_value = DEFAULT_IMAGE)]
        image: PathBuf,

        /// Number of sectors to read
        #[arg(long, default_value_t = LOAD_WINDOW_SECTORS)]
        sectors: u32,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Inject {
            source,
            image,
            name,
            sector,
        } => {
            let name = match name {
                Some(name) => name,
                None => match source.file_name().and_then(|n| n.to_str()) {
                    Some(n) => n.to_owned(),
                    None => bail!("cannot derive a name from {}, pass --name", source.display()),
                },
            };
            let report = inject_file(&image, &name, &source, sector)?;
            println!("{report}");
        }
        Commands::List { image } => {
            let mut disk = DiskImage::open(&image)?;
            let directory = disk.read_directory()?;
            println!("Files on {}:", image.display());
            let mut used = 0;
            for (slot, entry) in directory.active() {
                println!(
                    "{:>3}  {:<12} sector {}",
                    slot,
                    entry.name_as_str(),
                    entry.start_sector()
                );
                used += 1;
            }
            println!("{} of {} slots used", used, MAX_ENTRIES);
        }
        Commands::Create {
            image,
            sectors,
            force,
        } => {
            println!(
                "Creating {} ({} sectors, {} bytes)...",
                image.display(),
                sectors,
                sectors as u64 * SECTOR_SIZE as u64
            );
            DiskImage::create(&image, sectors, force)?;
            println!("Image ready.");
        }
        Commands::Read {
            name,
            image,
            sectors,
            output,
        } => {
            let mut disk = DiskImage::open(&image)?;
            let content = disk.read_file(&name, sectors as usize * SECTOR_SIZE)?;
            match output {
                Some(path) => std::fs::write(&path, &content)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => std::io::stdout()
                    .lock()
                    .write_all(&content)
                    .context("failed to write to stdout")?,
            }
        }
    }

    Ok(())
}
