//! Veles CLI - Command-line tool for reading Source engine game files.
//!
//! This is the main entry point for the Veles command-line application.

use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use veles::prelude::*;

/// Veles - Source engine game file reading tool
#[derive(Parser)]
#[command(name = "veles")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List contents of a VPK archive
    List {
        /// Path to the VPK file (standalone or _dir.vpk index)
        #[arg(short, long, env = "INPUT_VPK")]
        vpk: PathBuf,

        /// Show detailed information
        #[arg(short, long)]
        detailed: bool,
    },

    /// Extract files from a VPK archive
    Extract {
        /// Path to the VPK file (standalone or _dir.vpk index)
        #[arg(short, long, env = "INPUT_VPK")]
        vpk: PathBuf,

        /// Output directory
        #[arg(short, long, env = "OUTPUT_FOLDER")]
        output: PathBuf,

        /// Entry names to extract (everything when empty)
        names: Vec<String>,
    },

    /// Show the header of a demo recording
    DemInfo {
        /// Input demo file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Show the header of a VTF texture
    VtfInfo {
        /// Input VTF file
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::List { vpk, detailed } => {
            cmd_list(&vpk, detailed)?;
        }
        Commands::Extract { vpk, output, names } => {
            cmd_extract(&vpk, &output, &names)?;
        }
        Commands::DemInfo { input } => {
            cmd_dem_info(&input)?;
        }
        Commands::VtfInfo { input } => {
            cmd_vtf_info(&input)?;
        }
    }

    Ok(())
}

fn cmd_list(vpk_path: &PathBuf, detailed: bool) -> Result<()> {
    let archive = VpkArchive::open(vpk_path).context("Failed to open VPK archive")?;

    for entry in archive.iter() {
        if detailed {
            println!(
                "{:>10} {:>5} {} {}",
                entry.len(),
                if entry.is_inline() {
                    "-".to_string()
                } else {
                    format!("{:03}", entry.archive_index())
                },
                if entry.preload_bytes() > 0 { "P" } else { " " },
                entry.name()
            );
        } else {
            println!("{}", entry.name());
        }
    }

    println!("\nTotal: {} entries", archive.entry_count());

    Ok(())
}

fn cmd_extract(vpk_path: &PathBuf, output: &PathBuf, names: &[String]) -> Result<()> {
    println!("Opening VPK archive: {}", vpk_path.display());

    let start = Instant::now();
    let archive = VpkArchive::open(vpk_path).context("Failed to open VPK archive")?;
    println!("Loaded {} entries in {:?}", archive.entry_count(), start.elapsed());

    let entries: Vec<&VpkEntry> = if names.is_empty() {
        archive.iter().collect()
    } else {
        names
            .iter()
            .filter_map(|name| {
                let entry = archive.find(name);
                if entry.is_none() {
                    eprintln!("Not found: {name}");
                }
                entry
            })
            .collect()
    };

    println!("Extracting {} entries...", entries.len());

    let pb = ProgressBar::new(entries.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    fs::create_dir_all(output)?;

    let start = Instant::now();
    let mut errors = 0;
    for &entry in &entries {
        let output_path = output.join(entry.output_path());
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }

        match extract_entry(&archive, entry, &output_path) {
            Ok(()) => {}
            Err(err) => {
                eprintln!("Error extracting {}: {err:#}", entry.name());
                errors += 1;
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Done");
    println!(
        "Extraction completed in {:?} ({} errors)",
        start.elapsed(),
        errors
    );

    Ok(())
}

fn extract_entry(archive: &VpkArchive, entry: &VpkEntry, output_path: &PathBuf) -> Result<()> {
    let mut stream = archive.open_stream(entry)?;
    let mut file = File::create(output_path)
        .with_context(|| format!("Failed to create {}", output_path.display()))?;
    io::copy(&mut stream, &mut file)?;
    Ok(())
}

fn cmd_dem_info(input: &PathBuf) -> Result<()> {
    let file = File::open(input).context("Failed to open demo file")?;
    let demo = Demo::decode(file).context("Failed to decode demo")?;
    let header = demo.header();

    println!("Demo protocol:    {}", header.demo_protocol);
    println!("Network protocol: {}", header.network_protocol);
    println!("Server:           {}", header.server_name);
    println!("Client:           {}", header.client_name);
    println!("Map:              {}", header.map_name);
    println!("Game directory:   {}", header.game_directory);
    println!("Playback:         {:.1}s, {} ticks", header.playback_time, header.ticks);
    println!("Frames:           {} decoded", demo.frames().len());

    Ok(())
}

fn cmd_vtf_info(input: &PathBuf) -> Result<()> {
    let mut file = File::open(input).context("Failed to open VTF file")?;
    let header = decode_header(&mut file).context("Failed to decode VTF header")?;

    let version = { header.version };
    println!("Version:    {}.{}", version[0], version[1]);
    println!("Size:       {}x{}", { header.width }, { header.height });
    println!("Format:     {:?}", header.image_format());
    println!("Mipmaps:    {}", { header.mipmap_count });
    println!("Frames:     {}", { header.frames });
    println!("Flags:      {:#010x}", { header.flags });

    Ok(())
}
