//! g1tex CLI - Command-line tool for converting Gust G1T textures.
//!
//! This is the main entry point for the g1tex command-line application.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use g1tex::prelude::*;

/// g1tex - Gust G1T texture to DDS converter
#[derive(Parser)]
#[command(name = "g1tex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log recipe selection and other debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show what a DDS file contains
    Info {
        /// Input DDS file
        input: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert a raw texture payload to DDS
    Unpack {
        /// Raw texture payload
        input: PathBuf,

        /// Output DDS file
        #[arg(short, long)]
        output: PathBuf,

        /// The input starts with a G1T entry header describing the texture
        #[arg(long)]
        header: bool,

        /// The texture's word from the archive's global flag table
        #[arg(long, default_value = "0", value_parser = parse_global_flags)]
        global_flags: u32,

        /// Texture type code (e.g. 0x59)
        #[arg(short = 't', long = "type", value_parser = parse_type_code)]
        type_code: Option<u8>,

        /// Texture width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Texture height in pixels
        #[arg(long)]
        height: Option<u32>,

        /// Number of mipmap levels
        #[arg(short, long, default_value_t = 1)]
        mipmaps: u32,

        /// Number of frames in the texture array
        #[arg(long, default_value_t = 1)]
        frames: u32,

        /// Truncate oversized payloads instead of failing
        #[arg(long)]
        lenient: bool,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Convert a DDS file to a raw texture payload
    Pack {
        /// Input DDS file
        input: PathBuf,

        /// Output payload file
        #[arg(short, long)]
        output: PathBuf,

        /// Texture type code (e.g. 0x59)
        #[arg(short = 't', long = "type", value_parser = parse_type_code)]
        type_code: u8,

        /// Mipmap levels to keep (0 keeps all)
        #[arg(short, long, default_value_t = 0)]
        mipmaps: u32,

        /// Prefix the payload with a G1T entry header
        #[arg(long)]
        header: bool,

        /// Entry header to update instead of writing a fresh one
        #[arg(long, requires = "header")]
        template: Option<PathBuf>,

        /// Global flag word of the template entry
        #[arg(long, default_value = "0", value_parser = parse_global_flags)]
        global_flags: u32,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Convert every texture listed in a JSON manifest to DDS
    BatchUnpack {
        /// Manifest file
        manifest: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// Target platform, by name or id
    #[arg(short, long, env = "G1TEX_PLATFORM", default_value = "Windows", value_parser = parse_platform)]
    platform: Platform,

    /// Type table to resolve codes against (extract or repack)
    #[arg(long, env = "G1TEX_PROFILE", default_value = "extract")]
    profile: FormatProfile,

    /// Flip rows in addition to any platform flip
    #[arg(long)]
    flip: bool,
}

impl CommonArgs {
    fn options(&self, strict_size: bool) -> TranscodeOptions {
        TranscodeOptions {
            profile: self.profile,
            force_flip: self.flip,
            strict_size,
        }
    }
}

/// One texture of a batch manifest.
#[derive(Debug, Deserialize)]
struct ManifestEntry {
    /// Raw payload, relative to the manifest.
    input: PathBuf,
    /// Output name, relative to the output directory.
    #[serde(default)]
    output: Option<PathBuf>,
    #[serde(rename = "type")]
    type_code: u8,
    #[serde(default)]
    platform: Option<String>,
    width: u32,
    height: u32,
    #[serde(default = "one")]
    mipmaps: u32,
    #[serde(default = "one")]
    frames: u32,
}

fn one() -> u32 {
    1
}

#[derive(Serialize)]
struct InfoReport {
    #[serde(flatten)]
    descriptor: TextureDescriptor,
    dxgi_format: Option<u32>,
    payload_offset: usize,
    payload_size: usize,
    expected_size: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Info { input, json } => {
            cmd_info(&input, json)?;
        }
        Commands::Unpack {
            input,
            output,
            header,
            global_flags,
            type_code,
            width,
            height,
            mipmaps,
            frames,
            lenient,
            common,
        } => {
            let raw = fs::read(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let options = common.options(!lenient);
            let (type_code, descriptor, payload) = if header {
                describe_from_header(&raw, common.platform, common.profile, global_flags)?
            } else {
                let (Some(type_code), Some(width), Some(height)) = (type_code, width, height) else {
                    bail!("--type, --width and --height are required without --header");
                };
                let descriptor = TextureDescriptor::new(TextureFormat::Dx10, width, height)
                    .with_platform(common.platform)
                    .with_mipmaps(mipmaps)
                    .with_frames(frames);
                (type_code, descriptor, raw)
            };
            cmd_unpack(type_code, descriptor, payload, &output, &options)?;
        }
        Commands::Pack {
            input,
            output,
            type_code,
            mipmaps,
            header,
            template,
            global_flags,
            common,
        } => {
            let target = PackTarget {
                type_code,
                platform: common.platform,
                mipmaps,
            };
            let entry = match (header, template) {
                (false, _) => None,
                (true, None) => Some(None),
                (true, Some(path)) => {
                    let raw = fs::read(&path)
                        .with_context(|| format!("Failed to read {}", path.display()))?;
                    let mut reader =
                        BinaryReader::with_endian(&raw, common.platform.metadata_endian());
                    let entry = Entry::read(&mut reader, global_flags)
                        .context("Failed to read template entry")?;
                    Some(Some(entry))
                }
            };
            cmd_pack(&input, &output, &target, entry, &common.options(true))?;
        }
        Commands::BatchUnpack {
            manifest,
            output,
            common,
        } => {
            cmd_batch_unpack(&manifest, &output, &common)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn cmd_info(input: &Path, json: bool) -> Result<()> {
    let data = fs::read(input).context("Failed to read input file")?;
    let info = g1tex::dds::parse(&data).context("Failed to parse DDS headers")?;
    let descriptor = info.descriptor;

    let report = InfoReport {
        descriptor,
        dxgi_format: info.dxgi_format,
        payload_offset: info.payload_offset,
        payload_size: info.payload(&data).len(),
        expected_size: descriptor.payload_size()?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Format:     {}", descriptor.format);
    println!("Dimensions: {}x{}", descriptor.width, descriptor.height);
    println!("Mipmaps:    {}", descriptor.mipmaps);
    println!("Frames:     {}", descriptor.frames);
    if descriptor.cubemap {
        println!("Cubemap:    yes");
    }
    if let Some(code) = report.dxgi_format {
        println!("DXGI:       {}", code);
    }
    if descriptor.srgb {
        println!("Color:      sRGB");
    }
    if descriptor.normal_map {
        println!("Normal map: yes");
    }
    println!(
        "Payload:    {} bytes at offset {} (expected {})",
        report.payload_size, report.payload_offset, report.expected_size
    );

    Ok(())
}

/// Split an entry header off `raw` and describe the texture it announces.
fn describe_from_header(
    raw: &[u8],
    platform: Platform,
    profile: FormatProfile,
    global_flags: u32,
) -> Result<(u8, TextureDescriptor, Vec<u8>)> {
    let mut reader = BinaryReader::with_endian(raw, platform.metadata_endian());
    let entry = Entry::read(&mut reader, global_flags).context("Failed to read entry header")?;
    let descriptor = entry.descriptor(platform, profile)?;
    debug!(?entry, "entry header");
    Ok((entry.header.type_code, descriptor, raw[reader.position()..].to_vec()))
}

fn cmd_unpack(
    type_code: u8,
    descriptor: TextureDescriptor,
    payload: Vec<u8>,
    output: &Path,
    options: &TranscodeOptions,
) -> Result<()> {
    let start = Instant::now();
    let unpacked = unpack(type_code, descriptor, payload, options)
        .with_context(|| format!("Failed to unpack texture type 0x{type_code:02X}"))?;
    fs::write(output, &unpacked.dds).context("Failed to write output file")?;

    let d = unpacked.descriptor;
    info!(
        "Wrote {} ({} {}x{}, {} mipmaps) in {:?}",
        output.display(),
        d.format,
        d.width,
        d.height,
        d.mipmaps,
        start.elapsed()
    );
    Ok(())
}

/// Pack a DDS file. `entry` is `None` for a bare payload, `Some(None)` for
/// a fresh entry header and `Some(Some(template))` to update a template.
fn cmd_pack(
    input: &Path,
    output: &Path,
    target: &PackTarget,
    entry: Option<Option<Entry>>,
    options: &TranscodeOptions,
) -> Result<()> {
    let dds = fs::read(input).context("Failed to read input file")?;
    let packed = pack(&dds, target, options).context("Failed to pack texture")?;

    let mut out = Vec::new();
    if let Some(template) = entry {
        let entry = entry_for(target.type_code, template, &packed.descriptor)?;
        info!("Global flags for the archive table: 0x{:06x}", entry.global_flags);
        out.extend(entry.encode(target.platform.metadata_endian()));
    }
    out.extend_from_slice(&packed.payload);
    fs::write(output, out).context("Failed to write output file")?;

    info!(
        "Wrote {} ({} bytes of {} for {})",
        output.display(),
        packed.payload.len(),
        packed.descriptor.format,
        target.platform
    );
    Ok(())
}

/// Entry header for a packed texture, fresh or updated from `template`.
fn entry_for(
    type_code: u8,
    template: Option<Entry>,
    descriptor: &TextureDescriptor,
) -> Result<Entry> {
    let entry = match template {
        Some(mut entry) => {
            entry.update(descriptor)?;
            entry
        }
        None => Entry::for_texture(type_code, descriptor)?,
    };
    debug!(?entry, "entry header");
    Ok(entry)
}

fn cmd_batch_unpack(manifest: &Path, output: &Path, common: &CommonArgs) -> Result<()> {
    let text = fs::read_to_string(manifest).context("Failed to read manifest")?;
    let entries: Vec<ManifestEntry> =
        serde_json::from_str(&text).context("Failed to parse manifest")?;
    let base = manifest.parent().unwrap_or(Path::new("."));

    fs::create_dir_all(output)?;
    println!("Converting {} textures...", entries.len());

    let pb = ProgressBar::new(entries.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let failures: Vec<(PathBuf, anyhow::Error)> = entries
        .par_iter()
        .filter_map(|entry| {
            let result = convert_entry(entry, base, output, common);
            pb.inc(1);
            result.err().map(|e| (entry.input.clone(), e))
        })
        .collect();

    pb.finish_with_message("Done");
    for (path, err) in &failures {
        warn!("{}: {:#}", path.display(), err);
    }
    println!(
        "Converted {} textures in {:?} ({} errors)",
        entries.len() - failures.len(),
        start.elapsed(),
        failures.len()
    );

    Ok(())
}

fn convert_entry(entry: &ManifestEntry, base: &Path, output: &Path, common: &CommonArgs) -> Result<()> {
    let platform = match &entry.platform {
        Some(name) => parse_platform(name).map_err(anyhow::Error::msg)?,
        None => common.platform,
    };
    let input = base.join(&entry.input);
    let payload = fs::read(&input).with_context(|| format!("Failed to read {}", input.display()))?;
    let descriptor = TextureDescriptor::new(TextureFormat::Dx10, entry.width, entry.height)
        .with_platform(platform)
        .with_mipmaps(entry.mipmaps)
        .with_frames(entry.frames);

    let unpacked = unpack(entry.type_code, descriptor, payload, &common.options(true))?;

    let name = match &entry.output {
        Some(name) => name.clone(),
        None => entry.input.with_extension("dds"),
    };
    let output_path = output.join(name);
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output_path, &unpacked.dds)?;
    Ok(())
}

/// Parse a global flag word given in hex or decimal.
fn parse_global_flags(s: &str) -> std::result::Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid flag word '{s}': {e}"))
}

fn parse_platform(s: &str) -> std::result::Result<Platform, String> {
    Platform::from_name(s).ok_or_else(|| format!("unknown platform '{s}'"))
}

/// Parse a type code given in hex (`0x59`) or decimal (`89`).
fn parse_type_code(s: &str) -> std::result::Result<u8, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid type code '{s}': {e}"))
}
