//! SumScan CLI - Multi-Algorithm File Checksums
//!
//! Computes CRC-16/32/64 and xxHash64/128 digests over memory-mapped files.

use clap::Parser;
use console::style;
use sumscan::config::{AlgorithmSet, CliArgs, Commands, OutputFormat};
use sumscan::error::Result;
use sumscan::fs::MappedFile;
use sumscan::hash::{benchmark_stream, hash_stream, BenchmarkReport, Crc32Backend, DigestResult};
use sumscan::progress::HashProgress;
use sumscan::system::{CpuFeatures, HostInfo};
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    // Parse CLI arguments
    let args = CliArgs::parse();

    // Handle result
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: CliArgs) -> Result<()> {
    // Handle subcommands
    if let Some(command) = &args.command {
        return handle_command(command);
    }

    // Require a file for hashing
    let Some(file) = args.file.clone() else {
        eprintln!("Usage: sumscan <FILE> [OPTIONS]");
        eprintln!("       sumscan --help for more information");
        eprintln!("       sumscan info    - host and CPU capability report");
        std::process::exit(1);
    };

    let mapped = MappedFile::open(&file)?;

    if !args.quiet && args.output_format == OutputFormat::Text {
        print_file_header(&mapped);
    }

    if args.benchmark {
        cmd_benchmark(&mapped, args.output_format)
    } else {
        cmd_hash(&mapped, &args)
    }
}

fn handle_command(command: &Commands) -> Result<()> {
    match command {
        Commands::Info { detailed } => cmd_info(*detailed),
    }
}

fn print_file_header(mapped: &MappedFile) {
    let path = mapped.path();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let dir = path
        .parent()
        .map(|p| p.display().to_string())
        .unwrap_or_default();

    println!("File  : {}", name);
    println!("Path  : {}", dir);
    println!(
        "Size  : {}",
        style(humansize::format_size(mapped.len(), humansize::BINARY)).color256(208)
    );
    println!();
}

fn cmd_hash(mapped: &MappedFile, args: &CliArgs) -> Result<()> {
    let request = AlgorithmSet::from_cli(args);

    let progress = if args.progress && !args.quiet && args.output_format == OutputFormat::Text {
        HashProgress::new(mapped.len())
    } else {
        HashProgress::disabled()
    };

    let mut observer = |processed: u64, _total: u64| progress.set_position(processed);
    let result = hash_stream(mapped.source(), request, Some(&mut observer))?;
    progress.finish();

    match args.output_format {
        OutputFormat::Json => {
            let report = result.to_report(mapped.path().display().to_string());
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => print_digests(&result, args.quiet),
    }

    Ok(())
}

fn print_digests(result: &DigestResult, quiet: bool) {
    for digest in result.digests() {
        println!("{:<6}: {}", digest.algorithm.name(), digest);
    }
    if !quiet {
        println!();
        println!(
            "Time  : {} s",
            style(format!("{:.6}", result.elapsed.as_secs_f64())).yellow()
        );
    }
}

fn cmd_benchmark(mapped: &MappedFile, format: OutputFormat) -> Result<()> {
    let report = benchmark_stream(mapped.source())?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => print_benchmark(&report),
    }

    Ok(())
}

fn print_benchmark(report: &BenchmarkReport) {
    for entry in &report.entries {
        println!(
            "{:<6}: {} {} {} MB/s {}",
            entry.algorithm.name(),
            entry.digest,
            style("@").green(),
            style(format!("{:.2}", entry.throughput_mbps)).color256(208),
            style(format!("({:.6} s)", entry.elapsed_seconds())).green(),
        );
    }
    println!();
    println!(
        "Time  : {} s",
        style(format!("{:.6}", report.total_elapsed.as_secs_f64())).yellow()
    );
}

fn cmd_info(detailed: bool) -> Result<()> {
    println!("SumScan v{}\n", sumscan::VERSION);

    let info = HostInfo::collect();
    info.print_summary();

    let backend = Crc32Backend::get();
    println!(
        "{} {}",
        style(format!("{:<10}:", "CRC-32")).green(),
        if backend.is_hardware() {
            "hardware (SSE4.2 crc32 instruction)"
        } else {
            "software (table fallback)"
        }
    );

    if detailed {
        println!();
        CpuFeatures::detect().print_summary();
    }

    Ok(())
}
