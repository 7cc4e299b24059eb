use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "x")]
#[command(about = "Development automation for famicore")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all CI checks (fmt, clippy, build, test)
    Ci,
    /// Quick checks before commit (fmt, clippy)
    Check,
    /// Format code
    Fmt {
        #[arg(long)]
        check: bool,
    },
    /// Run clippy
    Clippy,
    /// Build the project
    Build {
        #[arg(long)]
        release: bool,
    },
    /// Run tests
    Test {
        /// Run only CPU module tests
        #[arg(long)]
        cpu: bool,
        /// Run only PPU module tests
        #[arg(long)]
        ppu: bool,
    },
    /// Run benchmarks
    Bench,
    /// Disassemble a ROM through the famicore binary
    Disasm {
        /// Path to the ROM file
        rom_path: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Ci => run_ci(),
        Commands::Check => run_check(),
        Commands::Fmt { check } => run_fmt(check),
        Commands::Clippy => run_clippy(),
        Commands::Build { release } => run_build(release),
        Commands::Test { cpu, ppu } => run_test(cpu, ppu),
        Commands::Bench => execute(Command::new("cargo").arg("bench")),
        Commands::Disasm { rom_path } => {
            execute(Command::new("cargo").args(["run", "--", "-d", &rom_path]))
        }
    }
}

fn run_ci() -> Result<()> {
    println!("{}", "=== Running CI Pipeline ===".bold().blue());
    let start = Instant::now();

    run_fmt(true)?;
    run_clippy()?;
    run_build(false)?;
    run_test(false, false)?;

    println!(
        "\n{} {}",
        "CI passed in".green().bold(),
        format!("{:.2}s", start.elapsed().as_secs_f64()).bold()
    );
    Ok(())
}

fn run_check() -> Result<()> {
    println!("{}", "=== Running Quick Checks ===".bold().blue());
    run_fmt(true)?;
    run_clippy()
}

fn run_fmt(check: bool) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.args(["fmt", "--all"]);
    if check {
        cmd.args(["--", "--check"]);
    }
    execute(&mut cmd)
}

fn run_clippy() -> Result<()> {
    execute(Command::new("cargo").args(["clippy", "--all-targets", "--", "-D", "warnings"]))
}

fn run_build(release: bool) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("build");
    if release {
        cmd.arg("--release");
    }
    execute(&mut cmd)
}

fn run_test(cpu: bool, ppu: bool) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("test");
    if cpu {
        cmd.arg("cpu::");
    } else if ppu {
        cmd.arg("ppu::");
    }
    execute(&mut cmd)
}

fn execute(cmd: &mut Command) -> Result<()> {
    let rendered = format!("{:?}", cmd);
    println!("{} {}", "$".dimmed(), rendered.dimmed());
    let status = cmd.status()?;
    if !status.success() {
        bail!("command failed: {}", rendered);
    }
    Ok(())
}
