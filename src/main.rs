//! addh CLI
//!
//! Command-line interface for adding address mappings to the hosts
//! file and the SSH client configuration in one go.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use addh::config::{Settings, SettingsFile};
use addh::files::{HostsFile, SshConfigFile};
use addh::output;

#[derive(Parser)]
#[command(name = "addh")]
#[command(
    author,
    version,
    about = "Add address mappings to the hosts file and SSH config in one go"
)]
#[command(propagate_version = true)]
struct Cli {
    /// Aliases followed by the address they map to
    #[arg(value_name = "ALIAS|ADDRESS")]
    args: Vec<String>,

    /// Login user recorded in new SSH host blocks
    #[arg(short, long)]
    user: Option<String>,

    /// Path to the hosts file
    #[arg(long, env = "ADDH_HOSTSFILE", global = true)]
    hosts_file: Option<PathBuf>,

    /// Path to the SSH client configuration
    #[arg(long, env = "ADDH_SSHCONFIG", global = true)]
    ssh_config: Option<PathBuf>,

    /// Path to the settings file
    #[arg(short, long, env = "ADDH_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Show resulting content without writing files
    #[arg(long, global = true)]
    dry_run: bool,

    /// Show detailed output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current content of both managed files
    Print,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);
    output::init_color();

    let file = SettingsFile::load_optional(cli.config.as_deref())?;
    let settings = Settings::resolve(
        cli.hosts_file,
        cli.ssh_config,
        cli.user,
        cli.dry_run,
        &file,
    )?;

    match cli.command {
        Some(Commands::Print) => print_files(&settings),
        None => run_add(&settings, &cli.args),
    }
}

/// Print both managed files as they currently stand on disk.
fn print_files(settings: &Settings) -> Result<()> {
    let hosts = load_hosts(settings)?;
    let ssh = load_ssh(settings)?;

    println!("{}", output::header("Hosts file", ""));
    print!("{hosts}");
    println!("{}", output::header("SSH config", "\n--\n"));
    print!("{ssh}");

    Ok(())
}

/// Add a mapping to both files, or fall back to printing or a plain
/// normalizing rewrite when fewer than two arguments are given.
fn run_add(settings: &Settings, args: &[String]) -> Result<()> {
    if args.is_empty() {
        return print_files(settings);
    }

    let mut hosts = load_hosts(settings)?;
    let mut ssh = load_ssh(settings)?;

    // With a single argument there is nothing to map; the files are
    // written back as-is, which normalizes their formatting.
    if args.len() > 1 {
        let (aliases, address) = args.split_at(args.len() - 1);
        let address = &address[0];

        tracing::debug!(?aliases, address, "Adding mapping");
        hosts.add_host(aliases, address);
        ssh.add_host(aliases, address, settings.user.as_deref());
    }

    if settings.dry_run {
        println!("{}", output::header("Hosts file", ""));
        print!("{hosts}");
        println!("{}", output::header("SSH config", "\n--\n"));
        print!("{ssh}");
        eprintln!("{}", output::skipped(&settings.hosts_file));
        eprintln!("{}", output::skipped(&settings.ssh_config));
        return Ok(());
    }

    hosts
        .write(&settings.hosts_file)
        .with_context(|| format!("Failed to write {}", settings.hosts_file.display()))?;
    println!("{}", output::updated(&settings.hosts_file));

    ssh.write(&settings.ssh_config)
        .with_context(|| format!("Failed to write {}", settings.ssh_config.display()))?;
    println!("{}", output::updated(&settings.ssh_config));

    println!("\n{}", "✨ Mapping complete!".green().bold());
    Ok(())
}

fn load_hosts(settings: &Settings) -> Result<HostsFile> {
    HostsFile::load(&settings.hosts_file)
        .with_context(|| format!("Failed to load {}", settings.hosts_file.display()))
}

fn load_ssh(settings: &Settings) -> Result<SshConfigFile> {
    SshConfigFile::load(&settings.ssh_config)
        .with_context(|| format!("Failed to load {}", settings.ssh_config.display()))
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}
