//! Main entry point for the packview CLI application.
//!
//! Loads a data package and prints what it contains.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use packview::{
    CancelFlag, Cli, LoadReport, LocalFileReader, PackageData, Progress, ReadAt, SkippedEntry,
    load_package,
};

/// Application entry point.
///
/// Installs logging, loads the package named on the command line and
/// prints either a text or a JSON summary.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "packview=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let reader = LocalFileReader::new(Path::new(&cli.file))?;
    let archive_size = reader.size();

    let quiet = cli.is_quiet();
    let report = load_package(&reader, &cli.load_options(), &CancelFlag::new(), |p: &Progress| {
        if !quiet {
            print_progress(p);
        }
    })
    .await?;
    if !quiet {
        eprintln!();
    }

    if cli.json {
        let summary = Summary::new(&cli, &report);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&cli, &report, archive_size);
    }

    if !cli.is_very_quiet() && !cli.json {
        for skipped in &report.skipped {
            eprintln!("warning: skipped {}: {}", skipped.path, skipped.reason);
        }
    }

    Ok(())
}

/// Rewrite the progress line in place on stderr.
fn print_progress(progress: &Progress) {
    let mut stderr = std::io::stderr().lock();
    let _ = write!(
        stderr,
        "\r{:>3.0}%  {:<40}",
        progress.fraction * 100.0,
        progress.message
    );
    let _ = stderr.flush();
}

/// Print the human-readable summary, plus the lists selected by `-c`, `-s`
/// and `-a`.
///
/// # Arguments
///
/// * `cli` - Parsed command-line arguments
/// * `report` - The finished load
/// * `archive_size` - Size of the ZIP file in bytes
fn print_summary(cli: &Cli, report: &LoadReport, archive_size: u64) {
    let data = &report.data;

    println!("Archive:  {} ({}, {} entries)", cli.file, format_size(archive_size), report.entry_count);
    if !report.root_prefix.is_empty() {
        println!("Root:     {}", report.root_prefix);
    }
    if let Some(user) = &data.user_profile {
        println!("User:     {} ({})", display_user(user), user.id);
    }
    println!("Messages: {}", data.total_messages());
    println!("Channels: {}", data.total_channels());
    println!("Servers:  {} ({} with data)", data.total_servers(), data.servers.len());
    println!("Friends:  {}", data.total_friends());
    println!("Tickets:  {}", data.support_tickets.len());
    if !report.skipped.is_empty() {
        println!("Skipped:  {}", report.skipped.len());
    }

    if cli.channels {
        println!();
        println!("{:>8}  {:<8}  Channel", "Messages", "Type");
        println!("{}", "-".repeat(50));
        for channel in data.channels.values() {
            let kind = channel.meta.as_ref().map_or("?", |m| m.kind.as_str());
            let name = match channel.server_name() {
                Some(server) => format!("{} / {}", server, channel.display_name),
                None => channel.display_name.clone(),
            };
            println!("{:>8}  {:<8}  {}", channel.message_count(), kind, name);
        }
    }

    if cli.servers {
        println!();
        println!("{:>8}  {:>6}  Server", "Channels", "Emoji");
        println!("{}", "-".repeat(50));
        for server in data.servers.values() {
            println!(
                "{:>8}  {:>6}  {} ({})",
                server.channels.len(),
                server.emojis.len(),
                server.display_name,
                server.server_id
            );
        }
    }

    if cli.activity {
        println!();
        match &data.activity {
            Some(sections) => {
                for (section, events) in sections {
                    println!("{:>8}  {}", events.len(), section);
                }
            }
            None => println!("No activity data"),
        }
    }
}

fn display_user(user: &packview::models::UserProfile) -> String {
    match &user.global_name {
        Some(name) if !name.is_empty() => format!("{name} (@{})", user.username),
        _ => user.username.clone(),
    }
}

/// Machine-readable summary printed by `--json`.
#[derive(Serialize)]
struct Summary<'a> {
    file: &'a str,
    entries: usize,
    root_prefix: &'a str,
    user_id: Option<&'a str>,
    username: Option<&'a str>,
    total_messages: usize,
    total_channels: usize,
    total_servers: usize,
    total_friends: usize,
    support_tickets: usize,
    data_exports: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    channels: Option<BTreeMap<&'a str, usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    servers: Option<BTreeMap<&'a str, &'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    activity: Option<BTreeMap<&'a str, usize>>,
    skipped: &'a [SkippedEntry],
}

impl<'a> Summary<'a> {
    fn new(cli: &'a Cli, report: &'a LoadReport) -> Self {
        let data: &PackageData = &report.data;
        let user = data.user_profile.as_ref();

        Self {
            file: &cli.file,
            entries: report.entry_count,
            root_prefix: &report.root_prefix,
            user_id: user.map(|u| u.id.as_str()),
            username: user.map(|u| u.username.as_str()),
            total_messages: data.total_messages(),
            total_channels: data.total_channels(),
            total_servers: data.total_servers(),
            total_friends: data.total_friends(),
            support_tickets: data.support_tickets.len(),
            data_exports: data.data_exports.len(),
            channels: cli.channels.then(|| {
                data.channels
                    .iter()
                    .map(|(id, c)| (id.as_str(), c.message_count()))
                    .collect()
            }),
            servers: cli.servers.then(|| {
                data.servers
                    .iter()
                    .map(|(id, s)| (id.as_str(), s.display_name.as_str()))
                    .collect()
            }),
            activity: cli.activity.then(|| {
                data.activity
                    .iter()
                    .flatten()
                    .map(|(section, events)| (section.as_str(), events.len()))
                    .collect()
            }),
            skipped: &report.skipped,
        }
    }
}

/// Format a byte size into a human-readable string.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(format_size(500), "500 bytes");
/// assert_eq!(format_size(1536), "1.50 KB");
/// ```
fn format_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    match size {
        s if s >= GB => format!("{:.2} GB", s as f64 / GB as f64),
        s if s >= MB => format!("{:.2} MB", s as f64 / MB as f64),
        s if s >= KB => format!("{:.2} KB", s as f64 / KB as f64),
        s => format!("{s} bytes"),
    }
}
