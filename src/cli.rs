use clap::Parser;

use crate::package::{ACTIVITY_SIZE_LIMIT, LoadOptions};

#[derive(Parser, Debug)]
#[command(name = "packview")]
#[command(version)]
#[command(about = "Inspect a Discord data package export", long_about = None)]
#[command(after_help = "Examples:\n  \
  packview package.zip           print a summary of the package\n  \
  packview -c -s package.zip     also list channels and servers\n  \
  packview --json package.zip    machine-readable summary on stdout")]
pub struct Cli {
    /// Data package ZIP file
    #[arg(value_name = "FILE")]
    pub file: String,

    /// List channels with message counts
    #[arg(short = 'c')]
    pub channels: bool,

    /// List servers
    #[arg(short = 's')]
    pub servers: bool,

    /// List activity sections with event counts
    #[arg(short = 'a')]
    pub activity: bool,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Quiet mode, no progress line (-qq => also no skip warnings)
    #[arg(short = 'q', action = clap::ArgAction::Count)]
    pub quiet: u8,

    /// Activity files of this many bytes or more are skipped
    #[arg(long, value_name = "BYTES", default_value_t = ACTIVITY_SIZE_LIMIT)]
    pub activity_limit: u64,
}

impl Cli {
    pub fn is_quiet(&self) -> bool {
        self.quiet > 0 || self.json
    }

    pub fn is_very_quiet(&self) -> bool {
        self.quiet > 1
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            activity_size_limit: self.activity_limit,
            ..LoadOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_onto_options() {
        let cli = Cli::parse_from(["packview", "-c", "-qq", "--activity-limit", "1024", "p.zip"]);
        assert_eq!(cli.file, "p.zip");
        assert!(cli.channels && !cli.servers);
        assert!(cli.is_very_quiet());
        assert_eq!(cli.load_options().activity_size_limit, 1024);
    }

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["packview", "--json", "p.zip"]);
        assert!(cli.is_quiet());
        assert_eq!(cli.load_options().activity_size_limit, ACTIVITY_SIZE_LIMIT);
    }
}
