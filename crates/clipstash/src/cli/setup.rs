use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "clipstash",
    bin_name = "clipstash",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Clipboard history for the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (overrides CLIPSTASH_DATA_DIR and the config file)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Config file (default: clipstash.toml in the OS config directory)
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Capture text, HTML or an image (defaults to stdin, then the clipboard)
    #[command(alias = "a", display_order = 1)]
    Add {
        /// Text words (joined with spaces)
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,

        /// Capture this HTML file; TEXT becomes the plain fallback
        #[arg(long, value_name = "FILE", conflicts_with = "image")]
        html: Option<PathBuf>,

        /// Capture this image file
        #[arg(long, value_name = "FILE")]
        image: Option<PathBuf>,
    },

    /// List the history (pinned first, then newest first)
    #[command(alias = "ls", display_order = 2)]
    List {
        /// Only entries carrying this tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Search content and tags (case-insensitive)
    #[command(display_order = 3)]
    Search {
        query: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print one entry in full
    #[command(alias = "v", display_order = 10)]
    Show {
        /// Id or list position
        id: String,

        /// Print the HTML payload instead of the plain text
        #[arg(long)]
        html: bool,
    },

    /// Copy an entry back to the system clipboard
    #[command(alias = "cp", display_order = 11)]
    Copy {
        /// Id or list position
        id: String,
    },

    /// Remove an entry
    #[command(alias = "delete", display_order = 12)]
    Rm {
        /// Id or list position
        id: String,
    },

    /// Toggle the pin on an entry
    #[command(display_order = 13)]
    Pin {
        /// Id or list position
        id: String,
    },

    /// Show or change an entry's tags
    #[command(display_order = 14)]
    Tag {
        /// Id or list position
        id: String,

        /// Tags (replace the current set unless --add or --remove is given)
        tags: Vec<String>,

        /// Add the given tags
        #[arg(long, conflicts_with = "remove")]
        add: bool,

        /// Remove the given tags
        #[arg(long)]
        remove: bool,
    },

    /// List every tag in use
    #[command(display_order = 15)]
    Tags,

    /// Remove every entry
    #[command(display_order = 20)]
    Clear,

    /// Storage usage
    #[command(display_order = 21)]
    Stats {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Export the history ("-" writes to stdout)
    #[command(display_order = 22)]
    Export {
        /// Output file (default: clipstash-export-<millis>.json)
        file: Option<PathBuf>,
    },

    /// Import an export file ("-" reads stdin)
    #[command(display_order = 23)]
    Import { file: PathBuf },

    /// Show or change preferences
    #[command(display_order = 30)]
    Config {
        /// Preference to show or set
        key: Option<ConfigKey>,

        /// New value
        value: Option<String>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigKey {
    MaxCacheSize,
    Theme,
    Lang,
}

impl ConfigKey {
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::MaxCacheSize => "max-cache-size",
            ConfigKey::Theme => "theme",
            ConfigKey::Lang => "lang",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn naked_invocation_has_no_command() {
        let cli = Cli::try_parse_from(["clipstash"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn add_joins_trailing_words() {
        let cli = Cli::try_parse_from(["clipstash", "add", "hello", "world"]).unwrap();
        match cli.command {
            Some(Commands::Add { text, html, image }) => {
                assert_eq!(text, vec!["hello", "world"]);
                assert!(html.is_none());
                assert!(image.is_none());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn html_and_image_conflict() {
        let res = Cli::try_parse_from(["clipstash", "add", "--html", "a", "--image", "b"]);
        assert!(res.is_err());
    }

    #[test]
    fn global_data_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["clipstash", "list", "--data", "/tmp/x"]).unwrap();
        assert_eq!(cli.data, Some(PathBuf::from("/tmp/x")));
    }

    #[test]
    fn config_key_names() {
        let cli =
            Cli::try_parse_from(["clipstash", "config", "max-cache-size", "50"]).unwrap();
        match cli.command {
            Some(Commands::Config { key, value }) => {
                assert_eq!(key, Some(ConfigKey::MaxCacheSize));
                assert_eq!(value.as_deref(), Some("50"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
