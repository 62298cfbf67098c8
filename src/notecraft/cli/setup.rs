use clap::{Args, Parser, Subcommand, ValueEnum};
use notecraft::api::{PolicyOverrides, SegmentMode};
use notecraft::segment::BlankLinePolicy;
use notecraft::validation::RowPolicy;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "notecraft", bin_name = "notecraft", version)]
#[command(about = "Compose research notes: document ids, text cleanup and print previews", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding counters, the session id and config.json
    #[arg(long, global = true, env = "NOTECRAFT_HOME")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Document identifiers
    #[command(subcommand)]
    Id(IdCommands),

    /// Split text into paragraphs, lines or bullets (reads stdin by default)
    Segment {
        #[arg(value_enum)]
        mode: SegmentArg,

        /// Read text from a file instead of stdin
        #[arg(short, long)]
        file: Option<PathBuf>,

        #[command(flatten)]
        policy: PolicyArgs,
    },

    /// Show a text preview of a note form
    Preview {
        /// Path to the JSON note form
        form: PathBuf,

        #[command(flatten)]
        policy: PolicyArgs,
    },

    /// Render a note form as printable HTML
    Print {
        /// Path to the JSON note form
        form: PathBuf,

        /// Write the HTML to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        policy: PolicyArgs,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., id-prefix)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum IdCommands {
    /// Mint a new id for a category (name or code)
    New { category: String },

    /// Reuse the session id for a category, minting one if needed
    Current { category: String },

    /// Print the session id
    Show,

    /// Forget the session id (counters are kept)
    Clear,

    /// Print the code for a category name
    Code { category: String },

    /// List known categories
    Categories,

    /// List issued counters per category and month
    Counters,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SegmentArg {
    Paragraphs,
    Lines,
    Bullets,
    BulletMarkup,
}

impl From<SegmentArg> for SegmentMode {
    fn from(arg: SegmentArg) -> Self {
        match arg {
            SegmentArg::Paragraphs => SegmentMode::Paragraphs,
            SegmentArg::Lines => SegmentMode::Lines,
            SegmentArg::Bullets => SegmentMode::Bullets,
            SegmentArg::BulletMarkup => SegmentMode::BulletMarkup,
        }
    }
}

#[derive(Args, Debug, Clone, Copy, Default)]
pub struct PolicyArgs {
    /// Keep blank lines as empty paragraphs/bullet slots
    #[arg(long, conflicts_with = "collapse_blank_lines")]
    pub preserve_blank_lines: bool,

    /// Collapse blank lines, even when config says preserve
    #[arg(long)]
    pub collapse_blank_lines: bool,

    /// Require last name, first name and phone on every co-author row
    #[arg(long, conflicts_with = "lenient_co_authors")]
    pub strict_co_authors: bool,

    /// Accept co-author rows with any field filled, even when config says strict
    #[arg(long)]
    pub lenient_co_authors: bool,
}

impl PolicyArgs {
    /// Unset flags defer to the stored config.
    pub fn overrides(&self) -> PolicyOverrides {
        let blank_lines = if self.preserve_blank_lines {
            Some(BlankLinePolicy::Preserve)
        } else if self.collapse_blank_lines {
            Some(BlankLinePolicy::Collapse)
        } else {
            None
        };
        let co_author_policy = if self.strict_co_authors {
            Some(RowPolicy::AllFields)
        } else if self.lenient_co_authors {
            Some(RowPolicy::AnyField)
        } else {
            None
        };
        PolicyOverrides {
            blank_lines,
            co_author_policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_id_new_with_global_data_dir() {
        let cli = Cli::try_parse_from([
            "notecraft",
            "id",
            "new",
            "Equity Research",
            "--data-dir",
            "/tmp/nc",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/nc")));
        match cli.command {
            Commands::Id(IdCommands::New { category }) => assert_eq!(category, "Equity Research"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn parses_segment_mode_and_flags() {
        let cli = Cli::try_parse_from([
            "notecraft",
            "segment",
            "bullet-markup",
            "--preserve-blank-lines",
        ])
        .unwrap();
        match cli.command {
            Commands::Segment { mode, file, policy } => {
                assert_eq!(mode, SegmentArg::BulletMarkup);
                assert!(file.is_none());
                assert_eq!(
                    policy.overrides().blank_lines,
                    Some(BlankLinePolicy::Preserve)
                );
                assert_eq!(policy.overrides().co_author_policy, None);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_segment_mode() {
        assert!(Cli::try_parse_from(["notecraft", "segment", "words"]).is_err());
    }

    #[test]
    fn negative_flags_override_config_back() {
        let cli = Cli::try_parse_from([
            "notecraft",
            "preview",
            "note.json",
            "--collapse-blank-lines",
            "--lenient-co-authors",
        ])
        .unwrap();
        match cli.command {
            Commands::Preview { policy, .. } => {
                let overrides = policy.overrides();
                assert_eq!(overrides.blank_lines, Some(BlankLinePolicy::Collapse));
                assert_eq!(overrides.co_author_policy, Some(RowPolicy::AnyField));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn opposite_flags_conflict() {
        assert!(Cli::try_parse_from([
            "notecraft",
            "preview",
            "note.json",
            "--strict-co-authors",
            "--lenient-co-authors",
        ])
        .is_err());
    }

    #[test]
    fn unset_flags_do_not_override() {
        let overrides = PolicyArgs::default().overrides();
        assert!(overrides.blank_lines.is_none());
        assert!(overrides.co_author_policy.is_none());
    }
}
