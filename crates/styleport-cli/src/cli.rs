use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "styleport")]
#[command(version, about = "Convert CSS stylesheets into Rust style constructors")]
pub struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a CSS file or directory
    Convert {
        /// CSS file or directory of CSS files
        input: PathBuf,

        /// Output file (or directory when splitting into modules)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Custom mapping configuration (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Group rules by component and emit one module per component
        #[arg(long)]
        components: bool,

        /// Disable variant extraction
        #[arg(long)]
        no_variants: bool,

        /// Append the fixed utility constructors
        #[arg(long)]
        utilities: bool,
    },

    /// Show statistics for a CSS file
    Analyze {
        css_file: PathBuf,

        /// Custom mapping configuration (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check a CSS file for conversion compatibility
    Validate { css_file: PathBuf },

    /// Print the conversion of an inline CSS snippet
    Preview {
        /// CSS source text
        css: String,

        /// Group rules by component
        #[arg(long)]
        components: bool,

        /// Disable variant extraction
        #[arg(long)]
        no_variants: bool,
    },
}
