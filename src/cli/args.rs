// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Defines the generate, validate, and tokens subcommands for inpgen

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "inpgen")]
#[command(about = "Generate simulation input decks from a template and a parameter sweep table")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render one job file per parameter table row
    Generate {
        #[arg(short, long, help = "Path to the template file")]
        template: PathBuf,

        #[arg(short, long, help = "Path to the CSV parameter table")]
        params: PathBuf,

        #[arg(
            short = 'o',
            long = "jobs-dir",
            help = "Directory for generated job files [default: jobs]"
        )]
        jobs_dir: Option<PathBuf>,

        #[arg(long, help = "Column supplying output file names [default: JOB_NAME]")]
        job_column: Option<String>,

        #[arg(long, help = "Output file suffix [default: .inp]")]
        suffix: Option<String>,

        #[arg(long, help = "Use job names verbatim instead of sanitizing them")]
        no_sanitize: bool,

        #[arg(long, help = "Fail a job instead of replacing an existing file")]
        no_overwrite: bool,

        #[arg(long, help = "Validate and render without writing any files")]
        dry_run: bool,

        #[arg(long, help = "Write a JSON run summary to this path")]
        summary: Option<PathBuf>,
    },

    /// Check a template against a parameter table without writing anything
    Validate {
        #[arg(short, long, help = "Path to the template file")]
        template: PathBuf,

        #[arg(short, long, help = "Path to the CSV parameter table")]
        params: PathBuf,

        #[arg(long, help = "Column supplying output file names [default: JOB_NAME]")]
        job_column: Option<String>,
    },

    /// List the tokens a template references
    Tokens {
        #[arg(short, long, help = "Path to the template file")]
        template: PathBuf,
    },
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
