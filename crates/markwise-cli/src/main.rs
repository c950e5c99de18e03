//! markwise CLI: grade submissions, retry answers and compare attempts.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "markwise", version, about = "Exam answer grading engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade a submission against an exam
    Grade {
        /// Path to the .toml exam definition
        #[arg(long)]
        exam: PathBuf,

        /// Path to the .json submission
        #[arg(long)]
        submission: PathBuf,

        /// Output directory (defaults to the configured output_dir)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: json, html, md, all
        #[arg(long, default_value = "json")]
        format: String,

        /// Print the result without writing any report files
        #[arg(long)]
        no_save: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Re-grade a single answer with similarity matching
    Retry {
        /// Path to the .toml exam definition
        #[arg(long)]
        exam: PathBuf,

        /// Group number (1-based)
        #[arg(long)]
        group: usize,

        /// Question number within the group (1-based)
        #[arg(long)]
        question: usize,

        /// The new answer (comma-separated option numbers for objective questions)
        #[arg(long)]
        answer: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Compare two grading reports of the same exam
    Compare {
        /// Earlier report JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Later report JSON
        #[arg(long)]
        current: PathBuf,

        /// Exit code 1 if any question regressed
        #[arg(long)]
        fail_on_regression: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Validate exam TOML files
    Validate {
        /// Path to exam file or directory
        #[arg(long)]
        exam: PathBuf,
    },

    /// Create starter config, example exam, and example submission
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("markwise=info".parse().expect("static directive")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Grade {
            exam,
            submission,
            output,
            format,
            no_save,
            config,
        } => commands::grade::execute(exam, submission, output, format, no_save, config),
        Commands::Retry {
            exam,
            group,
            question,
            answer,
            config,
        } => commands::retry::execute(exam, group, question, answer, config),
        Commands::Compare {
            baseline,
            current,
            fail_on_regression,
            format,
        } => commands::compare::execute(baseline, current, fail_on_regression, format),
        Commands::Validate { exam } => commands::validate::execute(exam),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
