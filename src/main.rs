use clap::Parser;
use std::path::PathBuf;

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_SCORING: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Parser, Debug)]
#[command(name = "peergrade")]
#[command(about = "Process peer evaluation responses to grades", long_about = None)]
#[command(version)]
struct Cli {
    /// Gradescope assignment metadata YML file with grouping information.
    /// Generate this file by downloading the assignment ZIP file from
    /// Gradescope.
    metadata: PathBuf,

    /// Google Forms survey CSV output
    survey: PathBuf,

    /// Grades export from Canvas to use as template for the output
    template: PathBuf,

    /// Assignment ID, used in the output column name
    assignment_id: u32,

    /// Output CSV file to be imported directly to Canvas
    output: PathBuf,

    /// Enable verbose diagnostics on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Path to scoring policy file (defaults to ~/.config/peergrade/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    // Load the scoring policy
    let config = match peergrade::config::load_config(cli.config.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate the policy at startup
    if let Err(errors) = peergrade::scoring::validate_scoring(&config) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    // Grouping provider: metadata YAML -> group sets
    let groups = match peergrade::roster::load_groups(&cli.metadata) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Metadata error: {}", e);
            std::process::exit(EXIT_INPUT);
        }
    };
    if cli.verbose {
        eprintln!("Loaded {} groups from metadata", groups.len());
    }

    // Rating matrix builder: survey CSV -> entries + responded set.
    // An unknown rating label aborts here, before any scoring.
    let matrix = match peergrade::survey::load_matrix(&cli.survey, &config.scale) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Survey error: {:#}", e);
            std::process::exit(EXIT_INPUT);
        }
    };
    if cli.verbose {
        eprintln!(
            "{} students submitted feedback ({} rating entries)",
            matrix.responded.len(),
            matrix.entries.len()
        );
    }

    // Core scoring
    let report = match peergrade::scoring::score_groups(&groups, &matrix, &config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Scoring error: {}", e);
            std::process::exit(EXIT_SCORING);
        }
    };

    let use_colors = peergrade::output::should_use_colors();

    if cli.verbose {
        for breakdown in &report.groups {
            eprintln!(
                "{}",
                peergrade::output::format_group_detail(breakdown, &matrix, use_colors)
            );
        }
        for warning in &report.warnings {
            eprintln!("Warning: {}", warning);
        }
    }

    // Orphans are advisory but always reported
    for ((rater, ratee), value) in &report.orphans {
        eprintln!(
            "Warning: evaluation pair not used: ({}, {}) -> {}",
            rater, ratee, value
        );
    }

    // Merge into the Canvas template and write the upload file
    let dropped = match peergrade::output::export_scores(
        &cli.template,
        &cli.output,
        &report.scores,
        cli.assignment_id,
    ) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Export error: {}", e);
            std::process::exit(EXIT_INPUT);
        }
    };

    if cli.verbose {
        for student in &dropped {
            eprintln!(
                "{} was scored but is absent from the grades template, dropped",
                student
            );
        }
        eprintln!(
            "{}",
            peergrade::output::format_score_table(&report, &matrix, use_colors)
        );
        eprintln!(
            "Scored {} students across {} groups -> {}",
            report.scores.len(),
            report.groups.len(),
            cli.output.display()
        );
    }

    std::process::exit(EXIT_SUCCESS);
}
