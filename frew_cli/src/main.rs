//! # Frew CLI
//!
//! Command-line inspection of Frew model documents: loads a model, prints
//! the job header, stage list and design cases, and summarises the result
//! envelopes per design case. With `--rows` the flattened result rows are
//! printed as JSON for piping into other tools.
//!
//! ```text
//! frew_cli <model.json> [--rows]
//! ```

use std::path::Path;
use std::process::ExitCode;

use log::debug;

use frew_core::envelope::Envelopes;
use frew_core::errors::FrewResult;
use frew_core::geometry::{node_count, node_levels, stage_names};
use frew_core::report::result_rows;
use frew_core::results::WallResults;
use frew_core::{load_document, ModelDocument};

fn print_summary(doc: &ModelDocument) -> FrewResult<()> {
    let titles = doc.titles()?;
    let stages = stage_names(doc)?;

    println!("═══════════════════════════════════════");
    println!("  FREW MODEL SUMMARY");
    println!("═══════════════════════════════════════");
    println!();
    println!("Job:      {} - {}", titles.job_number, titles.job_title);
    if !titles.subtitle.is_empty() {
        println!("Subtitle: {}", titles.subtitle);
    }
    if !titles.initials.is_empty() {
        println!("Initials: {}", titles.initials);
    }
    if let Ok(version) = doc.file_version() {
        println!("Engine:   {version}");
    }
    println!("Nodes:    {}", node_count(doc)?);
    println!();
    println!("Stages:");
    for (index, name) in stages.iter().enumerate() {
        println!("  {index:>3}  {name}");
    }
    Ok(())
}

fn print_envelopes(doc: &ModelDocument) -> FrewResult<()> {
    let results = WallResults::extract(doc)?;
    let envelopes = Envelopes::from_results(&results)?;

    println!();
    println!("Envelopes over {} stages:", results.stage_count());
    for case in envelopes.design_cases() {
        let envelope = envelopes.case(case)?;
        let worst = |values: &[f64]| {
            values
                .iter()
                .fold(0.0_f64, |acc, value| acc.max(value.abs()))
        };
        println!();
        println!("  Design case: {case}");
        println!(
            "    Shear:        max |{:.1}| kN/m",
            worst(&envelope.maximum.shear).max(worst(&envelope.minimum.shear))
        );
        println!(
            "    Bending:      max |{:.1}| kNm/m",
            worst(&envelope.maximum.bending).max(worst(&envelope.minimum.bending))
        );
        println!(
            "    Displacement: max |{:.1}| mm",
            worst(&envelope.maximum.disp).max(worst(&envelope.minimum.disp))
        );
    }
    Ok(())
}

fn print_rows(doc: &ModelDocument) -> FrewResult<()> {
    let results = WallResults::extract(doc)?;
    let levels = node_levels(doc)?;
    let rows = result_rows(&results, &levels)?;

    println!();
    println!("JSON rows (for spreadsheet/plot consumers):");
    if let Ok(json) = serde_json::to_string_pretty(&rows) {
        println!("{json}");
    }
    Ok(())
}

fn run(path: &Path, with_rows: bool) -> FrewResult<()> {
    let doc = load_document(path)?;
    debug!("loaded {}", path.display());

    print_summary(&doc)?;

    if doc.has_results() {
        print_envelopes(&doc)?;
        if with_rows {
            print_rows(&doc)?;
        }
    } else {
        println!();
        println!("No results in the model - analyse it first to see envelopes.");
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let with_rows = args.iter().any(|arg| arg == "--rows");
    let path = match args.iter().find(|arg| !arg.starts_with("--")) {
        Some(path) => path.clone(),
        None => {
            eprintln!("Usage: frew_cli <model.json> [--rows]");
            return ExitCode::FAILURE;
        }
    };

    match run(Path::new(&path), with_rows) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{json}");
            }
            ExitCode::FAILURE
        }
    }
}
