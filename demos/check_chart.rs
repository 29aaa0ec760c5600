//! Checks a MER chart and prints the findings with its statistics.
//!
//! ```sh
//! RUST_LOG=debug cargo run --example check_chart --features serde -- chart.mer --parity
//! ```

use std::path::PathBuf;

use clap::Parser;
use mer_rs::prelude::*;

fn main() -> Result<(), String> {
    env_logger::init();
    let config = Config::parse();

    let source = std::fs::read_to_string(&config.chart_path)
        .map_err(|e| format!("Failed to read {}: {e}", config.chart_path.display()))?;
    let name = config.chart_path.display().to_string();

    let output = parse_mer(&source);
    emit_mer_warnings(&name, &source, &output.warnings);

    let chart = match output.chart {
        Ok(chart) => chart,
        Err(error) => {
            let simple = SimpleSource::new(&name, &source);
            let _ = error
                .to_report(&simple)
                .eprint((name.clone(), ariadne::Source::from(source.as_str())));
            return Err(format!("Failed to load {name}"));
        }
    };

    let check_config = if config.parity {
        CheckConfig::default().with(Pass::Parity)
    } else {
        CheckConfig::default()
    };
    let report = mer_rs::analysis::run(&chart, &check_config);

    if config.json {
        let json = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
        println!("{json}");
        return Ok(());
    }

    emit_findings(&name, &source, report.all_findings());

    if let Some(counts) = report.note_counts {
        println!(
            "Notes: {} touch, {} chain, {} hold, {} swipe, {} snap",
            counts.touch,
            counts.chain,
            counts.hold,
            counts.swipes(),
            counts.snaps()
        );
    }
    if let Some(nps) = report.nps {
        println!(
            "NPS: {:.2} ({:.2} without chains, {:.2} without breaks)",
            nps.with_chains, nps.without_chains, nps.without_breaks
        );
    }
    if let Some(skill) = report.skill {
        println!(
            "Skill: speed {:.3}, stamina {:.3}, complexity {:.3}",
            skill.speed, skill.stamina, skill.complexity
        );
    }
    if let Some(level) = report.level {
        println!("Level: {level:.2}");
    }

    if report.has_errors() {
        return Err(format!("{name} has errors"));
    }
    Ok(())
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "check_chart")]
#[command(about = "Checks a MER chart for authoring mistakes", long_about = None)]
struct Config {
    /// Chart file path
    #[arg(value_name = "FILE")]
    chart_path: PathBuf,

    /// List the inferred hand of every note
    #[arg(long)]
    parity: bool,

    /// Print the whole report as JSON
    #[arg(long)]
    json: bool,
}
