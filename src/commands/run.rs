use crate::commands::CommandError;
use crate::config::RunContext;
use crate::hit::RawHit;
use crate::oracle::{SlimRoadEncoder, StubOracle};
use crate::pipeline::Pipeline;
use crate::{bank::PatternBank, STDRESULT};

/// Reconstruct tracks for one event and print them as JSON.
///
/// No real regression model ships with this crate (see [`crate::oracle`]);
/// this subcommand drives the pipeline with [`StubOracle`], which is useful
/// for exercising the pipeline end to end but should not be mistaken for a
/// calibrated result.
pub fn run(cmd: &clap::ArgMatches) -> STDRESULT {
    let bank_path = cmd.get_one::<String>("bank").unwrap();
    let bank_bytes = std::fs::read(bank_path).map_err(|e| CommandError::FileRead(bank_path.clone(), e))?;
    let bank = PatternBank::load(&bank_bytes)?;

    let ctx = match cmd.get_one::<String>("config") {
        Some(path) => RunContext::from_toml_file(std::path::Path::new(path))?,
        None => RunContext::default(),
    };

    let event_path = cmd.get_one::<String>("event").unwrap();
    let event_text = std::fs::read_to_string(event_path).map_err(|e| CommandError::FileRead(event_path.clone(), e))?;
    let raw_hits: Vec<RawHit> =
        serde_json::from_str(&event_text).map_err(|e| CommandError::EventParse(event_path.clone(), e))?;

    let pipeline = Pipeline::new(bank, ctx);
    let tracks = pipeline.process_event(&raw_hits, &SlimRoadEncoder, &StubOracle)?;

    let out = match cmd.get_one::<u16>("indent") {
        Some(spaces) => serde_json::to_string_pretty(&tracks).map(|s| reindent(&s, *spaces)),
        None => serde_json::to_string(&tracks),
    }?;
    println!("{}", out);
    Ok(())
}

/// `serde_json`'s pretty printer always uses two-space indentation; widen it
/// to the requested width by re-indenting each line's leading whitespace.
fn reindent(pretty: &str, spaces: u16) -> String {
    if spaces == 2 {
        return pretty.to_string();
    }
    let pad = " ".repeat(spaces as usize);
    pretty
        .lines()
        .map(|line| {
            let depth = (line.len() - line.trim_start_matches(' ').len()) / 2;
            format!("{}{}", pad.repeat(depth), line.trim_start_matches(' '))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
