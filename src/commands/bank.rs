use serde_json::json;

use crate::bank::{PatternBank, NETA, NLAYERS, NPT, NWINDOW};
use crate::commands::CommandError;
use crate::STDRESULT;

/// Load a pattern bank and print its shape and summary statistics: how
/// many `(ipt, ieta, layer)` cells carry a non-trivial window versus how
/// many are the all-zero default.
pub fn bank(cmd: &clap::ArgMatches) -> STDRESULT {
    let path = cmd.get_one::<String>("bank").unwrap();
    let bytes = std::fs::read(path).map_err(|e| CommandError::FileRead(path.clone(), e))?;
    let bank = PatternBank::load(&bytes)?;

    let mut populated = 0usize;
    for ipt in 0..NPT {
        for ieta in 0..NETA {
            for layer in 0..NLAYERS {
                if bank.x_window(ipt, ieta, layer) != (0, 0, 0) {
                    populated += 1;
                }
            }
        }
    }

    let summary = json!({
        "shape": [NPT, NETA, NLAYERS, NWINDOW],
        "cells_total": NPT * NETA * NLAYERS,
        "cells_populated": populated,
        "header_hex": hex::encode(&bytes[..bytes.len().min(10)]),
    });

    let out = match cmd.get_one::<u16>("indent") {
        Some(spaces) => serde_json::to_vec_pretty(&summary).map(|v| reindent(&v, *spaces)),
        None => serde_json::to_vec(&summary),
    };
    println!("{}", String::from_utf8(out?).expect("serde_json output is valid UTF-8"));
    Ok(())
}

fn reindent(pretty: &[u8], spaces: u16) -> Vec<u8> {
    if spaces == 2 {
        return pretty.to_vec();
    }
    let text = std::str::from_utf8(pretty).expect("serde_json output is valid UTF-8");
    let pad = " ".repeat(spaces as usize);
    text.lines()
        .map(|line| {
            let depth = (line.len() - line.trim_start_matches(' ').len()) / 2;
            format!("{}{}", pad.repeat(depth), line.trim_start_matches(' '))
        })
        .collect::<Vec<_>>()
        .join("\n")
        .into_bytes()
}
