use serde_json::json;

use crate::geom::{find_emtf_layer, zone_windows, DetType, NLAYERS};
use crate::STDRESULT;

/// Every `(type, station, ring)` combination the layer/zone LUTs recognize.
/// Kept here rather than derived, since the LUTs themselves are total
/// functions over an open `(station, ring)` domain with no way to enumerate
/// their valid inputs from the tables alone.
const COMBINATIONS: &[(DetType, u8, u8)] = &[
    (DetType::Csc, 1, 1),
    (DetType::Csc, 1, 2),
    (DetType::Csc, 1, 3),
    (DetType::Csc, 1, 4),
    (DetType::Csc, 2, 1),
    (DetType::Csc, 2, 2),
    (DetType::Csc, 3, 1),
    (DetType::Csc, 3, 2),
    (DetType::Csc, 4, 1),
    (DetType::Csc, 4, 2),
    (DetType::Rpc, 1, 2),
    (DetType::Rpc, 1, 3),
    (DetType::Rpc, 2, 2),
    (DetType::Rpc, 2, 3),
    (DetType::Rpc, 3, 1),
    (DetType::Rpc, 3, 2),
    (DetType::Rpc, 3, 3),
    (DetType::Rpc, 4, 1),
    (DetType::Rpc, 4, 2),
    (DetType::Rpc, 4, 3),
    (DetType::Gem, 1, 1),
    (DetType::Gem, 2, 1),
    (DetType::Me0, 1, 1),
    (DetType::Dt, 1, 1),
    (DetType::Dt, 2, 1),
    (DetType::Dt, 3, 1),
    (DetType::Dt, 4, 1),
];

fn det_name(det: DetType) -> &'static str {
    match det {
        DetType::Dt => "dt",
        DetType::Csc => "csc",
        DetType::Rpc => "rpc",
        DetType::Gem => "gem",
        DetType::Me0 => "me0",
    }
}

/// Dump the fixed layer/zone geometry LUTs as JSON.
pub fn geometry(cmd: &clap::ArgMatches) -> STDRESULT {
    let entries: Vec<_> = COMBINATIONS
        .iter()
        .map(|&(det, station, ring)| {
            let zones: Vec<_> = zone_windows(det, station, ring)
                .iter()
                .map(|&(zone, lo, hi)| json!({"zone": zone, "theta_min": lo, "theta_max": hi}))
                .collect();
            json!({
                "type": det_name(det),
                "station": station,
                "ring": ring,
                "layer": find_emtf_layer(det, station, ring),
                "zones": zones,
            })
        })
        .collect();

    let summary = json!({
        "nlayers": NLAYERS,
        "combinations": entries,
    });

    let out = match cmd.get_one::<u16>("indent") {
        Some(spaces) => serde_json::to_string_pretty(&summary).map(|s| reindent(&s, *spaces)),
        None => serde_json::to_string(&summary),
    }?;
    println!("{}", out);
    Ok(())
}

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
