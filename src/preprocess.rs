//! Hit preprocessor: turns legit raw hits into per-endsec `ProcessedHit`
//! lists, deciding up front which sectors are even worth running pattern
//! recognition on.

use log::debug;

use crate::config::RunContext;
use crate::geom::{find_emtf_bend, find_emtf_layer, find_emtf_old_bend, find_emtf_phi, find_emtf_theta, find_emtf_zones, find_endsec, DetType};
use crate::hit::{ProcessedHit, RawHit};
use crate::pipeline::Error;

/// `mode in {11,13,14,15}`.
pub fn is_emtf_singlemu(mode: u8) -> bool {
    matches!(mode, 11 | 13 | 14 | 15)
}

/// `mode in {3,5,6,9,7,10,12,11,13,14,15}`.
pub fn is_emtf_muopen(mode: u8) -> bool {
    matches!(mode, 3 | 5 | 6 | 9 | 7 | 10 | 12 | 11 | 13 | 14 | 15)
}

/// Bit 3 (pseudo-station-1) set.
pub fn is_emtf_singlehit(mode: u8) -> bool {
    mode & (1 << 3) != 0
}

fn emtf_quality(hit: &RawHit) -> i32 {
    hit.quality
}

/// Preprocess one event's raw hits into per-endsec `ProcessedHit` lists.
/// Sectors that fail the MuOpen/single-hit early exit are left empty.
pub fn preprocess(raw_hits: &[RawHit], ctx: &RunContext) -> Result<[Vec<ProcessedHit>; 12], Error> {
    let legit: Vec<&RawHit> = raw_hits.iter().filter(|h| h.is_legit()).collect();

    let mut sector_mode = [0u8; 12];
    let mut sector_hits: [Vec<&RawHit>; 12] = Default::default();

    for hit in &legit {
        let endsec = find_endsec(hit.endcap, hit.sector);
        match hit.det {
            DetType::Csc => sector_mode[endsec] |= 1 << (4 - hit.station),
            DetType::Me0 | DetType::Dt => sector_mode[endsec] |= 1 << 3,
            _ => {}
        }
        sector_hits[endsec].push(hit);
    }

    let mut out: [Vec<ProcessedHit>; 12] = Default::default();

    for endsec in 0..12 {
        let mode = sector_mode[endsec];
        if !is_emtf_muopen(mode) && !is_emtf_singlehit(mode) {
            continue;
        }

        let hits: Vec<&&RawHit> = if ctx.run2_input {
            sector_hits[endsec].iter().filter(|h| h.is_valid_for_run2()).collect()
        } else {
            sector_hits[endsec].iter().collect()
        };

        let mut processed = Vec::with_capacity(hits.len());
        for hit in hits {
            let layer = find_emtf_layer(hit.det, hit.station, hit.ring).ok_or_else(|| Error::InvariantViolation {
                what: "hit layer lookup",
                detail: format!("det={:?} station={} ring={}", hit.det, hit.station, hit.ring),
            })?;

            let old_emtf_phi = hit.emtf_phi;
            let emtf_phi = find_emtf_phi(hit.det, hit.station, hit.ring, hit.fr, hit.emtf_bend, hit.endcap, hit.emtf_phi);
            let emtf_theta = find_emtf_theta(hit.det, hit.station, hit.wire, hit.emtf_theta);
            let emtf_bend = find_emtf_bend(hit.det, hit.station, hit.ring, hit.emtf_bend, hit.endcap, hit.quality);
            let old_emtf_bend = find_emtf_old_bend(hit.det, hit.emtf_bend, hit.pattern, hit.endcap);
            let zones = find_emtf_zones(hit.det, hit.station, hit.ring, emtf_theta);

            processed.push(ProcessedHit {
                det: hit.det,
                station: hit.station,
                ring: hit.ring,
                endsec,
                fr: hit.fr,
                bx: hit.bx,
                layer,
                zones,
                emtf_phi,
                emtf_theta,
                emtf_bend,
                emtf_quality: emtf_quality(hit),
                emtf_time: hit.bx,
                old_emtf_phi,
                old_emtf_bend,
                sim_tp: hit.sim_tp1 == 0 && hit.sim_tp2 == 0,
            });
        }
        debug!("endsec {endsec}: {} hits survive preprocessing", processed.len());
        out[endsec] = processed;
    }

    Ok(out)
}
