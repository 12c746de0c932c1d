//! Pattern recognition: match preprocessed hits against the pattern bank,
//! emit roads keyed by `(endcap, sector, ipt, ieta, iphi)`.

use std::collections::HashMap;

use log::debug;

use crate::bank::PatternBank;
use crate::geom::{endsec_to_endcap_sector, DetType};
use crate::hit::ProcessedHit;
use crate::preprocess::{is_emtf_muopen, is_emtf_singlemu};
use crate::road::{road_quality, road_sort_code, theta_median, Road, RoadId};

pub const PATTERN_X_CENTRAL: i32 = 23;
pub const PATTERN_X_SEARCH_MIN: i32 = 33;
pub const PATTERN_X_SEARCH_MAX: i32 = 144;

/// `hit_x = (emtf_phi + 16) / 32`, the "quadstrip" bin.
fn find_pattern_x(emtf_phi: i32) -> i32 {
    (emtf_phi + 16).div_euclid(32)
}

/// Precomputed `(ipt, offset)` pairs accepted by the bank for a given
/// `(zone, layer)`, one of `7*16 = 112` slots. Built once per bank and
/// shared across workers.
pub struct PatternCache {
    slots: HashMap<(u8, u8), Vec<(usize, i32)>>,
}

impl PatternCache {
    pub fn build(bank: &PatternBank) -> Self {
        let mut slots = HashMap::with_capacity(7 * 16);
        for zone in 0u8..7 {
            for layer in 0u8..16 {
                let mut matches = Vec::new();
                for ipt in 0..9usize {
                    let (x_lo, _, x_hi) = bank.x_window(ipt, zone as usize, layer as usize);
                    let lo = x_lo.max(-PATTERN_X_CENTRAL);
                    let hi = x_hi.min(PATTERN_X_CENTRAL);
                    let mut v = lo;
                    while v <= hi {
                        matches.push((ipt, v));
                        v += 1;
                    }
                }
                slots.insert((zone, layer), matches);
            }
        }
        PatternCache { slots }
    }

    fn get(&self, zone: u8, layer: u8) -> &[(usize, i32)] {
        self.slots.get(&(zone, layer)).map(|v| v.as_slice()).unwrap_or(&[])
    }
}

/// 4-bit station-mask aggregates accumulated while building a road.
#[derive(Default)]
struct ModeAccum {
    road_mode: u8,
    road_mode_csc: u8,
    road_mode_me0: u8,
    road_mode_omtf: u8,
}

fn accumulate(acc: &mut ModeAccum, hit: &ProcessedHit) {
    acc.road_mode |= 1 << (4 - hit.station);

    if matches!(hit.det, DetType::Csc | DetType::Me0) {
        acc.road_mode_csc |= 1 << (4 - hit.station);
    }

    match hit.det {
        DetType::Me0 => acc.road_mode_me0 |= 1 << 2,
        DetType::Csc if hit.station == 1 && (hit.ring == 1 || hit.ring == 4) => acc.road_mode_me0 |= 1 << 1,
        DetType::Csc if hit.station >= 2 => acc.road_mode_me0 |= 1,
        _ => {}
    }

    match (hit.det, hit.station, hit.ring) {
        (DetType::Dt, 1, _) => acc.road_mode_omtf |= 1 << 3,
        (DetType::Dt, 2, _) => acc.road_mode_omtf |= 1 << 2,
        (DetType::Dt, 3, _) => acc.road_mode_omtf |= 1 << 1,
        (DetType::Csc, 1, 3) => acc.road_mode_omtf |= 1 << 1,
        (DetType::Csc, 2, 2) => acc.road_mode_omtf |= 1,
        _ => {}
    }
}

/// Is this road worth keeping, per the SingleMu / ME0+ME1 / OMTF rules.
fn passes_keep_rule(ieta: usize, acc: &ModeAccum) -> bool {
    (is_emtf_singlemu(acc.road_mode) && is_emtf_muopen(acc.road_mode_csc))
        || ((ieta == 0 || ieta == 1) && acc.road_mode_me0 >= 6)
        || (ieta == 6 && !matches!(acc.road_mode_omtf, 1 | 2 | 4 | 8))
}

/// Run pattern recognition for one endsec's preprocessed hits.
pub fn recognize(cache: &PatternCache, endsec: usize, hits: &[ProcessedHit], omtf_input: bool) -> Vec<Road> {
    let (endcap, sector) = endsec_to_endcap_sector(endsec);
    let mut amap: HashMap<RoadId, Vec<ProcessedHit>> = HashMap::new();

    for hit in hits {
        let hit_x = find_pattern_x(hit.emtf_phi);

        for &zone in &hit.zones {
            if omtf_input {
                if zone != 6 {
                    continue;
                }
            } else if zone == 6 {
                continue;
            }

            for &(ipt, offset) in cache.get(zone, hit.layer) {
                let iphi = hit_x - offset;
                if iphi < PATTERN_X_SEARCH_MIN || iphi > PATTERN_X_SEARCH_MAX {
                    continue;
                }
                let id = RoadId { endcap, sector, ipt, ieta: zone as usize, iphi };
                amap.entry(id).or_default().push(hit.clone());
            }
        }
    }

    let mut roads = Vec::new();
    for (id, road_hits) in amap {
        let mut acc = ModeAccum::default();
        for hit in &road_hits {
            accumulate(&mut acc, hit);
        }

        if passes_keep_rule(id.ieta, &acc) {
            let quality = road_quality(id.ipt);
            let sort_code = road_sort_code(quality, &road_hits);
            let tm = theta_median(&road_hits);
            roads.push(Road {
                id,
                hits: road_hits,
                mode: acc.road_mode,
                quality,
                sort_code,
                theta_median: tm,
            });
        }
    }
    debug!("endsec {endsec}: {} roads survive pattern recognition", roads.len());
    roads
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::PatternBank;

    /// An "empty" window (`x_lo=1, x_hi=-1`, inverted so nothing matches) in
    /// every `(ipt, ieta, layer)` slot except the ones in `populated`, so
    /// the fixture behaves like a bank that genuinely has only those
    /// trained patterns rather than leaving spurious always-match windows
    /// at a zeroed default.
    fn bank_with_patterns(populated: &[(usize, usize, usize, i32, i32, i32)]) -> PatternBank {
        let count = crate::bank::NPT * crate::bank::NETA * crate::bank::NLAYERS;
        let mut x = Vec::with_capacity(count * 3);
        for _ in 0..count {
            x.extend_from_slice(&[1, 0, -1]);
        }
        let z = vec![0i32; count * 3];
        for &(ipt, ieta, layer, lo, mid, hi) in populated {
            let base = ((ipt * crate::bank::NETA + ieta) * crate::bank::NLAYERS + layer) * 3;
            x[base] = lo;
            x[base + 1] = mid;
            x[base + 2] = hi;
        }
        PatternBank::from_flat(x, z).unwrap()
    }

    // A window straddling offset zero, so a hit at `hit_x` produces
    // candidate roads at both `hit_x` (offset 0) and `hit_x+1` (offset -1);
    // `hit_x-1` is filtered out below `PATTERN_X_SEARCH_MIN`.
    fn bank_with_one_pattern() -> PatternBank {
        bank_with_patterns(&[(4, 3, 0, -1, 0, 1)])
    }

    fn csc_hit(station: u8, emtf_phi: i32) -> ProcessedHit {
        ProcessedHit {
            det: DetType::Csc,
            station,
            ring: 1,
            endsec: 0,
            fr: 1,
            bx: 0,
            layer: 0,
            zones: vec![3],
            emtf_phi,
            emtf_theta: 40,
            emtf_bend: 0,
            emtf_quality: 0,
            emtf_time: 0,
            old_emtf_phi: emtf_phi,
            old_emtf_bend: 0,
            sim_tp: false,
        }
    }

    #[test]
    fn single_me11_hit_matches_but_fails_singlemu() {
        let bank = bank_with_one_pattern();
        let cache = PatternCache::build(&bank);
        let hit = csc_hit(1, 33 * 32);
        let roads = recognize(&cache, 0, &[hit], false);
        assert!(roads.is_empty());
    }

    #[test]
    fn four_station_hits_merge_into_one_road_and_pass_singlemu() {
        // ipt=4, ieta=3 accepts only offset 0 on every CSC layer here, so
        // all four station hits land in exactly the same iphi bin.
        let bank = bank_with_patterns(&[
            (4, 3, 0, 0, 0, 0),
            (4, 3, 2, 0, 0, 0),
            (4, 3, 3, 0, 0, 0),
            (4, 3, 4, 0, 0, 0),
        ]);
        let cache = PatternCache::build(&bank);
        let mut hits = vec![csc_hit(1, 33 * 32)];
        for station in [2, 3, 4] {
            let mut h = csc_hit(station, 33 * 32);
            h.layer = match station {
                2 => 2,
                3 => 3,
                _ => 4,
            };
            hits.push(h);
        }
        let roads = recognize(&cache, 0, &hits, false);
        assert_eq!(roads.len(), 1);
        assert_eq!(roads[0].mode, 0b1111);
    }
}
