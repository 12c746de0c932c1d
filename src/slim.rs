//! Road slimming: reduce a road to at most one hit per layer, picking for
//! each layer the hit that best agrees with the bank's predicted offset from
//! its partner layer.
//!
//! Grounded on `RoadSlimming.run` in the original source.

use crate::bank::PatternBank;
use crate::geom::NLAYERS;
use crate::hit::ProcessedHit;
use crate::road::Road;

/// Partner layer for each of the 16 layers, used to form (hit, partner-hit)
/// pairs when picking the best hit on a layer. Zones 5-6 redirect a
/// zero-valued (ME1/1) partner to ME1/2.
const LAYER_PARTNER: [u8; NLAYERS] = [2, 2, 0, 0, 0, 0, 2, 3, 4, 0, 2, 0, 0, 0, 0, 0];

fn layer_partner(layer: u8, ieta: usize) -> u8 {
    let partner = LAYER_PARTNER[layer as usize];
    if ieta >= 5 && partner == 0 {
        1
    } else {
        partner
    }
}

/// Slim one cleaned road down to at most one hit per layer.
pub fn slim(road: &Road, bank: &PatternBank) -> Road {
    let (ipt, ieta, iphi) = (road.id.ipt, road.id.ieta, road.id.iphi);
    let prim_match_lut: Vec<i32> = (0..NLAYERS).map(|l| bank.prim_match(ipt, ieta, l)).collect();

    let tmp_phi = iphi * 32;
    let tmp_theta = road.theta_median;

    let mut by_layer: Vec<Vec<&ProcessedHit>> = vec![Vec::new(); NLAYERS];
    for hit in &road.hits {
        by_layer[hit.layer as usize].push(hit);
    }

    let mut best_phi = [tmp_phi; NLAYERS];
    let mut best_theta = [tmp_theta; NLAYERS];

    let best_me11 = tmp_phi + prim_match_lut[0];
    let best_me12 = tmp_phi + prim_match_lut[1];
    let anchor = if ieta >= 5 { best_me12 } else { best_me11 };
    best_phi[0] = best_me11;
    best_phi[1] = best_me12;
    best_phi[2] = anchor + prim_match_lut[2];
    best_phi[3] = anchor + prim_match_lut[3];
    best_phi[4] = anchor + prim_match_lut[4];

    let mut chosen: Vec<Option<ProcessedHit>> = vec![None; NLAYERS];

    for l in 0..NLAYERS {
        if by_layer[l].is_empty() {
            continue;
        }
        let mean_dphi = prim_match_lut[l];
        let partner = layer_partner(l as u8, ieta) as usize;

        let mut best: Option<(&ProcessedHit, i32, i32)> = None; // (hit, dtheta, dphi)
        for &hit1 in &by_layer[l] {
            let candidates: Vec<(i32, i32)> = if by_layer[partner].is_empty() {
                let dphi = ((hit1.emtf_phi - best_phi[partner]) - mean_dphi).abs();
                let dtheta = (hit1.emtf_theta - tmp_theta).abs();
                vec![(dtheta, dphi)]
            } else {
                by_layer[partner]
                    .iter()
                    .map(|hit2| {
                        let dphi = ((hit1.emtf_phi - hit2.emtf_phi) - mean_dphi).abs();
                        let dtheta = (hit1.emtf_theta - tmp_theta).abs();
                        (dtheta, dphi)
                    })
                    .collect()
            };
            for (dtheta, dphi) in candidates {
                if best.map_or(true, |(_, bt, bp)| (dtheta, dphi) < (bt, bp)) {
                    best = Some((hit1, dtheta, dphi));
                }
            }
        }

        if let Some((hit, _, _)) = best {
            best_phi[l] = hit.emtf_phi;
            best_theta[l] = hit.emtf_theta;
            chosen[l] = Some(hit.clone());
            by_layer[l] = vec![hit];
        }
    }

    let hits = chosen.into_iter().flatten().collect();
    Road {
        id: road.id,
        hits,
        mode: road.mode,
        quality: road.quality,
        sort_code: road.sort_code,
        theta_median: road.theta_median,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::{NETA, NLAYERS as BANK_NLAYERS, NPT};
    use crate::geom::DetType;
    use crate::road::RoadId;

    fn bank_with_prim_match(ipt: usize, ieta: usize, lut: &[i32]) -> PatternBank {
        let count = NPT * NETA * BANK_NLAYERS;
        let x = vec![0i32; count * 3];
        let mut z = vec![0i32; count * 3];
        for (l, &v) in lut.iter().enumerate() {
            let base = ((ipt * NETA + ieta) * BANK_NLAYERS + l) * 3;
            z[base + 1] = v;
        }
        PatternBank::from_flat(x, z).unwrap()
    }

    fn hit(layer: u8, phi: i32, theta: i32) -> ProcessedHit {
        ProcessedHit {
            det: DetType::Csc,
            station: 1,
            ring: 1,
            endsec: 0,
            fr: 1,
            bx: 0,
            layer,
            zones: vec![],
            emtf_phi: phi,
            emtf_theta: theta,
            emtf_bend: 0,
            emtf_quality: 0,
            emtf_time: 0,
            old_emtf_phi: phi,
            old_emtf_bend: 0,
            sim_tp: false,
        }
    }

    #[test]
    fn keeps_at_most_one_hit_per_layer() {
        let mut lut = vec![0i32; BANK_NLAYERS];
        lut[0] = 0;
        lut[2] = 10; // ME2's predicted offset from ME1/1
        let bank = bank_with_prim_match(4, 3, &lut);
        let road = Road {
            id: RoadId { endcap: 1, sector: 1, ipt: 4, ieta: 3, iphi: 33 },
            hits: vec![hit(0, 33 * 32, 40), hit(2, 33 * 32 + 10, 41), hit(2, 33 * 32 + 50, 70)],
            mode: 0b1100,
            quality: 3,
            sort_code: 0,
            theta_median: 40,
        };
        let slimmed = slim(&road, &bank);
        let on_layer_2: Vec<_> = slimmed.hits.iter().filter(|h| h.layer == 2).collect();
        assert_eq!(on_layer_2.len(), 1);
        assert_eq!(on_layer_2[0].emtf_phi, 33 * 32 + 10);
    }

    #[test]
    fn empty_layer_pairs_against_predicted_partner_phi() {
        let bank = bank_with_prim_match(4, 3, &[0i32; BANK_NLAYERS]);
        let road = Road {
            id: RoadId { endcap: 1, sector: 1, ipt: 4, ieta: 3, iphi: 33 },
            hits: vec![hit(0, 33 * 32, 40)],
            mode: 0b1000,
            quality: 3,
            sort_code: 0,
            theta_median: 40,
        };
        let slimmed = slim(&road, &bank);
        assert_eq!(slimmed.hits.len(), 1);
        assert_eq!(slimmed.hits[0].layer, 0);
    }
}
