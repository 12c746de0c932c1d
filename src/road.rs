//! Roads: a pattern-bank match at one `(endcap, sector, ipt, ieta, iphi)`.

use serde::{Deserialize, Serialize};

use crate::geom::pt_zone::pt_bin;
use crate::hit::ProcessedHit;

/// Key identifying a road: `(endcap, sector, ipt, ieta, iphi)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoadId {
    pub endcap: i8,
    pub sector: u8,
    pub ipt: usize,
    pub ieta: usize,
    pub iphi: i32,
}

impl RoadId {
    pub fn endsec_key(&self) -> (i8, u8) {
        (self.endcap, self.sector)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Road {
    pub id: RoadId,
    pub hits: Vec<ProcessedHit>,
    /// 4-bit station-presence mask, bit `(4-station)`.
    pub mode: u8,
    pub quality: i32,
    /// Layer-coverage bitmask OR'd with quality; higher wins ties.
    pub sort_code: i64,
    /// Median `emtf_theta` of CSC-hit thetas only.
    pub theta_median: i32,
}

/// Priority used to build `sort_code`: ME0 > ME1/1 > GE1/1 > ME1/2 > ME2 >
/// GE2/1 > ME3&4 > RE1&2 > RE3&4, indexed by layer.
const SORT_CODE_LUT: [i64; 16] = [10, 8, 7, 5, 5, 4, 4, 3, 3, 9, 6, 11, 11, 10, 9, 9];

/// `quality = best_ipt - |ipt - best_ipt|`, where `best_ipt = pt_bin(0)`.
pub fn road_quality(ipt: usize) -> i32 {
    let best_ipt = pt_bin(0.0) as i32;
    best_ipt - (ipt as i32 - best_ipt).abs()
}

/// `sort_code = OR_over_hits(1 << lut[layer]) | quality`.
pub fn road_sort_code(quality: i32, hits: &[ProcessedHit]) -> i64 {
    let mut code: i64 = 0;
    for hit in hits {
        code |= 1 << SORT_CODE_LUT[hit.layer as usize];
    }
    code | quality as i64
}

/// Median of CSC `emtf_theta` values; lower of the two middle values on an
/// even-length sample (no interpolation).
pub fn theta_median(hits: &[ProcessedHit]) -> i32 {
    let mut thetas: Vec<i32> = hits.iter().filter(|h| h.is_csc()).map(|h| h.emtf_theta).collect();
    thetas.sort_unstable();
    let n = thetas.len();
    if n == 0 {
        return 0;
    }
    thetas[(n - 1) / 2]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_peaks_at_best_ipt() {
        let best = pt_bin(0.0);
        assert!(road_quality(best) >= road_quality(best + 1));
        assert!(road_quality(best) >= road_quality(best.saturating_sub(1)));
    }

    #[test]
    fn median_of_odd_sample_is_middle() {
        use crate::geom::DetType;
        let mk = |theta: i32| ProcessedHit {
            det: DetType::Csc,
            station: 1,
            ring: 1,
            endsec: 0,
            fr: 1,
            bx: 0,
            layer: 0,
            zones: vec![],
            emtf_phi: 0,
            emtf_theta: theta,
            emtf_bend: 0,
            emtf_quality: 0,
            emtf_time: 0,
            old_emtf_phi: 0,
            old_emtf_bend: 0,
            sim_tp: false,
        };
        let hits = vec![mk(10), mk(30), mk(20)];
        assert_eq!(theta_median(&hits), 20);
    }

    #[test]
    fn median_of_even_sample_takes_lower_middle() {
        use crate::geom::DetType;
        let mk = |theta: i32| ProcessedHit {
            det: DetType::Csc,
            station: 1,
            ring: 1,
            endsec: 0,
            fr: 1,
            bx: 0,
            layer: 0,
            zones: vec![],
            emtf_phi: 0,
            emtf_theta: theta,
            emtf_bend: 0,
            emtf_quality: 0,
            emtf_time: 0,
            old_emtf_phi: 0,
            old_emtf_bend: 0,
            sim_tp: false,
        };
        let hits = vec![mk(10), mk(20), mk(30), mk(40)];
        assert_eq!(theta_median(&hits), 20);
    }
}
