//! Orchestrates the six pipeline stages over one event's raw hits.
//!
//! Grounded on the teacher's top-level orchestration style in `lib.rs` (a
//! typed `Result`-returning entry point, no panics reachable from the public
//! API) rather than on any one original-source class — the original
//! interleaves these stages inside ad-hoc analysis scripts.

use thiserror::Error;

use crate::bank::PatternBank;
use crate::clean::clean;
use crate::config::RunContext;
use crate::geom::find_endsec;
use crate::ghost::bust;
use crate::hit::RawHit;
use crate::oracle::{get_mode_from_x_mask, get_ndof_from_x_mask, get_zone_from_x, Encoder, Oracle};
use crate::pt::{get_trigger_pt, pass_trigger};
use crate::recog::{recognize, PatternCache};
use crate::slim::slim;
use crate::track::{Track, TrackId};

#[derive(Debug, Error)]
pub enum Error {
    #[error("invariant violated ({what}): {detail}")]
    InvariantViolation { what: &'static str, detail: String },
    #[error("oracle returned {got} predictions for {expected} input rows")]
    OracleMismatch { expected: usize, got: usize },
}

/// Owns the immutable pattern bank, its precomputed match cache, and the
/// run configuration; drives one event at a time through all six stages.
pub struct Pipeline {
    bank: PatternBank,
    cache: PatternCache,
    ctx: RunContext,
}

impl Pipeline {
    pub fn new(bank: PatternBank, ctx: RunContext) -> Self {
        let cache = PatternCache::build(&bank);
        Pipeline { bank, cache, ctx }
    }

    pub fn bank(&self) -> &PatternBank {
        &self.bank
    }

    pub fn ctx(&self) -> &RunContext {
        &self.ctx
    }

    /// Process one event's raw hits into the final, ghost-busted track set.
    ///
    /// Per-endsec hit lists are independent after preprocessing (§5); this
    /// walks them sequentially, but nothing here depends on that order, so a
    /// caller with its own worker pool can fan the per-endsec loop out.
    pub fn process_event(
        &self,
        raw_hits: &[RawHit],
        encoder: &dyn Encoder,
        oracle: &dyn Oracle,
    ) -> Result<Vec<Track>, Error> {
        let by_endsec = crate::preprocess::preprocess(raw_hits, &self.ctx)?;

        let mut roads = Vec::new();
        for endsec in 0..12 {
            if by_endsec[endsec].is_empty() {
                continue;
            }
            roads.extend(recognize(&self.cache, endsec, &by_endsec[endsec], self.ctx.omtf_input));
        }

        let cleaned = clean(roads);
        let slim_roads: Vec<_> = cleaned.iter().map(|r| slim(r, &self.bank)).collect();

        if slim_roads.is_empty() {
            return Ok(Vec::new());
        }

        let mut features = Vec::with_capacity(slim_roads.len());
        let mut masks = Vec::with_capacity(slim_roads.len());
        for road in &slim_roads {
            let (x, mask) = encoder.encode(road);
            features.push(x);
            masks.push(mask);
        }

        let predictions = oracle.predict(&features);
        if predictions.len() != slim_roads.len() {
            return Err(Error::OracleMismatch { expected: slim_roads.len(), got: predictions.len() });
        }

        let mut tracks = Vec::new();
        for ((road, (y_hat, d_hat)), (x, mask)) in
            slim_roads.iter().zip(predictions.into_iter()).zip(features.iter().zip(masks.iter()))
        {
            let mode = get_mode_from_x_mask(mask);
            let ndof = get_ndof_from_x_mask(mask);
            let zone = get_zone_from_x(x).clamp(0, 6) as u8;

            let passed = pass_trigger(road.id.ipt, mode, y_hat, d_hat, self.ctx.discr_pt_cut_track);
            if !passed {
                continue;
            }

            let endsec = find_endsec(road.id.endcap, road.id.sector);
            let _ = endsec; // kept for symmetry with the preprocessing stage's indexing

            tracks.push(Track {
                id: TrackId { endcap: road.id.endcap, sector: road.id.sector },
                hits: road.hits.clone(),
                mode,
                zone,
                pt_raw: (1.0 / y_hat).abs(),
                pt: get_trigger_pt(y_hat),
                q: if y_hat >= 0.0 { 1 } else { -1 },
                emtf_phi: road.id.iphi,
                emtf_theta: road.theta_median,
                ndof,
                chi2: d_hat,
            });
        }

        Ok(bust(tracks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunContext;
    use crate::geom::DetType;
    use crate::oracle::StubOracle;
    use crate::oracle::SlimRoadEncoder;

    fn flat_bank_one_pattern() -> PatternBank {
        use crate::bank::{NETA, NLAYERS, NPT};
        let count = NPT * NETA * NLAYERS;
        let mut x = vec![0i32; count * 3];
        for l in [0usize, 2, 3, 4] {
            let base = ((4 * NETA + 3) * NLAYERS + l) * 3;
            x[base] = -1;
            x[base + 1] = 0;
            x[base + 2] = 1;
        }
        let z = vec![0i32; count * 3];
        PatternBank::from_flat(x, z).unwrap()
    }

    fn raw(det: DetType, station: u8, ring: u8, emtf_phi: i32) -> RawHit {
        RawHit {
            det,
            station,
            ring,
            endcap: 1,
            sector: 1,
            fr: 1,
            bx: 0,
            emtf_phi,
            emtf_theta: 40,
            emtf_bend: 0,
            quality: 0,
            pattern: 0,
            wire: 0,
            time: 0,
            sim_tp1: 0,
            sim_tp2: 0,
        }
    }

    #[test]
    fn four_station_event_produces_one_track() {
        let bank = flat_bank_one_pattern();
        let pipeline = Pipeline::new(bank, RunContext::default());
        let hits = vec![
            raw(DetType::Csc, 1, 1, 33 * 32),
            raw(DetType::Csc, 2, 1, 33 * 32),
            raw(DetType::Csc, 3, 1, 33 * 32),
            raw(DetType::Csc, 4, 1, 33 * 32),
        ];
        let tracks = pipeline.process_event(&hits, &SlimRoadEncoder, &StubOracle).unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].mode, 0b1111);
    }

    #[test]
    fn empty_event_yields_no_tracks() {
        let bank = flat_bank_one_pattern();
        let pipeline = Pipeline::new(bank, RunContext::default());
        let tracks = pipeline.process_event(&[], &SlimRoadEncoder, &StubOracle).unwrap();
        assert!(tracks.is_empty());
    }
}
