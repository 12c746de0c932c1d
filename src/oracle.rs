//! The external regression boundary: encode a slim road into a feature
//! vector, hand it to a predictor, decode the result.
//!
//! The real system trains a Keras network over these features; this crate
//! never depends on an ML runtime. `Encoder` and `Oracle` are the seam: a
//! test or a CLI stub can implement them directly, and a real model binding
//! lives outside this crate entirely.

use crate::geom::NLAYERS;
use crate::road::Road;

/// Width of the encoded feature vector handed to an [`Oracle`].
///
/// Grounded on `TrackProducer.run`'s `nvariables = (nlayers * 6) + 3 - 36`
/// in the original source: 16 layers times a reduced per-layer field count,
/// plus three trailing engineered features (straightness, zone,
/// theta_median) that the decoders below invert.
pub const NVARIABLES: usize = NLAYERS * 6 + 3 - 36;

/// Per-layer fields packed into the feature vector ahead of the three
/// trailing engineered values. Only `PER_LAYER_FIELDS * NLAYERS` of the
/// `NVARIABLES - 3` slots before the trailer are meaningful; the remainder
/// are reserved and left zero, since this encoder is a simplified stand-in
/// for the original network's full per-layer field set.
const PER_LAYER_FIELDS: usize = 3; // dphi, dtheta, bend

/// Encodes a slim road into the feature vector and per-layer presence mask
/// consumed by an [`Oracle`]. `true` in the mask means the layer is absent
/// (matches the original `x_mask`, where `~x_mask` is "valid").
pub trait Encoder {
    fn encode(&self, road: &Road) -> (Vec<f32>, [bool; NLAYERS]);
}

/// Simplified stand-in for `nn_encode.py`'s `Encoder`: subtracts the road's
/// seeded phi/theta from each hit's phi/theta, keeps the bend, and appends
/// the three engineered features the decoders below read back out.
pub struct SlimRoadEncoder;

impl Encoder for SlimRoadEncoder {
    fn encode(&self, road: &Road) -> (Vec<f32>, [bool; NLAYERS]) {
        let mut x = vec![0.0f32; NVARIABLES];
        let mut absent = [true; NLAYERS];

        let phi_seed = (road.id.iphi * 32) as f32;
        let theta_seed = road.theta_median as f32;

        for hit in &road.hits {
            let l = hit.layer as usize;
            if l >= NLAYERS {
                continue;
            }
            absent[l] = false;
            let base = l * PER_LAYER_FIELDS;
            if base + 2 < NVARIABLES - 3 {
                x[base] = hit.emtf_phi as f32 - phi_seed;
                x[base + 1] = hit.emtf_theta as f32 - theta_seed;
                x[base + 2] = hit.emtf_bend as f32;
            }
        }

        let straightness = road.id.ipt as f32;
        let zone = road.id.ieta as f32;
        let theta_median = road.theta_median as f32;

        x[NVARIABLES - 3] = (straightness - 4.0) / 4.0;
        x[NVARIABLES - 2] = (zone - 0.0) / 5.0;
        x[NVARIABLES - 1] = (theta_median - 3.0) / 83.0;

        (x, absent)
    }
}

/// Inverse of the trailing `theta_median` feature: `x[-1]*83 + 3`.
pub fn get_theta_median_from_x(x: &[f32]) -> i32 {
    (x[x.len() - 1] * 83.0 + 3.0).round() as i32
}

/// Inverse of the trailing `zone` feature: `x[-2]*5 + 0`.
pub fn get_zone_from_x(x: &[f32]) -> i32 {
    (x[x.len() - 2] * 5.0).round() as i32
}

/// Inverse of the trailing `straightness` feature: `x[-3]*4 + 4`.
pub fn get_straightness_from_x(x: &[f32]) -> i32 {
    (x[x.len() - 3] * 4.0 + 4.0).round() as i32
}

/// Count of present (non-absent) layers in a mask.
pub fn get_ndof_from_x_mask(absent: &[bool; NLAYERS]) -> u32 {
    absent.iter().filter(|&&a| !a).count() as u32
}

/// Station-presence mode derived from the layer mask, with the ME0+ME1/1
/// SingleMu promotion rule.
pub fn get_mode_from_x_mask(absent: &[bool; NLAYERS]) -> u8 {
    let valid = |i: usize| !absent[i];
    let mut mode = 0u8;
    if valid(0) || valid(1) || valid(5) || valid(9) || valid(11) {
        mode |= 1 << 3;
    }
    if valid(2) || valid(6) || valid(10) {
        mode |= 1 << 2;
    }
    if valid(3) || valid(7) {
        mode |= 1 << 1;
    }
    if valid(4) || valid(8) {
        mode |= 1;
    }

    let mut mode_me0 = 0u8;
    if valid(11) {
        mode_me0 |= 1 << 2;
    }
    if valid(0) {
        mode_me0 |= 1 << 1;
    }
    if valid(2) || valid(3) || valid(4) {
        mode_me0 |= 1;
    }
    if !matches!(mode, 11 | 13 | 14 | 15) && mode_me0 == 7 {
        mode = 11;
    }
    mode
}

/// The regression prediction `(y_hat, d_hat)` for one row: `y_hat` is the
/// signed `q/pT` estimate, `d_hat` is the discriminator.
pub type Prediction = (f32, f32);

/// The model binding: takes a batch of encoded feature rows, returns one
/// prediction per row. Implementations may call into any ML runtime; this
/// crate depends on none.
pub trait Oracle {
    fn predict(&self, features: &[Vec<f32>]) -> Vec<Prediction>;
}

/// Deterministic stand-in used by the CLI `run` subcommand and by tests,
/// when no real model binding is available. Derives `y_hat` from the road's
/// own `ipt` bin (so pt assignment is self-consistent) and a discriminator
/// from the road's quality, high enough to always pass `pass_trigger`.
pub struct StubOracle;

impl Oracle for StubOracle {
    fn predict(&self, features: &[Vec<f32>]) -> Vec<Prediction> {
        features
            .iter()
            .map(|x| {
                let straightness = get_straightness_from_x(x).max(1) as f32;
                let y_hat = 1.0 / (straightness * 7.0);
                (y_hat, 1.0)
            })
            .collect()
    }
}
