//! Hit records: the upstream stub as received, and the derived value the
//! preprocessor hands to every later stage.
//!
//! The preprocessor never mutates a [`RawHit`] in place. It reads one and
//! produces a [`ProcessedHit`]; everything after the preprocessor works only
//! with `ProcessedHit` values and never reaches back into the raw record.

use serde::{Deserialize, Serialize};

use crate::geom::DetType;

/// One muon-detector stub as received from the upstream ntuple, before any
/// EMTF-specific derivation has been applied.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RawHit {
    #[serde(rename = "type")]
    pub det: DetType,
    pub station: u8,
    pub ring: u8,
    pub endcap: i8,
    pub sector: u8,
    pub fr: u8,
    pub bx: i32,
    pub emtf_phi: i32,
    pub emtf_theta: i32,
    pub emtf_bend: i32,
    pub quality: i32,
    pub pattern: i32,
    pub wire: i32,
    pub time: i32,
    pub sim_tp1: i32,
    pub sim_tp2: i32,
}

impl RawHit {
    /// A hit is legit iff its bx is in the allowed set for its detector type
    /// and, for ME0/DT, `emtf_phi` is strictly positive.
    pub fn is_legit(&self) -> bool {
        let bx_ok = match self.det {
            DetType::Csc | DetType::Dt => self.bx == -1 || self.bx == 0,
            _ => self.bx == 0,
        };
        let phi_ok = match self.det {
            DetType::Me0 | DetType::Dt => self.emtf_phi > 0,
            _ => true,
        };
        bx_ok && phi_ok
    }

    /// Run-2 compatibility filter: drop RPC hits in the iRPC region (S3/S4,
    /// ring 1) and the OMTF region (S1/S2, ring 3).
    pub fn is_valid_for_run2(&self) -> bool {
        if self.det != DetType::Rpc {
            return true;
        }
        let is_irpc = (self.station == 3 || self.station == 4) && self.ring == 1;
        let is_omtf = (self.station == 1 || self.station == 2) && self.ring == 3;
        !is_irpc && !is_omtf
    }
}

/// The hit record that every stage past the preprocessor actually works
/// with. Immutable once built; identity is `(det, station, ring, endsec, fr,
/// bx)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedHit {
    pub det: DetType,
    pub station: u8,
    pub ring: u8,
    pub endsec: usize,
    pub fr: u8,
    pub bx: i32,
    pub layer: u8,
    /// Zones this hit belongs to, ordered by zone index. Only consulted by
    /// pattern recognition; a slimmed hit attached to a road or track no
    /// longer needs it.
    pub zones: Vec<u8>,
    pub emtf_phi: i32,
    pub emtf_theta: i32,
    pub emtf_bend: i32,
    pub emtf_quality: i32,
    pub emtf_time: i32,
    pub old_emtf_phi: i32,
    pub old_emtf_bend: i32,
    /// True when both sim track-of-primary fields are zero, i.e. this hit is
    /// not associated with any simulated particle.
    pub sim_tp: bool,
}

impl ProcessedHit {
    /// `(layer, emtf_phi)` identity used by road/track sibling-suppression on
    /// the key inner layers.
    pub fn key_identity(&self) -> (u8, i32) {
        (self.layer, self.emtf_phi)
    }

    pub fn is_csc(&self) -> bool {
        self.det == DetType::Csc
    }
}
