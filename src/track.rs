//! Tracks: one reconstructed candidate per `(endcap, sector)`.

use serde::{Deserialize, Serialize};

use crate::geom::{calc_eta_from_theta_deg, calc_phi_glob_deg, calc_phi_loc_deg, calc_theta_deg_from_int};
use crate::hit::ProcessedHit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TrackId {
    pub endcap: i8,
    pub sector: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub hits: Vec<ProcessedHit>,
    pub mode: u8,
    pub zone: u8,
    pub pt_raw: f32,
    pub pt: f32,
    pub q: i8,
    pub emtf_phi: i32,
    pub emtf_theta: i32,
    pub ndof: u32,
    pub chi2: f32,
}

impl Track {
    /// Global phi in degrees, via the sector-local affine map.
    pub fn phi_deg(&self) -> f64 {
        calc_phi_glob_deg(calc_phi_loc_deg(self.emtf_phi), self.id.sector)
    }

    /// Pseudorapidity, via the endcap-mirrored theta map.
    pub fn eta(&self) -> f64 {
        calc_eta_from_theta_deg(calc_theta_deg_from_int(self.emtf_theta), self.id.endcap)
    }

    /// `(layer, emtf_phi)` pairs on the key inner layers {ME1/1, ME1/2, ME0,
    /// MB1, MB2}, used by ghost-busting's sibling test.
    pub fn key_hit_identities(&self) -> Vec<(u8, i32)> {
        const KEY_LAYERS: [u8; 5] = [0, 1, 11, 12, 13];
        self.hits
            .iter()
            .filter(|h| KEY_LAYERS.contains(&h.layer))
            .map(|h| h.key_identity())
            .collect()
    }
}
