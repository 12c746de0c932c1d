//! # Geometry LUTs
//!
//! This module holds the fixed, compile-time lookup tables that describe the
//! detector: which logical layer a hit belongs to, which pseudorapidity zones
//! it can contribute to, and the small per-type corrections (bend, phi, theta)
//! that turn a raw hit into the integer coordinates used everywhere downstream.
//!
//! None of this is runtime configuration. It is baked-in detector geometry,
//! the same way `bios::skew` and `bios::dpb` are baked-in disk geometry for
//! the teacher crate this one is descended from.

pub mod angles;
pub mod bend;
pub mod layer;
pub mod phi;
pub mod pt_zone;
pub mod theta;
pub mod zone;

pub use angles::*;
pub use bend::{find_emtf_bend, find_emtf_old_bend};
pub use layer::{find_emtf_layer, NLAYERS};
pub use phi::find_emtf_phi;
pub use pt_zone::{eta_bin, pt_bin, ETA_BINS, PT_BINS};
pub use theta::find_emtf_theta;
pub use zone::{find_emtf_zones, zone_windows};

/// Hit detector type, a closed variant set dispatched on throughout the
/// geometry and preprocessing code instead of ad-hoc integer branching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum DetType {
    Dt = 0,
    Csc = 1,
    Rpc = 2,
    Gem = 3,
    Me0 = 4,
}

impl DetType {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(DetType::Dt),
            1 => Some(DetType::Csc),
            2 => Some(DetType::Rpc),
            3 => Some(DetType::Gem),
            4 => Some(DetType::Me0),
            _ => None,
        }
    }
}

/// Flat index in `[0,12)` concatenating endcap and sector.
pub fn find_endsec(endcap: i8, sector: u8) -> usize {
    let sector0 = (sector - 1) as usize;
    if endcap == -1 {
        sector0 + 6
    } else {
        sector0
    }
}

/// Inverse of [`find_endsec`].
pub fn endsec_to_endcap_sector(endsec: usize) -> (i8, u8) {
    if endsec < 6 {
        (1, endsec as u8 + 1)
    } else {
        (-1, (endsec - 6) as u8 + 1)
    }
}
