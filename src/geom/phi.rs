//! Decide the bend-corrected integer phi for a hit.
//!
//! Only CSC station 1 hits get a correction: `bend_corr = coeff(ring,fr) *
//! bend`, sign-flipped for endcap -1, rounded to the nearest integer and
//! added to the raw `emtf_phi`.

use super::DetType;

/// `(r, f)` bend-correction coefficient pairs, indexed by ring.
fn bend_corr_coeffs(ring: u8) -> (f64, f64) {
    match ring {
        1 => (-1.3861, 1.3692), // ME1/1b
        4 => (-1.6419, 1.6012), // ME1/1a
        _ => (-0.9237, 0.8287), // ME1/2
    }
}

pub fn find_emtf_phi(
    det: DetType,
    station: u8,
    ring: u8,
    fr: u8,
    bend: i32,
    endcap: i8,
    raw_emtf_phi: i32,
) -> i32 {
    if det != DetType::Csc || station != 1 {
        return raw_emtf_phi;
    }
    let (r, f) = bend_corr_coeffs(ring);
    let coeff = if fr == 0 { r } else { f };
    let mut bend_corr = coeff * bend as f64;
    if endcap != 1 {
        bend_corr = -bend_corr;
    }
    raw_emtf_phi + bend_corr.round() as i32
}
