//! Degree <-> integer phi/theta conversions and sector/endcap affine maps.
//!
//! `emtf_phi` is a per-sector local azimuth scaled so one degree is 60 units,
//! offset by 22 degrees. `emtf_theta` is a 7-bit integer in `[0,127]` over the
//! physical range `[8.5, 45.0]` degrees.

const PHI_UNITS_PER_DEG: f64 = 60.0;
const PHI_OFFSET_DEG: f64 = 22.0;
const THETA_LO_DEG: f64 = 8.5;
const THETA_HI_DEG: f64 = 45.0;
const THETA_NBITS: f64 = 128.0;

/// Wrap a phi value in degrees into `[-180, 180)`.
pub fn range_phi_deg(mut deg: f64) -> f64 {
    while deg < -180.0 {
        deg += 360.0;
    }
    while deg >= 180.0 {
        deg -= 360.0;
    }
    deg
}

/// Global phi (degrees) to sector-local phi (degrees), sector in `[1,6]`.
pub fn calc_phi_loc_deg_from_glob(glob: f64, sector: u8) -> f64 {
    let glob = range_phi_deg(glob);
    glob - 15.0 - 60.0 * (sector as f64 - 1.0)
}

/// Global phi (degrees) to the integer `emtf_phi` unit, with wraparound.
pub fn calc_phi_loc_int(glob: f64, sector: u8) -> i32 {
    let mut loc = calc_phi_loc_deg_from_glob(glob, sector);
    if loc + PHI_OFFSET_DEG < 0.0 {
        loc += 360.0;
    }
    loc = (loc + PHI_OFFSET_DEG) * PHI_UNITS_PER_DEG;
    loc.round() as i32
}

/// Integer `emtf_phi` unit to sector-local phi (degrees).
pub fn calc_phi_loc_deg(bits: i32) -> f64 {
    bits as f64 / PHI_UNITS_PER_DEG - PHI_OFFSET_DEG
}

/// Sector-local phi (degrees) to global phi (degrees), wrapped into
/// `[-180, 180)`.
pub fn calc_phi_glob_deg(loc: f64, sector: u8) -> f64 {
    let mut glob = loc + 15.0 + 60.0 * (sector as f64 - 1.0);
    if glob >= 180.0 {
        glob -= 360.0;
    }
    glob
}

/// Physical theta (degrees) to the integer `emtf_theta` unit, endcap-mirrored.
pub fn calc_theta_int(theta_deg: f64, endcap: i8) -> i32 {
    let theta_deg = if endcap == -1 { 180.0 - theta_deg } else { theta_deg };
    let theta = (theta_deg - THETA_LO_DEG) * THETA_NBITS / (THETA_HI_DEG - THETA_LO_DEG);
    theta.round() as i32
}

/// Integer `emtf_theta` unit to physical theta (degrees), endcap un-mirrored
/// is the caller's responsibility (this is the inverse of the unmirrored map
/// used inside `calc_theta_int`).
pub fn calc_theta_deg_from_int(theta_int: i32) -> f64 {
    theta_int as f64 * (THETA_HI_DEG - THETA_LO_DEG) / THETA_NBITS + THETA_LO_DEG
}

/// Physical theta (degrees) and endcap to pseudorapidity.
pub fn calc_eta_from_theta_deg(theta_deg: f64, endcap: i8) -> f64 {
    let theta_rad = theta_deg.to_radians();
    let eta = -(theta_rad / 2.0).tan().ln();
    if endcap == -1 {
        -eta
    } else {
        eta
    }
}
