//! Decide the corrected integer bend for a hit.
//!
//! CSC station 1 ME1/1a bend is rescaled onto the ME1/1b scale; CSC stations
//! 2-4 bend is flattened to `{-1,0,+1}`; GEM bend is endcap-signed; ME0 bend
//! passes through; DT bend is clamped when quality is high enough, else
//! zeroed; everything else is zero.

use super::DetType;

pub fn find_emtf_bend(
    det: DetType,
    station: u8,
    ring: u8,
    raw_bend: i32,
    endcap: i8,
    quality: i32,
) -> i32 {
    match det {
        DetType::Csc => {
            let mut bend = raw_bend as f64;
            if station == 1 {
                if ring == 4 {
                    // ME1/1a: rescale to the ME1/1b bend scale.
                    bend *= 0.026331 / 0.014264;
                }
            } else {
                bend = if (-8..=8).contains(&raw_bend) {
                    0.0
                } else if raw_bend > 8 {
                    1.0
                } else {
                    -1.0
                };
            }
            (bend * endcap as f64).round() as i32
        }
        DetType::Gem => raw_bend * endcap as i32,
        DetType::Me0 => raw_bend,
        DetType::Dt => {
            if quality >= 4 {
                raw_bend.clamp(-512, 511)
            } else {
                0
            }
        }
        DetType::Rpc => 0,
    }
}

/// CLCT-pattern-to-bend lookup used only by [`find_emtf_old_bend`]'s CSC
/// branch; `pattern` is the upstream CLCT pattern id in `[0,10]`.
const CLCT_BEND_LUT: [i32; 11] = [5, -5, 4, -4, 3, -3, 2, -2, 1, -1, 0];

/// The uncorrected bend estimate kept alongside the corrected one, grounded
/// on the original `EMTFOldBend` transform. CSC derives it from the CLCT
/// pattern id rather than the raw bend field; GEM/ME0/DT pass the raw bend
/// through (GEM endcap-signed).
pub fn find_emtf_old_bend(det: DetType, raw_bend: i32, pattern: i32, endcap: i8) -> i32 {
    match det {
        DetType::Csc => CLCT_BEND_LUT[pattern as usize],
        DetType::Gem => raw_bend * endcap as i32,
        DetType::Me0 | DetType::Dt => raw_bend,
        DetType::Rpc => 0,
    }
}
