//! Decide the corrected integer theta for a hit.
//!
//! Only DT hits with an unset wire (`wire == -1`) are imputed, per station.

use super::DetType;

pub fn find_emtf_theta(det: DetType, station: u8, wire: i32, raw_emtf_theta: i32) -> i32 {
    if det != DetType::Dt || wire != -1 {
        return raw_emtf_theta;
    }
    match station {
        1 => 112,
        2 => 122,
        3 => 131,
        _ => raw_emtf_theta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dt_imputes_theta_when_wire_unset() {
        assert_eq!(find_emtf_theta(DetType::Dt, 1, -1, 0), 112);
        assert_eq!(find_emtf_theta(DetType::Dt, 2, -1, 0), 122);
        assert_eq!(find_emtf_theta(DetType::Dt, 3, -1, 0), 131);
    }

    #[test]
    fn dt_with_wire_is_unchanged() {
        assert_eq!(find_emtf_theta(DetType::Dt, 1, 5, 77), 77);
    }

    #[test]
    fn non_dt_is_unchanged() {
        assert_eq!(find_emtf_theta(DetType::Csc, 1, -1, 77), 77);
    }
}
