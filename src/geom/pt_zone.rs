//! Digitization of q/pT and |eta| into the bank's `ipt`/`ieta` axes.
//!
//! `digitize` does not rely on a numerical library's bucket routine: it is
//! `floor((x - x0)/(x1 - x0) * nbins)` clipped to `[0, nbins-1]`, per spec §9.

/// `q/pT` bin edges (GeV^-1), 9 bins.
pub const PT_BINS: [f64; 10] = [
    -0.5, -0.365, -0.26, -0.155, -0.07, 0.07, 0.155, 0.26, 0.365, 0.5,
];

/// `|eta|` bin edges, 7 bins, descending (matches the original ordering).
pub const ETA_BINS: [f64; 8] = [2.4, 2.16, 1.98, 1.8, 1.7, 1.56, 1.2, 0.8];

/// Clip an index into `[0, nbins-1]`.
fn clip_index(idx: i64, nbins: usize) -> usize {
    idx.clamp(0, nbins as i64 - 1) as usize
}

/// Bin a value against ascending edges, skipping the lowest edge, the way
/// `np.digitize(x, bins[1:])` does: the result is the count of edges
/// (excluding the first) that are `<= x`.
fn digitize_ascending(x: f64, edges: &[f64]) -> usize {
    // edges[0] is the overall lower bound and is skipped, matching
    // `pt_bins[1:]` / `eta_bins[1:]` in the original.
    let mut idx: i64 = 0;
    for &edge in &edges[1..] {
        if x >= edge {
            idx += 1;
        }
    }
    clip_index(idx, edges.len() - 1)
}

/// q/pT bin index, `ipt in [0,9)`, saturating at 0 and 8.
pub fn pt_bin(invpt: f64) -> usize {
    digitize_ascending(invpt, &PT_BINS)
}

/// |eta| bin index, `ieta in [0,7)`, saturating at 0 and 6. Zone 0 is the
/// highest-|eta| zone, so `ETA_BINS` (and the digitization below) run in
/// descending order, skipping the outermost edge as the original does.
pub fn eta_bin(eta: f64) -> usize {
    let abs_eta = eta.abs();
    let edges = &ETA_BINS[1..];
    let idx = edges.iter().filter(|&&e| e > abs_eta).count();
    clip_index(idx as i64, ETA_BINS.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pt_bin_saturates_at_extremes() {
        assert_eq!(pt_bin(-10.0), 0);
        assert_eq!(pt_bin(10.0), 8);
    }

    #[test]
    fn pt_bin_of_zero_is_central() {
        // 0.0 sits in the bin starting at -0.07 .. 0.07, i.e. index 4.
        assert_eq!(pt_bin(0.0), 4);
    }

    #[test]
    fn eta_bin_saturates_at_extremes() {
        assert_eq!(eta_bin(0.1), 6);
        assert_eq!(eta_bin(3.0), 0);
    }

    #[test]
    fn eta_bin_monotone_with_abs_eta() {
        assert!(eta_bin(0.9) >= eta_bin(1.5));
        assert!(eta_bin(1.5) >= eta_bin(2.3));
    }
}
