//! Closest supported resolution search for touch screens.
//!
//! `UIScreen` exposes a fixed list of modes; a caller asking for an
//! arbitrary resolution gets whichever mode is nearest to it.

use super::display::Resolution;

/// Returns the index of the mode nearest to `requested`.
///
/// Distance is Euclidean in `(width, height)` space.  When several modes are
/// equally near, the first one in `modes` wins.  Returns `None` only when
/// `modes` is empty.
pub fn closest_resolution_index(modes: &[Resolution], requested: Resolution) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, mode) in modes.iter().enumerate() {
        let distance = requested.distance_to(mode);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((index, distance)),
        }
    }
    best.map(|(index, _)| index)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
