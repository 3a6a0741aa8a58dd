//! Sliding window of page-number controls

/// Page numbers to expose around `current`, at most `max_visible` of them.
///
/// The window stays centered on `current` and slides instead of shrinking
/// when it hits either end of `1..=total`. Pages are 1-based.
pub fn compute_window(current: usize, total: usize, max_visible: usize) -> Vec<usize> {
    if total == 0 || max_visible == 0 {
        return Vec::new();
    }

    let current = current.clamp(1, total);
    let half = max_visible / 2;

    let mut start = current.saturating_sub(half).max(1);
    let end = (start + max_visible - 1).min(total);

    // Clamped at the high edge: pull the start back down
    if end - start + 1 < max_visible {
        start = (end + 1).saturating_sub(max_visible).max(1);
    }

    (start..=end).collect()
}
