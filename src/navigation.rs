// Index arithmetic. Any signed target wraps into [0, total).

/// Wrap `target` into `0..total`. `total` must be non-zero.
pub fn wrap_index(target: i64, total: usize) -> usize {
    debug_assert!(total > 0, "slideshow must have at least one slide");
    target.rem_euclid(total as i64) as usize
}

/// Counter text, 1-based: `"3 / 7"`.
pub fn counter_text(index: usize, total: usize) -> String {
    format!("{} / {}", index + 1, total)
}
