//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate output dimensions bounded by a maximum width and height.
///
/// The comparison is driven by the longer edge: landscape (and square) images
/// are gated by `max_width`, portrait images by `max_height`. When the gating
/// bound is exceeded, both dimensions are scaled by the same factor so aspect
/// ratio is preserved; the free dimension is rounded to the nearest pixel.
/// When the gating bound is not exceeded, dimensions pass through unchanged —
/// the other bound is deliberately not consulted.
///
/// # Examples
/// ```
/// # use upfit::imaging::calculate_bounded_dimensions;
/// // Landscape over the width bound: 4000x3000 into 2400x1800
/// assert_eq!(calculate_bounded_dimensions((4000, 3000), 2400, 1800), (2400, 1800));
///
/// // Portrait over the height bound: 3000x4000 scales by 1800/4000
/// assert_eq!(calculate_bounded_dimensions((3000, 4000), 2400, 1800), (1350, 1800));
///
/// // Within bounds: unchanged
/// assert_eq!(calculate_bounded_dimensions((1000, 800), 2400, 1800), (1000, 800));
/// ```
pub fn calculate_bounded_dimensions(
    source: (u32, u32),
    max_width: u32,
    max_height: u32,
) -> (u32, u32) {
    let (w, h) = source;

    if w >= h {
        // Landscape or square: width is the gating edge
        if w > max_width {
            let ratio = max_width as f64 / w as f64;
            (max_width, (h as f64 * ratio).round() as u32)
        } else {
            (w, h)
        }
    } else {
        // Portrait: height is the gating edge
        if h > max_height {
            let ratio = max_height as f64 / h as f64;
            ((w as f64 * ratio).round() as u32, max_height)
        } else {
            (w, h)
        }
    }
}
