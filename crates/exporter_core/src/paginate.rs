use crate::{PageGeometry, RasterSurface};

/// Columns sampled when classifying a row as background.
pub const SAMPLE_COLUMN_STRIDE: u32 = 10;
/// A channel at or above this value counts as background (near-white).
pub const BACKGROUND_MIN_CHANNEL: u8 = 250;
/// Fraction of the ideal slice height searched upward for a split row.
pub const SPLIT_SEARCH_FRACTION: f64 = 0.2;

/// One contiguous vertical band of a [`RasterSurface`], mapped 1:1 to one
/// output page. Coordinates are source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSlice {
    pub source_y_start: u32,
    pub source_height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PaginateError {
    #[error("slice invariant violation: computed height {height} at row {y}")]
    SliceInvariantViolation { y: u32, height: i64 },
}

/// Slices `surface` into page-sized bands, preferring boundaries that fall on
/// all-background rows so a line of text is not cut across two pages.
///
/// The emitted slices are contiguous, cover `[0, surface.height())` exactly
/// once, and every height is positive. An empty surface yields an empty
/// sequence.
pub fn paginate(
    surface: &dyn RasterSurface,
    geometry: &PageGeometry,
) -> Result<Vec<PageSlice>, PaginateError> {
    let height = surface.height();
    if height == 0 {
        return Ok(Vec::new());
    }

    // Pixel height that maps onto one full content page at this surface's
    // pixel density.
    let ideal = ideal_slice_height(surface.width(), geometry);

    let mut slices = Vec::new();
    let mut y: u32 = 0;
    while y < height {
        let end = if f64::from(y) + ideal >= f64::from(height) {
            // Final slice: take the remainder as-is, no split-point search.
            height
        } else {
            find_split_point(surface, f64::from(y) + ideal, ideal * SPLIT_SEARCH_FRACTION)
        };

        if end <= y {
            return Err(PaginateError::SliceInvariantViolation {
                y,
                height: i64::from(end) - i64::from(y),
            });
        }

        slices.push(PageSlice {
            source_y_start: y,
            source_height: end - y,
        });
        y = end;
    }

    Ok(slices)
}

/// Height one slice occupies on the page, in output-medium units. Applied
/// only when emitting placement instructions, never when choosing split
/// points.
pub fn slice_height_units(slice: &PageSlice, surface_width: u32, geometry: &PageGeometry) -> f64 {
    f64::from(slice.source_height) * geometry.content_width_units() / f64::from(surface_width)
}

fn ideal_slice_height(surface_width: u32, geometry: &PageGeometry) -> f64 {
    f64::from(surface_width) * geometry.content_height_units() / geometry.content_width_units()
}

/// Scans upward from `target_y` through at most `max_search` rows and returns
/// the first all-background row found, or `target_y` (floored) when none is.
fn find_split_point(surface: &dyn RasterSurface, target_y: f64, max_search: f64) -> u32 {
    let max_y = surface.height();
    if target_y >= f64::from(max_y) {
        return max_y;
    }

    let search_start = target_y.floor() as u32;
    let window_top = target_y - max_search;
    if window_top < 0.0 {
        return search_start;
    }
    let search_end = window_top.floor() as u32;

    for row in (search_end..search_start).rev() {
        if is_background_row(surface, row) {
            return row;
        }
    }

    search_start
}

/// A row is background when every sampled column is within tolerance of
/// white. Alpha is ignored.
fn is_background_row(surface: &dyn RasterSurface, row: u32) -> bool {
    let mut x = 0;
    while x < surface.width() {
        let [r, g, b, _] = surface.rgba(x, row);
        if r < BACKGROUND_MIN_CHANNEL || g < BACKGROUND_MIN_CHANNEL || b < BACKGROUND_MIN_CHANNEL {
            return false;
        }
        x += SAMPLE_COLUMN_STRIDE;
    }
    true
}
