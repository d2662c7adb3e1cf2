//! Exporter core: page geometry and raster pagination.
mod geometry;
mod paginate;
mod raster;

pub use geometry::PageGeometry;
pub use paginate::{
    paginate, slice_height_units, PageSlice, PaginateError, BACKGROUND_MIN_CHANNEL,
    SAMPLE_COLUMN_STRIDE, SPLIT_SEARCH_FRACTION,
};
pub use raster::RasterSurface;
