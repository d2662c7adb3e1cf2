use bytes::Bytes;
use image::RgbaImage;

/// Where and how large one page image lands on its output page, in
/// output-medium units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagePlacement {
    pub offset_x_units: f64,
    pub offset_y_units: f64,
    pub width_units: f64,
    pub height_units: f64,
    pub page_width_units: f64,
    pub page_height_units: f64,
}

/// One output page: the slice's pixels plus their placement.
#[derive(Debug, Clone)]
pub struct AssembledPage {
    pub image: RgbaImage,
    pub placement: PagePlacement,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct AssembleError(pub String);

/// Document-assembly collaborator: receives the pages in emission order and
/// produces the final document byte stream. No reordering happens here or
/// downstream.
pub trait DocumentAssembler: Send + Sync {
    fn assemble(&self, pages: &[AssembledPage]) -> Result<Bytes, AssembleError>;
}
