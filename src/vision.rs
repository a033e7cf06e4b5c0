//! # Segmentation Helpers
//!
//! Bounding boxes of boolean masks and overlap scores between boxes or masks.
//! Boxes use inclusive `(row, col)` corners as produced by
//! [`bbox_of_mask`]; areas are computed as `(r_max - r_min) * (c_max - c_min)`.

use ndarray::Array2;

use crate::error::{Result, ToolboxError};

/// Axis-aligned box given by its top-left and bottom-right corners
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BBox {
    pub r_min: usize,
    pub c_min: usize,
    pub r_max: usize,
    pub c_max: usize,
}

/// Intersection over union plus the intersection relative to each operand
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Overlap {
    pub iou: f64,
    /// Intersection over the area of the first operand
    pub io_a: f64,
    /// Intersection over the area of the second operand
    pub io_b: f64,
}

impl BBox {
    pub fn new(r_min: usize, c_min: usize, r_max: usize, c_max: usize) -> Self {
        Self {
            r_min,
            c_min,
            r_max,
            c_max,
        }
    }

    /// Smallest box containing both boxes
    pub fn union(&self, other: &BBox) -> BBox {
        BBox::new(
            self.r_min.min(other.r_min),
            self.c_min.min(other.c_min),
            self.r_max.max(other.r_max),
            self.c_max.max(other.c_max),
        )
    }

    /// Overlap of both boxes; may be degenerate (`r_min >= r_max`)
    pub fn intersection(&self, other: &BBox) -> BBox {
        BBox::new(
            self.r_min.max(other.r_min),
            self.c_min.max(other.c_min),
            self.r_max.min(other.r_max),
            self.c_max.min(other.c_max),
        )
    }

    /// Area, zero for degenerate boxes
    pub fn area(&self) -> usize {
        if self.r_min < self.r_max && self.c_min < self.c_max {
            (self.r_max - self.r_min) * (self.c_max - self.c_min)
        } else {
            0
        }
    }

    pub fn overlap(&self, other: &BBox) -> Overlap {
        let inner = self.intersection(other).area();
        scores(inner, self.area(), other.area())
    }

    pub fn iou(&self, other: &BBox) -> f64 {
        self.overlap(other).iou
    }
}

/// Bounding box of the `true` pixels, or `None` for an empty mask
pub fn bbox_of_mask(mask: &Array2<bool>) -> Option<BBox> {
    let rows: Vec<usize> = mask
        .rows()
        .into_iter()
        .enumerate()
        .filter(|(_, row)| row.iter().any(|&v| v))
        .map(|(i, _)| i)
        .collect();
    let cols: Vec<usize> = mask
        .columns()
        .into_iter()
        .enumerate()
        .filter(|(_, col)| col.iter().any(|&v| v))
        .map(|(i, _)| i)
        .collect();

    Some(BBox::new(
        *rows.first()?,
        *cols.first()?,
        *rows.last()?,
        *cols.last()?,
    ))
}

/// Pixel-level overlap of two masks of the same shape
pub fn pixel_overlap(a: &Array2<bool>, b: &Array2<bool>) -> Result<Overlap> {
    if a.shape() != b.shape() {
        return Err(ToolboxError::shape(a.len(), b.len()));
    }
    let inner = a.iter().zip(b.iter()).filter(|&(&x, &y)| x && y).count();
    let area_a = a.iter().filter(|&&v| v).count();
    let area_b = b.iter().filter(|&&v| v).count();
    Ok(scores(inner, area_a, area_b))
}

/// NaN results mark empty denominators
fn scores(inner: usize, area_a: usize, area_b: usize) -> Overlap {
    let ratio = |num: usize, den: usize| {
        if den == 0 {
            f64::NAN
        } else {
            num as f64 / den as f64
        }
    };
    Overlap {
        iou: ratio(inner, area_a + area_b - inner),
        io_a: ratio(inner, area_a),
        io_b: ratio(inner, area_b),
    }
}
