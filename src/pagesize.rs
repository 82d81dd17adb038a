//! Page dimensions.
//!
//! Workbooks are always laid out on a single portrait canvas, [WORKBOOK], which
//! is ISO A4 rounded to the hundredth of a point.

use crate::units::*;

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

/// The fixed workbook canvas
pub const WORKBOOK: PageSize = (Pt(595.28), Pt(841.89));
