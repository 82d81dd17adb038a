//! Page layout utilities.
//!
//! - [`wrap_text`] breaks a paragraph into lines using real glyph widths
//! - [`Cursor`] tracks the vertical position while a template fills a page
//! - [`Margins`] describe the content box of a page
//!
//! # Example
//!
//! ```
//! use workbook_gen::{Font, FontRole, Pt};
//! use workbook_gen::layout::wrap_text;
//!
//! let font = Font::standard(FontRole::Regular);
//! let lines = wrap_text("Your personal workbook for fourteen days", Pt(120.0), Pt(14.0), &font);
//! assert!(lines.len() > 1);
//! assert_eq!(lines.join(" "), "Your personal workbook for fourteen days");
//! ```

mod cursor;
mod margins;
mod wrap;

pub use cursor::*;
pub use margins::*;
pub use wrap::*;
