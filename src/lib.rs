//! Generates fixed-layout PDF workbooks from loosely-structured product records.
//!
//! A [ProductData] record is normalized into text every font can set, laid out
//! by [WorkbookBuilder] onto five pages and serialized with [Document::write].
//! Most callers only need [generate_workbook].

mod builder;
pub use builder::*;

mod colour;
pub use colour::*;

mod config;
pub use config::*;

mod content;

mod document;
pub use document::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

mod info;
pub use info::*;

pub mod layout;

pub mod normalize;

mod page;
pub use page::*;

pub mod pagesize;

mod product;
pub use product::*;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod units;
pub use units::*;

/// Re-export PDF-writer functionality
pub use pdf_writer;
