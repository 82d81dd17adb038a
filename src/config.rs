//! Layout constants and colours for the workbook templates.
//!
//! Every value has a default, so a configuration file only needs to name the
//! values it changes:
//!
//! ```
//! use workbook_gen::{Pt, WorkbookConfig};
//!
//! let config: WorkbookConfig =
//!     serde_json::from_str(r#"{ "layout": { "daily": { "day_gap": 4.0 } } }"#).unwrap();
//! assert_eq!(config.layout.daily.day_gap, Pt(4.0));
//! assert_eq!(config.layout.margin, Pt(60.0));
//! ```

use crate::colour::Palette;
use crate::error::Result;
use crate::pagesize::{PageSize, WORKBOOK};
use crate::units::Pt;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything that decides what a workbook looks like
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkbookConfig {
    pub layout: LayoutConfig,
    pub palette: Palette,
}

impl WorkbookConfig {
    /// Read a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<WorkbookConfig> {
        let path = path.as_ref();
        log::debug!("reading workbook configuration from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// Page geometry plus the per-template measurements. Vertical offsets named
/// `*_top` are measured down from the top edge of the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub page_size: PageSize,
    /// Applied on all four sides
    pub margin: Pt,
    pub cover: CoverLayout,
    pub introduction: IntroductionLayout,
    pub daily: DailyLayout,
    pub reflection: ReflectionLayout,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            page_size: WORKBOOK,
            margin: Pt(60.0),
            cover: CoverLayout::default(),
            introduction: IntroductionLayout::default(),
            daily: DailyLayout::default(),
            reflection: ReflectionLayout::default(),
        }
    }
}

impl LayoutConfig {
    pub fn width(&self) -> Pt {
        self.page_size.0
    }

    pub fn height(&self) -> Pt {
        self.page_size.1
    }

    /// Width between the left and right margins
    pub fn content_width(&self) -> Pt {
        self.width() - self.margin * 2.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverLayout {
    /// Height of the band across the top of the page
    pub band_height: Pt,
    pub title_size: Pt,
    /// Baseline of the first title line
    pub title_top: Pt,
    /// Added to the title size to get the distance between title baselines
    pub title_leading: Pt,
    /// Title lines that would sit below this are left out
    pub title_floor: Pt,
    pub subtitle_size: Pt,
    /// Distance between the cursor after the title and the subtitle baseline
    pub subtitle_gap: Pt,
    pub divider_y: Pt,
    pub divider_height: Pt,
    pub footer_y: Pt,
    pub footer_size: Pt,
}

impl Default for CoverLayout {
    fn default() -> Self {
        CoverLayout {
            band_height: Pt(150.0),
            title_size: Pt(32.0),
            title_top: Pt(200.0),
            title_leading: Pt(10.0),
            title_floor: Pt(180.0),
            subtitle_size: Pt(18.0),
            subtitle_gap: Pt(40.0),
            divider_y: Pt(100.0),
            divider_height: Pt(2.0),
            footer_y: Pt(70.0),
            footer_size: Pt(14.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntroductionLayout {
    pub heading_top: Pt,
    pub heading_size: Pt,
    pub heading_gap: Pt,
    pub description_size: Pt,
    pub description_leading: Pt,
    /// Space between the description and the benefits heading
    pub section_gap: Pt,
    pub benefits_heading_size: Pt,
    pub benefits_heading_gap: Pt,
    pub benefit_size: Pt,
    pub benefit_leading: Pt,
    /// How far benefit text sits to the right of the margin
    pub benefit_indent: Pt,
    /// Extra space after each benefit
    pub benefit_gap: Pt,
    /// Side length of the square bullet
    pub bullet_size: Pt,
}

impl Default for IntroductionLayout {
    fn default() -> Self {
        IntroductionLayout {
            heading_top: Pt(100.0),
            heading_size: Pt(28.0),
            heading_gap: Pt(50.0),
            description_size: Pt(14.0),
            description_leading: Pt(22.0),
            section_gap: Pt(30.0),
            benefits_heading_size: Pt(20.0),
            benefits_heading_gap: Pt(35.0),
            benefit_size: Pt(13.0),
            benefit_leading: Pt(24.0),
            benefit_indent: Pt(20.0),
            benefit_gap: Pt(8.0),
            bullet_size: Pt(4.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyLayout {
    pub banner_height: Pt,
    pub banner_title_size: Pt,
    /// Horizontal inset of the banner title
    pub banner_padding: Pt,
    /// Where the first day starts
    pub days_top: Pt,
    /// No further day starts once the cursor is below this
    pub day_threshold: Pt,
    pub day_name_size: Pt,
    pub day_name_gap: Pt,
    pub label_size: Pt,
    pub label_gap: Pt,
    pub lines_per_day: usize,
    pub line_gap: Pt,
    pub line_thickness: Pt,
    /// Extra space after each day
    pub day_gap: Pt,
}

impl Default for DailyLayout {
    fn default() -> Self {
        DailyLayout {
            banner_height: Pt(50.0),
            banner_title_size: Pt(22.0),
            banner_padding: Pt(15.0),
            days_top: Pt(150.0),
            day_threshold: Pt(150.0),
            day_name_size: Pt(16.0),
            day_name_gap: Pt(22.0),
            label_size: Pt(11.0),
            label_gap: Pt(26.0),
            lines_per_day: 2,
            line_gap: Pt(26.0),
            line_thickness: Pt(0.5),
            day_gap: Pt(12.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReflectionLayout {
    pub heading_top: Pt,
    pub heading_size: Pt,
    pub heading_gap: Pt,
    pub prompt_size: Pt,
    pub prompt_leading: Pt,
    pub lines_per_prompt: usize,
    pub line_gap: Pt,
    pub line_thickness: Pt,
    /// Extra space after each prompt's ruled lines
    pub prompt_gap: Pt,
    pub divider_y: Pt,
    pub divider_height: Pt,
    pub closing_y: Pt,
    pub closing_size: Pt,
}

impl Default for ReflectionLayout {
    fn default() -> Self {
        ReflectionLayout {
            heading_top: Pt(100.0),
            heading_size: Pt(26.0),
            heading_gap: Pt(50.0),
            prompt_size: Pt(13.0),
            prompt_leading: Pt(24.0),
            lines_per_prompt: 4,
            line_gap: Pt(24.0),
            line_thickness: Pt(0.5),
            prompt_gap: Pt(20.0),
            divider_y: Pt(100.0),
            divider_height: Pt(2.0),
            closing_y: Pt(70.0),
            closing_size: Pt(12.0),
        }
    }
}
