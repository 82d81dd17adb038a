//! The five-page workbook template.
//!
//! [WorkbookBuilder::build] always produces the same sequence of pages: a cover,
//! an introduction, two daily sections and a reflection page. Only the cover
//! and the introduction depend on the product; the remaining pages are fixed.
//!
//! ```
//! use workbook_gen::{generate_workbook, FontResource, ProductData};
//!
//! let product = ProductData {
//!     title: Some("Morning Pages".into()),
//!     benefits: Some(vec![Some("A calmer start to the day".into())]),
//!     ..Default::default()
//! };
//! let pdf = generate_workbook(&product, &FontResource::standard()).unwrap();
//! assert!(pdf.starts_with(b"%PDF-"));
//! ```

use crate::{
    colour::Colour,
    config::WorkbookConfig,
    document::Document,
    error::Result,
    font::{FontResource, FontRole, TextMeasure},
    info::Info,
    layout::{wrap_text, Cursor, Margins},
    normalize::collapse_whitespace,
    page::{Canvas, Page, TextBlock},
    product::{NormalizedContent, ProductData},
    rect::Rect,
    units::Pt,
};

pub const COVER_SUBTITLE: &str = "Your Personal Workbook";
pub const BRAND: &str = "TresorAI";
pub const WELCOME_HEADING: &str = "Welcome";
pub const BENEFITS_HEADING: &str = "What You'll Gain";
pub const DAILY_SECTIONS: [&str; 2] = ["Day 1-7: Foundation", "Day 8-14: Growth"];
pub const DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];
pub const DAY_LABEL: &str = "Intention & reflections:";
pub const REFLECTION_HEADING: &str = "Reflection & Next Steps";
pub const REFLECTION_PROMPTS: [&str; 4] = [
    "What was your biggest breakthrough these past two weeks?",
    "Which habits felt natural, and which took more effort?",
    "What will you carry forward into the next chapter?",
    "What is one bold step you will take next?",
];
pub const CLOSING_LINE: &str = "Keep going, you're doing beautifully.";

/// Generate the PDF workbook for a product with the default layout
pub fn generate_workbook(product: &ProductData, fonts: &FontResource) -> Result<Vec<u8>> {
    generate_workbook_with(product, fonts, &WorkbookConfig::default())
}

/// Generate the PDF workbook for a product with a custom layout or palette
pub fn generate_workbook_with(
    product: &ProductData,
    fonts: &FontResource,
    config: &WorkbookConfig,
) -> Result<Vec<u8>> {
    let content = NormalizedContent::from(product);
    log::debug!("generating workbook {:?}", content.title);
    WorkbookBuilder::new(fonts, config).build(&content).to_bytes()
}

/// Lays the workbook template out onto pages. Building never fails: anything
/// that doesn't fit is left out rather than overflowing the page.
pub struct WorkbookBuilder<'a> {
    fonts: &'a FontResource,
    config: &'a WorkbookConfig,
}

impl<'a> WorkbookBuilder<'a> {
    pub fn new(fonts: &'a FontResource, config: &'a WorkbookConfig) -> WorkbookBuilder<'a> {
        WorkbookBuilder { fonts, config }
    }

    /// Compose the full five-page document
    pub fn build(&self, content: &NormalizedContent) -> Document {
        let mut document = Document::new(self.fonts.clone());

        let mut info = Info::new();
        info.title(collapse_whitespace(&content.title));
        if !content.social_caption.is_empty() {
            info.subject(collapse_whitespace(&content.social_caption));
        }
        document.set_info(info);

        let mut cover = self.blank_page();
        self.draw_cover(&mut cover, content);
        document.add_page(cover);

        let mut introduction = self.blank_page();
        self.draw_introduction(&mut introduction, content);
        document.add_page(introduction);

        for title in DAILY_SECTIONS {
            let mut section = self.blank_page();
            self.draw_daily_section(&mut section, title);
            document.add_page(section);
        }

        let mut reflection = self.blank_page();
        self.draw_reflection(&mut reflection);
        document.add_page(reflection);

        document
    }

    fn blank_page(&self) -> Page {
        let layout = &self.config.layout;
        Page::new(layout.page_size, Some(Margins::all(layout.margin)))
    }

    /// Background, title band, the centred title, subtitle and brand footer
    pub fn draw_cover<C: Canvas>(&self, canvas: &mut C, content: &NormalizedContent) {
        let layout = &self.config.layout;
        let cover = &layout.cover;
        let palette = &self.config.palette;

        canvas.draw_rectangle(
            Rect::from_origin(Pt(0.0), Pt(0.0), layout.width(), layout.height()),
            palette.beige,
        );
        canvas.draw_rectangle(
            Rect::from_origin(
                Pt(0.0),
                layout.height() - cover.band_height,
                layout.width(),
                cover.band_height,
            ),
            palette.pink,
        );

        let regular = self.fonts.face(FontRole::Regular);
        let lines = wrap_text(
            &content.title,
            layout.content_width(),
            cover.title_size,
            regular,
        );
        let mut cursor = Cursor::at(layout.height() - cover.title_top);
        let mut omitted = 0;
        for line in lines {
            if !cursor.is_above(cover.title_floor) {
                omitted += 1;
                continue;
            }
            let width = regular.width_of(&line, cover.title_size);
            canvas.draw_text(self.text(
                line,
                FontRole::Regular,
                cover.title_size,
                ((layout.width() - width) / 2.0, cursor.y()),
                palette.text,
            ));
            cursor.advance(cover.title_size + cover.title_leading);
        }
        if omitted > 0 {
            log::warn!("cover title too long, left out {omitted} lines");
        }

        canvas.draw_text(self.text(
            COVER_SUBTITLE,
            FontRole::Regular,
            cover.subtitle_size,
            (layout.margin, cursor.y() - cover.subtitle_gap),
            palette.dark_pink,
        ));

        canvas.draw_rectangle(
            Rect::from_origin(
                layout.margin,
                cover.divider_y,
                layout.content_width(),
                cover.divider_height,
            ),
            palette.pink,
        );
        canvas.draw_text(self.text(
            BRAND,
            FontRole::Regular,
            cover.footer_size,
            (layout.margin, cover.footer_y),
            palette.light_text,
        ));
    }

    /// Welcome heading, the product description and the bulleted benefits
    pub fn draw_introduction<C: Canvas>(&self, canvas: &mut C, content: &NormalizedContent) {
        let layout = &self.config.layout;
        let intro = &layout.introduction;
        let palette = &self.config.palette;

        let mut cursor = Cursor::at(layout.height() - intro.heading_top);
        canvas.draw_text(self.text(
            WELCOME_HEADING,
            FontRole::Bold,
            intro.heading_size,
            (layout.margin, cursor.y()),
            palette.text,
        ));
        cursor.advance(intro.heading_gap);

        let mut omitted = self.paragraph(
            canvas,
            &mut cursor,
            &collapse_whitespace(&content.description),
            layout.margin,
            layout.content_width(),
            intro.description_size,
            intro.description_leading,
        );

        cursor.advance(intro.section_gap);
        if cursor.is_above(layout.margin) {
            canvas.draw_text(self.text(
                BENEFITS_HEADING,
                FontRole::Bold,
                intro.benefits_heading_size,
                (layout.margin, cursor.y()),
                palette.text,
            ));
        } else {
            omitted += 1;
        }
        cursor.advance(intro.benefits_heading_gap);

        for benefit in content.benefits.iter() {
            if cursor.is_above(layout.margin) {
                let offset = (intro.benefit_size * 0.35) - (intro.bullet_size / 2.0);
                canvas.draw_rectangle(
                    Rect::from_origin(
                        layout.margin,
                        cursor.y() + offset,
                        intro.bullet_size,
                        intro.bullet_size,
                    ),
                    palette.dark_pink,
                );
            }
            omitted += self.paragraph(
                canvas,
                &mut cursor,
                &collapse_whitespace(benefit),
                layout.margin + intro.benefit_indent,
                layout.content_width() - intro.benefit_indent,
                intro.benefit_size,
                intro.benefit_leading,
            );
            cursor.advance(intro.benefit_gap);
        }

        if omitted > 0 {
            log::warn!("introduction doesn't fit on its page, left out {omitted} lines");
        }
    }

    /// A banner followed by a journaling block per weekday, for as many days as
    /// fit. Returns the number of days placed.
    pub fn draw_daily_section<C: Canvas>(&self, canvas: &mut C, title: &str) -> usize {
        let layout = &self.config.layout;
        let daily = &layout.daily;
        let palette = &self.config.palette;

        let banner = Rect::from_origin(
            layout.margin,
            layout.height() - layout.margin - daily.banner_height,
            layout.content_width(),
            daily.banner_height,
        );
        canvas.draw_rectangle(banner, palette.pink);
        let ascent = self.fonts.face(FontRole::Bold).ascent(daily.banner_title_size);
        canvas.draw_text(self.text(
            title,
            FontRole::Bold,
            daily.banner_title_size,
            (
                banner.x1 + daily.banner_padding,
                banner.y1 + (daily.banner_height - ascent) / 2.0,
            ),
            palette.text,
        ));

        let mut cursor = Cursor::at(layout.height() - daily.days_top);
        let mut placed = 0;
        for day in DAYS {
            if !cursor.is_above(daily.day_threshold) {
                break;
            }

            canvas.draw_text(self.text(
                day,
                FontRole::Bold,
                daily.day_name_size,
                (layout.margin, cursor.y()),
                palette.text,
            ));
            cursor.advance(daily.day_name_gap);

            canvas.draw_text(self.text(
                DAY_LABEL,
                FontRole::Italic,
                daily.label_size,
                (layout.margin, cursor.y()),
                palette.light_text,
            ));
            cursor.advance(daily.label_gap);

            for _ in 0..daily.lines_per_day {
                self.ruled_line(canvas, cursor.y(), daily.line_thickness);
                cursor.advance(daily.line_gap);
            }
            cursor.advance(daily.day_gap);
            placed += 1;
        }

        if placed < DAYS.len() {
            log::debug!("{title:?} has room for {placed} of {} days", DAYS.len());
        }
        placed
    }

    /// The closing page: fixed prompts, each with room to write, and a sign-off
    pub fn draw_reflection<C: Canvas>(&self, canvas: &mut C) {
        let layout = &self.config.layout;
        let reflection = &layout.reflection;
        let palette = &self.config.palette;

        let mut cursor = Cursor::at(layout.height() - reflection.heading_top);
        canvas.draw_text(self.text(
            REFLECTION_HEADING,
            FontRole::Bold,
            reflection.heading_size,
            (layout.margin, cursor.y()),
            palette.text,
        ));
        cursor.advance(reflection.heading_gap);

        let mut omitted = 0;
        for prompt in REFLECTION_PROMPTS {
            omitted += self.paragraph(
                canvas,
                &mut cursor,
                prompt,
                layout.margin,
                layout.content_width(),
                reflection.prompt_size,
                reflection.prompt_leading,
            );
            for _ in 0..reflection.lines_per_prompt {
                if cursor.is_above(layout.margin) {
                    self.ruled_line(canvas, cursor.y(), reflection.line_thickness);
                } else {
                    omitted += 1;
                }
                cursor.advance(reflection.line_gap);
            }
            cursor.advance(reflection.prompt_gap);
        }
        if omitted > 0 {
            log::warn!("reflection prompts don't fit on their page, left out {omitted} lines");
        }

        canvas.draw_rectangle(
            Rect::from_origin(
                layout.margin,
                reflection.divider_y,
                layout.content_width(),
                reflection.divider_height,
            ),
            palette.pink,
        );
        canvas.draw_text(self.text(
            CLOSING_LINE,
            FontRole::Italic,
            reflection.closing_size,
            (layout.margin, reflection.closing_y),
            palette.light_text,
        ));
    }

    /// Wraps `text` and draws it line by line from the cursor down. Lines whose
    /// baseline would fall below the bottom margin are skipped; returns how many.
    #[allow(clippy::too_many_arguments)]
    fn paragraph<C: Canvas>(
        &self,
        canvas: &mut C,
        cursor: &mut Cursor,
        text: &str,
        x: Pt,
        max_width: Pt,
        size: Pt,
        leading: Pt,
    ) -> usize {
        let floor = self.config.layout.margin;
        let regular = self.fonts.face(FontRole::Regular);
        let mut omitted = 0;
        for line in wrap_text(text, max_width, size, regular) {
            if !cursor.is_above(floor) {
                omitted += 1;
                continue;
            }
            canvas.draw_text(self.text(
                line,
                FontRole::Regular,
                size,
                (x, cursor.y()),
                self.config.palette.text,
            ));
            cursor.advance(leading);
        }
        omitted
    }

    fn ruled_line<C: Canvas>(&self, canvas: &mut C, y: Pt, thickness: Pt) {
        let layout = &self.config.layout;
        canvas.draw_line(
            (layout.margin, y),
            (layout.margin + layout.content_width(), y),
            thickness,
            self.config.palette.pink,
        );
    }

    fn text<S: Into<String>>(
        &self,
        text: S,
        role: FontRole,
        size: Pt,
        origin: (Pt, Pt),
        colour: Colour,
    ) -> TextBlock {
        TextBlock {
            text: text.into(),
            role,
            size,
            origin,
            colour,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::is_encodable;
    use crate::page::PageContents;

    fn build(product: &ProductData, config: &WorkbookConfig) -> Document {
        let fonts = FontResource::standard();
        let content = NormalizedContent::from(product);
        WorkbookBuilder::new(&fonts, config).build(&content)
    }

    fn texts(page: &Page) -> Vec<&str> {
        page.text_blocks().map(|block| block.text.as_str()).collect()
    }

    fn day_count(page: &Page) -> usize {
        page.text_blocks()
            .filter(|block| DAYS.contains(&block.text.as_str()))
            .count()
    }

    fn busy_product() -> ProductData {
        ProductData {
            title: Some(lipsum::lipsum_title()),
            description: Some(lipsum::lipsum(400)),
            benefits: Some((0..30).map(|_| Some(lipsum::lipsum(25))).collect()),
            price_label: Some("$19".into()),
            social_caption: Some("Grow with us".into()),
        }
    }

    #[test]
    fn always_five_pages() {
        let config = WorkbookConfig::default();
        for product in [ProductData::default(), busy_product()] {
            let doc = build(&product, &config);
            assert_eq!(doc.pages.len(), 5);
            assert!(texts(&doc.pages[1]).contains(&WELCOME_HEADING));
            assert!(texts(&doc.pages[2]).contains(&DAILY_SECTIONS[0]));
            assert!(texts(&doc.pages[3]).contains(&DAILY_SECTIONS[1]));
            assert!(texts(&doc.pages[4]).contains(&REFLECTION_HEADING));
        }
    }

    #[test]
    fn missing_title_is_untitled() {
        let doc = build(&ProductData::default(), &WorkbookConfig::default());
        let cover = texts(&doc.pages[0]);
        assert_eq!(cover, vec!["Untitled Product", COVER_SUBTITLE, BRAND]);
        assert_eq!(
            doc.info.as_ref().and_then(|info| info.title.as_deref()),
            Some("Untitled Product")
        );
    }

    #[test]
    fn cover_title_lines_are_centred() {
        let config = WorkbookConfig::default();
        let product = ProductData {
            title: Some("The Gentle Art of Becoming Who You Already Are".into()),
            ..Default::default()
        };
        let doc = build(&product, &config);
        let fonts = FontResource::standard();
        let title_size = config.layout.cover.title_size;
        let title_lines: Vec<&TextBlock> = doc.pages[0]
            .text_blocks()
            .filter(|block| block.size == title_size)
            .collect();
        assert!(title_lines.len() > 1);
        for block in title_lines.iter() {
            let width = fonts.width_of(&block.text, title_size, FontRole::Regular);
            let left = *block.origin.0;
            let right = *config.layout.width() - (left + *width);
            assert!((left - right).abs() < 1e-2, "{:?} is off centre", block.text);
        }
        assert!((*title_lines[0].origin.1 - 641.89).abs() < 1e-3);
        assert!((*title_lines[0].origin.1 - *title_lines[1].origin.1 - 42.0).abs() < 1e-3);
    }

    #[test]
    fn long_titles_stop_at_the_floor() {
        let config = WorkbookConfig::default();
        let product = ProductData {
            title: Some(lipsum::lipsum(300)),
            ..Default::default()
        };
        let doc = build(&product, &config);
        let cover = &doc.pages[0];
        for block in cover.text_blocks() {
            if block.size == config.layout.cover.title_size {
                assert!(block.origin.1 >= config.layout.cover.title_floor);
            }
        }
        let subtitle = cover
            .text_blocks()
            .find(|block| block.text == COVER_SUBTITLE)
            .expect("subtitle is always drawn");
        assert!(subtitle.origin.1 > config.layout.cover.divider_y);
    }

    #[test]
    fn default_daily_sections_fit_five_days() {
        let doc = build(&ProductData::default(), &WorkbookConfig::default());
        for page in &doc.pages[2..4] {
            assert_eq!(day_count(page), 5);
            assert!(!texts(page).contains(&"Saturday"));
            assert_eq!(page.lines().count(), 5 * 2);
            assert_eq!(
                page.text_blocks().filter(|block| block.text == DAY_LABEL).count(),
                5
            );
        }
    }

    #[test]
    fn tighter_days_fit_the_whole_week() {
        let mut config = WorkbookConfig::default();
        config.layout.daily.line_gap = Pt(10.0);
        config.layout.daily.day_gap = Pt(0.0);
        let fonts = FontResource::standard();
        let builder = WorkbookBuilder::new(&fonts, &config);
        let mut page = builder.blank_page();
        assert_eq!(builder.draw_daily_section(&mut page, DAILY_SECTIONS[0]), 7);
        assert_eq!(day_count(&page), 7);
    }

    #[test]
    fn placed_days_are_kept_when_the_rest_are_dropped() {
        let mut config = WorkbookConfig::default();
        config.layout.daily.day_gap = Pt(200.0);
        let fonts = FontResource::standard();
        let builder = WorkbookBuilder::new(&fonts, &config);
        let mut page = builder.blank_page();
        let placed = builder.draw_daily_section(&mut page, DAILY_SECTIONS[1]);
        assert_eq!(placed, 2);
        assert_eq!(
            page.text_blocks()
                .filter(|block| DAYS.contains(&block.text.as_str()))
                .map(|block| block.text.as_str())
                .collect::<Vec<_>>(),
            vec!["Monday", "Tuesday"]
        );
    }

    #[test]
    fn introduction_never_crosses_the_bottom_margin() {
        let config = WorkbookConfig::default();
        let doc = build(&busy_product(), &config);
        let intro = &doc.pages[1];
        assert!(intro.text_blocks().count() > 10);
        for block in intro.text_blocks() {
            assert!(block.origin.1 >= config.layout.margin, "{:?}", block.text);
        }
        for rect in intro.rectangles() {
            assert!(rect.rect.y1 >= config.layout.margin - Pt(1.0));
        }
    }

    #[test]
    fn one_bullet_per_benefit() {
        let product = ProductData {
            description: Some("Fourteen days of small steps.\n\nOne page at a time.".into()),
            benefits: Some(vec![
                Some("Clarity on what matters".into()),
                None,
                Some("A steadier routine".into()),
            ]),
            ..Default::default()
        };
        let config = WorkbookConfig::default();
        let doc = build(&product, &config);
        let intro = &doc.pages[1];
        assert_eq!(intro.rectangles().count(), 2);
        assert!(texts(intro).contains(&"Fourteen days of small steps. One page at a time."));

        let indent = config.layout.margin + config.layout.introduction.benefit_indent;
        let benefit_text: Vec<&str> = intro
            .text_blocks()
            .filter(|block| block.origin.0 == indent)
            .map(|block| block.text.as_str())
            .collect();
        assert_eq!(benefit_text, vec!["Clarity on what matters", "A steadier routine"]);
    }

    #[test]
    fn reflection_page_is_fixed() {
        let config = WorkbookConfig::default();
        let a = build(&ProductData::default(), &config);
        let b = build(&busy_product(), &config);
        assert_eq!(a.pages[4], b.pages[4]);

        let page = &a.pages[4];
        for prompt in REFLECTION_PROMPTS {
            assert!(texts(page).contains(&prompt));
        }
        assert_eq!(page.lines().count(), 4 * 4);
        assert!(texts(page).contains(&CLOSING_LINE));
        assert!(page
            .text_blocks()
            .all(|block| block.origin.1 >= config.layout.margin
                || block.text == CLOSING_LINE));
    }

    #[test]
    fn everything_drawn_is_encodable() {
        let product = ProductData {
            title: Some("Caf\u{e9} \u{2728} Journal\u{2014}Vol.\u{a0}2".into()),
            description: Some("\u{201c}Slow\u{201d} mornings\u{2026}\r\n\ttogether".into()),
            benefits: Some(vec![Some("\u{2022} \u{1f338} Rest".into())]),
            ..Default::default()
        };
        let doc = build(&product, &WorkbookConfig::default());
        for page in doc.pages.iter() {
            for content in page.contents.iter() {
                if let PageContents::Text(block) = content {
                    assert!(!block.text.is_empty());
                    assert!(
                        block.text.chars().all(|ch| is_encodable(ch) && !ch.is_control()),
                        "{:?}",
                        block.text
                    );
                }
            }
        }
    }

    #[test]
    fn caption_becomes_the_subject() {
        let doc = build(&busy_product(), &WorkbookConfig::default());
        let info = doc.info.expect("info is always set");
        assert_eq!(info.subject.as_deref(), Some("Grow with us"));

        let doc = build(&ProductData::default(), &WorkbookConfig::default());
        assert_eq!(doc.info.and_then(|info| info.subject), None);
    }

    #[test]
    fn output_is_deterministic() {
        let fonts = FontResource::standard();
        let product = busy_product();
        let a = generate_workbook(&product, &fonts).expect("generates");
        let b = generate_workbook(&product, &fonts).expect("generates");
        assert_eq!(a, b);
    }

    #[test]
    fn palette_reaches_the_page() {
        let mut config = WorkbookConfig::default();
        config.palette.beige = Colour::new_grey(0.9);
        let doc = build(&ProductData::default(), &config);
        assert_eq!(
            doc.pages[0].rectangles().next().map(|rect| rect.colour),
            Some(Colour::new_grey(0.9))
        );
    }
}
