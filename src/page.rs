use crate::colour::Colour;
use crate::content::render_contents;
use crate::error::Result;
use crate::font::{FontResource, FontRole};
use crate::layout::Margins;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::*;
use pdf_writer::{Filter, Finish, Name, Pdf};

/// A single line of text placed at an absolute position. `origin` is the start
/// of the baseline.
#[derive(Clone, PartialEq, Debug)]
pub struct TextBlock {
    pub text: String,
    pub role: FontRole,
    pub size: Pt,
    pub origin: (Pt, Pt),
    pub colour: Colour,
}

/// A filled rectangle
#[derive(Clone, PartialEq, Debug)]
pub struct RectangleLayout {
    pub rect: Rect,
    pub colour: Colour,
}

/// A stroked straight line
#[derive(Clone, PartialEq, Debug)]
pub struct LineLayout {
    pub from: (Pt, Pt),
    pub to: (Pt, Pt),
    pub thickness: Pt,
    pub colour: Colour,
}

/// The drawing primitives a page is made of, in painting order
#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    Text(TextBlock),
    Rectangle(RectangleLayout),
    Line(LineLayout),
}

/// The drawing side of a page. Templates only ever talk to a page through this.
pub trait Canvas {
    fn draw_text(&mut self, block: TextBlock);
    fn draw_rectangle(&mut self, rect: Rect, colour: Colour);
    fn draw_line(&mut self, from: (Pt, Pt), to: (Pt, Pt), thickness: Pt, colour: Colour);
}

/// A page is a fixed-size canvas and the primitives drawn on it
#[derive(Clone, PartialEq, Debug)]
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Where content can live, i.e. within the margins
    pub content_box: Rect,
    /// The drawn primitives
    pub contents: Vec<PageContents>,
}

impl Page {
    /// Create a new page with the given size and margins. Without margins the
    /// content box covers the whole page.
    pub fn new(size: PageSize, margins: Option<Margins>) -> Page {
        let (width, height) = size;
        let margins = margins.unwrap_or_default();
        Page {
            media_box: Rect {
                x1: Pt(0.0),
                y1: Pt(0.0),
                x2: width,
                y2: height,
            },
            content_box: Rect {
                x1: margins.left,
                y1: margins.bottom,
                x2: width - margins.right,
                y2: height - margins.top,
            },
            contents: Vec::default(),
        }
    }

    /// All text placed on the page, in drawing order
    pub fn text_blocks(&self) -> impl Iterator<Item = &TextBlock> {
        self.contents.iter().filter_map(|c| match c {
            PageContents::Text(block) => Some(block),
            _ => None,
        })
    }

    /// All ruled and divider lines on the page, in drawing order
    pub fn lines(&self) -> impl Iterator<Item = &LineLayout> {
        self.contents.iter().filter_map(|c| match c {
            PageContents::Line(line) => Some(line),
            _ => None,
        })
    }

    /// All filled rectangles on the page, in drawing order
    pub fn rectangles(&self) -> impl Iterator<Item = &RectangleLayout> {
        self.contents.iter().filter_map(|c| match c {
            PageContents::Rectangle(rect) => Some(rect),
            _ => None,
        })
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &FontResource,
        writer: &mut Pdf,
    ) -> Result<()> {
        let rendered = render_contents(&self.contents, fonts)?;
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            rendered.as_slice(),
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );

        let id = refs.get_or_gen(RefType::Page(page_index));
        let page_tree_id = refs.get_or_gen(RefType::PageTree);
        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.art_box(self.content_box.into());
        page.parent(page_tree_id);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for role in FontRole::ALL {
            let index = role.index();
            resource_fonts.pair(
                Name(format!("F{index}").as_bytes()),
                refs.get_or_gen(RefType::Font(index)),
            );
        }
        resource_fonts.finish();
        resources.finish();

        page.contents(content_id);
        page.finish();

        writer
            .stream(content_id, compressed.as_slice())
            .filter(Filter::FlateDecode);

        Ok(())
    }
}

impl Canvas for Page {
    fn draw_text(&mut self, block: TextBlock) {
        if !block.text.is_empty() {
            self.contents.push(PageContents::Text(block));
        }
    }

    fn draw_rectangle(&mut self, rect: Rect, colour: Colour) {
        self.contents
            .push(PageContents::Rectangle(RectangleLayout { rect, colour }));
    }

    fn draw_line(&mut self, from: (Pt, Pt), to: (Pt, Pt), thickness: Pt, colour: Colour) {
        self.contents.push(PageContents::Line(LineLayout {
            from,
            to,
            thickness,
            colour,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::Palette;
    use crate::pagesize::WORKBOOK;

    #[test]
    fn content_box_honours_margins() {
        let page = Page::new(WORKBOOK, Some(Margins::all(Pt(60.0))));
        assert_eq!(page.content_box.x1, Pt(60.0));
        assert_eq!(page.content_box.y1, Pt(60.0));
        assert!((*page.content_box.width() - 475.28).abs() < 1e-3);
        assert_eq!(page.media_box.height(), Pt(841.89));
    }

    #[test]
    fn primitives_keep_drawing_order() {
        let palette = Palette::default();
        let mut page = Page::new(WORKBOOK, None);
        page.draw_rectangle(
            Rect::from_origin(Pt(0.0), Pt(0.0), Pt(10.0), Pt(10.0)),
            palette.beige,
        );
        page.draw_text(TextBlock {
            text: "Welcome".into(),
            role: FontRole::Bold,
            size: Pt(28.0),
            origin: (Pt(60.0), Pt(741.89)),
            colour: palette.text,
        });
        page.draw_line(
            (Pt(60.0), Pt(500.0)),
            (Pt(535.28), Pt(500.0)),
            Pt(0.5),
            palette.pink,
        );

        assert!(matches!(page.contents[0], PageContents::Rectangle(_)));
        assert!(matches!(page.contents[1], PageContents::Text(_)));
        assert!(matches!(page.contents[2], PageContents::Line(_)));
        assert_eq!(page.text_blocks().count(), 1);
        assert_eq!(page.lines().count(), 1);
        assert_eq!(page.rectangles().count(), 1);
    }

    #[test]
    fn empty_text_is_not_drawn() {
        let mut page = Page::new(WORKBOOK, None);
        page.draw_text(TextBlock {
            text: String::new(),
            role: FontRole::Regular,
            size: Pt(12.0),
            origin: (Pt(0.0), Pt(0.0)),
            colour: Colour::new_grey(0.0),
        });
        assert!(page.contents.is_empty());
    }
}
