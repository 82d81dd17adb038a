//! Content stream rendering for pages.

use crate::colour::Colour;
use crate::error::{Result, WorkbookError};
use crate::font::FontResource;
use crate::page::{LineLayout, PageContents, RectangleLayout, TextBlock};
use std::io::Write;

/// Renders page contents to an (uncompressed) PDF content stream.
///
/// Each primitive is wrapped in its own `q`/`Q` pair so that colours and line
/// widths never leak from one primitive into the next.
#[allow(clippy::write_with_newline)]
pub(crate) fn render_contents(contents: &[PageContents], fonts: &FontResource) -> Result<Vec<u8>> {
    let mut content: Vec<u8> = Vec::default();

    for page_content in contents.iter() {
        match page_content {
            PageContents::Text(block) => render_text(&mut content, block, fonts)?,
            PageContents::Rectangle(RectangleLayout { rect, colour }) => {
                write!(&mut content, "q\n")?;
                write_fill_colour(&mut content, *colour)?;
                write!(
                    &mut content,
                    "{} {} {} {} re\nf\n",
                    *rect.x1,
                    *rect.y1,
                    *rect.width(),
                    *rect.height()
                )?;
                write!(&mut content, "Q\n")?;
            }
            PageContents::Line(LineLayout {
                from,
                to,
                thickness,
                colour,
            }) => {
                write!(&mut content, "q\n")?;
                write_stroke_colour(&mut content, *colour)?;
                write!(&mut content, "{} w\n", **thickness)?;
                write!(&mut content, "{} {} m\n", *from.0, *from.1)?;
                write!(&mut content, "{} {} l\n", *to.0, *to.1)?;
                write!(&mut content, "S\nQ\n")?;
            }
        }
    }

    Ok(content)
}

#[allow(clippy::write_with_newline)]
fn render_text(content: &mut Vec<u8>, block: &TextBlock, fonts: &FontResource) -> Result<()> {
    let encoded = fonts
        .face(block.role)
        .encode(&block.text)
        .map_err(|ch| WorkbookError::Encoding {
            ch,
            role: block.role,
        })?;

    write!(content, "q\n")?;
    write_fill_colour(content, block.colour)?;
    write!(content, "BT\n")?;
    write!(content, "/F{} {} Tf\n", block.role.index(), *block.size)?;
    write!(content, "{} {} Td\n", *block.origin.0, *block.origin.1)?;
    write!(content, "<")?;
    for byte in encoded {
        write!(content, "{byte:02x}")?;
    }
    write!(content, "> Tj\n")?;
    write!(content, "ET\n")?;
    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn write_fill_colour(content: &mut Vec<u8>, colour: Colour) -> std::io::Result<()> {
    match colour {
        Colour::RGB { r, g, b } => write!(content, "{r} {g} {b} rg\n"),
        Colour::Grey { g } => write!(content, "{g} g\n"),
    }
}

#[allow(clippy::write_with_newline)]
fn write_stroke_colour(content: &mut Vec<u8>, colour: Colour) -> std::io::Result<()> {
    match colour {
        Colour::RGB { r, g, b } => write!(content, "{r} {g} {b} RG\n"),
        Colour::Grey { g } => write!(content, "{g} G\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontRole;
    use crate::page::{Canvas, Page};
    use crate::pagesize::WORKBOOK;
    use crate::rect::Rect;
    use crate::units::Pt;

    fn render(page: &Page) -> String {
        let bytes = render_contents(&page.contents, &FontResource::standard()).expect("renders");
        String::from_utf8(bytes).expect("content streams are ascii")
    }

    #[test]
    fn text_is_hex_encoded_winansi() {
        let mut page = Page::new(WORKBOOK, None);
        page.draw_text(TextBlock {
            text: "Hi!".into(),
            role: FontRole::Italic,
            size: Pt(14.0),
            origin: (Pt(60.0), Pt(70.0)),
            colour: Colour::new_grey(0.5),
        });
        assert_eq!(
            render(&page),
            "q\n0.5 g\nBT\n/F2 14 Tf\n60 70 Td\n<486921> Tj\nET\nQ\n"
        );
    }

    #[test]
    fn shapes() {
        let mut page = Page::new(WORKBOOK, None);
        page.draw_rectangle(
            Rect::from_origin(Pt(0.0), Pt(691.0), Pt(595.0), Pt(150.0)),
            Colour::new_rgb(1.0, 0.5, 0.0),
        );
        page.draw_line(
            (Pt(60.0), Pt(400.0)),
            (Pt(535.0), Pt(400.0)),
            Pt(0.5),
            Colour::new_grey(0.0),
        );
        assert_eq!(
            render(&page),
            "q\n1 0.5 0 rg\n0 691 595 150 re\nf\nQ\n\
             q\n0 G\n0.5 w\n60 400 m\n535 400 l\nS\nQ\n"
        );
    }

    #[test]
    fn unencodable_text_is_an_encoding_error() {
        let mut page = Page::new(WORKBOOK, None);
        page.draw_text(TextBlock {
            text: "caf\u{e9}".into(),
            role: FontRole::Regular,
            size: Pt(12.0),
            origin: (Pt(0.0), Pt(0.0)),
            colour: Colour::new_grey(0.0),
        });
        let err = render_contents(&page.contents, &FontResource::standard()).unwrap_err();
        assert!(matches!(
            err,
            WorkbookError::Encoding {
                ch: '\u{e9}',
                role: FontRole::Regular
            }
        ));
    }
}
