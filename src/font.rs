use crate::{
    error::{ResourceError, Result, WorkbookError},
    normalize::is_encodable,
    refs::{ObjectReferences, RefType},
    Pt,
};
use owned_ttf_parser::{AsFaceRef, OwnedFace};
use pdf_writer::{
    types::{FontFlags, SystemInfo},
    Finish, Name, Pdf, Ref, Str,
};
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

/// The three faces every workbook is set in
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontRole {
    Regular,
    Bold,
    Italic,
}

impl FontRole {
    pub const ALL: [FontRole; 3] = [FontRole::Regular, FontRole::Bold, FontRole::Italic];

    /// Stable index of the role, used for resource names (`/F0`, `/F1`, `/F2`)
    pub fn index(self) -> usize {
        match self {
            FontRole::Regular => 0,
            FontRole::Bold => 1,
            FontRole::Italic => 2,
        }
    }
}

impl fmt::Display for FontRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FontRole::Regular => "regular",
            FontRole::Bold => "bold",
            FontRole::Italic => "italic",
        })
    }
}

/// Measurement-only view of a face. Wrapping and centring only ever need this,
/// never the drawing side of a page.
pub trait TextMeasure {
    /// Width of `text` set at `size`. Characters the face has no glyph for are ignored.
    fn width_of(&self, text: &str, size: Pt) -> Pt;
}

/// Adobe metrics for the standard Helvetica faces, in thousandths of an em, for
/// the characters U+0020..=U+007E under WinAnsiEncoding.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

/// One of the PDF standard 14 faces. These are never embedded; every conforming
/// reader ships them.
struct StandardFace {
    base_font: &'static str,
    widths: &'static [u16; 95],
}

impl StandardFace {
    const ASCENDER: f32 = 718.0;

    fn for_role(role: FontRole) -> StandardFace {
        match role {
            FontRole::Regular => StandardFace {
                base_font: "Helvetica",
                widths: &HELVETICA_WIDTHS,
            },
            FontRole::Bold => StandardFace {
                base_font: "Helvetica-Bold",
                widths: &HELVETICA_BOLD_WIDTHS,
            },
            FontRole::Italic => StandardFace {
                base_font: "Helvetica-Oblique",
                widths: &HELVETICA_WIDTHS,
            },
        }
    }

    fn width(&self, ch: char) -> Option<u16> {
        let code = u32::from(ch);
        (0x20..=0x7E)
            .contains(&code)
            .then(|| self.widths[(code - 0x20) as usize])
    }
}

enum Program {
    Standard(StandardFace),
    TrueType(OwnedFace),
}

/// A loaded font face. Standard faces use built-in metrics; TrueType / OpenType
/// faces are parsed once and embedded in their entirety in the generated PDF.
///
/// Faces are immutable once loaded, so they can be shared between any number of
/// concurrent generations behind an [Arc].
pub struct Font {
    role: FontRole,
    program: Program,
}

impl Font {
    /// The built-in Helvetica face for the given role
    pub fn standard(role: FontRole) -> Font {
        Font {
            role,
            program: Program::Standard(StandardFace::for_role(role)),
        }
    }

    /// Parse a font program from raw bytes. Fails if the program can't be parsed or
    /// lacks a glyph for any character normalization can produce.
    pub fn load(role: FontRole, bytes: Vec<u8>) -> std::result::Result<Font, ResourceError> {
        let face = OwnedFace::from_vec(bytes, 0)?;

        if let Some(ch) = (' '..='~').find(|&ch| face.as_face_ref().glyph_index(ch).is_none())
        {
            return Err(ResourceError::MissingGlyph(ch));
        }

        Ok(Font {
            role,
            program: Program::TrueType(face),
        })
    }

    pub fn role(&self) -> FontRole {
        self.role
    }

    /// Whether the font program is embedded in the output
    pub fn is_embedded(&self) -> bool {
        matches!(self.program, Program::TrueType(_))
    }

    /// Horizontal advance of a character in thousandths of an em
    fn advance(&self, ch: char) -> Option<f32> {
        match &self.program {
            Program::Standard(standard) => standard.width(ch).map(f32::from),
            Program::TrueType(face) => {
                let face = face.as_face_ref();
                let gid = face.glyph_index(ch)?;
                let scaling = 1000.0 / face.units_per_em() as f32;
                face.glyph_hor_advance(gid)
                    .map(|advance| advance as f32 * scaling)
            }
        }
    }

    /// Calculate the ascent (distance from the baseline to the top of the font) for the given font size
    pub fn ascent(&self, size: Pt) -> Pt {
        match &self.program {
            Program::Standard(_) => size * (StandardFace::ASCENDER / 1000.0),
            Program::TrueType(face) => {
                let face = face.as_face_ref();
                size * (face.ascender() as f32 / face.units_per_em() as f32)
            }
        }
    }

    /// Encode text as the bytes of a PDF string for this face: single WinAnsi bytes
    /// for standard faces, big-endian glyph ids for embedded ones. Returns the first
    /// character that can't be encoded as the error.
    pub(crate) fn encode(&self, text: &str) -> std::result::Result<Vec<u8>, char> {
        let mut bytes = Vec::with_capacity(text.len() * 2);
        for ch in text.chars() {
            match &self.program {
                Program::Standard(standard) => {
                    standard.width(ch).ok_or(ch)?;
                    bytes.push(ch as u8);
                }
                Program::TrueType(face) => {
                    if !is_encodable(ch) || ch.is_control() {
                        return Err(ch);
                    }
                    let gid = face.as_face_ref().glyph_index(ch).ok_or(ch)?;
                    bytes.extend_from_slice(&gid.0.to_be_bytes());
                }
            }
        }
        Ok(bytes)
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) {
        let font_index = self.role.index();
        let font_id = refs.gen(RefType::Font(font_index));

        match &self.program {
            Program::Standard(standard) => {
                let mut font = writer.type1_font(font_id);
                font.base_font(Name(standard.base_font.as_bytes()));
                font.encoding_predefined(Name(b"WinAnsiEncoding"));
            }
            Program::TrueType(face) => {
                let cid_font_id = self.write_cid(face, refs, font_index, writer);
                let to_unicode_id = self.write_to_unicode(face, refs, font_index, writer);

                let mut font = writer.type0_font(font_id);
                font.base_font(Name(format!("F{font_index}").as_bytes()));
                font.encoding_predefined(Name(b"Identity-H"));
                font.descendant_font(cid_font_id);
                font.to_unicode(to_unicode_id);
            }
        }
    }

    fn write_cid(
        &self,
        face: &OwnedFace,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let font_descriptor_id = self.write_descriptor(face, refs, font_index, writer);

        let id = refs.gen(RefType::CidFont(font_index));

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(pdf_writer::types::CidFontType::Type2);
        cid_font.base_font(Name(format!("F{font_index}").as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(font_descriptor_id);

        let scaling = 1000.0 / face.as_face_ref().units_per_em() as f32;
        let mut id_widths: Vec<(u16, f32)> = glyph_ids(face)
            .into_keys()
            .filter_map(|gid| {
                face.as_face_ref()
                    .glyph_hor_advance(owned_ttf_parser::GlyphId(gid))
                    .map(|advance| (gid, advance as f32 * scaling))
            })
            .collect();
        id_widths.sort_by_key(|&(gid, _)| gid);

        // the most popular width becomes the default
        let mut width_counts: HashMap<u32, usize> = HashMap::new();
        for (_, width) in id_widths.iter() {
            *width_counts.entry(width.round() as u32).or_insert(0) += 1;
        }
        let default_width = width_counts
            .iter()
            .max_by_key(|&(width, count)| (*count, *width))
            .map(|(&width, _)| width as f32)
            .unwrap_or(1000.0);

        let mut widths = cid_font.widths();
        let mut run: Option<(u16, Vec<f32>)> = None;
        for (gid, width) in id_widths {
            match run.as_mut() {
                Some((start, run_widths)) if *start as usize + run_widths.len() == gid as usize => {
                    run_widths.push(width);
                }
                _ => {
                    if let Some((start, run_widths)) = run.take() {
                        widths.consecutive(start, run_widths);
                    }
                    run = Some((gid, vec![width]));
                }
            }
        }
        if let Some((start, run_widths)) = run {
            widths.consecutive(start, run_widths);
        }
        widths.finish();

        cid_font.default_width(default_width);
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));

        id
    }

    fn write_descriptor(
        &self,
        face: &OwnedFace,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let font_data_id = refs.gen(RefType::FontData(font_index));
        writer
            .stream(font_data_id, face.as_slice())
            .pair(Name(b"Length1"), face.as_slice().len() as i32);

        let face_ref = face.as_face_ref();
        let scaling = 1000.0 / face_ref.units_per_em() as f32;
        let advances: Vec<u16> = glyph_ids(face)
            .into_keys()
            .filter_map(|gid| face_ref.glyph_hor_advance(owned_ttf_parser::GlyphId(gid)))
            .collect();
        let max_width = advances.iter().copied().max().unwrap_or_default() as f32 * scaling;
        let avg_width = if advances.is_empty() {
            0.0
        } else {
            advances.iter().map(|&w| w as f32).sum::<f32>() / advances.len() as f32 * scaling
        };
        let bbox = face_ref.global_bounding_box();

        let name = face_name(face, owned_ttf_parser::name_id::POST_SCRIPT_NAME)
            .unwrap_or_else(|| format!("F{font_index}"));
        let family =
            face_name(face, owned_ttf_parser::name_id::FAMILY).unwrap_or_else(|| name.clone());

        let id = refs.gen(RefType::FontDescriptor(font_index));
        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(name.as_bytes()));
        descriptor.family(Str(family.as_bytes()));
        descriptor.weight(face_ref.weight().to_number());

        let mut flags = FontFlags::NON_SYMBOLIC;
        if face_ref.is_monospaced() {
            flags.insert(FontFlags::FIXED_PITCH);
        }
        if face_ref.is_italic() || self.role == FontRole::Italic {
            flags.insert(FontFlags::ITALIC);
        }
        descriptor.flags(flags);

        descriptor.bbox(pdf_writer::Rect {
            x1: bbox.x_min as f32 * scaling,
            y1: bbox.y_min as f32 * scaling,
            x2: bbox.x_max as f32 * scaling,
            y2: bbox.y_max as f32 * scaling,
        });
        descriptor.italic_angle(face_ref.italic_angle());
        descriptor.ascent(face_ref.ascender() as f32 * scaling);
        descriptor.descent(face_ref.descender() as f32 * scaling);
        descriptor.leading(face_ref.line_gap() as f32 * scaling);
        let cap_height = face_ref
            .capital_height()
            .map(|h| h as f32 * scaling)
            .unwrap_or(1000.0);
        descriptor.cap_height(cap_height);
        descriptor.x_height(
            face_ref
                .x_height()
                .map(|h| h as f32 * scaling)
                .unwrap_or(cap_height),
        );
        descriptor.stem_v(stem_v(face_ref.weight().to_number()));
        descriptor.avg_width(avg_width);
        descriptor.max_width(max_width);
        descriptor.missing_width(max_width);
        descriptor.font_file2(font_data_id);
        descriptor.finish();

        id
    }

    fn write_to_unicode(
        &self,
        face: &OwnedFace,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::ToUnicode(font_index));

        let mut map = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo\n\
             << /Registry (Adobe)\n\
             /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n\
             <0000> <FFFF>\n\
             endcodespacerange\n",
        );

        let mut ids: Vec<(u16, char)> = glyph_ids(face).into_iter().collect();
        ids.sort_by_key(|&(id, _)| id);

        // bfchar blocks hold at most 100 entries
        for block in ids.chunks(100) {
            map.push_str(&format!("{} beginbfchar\n", block.len()));
            for (id, ch) in block {
                map.push_str(&format!("<{id:04x}> <{:04x}>\n", u32::from(*ch)));
            }
            map.push_str("endbfchar\n");
        }

        map.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            map.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        writer
            .stream(id, compressed.as_slice())
            .filter(pdf_writer::Filter::FlateDecode);

        id
    }
}

impl TextMeasure for Font {
    fn width_of(&self, text: &str, size: Pt) -> Pt {
        let thousandths: f32 = text.chars().filter_map(|ch| self.advance(ch)).sum();
        size * (thousandths / 1000.0)
    }
}

fn face_name(face: &OwnedFace, name_id: u16) -> Option<String> {
    face.as_face_ref()
        .names()
        .into_iter()
        .find(|name| name.name_id == name_id && name.is_unicode())
        .and_then(|name| name.to_string())
}

/// Estimated vertical stem width for an OS/2 weight class, from 10 at weight 50
/// rising linearly to 230 at weight 950
fn stem_v(weight: u16) -> f32 {
    10.0 + 220.0 * weight.saturating_sub(50) as f32 / 900.0
}

/// Glyph ids of the printable ASCII characters, the only ones a workbook ever shows
fn glyph_ids(face: &OwnedFace) -> HashMap<u16, char> {
    (' '..='~')
        .filter_map(|ch| {
            face.as_face_ref()
                .glyph_index(ch)
                .filter(|gid| gid.0 > 0)
                .map(|gid| (gid.0, ch))
        })
        .collect()
}

/// Where the three faces of a [FontResource] come from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FontSource {
    /// The built-in Helvetica family
    #[default]
    Standard,
    /// TrueType / OpenType programs on disk, embedded into every workbook
    TrueType {
        regular: PathBuf,
        bold: PathBuf,
        italic: PathBuf,
    },
}

/// The regular, bold and italic faces a workbook is set in. Cloning is cheap and
/// clones share the loaded faces.
#[derive(Clone)]
pub struct FontResource {
    regular: Arc<Font>,
    bold: Arc<Font>,
    italic: Arc<Font>,
}

impl FontResource {
    /// The built-in Helvetica family. Never fails.
    pub fn standard() -> FontResource {
        FontResource {
            regular: Arc::new(Font::standard(FontRole::Regular)),
            bold: Arc::new(Font::standard(FontRole::Bold)),
            italic: Arc::new(Font::standard(FontRole::Italic)),
        }
    }

    /// Parse three font programs. The first face that fails aborts the whole load.
    pub fn from_bytes(regular: Vec<u8>, bold: Vec<u8>, italic: Vec<u8>) -> Result<FontResource> {
        let parse = |role: FontRole, bytes: Vec<u8>| {
            Font::load(role, bytes)
                .map(Arc::new)
                .map_err(|source| WorkbookError::Resource { role, source })
        };
        Ok(FontResource {
            regular: parse(FontRole::Regular, regular)?,
            bold: parse(FontRole::Bold, bold)?,
            italic: parse(FontRole::Italic, italic)?,
        })
    }

    /// Load the faces described by `source` from disk
    pub fn load(source: &FontSource) -> Result<FontResource> {
        match source {
            FontSource::Standard => Ok(FontResource::standard()),
            FontSource::TrueType {
                regular,
                bold,
                italic,
            } => {
                log::debug!(
                    "loading font programs {}, {}, {}",
                    regular.display(),
                    bold.display(),
                    italic.display()
                );
                FontResource::from_bytes(
                    read_program(FontRole::Regular, regular)?,
                    read_program(FontRole::Bold, bold)?,
                    read_program(FontRole::Italic, italic)?,
                )
            }
        }
    }

    /// Load the faces described by `source` without blocking the executor while
    /// the programs are read
    #[cfg(feature = "async")]
    pub async fn load_async(source: &FontSource) -> Result<FontResource> {
        match source {
            FontSource::Standard => Ok(FontResource::standard()),
            FontSource::TrueType {
                regular,
                bold,
                italic,
            } => {
                async fn read(role: FontRole, path: &Path) -> Result<Vec<u8>> {
                    tokio::fs::read(path)
                        .await
                        .map_err(|source| read_error(role, path, source))
                }
                let (regular, bold, italic) = (
                    read(FontRole::Regular, regular).await?,
                    read(FontRole::Bold, bold).await?,
                    read(FontRole::Italic, italic).await?,
                );
                FontResource::from_bytes(regular, bold, italic)
            }
        }
    }

    pub fn face(&self, role: FontRole) -> &Font {
        match role {
            FontRole::Regular => &self.regular,
            FontRole::Bold => &self.bold,
            FontRole::Italic => &self.italic,
        }
    }

    /// Width of `text` at `size` in the face for `role`
    pub fn width_of(&self, text: &str, size: Pt, role: FontRole) -> Pt {
        self.face(role).width_of(text, size)
    }
}

fn read_program(role: FontRole, path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| read_error(role, path, source))
}

fn read_error(role: FontRole, path: &Path, source: std::io::Error) -> WorkbookError {
    WorkbookError::Resource {
        role,
        source: ResourceError::Read {
            path: path.to_path_buf(),
            source,
        },
    }
}
