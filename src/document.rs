use crate::{
    error::Result,
    font::{FontResource, FontRole},
    info::Info,
    page::Page,
    refs::{ObjectReferences, RefType},
};
use pdf_writer::{Finish, Pdf, Ref};
use std::io::Write;

/// A document is the main object that stores all the contents of the PDF
/// then renders it out with a call to [Document::write]
pub struct Document {
    pub info: Option<Info>,
    pub pages: Vec<Page>,
    pub fonts: FontResource,
}

impl Document {
    /// An empty document whose text is set in `fonts`
    pub fn new(fonts: FontResource) -> Document {
        Document {
            info: None,
            pages: Vec::default(),
            fonts,
        }
    }

    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Add a page to the end of the document, returning its 0-based index
    pub fn add_page(&mut self, page: Page) -> usize {
        self.pages.push(page);
        self.pages.len() - 1
    }

    /// Write the entire document to the writer. The document is rendered in memory
    /// first and only then written out, so nothing reaches `w` if rendering fails.
    pub fn write<W: Write>(&self, mut w: W) -> Result<()> {
        let bytes = self.render()?;
        w.write_all(bytes.as_slice())?;
        Ok(())
    }

    /// Render the entire document into a byte buffer
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.render()
    }

    fn render(&self) -> Result<Vec<u8>> {
        let mut refs = ObjectReferences::new();

        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = &self.info {
            info.write(&mut refs, &mut writer);
        }

        let page_refs: Vec<Ref> = (0..self.pages.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();

        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        for role in FontRole::ALL {
            self.fonts.face(role).write(&mut refs, &mut writer);
        }

        for (page_index, page) in self.pages.iter().enumerate() {
            page.write(&mut refs, page_index, &self.fonts, &mut writer)?;
        }

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        catalog.finish();

        Ok(writer.finish())
    }
}
