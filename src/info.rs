use crate::refs::{ObjectReferences, RefType};
use chrono::{DateTime, Datelike, FixedOffset, Timelike};
use pdf_writer::{Date as PDate, Pdf, TextStr};

/// Document metadata written to the PDF's information dictionary
#[derive(Default, Debug, Clone)]
pub struct Info {
    /// The title of the document
    pub title: Option<String>,
    /// The subject of the document
    pub subject: Option<String>,
    /// When the document was created. Left unset, the output doesn't depend on the
    /// clock and the same input always produces the same bytes.
    pub creation_date: Option<DateTime<FixedOffset>>,
}

impl Info {
    /// Create a new info block, with all metadata set to [None]
    pub fn new() -> Info {
        Info::default()
    }

    /// Set the title of the info block, modifying `self`
    pub fn title<S: ToString>(&mut self, title: S) -> &mut Self {
        self.title = Some(title.to_string());
        self
    }

    /// Set the subject of the info block, modifying `self`
    pub fn subject<S: ToString>(&mut self, subject: S) -> &mut Self {
        self.subject = Some(subject.to_string());
        self
    }

    /// Set the creation date of the info block, modifying `self`
    pub fn creation_date(&mut self, date: DateTime<FixedOffset>) -> &mut Self {
        self.creation_date = Some(date);
        self
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) {
        let id = refs.gen(RefType::Info);
        let mut info = writer.document_info(id);

        if let Some(title) = &self.title {
            info.title(TextStr(title.as_str()));
        }
        if let Some(subject) = &self.subject {
            info.subject(TextStr(subject.as_str()));
        }
        info.creator(TextStr(concat!(
            env!("CARGO_PKG_NAME"),
            " v",
            env!("CARGO_PKG_VERSION")
        )));

        if let Some(date) = &self.creation_date {
            info.creation_date(pdf_date(date));
        }
    }
}

fn pdf_date(date: &DateTime<FixedOffset>) -> PDate {
    let offset = date.offset().local_minus_utc();
    let offset_hours = offset / (60 * 60);
    let offset_minutes = ((offset - (offset_hours * (60 * 60))) / 60).abs();
    PDate::new(date.year() as u16)
        .month(date.month() as u8)
        .day(date.day() as u8)
        .hour(date.hour() as u8)
        .minute(date.minute() as u8)
        .second(date.second() as u8)
        .utc_offset_hour(offset_hours as i8)
        .utc_offset_minute(offset_minutes as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let mut info = Info::new();
        info.title("Bloom").subject("Two weeks of growth");
        assert_eq!(info.title.as_deref(), Some("Bloom"));
        assert_eq!(info.subject.as_deref(), Some("Two weeks of growth"));
        assert!(info.creation_date.is_none());
    }

    #[test]
    fn dates_are_only_written_when_set() {
        let render = |info: &Info| {
            let mut refs = ObjectReferences::new();
            let mut writer = Pdf::new();
            info.write(&mut refs, &mut writer);
            String::from_utf8_lossy(&writer.finish()).into_owned()
        };

        let mut info = Info::new();
        info.title("Bloom");
        assert!(!render(&info).contains("/CreationDate"));

        let date = DateTime::parse_from_rfc3339("2024-03-05T09:30:00+05:30").expect("valid date");
        info.creation_date(date);
        let rendered = render(&info);
        assert!(rendered.contains("/CreationDate (D:20240305093000+05'30"), "{rendered}");
    }
}
