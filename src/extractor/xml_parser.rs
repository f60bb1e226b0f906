use super::schema::records_to_dataframe;
use super::Extracted;
use crate::constants::{XML_FUEL_TAG, XML_MODEL_TAG, XML_PRICE_TAG, XML_YEAR_TAG};
use crate::errors::ExtractError;
use crate::models::CarRecord;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::fs;
use std::io::Cursor;
use std::path::Path;

// Nesting levels: the root element is 1, entries 2, entry fields 3.
const ENTRY_DEPTH: usize = 1;
const FIELD_DEPTH: usize = 2;
const FIELD_TEXT_DEPTH: usize = 3;

/// Represents the current field being parsed within an entry
#[derive(Clone, Copy)]
enum EntryField {
    Model,
    Year,
    Price,
    Fuel,
}

impl EntryField {
    fn from_tag(name: &[u8]) -> Option<Self> {
        match name {
            XML_MODEL_TAG => Some(Self::Model),
            XML_YEAR_TAG => Some(Self::Year),
            XML_PRICE_TAG => Some(Self::Price),
            XML_FUEL_TAG => Some(Self::Fuel),
            _ => None,
        }
    }
}

/// Collects the raw text of one entry's fields.
///
/// A field is `Some` as soon as its element is seen, even when empty. Only the first
/// occurrence of each field is kept.
struct EntryBuilder {
    model: Option<String>,
    year: Option<String>,
    price: Option<String>,
    fuel: Option<String>,
    current_field: Option<EntryField>,
}

impl EntryBuilder {
    fn new() -> Self {
        Self {
            model: None,
            year: None,
            price: None,
            fuel: None,
            current_field: None,
        }
    }

    fn reset(&mut self) {
        self.model = None;
        self.year = None;
        self.price = None;
        self.fuel = None;
        self.current_field = None;
    }

    fn slot(&mut self, field: EntryField) -> &mut Option<String> {
        match field {
            EntryField::Model => &mut self.model,
            EntryField::Year => &mut self.year,
            EntryField::Price => &mut self.price,
            EntryField::Fuel => &mut self.fuel,
        }
    }

    fn start_field(&mut self, name: &[u8]) {
        self.current_field = None;
        if let Some(field) = EntryField::from_tag(name) {
            let slot = self.slot(field);
            if slot.is_none() {
                *slot = Some(String::new());
                self.current_field = Some(field);
            }
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(field) = self.current_field {
            if let Some(value) = self.slot(field) {
                value.push_str(text);
            }
        }
    }

    fn clear_current_field(&mut self) {
        self.current_field = None;
    }

    /// Returns `None` when a field is missing, otherwise the converted record or the
    /// conversion failure.
    fn build(&mut self, path: &Path, entry_no: usize) -> Option<Result<CarRecord, ExtractError>> {
        let (model, year, price, fuel) = match (
            self.model.take(),
            self.year.take(),
            self.price.take(),
            self.fuel.take(),
        ) {
            (Some(model), Some(year), Some(price), Some(fuel)) => (model, year, price, fuel),
            _ => return None,
        };

        let year = year.trim();
        let year_of_manufacture = match year.parse::<i64>() {
            Ok(value) => value,
            Err(e) => {
                return Some(Err(ExtractError::invalid_entry(
                    path,
                    format!("entry {entry_no}: invalid year_of_manufacture '{year}': {e}"),
                )))
            }
        };

        let price = price.trim();
        let price = match price.parse::<f64>() {
            Ok(value) => value,
            Err(e) => {
                return Some(Err(ExtractError::invalid_entry(
                    path,
                    format!("entry {entry_no}: invalid price '{price}': {e}"),
                )))
            }
        };

        Some(Ok(CarRecord {
            car_model: non_empty(model),
            year_of_manufacture,
            price,
            fuel: non_empty(fuel),
        }))
    }
}

/// Text fields keep their content as written; only an element with no text is null.
fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Records parsed from one XML document plus the entries that failed conversion.
#[derive(Debug, Default)]
pub struct XmlRecords {
    pub records: Vec<CarRecord>,
    pub rejected: Vec<ExtractError>,
}

/// Parses XML content provided as bytes.
///
/// Every child of the root element is an entry. Entries missing any of the four
/// fields are dropped silently; entries whose year or price do not convert are
/// returned in `rejected`. A document that is not well-formed fails as a whole.
pub fn parse_xml_bytes(content: &[u8], path: &Path) -> Result<XmlRecords, ExtractError> {
    let mut reader = Reader::from_reader(Cursor::new(content));
    let mut buf = Vec::with_capacity(8192);
    let mut result = XmlRecords::default();

    let mut depth = 0usize;
    let mut root_seen = false;
    let mut root_closed = false;
    let mut entry_no = 0usize;
    let mut builder = EntryBuilder::new();

    let malformed = |reader: &Reader<Cursor<&[u8]>>, detail: String| {
        ExtractError::unreadable(
            path,
            format!(
                "Malformed XML at byte {}: {detail}",
                reader.buffer_position()
            ),
        )
    };

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| malformed(&reader, e.to_string()))?;

        match event {
            Event::Start(e) => {
                match depth {
                    0 if root_closed => {
                        return Err(malformed(&reader, "multiple root elements".into()))
                    }
                    0 => root_seen = true,
                    ENTRY_DEPTH => {
                        entry_no += 1;
                        builder.reset();
                    }
                    FIELD_DEPTH => builder.start_field(e.name().as_ref()),
                    _ => {}
                }
                depth += 1;
            }
            Event::Empty(e) => match depth {
                0 if root_closed => {
                    return Err(malformed(&reader, "multiple root elements".into()))
                }
                0 => {
                    root_seen = true;
                    root_closed = true;
                }
                // An empty entry has no fields, so it is skipped like any incomplete one.
                ENTRY_DEPTH => entry_no += 1,
                FIELD_DEPTH => {
                    builder.start_field(e.name().as_ref());
                    builder.clear_current_field();
                }
                _ => {}
            },
            Event::End(_) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| malformed(&reader, "unexpected closing tag".into()))?;
                match depth {
                    0 => root_closed = true,
                    ENTRY_DEPTH => {
                        if let Some(built) = builder.build(path, entry_no) {
                            match built {
                                Ok(record) => result.records.push(record),
                                Err(err) => result.rejected.push(err),
                            }
                        }
                        builder.reset();
                    }
                    FIELD_DEPTH => builder.clear_current_field(),
                    _ => {}
                }
            }
            Event::Text(e) => {
                let txt = e
                    .decode()
                    .map_err(|e| malformed(&reader, format!("Failed to decode XML text: {e}")))?;
                if depth == FIELD_TEXT_DEPTH {
                    builder.push_text(&txt);
                } else if depth == 0 && !txt.trim().is_empty() {
                    return Err(malformed(&reader, "text outside the root element".into()));
                }
            }
            Event::CData(e) if depth == FIELD_TEXT_DEPTH => {
                builder.push_text(&String::from_utf8_lossy(&e));
            }
            Event::GeneralRef(e) => {
                let resolved = match e
                    .resolve_char_ref()
                    .map_err(|err| malformed(&reader, err.to_string()))?
                {
                    Some(ch) => ch.to_string(),
                    None => {
                        let name = String::from_utf8_lossy(&e);
                        resolve_predefined_entity(&name)
                            .ok_or_else(|| {
                                malformed(&reader, format!("undefined entity '&{name};'"))
                            })?
                            .to_string()
                    }
                };
                if depth == FIELD_TEXT_DEPTH {
                    builder.push_text(&resolved);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !root_seen {
        return Err(malformed(&reader, "no root element found".into()));
    }
    if depth != 0 {
        return Err(malformed(&reader, "unclosed element at end of file".into()));
    }

    Ok(result)
}

/// Reads an XML file from disk and builds the canonical table from its entries.
pub fn read_xml(path: &Path) -> Result<Extracted, ExtractError> {
    let content = fs::read(path)
        .map_err(|e| ExtractError::unreadable(path, format!("Failed to read XML file: {e}")))?;
    let parsed = parse_xml_bytes(&content, path)?;

    // The table is built once, after every entry has been scanned.
    let table = records_to_dataframe(parsed.records)
        .map_err(|e| ExtractError::unreadable(path, e.to_string()))?;

    Ok(Extracted {
        table,
        rejected: parsed.rejected,
    })
}
