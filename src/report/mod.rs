use crate::geo::ReferencePoints;
use crate::models::EnrichedListing;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, StringFormat};
use thiserror::Error;

/// File name the report is written to when the caller does not pick one
pub const DEFAULT_REPORT_FILENAME: &str = "Parramatta_Listings.pdf";

const PAGE_HEADING: &str = "Parramatta Property Listings";

// A4 in points
const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 48;
const PAGE_TOP: i64 = PAGE_HEIGHT - MARGIN;

const SECTION_GAP: i64 = 20;
const TITLE_LEADING: i64 = 16;
const BODY_LEADING: i64 = 13;
const RULE_LEADING: i64 = 16;

// Column widths in characters at the body and title sizes
const BODY_WRAP: usize = 95;
const TITLE_WRAP: usize = 72;

const REGULAR_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("PDF assembly failed: {0}")]
    Assembly(String),

    #[error("Failed to write report file: {0}")]
    Io(#[from] std::io::Error),
}

/// Render the enriched listings into a paginated A4 report.
///
/// One block per listing, in input order: bold title line, feature counts,
/// address, distances when geocoding succeeded, pros and cons when the rule
/// table produced any, the listing link, then a separator rule.
pub fn render_pdf(
    listings: &[EnrichedListing],
    points: &ReferencePoints,
) -> Result<Vec<u8>, ReportError> {
    let mut page = PageWriter::new();

    let x = (PAGE_WIDTH - PAGE_HEADING.len() as i64 * 7).max(MARGIN * 2) / 2;
    page.text_at(BOLD_FONT, 14, x, 24, PAGE_HEADING);
    page.text_at(
        REGULAR_FONT,
        8,
        MARGIN,
        14,
        &format!(
            "Distances measured to the station at {:.4}, {:.4} and the park at {:.4}, {:.4}",
            points.station.latitude,
            points.station.longitude,
            points.park.latitude,
            points.park.longitude,
        ),
    );

    for item in listings {
        page.gap(SECTION_GAP);

        let listing = &item.listing;
        page.paragraph(
            BOLD_FONT,
            11,
            TITLE_LEADING,
            TITLE_WRAP,
            &format!("{} - ${}", listing.title, listing.price),
        );
        page.paragraph(
            REGULAR_FONT,
            9,
            BODY_LEADING,
            BODY_WRAP,
            &format!(
                "{} bed, {} bath, {} car",
                listing.bedrooms, listing.bathrooms, listing.parking_spaces
            ),
        );
        page.paragraph(
            REGULAR_FONT,
            9,
            BODY_LEADING,
            BODY_WRAP,
            &format!("Address: {}", listing.address),
        );
        if let Some(d) = item.distances {
            page.paragraph(
                REGULAR_FONT,
                9,
                BODY_LEADING,
                BODY_WRAP,
                &format!(
                    "Distance: {:.2} km to station, {:.2} km to park",
                    d.to_station_km, d.to_park_km
                ),
            );
        }
        if !item.assessment.pros.is_empty() {
            page.paragraph(
                REGULAR_FONT,
                9,
                BODY_LEADING,
                BODY_WRAP,
                &format!("Pros: {}", item.assessment.pros.join(", ")),
            );
        }
        if !item.assessment.cons.is_empty() {
            page.paragraph(
                REGULAR_FONT,
                9,
                BODY_LEADING,
                BODY_WRAP,
                &format!("Cons: {}", item.assessment.cons.join(", ")),
            );
        }
        page.paragraph(
            REGULAR_FONT,
            9,
            BODY_LEADING,
            BODY_WRAP,
            &format!("Link: {}", listing.link),
        );
        page.rule();
    }

    build_document(page.into_pages())
}

/// Render and write the report in one step
pub fn write_report(
    listings: &[EnrichedListing],
    points: &ReferencePoints,
    path: &str,
) -> Result<(), ReportError> {
    let bytes = render_pdf(listings, points)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Accumulates content operations page by page, breaking to a new page when
/// the vertical cursor would cross the bottom margin
struct PageWriter {
    finished: Vec<Vec<Operation>>,
    ops: Vec<Operation>,
    y: i64,
}

impl PageWriter {
    fn new() -> Self {
        Self {
            finished: Vec::new(),
            ops: Vec::new(),
            y: PAGE_TOP,
        }
    }

    fn break_page(&mut self) {
        self.finished.push(std::mem::take(&mut self.ops));
        self.y = PAGE_TOP;
    }

    /// Move the cursor down, starting a fresh page when the line would not
    /// fit, and return the baseline for the line being placed
    fn advance(&mut self, leading: i64) -> i64 {
        if self.y - leading < MARGIN {
            self.break_page();
        }
        self.y -= leading;
        self.y
    }

    /// Vertical whitespace between sections. Dropped entirely at a page
    /// boundary so fresh pages start flush with the top margin.
    fn gap(&mut self, height: i64) {
        if self.y - height < MARGIN {
            self.break_page();
        } else {
            self.y -= height;
        }
    }

    fn text_at(&mut self, font: &str, size: i64, x: i64, leading: i64, text: &str) {
        let y = self.advance(leading);
        self.emit_text(font, size, x, y, text);
    }

    fn paragraph(&mut self, font: &str, size: i64, leading: i64, width: usize, text: &str) {
        let clean = sanitize_pdf_text(text);
        for line in wrap_text(&clean, width) {
            let y = self.advance(leading);
            self.emit_text(font, size, MARGIN, y, &line);
        }
    }

    fn rule(&mut self) {
        let y = self.advance(RULE_LEADING);
        self.ops.push(Operation::new(
            "m",
            vec![Object::Integer(MARGIN), Object::Integer(y)],
        ));
        self.ops.push(Operation::new(
            "l",
            vec![Object::Integer(PAGE_WIDTH - MARGIN), Object::Integer(y)],
        ));
        self.ops.push(Operation::new("S", vec![]));
    }

    fn emit_text(&mut self, font: &str, size: i64, x: i64, y: i64, text: &str) {
        self.ops.push(Operation::new("BT", vec![]));
        self.ops.push(Operation::new(
            "Tf",
            vec![
                Object::Name(font.as_bytes().to_vec()),
                Object::Integer(size),
            ],
        ));
        self.ops.push(Operation::new(
            "Td",
            vec![Object::Integer(x), Object::Integer(y)],
        ));
        self.ops.push(Operation::new(
            "Tj",
            vec![Object::String(
                sanitize_pdf_text(text).into_bytes(),
                StringFormat::Literal,
            )],
        ));
        self.ops.push(Operation::new("ET", vec![]));
    }

    fn into_pages(mut self) -> Vec<Vec<Operation>> {
        if !self.ops.is_empty() || self.finished.is_empty() {
            self.finished.push(self.ops);
        }
        self.finished
    }
}

fn build_document(pages: Vec<Vec<Operation>>) -> Result<Vec<u8>, ReportError> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let font_regular = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Helvetica".to_vec())),
    ]));
    let font_bold = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Helvetica-Bold".to_vec())),
    ]));
    let resources_id = doc.add_object(Dictionary::from_iter(vec![(
        "Font",
        Object::Dictionary(Dictionary::from_iter(vec![
            (REGULAR_FONT, Object::Reference(font_regular)),
            (BOLD_FONT, Object::Reference(font_bold)),
        ])),
    )]));

    let mut page_ids = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let encoded = content
            .encode()
            .map_err(|e| ReportError::Assembly(format!("Content encoding failed: {}", e)))?;
        let content_id = doc.add_object(Stream::new(Dictionary::new(), encoded));

        let page = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(PAGE_WIDTH),
                    Object::Integer(PAGE_HEIGHT),
                ]),
            ),
            ("Resources", Object::Reference(resources_id)),
            ("Contents", Object::Reference(content_id)),
        ]);
        page_ids.push(doc.add_object(page));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(page_ids.len() as i64)),
        (
            "Kids",
            Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
        ),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]);
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| ReportError::Assembly(format!("Save failed: {}", e)))?;

    Ok(buffer)
}

/// Greedy word wrap to a column width in characters.
/// Words longer than the column (links, mostly) are hard-broken at the edge.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let mut word = word;
        loop {
            let sep = if line.is_empty() { 0 } else { 1 };
            let room = width.saturating_sub(line.len() + sep);
            if word.len() <= room {
                if sep == 1 {
                    line.push(' ');
                }
                line.push_str(word);
                break;
            }
            if room >= 8 || line.is_empty() {
                let cut = room.max(1).min(word.len());
                let (head, tail) = word.split_at(cut);
                if sep == 1 {
                    line.push(' ');
                }
                line.push_str(head);
                word = tail;
            }
            lines.push(std::mem::take(&mut line));
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Map text onto the character set the base fonts can show.
/// Common typographic punctuation gets an ASCII stand-in, the rest becomes '?'.
fn sanitize_pdf_text(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            ' '..='~' => ch,
            '\u{a0}' => ' ',
            '\u{2013}' | '\u{2014}' => '-',
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201c}' | '\u{201d}' => '"',
            _ => '?',
        })
        .collect()
}
