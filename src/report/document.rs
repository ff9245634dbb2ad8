//! Word (.docx) rendering of an emission result
//!
//! Produces the smallest package Word accepts: content types, the package
//! relationship and a single `word/document.xml` part.

use std::io::{Cursor, Write};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::emissions::EmissionResult;
use crate::error::{Error, Result};

const WORDPROCESSING_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

pub const REPORT_TITLE: &str = "🌍 Emission Report";

/// One paragraph of the report
#[derive(Clone, Debug, PartialEq)]
pub struct ReportLine {
    pub text: String,
    pub bold: bool,
}

impl ReportLine {
    fn plain(text: String) -> Self {
        Self { text, bold: false }
    }
}

/// Paragraphs in the order they appear in the document
pub fn report_lines(result: &EmissionResult) -> Vec<ReportLine> {
    vec![
        ReportLine {
            text: REPORT_TITLE.to_string(),
            bold: true,
        },
        ReportLine::plain(format!("📅 Date: {}", result.date.format("%Y-%m-%d"))),
        ReportLine::plain(format!("🌡 Temperature: {}", result.temperature_display())),
        ReportLine::plain(format!("🍂 Season: {}", result.season)),
        ReportLine::plain(format!("🚀 Activity: {}", result.activity)),
        ReportLine::plain(format!("📌 Scope: {}", result.scope)),
        ReportLine::plain(format!("💨 Emissions: {}", result.emissions_display())),
    ]
}

/// Render `result` as .docx bytes
pub fn render_docx(result: &EmissionResult) -> Result<Vec<u8>> {
    let document_xml = document_xml(&report_lines(result))?;

    let mut package = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    package.start_file("[Content_Types].xml", options)?;
    package.write_all(CONTENT_TYPES_XML.as_bytes())?;
    package.start_file("_rels/.rels", options)?;
    package.write_all(PACKAGE_RELS_XML.as_bytes())?;
    package.start_file("word/document.xml", options)?;
    package.write_all(&document_xml)?;

    Ok(package.finish()?.into_inner())
}

fn document_xml(lines: &[ReportLine]) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());

    write(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    write(
        &mut writer,
        Event::Start(BytesStart::new("w:document").with_attributes([("xmlns:w", WORDPROCESSING_NS)])),
    )?;
    write(&mut writer, Event::Start(BytesStart::new("w:body")))?;

    for line in lines {
        write(&mut writer, Event::Start(BytesStart::new("w:p")))?;
        write(&mut writer, Event::Start(BytesStart::new("w:r")))?;
        if line.bold {
            write(&mut writer, Event::Start(BytesStart::new("w:rPr")))?;
            write(&mut writer, Event::Empty(BytesStart::new("w:b")))?;
            write(&mut writer, Event::End(BytesEnd::new("w:rPr")))?;
        }
        write(
            &mut writer,
            Event::Start(BytesStart::new("w:t").with_attributes([("xml:space", "preserve")])),
        )?;
        write(&mut writer, Event::Text(BytesText::new(&line.text)))?;
        write(&mut writer, Event::End(BytesEnd::new("w:t")))?;
        write(&mut writer, Event::End(BytesEnd::new("w:r")))?;
        write(&mut writer, Event::End(BytesEnd::new("w:p")))?;
    }

    write(&mut writer, Event::End(BytesEnd::new("w:body")))?;
    write(&mut writer, Event::End(BytesEnd::new("w:document")))?;

    Ok(writer.into_inner())
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| Error::DocumentError(format!("Failed to write document.xml: {}", e)))
}
