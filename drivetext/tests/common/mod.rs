#![allow(dead_code)]

use std::io::{Cursor, Write};

/// Build a minimal .docx in memory with the given paragraphs.
pub fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
    use docx_rs::{Docx, Paragraph, Run};

    let mut docx = Docx::new();
    for text in paragraphs {
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)));
    }
    let mut buffer = Cursor::new(Vec::new());
    docx.build().pack(&mut buffer).expect("Failed to pack DOCX");
    buffer.into_inner()
}

/// Build a minimal .xlsx in memory (one sheet, three rows).
pub fn xlsx_bytes() -> Vec<u8> {
    use zip::write::FileOptions;
    use zip::CompressionMethod;

    let mut buffer = Cursor::new(Vec::new());
    {
        let mut zip = zip::ZipWriter::new(&mut buffer);
        let options: FileOptions<zip::write::ExtendedFileOptions> = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644);

        zip.start_file("[Content_Types].xml", options.clone()).unwrap();
        zip.write_all(CONTENT_TYPES_XLSX.as_bytes()).unwrap();

        zip.add_directory("_rels", options.clone()).unwrap();
        zip.start_file("_rels/.rels", options.clone()).unwrap();
        zip.write_all(RELS_XLSX.as_bytes()).unwrap();

        zip.add_directory("xl", options.clone()).unwrap();
        zip.start_file("xl/workbook.xml", options.clone()).unwrap();
        zip.write_all(WORKBOOK_XML.as_bytes()).unwrap();

        zip.add_directory("xl/_rels", options.clone()).unwrap();
        zip.start_file("xl/_rels/workbook.xml.rels", options.clone()).unwrap();
        zip.write_all(WORKBOOK_RELS.as_bytes()).unwrap();

        zip.add_directory("xl/worksheets", options.clone()).unwrap();
        zip.start_file("xl/worksheets/sheet1.xml", options.clone()).unwrap();
        zip.write_all(SHEET1_XML.as_bytes()).unwrap();

        zip.start_file("xl/sharedStrings.xml", options.clone()).unwrap();
        zip.write_all(SHARED_STRINGS_XML.as_bytes()).unwrap();

        zip.finish().unwrap();
    }
    buffer.into_inner()
}

/// Build a legacy .doc in memory: a compound file whose `WordDocument`
/// stream carries a simple (non-complex) FIB pointing at Latin-1 text.
pub fn legacy_doc_bytes(text: &str) -> Vec<u8> {
    const HEADER_LEN: usize = 64;

    let mut stream = vec![0u8; HEADER_LEN];
    stream[0..2].copy_from_slice(&0xA5EC_u16.to_le_bytes());
    let fc_min = HEADER_LEN as u32;
    let fc_mac = fc_min + text.len() as u32;
    stream[0x18..0x1C].copy_from_slice(&fc_min.to_le_bytes());
    stream[0x1C..0x20].copy_from_slice(&fc_mac.to_le_bytes());
    stream.extend_from_slice(text.as_bytes());

    compound_file_bytes("WordDocument", &stream)
}

/// Build a compound file holding a single named stream.
pub fn compound_file_bytes(stream_name: &str, data: &[u8]) -> Vec<u8> {
    let cursor = Cursor::new(Vec::new());
    let mut compound = cfb::CompoundFile::create(cursor).expect("create compound file");
    {
        let mut stream = compound
            .create_stream(stream_name)
            .expect("create stream");
        stream.write_all(data).expect("write stream");
    }
    compound.into_inner().into_inner()
}

/// Build a one-page PDF in memory with the given text drawn in Helvetica.
pub fn pdf_bytes(text: &str) -> Vec<u8> {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 24.into()]),
            Operation::new("Td", vec![72.into(), 720.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().expect("encode content"),
    ));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        "Resources" => resources_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).expect("save pdf");
    buffer
}

// XLSX parts, shared-strings based.
const CONTENT_TYPES_XLSX: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
    <Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/>
</Types>"#;

const RELS_XLSX: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

const WORKBOOK_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets>
        <sheet name="Sheet1" sheetId="1" r:id="rId1"/>
    </sheets>
</workbook>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
    <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/>
</Relationships>"#;

const SHEET1_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <sheetData>
        <row r="1">
            <c r="A1" t="s"><v>0</v></c>
            <c r="B1" t="s"><v>1</v></c>
            <c r="C1" t="s"><v>2</v></c>
        </row>
        <row r="2">
            <c r="A2" t="s"><v>3</v></c>
            <c r="B2"><v>100</v></c>
            <c r="C2" t="s"><v>4</v></c>
        </row>
        <row r="3">
            <c r="A3" t="s"><v>5</v></c>
            <c r="B3"><v>200</v></c>
            <c r="C3" t="s"><v>6</v></c>
        </row>
    </sheetData>
</worksheet>"#;

const SHARED_STRINGS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="7" uniqueCount="7">
    <si><t>Product</t></si>
    <si><t>Price</t></si>
    <si><t>Category</t></si>
    <si><t>Widget A</t></si>
    <si><t>Electronics</t></si>
    <si><t>Widget B</t></si>
    <si><t>Tools</t></si>
</sst>"#;
