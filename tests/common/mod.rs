#![allow(dead_code)]

use std::{
    fs::File,
    io::{Cursor, Read, Write},
    path::{Path, PathBuf},
};

use gradesheet::Terminal;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter, write::SimpleFileOptions};

pub const MIMETYPE: &str = "application/vnd.oasis.opendocument.text";
pub const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8"?><office:document-styles xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0"/>"#;

/// Builds `content.xml` for a rubric with the given rows, the last one
/// being the total.
pub fn content_xml(rows: &[(&str, u32)]) -> String {
    let mut table = String::from(
        "<table:table table:name=\"Rubric\"><table:table-row>\
         <table:table-cell><text:p>Item</text:p></table:table-cell>\
         <table:table-cell><text:p>Max</text:p></table:table-cell>\
         <table:table-cell><text:p>Score</text:p></table:table-cell>\
         </table:table-row>",
    );
    for (label, max) in rows {
        table.push_str(&format!(
            "<table:table-row>\
             <table:table-cell office:value-type=\"string\"><text:p>{label}</text:p></table:table-cell>\
             <table:table-cell office:value-type=\"float\"><text:p>{max}</text:p></table:table-cell>\
             <table:table-cell><text:p/></table:table-cell>\
             </table:table-row>"
        ));
    }
    table.push_str("</table:table>");

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <office:document-content \
         xmlns:office=\"urn:oasis:names:tc:opendocument:xmlns:office:1.0\" \
         xmlns:table=\"urn:oasis:names:tc:opendocument:xmlns:table:1.0\" \
         xmlns:text=\"urn:oasis:names:tc:opendocument:xmlns:text:1.0\">\
         <office:body><office:text><text:p text:style-name=\"Title\">Lab 3</text:p>\
         {table}<text:p>COMMENTS:</text:p></office:text></office:body>\
         </office:document-content>"
    )
}

/// Writes a minimal OpenDocument container holding `content` to `path`.
pub fn write_sheet(path: &Path, content: &str) -> PathBuf {
    let file = File::create(path).expect("create sheet");
    let mut zip = ZipWriter::new(file);

    let stamp = DateTime::from_date_and_time(2021, 3, 14, 15, 9, 26).unwrap();
    let options = |method: CompressionMethod, mode: u32| {
        SimpleFileOptions::default()
            .compression_method(method)
            .last_modified_time(stamp)
            .unix_permissions(mode)
    };

    zip.start_file("mimetype", options(CompressionMethod::Stored, 0o644)).unwrap();
    zip.write_all(MIMETYPE.as_bytes()).unwrap();
    zip.start_file("content.xml", options(CompressionMethod::Deflated, 0o640)).unwrap();
    zip.write_all(content.as_bytes()).unwrap();
    zip.start_file("styles.xml", options(CompressionMethod::Deflated, 0o600)).unwrap();
    zip.write_all(STYLES.as_bytes()).unwrap();
    zip.start_file("META-INF/manifest.xml", options(CompressionMethod::Deflated, 0o604))
        .unwrap();
    zip.write_all(b"<manifest:manifest/>").unwrap();
    zip.finish().unwrap();

    path.to_path_buf()
}

/// Reads every member of the container at `path`, in archive order.
pub fn entries(path: &Path) -> Vec<(String, Vec<u8>)> {
    let mut zip = ZipArchive::new(File::open(path).expect("open output")).unwrap();
    (0..zip.len())
        .map(|i| {
            let mut entry = zip.by_index(i).unwrap();
            let mut bytes = Vec::new();
            entry.read_to_end(&mut bytes).unwrap();
            (entry.name().to_string(), bytes)
        })
        .collect()
}

/// Header fields of a member that a rewrite must keep.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryMeta {
    pub name:        String,
    pub compression: CompressionMethod,
    /// (year, month, day, hour, minute, second)
    pub modified:    Option<(u16, u8, u8, u8, u8, u8)>,
    pub unix_mode:   Option<u32>,
}

/// Reads the header fields of every member of the container at `path`.
pub fn metadata(path: &Path) -> Vec<EntryMeta> {
    let mut zip = ZipArchive::new(File::open(path).expect("open archive")).unwrap();
    (0..zip.len())
        .map(|i| {
            let entry = zip.by_index_raw(i).unwrap();
            EntryMeta {
                name:        entry.name().to_string(),
                compression: entry.compression(),
                modified:    entry.last_modified().map(|d| {
                    (d.year(), d.month(), d.day(), d.hour(), d.minute(), d.second())
                }),
                unix_mode:   entry.unix_mode(),
            }
        })
        .collect()
}

/// Reads `content.xml` of the container at `path` as text.
pub fn content_of(path: &Path) -> String {
    let (_, bytes) = entries(path)
        .into_iter()
        .find(|(name, _)| name == "content.xml")
        .expect("content.xml present");
    String::from_utf8(bytes).unwrap()
}

/// A terminal that answers prompts from a script and records what it showed.
pub fn scripted(answers: &[&str]) -> Terminal<Cursor<Vec<u8>>, Vec<u8>> {
    let mut input = answers.join("\n");
    input.push('\n');
    Terminal::new(Cursor::new(input.into_bytes()), Vec::new())
}

/// Everything a scripted terminal showed.
pub fn shown(terminal: Terminal<Cursor<Vec<u8>>, Vec<u8>>) -> String {
    String::from_utf8(terminal.into_output()).unwrap()
}
