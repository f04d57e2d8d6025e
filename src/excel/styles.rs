//! Bold-font flags read straight from an xlsx package
//!
//! calamine exposes cell values only, so the font weight of each cell is
//! resolved here: `xl/styles.xml` maps cell formats to fonts, each worksheet
//! part references a cell format through the `s` attribute.

use crate::error::{RedactorError, RedactorResult};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use zip::result::ZipError;
use zip::ZipArchive;

/// 0-based (row, column) positions of bold cells
pub type BoldCells = HashSet<(usize, usize)>;

/// Reads style information from an xlsx archive
pub struct StyleReader<R: Read + Seek> {
    archive: ZipArchive<R>,
}

impl StyleReader<File> {
    pub fn open<P: AsRef<Path>>(path: P) -> RedactorResult<Self> {
        let file = File::open(path.as_ref())?;
        Self::new(file)
    }
}

impl<R: Read + Seek> StyleReader<R> {
    pub fn new(reader: R) -> RedactorResult<Self> {
        let archive = ZipArchive::new(reader)
            .map_err(|e| RedactorError::Workbook(format!("Not an xlsx package: {}", e)))?;
        Ok(Self { archive })
    }

    /// Bold cell positions keyed by sheet name
    pub fn bold_cells(&mut self) -> RedactorResult<HashMap<String, BoldCells>> {
        let mut result = HashMap::new();

        let styles = match self.read_part("xl/styles.xml")? {
            Some(xml) => bold_styles(&xml)?,
            None => return Ok(result),
        };
        if !styles.iter().any(|bold| *bold) {
            return Ok(result);
        }

        let workbook_xml = self.read_part("xl/workbook.xml")?.unwrap_or_default();
        let rels_xml = self
            .read_part("xl/_rels/workbook.xml.rels")?
            .unwrap_or_default();

        for (sheet_name, part) in sheet_parts(&workbook_xml, &rels_xml)? {
            if let Some(xml) = self.read_part(&part)? {
                let cells = bold_positions(&xml, &styles)?;
                if !cells.is_empty() {
                    result.insert(sheet_name, cells);
                }
            }
        }

        Ok(result)
    }

    fn read_part(&mut self, name: &str) -> RedactorResult<Option<Vec<u8>>> {
        match self.archive.by_name(name) {
            Ok(mut part) => {
                let mut bytes = Vec::new();
                part.read_to_end(&mut bytes)?;
                Ok(Some(bytes))
            }
            Err(ZipError::FileNotFound) => Ok(None),
            Err(e) => Err(RedactorError::Workbook(format!(
                "Failed to read '{}': {}",
                name, e
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StyleSection {
    Other,
    Fonts,
    CellFormats,
}

/// Bold flag of every cell format (`cellXfs` entry), by format index
fn bold_styles(xml: &[u8]) -> RedactorResult<Vec<bool>> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut section = StyleSection::Other;
    let mut fonts: Vec<bool> = Vec::new();
    let mut format_fonts: Vec<usize> = Vec::new();

    loop {
        match reader.read_event_into(&mut buf).map_err(xml_error)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"fonts" => section = StyleSection::Fonts,
                b"cellXfs" => section = StyleSection::CellFormats,
                _ => style_element(&e, section, &mut fonts, &mut format_fonts)?,
            },
            Event::Empty(e) => style_element(&e, section, &mut fonts, &mut format_fonts)?,
            Event::End(e) => {
                if matches!(e.local_name().as_ref(), b"fonts" | b"cellXfs") {
                    section = StyleSection::Other;
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(format_fonts
        .into_iter()
        .map(|font| fonts.get(font).copied().unwrap_or(false))
        .collect())
}

fn style_element(
    e: &BytesStart,
    section: StyleSection,
    fonts: &mut Vec<bool>,
    format_fonts: &mut Vec<usize>,
) -> RedactorResult<()> {
    match (section, e.local_name().as_ref()) {
        (StyleSection::Fonts, b"font") => fonts.push(false),
        (StyleSection::Fonts, b"b") => {
            let on = attribute(e, b"val")?
                .map(|v| v != "0" && v != "false")
                .unwrap_or(true);
            if let Some(last) = fonts.last_mut() {
                *last = on;
            }
        }
        (StyleSection::CellFormats, b"xf") => {
            let font = attribute(e, b"fontId")?
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(0);
            format_fonts.push(font);
        }
        _ => {}
    }
    Ok(())
}

/// (sheet name, archive path) for every worksheet of the workbook
fn sheet_parts(workbook_xml: &[u8], rels_xml: &[u8]) -> RedactorResult<Vec<(String, String)>> {
    let mut targets: HashMap<String, String> = HashMap::new();
    for_each_element(rels_xml, b"Relationship", |e| {
        if let (Some(id), Some(target)) = (attribute(e, b"Id")?, attribute(e, b"Target")?) {
            targets.insert(id, part_path(&target));
        }
        Ok(())
    })?;

    let mut parts = Vec::new();
    for_each_element(workbook_xml, b"sheet", |e| {
        if let (Some(name), Some(id)) = (attribute(e, b"name")?, attribute(e, b"id")?) {
            if let Some(target) = targets.get(&id) {
                parts.push((name, target.clone()));
            }
        }
        Ok(())
    })?;
    Ok(parts)
}

fn part_path(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("xl/{}", target),
    }
}

/// Positions of cells whose format resolves to a bold font
fn bold_positions(xml: &[u8], styles: &[bool]) -> RedactorResult<BoldCells> {
    let mut cells = BoldCells::new();
    let mut row = 0usize;
    let mut next_col = 0usize;

    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf).map_err(xml_error)? {
            Event::Start(e) | Event::Empty(e) => match e.local_name().as_ref() {
                b"row" => {
                    if let Some(r) = attribute(&e, b"r")?.and_then(|v| v.parse::<usize>().ok()) {
                        row = r.saturating_sub(1);
                    }
                    next_col = 0;
                }
                b"c" => {
                    let (cell_row, cell_col) = attribute(&e, b"r")?
                        .and_then(|r| parse_cell_ref(&r))
                        .unwrap_or((row, next_col));
                    next_col = cell_col + 1;
                    let style = attribute(&e, b"s")?
                        .and_then(|s| s.parse::<usize>().ok())
                        .unwrap_or(0);
                    if styles.get(style).copied().unwrap_or(false) {
                        cells.insert((cell_row, cell_col));
                    }
                }
                _ => {}
            },
            Event::End(e) => {
                if e.local_name().as_ref() == b"row" {
                    row += 1;
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(cells)
}

fn for_each_element<F>(xml: &[u8], name: &[u8], mut visit: F) -> RedactorResult<()>
where
    F: FnMut(&BytesStart) -> RedactorResult<()>,
{
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf).map_err(xml_error)? {
            Event::Start(e) | Event::Empty(e) => {
                if e.local_name().as_ref() == name {
                    visit(&e)?;
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(())
}

fn attribute(e: &BytesStart, name: &[u8]) -> RedactorResult<Option<String>> {
    for attr in e.attributes() {
        let attr =
            attr.map_err(|err| RedactorError::Workbook(format!("Malformed XML attribute: {}", err)))?;
        if attr.key.local_name().as_ref() == name {
            let raw = std::str::from_utf8(&attr.value)
                .map_err(|err| RedactorError::Workbook(format!("Invalid UTF-8 in XML: {}", err)))?;
            let value = quick_xml::escape::unescape(raw)
                .map_err(|err| RedactorError::Workbook(format!("Invalid XML escape: {}", err)))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn xml_error(err: quick_xml::Error) -> RedactorError {
    RedactorError::Workbook(format!("Malformed XML: {}", err))
}

/// Convert an A1-style reference to a 0-based (row, column)
pub fn parse_cell_ref(reference: &str) -> Option<(usize, usize)> {
    let split = reference.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = reference.split_at(split);
    if letters.is_empty() {
        return None;
    }
    let mut col = 0usize;
    for ch in letters.chars() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        col = col * 26 + (ch.to_ascii_uppercase() as usize - 'A' as usize + 1);
    }
    let row = digits.parse::<usize>().ok()?;
    if row == 0 {
        return None;
    }
    Some((row - 1, col - 1))
}
