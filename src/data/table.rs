//! In-memory tables read from CSV or spreadsheet sources.

use std::fs;
use std::path::Path;

use calamine::Reader;
use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::data::cell::{self, Cell};
use crate::data::literal::Nested;
use crate::error::FuseError;

/// One source row: column name -> cell, in header order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    cells: IndexMap<String, Cell>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: &str, value: &str) -> Self {
        self.insert(column, Cell::from_text(value));
        self
    }

    pub fn insert(&mut self, column: &str, value: Cell) {
        self.cells.insert(column.trim().to_string(), value);
    }

    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.cells.get(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    pub fn text(&self, column: &str, default: &str) -> String {
        cell::text(self.get(column), default)
    }

    pub fn text_opt(&self, column: &str) -> Option<String> {
        cell::text_opt(self.get(column))
    }

    pub fn float(&self, column: &str) -> Option<f64> {
        cell::float(self.get(column))
    }

    pub fn float_or(&self, column: &str, default: f64) -> f64 {
        cell::float_or(self.get(column), default)
    }

    pub fn flag(&self, column: &str) -> u32 {
        cell::flag(self.get(column), 0)
    }

    pub fn list(&self, column: &str) -> Vec<String> {
        cell::list(self.get(column))
    }

    pub fn dict(&self, column: &str) -> Map<String, Value> {
        cell::dict(self.get(column))
    }

    pub fn first_dict(&self, column: &str) -> Map<String, Value> {
        cell::first_dict(self.get(column))
    }

    pub fn nested(&self, column: &str) -> Nested {
        cell::nested(self.get(column))
    }
}

impl FromIterator<(String, Cell)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (String, Cell)>>(iter: I) -> Self {
        let mut record = RawRecord::new();
        for (column, value) in iter {
            record.insert(&column, value);
        }
        record
    }
}

/// Rows of one source, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    pub columns: Vec<String>,
    pub rows: Vec<RawRecord>,
}

impl RecordSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<RawRecord>) -> Self {
        let columns = rows
            .first()
            .map(|row| row.columns().map(str::to_string).collect())
            .unwrap_or_default();
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RawRecord> {
        self.rows.iter()
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a RawRecord;
    type IntoIter = std::slice::Iter<'a, RawRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// True when the file extension names a spreadsheet format calamine reads.
pub fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "xlsx" | "xlsm" | "xls" | "ods"))
        .unwrap_or(false)
}

/// Read a table, picking the reader by file extension.
pub fn read_table(path: &Path) -> Result<RecordSet, FuseError> {
    if is_spreadsheet(path) {
        read_spreadsheet(path)
    } else {
        read_csv(path)
    }
}

pub fn read_csv(path: &Path) -> Result<RecordSet, FuseError> {
    let content = fs::read_to_string(path).map_err(|source| FuseError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_csv(&content).map_err(|source| FuseError::Csv {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse CSV text with a header row. Short rows leave trailing columns missing.
pub fn parse_csv(content: &str) -> Result<RecordSet, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());
    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .map(|header| header.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row: RawRecord = columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let value = record.get(i).map(Cell::from_text).unwrap_or(Cell::Missing);
                (column.clone(), value)
            })
            .collect();
        rows.push(row);
    }
    Ok(RecordSet { columns, rows })
}

/// Read the first worksheet; its first row is the header.
pub fn read_spreadsheet(path: &Path) -> Result<RecordSet, FuseError> {
    let mut workbook = calamine::open_workbook_auto(path).map_err(|source| FuseError::Spreadsheet {
        path: path.to_path_buf(),
        source,
    })?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| FuseError::EmptyWorkbook(path.to_path_buf()))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|source| FuseError::Spreadsheet {
            path: path.to_path_buf(),
            source,
        })?;

    let mut sheet_rows = range.rows();
    let columns: Vec<String> = match sheet_rows.next() {
        Some(header) => header
            .iter()
            .map(|data| spreadsheet_cell(data).as_text().unwrap_or_default())
            .collect(),
        None => return Ok(RecordSet::empty()),
    };

    let rows = sheet_rows
        .map(|sheet_row| {
            columns
                .iter()
                .enumerate()
                .map(|(i, column)| {
                    let value = sheet_row.get(i).map(spreadsheet_cell).unwrap_or(Cell::Missing);
                    (column.clone(), value)
                })
                .collect::<RawRecord>()
        })
        .collect();
    Ok(RecordSet { columns, rows })
}

fn spreadsheet_cell(data: &calamine::Data) -> Cell {
    match data {
        calamine::Data::Empty => Cell::Missing,
        calamine::Data::String(text) => Cell::from_text(text),
        calamine::Data::Float(value) => Cell::Number(*value),
        calamine::Data::Int(value) => Cell::Number(*value as f64),
        calamine::Data::Bool(flag) => Cell::Bool(*flag),
        calamine::Data::Error(_) => Cell::Missing,
        other => Cell::from_text(&format!("{other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_csv_handles_quoted_literals_and_short_rows() {
        let csv = "name,Locations & Drops,HP\n\
                   Margit,\"{'Stormveil Castle': ['12,000', 'Talisman Pouch']}\",4174\n\
                   Godrick\n";
        let table = parse_csv(csv).unwrap();
        assert_eq!(table.columns, vec!["name", "Locations & Drops", "HP"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].text("HP", "Unknown"), "4174");
        assert_eq!(table.rows[1].text("HP", "Unknown"), "Unknown");
        assert!(table.rows[0].dict("Locations & Drops").contains_key("Stormveil Castle"));
    }

    #[test]
    fn headers_are_trimmed() {
        let table = parse_csv(" name , weight \nDagger, 1.5\n").unwrap();
        assert_eq!(table.rows[0].float("weight"), Some(1.5));
    }

    const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
    const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
    const PKG_REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

    /// Minimal xlsx: one sheet, shared-string header, a number, a bool and a missing cell.
    fn write_weapons_workbook(path: &Path) {
        use std::io::Write;

        let parts = [
            (
                "[Content_Types].xml".to_string(),
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/></Types>"#
                    .to_string(),
            ),
            (
                "_rels/.rels".to_string(),
                format!(
                    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{PKG_REL_NS}"><Relationship Id="rId1" Type="{REL_NS}/officeDocument" Target="xl/workbook.xml"/></Relationships>"#
                ),
            ),
            (
                "xl/workbook.xml".to_string(),
                format!(
                    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="{MAIN_NS}" xmlns:r="{REL_NS}"><sheets><sheet name="Weapons" sheetId="1" r:id="rId1"/><sheet name="Notes" sheetId="2" r:id="rId3"/></sheets></workbook>"#
                ),
            ),
            (
                "xl/_rels/workbook.xml.rels".to_string(),
                format!(
                    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{PKG_REL_NS}"><Relationship Id="rId1" Type="{REL_NS}/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="{REL_NS}/sharedStrings" Target="sharedStrings.xml"/><Relationship Id="rId3" Type="{REL_NS}/worksheet" Target="worksheets/sheet2.xml"/></Relationships>"#
                ),
            ),
            (
                "xl/sharedStrings.xml".to_string(),
                format!(
                    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="{MAIN_NS}" count="8" uniqueCount="8"><si><t>name</t></si><si><t>weight</t></si><si><t>FP cost</t></si><si><t>dlc</t></si><si><t>Dagger</t></si><si><t>Club</t></si><si><t>NaN</t></si><si><t>ignored</t></si></sst>"#
                ),
            ),
            (
                "xl/worksheets/sheet1.xml".to_string(),
                format!(
                    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="{MAIN_NS}"><sheetData><row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c><c r="C1" t="s"><v>2</v></c><c r="D1" t="s"><v>3</v></c></row><row r="2"><c r="A2" t="s"><v>4</v></c><c r="B2"><v>1.5</v></c><c r="C2"><v>7</v></c><c r="D2" t="b"><v>1</v></c></row><row r="3"><c r="A3" t="s"><v>5</v></c><c r="B3" t="s"><v>6</v></c><c r="C3"><v>0</v></c></row></sheetData></worksheet>"#
                ),
            ),
            (
                "xl/worksheets/sheet2.xml".to_string(),
                format!(
                    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="{MAIN_NS}"><sheetData><row r="1"><c r="A1" t="s"><v>7</v></c></row></sheetData></worksheet>"#
                ),
            ),
        ];

        let file = fs::File::create(path).unwrap();
        let mut archive = zip::ZipWriter::new(file);
        for (name, body) in parts {
            archive
                .start_file(name, zip::write::SimpleFileOptions::default())
                .unwrap();
            archive.write_all(body.as_bytes()).unwrap();
        }
        archive.finish().unwrap();
    }

    #[test]
    fn spreadsheet_first_sheet_becomes_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weapons.xlsx");
        write_weapons_workbook(&path);

        let table = read_spreadsheet(&path).unwrap();
        assert_eq!(table.columns, vec!["name", "weight", "FP cost", "dlc"]);
        assert_eq!(table.len(), 2);

        let dagger = &table.rows[0];
        assert_eq!(dagger.text("name", "Unknown"), "Dagger");
        assert_eq!(dagger.float("weight"), Some(1.5));
        assert_eq!(dagger.text("FP cost", "0"), "7");
        assert_eq!(dagger.flag("dlc"), 1);

        let club = &table.rows[1];
        assert_eq!(club.text("name", "Unknown"), "Club");
        assert_eq!(club.float("weight"), None);
        assert_eq!(club.text("FP cost", "?"), "0");
        assert_eq!(club.flag("dlc"), 0);
        assert!(club.get("dlc").map_or(true, Cell::is_missing));
    }

    #[test]
    fn spreadsheet_extensions() {
        assert!(is_spreadsheet(Path::new("data/weapons.XLSX")));
        assert!(is_spreadsheet(Path::new("bosses.ods")));
        assert!(!is_spreadsheet(Path::new("bosses.csv")));
    }
}
