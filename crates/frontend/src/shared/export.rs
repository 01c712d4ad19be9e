//! CSV export of list rows and the browser download that delivers it

use chrono::{NaiveDate, Utc};
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::shared::config::config;
use crate::shared::list::field::{parse_number, FieldValue, TableRecord};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExportError {
    #[error("No data to export")]
    NoData,
    #[error("Browser download failed: {0}")]
    Browser(String),
}

/// How a column's values are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellFormat {
    /// Numbers as plain numbers, text quoted
    Auto,
    /// Monetary/derived figures: exactly two decimals
    Money,
    /// Counts: no decimals for whole numbers, fractional values written in full
    Integer,
    /// Always quoted text, even for numbers (article codes, ids)
    Text,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub label: String,
    pub field: String,
    pub format: CellFormat,
}

/// Ordered column list of an export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnSpec {
    columns: Vec<Column>,
}

impl ColumnSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column(mut self, label: &str, field: &str, format: CellFormat) -> Self {
        self.columns.push(Column {
            label: label.to_string(),
            field: field.to_string(),
            format,
        });
        self
    }

    pub fn auto(self, label: &str, field: &str) -> Self {
        self.column(label, field, CellFormat::Auto)
    }

    pub fn money(self, label: &str, field: &str) -> Self {
        self.column(label, field, CellFormat::Money)
    }

    pub fn integer(self, label: &str, field: &str) -> Self {
        self.column(label, field, CellFormat::Integer)
    }

    pub fn text(self, label: &str, field: &str) -> Self {
        self.column(label, field, CellFormat::Text)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CsvOptions {
    /// UTF-8 BOM so Excel detects the encoding
    pub bom: bool,
}

/// A ready-to-save CSV document.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
}

impl CsvExport {
    pub fn bytes(&self) -> &[u8] {
        self.content.as_bytes()
    }
}

/// `<resource>-<YYYY-MM-DD>.csv`
pub fn export_filename(resource: &str, date: NaiveDate) -> String {
    format!("{}-{}.csv", resource, date.format("%Y-%m-%d"))
}

/// Export dated today (UTC) with the configured options.
pub fn export_csv<R: TableRecord>(
    records: &[R],
    columns: &ColumnSpec,
    resource: &str,
) -> Result<CsvExport, ExportError> {
    let options = CsvOptions {
        bom: config().export.bom,
    };
    export_csv_on(records, columns, resource, Utc::now().date_naive(), options)
}

pub fn export_csv_on<R: TableRecord>(
    records: &[R],
    columns: &ColumnSpec,
    resource: &str,
    date: NaiveDate,
    options: CsvOptions,
) -> Result<CsvExport, ExportError> {
    if records.is_empty() {
        return Err(ExportError::NoData);
    }

    let mut content = String::new();
    if options.bom {
        content.push('\u{FEFF}');
    }

    let headers: Vec<String> = columns
        .columns()
        .iter()
        .map(|c| escape_header(&c.label))
        .collect();
    content.push_str(&headers.join(","));
    content.push('\n');

    for record in records {
        let row: Vec<String> = columns
            .columns()
            .iter()
            .map(|c| render_cell(record.field(&c.field), c.format))
            .collect();
        content.push_str(&row.join(","));
        content.push('\n');
    }

    let filename = export_filename(resource, date);
    log::info!("CSV export {}: {} rows", filename, records.len());
    Ok(CsvExport { filename, content })
}

fn render_number(n: f64, format: CellFormat) -> String {
    if !n.is_finite() {
        return String::new();
    }
    match format {
        CellFormat::Money => format!("{:.2}", n),
        CellFormat::Integer if n.fract() == 0.0 => format!("{:.0}", n),
        CellFormat::Integer => n.to_string(),
        CellFormat::Auto | CellFormat::Text => n.to_string(),
    }
}

fn render_cell(value: FieldValue<'_>, format: CellFormat) -> String {
    match (value, format) {
        (FieldValue::Null, _) => String::new(),
        (value, CellFormat::Text) => value
            .display_text()
            .map(|text| quote(&text))
            .unwrap_or_default(),
        (FieldValue::Number(n), format) => render_number(n, format),
        (FieldValue::Bool(b), _) => b.to_string(),
        (FieldValue::Text(s), CellFormat::Money | CellFormat::Integer) => {
            match parse_number(&s) {
                Some(n) => render_number(n, format),
                None => quote(&s),
            }
        }
        (FieldValue::Text(s), CellFormat::Auto) => quote(&s),
    }
}

/// Wrap in double quotes, doubling embedded quotes.
fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

/// Header labels are quoted only when they contain a separator, quote or line break.
fn escape_header(label: &str) -> String {
    if label.contains(',') || label.contains('"') || label.contains('\n') || label.contains('\r') {
        quote(label)
    } else {
        label.to_string()
    }
}

/// Hand the document to the browser as a file download.
pub fn download(export: &CsvExport) -> Result<(), ExportError> {
    let blob = create_csv_blob(&export.content)?;
    download_blob(&blob, &export.filename)
}

/// Creates a Blob with the CSV data
fn create_csv_blob(content: &str) -> Result<Blob, ExportError> {
    let array = js_sys::Array::new();
    array.push(&wasm_bindgen::JsValue::from_str(content));

    let properties = BlobPropertyBag::new();
    properties.set_type("text/csv;charset=utf-8;");

    Blob::new_with_str_sequence_and_options(&array, &properties)
        .map_err(|e| ExportError::Browser(format!("Failed to create blob: {:?}", e)))
}

/// Triggers the download through a temporary anchor
fn download_blob(blob: &Blob, filename: &str) -> Result<(), ExportError> {
    let browser = |msg: &str| ExportError::Browser(msg.to_string());

    let window = web_sys::window().ok_or_else(|| browser("No window object"))?;
    let document = window.document().ok_or_else(|| browser("No document object"))?;

    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| ExportError::Browser(format!("Failed to create object URL: {:?}", e)))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| ExportError::Browser(format!("Failed to create anchor: {:?}", e)))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| ExportError::Browser(format!("Failed to cast to anchor: {:?}", e)))?;

    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| ExportError::Browser(format!("Failed to set style: {:?}", e)))?;

    let body = document.body().ok_or_else(|| browser("No body element"))?;
    body.append_child(&anchor)
        .map_err(|e| ExportError::Browser(format!("Failed to append anchor: {:?}", e)))?;

    anchor.click();

    body.remove_child(&anchor)
        .map_err(|e| ExportError::Browser(format!("Failed to remove anchor: {:?}", e)))?;

    Url::revoke_object_url(&url)
        .map_err(|e| ExportError::Browser(format!("Failed to revoke URL: {:?}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map, Value};

    fn rows(value: Value) -> Vec<Map<String, Value>> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_object().cloned().unwrap())
            .collect()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    fn city_columns() -> ColumnSpec {
        ColumnSpec::new()
            .auto("City", "_id")
            .money("Total NSV", "totalNSV")
            .integer("Total Orders", "totalOrders")
    }

    #[test]
    fn test_export_format() {
        let data = rows(json!([
            {"_id": "Mumbai", "totalNSV": 1000, "totalOrders": 10},
            {"_id": "Pune", "totalNSV": 500.456, "totalOrders": 5}
        ]));
        let export = export_csv_on(&data, &city_columns(), "cities", date(), CsvOptions::default()).unwrap();
        assert_eq!(export.filename, "cities-2024-03-09.csv");
        assert_eq!(
            export.content,
            "City,Total NSV,Total Orders\n\"Mumbai\",1000.00,10\n\"Pune\",500.46,5\n"
        );
    }

    #[test]
    fn test_fractional_counts_are_not_rounded() {
        let data = rows(json!([
            {"_id": "Pune", "totalNSV": 10, "totalOrders": 2.5},
            {"_id": "Goa", "totalNSV": 10, "totalOrders": "7"}
        ]));
        let export = export_csv_on(&data, &city_columns(), "cities", date(), CsvOptions::default()).unwrap();
        assert_eq!(
            export.content,
            "City,Total NSV,Total Orders\n\"Pune\",10.00,2.5\n\"Goa\",10.00,7\n"
        );
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        let data = rows(json!([{"_id": "x", "name": "The \"Big\" Store, Pune"}]));
        let columns = ColumnSpec::new().auto("Name", "name");
        let export = export_csv_on(&data, &columns, "stores", date(), CsvOptions::default()).unwrap();
        assert_eq!(export.content, "Name\n\"The \"\"Big\"\" Store, Pune\"\n");
    }

    #[test]
    fn test_null_bool_and_text_columns() {
        let data = rows(json!([{"_id": "007", "code": 123, "active": true}]));
        let columns = ColumnSpec::new()
            .text("Code", "code")
            .auto("Active", "active")
            .money("Missing", "nope")
            .auto("Plain", "code");
        let export = export_csv_on(&data, &columns, "x", date(), CsvOptions::default()).unwrap();
        assert_eq!(export.content, "Code,Active,Missing,Plain\n\"123\",true,,123\n");
    }

    #[test]
    fn test_header_quoting_and_bom() {
        let data = rows(json!([{"v": 1}]));
        let columns = ColumnSpec::new().auto("Value, net", "v");
        let export = export_csv_on(&data, &columns, "x", date(), CsvOptions { bom: true }).unwrap();
        assert!(export.content.starts_with("\u{FEFF}\"Value, net\"\n"));
    }

    #[test]
    fn test_empty_export_is_an_error() {
        let data: Vec<Map<String, Value>> = Vec::new();
        let result = export_csv_on(&data, &city_columns(), "cities", date(), CsvOptions::default());
        assert_eq!(result, Err(ExportError::NoData));
    }

    #[test]
    fn test_round_trip_through_csv_reader() {
        let data = rows(json!([
            {"_id": "Mumbai", "totalNSV": 1000.004, "totalOrders": 10},
            {"_id": "Pune \"East\"", "totalNSV": 500.5, "totalOrders": 5},
            {"_id": "Delhi", "totalNSV": 1500, "totalOrders": 0}
        ]));
        let export = export_csv_on(&data, &city_columns(), "cities", date(), CsvOptions::default()).unwrap();

        let mut reader = csv::Reader::from_reader(export.bytes());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), vec!["City", "Total NSV", "Total Orders"]);

        let parsed: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(parsed.len(), data.len());
        for (record, original) in parsed.iter().zip(&data) {
            assert_eq!(&record[0], original["_id"].as_str().unwrap());
            let nsv: f64 = record[1].parse().unwrap();
            let expected = original["totalNSV"].as_f64().unwrap();
            assert!((nsv - expected).abs() < 0.005 + f64::EPSILON);
            let orders: f64 = record[2].parse().unwrap();
            assert_eq!(orders, original["totalOrders"].as_f64().unwrap());
        }
    }

    #[test]
    fn test_filename_uses_given_date() {
        assert_eq!(
            export_filename("all-sales-data", NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()),
            "all-sales-data-2025-12-31.csv"
        );
    }
}
