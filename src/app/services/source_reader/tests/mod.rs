//! Tests for the tabular source reader

pub mod reader_tests;

/// Header shared by the upstream time-series files
pub const HEADER: &str = "Province/State,Country/Region,Lat,Long,3/7/23,3/8/23,3/9/23";

/// Build source text from the standard header and the given data lines
pub fn source_text(rows: &[&str]) -> String {
    let mut text = String::from(HEADER);
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    text.push('\n');
    text
}
