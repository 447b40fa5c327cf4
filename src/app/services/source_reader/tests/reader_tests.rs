//! Tests for header decoding and row iteration

use super::*;
use crate::Error;
use crate::app::services::source_reader::SourceReader;

#[test]
fn test_header_is_decoded_in_order() {
    let text = source_text(&[",France,46.2,2.2,10,20,30"]);
    let reader = SourceReader::from_text("confirmed", &text).unwrap();

    let names = reader.header().names();
    assert_eq!(names.len(), 7);
    assert_eq!(names[0], "Province/State");
    assert_eq!(names[6], "3/9/23");
    assert_eq!(reader.header().get_index("Country/Region"), Some(1));
}

#[test]
fn test_empty_source_is_malformed() {
    let result = SourceReader::from_text("confirmed", "");
    assert!(matches!(result, Err(Error::MalformedSource { .. })));
}

#[test]
fn test_blank_header_is_malformed() {
    let result = SourceReader::from_text("deaths", ",,,\n1,2,3,4\n");
    assert!(matches!(result, Err(Error::MalformedSource { .. })));
}

#[test]
fn test_header_only_source_yields_no_rows() {
    let text = source_text(&[]);
    let reader = SourceReader::from_text("recovered", &text).unwrap();
    assert_eq!(reader.count(), 0);
}

#[test]
fn test_rows_are_yielded_lazily_and_independently() {
    let text = source_text(&[
        ",France,46.2,2.2,10,20,30",
        ",Germany",
        ",Italy,41.8,12.5,1,2,3",
    ]);
    let reader = SourceReader::from_text("confirmed", &text).unwrap();

    let rows: Vec<_> = reader.collect();
    assert_eq!(rows.len(), 3);

    // The short row decodes but fails on access to the missing column
    let short = rows[1].as_ref().unwrap();
    assert!(short.get("3/9/23").is_err());

    let italy = rows[2].as_ref().unwrap();
    assert_eq!(italy.get("Country/Region").unwrap(), "Italy");
    assert_eq!(italy.parse_count("3/9/23"), Some(3));
}

#[test]
fn test_quoted_labels_with_commas() {
    let text = source_text(&[",\"Korea, South\",35.9,127.7,1,2,3"]);
    let mut reader = SourceReader::from_text("confirmed", &text).unwrap();

    let row = reader.next().unwrap().unwrap();
    assert_eq!(row.get("Country/Region").unwrap(), "Korea, South");
    assert_eq!(row.get_optional("Province/State"), None);
    assert_eq!(row.parse_count("3/9/23"), Some(3));
}

#[test]
fn test_row_line_numbers_follow_source() {
    let text = source_text(&[",France,0,0,1,2,3", ",Spain,0,0,4,5,6"]);
    let reader = SourceReader::from_text("confirmed", &text).unwrap();

    let lines: Vec<u64> = reader.map(|row| row.unwrap().line()).collect();
    assert_eq!(lines, vec![2, 3]);
}

#[test]
fn test_invalid_utf8_record_is_row_error() {
    let mut bytes = source_text(&[]).into_bytes();
    bytes.extend_from_slice(b",Fr\xffnce,0,0,1,2,3\n");
    bytes.extend_from_slice(b",Spain,0,0,4,5,6\n");

    let reader = SourceReader::new("confirmed", bytes.as_slice()).unwrap();
    let rows: Vec<_> = reader.collect();

    assert_eq!(rows.len(), 2);
    assert!(matches!(rows[0], Err(Error::RowProcessing { .. })));
    assert_eq!(
        rows[1].as_ref().unwrap().get("Country/Region").unwrap(),
        "Spain"
    );
}
