//! CSV encoding of the ticket collection
//!
//! The file starts with the header line `Id,Description,Priority,Status,DateCreated`
//! followed by one row per ticket. Fields are quoted only when they contain a
//! comma, a double quote or a line break, and embedded quotes are doubled.
//!
//! Reading is tolerant: every row is decoded on its own and yields a
//! `Result`, so one bad row never prevents the others from loading.

use crate::core::{Ticket, TicketBuilder};
use crate::error::{Result, TicketDeskError};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use csv::{ByteRecord, QuoteStyle, ReaderBuilder, StringRecord, WriterBuilder};
use serde_json::json;
use std::fmt;
use std::io;

/// Column names written as the first line of every file
pub const HEADER: [&str; 5] = ["Id", "Description", "Priority", "Status", "DateCreated"];

const COLUMN_COUNT: usize = HEADER.len();
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Render a timestamp in the stored form (RFC 3339, nanoseconds, `Z`)
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Parse a stored timestamp
///
/// Accepts `Z` or a numeric offset and any fractional precision. A value
/// without an offset is taken to be UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let value = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| TicketDeskError::malformed(format!("Invalid DateCreated '{value}'.")))
}

/// Write the header and one row per ticket
pub fn write_tickets<W: io::Write>(writer: W, tickets: &[Ticket]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_writer(writer);

    writer.write_record(HEADER)?;
    for ticket in tickets {
        let created = format_timestamp(ticket.created_at());
        writer.write_record([
            ticket.id().as_str(),
            ticket.description(),
            ticket.priority().as_str(),
            ticket.status().as_str(),
            created.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Split off the header line
///
/// Returns `None` when the content has no header at all (a zero-length
/// file, or one holding only a byte-order mark). The header's content is not
/// checked.
pub fn split_header(content: &[u8]) -> Option<&[u8]> {
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);
    if content.is_empty() {
        return None;
    }
    let body_start = match content.iter().position(|b| matches!(b, b'\r' | b'\n')) {
        Some(end) if content[end..].starts_with(b"\r\n") => end + 2,
        Some(end) => end + 1,
        None => content.len(),
    };
    Some(&content[body_start..])
}

/// A decoded data row together with the file line it starts on
#[derive(Debug)]
pub struct ParsedRow {
    pub line: usize,
    pub ticket: Result<Ticket>,
}

/// Decode the rows that follow the header
///
/// `body` is the content returned by [`split_header`]; reported line numbers
/// are 1-based file lines, counting the header as line 1. Blank lines are
/// dropped without producing a row.
///
/// A quoted field may span lines. When such a multi-line record cannot be
/// decoded, or its quotes never balance, each of its physical lines is read
/// as a row of its own, so a stray quote costs one row instead of
/// swallowing the rest of the file.
pub fn parse_rows(body: &[u8]) -> Vec<ParsedRow> {
    let lines = LineIndex::new(body);
    let mut reader = row_reader(body);
    let mut record = ByteRecord::new();
    let mut rows = Vec::new();

    loop {
        let offset = byte_offset(reader.position(), body);
        let start = skip_breaks(body, offset);

        match reader.read_byte_record(&mut record) {
            Ok(true) => {},
            Ok(false) => break,
            Err(err) => {
                rows.push(ParsedRow {
                    line: lines.line_at(start),
                    ticket: Err(TicketDeskError::malformed(format!("Unreadable row: {err}"))),
                });
                break;
            },
        }

        let end = byte_offset(reader.position(), body).max(start);
        let raw = trim_breaks(&body[start..end]);
        if is_blank(raw) {
            continue;
        }

        let ticket = decode_record(&record);
        if spans_lines(raw) && (ticket.is_err() || has_unbalanced_quotes(raw)) {
            tracing::debug!(
                line = lines.line_at(start),
                "Re-reading multi-line record line by line"
            );
            rows.extend(
                lines
                    .between(body, start, end)
                    .filter_map(|(line, bytes)| parse_single_line(line, bytes)),
            );
        } else {
            rows.push(ParsedRow {
                line: lines.line_at(start),
                ticket,
            });
        }
    }

    rows
}

fn row_reader(input: &[u8]) -> csv::Reader<&[u8]> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input)
}

/// Decode one physical line that holds no line break
fn parse_single_line(line: usize, bytes: &[u8]) -> Option<ParsedRow> {
    if is_blank(bytes) {
        return None;
    }

    let mut record = ByteRecord::new();
    let ticket = match row_reader(bytes).read_byte_record(&mut record) {
        Ok(true) => decode_record(&record),
        Ok(false) => return None,
        Err(err) => Err(TicketDeskError::malformed(format!("Unreadable row: {err}"))),
    };
    Some(ParsedRow { line, ticket })
}

/// Start offsets of the physical lines in a body
///
/// `\r\n`, a lone `\r` and `\n` each end a line, matching what the csv
/// reader accepts as a record terminator.
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(body: &[u8]) -> Self {
        let mut starts = vec![0];
        let mut i = 0;
        while i < body.len() {
            match body[i] {
                b'\r' if body.get(i + 1) == Some(&b'\n') => {
                    i += 1;
                    starts.push(i + 1);
                },
                b'\r' | b'\n' => starts.push(i + 1),
                _ => {},
            }
            i += 1;
        }
        Self { starts }
    }

    /// File line holding the byte at `offset` (the header is line 1)
    fn line_at(&self, offset: usize) -> usize {
        self.starts.partition_point(|&s| s <= offset) + 1
    }

    /// Physical lines overlapping `start..end`, without their terminators
    fn between<'a>(
        &'a self,
        body: &'a [u8],
        start: usize,
        end: usize,
    ) -> impl Iterator<Item = (usize, &'a [u8])> + 'a {
        let first = self.starts.partition_point(|&s| s <= start).saturating_sub(1);
        self.starts[first..]
            .iter()
            .enumerate()
            .take_while(move |&(_, &line_start)| line_start < end)
            .map(move |(k, &line_start)| {
                let index = first + k;
                let next = self
                    .starts
                    .get(index + 1)
                    .copied()
                    .unwrap_or(body.len())
                    .min(end);
                (index + 2, trim_breaks(&body[line_start.max(start)..next]))
            })
    }
}

fn byte_offset(position: &csv::Position, body: &[u8]) -> usize {
    usize::try_from(position.byte())
        .unwrap_or(usize::MAX)
        .min(body.len())
}

/// The reader positions a record before the empty lines it skips.
fn skip_breaks(body: &[u8], offset: usize) -> usize {
    body[offset..]
        .iter()
        .position(|b| !matches!(b, b'\r' | b'\n'))
        .map_or(body.len(), |skipped| offset + skipped)
}

fn trim_breaks(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .rposition(|b| !matches!(b, b'\r' | b'\n'))
        .map_or(0, |last| last + 1);
    &bytes[..end]
}

fn spans_lines(raw: &[u8]) -> bool {
    raw.iter().any(|b| matches!(b, b'\r' | b'\n'))
}

/// Doubled quotes come in pairs, so an odd count means a quote never closed
fn has_unbalanced_quotes(raw: &[u8]) -> bool {
    raw.iter().filter(|&&b| b == b'"').count() % 2 == 1
}

fn is_blank(raw: &[u8]) -> bool {
    raw.iter().all(u8::is_ascii_whitespace)
}

fn decode_record(record: &ByteRecord) -> Result<Ticket> {
    let record = StringRecord::from_byte_record(record.clone())
        .map_err(|err| TicketDeskError::malformed(format!("Unreadable row: {err}")))?;
    ticket_from_record(&record)
}

fn ticket_from_record(record: &StringRecord) -> Result<Ticket> {
    if record.len() != COLUMN_COUNT {
        return Err(TicketDeskError::malformed(format!(
            "Expected {COLUMN_COUNT} columns, found {}.",
            record.len()
        )));
    }

    let created_at = parse_timestamp(&record[4])?;

    TicketBuilder::new()
        .id(&record[0])
        .description(&record[1])
        .priority(record[2].parse()?)
        .status(record[3].parse()?)
        .created_at(created_at)
        .build()
}

/// A row that was skipped during a load
#[derive(Debug)]
pub struct SkippedRow {
    pub line: usize,
    pub error: TicketDeskError,
}

impl fmt::Display for SkippedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Skipped line {}: {}", self.line, self.error)
    }
}

/// Outcome of a load: how many rows made it in and which were skipped
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<SkippedRow>,
}

impl LoadReport {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    /// JSON rendering used by `--json` output
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "loaded": self.loaded,
            "skipped": self.skipped_count(),
            "skipped_rows": self
                .skipped
                .iter()
                .map(|row| json!({ "line": row.line, "reason": row.error.to_string() }))
                .collect::<Vec<_>>(),
        })
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Load complete. Loaded: {}, Skipped: {}.",
            self.loaded,
            self.skipped_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Priority, Status};
    use chrono::TimeZone;

    fn rows(content: &str) -> Vec<ParsedRow> {
        let body = split_header(content.as_bytes()).unwrap();
        parse_rows(body)
    }

    fn encode(tickets: &[Ticket]) -> String {
        let mut out = Vec::new();
        write_tickets(&mut out, tickets).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_header_and_unquoted_fields() {
        let ticket = TicketBuilder::new()
            .id("T1")
            .description("Printer offline")
            .priority(Priority::High)
            .status(Status::InProgress)
            .created_at(Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap())
            .build()
            .unwrap();

        let csv = encode(&[ticket]);
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Id,Description,Priority,Status,DateCreated"));
        assert_eq!(
            lines.next(),
            Some("T1,Printer offline,High,In Progress,2024-05-01T09:30:00.000000000Z")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_quoting_only_when_needed() {
        let ticket = TicketBuilder::new()
            .id("T2")
            .description("Says \"hi\", then\ncrashes")
            .build()
            .unwrap();

        let csv = encode(&[ticket]);
        assert!(csv.contains("T2,\"Says \"\"hi\"\", then\ncrashes\",Low,Open,"));
    }

    #[test]
    fn test_multiline_field_round_trips() {
        let original = "comma, \"quote\" and\r\nnewline";
        let ticket = TicketBuilder::new().id("T3").description(original).build().unwrap();

        let parsed = rows(&encode(&[ticket]));
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].line, 2);
        assert_eq!(parsed[0].ticket.as_ref().unwrap().description(), original);
    }

    #[test]
    fn test_line_numbers_follow_physical_lines() {
        let content = "Id,Description,Priority,Status,DateCreated\n\
                       T1,\"two\nlines\",Low,Open,2024-01-01T00:00:00Z\n\
                       \n\
                       T2,bad,Low,Open\n";
        let parsed = rows(content);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].line, 2);
        assert!(parsed[0].ticket.is_ok());
        assert_eq!(parsed[1].line, 5);
        assert_eq!(
            parsed[1].ticket.as_ref().unwrap_err().to_string(),
            "Expected 5 columns, found 4."
        );
    }

    #[test]
    fn test_blank_and_whitespace_lines_are_ignored() {
        let content = "header\n\n   \n\r\nT1,d,Low,Open,2024-01-01T00:00:00Z\n";
        let parsed = rows(content);
        assert_eq!(parsed.len(), 1);
        assert!(parsed[0].ticket.is_ok());
    }

    #[test]
    fn test_unterminated_quote_closes_at_end_of_input() {
        let content = "header\nT1,d,Low,Open,\"2024-01-01T00:00:00Z";
        let parsed = rows(content);
        assert_eq!(parsed.len(), 1);
        let ticket = parsed[0].ticket.as_ref().unwrap();
        assert_eq!(
            ticket.created_at(),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_row_level_failures() {
        let content = "header\n\
                       T1,d,Low,Open,yesterday\n\
                       T2,d,urgent,Open,2024-01-01T00:00:00Z\n\
                       ,d,Low,Open,2024-01-01T00:00:00Z\n";
        let parsed = rows(content);
        assert_eq!(parsed.len(), 3);
        assert!(matches!(
            parsed[0].ticket,
            Err(TicketDeskError::MalformedRow { .. })
        ));
        assert!(matches!(
            parsed[1].ticket,
            Err(TicketDeskError::Validation { field: "priority", .. })
        ));
        assert!(matches!(
            parsed[2].ticket,
            Err(TicketDeskError::Validation { field: "id", .. })
        ));
    }

    #[test]
    fn test_invalid_utf8_row_is_skipped_not_fatal() {
        let mut content = b"header\nT1,d,Low,Open,2024-01-01T00:00:00Z\n".to_vec();
        content.extend_from_slice(b"T2,\xFF\xFE,Low,Open,2024-01-01T00:00:00Z\n");
        content.extend_from_slice(b"T3,d,Low,Open,2024-01-01T00:00:00Z\n");

        let body = split_header(&content).unwrap();
        let parsed = parse_rows(body);
        assert_eq!(parsed.len(), 3);
        assert!(parsed[0].ticket.is_ok());
        assert!(parsed[1].ticket.is_err());
        assert!(parsed[2].ticket.is_ok());
    }

    #[test]
    fn test_stray_quote_costs_only_its_own_row() {
        let content = "Id,Description,Priority,Status,DateCreated\n\
                       T1,One,Low,Open,2024-01-01T00:00:00Z\n\
                       T2,\"oops,Low,Open,2024-01-01T00:00:00Z\n\
                       T3,Three,Low,Open,2024-01-01T00:00:00Z\n\
                       T4,Four,High,Closed,2024-01-01T00:00:00Z\n\
                       T5,Five,Medium,In Progress,2024-01-01T00:00:00Z\n";
        let parsed = rows(content);

        let lines: Vec<_> = parsed.iter().map(|row| row.line).collect();
        assert_eq!(lines, vec![2, 3, 4, 5, 6]);
        assert_eq!(
            parsed[1].ticket.as_ref().unwrap_err().to_string(),
            "Expected 5 columns, found 2."
        );
        let ids: Vec<_> = parsed
            .iter()
            .filter_map(|row| row.ticket.as_ref().ok())
            .map(|ticket| ticket.id().as_str().to_string())
            .collect();
        assert_eq!(ids, vec!["T1", "T3", "T4", "T5"]);
    }

    #[test]
    fn test_empty_quoted_line_is_a_row() {
        let content = "header\n\"\"\nT1,d,Low,Open,2024-01-01T00:00:00Z\n";
        let parsed = rows(content);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].line, 2);
        assert_eq!(
            parsed[0].ticket.as_ref().unwrap_err().to_string(),
            "Expected 5 columns, found 1."
        );
        assert!(parsed[1].ticket.is_ok());
    }

    #[test]
    fn test_lone_carriage_returns_end_lines() {
        let content = "header\nT1,d,Low,Open,2024-01-01T00:00:00Z\rT2,bad\r\
                       T3,d,Low,Open,2024-01-01T00:00:00Z\r";
        let parsed = rows(content);
        let lines: Vec<_> = parsed.iter().map(|row| row.line).collect();
        assert_eq!(lines, vec![2, 3, 4]);
        assert!(parsed[0].ticket.is_ok());
        assert!(parsed[1].ticket.is_err());
        assert!(parsed[2].ticket.is_ok());
    }

    #[test]
    fn test_split_header() {
        assert!(split_header(b"").is_none());
        assert!(split_header(UTF8_BOM).is_none());
        assert_eq!(split_header(b"Id,Description"), Some(&b""[..]));
        assert_eq!(split_header(b"\xEF\xBB\xBFh\nrow"), Some(&b"row"[..]));
        assert_eq!(split_header(b"h\r\nrow"), Some(&b"row"[..]));
        assert_eq!(split_header(b"h\rrow"), Some(&b"row"[..]));
    }

    #[test]
    fn test_parse_timestamp_forms() {
        let expected = Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-02-29T12:00:00Z").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-02-29T14:00:00+02:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-02-29T12:00:00.0000000Z").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-02-29T12:00:00").unwrap(), expected);
        assert!(parse_timestamp("29/02/2024").is_err());
    }

    #[test]
    fn test_timestamp_round_trip_keeps_nanoseconds() {
        let now = Utc::now();
        assert_eq!(parse_timestamp(&format_timestamp(now)).unwrap(), now);
    }

    #[test]
    fn test_load_report_summary() {
        let report = LoadReport {
            loaded: 3,
            skipped: vec![SkippedRow {
                line: 4,
                error: TicketDeskError::malformed("Expected 5 columns, found 2."),
            }],
        };
        assert_eq!(report.to_string(), "Load complete. Loaded: 3, Skipped: 1.");
        assert_eq!(
            report.skipped[0].to_string(),
            "Skipped line 4: Expected 5 columns, found 2."
        );
        assert_eq!(report.to_json()["skipped"], 1);
    }
}
