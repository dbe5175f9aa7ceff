//! Issue-date formatting for the invoice summary.

use chrono::{NaiveDate, NaiveDateTime};

/// Parse an ISO-8601 date or datetime string.
///
/// CFDI stamps carry `Fecha="2022-01-06T10:21:33"`; a bare date is also
/// accepted.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(datetime.date());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Render a date in long-form Mexican Spanish, e.g. "6 de enero de 2022".
pub fn format_long_es_mx(date: NaiveDate) -> String {
    use chrono::Datelike;
    format!(
        "{} de {} de {}",
        date.day(),
        spanish_month(date.month()),
        date.year()
    )
}

fn spanish_month(month: u32) -> &'static str {
    match month {
        1 => "enero",
        2 => "febrero",
        3 => "marzo",
        4 => "abril",
        5 => "mayo",
        6 => "junio",
        7 => "julio",
        8 => "agosto",
        9 => "septiembre",
        10 => "octubre",
        11 => "noviembre",
        _ => "diciembre",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_iso_datetime() {
        let date = parse_iso_date("2022-01-06T10:21:33").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2022, 1, 6).unwrap());
    }

    #[test]
    fn test_parse_iso_date() {
        let date = parse_iso_date("2022-01-06").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2022, 1, 6).unwrap());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_iso_date("06/01/2022").is_none());
        assert!(parse_iso_date("").is_none());
    }

    #[test]
    fn test_format_long_es_mx() {
        let date = NaiveDate::from_ymd_opt(2022, 1, 6).unwrap();
        assert_eq!(format_long_es_mx(date), "6 de enero de 2022");

        let date = NaiveDate::from_ymd_opt(2023, 12, 25).unwrap();
        assert_eq!(format_long_es_mx(date), "25 de diciembre de 2023");
    }
}
