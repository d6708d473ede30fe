//! Parses date ranges pasted as text, e.g. "01/01/2024 - 05/01/2024".

use time::{
    Date,
    error::{Parse, ParseFromDescription},
    format_description::BorrowedFormatItem,
    macros::format_description,
};

use crate::date_range::DateRange;

/// The reasons pasted text could not be read as a date range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasteError {
    /// The text did not have the shape "DD/MM/YYYY - DD/MM/YYYY".
    #[error("\"{0}\" is not a date range of the form DD/MM/YYYY - DD/MM/YYYY")]
    InvalidFormat(String),

    /// The text had the right shape but named a day that does not exist.
    #[error("\"{0}\" is not a valid date")]
    InvalidDate(String),
}

/// Day-first date formats, one per accepted separator.
///
/// Day and month take one or two digits, the year takes four.
const DATE_FORMATS: [&[BorrowedFormatItem<'static>]; 3] = [
    format_description!("[day padding:none]/[month padding:none]/[year]"),
    format_description!("[day padding:none]-[month padding:none]-[year]"),
    format_description!("[day padding:none].[month padding:none].[year]"),
];

/// Text allowed between the two dates, ignoring surrounding whitespace.
const RANGE_SEPARATORS: [&str; 4] = ["-", "\u{2013}", "\u{2014}", "to"];

/// Parse `text` as two dates and return the range between them.
///
/// Surrounding whitespace is ignored and the dates may be given in either order.
///
/// # Errors
/// Returns [PasteError::InvalidFormat] if the text is not two day-first dates
/// separated by a dash or "to", and [PasteError::InvalidDate] if either date
/// does not exist, e.g. 32/01/2024.
pub fn parse_pasted_range(text: &str) -> Result<DateRange, PasteError> {
    let text = text.trim();
    let mut invalid_date = None;

    for separator in RANGE_SEPARATORS {
        for (index, _) in text.match_indices(separator) {
            let first = text[..index].trim();
            let second = text[index + separator.len()..].trim();

            match (parse_date(first), parse_date(second)) {
                (PastedDate::Valid(first), PastedDate::Valid(second)) => {
                    return Ok(DateRange::new(first, second));
                }
                (PastedDate::Malformed, _) | (_, PastedDate::Malformed) => {}
                (PastedDate::Invalid, _) => {
                    invalid_date.get_or_insert_with(|| PasteError::InvalidDate(first.to_owned()));
                }
                (_, PastedDate::Invalid) => {
                    invalid_date.get_or_insert_with(|| PasteError::InvalidDate(second.to_owned()));
                }
            }
        }
    }

    Err(invalid_date.unwrap_or_else(|| PasteError::InvalidFormat(text.to_owned())))
}

/// One side of a pasted range.
enum PastedDate {
    Valid(Date),
    /// Shaped like a date, but the day or month is out of range.
    Invalid,
    Malformed,
}

fn parse_date(text: &str) -> PastedDate {
    let mut result = PastedDate::Malformed;

    for format in DATE_FORMATS {
        match Date::parse(text, format) {
            Ok(date) => return PastedDate::Valid(date),
            Err(error) if is_out_of_range(&error) => result = PastedDate::Invalid,
            Err(_) => {}
        }
    }

    result
}

/// Whether `error` came from a day or month that does not exist, rather than
/// text that does not match the format.
fn is_out_of_range(error: &Parse) -> bool {
    matches!(
        error,
        Parse::TryFromParsed(_)
            | Parse::ParseFromDescription(ParseFromDescription::InvalidComponent(_))
    )
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::date_range::DateRange;

    use super::{PasteError, parse_pasted_range};

    #[test]
    fn parses_day_first_range() {
        let got = parse_pasted_range("01/01/2024 - 05/01/2024");

        assert_eq!(
            got,
            Ok(DateRange::new(date!(2024 - 01 - 01), date!(2024 - 01 - 05)))
        );
    }

    #[test]
    fn ignores_surrounding_whitespace() {
        let got = parse_pasted_range("  \t01/01/2024 - 05/01/2024\n");

        assert_eq!(
            got,
            Ok(DateRange::new(date!(2024 - 01 - 01), date!(2024 - 01 - 05)))
        );
    }

    #[test]
    fn orders_reversed_dates() {
        let got = parse_pasted_range("05/01/2024 - 01/01/2024");

        assert_eq!(
            got,
            Ok(DateRange::new(date!(2024 - 01 - 01), date!(2024 - 01 - 05)))
        );
    }

    #[test]
    fn accepts_other_separators() {
        let want = Ok(DateRange::new(date!(2024 - 02 - 03), date!(2024 - 03 - 04)));

        assert_eq!(parse_pasted_range("03-02-2024 - 04-03-2024"), want);
        assert_eq!(parse_pasted_range("03.02.2024 - 04.03.2024"), want);
        assert_eq!(parse_pasted_range("03/02/2024\u{2013}04/03/2024"), want);
        assert_eq!(parse_pasted_range("03/02/2024 to 04/03/2024"), want);
        assert_eq!(parse_pasted_range("3/2/2024-4/3/2024"), want);
    }

    #[test]
    fn rejects_text_that_is_not_a_date() {
        assert_eq!(
            parse_pasted_range("not-a-date"),
            Err(PasteError::InvalidFormat("not-a-date".to_owned()))
        );
    }

    #[test]
    fn rejects_empty_text() {
        assert!(parse_pasted_range("").is_err());
        assert!(parse_pasted_range("   ").is_err());
    }

    #[test]
    fn rejects_invalid_day() {
        assert_eq!(
            parse_pasted_range("32/01/2024 - 05/01/2024"),
            Err(PasteError::InvalidDate("32/01/2024".to_owned()))
        );
    }

    #[test]
    fn rejects_invalid_month_and_leap_day() {
        assert_eq!(
            parse_pasted_range("01/13/2024 - 05/01/2024"),
            Err(PasteError::InvalidDate("01/13/2024".to_owned()))
        );
        assert_eq!(
            parse_pasted_range("01/01/2023 - 29/02/2023"),
            Err(PasteError::InvalidDate("29/02/2023".to_owned()))
        );
        assert_eq!(
            parse_pasted_range("0/01/2024 - 05/01/2024"),
            Err(PasteError::InvalidDate("0/01/2024".to_owned()))
        );
    }

    #[test]
    fn rejects_mixed_or_missing_separators() {
        assert!(parse_pasted_range("01/01-2024 - 05/01/2024").is_err());
        assert!(parse_pasted_range("01/01/2024 05/01/2024").is_err());
        assert!(parse_pasted_range("01/01/2024 + 05/01/2024").is_err());
        assert!(parse_pasted_range("01/01/24 - 05/01/24").is_err());
        assert!(parse_pasted_range("01/01/2024").is_err());
        assert!(parse_pasted_range("001/01/2024 - 05/01/2024").is_err());
    }

    #[test]
    fn accepts_em_dash_and_padded_days() {
        assert_eq!(
            parse_pasted_range("01/01/2024\u{2014}5/1/2024"),
            Ok(DateRange::new(date!(2024 - 01 - 01), date!(2024 - 01 - 05)))
        );
    }
}
