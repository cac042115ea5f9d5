// ChatScribe - core/stamp.rs
//
// Timestamp prefixes for transcript records. The clock value is a parameter
// so record formatting is deterministic under test.

use chrono::{DateTime, Local};

/// Format the `[..]  ` prefix written before each transcript record.
///
/// Four shapes, matching the historical transcript format other tools
/// already parse (two trailing spaces included):
///
/// ```text
/// [2024/01/15 14:30:22]  with_date, with_seconds
/// [2024/01/15 14:30]     with_date
/// [14:30:22]             with_seconds
/// [14:30]                neither
/// ```
pub fn stamp(now: DateTime<Local>, with_date: bool, with_seconds: bool) -> String {
    let format = match (with_date, with_seconds) {
        (true, true) => "%Y/%m/%d %H:%M:%S",
        (true, false) => "%Y/%m/%d %H:%M",
        (false, true) => "%H:%M:%S",
        (false, false) => "%H:%M",
    };
    format!("[{}]  ", now.format(format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 15, 14, 30, 22).unwrap()
    }

    #[test]
    fn test_stamp_with_date_and_seconds() {
        assert_eq!(stamp(fixed_now(), true, true), "[2024/01/15 14:30:22]  ");
    }

    #[test]
    fn test_stamp_with_date_only() {
        assert_eq!(stamp(fixed_now(), true, false), "[2024/01/15 14:30]  ");
    }

    #[test]
    fn test_stamp_time_with_seconds() {
        assert_eq!(stamp(fixed_now(), false, true), "[14:30:22]  ");
    }

    #[test]
    fn test_stamp_time_only() {
        assert_eq!(stamp(fixed_now(), false, false), "[14:30]  ");
    }

    #[test]
    fn test_stamp_zero_pads() {
        let now = Local.with_ymd_and_hms(2024, 3, 5, 7, 8, 9).unwrap();
        assert_eq!(stamp(now, true, true), "[2024/03/05 07:08:09]  ");
    }
}
