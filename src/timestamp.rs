//! Build timestamp rendering
//!
//! Included by `build.rs` with `#[path]`, and compiled into the library only
//! for its tests.

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Splits a unix timestamp into `Mmm dd yyyy` (day padded with a space) and
/// `hh:mm:ss`, UTC
pub fn format_timestamp(epoch: u64) -> (String, String) {
    let days = (epoch / 86_400) as i64;
    let secs = epoch % 86_400;
    let (year, month, day) = civil_from_days(days);

    let date = format!("{} {:>2} {}", MONTHS[(month - 1) as usize], day, year);
    let time = format!(
        "{:02}:{:02}:{:02}",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    );

    (date, time)
}

/// Days since 1970-01-01 to a proleptic Gregorian `(year, month, day)`
pub fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);

    (year, month, day)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn epoch_start() {
        assert_eq!(civil_from_days(0), (1970, 1, 1));
        assert_eq!(
            format_timestamp(0),
            ("Jan  1 1970".to_string(), "00:00:00".to_string())
        );
    }

    #[test]
    fn leap_days() {
        // 2000-02-29 and 2024-02-29
        assert_eq!(civil_from_days(11_016), (2000, 2, 29));
        assert_eq!(civil_from_days(19_782), (2024, 2, 29));
        // 2100 is not a leap year
        assert_eq!(civil_from_days(47_540), (2100, 2, 28));
        assert_eq!(civil_from_days(47_541), (2100, 3, 1));
    }

    #[test]
    fn date_and_time_layout() {
        // 2024-01-01 00:00:00
        assert_eq!(
            format_timestamp(1_704_067_200),
            ("Jan  1 2024".to_string(), "00:00:00".to_string())
        );
        // 2023-12-31 23:59:59
        assert_eq!(
            format_timestamp(1_704_067_199),
            ("Dec 31 2023".to_string(), "23:59:59".to_string())
        );
        // 2024-10-16 09:05:03
        assert_eq!(
            format_timestamp(1_729_069_503),
            ("Oct 16 2024".to_string(), "09:05:03".to_string())
        );
    }
}
