//! Shared utility functions for SurfsUp crates.

/// Date utility functions
pub mod dates {
    use chrono::{Months, NaiveDate};

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")?)
    }

    /// The same calendar day one year earlier.
    ///
    /// Feb 29 maps to Feb 28 of the previous year.
    pub fn one_year_before(date: &NaiveDate) -> NaiveDate {
        date.checked_sub_months(Months::new(12))
            .unwrap_or(NaiveDate::MIN)
    }

    /// First day of the trailing one-year window ending at `most_recent`
    /// (a "YYYY-MM-DD" string), formatted the same way.
    pub fn trailing_year_start(most_recent: &str) -> anyhow::Result<String> {
        let latest = parse_date(most_recent)
            .map_err(|e| anyhow::anyhow!("invalid most recent date {:?}: {}", most_recent, e))?;
        Ok(format_date(&one_year_before(&latest)))
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::NaiveDate;

        #[test]
        fn test_one_year_before() {
            let d = NaiveDate::from_ymd_opt(2017, 8, 23).unwrap();
            assert_eq!(
                one_year_before(&d),
                NaiveDate::from_ymd_opt(2016, 8, 23).unwrap()
            );
        }

        #[test]
        fn test_one_year_before_leap_day() {
            let leap = NaiveDate::from_ymd_opt(2016, 2, 29).unwrap();
            assert_eq!(
                one_year_before(&leap),
                NaiveDate::from_ymd_opt(2015, 2, 28).unwrap()
            );

            // Leap day in the result year is reachable only from Feb 29.
            let mar1 = NaiveDate::from_ymd_opt(2017, 3, 1).unwrap();
            assert_eq!(
                one_year_before(&mar1),
                NaiveDate::from_ymd_opt(2016, 3, 1).unwrap()
            );
        }

        #[test]
        fn test_trailing_year_start() {
            assert_eq!(trailing_year_start("2017-08-23").unwrap(), "2016-08-23");
            assert_eq!(trailing_year_start("2020-02-29").unwrap(), "2019-02-28");
            assert_eq!(trailing_year_start("2010-01-01").unwrap(), "2009-01-01");
        }

        #[test]
        fn test_trailing_year_start_rejects_garbage() {
            assert!(trailing_year_start("not-a-date").is_err());
            assert!(trailing_year_start("2017-02-30").is_err());
        }

        #[test]
        fn test_format_and_parse() {
            let date = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
            let formatted = format_date(&date);
            assert_eq!(formatted, "2023-06-15");
            let parsed = parse_date(&formatted).unwrap();
            assert_eq!(parsed, date);
        }
    }
}
