use super::model::SampleSeries;

/// Elapsed seconds between the earliest and latest valid timestamp.
///
/// Timestamps of `0` mark malformed entries and are ignored; a series
/// without any valid timestamp has zero duration.
pub fn experiment_duration(series: &SampleSeries) -> u32 {
    let valid = series.timestamps().into_iter().filter(|&t| t > 0);

    let (min, max) = valid.fold((None, None), |(min, max): (Option<u32>, Option<u32>), t| {
        (
            Some(min.map_or(t, |m| m.min(t))),
            Some(max.map_or(t, |m| m.max(t))),
        )
    });

    match (min, max) {
        (Some(min), Some(max)) => max - min,
        _ => 0,
    }
}

/// `HH:MM:SS`, hours are not wrapped at a day.
pub fn format_hms(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

pub fn duration_label(series: &SampleSeries) -> String {
    format_hms(experiment_duration(series))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_lines;

    #[test]
    fn empty_series_is_zero() {
        assert_eq!(duration_label(&SampleSeries::default()), "00:00:00");
    }

    #[test]
    fn all_zero_timestamps_is_zero() {
        let series = parse_lines(["00:00:00 1 1", "bad 1 1", "1:2 1 1"]).unwrap();
        assert_eq!(duration_label(&series), "00:00:00");
    }

    #[test]
    fn one_second_to_one_minute() {
        let series = parse_lines(["00:00:01 1 1", "00:01:00 1 1"]).unwrap();
        assert_eq!(duration_label(&series), "00:00:59");
    }

    #[test]
    fn order_of_lines_does_not_matter() {
        let series = parse_lines(["02:00:00 1 1", "00:30:15 1 1", "bad 1 1", "01:00:00 1 1"]).unwrap();
        assert_eq!(experiment_duration(&series), 5385);
        assert_eq!(duration_label(&series), "01:29:45");
    }

    #[test]
    fn hours_are_not_wrapped() {
        assert_eq!(format_hms(25 * 3600 + 61), "25:01:01");
    }
}
