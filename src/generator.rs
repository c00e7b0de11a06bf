//! Skeleton to pattern: orders the requested fields the way a locale writes them.

use crate::data::{self, SkeletonShapes};
use crate::skeleton::Skeleton;
use crate::types::Locale;
use std::iter;

/// Turns a skeleton into the locale's preferred literal pattern.
pub trait PatternGenerator {
    fn best_pattern(&self, skeleton: &Skeleton) -> String;
}

/// Assembles patterns from a locale's [`SkeletonShapes`].
///
/// Date fields are placed into the locale's year/month/day shapes, the time
/// is written hour first, and the two halves are joined with the locale's
/// glue. Letters it has no place for are appended as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasicPatternGenerator {
    shapes: SkeletonShapes,
}

impl BasicPatternGenerator {
    pub const fn new(shapes: SkeletonShapes) -> Self {
        Self { shapes }
    }

    /// Shapes of `locale` or its nearest ancestor with data
    pub fn for_locale(locale: &Locale) -> Self {
        let data = data::lookup(locale).unwrap_or_else(data::root_data);
        Self::new(data.shapes)
    }

    pub const fn shapes(&self) -> &SkeletonShapes {
        &self.shapes
    }

    fn date_pattern(&self, requested: &mut Requested) -> String {
        let shapes = &self.shapes;
        let year = requested.take(&['y', 'Y', 'u', 'U']);
        let has_year = year.is_some();

        let mut pattern = if let Some(quarter) = requested.take(&['Q', 'q']) {
            if has_year {
                shapes.year_quarter.replace("{Q}", &run(quarter))
            } else {
                run(quarter)
            }
        } else {
            let month = requested.take(&['M', 'L']);
            let day = requested.take(&['d']).is_some();
            let text = month.is_some_and(|(_, count)| count >= 3);
            let pick = |text_shape: &str, numeric_shape: &str| {
                let shape = if text { text_shape } else { numeric_shape };
                shape.replace("{M}", &month.map(run).unwrap_or_default())
            };
            match (year, month, day) {
                (Some(_), Some(_), true) => pick(shapes.ymd_text, shapes.ymd_numeric),
                (Some(_), Some(_), false) => pick(shapes.year_month_text, shapes.year_month_numeric),
                (None, Some(_), true) => pick(shapes.month_day_text, shapes.month_day_numeric),
                (None, Some(month), false) => run(month),
                (Some(year), None, true) => format!("{} d", run(year)),
                (Some(year), None, false) => run(year),
                (None, None, true) => "d".to_owned(),
                (None, None, false) => String::new(),
            }
        };

        if let Some(weekday) = requested.take(&['E', 'c', 'e']) {
            pattern = if pattern.is_empty() {
                run(weekday)
            } else {
                shapes.weekday.replace("{E}", &run(weekday)).replace("{0}", &pattern)
            };
        }
        if let Some(era) = requested.take(&['G']) {
            pattern = join(pattern, &run(era));
        }
        pattern
    }

    fn time_pattern(&self, requested: &mut Requested) -> String {
        let hour = requested.take(&['j', 'H', 'h', 'k', 'K']).map(|(letter, count)| {
            match letter {
                'j' => (self.shapes.hour_cycle.pattern_char(), count),
                other => (other, count),
            }
        });
        let minute = requested.take(&['m']);
        let second = requested.take(&['s']);
        let fraction = if second.is_some() { requested.take(&['S']) } else { None };
        let period = requested.take(&['a']);
        let zone = requested.take(&['z', 'Z', 'v', 'V', 'O', 'X', 'x']);

        let mut pattern = String::new();
        if let Some((letter, count)) = hour {
            // 24-hour clocks are written two-digit
            let count = if matches!(letter, 'H' | 'k') { count.max(2) } else { count };
            pattern.push_str(&run((letter, count)));
        }
        if let Some((letter, count)) = minute {
            // a bare minute stays as requested unless seconds follow
            let count = if hour.is_some() || second.is_some() { 2 } else { count };
            pattern = join_time(pattern, &run((letter, count)));
        }
        if let Some((letter, count)) = second {
            let count = if pattern.is_empty() { count } else { 2 };
            pattern = join_time(pattern, &run((letter, count)));
        }
        if let Some(fraction) = fraction {
            pattern.push('.');
            pattern.push_str(&run(fraction));
        }
        if hour.is_some_and(|(letter, _)| matches!(letter, 'h' | 'K')) {
            pattern = join(pattern, &run(period.unwrap_or(('a', 1))));
        }
        if let Some(zone) = zone {
            pattern = join(pattern, &run(zone));
        }
        pattern
    }
}

impl PatternGenerator for BasicPatternGenerator {
    fn best_pattern(&self, skeleton: &Skeleton) -> String {
        let mut requested = Requested::new(skeleton.as_str());
        let date = self.date_pattern(&mut requested);
        let time = self.time_pattern(&mut requested);

        let mut pattern = match (date.is_empty(), time.is_empty()) {
            (false, false) => data::glue(self.shapes.glue, &date, &time),
            (false, true) => date,
            (true, _) => time,
        };
        for unknown in requested.runs {
            pattern = join(pattern, &run(unknown));
        }
        pattern
    }
}

/// Letter runs of a skeleton not yet placed in the pattern
#[derive(Debug)]
struct Requested {
    runs: Vec<(char, usize)>,
}

impl Requested {
    fn new(skeleton: &str) -> Self {
        let mut runs: Vec<(char, usize)> = Vec::new();
        for letter in skeleton.chars().filter(char::is_ascii_alphabetic) {
            match runs.iter_mut().find(|(seen, _)| *seen == letter) {
                Some((_, count)) => *count += 1,
                None => runs.push((letter, 1)),
            }
        }
        Self { runs }
    }

    /// Removes and returns the first run of any of `letters`
    fn take(&mut self, letters: &[char]) -> Option<(char, usize)> {
        let index = self.runs.iter().position(|(letter, _)| letters.contains(letter))?;
        Some(self.runs.remove(index))
    }
}

fn run((letter, count): (char, usize)) -> String {
    iter::repeat_n(letter, count).collect()
}

fn join_time(mut pattern: String, part: &str) -> String {
    if !pattern.is_empty() {
        pattern.push(':');
    }
    pattern.push_str(part);
    pattern
}

fn join(mut pattern: String, part: &str) -> String {
    if !pattern.is_empty() {
        pattern.push(' ');
    }
    pattern.push_str(part);
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skeleton;

    fn best(tag: &str, skeleton: &str) -> String {
        BasicPatternGenerator::for_locale(&Locale::from(tag)).best_pattern(&Skeleton::from(skeleton))
    }

    #[test]
    fn test_date_skeletons_en() {
        assert_eq!(best("en_US", skeleton::YEAR_ABBR_MONTH_DAY), "MMM d, y");
        assert_eq!(best("en_US", skeleton::YEAR_NUM_MONTH_DAY), "M/d/y");
        assert_eq!(best("en_US", skeleton::YEAR_MONTH_WEEKDAY_DAY), "EEEE, MMMM d, y");
        assert_eq!(best("en_US", skeleton::ABBR_MONTH_WEEKDAY_DAY), "E, MMM d");
        assert_eq!(best("en_US", skeleton::YEAR_ABBR_QUARTER), "QQQ y");
        assert_eq!(best("en_US", skeleton::STANDALONE_MONTH), "LLLL");
        assert_eq!(best("en_US", skeleton::YEAR), "y");
        assert_eq!(best("en_US", skeleton::DAY), "d");
    }

    #[test]
    fn test_date_skeletons_other_locales() {
        assert_eq!(best("de", skeleton::YEAR_MONTH_DAY), "d. MMMM y");
        assert_eq!(best("fr_FR", skeleton::ABBR_MONTH_DAY), "d MMM");
        assert_eq!(best("ja", skeleton::YEAR_NUM_MONTH_DAY), "y/M/d");
        assert_eq!(best("ja", skeleton::YEAR_NUM_MONTH_WEEKDAY_DAY), "y/M/d(E)");
    }

    #[test]
    fn test_hour_cycle() {
        assert_eq!(best("en", skeleton::HOUR_MINUTE_SECOND), "h:mm:ss a");
        assert_eq!(best("de", skeleton::HOUR_MINUTE_SECOND), "HH:mm:ss");
        assert_eq!(best("en", skeleton::HOUR24_MINUTE), "HH:mm");
        assert_eq!(best("en", skeleton::MINUTE_SECOND), "mm:ss");
        assert_eq!(best("en", skeleton::HOUR_MINUTE_TZ), "h:mm a z");
        assert_eq!(best("de", skeleton::HOUR_GENERIC_TZ), "HH v");
    }

    #[test]
    fn test_date_and_time_are_glued() {
        assert_eq!(best("en", "yMMMdjm"), "MMM d, y, h:mm a");
        assert_eq!(best("fr", "yMMMdjm"), "d MMM y HH:mm");
    }

    #[test]
    fn test_unknown_letters_carried_through() {
        assert_eq!(best("en", "yD"), "y D");
        assert_eq!(best("en", "b"), "b");
        assert_eq!(best("en", ""), "");
    }
}
