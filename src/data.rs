//! Embedded locale data: style patterns, names, week rules and skeleton shapes.
//!
//! Lookups walk the locale parent chain (`de_AT` → `de` → `root`). Running
//! off the end of the chain is the "data entirely missing" case that callers
//! recover from.

use crate::format::PatternError;
use crate::style::{Style, StylePair};
use crate::types::Locale;

/// Error type for locale data lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocaleDataError {
    /// No locale in the fallback chain carries the resource.
    #[error("No {resource} data for locale {locale}")]
    Missing {
        resource: &'static str,
        locale:   String,
    },

    /// The data exists but its pattern cannot be used.
    #[error("Malformed pattern in {locale} data")]
    Malformed {
        locale: String,
        #[source]
        source: PatternError,
    },
}

/// Style-level patterns for one calendar system in one locale.
///
/// Arrays are indexed by [`Style::index`]: full, long, medium, short.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StylePatterns {
    pub date: [&'static str; 4],
    pub time: [&'static str; 4],
    /// Date-time glue per date style; `{1}` is the date, `{0}` the time
    pub glue: [&'static str; 4],
}

impl StylePatterns {
    /// Literal pattern for a style selection
    pub fn compose(&self, styles: StylePair) -> String {
        match styles {
            StylePair::Date(date) => self.date[date.index()].to_owned(),
            StylePair::Time(time) => self.time[time.index()].to_owned(),
            StylePair::DateTime(date, time) => {
                glue(self.glue[date.index()], self.date[date.index()], self.time[time.index()])
            }
        }
    }

    /// Pattern for the date part at `style`
    pub fn date_pattern(&self, style: Style) -> &'static str {
        self.date[style.index()]
    }

    /// Pattern for the time part at `style`
    pub fn time_pattern(&self, style: Style) -> &'static str {
        self.time[style.index()]
    }

    /// Glue used when the date part has `style`
    pub fn glue_pattern(&self, style: Style) -> &'static str {
        self.glue[style.index()]
    }
}

/// Substitutes `date` for `{1}` and `time` for `{0}` in a glue pattern
pub fn glue(glue: &str, date: &str, time: &str) -> String {
    glue.replace("{1}", date).replace("{0}", time)
}

/// Wide, abbreviated and narrow names for one kind of symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Names<const N: usize> {
    pub wide:        [&'static str; N],
    pub abbreviated: [&'static str; N],
    pub narrow:      [&'static str; N],
}

impl<const N: usize> Names<N> {
    /// Names for a pattern letter count: 4 is wide, 5 is narrow, otherwise abbreviated
    pub const fn for_count(&self, count: usize) -> &[&'static str; N] {
        match count {
            4 => &self.wide,
            5 => &self.narrow,
            _ => &self.abbreviated,
        }
    }
}

/// Era names of one calendar system; the count differs between systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EraNames {
    pub wide:        &'static [&'static str],
    pub abbreviated: &'static [&'static str],
    pub narrow:      &'static [&'static str],
}

impl EraNames {
    pub const fn for_count(&self, count: usize) -> &'static [&'static str] {
        match count {
            4 => self.wide,
            5 => self.narrow,
            _ => self.abbreviated,
        }
    }
}

impl<const N: usize> From<&'static Names<N>> for EraNames {
    fn from(names: &'static Names<N>) -> Self {
        Self {
            wide:        &names.wide,
            abbreviated: &names.abbreviated,
            narrow:      &names.narrow,
        }
    }
}

/// The names a pattern formatter renders with: a locale's data plus the
/// eras of the calendar system in use.
#[derive(Debug, Clone, Copy)]
pub struct DateSymbols {
    data: &'static LocaleData,
    eras: EraNames,
}

impl DateSymbols {
    pub const fn new(data: &'static LocaleData, eras: EraNames) -> Self {
        Self { data, eras }
    }

    pub const fn data(&self) -> &'static LocaleData {
        self.data
    }

    pub const fn eras(&self) -> EraNames {
        self.eras
    }

    /// Tag of the locale the names come from
    pub const fn tag(&self) -> &'static str {
        self.data.tag
    }
}

/// Whether a locale prefers 12- or 24-hour clocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HourCycle {
    H12,
    H23,
}

impl HourCycle {
    /// Pattern letter for this cycle
    pub const fn pattern_char(self) -> char {
        match self {
            Self::H12 => 'h',
            Self::H23 => 'H',
        }
    }
}

/// Per-locale building blocks the pattern generator assembles skeletons from.
///
/// `{M}` stands for the month run, `{E}` for the weekday run, `{Q}` for the
/// quarter run and `{0}` for the rest of the pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkeletonShapes {
    pub hour_cycle:         HourCycle,
    pub year_month_numeric: &'static str,
    pub year_month_text:    &'static str,
    pub month_day_numeric:  &'static str,
    pub month_day_text:     &'static str,
    pub ymd_numeric:        &'static str,
    pub ymd_text:           &'static str,
    pub weekday:            &'static str,
    pub year_quarter:       &'static str,
    pub glue:               &'static str,
}

/// Everything the crate knows about one locale.
#[derive(Debug)]
pub struct LocaleData {
    pub tag:               &'static str,
    pub first_day_of_week: i32,
    pub minimal_days:      i32,
    pub gregorian:         StylePatterns,
    pub buddhist:          Option<StylePatterns>,
    pub months:            Names<12>,
    /// Sunday first
    pub weekdays:          Names<7>,
    pub am_pm:             [&'static str; 2],
    pub eras:              Names<2>,
    pub buddhist_eras:     Names<1>,
    pub quarters:          Names<4>,
    pub gmt_zero:          &'static str,
    pub gmt_prefix:        &'static str,
    /// Day offset from today and its phrase
    pub relative_days:     &'static [(i32, &'static str)],
    pub shapes:            SkeletonShapes,
}

impl LocaleData {
    /// Phrase for a day offset, if the locale names it
    pub fn relative_day(&self, offset: i32) -> Option<&'static str> {
        self.relative_days
            .iter()
            .find(|(days, _)| *days == offset)
            .map(|(_, phrase)| *phrase)
    }
}

/// Finds the data for `locale` or its nearest ancestor.
///
/// Returns `None` only when no locale in the chain, root included, ships data.
pub fn lookup(locale: &Locale) -> Option<&'static LocaleData> {
    lookup_in(LOCALES, locale)
}

/// Like [`lookup`] but over an explicit table
pub fn lookup_in(table: &'static [LocaleData], locale: &Locale) -> Option<&'static LocaleData> {
    std::iter::successors(Some(locale.without_keywords()), Locale::parent).find_map(|candidate| {
        let tag = candidate.base_name();
        table.iter().find(|data| data.tag == tag)
    })
}

/// The root locale's data, the end of every fallback chain
pub fn root_data() -> &'static LocaleData {
    &LOCALES[0]
}

/// Tags of the locales that ship data
pub fn available_locales() -> impl Iterator<Item = Locale> {
    LOCALES.iter().map(|data| Locale::from(data.tag))
}

/// Nearest data in the chain that carries a Buddhist pattern table
pub fn lookup_buddhist(locale: &Locale) -> Option<(&'static LocaleData, StylePatterns)> {
    std::iter::successors(Some(locale.without_keywords()), Locale::parent).find_map(|candidate| {
        let tag = candidate.base_name();
        LOCALES
            .iter()
            .find(|data| data.tag == tag)
            .and_then(|data| data.buddhist.map(|patterns| (data, patterns)))
    })
}

const NARROW_WEEKDAYS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];
const NUMERIC_QUARTERS: [&str; 4] = ["1", "2", "3", "4"];
const Q_QUARTERS: [&str; 4] = ["Q1", "Q2", "Q3", "Q4"];

// root first
static LOCALES: &[LocaleData] = &[
    LocaleData {
        tag:               "root",
        first_day_of_week: 2,
        minimal_days:      1,
        gregorian:         StylePatterns {
            date: ["y MMMM d, EEEE", "y MMMM d", "y MMM d", "y-MM-dd"],
            time: ["HH:mm:ss zzzz", "HH:mm:ss z", "HH:mm:ss", "HH:mm"],
            glue: ["{1} {0}", "{1} {0}", "{1} {0}", "{1} {0}"],
        },
        buddhist:          Some(StylePatterns {
            date: ["G y MMMM d, EEEE", "G y MMMM d", "G y MMM d", "GGGGG y-MM-dd"],
            time: ["HH:mm:ss zzzz", "HH:mm:ss z", "HH:mm:ss", "HH:mm"],
            glue: ["{1} {0}", "{1} {0}", "{1} {0}", "{1} {0}"],
        }),
        months:            Names {
            wide:        [
                "M01", "M02", "M03", "M04", "M05", "M06", "M07", "M08", "M09", "M10", "M11", "M12",
            ],
            abbreviated: [
                "M01", "M02", "M03", "M04", "M05", "M06", "M07", "M08", "M09", "M10", "M11", "M12",
            ],
            narrow:      ["1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12"],
        },
        weekdays:          Names {
            wide:        ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
            abbreviated: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
            narrow:      NARROW_WEEKDAYS,
        },
        am_pm:             ["AM", "PM"],
        eras:              Names {
            wide:        ["BCE", "CE"],
            abbreviated: ["BCE", "CE"],
            narrow:      ["BCE", "CE"],
        },
        buddhist_eras:     Names {
            wide:        ["BE"],
            abbreviated: ["BE"],
            narrow:      ["BE"],
        },
        quarters:          Names {
            wide:        Q_QUARTERS,
            abbreviated: Q_QUARTERS,
            narrow:      NUMERIC_QUARTERS,
        },
        gmt_zero:          "GMT",
        gmt_prefix:        "GMT",
        relative_days:     &[],
        shapes:            SkeletonShapes {
            hour_cycle:         HourCycle::H23,
            year_month_numeric: "y-MM",
            year_month_text:    "y {M}",
            month_day_numeric:  "MM-dd",
            month_day_text:     "{M} d",
            ymd_numeric:        "y-MM-dd",
            ymd_text:           "y {M} d",
            weekday:            "{0}, {E}",
            year_quarter:       "y {Q}",
            glue:               "{1} {0}",
        },
    },
    LocaleData {
        tag:               "en",
        first_day_of_week: 1,
        minimal_days:      1,
        gregorian:         StylePatterns {
            date: ["EEEE, MMMM d, y", "MMMM d, y", "MMM d, y", "M/d/yy"],
            time: ["h:mm:ss a zzzz", "h:mm:ss a z", "h:mm:ss a", "h:mm a"],
            glue: ["{1} 'at' {0}", "{1} 'at' {0}", "{1}, {0}", "{1}, {0}"],
        },
        buddhist:          Some(StylePatterns {
            date: ["EEEE, MMMM d, y G", "MMMM d, y G", "MMM d, y G", "M/d/y GGGGG"],
            time: ["h:mm:ss a zzzz", "h:mm:ss a z", "h:mm:ss a", "h:mm a"],
            glue: ["{1} 'at' {0}", "{1} 'at' {0}", "{1}, {0}", "{1}, {0}"],
        }),
        months:            Names {
            wide:        [
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ],
            abbreviated: [
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ],
            narrow:      ["J", "F", "M", "A", "M", "J", "J", "A", "S", "O", "N", "D"],
        },
        weekdays:          Names {
            wide:        [
                "Sunday",
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
            ],
            abbreviated: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
            narrow:      NARROW_WEEKDAYS,
        },
        am_pm:             ["AM", "PM"],
        eras:              Names {
            wide:        ["Before Christ", "Anno Domini"],
            abbreviated: ["BC", "AD"],
            narrow:      ["B", "A"],
        },
        buddhist_eras:     Names {
            wide:        ["BE"],
            abbreviated: ["BE"],
            narrow:      ["BE"],
        },
        quarters:          Names {
            wide:        ["1st quarter", "2nd quarter", "3rd quarter", "4th quarter"],
            abbreviated: Q_QUARTERS,
            narrow:      NUMERIC_QUARTERS,
        },
        gmt_zero:          "GMT",
        gmt_prefix:        "GMT",
        relative_days:     &[(-1, "Yesterday"), (0, "Today"), (1, "Tomorrow")],
        shapes:            SkeletonShapes {
            hour_cycle:         HourCycle::H12,
            year_month_numeric: "M/y",
            year_month_text:    "{M} y",
            month_day_numeric:  "M/d",
            month_day_text:     "{M} d",
            ymd_numeric:        "M/d/y",
            ymd_text:           "{M} d, y",
            weekday:            "{E}, {0}",
            year_quarter:       "{Q} y",
            glue:               "{1}, {0}",
        },
    },
    LocaleData {
        tag:               "de",
        first_day_of_week: 2,
        minimal_days:      4,
        gregorian:         StylePatterns {
            date: ["EEEE, d. MMMM y", "d. MMMM y", "dd.MM.y", "dd.MM.yy"],
            time: ["HH:mm:ss zzzz", "HH:mm:ss z", "HH:mm:ss", "HH:mm"],
            glue: ["{1} 'um' {0}", "{1} 'um' {0}", "{1}, {0}", "{1}, {0}"],
        },
        buddhist:          None,
        months:            Names {
            wide:        [
                "Januar",
                "Februar",
                "März",
                "April",
                "Mai",
                "Juni",
                "Juli",
                "August",
                "September",
                "Oktober",
                "November",
                "Dezember",
            ],
            abbreviated: [
                "Jan.", "Feb.", "März", "Apr.", "Mai", "Juni", "Juli", "Aug.", "Sept.", "Okt.",
                "Nov.", "Dez.",
            ],
            narrow:      ["J", "F", "M", "A", "M", "J", "J", "A", "S", "O", "N", "D"],
        },
        weekdays:          Names {
            wide:        [
                "Sonntag",
                "Montag",
                "Dienstag",
                "Mittwoch",
                "Donnerstag",
                "Freitag",
                "Samstag",
            ],
            abbreviated: ["So.", "Mo.", "Di.", "Mi.", "Do.", "Fr.", "Sa."],
            narrow:      ["S", "M", "D", "M", "D", "F", "S"],
        },
        am_pm:             ["AM", "PM"],
        eras:              Names {
            wide:        ["v. Chr.", "n. Chr."],
            abbreviated: ["v. Chr.", "n. Chr."],
            narrow:      ["v. Chr.", "n. Chr."],
        },
        buddhist_eras:     Names {
            wide:        ["BE"],
            abbreviated: ["BE"],
            narrow:      ["BE"],
        },
        quarters:          Names {
            wide:        ["1. Quartal", "2. Quartal", "3. Quartal", "4. Quartal"],
            abbreviated: Q_QUARTERS,
            narrow:      NUMERIC_QUARTERS,
        },
        gmt_zero:          "GMT",
        gmt_prefix:        "GMT",
        relative_days:     &[
            (-2, "Vorgestern"),
            (-1, "Gestern"),
            (0, "Heute"),
            (1, "Morgen"),
            (2, "Übermorgen"),
        ],
        shapes:            SkeletonShapes {
            hour_cycle:         HourCycle::H23,
            year_month_numeric: "M/y",
            year_month_text:    "{M} y",
            month_day_numeric:  "d.M.",
            month_day_text:     "d. {M}",
            ymd_numeric:        "d.M.y",
            ymd_text:           "d. {M} y",
            weekday:            "{E}, {0}",
            year_quarter:       "{Q} y",
            glue:               "{1}, {0}",
        },
    },
    LocaleData {
        tag:               "fr",
        first_day_of_week: 2,
        minimal_days:      4,
        gregorian:         StylePatterns {
            date: ["EEEE d MMMM y", "d MMMM y", "d MMM y", "dd/MM/y"],
            time: ["HH:mm:ss zzzz", "HH:mm:ss z", "HH:mm:ss", "HH:mm"],
            glue: ["{1} 'à' {0}", "{1} 'à' {0}", "{1} {0}", "{1} {0}"],
        },
        buddhist:          None,
        months:            Names {
            wide:        [
                "janvier",
                "février",
                "mars",
                "avril",
                "mai",
                "juin",
                "juillet",
                "août",
                "septembre",
                "octobre",
                "novembre",
                "décembre",
            ],
            abbreviated: [
                "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.",
                "nov.", "déc.",
            ],
            narrow:      ["J", "F", "M", "A", "M", "J", "J", "A", "S", "O", "N", "D"],
        },
        weekdays:          Names {
            wide:        [
                "dimanche", "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi",
            ],
            abbreviated: ["dim.", "lun.", "mar.", "mer.", "jeu.", "ven.", "sam."],
            narrow:      ["D", "L", "M", "M", "J", "V", "S"],
        },
        am_pm:             ["AM", "PM"],
        eras:              Names {
            wide:        ["avant Jésus-Christ", "après Jésus-Christ"],
            abbreviated: ["av. J.-C.", "ap. J.-C."],
            narrow:      ["av. J.-C.", "ap. J.-C."],
        },
        buddhist_eras:     Names {
            wide:        ["ère bouddhiste"],
            abbreviated: ["è. b."],
            narrow:      ["E.B."],
        },
        quarters:          Names {
            wide:        ["1er trimestre", "2e trimestre", "3e trimestre", "4e trimestre"],
            abbreviated: ["T1", "T2", "T3", "T4"],
            narrow:      NUMERIC_QUARTERS,
        },
        gmt_zero:          "UTC",
        gmt_prefix:        "UTC",
        relative_days:     &[
            (-2, "avant-hier"),
            (-1, "hier"),
            (0, "aujourd’hui"),
            (1, "demain"),
            (2, "après-demain"),
        ],
        shapes:            SkeletonShapes {
            hour_cycle:         HourCycle::H23,
            year_month_numeric: "MM/y",
            year_month_text:    "{M} y",
            month_day_numeric:  "dd/MM",
            month_day_text:     "d {M}",
            ymd_numeric:        "dd/MM/y",
            ymd_text:           "d {M} y",
            weekday:            "{E} {0}",
            year_quarter:       "{Q} y",
            glue:               "{1} {0}",
        },
    },
    LocaleData {
        tag:               "ja",
        first_day_of_week: 1,
        minimal_days:      1,
        gregorian:         StylePatterns {
            date: ["y年M月d日EEEE", "y年M月d日", "y/MM/dd", "y/MM/dd"],
            time: ["H時mm分ss秒 zzzz", "H:mm:ss z", "H:mm:ss", "H:mm"],
            glue: ["{1} {0}", "{1} {0}", "{1} {0}", "{1} {0}"],
        },
        buddhist:          Some(StylePatterns {
            date: ["GGGGy年M月d日EEEE", "GGGGy年M月d日", "Gy/MM/dd", "Gy/MM/dd"],
            time: ["H時mm分ss秒 zzzz", "H:mm:ss z", "H:mm:ss", "H:mm"],
            glue: ["{1} {0}", "{1} {0}", "{1} {0}", "{1} {0}"],
        }),
        months:            Names {
            wide:        [
                "1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月",
                "12月",
            ],
            abbreviated: [
                "1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月",
                "12月",
            ],
            narrow:      ["1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12"],
        },
        weekdays:          Names {
            wide:        [
                "日曜日", "月曜日", "火曜日", "水曜日", "木曜日", "金曜日", "土曜日",
            ],
            abbreviated: ["日", "月", "火", "水", "木", "金", "土"],
            narrow:      ["日", "月", "火", "水", "木", "金", "土"],
        },
        am_pm:             ["午前", "午後"],
        eras:              Names {
            wide:        ["紀元前", "西暦"],
            abbreviated: ["紀元前", "西暦"],
            narrow:      ["BC", "AD"],
        },
        buddhist_eras:     Names {
            wide:        ["仏暦"],
            abbreviated: ["仏暦"],
            narrow:      ["BE"],
        },
        quarters:          Names {
            wide:        ["第1四半期", "第2四半期", "第3四半期", "第4四半期"],
            abbreviated: Q_QUARTERS,
            narrow:      NUMERIC_QUARTERS,
        },
        gmt_zero:          "GMT",
        gmt_prefix:        "GMT",
        relative_days:     &[
            (-2, "一昨日"),
            (-1, "昨日"),
            (0, "今日"),
            (1, "明日"),
            (2, "明後日"),
        ],
        shapes:            SkeletonShapes {
            hour_cycle:         HourCycle::H23,
            year_month_numeric: "y/M",
            year_month_text:    "y年M月",
            month_day_numeric:  "M/d",
            month_day_text:     "M月d日",
            ymd_numeric:        "y/M/d",
            ymd_text:           "y年M月d日",
            weekday:            "{0}({E})",
            year_quarter:       "y/{Q}",
            glue:               "{1} {0}",
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_falls_back_to_parent() {
        let data = lookup(&Locale::from("en_US")).unwrap();
        assert_eq!(data.tag, "en");
        let data = lookup(&Locale::from("de_AT@calendar=buddhist")).unwrap();
        assert_eq!(data.tag, "de");
    }

    #[test]
    fn test_lookup_unknown_language_reaches_root() {
        let data = lookup(&Locale::from("xx_YY")).unwrap();
        assert_eq!(data.tag, "root");
        assert!(std::ptr::eq(data, root_data()));
    }

    #[test]
    fn test_lookup_in_empty_table_is_missing() {
        static EMPTY: &[LocaleData] = &[];
        assert!(lookup_in(EMPTY, &Locale::from("en_US")).is_none());
    }

    #[test]
    fn test_buddhist_lookup_skips_locales_without_table() {
        let (data, patterns) = lookup_buddhist(&Locale::from("de")).unwrap();
        assert_eq!(data.tag, "root");
        assert_eq!(patterns.date_pattern(Style::Medium), "G y MMM d");
    }

    #[test]
    fn test_compose() {
        let patterns = lookup(&Locale::from("en")).unwrap().gregorian;
        assert_eq!(patterns.compose(StylePair::Date(Style::Short)), "M/d/yy");
        assert_eq!(patterns.compose(StylePair::Time(Style::Short)), "h:mm a");
        assert_eq!(
            patterns.compose(StylePair::DateTime(Style::Medium, Style::Short)),
            "MMM d, y, h:mm a"
        );
        assert_eq!(
            patterns.compose(StylePair::DateTime(Style::Full, Style::Short)),
            "EEEE, MMMM d, y 'at' h:mm a"
        );
    }

    #[test]
    fn test_relative_day_phrases() {
        let data = lookup(&Locale::from("en")).unwrap();
        assert_eq!(data.relative_day(-1), Some("Yesterday"));
        assert_eq!(data.relative_day(2), None);
        assert!(lookup(&Locale::root()).unwrap().relative_day(0).is_none());
    }

    #[test]
    fn test_available_locales_include_root() {
        let tags: Vec<String> = available_locales().map(|l| l.to_string()).collect();
        assert!(tags.contains(&"root".to_owned()));
        assert!(tags.contains(&"ja".to_owned()));
    }
}
