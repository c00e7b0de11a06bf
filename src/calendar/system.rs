use crate::consts::BUDDHIST_ERA_OFFSET;
use crate::data::{self, DateSymbols, EraNames, LocaleDataError, StylePatterns};
use crate::types::Locale;
use std::fmt;

/// What distinguishes one solar calendar system from another: its pattern
/// table, era names and year numbering.
pub trait CalendarSystem: fmt::Debug + Send + Sync {
    fn calendar_type(&self) -> &'static str;

    /// Style patterns for `locale`, walking the parent chain.
    ///
    /// # Errors
    /// Returns `LocaleDataError::Missing` if no locale in the chain has a table.
    fn style_patterns(&self, locale: &Locale) -> Result<StylePatterns, LocaleDataError>;

    /// Names for `locale`, with this system's eras.
    ///
    /// # Errors
    /// Returns `LocaleDataError::Missing` if no locale in the chain has data.
    fn symbols(&self, locale: &Locale) -> Result<DateSymbols, LocaleDataError>;

    /// Era and year-of-era for a proleptic Gregorian year
    fn era_year(&self, extended_year: i32) -> (i32, i32);

    /// Proleptic Gregorian year for an era and year-of-era, saturating at the
    /// `i32` bounds
    fn extended_year(&self, era: i32, year: i32) -> i32;

    /// Era assumed when only a year is set
    fn default_era(&self) -> i32;

    /// Largest valid era value
    fn max_era(&self) -> i32;
}

fn missing(resource: &'static str, locale: &Locale) -> LocaleDataError {
    LocaleDataError::Missing {
        resource,
        locale: locale.to_string(),
    }
}

/// The proleptic Gregorian calendar with BC/AD eras.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gregorian;

pub static GREGORIAN: Gregorian = Gregorian;

impl CalendarSystem for Gregorian {
    fn calendar_type(&self) -> &'static str {
        "gregorian"
    }

    fn style_patterns(&self, locale: &Locale) -> Result<StylePatterns, LocaleDataError> {
        data::lookup(locale)
            .map(|data| data.gregorian)
            .ok_or_else(|| missing("gregorian patterns", locale))
    }

    fn symbols(&self, locale: &Locale) -> Result<DateSymbols, LocaleDataError> {
        data::lookup(locale)
            .map(|data| DateSymbols::new(data, EraNames::from(&data.eras)))
            .ok_or_else(|| missing("date symbols", locale))
    }

    fn era_year(&self, extended_year: i32) -> (i32, i32) {
        if extended_year > 0 {
            (1, extended_year)
        } else {
            (0, 1i32.saturating_sub(extended_year))
        }
    }

    fn extended_year(&self, era: i32, year: i32) -> i32 {
        if era == 0 { 1i32.saturating_sub(year) } else { year }
    }

    fn default_era(&self) -> i32 {
        1
    }

    fn max_era(&self) -> i32 {
        1
    }
}

/// The Thai solar calendar: Gregorian months, a single era counted from 543 BC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Buddhist;

pub static BUDDHIST: Buddhist = Buddhist;

impl CalendarSystem for Buddhist {
    fn calendar_type(&self) -> &'static str {
        "buddhist"
    }

    fn style_patterns(&self, locale: &Locale) -> Result<StylePatterns, LocaleDataError> {
        data::lookup_buddhist(locale)
            .map(|(_, patterns)| patterns)
            .ok_or_else(|| missing("buddhist patterns", locale))
    }

    fn symbols(&self, locale: &Locale) -> Result<DateSymbols, LocaleDataError> {
        data::lookup(locale)
            .map(|data| DateSymbols::new(data, EraNames::from(&data.buddhist_eras)))
            .ok_or_else(|| missing("date symbols", locale))
    }

    fn era_year(&self, extended_year: i32) -> (i32, i32) {
        (0, extended_year.saturating_add(BUDDHIST_ERA_OFFSET))
    }

    fn extended_year(&self, _era: i32, year: i32) -> i32 {
        year.saturating_sub(BUDDHIST_ERA_OFFSET)
    }

    fn default_era(&self) -> i32 {
        0
    }

    fn max_era(&self) -> i32 {
        0
    }
}
