use super::{BUDDHIST, Calendar, CalendarError, CalendarField, CalendarSystem, GREGORIAN};
use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, EPOCH_JULIAN_DAY, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE,
    LEAP_YEAR_CYCLE, MAX_MONTH, MILLIS_PER_DAY, MILLIS_PER_HOUR, MILLIS_PER_MINUTE,
    MILLIS_PER_SECOND,
};
use crate::data::{self, DateSymbols, LocaleDataError, StylePatterns};
use crate::types::{Locale, LocaleKind, TimeZone, Timestamp};
use super::CalendarField as F;

const COUNT: usize = CalendarField::COUNT;

/// Stamp of a field derived from the instant
const COMPUTED: u32 = 1;
/// Stamps at or above this were assigned through `set`
const FIRST_USER_STAMP: u32 = 2;

const EPOCH_YEAR: i32 = 1970;
const MAX_YEAR: i32 = 5_000_000;

/// A solar calendar: Gregorian months and leap rules under the eras and year
/// numbering of a [`CalendarSystem`].
///
/// Fields remember the order they were set in, so when two fields disagree
/// (say `HOUR` and `HOUR_OF_DAY`) the one set last wins.
#[derive(Debug, Clone)]
pub struct SolarCalendar {
    system:            &'static dyn CalendarSystem,
    fields:            [i32; COUNT],
    stamps:            [u32; COUNT],
    next_stamp:        u32,
    time:              Option<i64>,
    zone:              TimeZone,
    lenient:           bool,
    first_day_of_week: i32,
    minimal_days:      i32,
    valid_locale:      Option<Locale>,
    actual_locale:     Option<Locale>,
}

impl SolarCalendar {
    /// A lenient UTC calendar set to the current time, with week rules from `locale`
    pub fn new(system: &'static dyn CalendarSystem, locale: &Locale) -> Self {
        let data = data::lookup(locale);
        let mut calendar = Self {
            system,
            fields: [0; COUNT],
            stamps: [0; COUNT],
            next_stamp: FIRST_USER_STAMP,
            time: None,
            zone: TimeZone::utc(),
            lenient: true,
            first_day_of_week: data.map_or(1, |d| d.first_day_of_week),
            minimal_days: data.map_or(1, |d| d.minimal_days),
            valid_locale: Some(locale.without_keywords()),
            actual_locale: data.map(|d| Locale::from(d.tag)),
        };
        calendar.set_time(Timestamp::now());
        calendar
    }

    pub fn gregorian(locale: &Locale) -> Self {
        Self::new(&GREGORIAN, locale)
    }

    pub fn buddhist(locale: &Locale) -> Self {
        Self::new(&BUDDHIST, locale)
    }

    /// Builder form of [`Calendar::set_time`]
    #[must_use]
    pub fn with_time(mut self, time: Timestamp) -> Self {
        self.set_time(time);
        self
    }

    /// Builder form of [`Calendar::set_time_zone`]
    #[must_use]
    pub fn with_time_zone(mut self, zone: TimeZone) -> Self {
        self.set_time_zone(zone);
        self
    }

    pub const fn system(&self) -> &'static dyn CalendarSystem {
        self.system
    }

    /// Overrides the locale's week rules
    pub fn set_week_data(&mut self, first_day_of_week: i32, minimal_days: i32) {
        self.first_day_of_week = first_day_of_week.clamp(1, 7);
        self.minimal_days = minimal_days.clamp(1, 7);
        if let Some(millis) = self.time {
            self.fields = self.compute_fields(millis);
        }
    }

    fn stamp(&self, field: CalendarField) -> u32 {
        self.stamps[field.index()]
    }

    fn user_set(&self, field: CalendarField) -> bool {
        self.stamp(field) >= FIRST_USER_STAMP
    }

    fn internal_get(&self, field: CalendarField, default: i32) -> i32 {
        if self.stamp(field) > 0 { self.fields[field.index()] } else { default }
    }

    fn compute_fields(&self, millis: i64) -> [i32; COUNT] {
        let offset = self.zone.raw_offset();
        let local = millis.saturating_add(i64::from(offset));
        let days = local.div_euclid(MILLIS_PER_DAY);
        let millis_in_day = local.rem_euclid(MILLIS_PER_DAY);

        let (year, month, day) = civil_from_days(days);
        let day_of_year = days - days_from_civil(year, 1, 1) + 1;
        let dow = day_of_week(days);
        let extended_year = saturate(year);
        let (era, era_year) = self.system.era_year(extended_year);
        let hour = millis_in_day / MILLIS_PER_HOUR;

        let mut f = [0; COUNT];
        f[F::Era.index()] = era;
        f[F::Year.index()] = era_year;
        f[F::Month.index()] = saturate(month - 1);
        f[F::Date.index()] = saturate(day);
        f[F::DayOfYear.index()] = saturate(day_of_year);
        f[F::DayOfWeek.index()] = dow;
        f[F::DayOfWeekInMonth.index()] = saturate((day - 1) / 7 + 1);
        f[F::AmPm.index()] = saturate(hour / 12);
        f[F::Hour.index()] = saturate(hour % 12);
        f[F::HourOfDay.index()] = saturate(hour);
        f[F::Minute.index()] = saturate(millis_in_day / MILLIS_PER_MINUTE % 60);
        f[F::Second.index()] = saturate(millis_in_day / MILLIS_PER_SECOND % 60);
        f[F::Millisecond.index()] = saturate(millis_in_day % MILLIS_PER_SECOND);
        f[F::ZoneOffset.index()] = offset;
        f[F::DstOffset.index()] = 0;
        f[F::ExtendedYear.index()] = extended_year;
        f[F::JulianDay.index()] = saturate(days + EPOCH_JULIAN_DAY);
        f[F::MillisecondsInDay.index()] = saturate(millis_in_day);
        f[F::DowLocal.index()] = (dow - self.first_day_of_week).rem_euclid(7) + 1;

        let day_of_year = saturate(day_of_year);
        let (week_of_year, year_woy) = self.week_of_year(year, day_of_year, dow);
        f[F::WeekOfYear.index()] = week_of_year;
        f[F::YearWoy.index()] = self.system.era_year(saturate(year_woy)).1;
        f[F::WeekOfMonth.index()] = self.week_number(saturate(day), dow);
        f
    }

    /// Week of year and the year it belongs to. Early January days can fall
    /// in the last week of the previous year, late December days in week 1
    /// of the next.
    fn week_of_year(&self, year: i64, day_of_year: i32, dow: i32) -> (i32, i64) {
        let first = self.first_day_of_week;
        let rel_dow = (dow - first).rem_euclid(7);
        let rel_dow_jan1 = (dow - day_of_year + 1 - first).rem_euclid(7);
        let mut woy = (day_of_year - 1 + rel_dow_jan1) / 7;
        if 7 - rel_dow_jan1 >= self.minimal_days {
            woy += 1;
        }

        if woy == 0 {
            let prev_doy = day_of_year + year_length(year - 1);
            return (self.week_number(prev_doy, dow), year - 1);
        }
        let last_doy = year_length(year);
        if day_of_year >= last_doy - 5 {
            let last_rel_dow = (rel_dow + last_doy - day_of_year).rem_euclid(7);
            if 6 - last_rel_dow >= self.minimal_days && day_of_year + 7 - rel_dow > last_doy {
                return (1, year + 1);
            }
        }
        (woy, year)
    }

    /// Week number of a day within a period (month or year) that starts on day 1
    fn week_number(&self, day_of_period: i32, dow: i32) -> i32 {
        let period_start_dow = (dow - self.first_day_of_week - day_of_period + 1).rem_euclid(7);
        let mut week = (day_of_period + period_start_dow - 1) / 7;
        if 7 - period_start_dow >= self.minimal_days {
            week += 1;
        }
        week
    }

    fn compute_time(&self) -> Result<i64, CalendarError> {
        if !self.lenient {
            self.validate()?;
        }
        let extended_year = i64::from(self.resolve_extended_year());
        let days = self.resolve_days(extended_year);
        let millis_in_day = self.resolve_millis_in_day();

        let offset = if self.user_set(F::ZoneOffset) {
            i64::from(self.fields[F::ZoneOffset.index()])
                + i64::from(self.internal_get(F::DstOffset, 0))
        } else {
            i64::from(self.zone.raw_offset())
        };

        days.checked_mul(MILLIS_PER_DAY)
            .and_then(|ms| ms.checked_add(millis_in_day))
            .and_then(|ms| ms.checked_sub(offset))
            .ok_or(CalendarError::Overflow)
    }

    fn resolve_extended_year(&self) -> i32 {
        if self.stamp(F::ExtendedYear) > self.stamp(F::Year).max(self.stamp(F::Era)) {
            return self.fields[F::ExtendedYear.index()];
        }
        let year = self.internal_get(F::Year, self.system.era_year(EPOCH_YEAR).1);
        let era = self.internal_get(F::Era, self.system.default_era());
        self.system.extended_year(era, year)
    }

    /// Days since the epoch, from whichever date fields were set last
    fn resolve_days(&self, extended_year: i64) -> i64 {
        let date_stamp = self.stamp(F::Month).max(self.stamp(F::Date));
        let doy_stamp = self.stamp(F::DayOfYear);
        let week_stamp = if self.stamp(F::WeekOfYear) > 0 {
            self.stamp(F::WeekOfYear)
                .max(self.stamp(F::DayOfWeek))
                .max(self.stamp(F::DowLocal))
        } else {
            0
        };
        let jd_stamp = self.stamp(F::JulianDay);

        if jd_stamp > date_stamp.max(doy_stamp).max(week_stamp) {
            return i64::from(self.fields[F::JulianDay.index()]) - EPOCH_JULIAN_DAY;
        }
        if doy_stamp > date_stamp && doy_stamp >= week_stamp {
            let day_of_year = i64::from(self.fields[F::DayOfYear.index()]);
            return days_from_civil(extended_year, 1, 1) + day_of_year - 1;
        }
        if week_stamp > date_stamp {
            return self.resolve_week_date(extended_year);
        }

        let month = i64::from(self.internal_get(F::Month, 0));
        let date = i64::from(self.internal_get(F::Date, 1));
        let year = extended_year + month.div_euclid(12);
        days_from_civil(year, month.rem_euclid(12) + 1, 1) + date - 1
    }

    fn resolve_week_date(&self, extended_year: i64) -> i64 {
        let year = if self.stamp(F::YearWoy) > self.stamp(F::Year) {
            let era = self.internal_get(F::Era, self.system.default_era());
            i64::from(self.system.extended_year(era, self.fields[F::YearWoy.index()]))
        } else {
            extended_year
        };
        let first = i64::from(self.first_day_of_week);
        let jan1 = days_from_civil(year, 1, 1);
        let jan1_offset = (i64::from(day_of_week(jan1)) - first).rem_euclid(7);
        let mut week1_start = jan1 - jan1_offset;
        if 7 - jan1_offset < i64::from(self.minimal_days) {
            week1_start += 7;
        }

        let dow_offset = if self.stamp(F::DowLocal) > self.stamp(F::DayOfWeek) {
            i64::from(self.fields[F::DowLocal.index()]) - 1
        } else if self.stamp(F::DayOfWeek) > 0 {
            (i64::from(self.fields[F::DayOfWeek.index()]) - first).rem_euclid(7)
        } else {
            0
        };
        let week = i64::from(self.fields[F::WeekOfYear.index()]);
        week1_start + (week - 1) * 7 + dow_offset
    }

    fn resolve_millis_in_day(&self) -> i64 {
        let time_stamp = [F::AmPm, F::Hour, F::HourOfDay, F::Minute, F::Second, F::Millisecond]
            .into_iter()
            .map(|field| self.stamp(field))
            .max()
            .unwrap_or(0);
        if self.stamp(F::MillisecondsInDay) > time_stamp {
            return i64::from(self.fields[F::MillisecondsInDay.index()]);
        }

        let hod_stamp = self.stamp(F::HourOfDay);
        let hour = if hod_stamp > 0 && hod_stamp >= self.stamp(F::Hour).max(self.stamp(F::AmPm)) {
            i64::from(self.fields[F::HourOfDay.index()])
        } else {
            i64::from(self.internal_get(F::Hour, 0)) + 12 * i64::from(self.internal_get(F::AmPm, 0))
        };
        hour * MILLIS_PER_HOUR
            + i64::from(self.internal_get(F::Minute, 0)) * MILLIS_PER_MINUTE
            + i64::from(self.internal_get(F::Second, 0)) * MILLIS_PER_SECOND
            + i64::from(self.internal_get(F::Millisecond, 0))
    }

    /// Rejects user-set fields outside their range
    fn validate(&self) -> Result<(), CalendarError> {
        let extended_year = i64::from(self.resolve_extended_year());
        for field in CalendarField::ALL {
            if !self.user_set(field) {
                continue;
            }
            let value = self.fields[field.index()];
            let (min, max) = self.range(field, extended_year);
            if value < min || value > max {
                return Err(CalendarError::FieldOutOfRange { field, value });
            }
        }
        Ok(())
    }

    fn range(&self, field: CalendarField, extended_year: i64) -> (i32, i32) {
        match field {
            F::Era => (0, self.system.max_era()),
            F::Year => (1, MAX_YEAR),
            F::ExtendedYear | F::YearWoy => (-MAX_YEAR, MAX_YEAR),
            F::Month => (0, i32::from(MAX_MONTH) - 1),
            F::Date => {
                let month = self.internal_get(F::Month, 0).clamp(0, 11);
                (1, days_in_month(extended_year, i64::from(month) + 1))
            }
            F::DayOfYear => (1, year_length(extended_year)),
            F::DayOfWeek | F::DowLocal => (1, 7),
            F::DayOfWeekInMonth => (-5, 5),
            F::WeekOfYear => (1, 53),
            F::WeekOfMonth => (0, 6),
            F::AmPm | F::IsLeapMonth => (0, 1),
            F::Hour => (0, 11),
            F::HourOfDay => (0, 23),
            F::Minute | F::Second => (0, 59),
            F::Millisecond => (0, 999),
            F::ZoneOffset => (-16 * hour_millis(), 16 * hour_millis()),
            F::DstOffset => (0, 2 * hour_millis()),
            F::JulianDay => (i32::MIN, i32::MAX),
            F::MillisecondsInDay => (0, saturate(MILLIS_PER_DAY - 1)),
        }
    }
}

impl Calendar for SolarCalendar {
    fn calendar_type(&self) -> &'static str {
        self.system.calendar_type()
    }

    fn set_time_zone(&mut self, zone: TimeZone) {
        self.zone = zone;
        if let Some(millis) = self.time {
            self.fields = self.compute_fields(millis);
        }
    }

    fn time_zone(&self) -> &TimeZone {
        &self.zone
    }

    fn set_lenient(&mut self, lenient: bool) {
        self.lenient = lenient;
    }

    fn is_lenient(&self) -> bool {
        self.lenient
    }

    fn clear(&mut self) {
        self.fields = [0; COUNT];
        self.stamps = [0; COUNT];
        self.next_stamp = FIRST_USER_STAMP;
        self.time = None;
    }

    fn set_time(&mut self, time: Timestamp) {
        let millis = time.millis();
        self.fields = self.compute_fields(millis);
        self.stamps = [COMPUTED; COUNT];
        self.next_stamp = FIRST_USER_STAMP;
        self.time = Some(millis);
    }

    fn time(&self) -> Result<Timestamp, CalendarError> {
        match self.time {
            Some(millis) => Ok(Timestamp::from_millis(millis)),
            None => self.compute_time().map(Timestamp::from_millis),
        }
    }

    fn get(&self, field: CalendarField) -> i32 {
        self.fields()[field.index()]
    }

    fn fields(&self) -> [i32; COUNT] {
        if self.time.is_some() {
            return self.fields;
        }
        match self.compute_time() {
            Ok(millis) => self.compute_fields(millis),
            Err(_) => self.fields,
        }
    }

    fn set(&mut self, field: CalendarField, value: i32) {
        self.time = None;
        self.fields[field.index()] = value;
        self.stamps[field.index()] = self.next_stamp;
        self.next_stamp = self.next_stamp.saturating_add(1);
    }

    fn is_set(&self, field: CalendarField) -> bool {
        self.stamp(field) > 0
    }

    fn first_day_of_week(&self) -> i32 {
        self.first_day_of_week
    }

    fn minimal_days_in_first_week(&self) -> i32 {
        self.minimal_days
    }

    fn locale(&self, kind: LocaleKind) -> Option<&Locale> {
        match kind {
            LocaleKind::Valid => self.valid_locale.as_ref(),
            LocaleKind::Actual => self.actual_locale.as_ref(),
        }
    }

    fn date_time_patterns(&self, locale: &Locale) -> Result<StylePatterns, LocaleDataError> {
        self.system.style_patterns(locale)
    }

    fn date_symbols(&self, locale: &Locale) -> Result<DateSymbols, LocaleDataError> {
        self.system.symbols(locale)
    }

    fn box_clone(&self) -> Box<dyn Calendar> {
        Box::new(self.clone())
    }
}

// Helper functions

fn saturate(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

fn hour_millis() -> i32 {
    saturate(MILLIS_PER_HOUR)
}

pub(crate) const fn is_leap_year(year: i64) -> bool {
    (year.rem_euclid(LEAP_YEAR_CYCLE) == 0 && year.rem_euclid(CENTURY_CYCLE) != 0)
        || year.rem_euclid(GREGORIAN_CYCLE) == 0
}

/// Length of `month` (1-based) in `year`
pub(crate) fn days_in_month(year: i64, month: i64) -> i32 {
    debug_assert!((1..=i64::from(MAX_MONTH)).contains(&month));
    if month == i64::from(FEBRUARY) && is_leap_year(year) {
        i32::from(FEBRUARY_DAYS_LEAP)
    } else {
        usize::try_from(month)
            .ok()
            .and_then(|m| DAYS_IN_MONTH.get(m))
            .map_or(31, |&days| i32::from(days))
    }
}

const fn year_length(year: i64) -> i32 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// 1 = Sunday
fn day_of_week(days_since_epoch: i64) -> i32 {
    // 1970-01-01 was a Thursday
    saturate((days_since_epoch + 4).rem_euclid(7) + 1)
}

/// Year, month (1-based) and day for a count of days since 1970-01-01
fn civil_from_days(days: i64) -> (i64, i64, i64) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

/// Days since 1970-01-01 for a year, month (1-based) and day
fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let year = if month <= 2 { year - 1 } else { year };
    let era = year.div_euclid(400);
    let yoe = year.rem_euclid(400);
    let mp = (month + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-03-15T13:45:30.250Z, a Friday
    const FRIDAY: i64 = 1_710_510_330_250;

    fn en_us() -> SolarCalendar {
        SolarCalendar::gregorian(&Locale::from("en_US"))
    }

    #[test]
    fn test_civil_round_trip() {
        assert_eq!(civil_from_days(0), (1970, 1, 1));
        assert_eq!(days_from_civil(2000, 2, 29), 11_016);
        assert_eq!(civil_from_days(11_016), (2000, 2, 29));
        assert_eq!(civil_from_days(-1), (1969, 12, 31));
        for days in [-800_000, -1, 0, 59, 365, 19_797, 2_932_896] {
            let (y, m, d) = civil_from_days(days);
            assert_eq!(days_from_civil(y, m, d), days);
        }
    }

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year:        i64,
            is_leap:     bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                year:        2024,
                is_leap:     true,
                description: "divisible by 4",
            },
            TestCase {
                year:        2023,
                is_leap:     false,
                description: "not divisible by 4",
            },
            TestCase {
                year:        1900,
                is_leap:     false,
                description: "century not divisible by 400",
            },
            TestCase {
                year:        2000,
                is_leap:     true,
                description: "divisible by 400",
            },
            TestCase {
                year:        -4,
                is_leap:     true,
                description: "proleptic year before 1 AD",
            },
        ];

        for case in &cases {
            assert_eq!(
                is_leap_year(case.year),
                case.is_leap,
                "Year {} ({})",
                case.year,
                case.description
            );
        }
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2023, 12), 31);
    }

    #[test]
    fn test_fields_from_time() {
        let cal = en_us().with_time(Timestamp::from_millis(FRIDAY));
        assert_eq!(cal.get(F::Era), 1);
        assert_eq!(cal.get(F::Year), 2024);
        assert_eq!(cal.get(F::Month), 2);
        assert_eq!(cal.get(F::Date), 15);
        assert_eq!(cal.get(F::DayOfWeek), 6);
        assert_eq!(cal.get(F::DayOfYear), 75);
        assert_eq!(cal.get(F::HourOfDay), 13);
        assert_eq!(cal.get(F::Hour), 1);
        assert_eq!(cal.get(F::AmPm), 1);
        assert_eq!(cal.get(F::Minute), 45);
        assert_eq!(cal.get(F::Second), 30);
        assert_eq!(cal.get(F::Millisecond), 250);
        assert_eq!(cal.get(F::JulianDay), 2_460_385);
        assert_eq!(cal.get(F::WeekOfYear), 11);
        assert_eq!(cal.get(F::DayOfWeekInMonth), 3);
    }

    #[test]
    fn test_time_zone_shifts_fields() {
        let cal = en_us()
            .with_time(Timestamp::from_millis(FRIDAY))
            .with_time_zone(TimeZone::from_offset(-14 * 3_600_000));
        assert_eq!(cal.get(F::Date), 14);
        assert_eq!(cal.get(F::HourOfDay), 23);
        assert_eq!(cal.get(F::ZoneOffset), -14 * 3_600_000);
        assert_eq!(cal.time().unwrap().millis(), FRIDAY);
    }

    #[test]
    fn test_week_spills_into_next_year() {
        // 2024-12-30 is a Monday; under en_US rules it is week 1 of 2025
        let mut cal = en_us();
        cal.clear();
        cal.set(F::Year, 2024);
        cal.set(F::Month, 11);
        cal.set(F::Date, 30);
        assert_eq!(cal.get(F::WeekOfYear), 1);
        assert_eq!(cal.get(F::YearWoy), 2025);

        // 2021-01-01 is a Friday; under ISO-like de rules it belongs to 2020
        let mut cal = SolarCalendar::gregorian(&Locale::from("de"));
        cal.clear();
        cal.set(F::Year, 2021);
        cal.set(F::Month, 0);
        cal.set(F::Date, 1);
        assert_eq!(cal.get(F::WeekOfYear), 53);
        assert_eq!(cal.get(F::YearWoy), 2020);
    }

    #[test]
    fn test_resolve_from_fields() {
        let mut cal = en_us();
        cal.clear();
        cal.set(F::Year, 2024);
        cal.set(F::Month, 2);
        cal.set(F::Date, 15);
        cal.set(F::Hour, 1);
        cal.set(F::AmPm, 1);
        cal.set(F::Minute, 45);
        cal.set(F::Second, 30);
        cal.set(F::Millisecond, 250);
        assert_eq!(cal.time().unwrap().millis(), FRIDAY);
    }

    #[test]
    fn test_last_set_hour_field_wins() {
        let mut cal = en_us().with_time(Timestamp::from_millis(FRIDAY));
        cal.set(F::Hour, 3);
        assert_eq!(cal.get(F::HourOfDay), 15);
        cal.set(F::HourOfDay, 4);
        assert_eq!(cal.get(F::HourOfDay), 4);
        assert_eq!(cal.get(F::AmPm), 0);
    }

    #[test]
    fn test_lenient_normalizes() {
        let mut cal = en_us();
        cal.clear();
        cal.set(F::Year, 2023);
        cal.set(F::Month, 12);
        cal.set(F::Date, 32);
        assert_eq!(cal.get(F::Year), 2024);
        assert_eq!(cal.get(F::Month), 1);
        assert_eq!(cal.get(F::Date), 1);
    }

    #[test]
    fn test_strict_rejects_out_of_range() {
        let mut cal = en_us();
        cal.set_lenient(false);
        cal.clear();
        cal.set(F::Year, 2023);
        cal.set(F::Month, 1);
        cal.set(F::Date, 29);
        assert_eq!(
            cal.time(),
            Err(CalendarError::FieldOutOfRange {
                field: F::Date,
                value: 29,
            })
        );
        cal.set(F::Year, 2024);
        assert!(cal.time().is_ok());
    }

    #[test]
    fn test_get_does_not_mutate() {
        let mut cal = en_us();
        cal.clear();
        cal.set(F::Year, 2024);
        let _ = cal.get(F::DayOfWeek);
        assert!(!cal.is_set(F::DayOfWeek));
        assert!(cal.is_set(F::Year));
    }

    #[test]
    fn test_zone_offset_field_overrides_zone() {
        let mut cal = en_us();
        cal.clear();
        cal.set(F::Year, 1970);
        cal.set(F::HourOfDay, 5);
        cal.set(F::ZoneOffset, 5 * 3_600_000);
        assert_eq!(cal.time().unwrap().millis(), 0);
    }

    #[test]
    fn test_buddhist_years() {
        let cal = SolarCalendar::buddhist(&Locale::from("th_TH"))
            .with_time(Timestamp::from_millis(FRIDAY));
        assert_eq!(cal.get(F::Era), 0);
        assert_eq!(cal.get(F::Year), 2567);
        assert_eq!(cal.get(F::ExtendedYear), 2024);

        let mut cal = cal;
        cal.clear();
        cal.set(F::Year, 2513);
        assert_eq!(cal.time().unwrap().millis(), 0);
    }

    #[test]
    fn test_extreme_years_fail_without_overflow() {
        let mut cal = SolarCalendar::buddhist(&Locale::from("th_TH"));
        cal.clear();
        cal.set(F::Year, i32::MIN);
        assert_eq!(cal.time(), Err(CalendarError::Overflow));
        cal.set_lenient(false);
        assert_eq!(
            cal.time(),
            Err(CalendarError::FieldOutOfRange {
                field: F::Year,
                value: i32::MIN,
            })
        );

        let mut cal = en_us();
        cal.clear();
        cal.set(F::Era, 0);
        cal.set(F::Year, i32::MIN);
        assert_eq!(cal.time(), Err(CalendarError::Overflow));
        cal.set_lenient(false);
        assert!(matches!(cal.time(), Err(CalendarError::FieldOutOfRange { field: F::Year, .. })));
    }

    #[test]
    fn test_locale_provenance() {
        let cal = SolarCalendar::gregorian(&Locale::from("de_AT@calendar=gregorian"));
        assert_eq!(cal.locale(LocaleKind::Valid), Some(&Locale::from("de_AT")));
        assert_eq!(cal.locale(LocaleKind::Actual), Some(&Locale::from("de")));
        assert_eq!(cal.first_day_of_week(), 2);
        assert_eq!(cal.minimal_days_in_first_week(), 4);
    }
}
