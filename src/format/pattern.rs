//! The pattern engine: compiles a literal pattern such as `MMM d, y h:mm a`
//! and walks it against calendar fields in both directions.

use super::{FormatContext, FormatStrategy, FormatterKind};
use crate::attribute::BooleanAttribute;
use crate::calendar::{Calendar, CalendarField as F};
use crate::consts::{DEFAULT_TWO_DIGIT_YEAR_WINDOW, MILLIS_PER_HOUR, MILLIS_PER_MINUTE};
use crate::data::{self, DateSymbols, EraNames};
use crate::date_field::DateField;
use crate::types::{FieldPosition, ParsePosition, TimeZone, Timestamp};
use std::any::Any;

/// Error type for pattern compilation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    /// An unquoted ASCII letter that names no field.
    #[error("Illegal pattern character {0:?}")]
    IllegalPatternChar(char),

    /// A `'` opened a literal that never closes.
    #[error("Unterminated quote in pattern")]
    UnterminatedQuote,
}

/// One compiled piece of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternItem {
    /// A run of `count` identical field letters
    Field { field: DateField, count: usize },
    /// Text copied verbatim
    Literal(String),
}

/// Iterator over the items of a pattern string.
///
/// Quoted text (`'at'`) is literal, `''` is a single quote both inside and
/// outside quotes, and every other non-letter is literal as-is.
#[derive(Debug, Clone)]
pub struct PatternItems<'a> {
    remainder: &'a str,
}

impl<'a> PatternItems<'a> {
    pub const fn new(pattern: &'a str) -> Self {
        Self { remainder: pattern }
    }

    fn quoted(&mut self) -> Result<PatternItem, PatternError> {
        let mut literal = String::new();
        let mut chars = self.remainder.char_indices();
        while let Some((i, c)) = chars.next() {
            if c != '\'' {
                literal.push(c);
                continue;
            }
            if self.remainder[i + 1..].starts_with('\'') {
                literal.push('\'');
                chars.next();
                continue;
            }
            self.remainder = &self.remainder[i + 1..];
            return Ok(PatternItem::Literal(literal));
        }
        self.remainder = "";
        Err(PatternError::UnterminatedQuote)
    }
}

impl Iterator for PatternItems<'_> {
    type Item = Result<PatternItem, PatternError>;

    fn next(&mut self) -> Option<Self::Item> {
        let c = self.remainder.chars().next()?;

        if c == '\'' {
            if let Some(rest) = self.remainder.strip_prefix("''") {
                self.remainder = rest;
                return Some(Ok(PatternItem::Literal("'".to_owned())));
            }
            self.remainder = &self.remainder[1..];
            return Some(self.quoted());
        }

        if c.is_ascii_alphabetic() {
            let count = self.remainder.bytes().take_while(|&b| char::from(b) == c).count();
            self.remainder = &self.remainder[count..];
            return Some(
                DateField::from_pattern_char(c)
                    .map(|field| PatternItem::Field { field, count })
                    .ok_or(PatternError::IllegalPatternChar(c)),
            );
        }

        let end = self
            .remainder
            .char_indices()
            .find(|&(_, c)| c == '\'' || c.is_ascii_alphabetic())
            .map_or(self.remainder.len(), |(i, _)| i);
        let (literal, rest) = self.remainder.split_at(end);
        self.remainder = rest;
        Some(Ok(PatternItem::Literal(literal.to_owned())))
    }
}

/// Compiles a pattern, merging adjacent literals.
///
/// # Errors
/// Returns the first [`PatternError`] in the pattern.
pub fn compile(pattern: &str) -> Result<Vec<PatternItem>, PatternError> {
    let mut items: Vec<PatternItem> = Vec::new();
    for item in PatternItems::new(pattern) {
        match (item?, items.last_mut()) {
            (PatternItem::Literal(text), Some(PatternItem::Literal(previous))) => {
                previous.push_str(&text);
            }
            (PatternItem::Literal(text), _) if text.is_empty() => {}
            (item, _) => items.push(item),
        }
    }
    Ok(items)
}

/// Quotes `text` so that it compiles to a single literal
pub fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// A formatter driven by a literal pattern.
#[derive(Debug, Clone)]
pub struct PatternFormat {
    pattern:              String,
    items:                Vec<PatternItem>,
    symbols:              DateSymbols,
    two_digit_year_window: i32,
    two_digit_year_start: Option<i32>,
}

impl PatternFormat {
    /// Compiles `pattern` against a set of names.
    ///
    /// # Errors
    /// Returns `PatternError` if the pattern contains an unknown letter or an
    /// unterminated quote.
    pub fn new(pattern: &str, symbols: DateSymbols) -> Result<Self, PatternError> {
        Ok(Self {
            pattern: pattern.to_owned(),
            items: compile(pattern)?,
            symbols,
            two_digit_year_window: DEFAULT_TWO_DIGIT_YEAR_WINDOW,
            two_digit_year_start: None,
        })
    }

    /// `M/d/yy h:mm a` over root names, built without going through the
    /// compiler so it cannot fail
    pub fn last_resort() -> Self {
        let field = |field, count| PatternItem::Field { field, count };
        let literal = |text: &str| PatternItem::Literal(text.to_owned());
        Self {
            pattern:              crate::consts::FALLBACK_PATTERN.to_owned(),
            items:                vec![
                field(DateField::Month, 1),
                literal("/"),
                field(DateField::Date, 1),
                literal("/"),
                field(DateField::Year, 2),
                literal(" "),
                field(DateField::Hour1, 1),
                literal(":"),
                field(DateField::Minute, 2),
                literal(" "),
                field(DateField::AmPm, 1),
            ],
            symbols:              DateSymbols::new(
                data::root_data(),
                EraNames::from(&data::root_data().eras),
            ),
            two_digit_year_window: DEFAULT_TWO_DIGIT_YEAR_WINDOW,
            two_digit_year_start: None,
        }
    }

    pub fn items(&self) -> &[PatternItem] {
        &self.items
    }

    pub const fn symbols(&self) -> &DateSymbols {
        &self.symbols
    }

    /// Pins the first year of the two-digit-year century instead of
    /// sliding it with the clock
    pub fn set_two_digit_year_start(&mut self, year: i32) {
        self.two_digit_year_start = Some(year);
    }

    pub const fn two_digit_year_start(&self) -> Option<i32> {
        self.two_digit_year_start
    }

    fn century_start(&self, calendar: &dyn Calendar) -> i32 {
        self.two_digit_year_start.unwrap_or_else(|| {
            let mut now = calendar.box_clone();
            now.set_time(Timestamp::now());
            now.get(F::Year) - self.two_digit_year_window
        })
    }

    fn write_field(
        &self,
        out: &mut String,
        ctx: &FormatContext<'_>,
        field: DateField,
        count: usize,
        values: &[i32; F::COUNT],
        zone: &TimeZone,
    ) {
        let value = |f: F| values[f.index()];
        let number = |out: &mut String, n: i32, min: usize| {
            out.push_str(&ctx.number_format.format_integer(i64::from(n), min, None));
        };
        let data = self.symbols.data();

        match field {
            DateField::Era => out.push_str(name(self.symbols.eras().for_count(count), value(F::Era))),
            DateField::Year | DateField::YearName | DateField::YearWoy => {
                let year = if field == DateField::YearWoy { value(F::YearWoy) } else { value(F::Year) };
                if count == 2 {
                    out.push_str(&ctx.number_format.format_integer(i64::from(year), 2, Some(2)));
                } else {
                    number(out, year, count);
                }
            }
            DateField::ExtendedYear => number(out, value(F::ExtendedYear), count),
            DateField::Month | DateField::StandaloneMonth => {
                if count >= 3 {
                    out.push_str(name(data.months.for_count(count), value(F::Month)));
                } else {
                    number(out, value(F::Month) + 1, count);
                }
            }
            DateField::Date => number(out, value(F::Date), count),
            DateField::HourOfDay1 => {
                let hour = value(F::HourOfDay);
                number(out, if hour == 0 { 24 } else { hour }, count);
            }
            DateField::HourOfDay0 => number(out, value(F::HourOfDay), count),
            DateField::Minute => number(out, value(F::Minute), count),
            DateField::Second => number(out, value(F::Second), count),
            DateField::FractionalSecond => {
                let millis = format!("{:03}", value(F::Millisecond).clamp(0, 999));
                let digits: String = millis.chars().chain(std::iter::repeat('0')).take(count).collect();
                out.push_str(&ctx.number_format.format_integer(
                    digits.parse().unwrap_or(0),
                    count,
                    None,
                ));
            }
            DateField::DayOfWeek => {
                out.push_str(weekday(data.weekdays.for_count(count), value(F::DayOfWeek)));
            }
            DateField::DowLocal | DateField::StandaloneDay => {
                if count <= 2 {
                    number(out, value(F::DowLocal), count);
                } else {
                    out.push_str(weekday(data.weekdays.for_count(count), value(F::DayOfWeek)));
                }
            }
            DateField::DayOfYear => number(out, value(F::DayOfYear), count),
            DateField::DayOfWeekInMonth => number(out, value(F::DayOfWeekInMonth), count),
            DateField::WeekOfYear => number(out, value(F::WeekOfYear), count),
            DateField::WeekOfMonth => number(out, value(F::WeekOfMonth), count),
            DateField::AmPm => out.push_str(name(&data.am_pm, value(F::AmPm))),
            DateField::Hour1 => {
                let hour = value(F::Hour);
                number(out, if hour == 0 { 12 } else { hour }, count);
            }
            DateField::Hour0 => number(out, value(F::Hour), count),
            DateField::JulianDay => number(out, value(F::JulianDay), count),
            DateField::MillisecondsInDay => number(out, value(F::MillisecondsInDay), count),
            DateField::Quarter | DateField::StandaloneQuarter => {
                let quarter = value(F::Month).clamp(0, 11) / 3;
                if count >= 3 {
                    out.push_str(name(data.quarters.for_count(count), quarter));
                } else {
                    number(out, quarter + 1, count);
                }
            }
            DateField::Timezone
            | DateField::TimezoneRfc
            | DateField::TimezoneGeneric
            | DateField::TimezoneSpecial
            | DateField::TimezoneLocalizedGmtOffset
            | DateField::TimezoneIso
            | DateField::TimezoneIsoLocal => {
                let offset = value(F::ZoneOffset) + value(F::DstOffset);
                out.push_str(&self.zone_text(field, count, offset, zone));
            }
        }
    }

    fn zone_text(&self, field: DateField, count: usize, offset_ms: i32, zone: &TimeZone) -> String {
        let data = self.symbols.data();
        let gmt = |long: bool| {
            if offset_ms == 0 {
                data.gmt_zero.to_owned()
            } else {
                format!("{}{}", data.gmt_prefix, offset_text(offset_ms, long, !long, true))
            }
        };
        match (field, count) {
            (DateField::TimezoneRfc, 1..=3) => offset_text(offset_ms, true, false, false),
            (DateField::TimezoneRfc, 5) | (DateField::TimezoneIso, 5 | 3) => {
                if offset_ms == 0 { "Z".to_owned() } else { offset_text(offset_ms, true, false, true) }
            }
            (DateField::TimezoneIso, _) if offset_ms == 0 => "Z".to_owned(),
            (DateField::TimezoneIso | DateField::TimezoneIsoLocal, 1) => {
                iso_short(offset_ms)
            }
            (DateField::TimezoneIso | DateField::TimezoneIsoLocal, 3 | 5) => {
                offset_text(offset_ms, true, false, true)
            }
            (DateField::TimezoneIso | DateField::TimezoneIsoLocal, _) => {
                offset_text(offset_ms, true, false, false)
            }
            (DateField::TimezoneSpecial, 1..=3) if zone.raw_offset() == offset_ms => zone.id().to_owned(),
            (DateField::TimezoneSpecial, 1..=3) => TimeZone::from_offset(offset_ms).id().to_owned(),
            (_, 4..) => gmt(true),
            _ => gmt(false),
        }
    }

    fn parse_items(
        &self,
        ctx: &FormatContext<'_>,
        text: &str,
        start: usize,
        calendar: &mut dyn Calendar,
    ) -> Result<usize, usize> {
        let allow_whitespace = ctx.attributes.get(BooleanAttribute::ParseAllowWhitespace);
        let partial = ctx.attributes.get(BooleanAttribute::ParsePartialMatch);
        let century_start = self.century_start(calendar);

        let mut index = start;
        for (i, item) in self.items.iter().enumerate() {
            match item {
                PatternItem::Literal(literal) => {
                    index = match_literal(text, index, literal, allow_whitespace, partial)
                        .ok_or(index)?;
                }
                PatternItem::Field { field, count } => {
                    if allow_whitespace {
                        index = skip_whitespace(text, index);
                    }
                    // a numeric field directly followed by another reads a fixed width
                    let abutting = field.is_numeric(*count)
                        && matches!(
                            self.items.get(i + 1),
                            Some(PatternItem::Field { field: next, count: next_count })
                                if next.is_numeric(*next_count)
                        );
                    let limit = abutting.then_some(*count);
                    index = self
                        .parse_field(ctx, text, index, *field, *count, limit, century_start, calendar)
                        .ok_or(index)?;
                }
            }
        }
        Ok(index)
    }

    #[allow(clippy::too_many_arguments)]
    fn parse_field(
        &self,
        ctx: &FormatContext<'_>,
        text: &str,
        start: usize,
        field: DateField,
        count: usize,
        limit: Option<usize>,
        century_start: i32,
        calendar: &mut dyn Calendar,
    ) -> Option<usize> {
        let data = self.symbols.data();
        let allow_numeric = ctx.attributes.get(BooleanAttribute::ParseAllowNumeric);
        let partial = ctx.attributes.get(BooleanAttribute::ParsePartialMatch);
        let number = || ctx.number_format.parse_integer(text, start, limit);
        let to_i32 = |n: i64| i32::try_from(n).ok();

        // zero-based name index, or a one-based number when names don't match
        let text_or_number = |tables: &[&[&'static str]]| {
            match_names(text, start, tables, partial).or_else(|| {
                let (value, end) = number().filter(|_| allow_numeric)?;
                Some((to_i32(value)? - 1, end))
            })
        };

        match field {
            DateField::Era => {
                let eras = self.symbols.eras();
                let tables = [eras.wide, eras.abbreviated, eras.narrow];
                let (index, end) = match_names(text, start, &tables, partial)?;
                calendar.set(F::Era, index);
                Some(end)
            }
            DateField::Month | DateField::StandaloneMonth if count >= 3 => {
                let (index, end) = text_or_number(&[&data.months.wide, &data.months.abbreviated])?;
                calendar.set(F::Month, index);
                Some(end)
            }
            DateField::DayOfWeek | DateField::DowLocal | DateField::StandaloneDay
                if field == DateField::DayOfWeek || count >= 3 =>
            {
                let (index, end) =
                    text_or_number(&[&data.weekdays.wide, &data.weekdays.abbreviated])?;
                calendar.set(F::DayOfWeek, index + 1);
                Some(end)
            }
            DateField::AmPm => {
                let (index, end) = match_names(text, start, &[&data.am_pm], partial)?;
                calendar.set(F::AmPm, index);
                Some(end)
            }
            DateField::Quarter | DateField::StandaloneQuarter if count >= 3 => {
                let (index, end) =
                    text_or_number(&[&data.quarters.wide, &data.quarters.abbreviated])?;
                calendar.set(F::Month, index * 3);
                Some(end)
            }
            DateField::Timezone
            | DateField::TimezoneRfc
            | DateField::TimezoneGeneric
            | DateField::TimezoneSpecial
            | DateField::TimezoneLocalizedGmtOffset
            | DateField::TimezoneIso
            | DateField::TimezoneIsoLocal => {
                let (offset, end) = parse_zone(text, start, data.gmt_prefix, data.gmt_zero)?;
                calendar.set(F::ZoneOffset, offset);
                calendar.set(F::DstOffset, 0);
                Some(end)
            }
            _ => {
                let (value, end) = number()?;
                let digits = text
                    .get(start..end)
                    .map_or(0, |digits| digits.chars().filter(|c| c.is_numeric()).count());
                let value = to_i32(value)?;
                let (target, value) = match field {
                    DateField::Year | DateField::YearName | DateField::YearWoy => {
                        let value = if count <= 2 && digits == 2 && value >= 0 {
                            resolve_two_digit_year(value, century_start)
                        } else {
                            value
                        };
                        let target = if field == DateField::YearWoy { F::YearWoy } else { F::Year };
                        (target, value)
                    }
                    DateField::ExtendedYear => (F::ExtendedYear, value),
                    DateField::Month | DateField::StandaloneMonth => (F::Month, value - 1),
                    DateField::Date => (F::Date, value),
                    DateField::HourOfDay1 => (F::HourOfDay, if value == 24 { 0 } else { value }),
                    DateField::HourOfDay0 => (F::HourOfDay, value),
                    DateField::Minute => (F::Minute, value),
                    DateField::Second => (F::Second, value),
                    DateField::FractionalSecond => (F::Millisecond, scale_fraction(value, digits)),
                    DateField::DayOfYear => (F::DayOfYear, value),
                    DateField::DayOfWeekInMonth => (F::DayOfWeekInMonth, value),
                    DateField::WeekOfYear => (F::WeekOfYear, value),
                    DateField::WeekOfMonth => (F::WeekOfMonth, value),
                    DateField::Hour1 => (F::Hour, if value == 12 { 0 } else { value }),
                    DateField::Hour0 => (F::Hour, value),
                    DateField::DowLocal | DateField::StandaloneDay => (F::DowLocal, value),
                    DateField::JulianDay => (F::JulianDay, value),
                    DateField::MillisecondsInDay => (F::MillisecondsInDay, value),
                    DateField::Quarter | DateField::StandaloneQuarter => (F::Month, (value - 1) * 3),
                    _ => return None,
                };
                calendar.set(target, value);
                Some(end)
            }
        }
    }
}

impl FormatStrategy for PatternFormat {
    fn kind(&self) -> FormatterKind {
        FormatterKind::Pattern
    }

    fn pattern(&self) -> String {
        self.pattern.clone()
    }

    fn format(
        &self,
        ctx: &FormatContext<'_>,
        calendar: &dyn Calendar,
        mut pos: Option<&mut FieldPosition>,
    ) -> String {
        if let Some(pos) = pos.as_deref_mut() {
            pos.set_span(0, 0);
        }
        let values = calendar.fields();
        let zone = calendar.time_zone();
        let mut found = false;
        let mut out = String::with_capacity(self.pattern.len() * 2);
        for item in &self.items {
            match item {
                PatternItem::Literal(literal) => out.push_str(literal),
                PatternItem::Field { field, count } => {
                    let begin = out.len();
                    self.write_field(&mut out, ctx, *field, *count, &values, zone);
                    if let Some(pos) = pos.as_deref_mut() {
                        if !found && pos.matches(*field) {
                            pos.set_span(begin, out.len());
                            found = true;
                        }
                    }
                }
            }
        }
        out
    }

    fn parse(
        &self,
        ctx: &FormatContext<'_>,
        text: &str,
        calendar: &mut dyn Calendar,
        pos: &mut ParsePosition,
    ) {
        match self.parse_items(ctx, text, pos.index(), calendar) {
            Ok(end) => {
                pos.set_index(end);
                pos.set_error_index(None);
            }
            Err(error_index) => pos.set_error_index(Some(error_index)),
        }
    }

    fn set_two_digit_year_window(&mut self, years: i32) {
        self.two_digit_year_window = years;
    }

    fn box_clone(&self) -> Box<dyn FormatStrategy> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// Helper functions

fn name<'a>(names: &[&'a str], index: i32) -> &'a str {
    usize::try_from(index).ok().and_then(|i| names.get(i)).copied().unwrap_or("")
}

/// Names are stored Sunday first; `DAY_OF_WEEK` is 1 for Sunday
fn weekday<'a>(names: &[&'a str], day_of_week: i32) -> &'a str {
    name(names, day_of_week - 1)
}

/// `+hh:mm`, `+hhmm` or, when `short`, `+h` / `+h:mm`
fn offset_text(offset_ms: i32, padded: bool, short: bool, colon: bool) -> String {
    let sign = if offset_ms < 0 { '-' } else { '+' };
    let minutes_total = i64::from(offset_ms).abs() / MILLIS_PER_MINUTE;
    let (hours, minutes) = (minutes_total / 60, minutes_total % 60);
    let separator = if colon { ":" } else { "" };
    if short && minutes == 0 {
        format!("{sign}{hours}")
    } else if short {
        format!("{sign}{hours}{separator}{minutes:02}")
    } else if padded {
        format!("{sign}{hours:02}{separator}{minutes:02}")
    } else {
        format!("{sign}{hours}{separator}{minutes:02}")
    }
}

/// ISO basic with optional minutes: `+05`, `+0530`
fn iso_short(offset_ms: i32) -> String {
    let minutes = (i64::from(offset_ms).abs() / MILLIS_PER_MINUTE) % 60;
    if minutes == 0 {
        let sign = if offset_ms < 0 { '-' } else { '+' };
        format!("{sign}{:02}", i64::from(offset_ms).abs() / MILLIS_PER_HOUR)
    } else {
        offset_text(offset_ms, true, false, false)
    }
}

fn skip_whitespace(text: &str, start: usize) -> usize {
    text.get(start..).map_or(start, |rest| {
        start + rest.len() - rest.trim_start().len()
    })
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Length in bytes of `text[start..]`'s prefix equal to `candidate`, ignoring case
fn match_prefix(text: &str, start: usize, candidate: &str) -> Option<usize> {
    let rest = text.get(start..)?;
    let mut rest_chars = rest.char_indices();
    let mut consumed = 0;
    for c in candidate.chars() {
        let (i, t) = rest_chars.next()?;
        if !chars_eq_ignore_case(c, t) {
            return None;
        }
        consumed = i + t.len_utf8();
    }
    Some(consumed)
}

/// Longest name matching at `start`, across every name table given.
/// Returns the name's index and the end byte.
///
/// With `partial`, the run of letters at `start` also matches when it begins
/// exactly one name's index, so "Septem" reads as September.
fn match_names(text: &str, start: usize, tables: &[&[&str]], partial: bool) -> Option<(i32, usize)> {
    let candidates = || {
        tables
            .iter()
            .flat_map(|names| names.iter().enumerate())
            .filter(|(_, candidate)| !candidate.is_empty())
    };
    let full = candidates()
        .filter_map(|(index, candidate)| {
            let len = match_prefix(text, start, candidate)?;
            Some((i32::try_from(index).ok()?, start + len))
        })
        .max_by_key(|&(_, end)| end);
    if !partial {
        return full;
    }

    let run = letter_run(text, start);
    if run.is_empty() {
        return full;
    }
    let mut prefixed = candidates()
        .filter(|(_, candidate)| match_prefix(candidate, 0, run).is_some())
        .map(|(index, _)| index);
    let first = prefixed.next();
    let unique = first.filter(|&index| prefixed.all(|other| other == index));
    let abbreviated = unique
        .and_then(|index| i32::try_from(index).ok())
        .map(|index| (index, start + run.len()));
    match (full, abbreviated) {
        (Some(full), Some(abbreviated)) if abbreviated.1 > full.1 => Some(abbreviated),
        (None, abbreviated) => abbreviated,
        (full, _) => full,
    }
}

fn letter_run(text: &str, start: usize) -> &str {
    let rest = text.get(start..).unwrap_or("");
    let end = rest.find(|c: char| !c.is_alphabetic()).unwrap_or(rest.len());
    &rest[..end]
}

/// Matches a literal at `start`.
///
/// Whitespace in the literal matches any run of whitespace; with
/// `allow_whitespace` that run may be empty and extra whitespace before
/// literal characters is skipped. With `partial`, punctuation missing from
/// the text is tolerated.
fn match_literal(
    text: &str,
    start: usize,
    literal: &str,
    allow_whitespace: bool,
    partial: bool,
) -> Option<usize> {
    let mut index = start;
    let mut expected = literal.chars().peekable();
    while let Some(c) = expected.next() {
        if c.is_whitespace() {
            while expected.next_if(|c| c.is_whitespace()).is_some() {}
            let skipped = skip_whitespace(text, index);
            if skipped == index && !allow_whitespace && !partial {
                return None;
            }
            index = skipped;
            continue;
        }
        if allow_whitespace {
            index = skip_whitespace(text, index);
        }
        match text.get(index..).and_then(|rest| rest.chars().next()) {
            Some(t) if chars_eq_ignore_case(c, t) => index += t.len_utf8(),
            _ if partial && !c.is_alphanumeric() => {}
            _ => return None,
        }
    }
    Some(index)
}

/// Parses `Z`, `GMT`, `GMT+5`, `UTC-08:00`, `+0530` and `-05:30`.
/// Returns the offset in milliseconds and the end byte.
fn parse_zone(text: &str, start: usize, gmt_prefix: &str, gmt_zero: &str) -> Option<(i32, usize)> {
    let rest = text.get(start..)?;
    if rest.starts_with('Z') {
        return Some((0, start + 1));
    }
    for prefix in [gmt_prefix, gmt_zero, "GMT", "UTC"] {
        if let Some(len) = match_prefix(text, start, prefix) {
            let after = start + len;
            return Some(parse_offset_at(text, after).unwrap_or((0, after)));
        }
    }
    parse_offset_at(text, start)
}

fn parse_offset_at(text: &str, start: usize) -> Option<(i32, usize)> {
    let rest = text.get(start..)?;
    let negative = match rest.as_bytes().first()? {
        b'+' => false,
        b'-' => true,
        _ => return None,
    };
    let digits = |from: usize, max: usize| {
        rest.as_bytes()
            .get(from..)
            .map_or(0, |b| b.iter().take(max).take_while(|b| b.is_ascii_digit()).count())
    };
    let hour_len = digits(1, 2);
    if hour_len == 0 {
        return None;
    }
    let hours: i64 = rest[1..=hour_len].parse().ok()?;
    let mut end = 1 + hour_len;
    let mut minutes: i64 = 0;
    if rest.as_bytes().get(end) == Some(&b':') && digits(end + 1, 2) == 2 {
        minutes = rest[end + 1..end + 3].parse().ok()?;
        end += 3;
    } else if hour_len == 2 && digits(end, 2) == 2 {
        minutes = rest[end..end + 2].parse().ok()?;
        end += 2;
    }
    if hours > 23 || minutes > 59 {
        return None;
    }
    let millis = hours * MILLIS_PER_HOUR + minutes * MILLIS_PER_MINUTE;
    let millis = i32::try_from(if negative { -millis } else { millis }).ok()?;
    Some((millis, start + end))
}

/// Places a two-digit year in the hundred years starting at `century_start`
const fn resolve_two_digit_year(value: i32, century_start: i32) -> i32 {
    let ambiguous = century_start.rem_euclid(100);
    let base = century_start - ambiguous;
    base + value + if value < ambiguous { 100 } else { 0 }
}

/// Milliseconds for a fraction written with `digits` digits
fn scale_fraction(value: i32, digits: usize) -> i32 {
    match digits {
        0 => 0,
        1 => value * 100,
        2 => value * 10,
        3 => value,
        n => {
            let divisor = 10_i64.pow(u32::try_from(n - 3).unwrap_or(9).min(9));
            i32::try_from(i64::from(value) / divisor).unwrap_or(0)
        }
    }
}
