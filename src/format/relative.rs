use super::pattern::{PatternFormat, quote};
use super::{FormatContext, FormatStrategy, FormatterKind};
use crate::calendar::{Calendar, CalendarField as F};
use crate::data::{self, LocaleDataError};
use crate::style::{Style, StyleCode, StylePair};
use crate::types::{FieldPosition, Locale, ParsePosition, Timestamp};
use std::any::Any;

/// Formats dates near a reference day as phrases ("Yesterday", "Today",
/// "Tomorrow") and everything else with the absolute style pattern.
///
/// Which offsets have phrases is up to the locale; a locale without any
/// behaves exactly like the absolute pattern.
#[derive(Debug, Clone)]
pub struct RelativeFormat {
    date_style: Option<Style>,
    time_style: Option<Style>,
    locale:     Locale,
    absolute:   PatternFormat,
    /// Day offset and the formatter rendering its phrase
    phrases:    Vec<(i32, PatternFormat)>,
    reference:  Option<Timestamp>,
}

impl RelativeFormat {
    /// Builds from raw style codes, relative bit included.
    ///
    /// Codes that mask to no valid level leave that half out; with neither
    /// half left the date is shown at medium.
    ///
    /// # Errors
    /// Returns `LocaleDataError` if the calendar has no data for `locale`.
    pub fn new(
        time_code: StyleCode,
        date_code: StyleCode,
        locale: &Locale,
        calendar: &dyn Calendar,
    ) -> Result<Self, LocaleDataError> {
        let level = |code: StyleCode| code.masked().level().ok().flatten();
        let (date_style, time_style) = match (level(date_code), level(time_code)) {
            (None, None) => (Some(Style::Medium), None),
            styles => styles,
        };
        let styles = StylePair::new(date_style, time_style).unwrap_or(StylePair::Date(Style::Medium));

        let patterns = calendar.date_time_patterns(locale)?;
        let symbols = calendar.date_symbols(locale)?;
        let compile = |pattern: &str| {
            PatternFormat::new(pattern, symbols).map_err(|source| LocaleDataError::Malformed {
                locale: locale.to_string(),
                source,
            })
        };

        let absolute = compile(&patterns.compose(styles))?;
        let phrases = match date_style {
            Some(date) => symbols
                .data()
                .relative_days
                .iter()
                .map(|&(offset, phrase)| {
                    let pattern = match time_style {
                        Some(time) => data::glue(
                            patterns.glue_pattern(date),
                            &quote(phrase),
                            patterns.time_pattern(time),
                        ),
                        None => quote(phrase),
                    };
                    compile(&pattern).map(|format| (offset, format))
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        Ok(Self {
            date_style,
            time_style,
            locale: locale.clone(),
            absolute,
            phrases,
            reference: None,
        })
    }

    pub const fn date_style(&self) -> Option<Style> {
        self.date_style
    }

    pub const fn time_style(&self) -> Option<Style> {
        self.time_style
    }

    pub const fn locale(&self) -> &Locale {
        &self.locale
    }

    /// The instant day offsets are measured from; the current time when unset
    pub const fn reference(&self) -> Option<Timestamp> {
        self.reference
    }

    pub fn set_reference(&mut self, reference: Option<Timestamp>) {
        self.reference = reference;
    }

    #[must_use]
    pub fn with_reference(mut self, reference: Timestamp) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Pattern used for a day offset, if the locale has a phrase for it
    pub fn phrase_pattern(&self, offset: i32) -> Option<String> {
        self.phrase(offset).map(FormatStrategy::pattern)
    }

    fn phrase(&self, offset: i32) -> Option<&PatternFormat> {
        self.phrases
            .iter()
            .find(|(days, _)| *days == offset)
            .map(|(_, format)| format)
    }

    /// A copy of `calendar` set to the reference instant
    fn reference_day(&self, calendar: &dyn Calendar) -> Box<dyn Calendar> {
        let mut day = calendar.box_clone();
        day.set_time(self.reference.unwrap_or_else(Timestamp::now));
        day
    }

    fn day_offset(&self, calendar: &dyn Calendar) -> i32 {
        let reference = self.reference_day(calendar).get(F::JulianDay);
        calendar.get(F::JulianDay).saturating_sub(reference)
    }
}

impl FormatStrategy for RelativeFormat {
    fn kind(&self) -> FormatterKind {
        FormatterKind::Relative
    }

    fn pattern(&self) -> String {
        self.absolute.pattern()
    }

    fn format(
        &self,
        ctx: &FormatContext<'_>,
        calendar: &dyn Calendar,
        pos: Option<&mut FieldPosition>,
    ) -> String {
        if self.phrases.is_empty() {
            return self.absolute.format(ctx, calendar, pos);
        }
        match self.phrase(self.day_offset(calendar)) {
            Some(phrase) => phrase.format(ctx, calendar, pos),
            None => self.absolute.format(ctx, calendar, pos),
        }
    }

    fn parse(
        &self,
        ctx: &FormatContext<'_>,
        text: &str,
        calendar: &mut dyn Calendar,
        pos: &mut ParsePosition,
    ) {
        let start = pos.index();
        // longest phrase wins, tried on scratch copies
        let best = self
            .phrases
            .iter()
            .filter_map(|(offset, format)| {
                let mut scratch = calendar.box_clone();
                let mut attempt = ParsePosition::new(start);
                format.parse(ctx, text, scratch.as_mut(), &mut attempt);
                (attempt.error_index().is_none() && attempt.index() > start)
                    .then_some((attempt.index(), *offset, format))
            })
            .max_by_key(|&(end, ..)| end);

        let Some((_, offset, format)) = best else {
            self.absolute.parse(ctx, text, calendar, pos);
            return;
        };

        format.parse(ctx, text, calendar, pos);
        let mut day = self.reference_day(calendar);
        let julian_day = day.get(F::JulianDay).saturating_add(offset);
        day.set(F::JulianDay, julian_day);
        for field in [F::Era, F::Year, F::Month, F::Date] {
            calendar.set(field, day.get(field));
        }
    }

    fn set_two_digit_year_window(&mut self, years: i32) {
        self.absolute.set_two_digit_year_window(years);
        for (_, format) in &mut self.phrases {
            format.set_two_digit_year_window(years);
        }
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
