//! The formatter facade: one `DateFormat` type that owns its calendar and
//! number format and delegates rendering to a [`FormatStrategy`].

mod pattern;
mod relative;

pub use pattern::{PatternError, PatternFormat, PatternItem, PatternItems, compile, quote};
pub use relative::RelativeFormat;

use crate::attribute::{BooleanAttribute, BooleanAttributes};
use crate::calendar::Calendar;
use crate::number::NumberFormat;
use crate::skeleton::Skeleton;
use crate::style::StyleCode;
use crate::types::{FieldPosition, Locale, LocaleKind, ParsePosition, TimeZone, Timestamp};
use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use tracing::trace;

/// Error type for formatting.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// The value is none of calendar, timestamp or number.
    #[error("Cannot format given Object as a Date: {0}")]
    UnsupportedInput(&'static str),
}

/// Error type for the position-free parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Unparseable date: {text:?}")]
    Unparseable { text: String, error_index: usize },
}

/// Which concrete formatter sits behind a [`DateFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatterKind {
    /// Renders a literal pattern
    Pattern,
    /// Renders day phrases such as "Yesterday" where the locale has them
    Relative,
}

/// The settings a strategy formats and parses under.
#[derive(Debug, Clone, Copy)]
pub struct FormatContext<'a> {
    pub number_format: &'a NumberFormat,
    pub attributes:    BooleanAttributes,
}

impl<'a> FormatContext<'a> {
    pub const fn new(number_format: &'a NumberFormat, attributes: BooleanAttributes) -> Self {
        Self {
            number_format,
            attributes,
        }
    }
}

/// A concrete formatter.
///
/// `format` must only read the calendar's fields. `parse` writes the fields it
/// reads into the calendar and advances `pos`; on failure it sets
/// `pos.error_index` and leaves `pos.index` where it was.
pub trait FormatStrategy: fmt::Debug + Send + Sync {
    fn kind(&self) -> FormatterKind;

    /// Pattern the strategy renders absolute dates with
    fn pattern(&self) -> String;

    fn format(
        &self,
        ctx: &FormatContext<'_>,
        calendar: &dyn Calendar,
        pos: Option<&mut FieldPosition>,
    ) -> String;

    fn parse(
        &self,
        ctx: &FormatContext<'_>,
        text: &str,
        calendar: &mut dyn Calendar,
        pos: &mut ParsePosition,
    );

    /// Years before now at which the two-digit-year century starts
    fn set_two_digit_year_window(&mut self, years: i32);

    fn box_clone(&self) -> Box<dyn FormatStrategy>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl Clone for Box<dyn FormatStrategy> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

/// A value to format.
#[derive(Debug, Clone, Copy)]
pub enum FormatArg<'a> {
    /// Formatted as-is, with its own zone and fields
    Calendar(&'a dyn Calendar),
    Timestamp(Timestamp),
    /// Milliseconds since the epoch
    Integer(i64),
    /// Milliseconds since the epoch; the fraction is dropped
    Float(f64),
    Text(&'a str),
    Bool(bool),
}

impl FormatArg<'_> {
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Calendar(_) => "Calendar",
            Self::Timestamp(_) => "Timestamp",
            Self::Integer(_) => "Integer",
            Self::Float(_) => "Float",
            Self::Text(_) => "String",
            Self::Bool(_) => "Boolean",
        }
    }
}

impl<'a> From<&'a dyn Calendar> for FormatArg<'a> {
    fn from(calendar: &'a dyn Calendar) -> Self {
        Self::Calendar(calendar)
    }
}

impl From<Timestamp> for FormatArg<'_> {
    fn from(time: Timestamp) -> Self {
        Self::Timestamp(time)
    }
}

impl From<i64> for FormatArg<'_> {
    fn from(millis: i64) -> Self {
        Self::Integer(millis)
    }
}

impl From<f64> for FormatArg<'_> {
    fn from(millis: f64) -> Self {
        Self::Float(millis)
    }
}

impl<'a> From<&'a str> for FormatArg<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl From<bool> for FormatArg<'_> {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// A date formatter.
///
/// Owns the calendar it formats timestamps through and the number format
/// numeric fields are written with. Not meant for concurrent use: `format`
/// and `parse` use the owned calendar as scratch space.
#[derive(Debug, Clone)]
pub struct DateFormat {
    calendar:      Box<dyn Calendar>,
    number_format: NumberFormat,
    attributes:    BooleanAttributes,
    valid_locale:  Option<Locale>,
    actual_locale: Option<Locale>,
    strategy:      Box<dyn FormatStrategy>,
}

impl DateFormat {
    /// Wraps a strategy with an integer-only number format and every parse
    /// attribute enabled
    pub fn new(strategy: Box<dyn FormatStrategy>, calendar: Box<dyn Calendar>) -> Self {
        Self {
            calendar,
            number_format: NumberFormat::new(),
            attributes: BooleanAttributes::default(),
            valid_locale: None,
            actual_locale: None,
            strategy,
        }
    }

    /// Formatter for a literal pattern with `locale`'s names and calendar.
    ///
    /// # Errors
    /// Returns an error if the pattern does not compile or the locale has no data.
    pub fn from_pattern(pattern: &str, locale: &Locale) -> Result<Self, crate::Error> {
        let calendar = crate::calendar::for_locale(locale);
        let symbols = calendar.date_symbols(locale)?;
        let format = PatternFormat::new(pattern, symbols)?;
        let mut date_format = Self::new(Box::new(format), calendar);
        let valid = date_format.calendar.locale(LocaleKind::Valid).cloned();
        let actual = date_format.calendar.locale(LocaleKind::Actual).cloned();
        date_format.set_locale(valid, actual);
        Ok(date_format)
    }

    /// Date-only formatter, see [`crate::date_instance`]
    ///
    /// # Errors
    /// Returns `StyleError` if `style` is not a valid style.
    pub fn date_instance(
        style: impl Into<StyleCode>,
        locale: &Locale,
    ) -> Result<Self, crate::StyleError> {
        crate::resolve::date_instance(style, locale, None)
    }

    /// Time-only formatter, see [`crate::time_instance`]
    ///
    /// # Errors
    /// Returns `StyleError` if `style` is not a valid style.
    pub fn time_instance(
        style: impl Into<StyleCode>,
        locale: &Locale,
    ) -> Result<Self, crate::StyleError> {
        crate::resolve::time_instance(style, locale, None)
    }

    /// Date and time formatter, see [`crate::date_time_instance`]
    ///
    /// # Errors
    /// Returns `StyleError` if either style is not a valid style.
    pub fn date_time_instance(
        date_style: impl Into<StyleCode>,
        time_style: impl Into<StyleCode>,
        locale: &Locale,
    ) -> Result<Self, crate::StyleError> {
        crate::resolve::date_time_instance(date_style, time_style, locale, None)
    }

    /// Short date and time in the default locale
    ///
    /// # Errors
    /// Never fails for the built-in styles; the `Result` mirrors the resolver.
    pub fn default_instance() -> Result<Self, crate::StyleError> {
        crate::resolve::default_instance(None)
    }

    /// Best pattern for a skeleton in `locale`
    ///
    /// # Errors
    /// Returns an error if the generated pattern does not compile.
    pub fn instance_for_skeleton(
        skeleton: &Skeleton,
        locale: &Locale,
    ) -> Result<Self, crate::Error> {
        crate::resolve::instance_for_skeleton(skeleton, locale, None)
    }

    /// Formats a calendar, timestamp or number of milliseconds.
    ///
    /// Timestamps and numbers are first set into the owned calendar. When
    /// `pos` is given it is filled with the span of its field's first
    /// occurrence.
    ///
    /// # Errors
    /// Returns `FormatError::UnsupportedInput` for text, booleans and
    /// non-finite numbers.
    #[allow(clippy::cast_possible_truncation)]
    pub fn format(
        &mut self,
        value: FormatArg<'_>,
        pos: Option<&mut FieldPosition>,
    ) -> Result<String, FormatError> {
        let time = match value {
            FormatArg::Calendar(calendar) => return Ok(self.format_calendar(calendar, pos)),
            FormatArg::Timestamp(time) => time,
            FormatArg::Integer(millis) => Timestamp::from_millis(millis),
            FormatArg::Float(millis) if millis.is_finite() => {
                Timestamp::from_millis(millis.trunc() as i64)
            }
            FormatArg::Float(_) | FormatArg::Text(_) | FormatArg::Bool(_) => {
                return Err(FormatError::UnsupportedInput(value.type_name()));
            }
        };
        self.calendar.set_time(time);
        let ctx = FormatContext::new(&self.number_format, self.attributes);
        Ok(self.strategy.format(&ctx, self.calendar.as_ref(), pos))
    }

    /// Formats the fields of `calendar` without modifying it
    pub fn format_calendar(&self, calendar: &dyn Calendar, pos: Option<&mut FieldPosition>) -> String {
        let ctx = FormatContext::new(&self.number_format, self.attributes);
        self.strategy.format(&ctx, calendar, pos)
    }

    pub fn format_timestamp(&mut self, time: Timestamp, pos: Option<&mut FieldPosition>) -> String {
        self.calendar.set_time(time);
        let ctx = FormatContext::new(&self.number_format, self.attributes);
        self.strategy.format(&ctx, self.calendar.as_ref(), pos)
    }

    /// Formats an instant with no position tracking
    pub fn format_date(&mut self, time: Timestamp) -> String {
        self.format_timestamp(time, None)
    }

    /// Parses into `calendar`, advancing `pos` past the consumed text.
    ///
    /// On failure `pos.error_index()` is set and `pos.index()` is unchanged.
    /// Fields read before the failure stay in the calendar.
    pub fn parse_calendar(&self, text: &str, calendar: &mut dyn Calendar, pos: &mut ParsePosition) {
        let ctx = FormatContext::new(&self.number_format, self.attributes);
        self.strategy.parse(&ctx, text, calendar, pos);
    }

    /// Parses an instant through the owned calendar.
    ///
    /// Returns `None` when nothing was consumed or when the parsed fields do
    /// not resolve (a strict calendar with an out-of-range field); in the
    /// latter case the error is reported at the start index. The calendar's
    /// zone is restored either way.
    pub fn parse_at(&mut self, text: &str, pos: &mut ParsePosition) -> Option<Timestamp> {
        let start = pos.index();
        let zone = self.calendar.time_zone().clone();
        self.calendar.clear();

        let ctx = FormatContext::new(&self.number_format, self.attributes);
        self.strategy.parse(&ctx, text, self.calendar.as_mut(), pos);

        let result = if pos.index() == start {
            None
        } else {
            match self.calendar.time() {
                Ok(time) => Some(time),
                Err(error) => {
                    trace!(%error, start, "parsed fields rejected by calendar");
                    pos.set_index(start);
                    pos.set_error_index(Some(start));
                    None
                }
            }
        };
        self.calendar.set_time_zone(zone);
        result
    }

    /// Parses an instant from the start of `text`. Trailing text is ignored.
    ///
    /// # Errors
    /// Returns `ParseError::Unparseable` if nothing could be consumed.
    pub fn parse(&mut self, text: &str) -> Result<Timestamp, ParseError> {
        let mut pos = ParsePosition::new(0);
        match self.parse_at(text, &mut pos) {
            Some(time) if pos.index() > 0 => Ok(time),
            _ => {
                let error_index = pos.error_index().unwrap_or(0);
                trace!(text, error_index, "unparseable date");
                Err(ParseError::Unparseable {
                    text: text.to_owned(),
                    error_index,
                })
            }
        }
    }

    pub fn calendar(&self) -> &dyn Calendar {
        self.calendar.as_ref()
    }

    pub fn calendar_mut(&mut self) -> &mut dyn Calendar {
        self.calendar.as_mut()
    }

    /// Replaces the owned calendar with a copy of `calendar`
    pub fn set_calendar(&mut self, calendar: &dyn Calendar) {
        self.calendar = calendar.box_clone();
    }

    pub const fn number_format(&self) -> &NumberFormat {
        &self.number_format
    }

    /// Replaces the number format. Parsing is always integer-only, whatever
    /// `number_format` says.
    pub fn set_number_format(&mut self, number_format: NumberFormat) {
        self.number_format = number_format;
        self.number_format.set_parse_integer_only(true);
    }

    pub fn set_time_zone(&mut self, zone: TimeZone) {
        self.calendar.set_time_zone(zone);
    }

    pub fn time_zone(&self) -> &TimeZone {
        self.calendar.time_zone()
    }

    pub fn set_lenient(&mut self, lenient: bool) {
        self.calendar.set_lenient(lenient);
    }

    pub fn is_lenient(&self) -> bool {
        self.calendar.is_lenient()
    }

    pub fn set_boolean_attribute(&mut self, attribute: BooleanAttribute, value: bool) -> &mut Self {
        self.attributes.set(attribute, value);
        self
    }

    pub const fn boolean_attribute(&self, attribute: BooleanAttribute) -> bool {
        self.attributes.get(attribute)
    }

    pub const fn boolean_attributes(&self) -> BooleanAttributes {
        self.attributes
    }

    /// Locale provenance; `None` until the resolver records it
    pub fn locale(&self, kind: LocaleKind) -> Option<&Locale> {
        match kind {
            LocaleKind::Valid => self.valid_locale.as_ref(),
            LocaleKind::Actual => self.actual_locale.as_ref(),
        }
    }

    pub fn set_locale(&mut self, valid: Option<Locale>, actual: Option<Locale>) {
        self.valid_locale = valid;
        self.actual_locale = actual;
    }

    pub fn kind(&self) -> FormatterKind {
        self.strategy.kind()
    }

    pub fn strategy(&self) -> &dyn FormatStrategy {
        self.strategy.as_ref()
    }

    /// The concrete formatter, if it is a `T`
    pub fn downcast_strategy<T: FormatStrategy + 'static>(&self) -> Option<&T> {
        self.strategy.as_any().downcast_ref()
    }

    pub fn downcast_strategy_mut<T: FormatStrategy + 'static>(&mut self) -> Option<&mut T> {
        self.strategy.as_any_mut().downcast_mut()
    }

    pub fn pattern(&self) -> String {
        self.strategy.pattern()
    }

    pub fn set_two_digit_year_window(&mut self, years: i32) {
        self.strategy.set_two_digit_year_window(years);
    }
}

impl PartialEq for DateFormat {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind()
            && self.calendar.is_equivalent_to(other.calendar.as_ref())
            && self.number_format == other.number_format
    }
}

impl Hash for DateFormat {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.number_format.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{CalendarField, SolarCalendar};
    use crate::date_field::DateField;
    use std::collections::hash_map::DefaultHasher;

    const FRIDAY: i64 = 1_710_510_330_250;

    fn en_us() -> Locale {
        Locale::from("en_US")
    }

    fn hash_of(format: &DateFormat) -> u64 {
        let mut hasher = DefaultHasher::new();
        format.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_format_inputs() {
        let mut format = DateFormat::from_pattern("y-MM-dd HH:mm", &en_us()).unwrap();
        let expected = "2024-03-15 13:45";
        assert_eq!(format.format(Timestamp::from_millis(FRIDAY).into(), None).unwrap(), expected);
        assert_eq!(format.format(FRIDAY.into(), None).unwrap(), expected);
        #[allow(clippy::cast_precision_loss)]
        let millis = FRIDAY as f64 + 0.9;
        assert_eq!(format.format(millis.into(), None).unwrap(), expected);

        let calendar = SolarCalendar::gregorian(&en_us()).with_time(Timestamp::from_millis(FRIDAY));
        let value = FormatArg::Calendar(&calendar);
        assert_eq!(format.format(value, None).unwrap(), expected);
    }

    #[test]
    fn test_unsupported_inputs() {
        let mut format = DateFormat::from_pattern("y", &en_us()).unwrap();
        assert_eq!(
            format.format("2024".into(), None),
            Err(FormatError::UnsupportedInput("String"))
        );
        assert_eq!(
            format.format(true.into(), None),
            Err(FormatError::UnsupportedInput("Boolean"))
        );
        assert!(format.format(f64::NAN.into(), None).is_err());
    }

    #[test]
    fn test_timestamp_input_copies_instant_only() {
        let mut format = DateFormat::from_pattern("HH:mm", &en_us()).unwrap();
        format.set_time_zone(TimeZone::from_offset(3_600_000));
        let text = format.format_date(Timestamp::from_millis(FRIDAY));
        assert_eq!(text, "14:45");
        assert_eq!(format.time_zone().raw_offset(), 3_600_000);
    }

    #[test]
    fn test_position_hint() {
        let mut format = DateFormat::from_pattern("MMM d, y", &en_us()).unwrap();
        let mut pos = FieldPosition::new(DateField::Date);
        let text = format.format_timestamp(Timestamp::from_millis(FRIDAY), Some(&mut pos));
        assert_eq!(&text[pos.begin()..pos.end()], "15");
    }

    #[test]
    fn test_parse_restores_zone() {
        let mut format = DateFormat::from_pattern("y-MM-dd HH:mm Z", &en_us()).unwrap();
        format.set_time_zone(TimeZone::from_offset(7_200_000));
        let time = format.parse("2024-03-15 13:45 +0000").unwrap();
        assert_eq!(time.millis(), FRIDAY - 30_250);
        assert_eq!(format.time_zone().raw_offset(), 7_200_000);
    }

    #[test]
    fn test_parse_empty_is_unparseable() {
        let mut format = DateFormat::from_pattern("y-MM-dd", &en_us()).unwrap();
        let original_zone = format.time_zone().clone();
        let err = format.parse("").unwrap_err();
        assert_eq!(err, ParseError::Unparseable {
            text:        String::new(),
            error_index: 0,
        });
        assert_eq!(format.time_zone(), &original_zone);
        assert_eq!(format.pattern(), "y-MM-dd");
    }

    #[test]
    fn test_partial_parse_is_accepted() {
        let mut format = DateFormat::from_pattern("y-MM-dd", &en_us()).unwrap();
        let mut pos = ParsePosition::new(0);
        let time = format.parse_at("2024-03-15 trailing", &mut pos);
        assert!(time.is_some());
        assert_eq!(pos.index(), 10);
        assert!(format.parse("2024-03-15 trailing").is_ok());
    }

    #[test]
    fn test_strict_out_of_range_reports_start() {
        let mut format = DateFormat::from_pattern("y-MM-dd", &en_us()).unwrap();
        format.set_lenient(false);
        let mut pos = ParsePosition::new(3);
        let time = format.parse_at("on 2023-02-29", &mut pos);
        assert_eq!(time, None);
        assert_eq!(pos.index(), 3);
        assert_eq!(pos.error_index(), Some(3));

        format.set_lenient(true);
        let mut pos = ParsePosition::new(3);
        assert!(format.parse_at("on 2023-02-29", &mut pos).is_some());
    }

    #[test]
    fn test_parse_calendar_leaves_fields_on_failure() {
        let format = DateFormat::from_pattern("y-MM-dd", &en_us()).unwrap();
        let mut calendar = SolarCalendar::gregorian(&en_us());
        calendar.clear();
        let mut pos = ParsePosition::new(0);
        format.parse_calendar("2024-xx", &mut calendar, &mut pos);
        assert_eq!(pos.index(), 0);
        assert_eq!(pos.error_index(), Some(5));
        assert!(calendar.is_set(CalendarField::Year));
    }

    #[test]
    fn test_number_format_forced_integer_only() {
        let mut format = DateFormat::from_pattern("y", &en_us()).unwrap();
        let mut nf = NumberFormat::new();
        nf.set_parse_integer_only(false);
        format.set_number_format(nf);
        assert!(format.number_format().is_parse_integer_only());
    }

    #[test]
    fn test_boolean_attributes_chain() {
        let mut format = DateFormat::from_pattern("y", &en_us()).unwrap();
        assert!(format.boolean_attribute(BooleanAttribute::ParseAllowNumeric));
        format
            .set_boolean_attribute(BooleanAttribute::ParseAllowNumeric, false)
            .set_boolean_attribute(BooleanAttribute::ParsePartialMatch, false);
        assert!(!format.boolean_attribute(BooleanAttribute::ParseAllowNumeric));
        assert!(!format.boolean_attribute(BooleanAttribute::ParsePartialMatch));
        assert!(format.boolean_attribute(BooleanAttribute::ParseAllowWhitespace));
    }

    #[test]
    fn test_equality_and_hash() {
        let a = DateFormat::from_pattern("y", &en_us()).unwrap();
        let b = DateFormat::from_pattern("MMM d", &en_us()).unwrap();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));

        let mut c = a.clone();
        c.set_lenient(false);
        assert_ne!(a, c);

        let mut d = a.clone();
        let mut nf = NumberFormat::new();
        nf.set_minimum_integer_digits(3);
        d.set_number_format(nf);
        assert_ne!(a, d);
        assert_ne!(hash_of(&a), hash_of(&d));
    }

    #[test]
    fn test_clone_is_independent() {
        let original = DateFormat::from_pattern("HH:mm", &en_us()).unwrap();
        let mut copy = original.clone();
        copy.set_time_zone(TimeZone::from_offset(-3_600_000));
        copy.set_boolean_attribute(BooleanAttribute::ParseAllowWhitespace, false);
        assert_eq!(original.time_zone(), &TimeZone::utc());
        assert!(original.boolean_attribute(BooleanAttribute::ParseAllowWhitespace));
    }

    #[test]
    fn test_from_pattern_records_locales() {
        let format = DateFormat::from_pattern("y", &Locale::from("de_AT")).unwrap();
        assert_eq!(format.locale(LocaleKind::Valid), Some(&Locale::from("de_AT")));
        assert_eq!(format.locale(LocaleKind::Actual), Some(&Locale::from("de")));
        assert!(format.downcast_strategy::<PatternFormat>().is_some());
        assert!(format.downcast_strategy::<RelativeFormat>().is_none());
    }

    #[test]
    fn test_from_pattern_rejects_bad_pattern() {
        let err = DateFormat::from_pattern("yyyy-bb", &en_us()).unwrap_err();
        assert!(matches!(err, crate::Error::Pattern(PatternError::IllegalPatternChar('b'))));
    }
}
