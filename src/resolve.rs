//! Style resolution: turns a `(date style, time style, locale)` request into
//! a ready formatter.

use crate::calendar::{self, Calendar};
use crate::consts::{DEFAULT_TWO_DIGIT_YEAR_WINDOW, FALLBACK_PATTERN};
use crate::data::{self, DateSymbols, EraNames, LocaleDataError};
use crate::format::{DateFormat, PatternFormat, RelativeFormat};
use crate::generator::{BasicPatternGenerator, PatternGenerator};
use crate::skeleton::Skeleton;
use crate::style::{StyleCode, StyleError, StyleKind, StylePair};
use crate::types::{Locale, LocaleKind, TimeZone};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Settings applied to every formatter a [`StyleResolver`] produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Locale of [`default_instance`]
    pub default_locale:        Locale,
    /// Zone id such as `GMT+05:30`; formatters keep their calendar's zone when unset
    pub time_zone:             Option<String>,
    pub lenient:               bool,
    /// Pattern of the formatter substituted when locale data is missing
    pub fallback_pattern:      String,
    pub two_digit_year_window: i32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_locale:        Locale::new("en", Some("US")),
            time_zone:             None,
            lenient:               true,
            fallback_pattern:      FALLBACK_PATTERN.to_owned(),
            two_digit_year_window: DEFAULT_TWO_DIGIT_YEAR_WINDOW,
        }
    }
}

/// Picks and builds the formatter for a style request.
#[derive(Debug, Clone, Default)]
pub struct StyleResolver {
    config: ResolverConfig,
    zone:   Option<TimeZone>,
}

static DEFAULT_RESOLVER: Lazy<StyleResolver> = Lazy::new(StyleResolver::default);

impl StyleResolver {
    /// A resolver for `config`. An unrecognized zone id is ignored with a warning.
    pub fn new(config: ResolverConfig) -> Self {
        let zone = config.time_zone.as_deref().and_then(|id| {
            let zone = TimeZone::from_id(id);
            if zone.is_none() {
                warn!(zone = id, "unrecognized time zone id in resolver config");
            }
            zone
        });
        Self { config, zone }
    }

    /// The resolver behind the crate-level convenience functions
    pub fn global() -> &'static Self {
        &DEFAULT_RESOLVER
    }

    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolves a style pair to a formatter.
    ///
    /// A relative bit on either code selects the relative formatter, which
    /// accepts any code. Otherwise both codes must be `NONE` or a level.
    /// `calendar` is adopted by the formatter; by default the locale's own
    /// calendar is used. When the calendar has no data for `locale` the
    /// configured fallback pattern is used instead.
    ///
    /// # Errors
    /// Returns `StyleError::IllegalStyle` for an invalid non-relative code and
    /// `StyleError::NoStyle` when both codes are `NONE`.
    pub fn resolve(
        &self,
        date_style: impl Into<StyleCode>,
        time_style: impl Into<StyleCode>,
        locale: &Locale,
        calendar: Option<Box<dyn Calendar>>,
    ) -> Result<DateFormat, StyleError> {
        let (date, time) = (date_style.into(), time_style.into());
        let calendar = calendar.unwrap_or_else(|| calendar::for_locale(locale));

        if date.is_relative() || time.is_relative() {
            debug!(%locale, date = date.code(), time = time.code(), "resolving relative formatter");
            let format = match RelativeFormat::new(time, date, locale, calendar.as_ref()) {
                Ok(relative) => DateFormat::new(Box::new(relative), calendar),
                Err(error) => self.fallback(locale, calendar, &error),
            };
            return Ok(self.configure(format));
        }

        let date_level = date.level().map_err(|value| StyleError::IllegalStyle {
            kind: StyleKind::Date,
            value,
        })?;
        let time_level = time.level().map_err(|value| StyleError::IllegalStyle {
            kind: StyleKind::Time,
            value,
        })?;
        let styles = StylePair::new(date_level, time_level).ok_or(StyleError::NoStyle)?;

        debug!(%locale, calendar = calendar.calendar_type(), ?styles, "resolving style formatter");
        let format = match calendar.date_time_format(styles, locale) {
            Ok(format) => format,
            Err(error) => self.fallback(locale, calendar, &error),
        };
        Ok(self.configure(format))
    }

    /// Resolves a skeleton through the locale's pattern generator.
    ///
    /// # Errors
    /// Returns `Error::Pattern` if the generated pattern does not compile,
    /// which happens when the skeleton carries letters that name no field.
    pub fn resolve_skeleton(
        &self,
        skeleton: &Skeleton,
        locale: &Locale,
        calendar: Option<Box<dyn Calendar>>,
    ) -> Result<DateFormat, crate::Error> {
        self.resolve_skeleton_with(&BasicPatternGenerator::for_locale(locale), skeleton, locale, calendar)
    }

    /// [`StyleResolver::resolve_skeleton`] with a caller-supplied generator
    ///
    /// # Errors
    /// Returns `Error::Pattern` if the generated pattern does not compile.
    pub fn resolve_skeleton_with(
        &self,
        generator: &dyn PatternGenerator,
        skeleton: &Skeleton,
        locale: &Locale,
        calendar: Option<Box<dyn Calendar>>,
    ) -> Result<DateFormat, crate::Error> {
        let calendar = calendar.unwrap_or_else(|| calendar::for_locale(locale));
        let pattern = generator.best_pattern(skeleton);
        debug!(%locale, %skeleton, %pattern, "resolving skeleton formatter");

        let symbols = symbols_or_root(calendar.as_ref(), locale);
        let strategy = PatternFormat::new(&pattern, symbols)?;
        Ok(self.configure(DateFormat::new(Box::new(strategy), calendar)))
    }

    /// Provenance from the calendar, then the configured zone, leniency and
    /// two-digit-year window
    fn configure(&self, mut format: DateFormat) -> DateFormat {
        let valid = format.calendar().locale(LocaleKind::Valid).cloned();
        let actual = format.calendar().locale(LocaleKind::Actual).cloned();
        format.set_locale(valid, actual);
        if let Some(zone) = &self.zone {
            format.set_time_zone(zone.clone());
        }
        format.set_lenient(self.config.lenient);
        format.set_two_digit_year_window(self.config.two_digit_year_window);
        format
    }

    /// The degraded formatter used when locale data is missing
    fn fallback(
        &self,
        locale: &Locale,
        calendar: Box<dyn Calendar>,
        error: &LocaleDataError,
    ) -> DateFormat {
        warn!(
            %locale,
            %error,
            pattern = %self.config.fallback_pattern,
            "locale data unavailable, substituting fallback formatter"
        );
        let symbols = symbols_or_root(calendar.as_ref(), locale);
        let strategy = PatternFormat::new(&self.config.fallback_pattern, symbols).unwrap_or_else(|error| {
            warn!(%error, "fallback pattern unusable, using built-in pattern");
            PatternFormat::last_resort()
        });
        DateFormat::new(Box::new(strategy), calendar)
    }
}

fn symbols_or_root(calendar: &dyn Calendar, locale: &Locale) -> DateSymbols {
    calendar.date_symbols(locale).unwrap_or_else(|_| {
        let root = data::root_data();
        DateSymbols::new(root, EraNames::from(&root.eras))
    })
}

/// Date-only formatter at `style` with the default resolver.
///
/// # Errors
/// Returns `StyleError` if `style` is not a valid style.
pub fn date_instance(
    style: impl Into<StyleCode>,
    locale: &Locale,
    calendar: Option<Box<dyn Calendar>>,
) -> Result<DateFormat, StyleError> {
    StyleResolver::global().resolve(style, StyleCode::NONE, locale, calendar)
}

/// Time-only formatter at `style` with the default resolver.
///
/// # Errors
/// Returns `StyleError` if `style` is not a valid style.
pub fn time_instance(
    style: impl Into<StyleCode>,
    locale: &Locale,
    calendar: Option<Box<dyn Calendar>>,
) -> Result<DateFormat, StyleError> {
    StyleResolver::global().resolve(StyleCode::NONE, style, locale, calendar)
}

/// Date and time formatter with the default resolver.
///
/// # Errors
/// Returns `StyleError` if either style is not a valid style.
pub fn date_time_instance(
    date_style: impl Into<StyleCode>,
    time_style: impl Into<StyleCode>,
    locale: &Locale,
    calendar: Option<Box<dyn Calendar>>,
) -> Result<DateFormat, StyleError> {
    StyleResolver::global().resolve(date_style, time_style, locale, calendar)
}

/// Short date and short time in the default locale.
///
/// # Errors
/// Returns `StyleError` only if the default resolver is misconfigured.
pub fn default_instance(calendar: Option<Box<dyn Calendar>>) -> Result<DateFormat, StyleError> {
    let resolver = StyleResolver::global();
    resolver.resolve(StyleCode::SHORT, StyleCode::SHORT, &resolver.config.default_locale, calendar)
}

/// Skeleton formatter with the default resolver.
///
/// # Errors
/// Returns `Error::Pattern` if the generated pattern does not compile.
pub fn instance_for_skeleton(
    skeleton: &Skeleton,
    locale: &Locale,
    calendar: Option<Box<dyn Calendar>>,
) -> Result<DateFormat, crate::Error> {
    StyleResolver::global().resolve_skeleton(skeleton, locale, calendar)
}
