//! Locale-aware date/time formatter resolution.
//!
//! A request names a date style, a time style and a locale; the
//! [`StyleResolver`] validates it and asks the locale's [`Calendar`] for the
//! formatter it considers right. The resulting [`DateFormat`] formats and
//! parses through a swappable strategy, either a literal pattern or relative
//! day phrasing ("Yesterday", "Tomorrow").
//!
//! Field identities are stable in two directions: format field ids
//! ([`DateField`]) are fixed numbers, and field attributes ([`Field`]) are
//! process-wide singletons looked up through the [`FieldRegistry`] once
//! [`field::init`] has run.
//!
//! ```
//! use datefmt::{DateFormat, Locale, Style, Timestamp};
//!
//! let mut format = DateFormat::date_instance(Style::Long, &Locale::from("en_US")).unwrap();
//! assert_eq!(format.format_date(Timestamp::from_millis(1_710_510_330_250)), "March 15, 2024");
//! ```

mod attribute;
pub mod calendar;
mod consts;
mod data;
mod date_field;
mod error;
pub mod field;
pub mod format;
mod generator;
mod number;
mod prelude;
mod resolve;
pub mod skeleton;
mod style;
mod types;

pub use attribute::{BooleanAttribute, BooleanAttributes};
pub use calendar::{Calendar, CalendarError, CalendarField, SolarCalendar};
pub use consts::*;
pub use data::{
    DateSymbols, EraNames, HourCycle, LocaleData, LocaleDataError, Names, SkeletonShapes,
    StylePatterns, available_locales,
};
pub use date_field::DateField;
pub use error::Error;
pub use field::{Field, FieldError, FieldRegistry};
pub use format::{
    DateFormat, FormatArg, FormatError, FormatStrategy, FormatterKind, ParseError, PatternError,
    PatternFormat, RelativeFormat,
};
pub use generator::{BasicPatternGenerator, PatternGenerator};
pub use number::NumberFormat;
pub use resolve::{
    ResolverConfig, StyleResolver, date_instance, date_time_instance, default_instance,
    instance_for_skeleton, time_instance,
};
pub use skeleton::Skeleton;
pub use style::{Style, StyleCode, StyleError, StyleKind, StylePair};
pub use types::{FieldPosition, FieldTarget, Locale, LocaleKind, ParsePosition, TimeZone, Timestamp};
