//! Field attributes and the process-wide registry that gives them identity.
//!
//! Every standard [`Field`] is a `static`, so its address is its identity.
//! The registry indexes those statics by name and by calendar field number;
//! a `Field` that was copied by value (deserialized, sent across a boundary)
//! gets its identity back through [`Field::resolve`].

use crate::calendar::CalendarField;
use crate::prelude::*;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named field attribute usable as a rich-text annotation key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{}", name)]
pub struct Field {
    name:           &'static str,
    calendar_field: Option<CalendarField>,
}

/// Error type for field identity lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// Calendar field number outside the calendar's field count.
    #[error("Calendar field number is out of range: {0}")]
    OutOfRange(i32),

    /// Format field id outside `0..FIELD_COUNT`.
    #[error("Format field id is out of range: {0}")]
    InvalidFieldId(i32),

    /// No attribute is registered under this name.
    #[error("Unknown attribute name: {0:?}")]
    UnknownAttribute(String),

    /// An attribute with this name is already registered.
    #[error("Attribute already registered: {0:?}")]
    DuplicateName(&'static str),

    /// The registry was looked up before [`init`] ran.
    #[error("Field registry is not initialized")]
    Uninitialized,
}

impl Field {
    const fn new(name: &'static str, calendar_field: Option<CalendarField>) -> Self {
        Self {
            name,
            calendar_field,
        }
    }

    /// Attribute name, e.g. `"day of month"`
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Calendar field this attribute reads, or `None` for attributes with no
    /// direct calendar counterpart (time zone, quarter, one-based hours)
    pub const fn calendar_field(&self) -> Option<CalendarField> {
        self.calendar_field
    }

    /// Numeric calendar field, `-1` when there is none
    pub fn calendar_field_id(&self) -> i32 {
        self.calendar_field.map_or(-1, CalendarField::id)
    }

    /// Returns the registered singleton with this field's name.
    ///
    /// # Errors
    /// Returns `FieldError::UnknownAttribute` if the name is not registered,
    /// or `FieldError::Uninitialized` before [`init`].
    pub fn resolve(&self) -> Result<&'static Self, FieldError> {
        FieldRegistry::global()?.by_name(self.name)
    }

    /// The attribute registered for a calendar field number.
    ///
    /// # Errors
    /// Returns `FieldError::OutOfRange` if `calendar_field` is negative or not
    /// below the calendar's field count, or `FieldError::Uninitialized`
    /// before [`init`].
    pub fn of_calendar_field(calendar_field: i32) -> Result<Option<&'static Self>, FieldError> {
        FieldRegistry::global()?.by_calendar_field(calendar_field)
    }
}

pub static AM_PM: Field = Field::new("am pm", Some(CalendarField::AmPm));
pub static DAY_OF_MONTH: Field = Field::new("day of month", Some(CalendarField::Date));
pub static DAY_OF_WEEK: Field = Field::new("day of week", Some(CalendarField::DayOfWeek));
pub static DAY_OF_WEEK_IN_MONTH: Field =
    Field::new("day of week in month", Some(CalendarField::DayOfWeekInMonth));
pub static DAY_OF_YEAR: Field = Field::new("day of year", Some(CalendarField::DayOfYear));
pub static ERA: Field = Field::new("era", Some(CalendarField::Era));
pub static HOUR_OF_DAY0: Field = Field::new("hour of day", Some(CalendarField::HourOfDay));
pub static HOUR_OF_DAY1: Field = Field::new("hour of day 1", None);
pub static HOUR0: Field = Field::new("hour", Some(CalendarField::Hour));
pub static HOUR1: Field = Field::new("hour 1", None);
pub static MILLISECOND: Field = Field::new("millisecond", Some(CalendarField::Millisecond));
pub static MINUTE: Field = Field::new("minute", Some(CalendarField::Minute));
pub static MONTH: Field = Field::new("month", Some(CalendarField::Month));
pub static SECOND: Field = Field::new("second", Some(CalendarField::Second));
pub static TIME_ZONE: Field = Field::new("time zone", None);
pub static WEEK_OF_MONTH: Field = Field::new("week of month", Some(CalendarField::WeekOfMonth));
pub static WEEK_OF_YEAR: Field = Field::new("week of year", Some(CalendarField::WeekOfYear));
pub static YEAR: Field = Field::new("year", Some(CalendarField::Year));
pub static DOW_LOCAL: Field = Field::new("local day of week", Some(CalendarField::DowLocal));
pub static EXTENDED_YEAR: Field = Field::new("extended year", Some(CalendarField::ExtendedYear));
pub static JULIAN_DAY: Field = Field::new("Julian day", Some(CalendarField::JulianDay));
pub static MILLISECONDS_IN_DAY: Field =
    Field::new("milliseconds in day", Some(CalendarField::MillisecondsInDay));
pub static YEAR_WOY: Field = Field::new("year for week of year", Some(CalendarField::YearWoy));
pub static QUARTER: Field = Field::new("quarter", None);

/// The standard attributes, in registration order
pub static STANDARD_FIELDS: [&Field; 24] = [
    &AM_PM,
    &DAY_OF_MONTH,
    &DAY_OF_WEEK,
    &DAY_OF_WEEK_IN_MONTH,
    &DAY_OF_YEAR,
    &ERA,
    &HOUR_OF_DAY0,
    &HOUR_OF_DAY1,
    &HOUR0,
    &HOUR1,
    &MILLISECOND,
    &MINUTE,
    &MONTH,
    &SECOND,
    &TIME_ZONE,
    &WEEK_OF_MONTH,
    &WEEK_OF_YEAR,
    &YEAR,
    &DOW_LOCAL,
    &EXTENDED_YEAR,
    &JULIAN_DAY,
    &MILLISECONDS_IN_DAY,
    &YEAR_WOY,
    &QUARTER,
];

/// Bidirectional index of field attributes by name and by calendar field.
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    by_calendar_field: Vec<Option<&'static Field>>,
    by_name:           HashMap<&'static str, &'static Field>,
}

static GLOBAL: OnceCell<FieldRegistry> = OnceCell::new();

/// Builds the process-wide registry. Call once at startup, before any
/// attribute lookup. Idempotent; later calls return the same instance.
pub fn init() -> &'static FieldRegistry {
    GLOBAL.get_or_init(FieldRegistry::standard)
}

impl FieldRegistry {
    /// An empty registry whose calendar-field table has `calendar_field_count` slots
    pub fn with_field_count(calendar_field_count: usize) -> Self {
        Self {
            by_calendar_field: vec![None; calendar_field_count],
            by_name:           HashMap::with_capacity(calendar_field_count),
        }
    }

    /// A registry holding [`STANDARD_FIELDS`], sized for the reference calendar
    pub fn standard() -> Self {
        let mut registry = Self::with_field_count(crate::calendar::reference_field_count());
        for field in STANDARD_FIELDS {
            let registered = registry.register(field);
            debug_assert!(registered.is_ok(), "duplicate standard field {}", field.name);
        }
        registry
    }

    /// The process-wide registry built by [`init`].
    ///
    /// # Errors
    /// Returns `FieldError::Uninitialized` if [`init`] has not run.
    pub fn global() -> Result<&'static Self, FieldError> {
        GLOBAL.get().ok_or(FieldError::Uninitialized)
    }

    /// Adds a field to both indexes.
    ///
    /// # Errors
    /// Returns `FieldError::DuplicateName` if the name is taken; the registry
    /// is left unchanged.
    pub fn register(&mut self, field: &'static Field) -> Result<(), FieldError> {
        if self.by_name.contains_key(field.name) {
            return Err(FieldError::DuplicateName(field.name));
        }
        self.by_name.insert(field.name, field);
        if let Some(slot) = field
            .calendar_field
            .and_then(|cf| self.by_calendar_field.get_mut(cf.index()))
        {
            *slot = Some(field);
        }
        Ok(())
    }

    /// Looks up the attribute for a calendar field number.
    ///
    /// Returns `Ok(None)` for an in-range number with no attribute.
    ///
    /// # Errors
    /// Returns `FieldError::OutOfRange` if `calendar_field` is negative or not
    /// below [`FieldRegistry::field_count`].
    pub fn by_calendar_field(
        &self,
        calendar_field: i32,
    ) -> Result<Option<&'static Field>, FieldError> {
        let index = usize::try_from(calendar_field)
            .ok()
            .filter(|&i| i < self.by_calendar_field.len())
            .ok_or(FieldError::OutOfRange(calendar_field))?;
        Ok(self.by_calendar_field[index])
    }

    /// Looks up an attribute by name.
    ///
    /// # Errors
    /// Returns `FieldError::UnknownAttribute` if nothing is registered under `name`.
    pub fn by_name(&self, name: &str) -> Result<&'static Field, FieldError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| FieldError::UnknownAttribute(name.to_owned()))
    }

    /// Size of the calendar-field table
    pub fn field_count(&self) -> usize {
        self.by_calendar_field.len()
    }

    /// Registered attributes, in no particular order
    pub fn fields(&self) -> impl Iterator<Item = &'static Field> + '_ {
        self.by_name.values().copied()
    }
}

impl Serialize for Field {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name)
    }
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        FieldRegistry::global()
            .and_then(|registry| registry.by_name(&name))
            .copied()
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_by_name_returns_the_static() {
        let registry = init();
        let found = registry.by_name("day of month").unwrap();
        assert!(std::ptr::eq(found, &DAY_OF_MONTH));
        assert!(std::ptr::eq(init(), registry));
    }

    #[test]
    fn test_by_calendar_field_round_trip() {
        let registry = init();
        let mut mapped = 0;
        for id in 0..i32::try_from(registry.field_count()).unwrap() {
            if let Some(field) = registry.by_calendar_field(id).unwrap() {
                let by_name = registry.by_name(field.name()).unwrap();
                assert!(std::ptr::eq(by_name, field));
                assert_eq!(field.calendar_field_id(), id);
                mapped += 1;
            }
        }
        assert!(mapped >= 18);
    }

    #[test]
    fn test_indexes_agree() {
        let registry = init();
        for field in registry.fields() {
            if field.calendar_field_id() >= 0 {
                let by_id = registry
                    .by_calendar_field(field.calendar_field_id())
                    .unwrap()
                    .unwrap();
                assert!(std::ptr::eq(by_id, field), "{} disagrees", field.name());
            }
        }
    }

    #[test]
    fn test_out_of_range() {
        let registry = init();
        assert_eq!(registry.by_calendar_field(-1), Err(FieldError::OutOfRange(-1)));
        assert_eq!(registry.by_calendar_field(34), Err(FieldError::OutOfRange(34)));
        let count = i32::try_from(registry.field_count()).unwrap();
        assert_eq!(registry.by_calendar_field(count), Err(FieldError::OutOfRange(count)));
    }

    #[test]
    fn test_unmapped_slot_is_not_an_error() {
        let registry = init();
        let zone_offset = CalendarField::ZoneOffset.id();
        assert_eq!(registry.by_calendar_field(zone_offset), Ok(None));
    }

    #[test]
    fn test_fields_without_calendar_counterpart() {
        assert_eq!(TIME_ZONE.calendar_field(), None);
        assert_eq!(QUARTER.calendar_field_id(), -1);
        assert_eq!(HOUR1.calendar_field_id(), -1);
        assert_eq!(init().by_name("quarter").unwrap(), &QUARTER);
    }

    #[test]
    fn test_unknown_name() {
        let result = init().by_name("fortnight");
        assert!(matches!(result, Err(FieldError::UnknownAttribute(name)) if name == "fortnight"));
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = FieldRegistry::standard();
        assert_eq!(registry.register(&YEAR), Err(FieldError::DuplicateName("year")));
        assert!(std::ptr::eq(registry.by_name("year").unwrap(), &YEAR));
    }

    #[test]
    fn test_resolve_restores_identity() {
        init();
        let copy: Field = YEAR;
        assert!(!std::ptr::eq(&copy, &YEAR));
        assert!(std::ptr::eq(copy.resolve().unwrap(), &YEAR));
    }

    #[test]
    fn test_serde_restores_identity() {
        init();
        let json = serde_json::to_string(&MINUTE).unwrap();
        assert_eq!(json, r#""minute""#);
        let parsed: Field = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, MINUTE);
        assert!(std::ptr::eq(parsed.resolve().unwrap(), &MINUTE));

        let result: Result<Field, _> = serde_json::from_str(r#""no such field""#);
        assert!(result.unwrap_err().to_string().contains("Unknown attribute"));
    }

    #[test]
    fn test_display_is_name() {
        assert_eq!(JULIAN_DAY.to_string(), "Julian day");
    }

    proptest! {
        #[test]
        fn prop_calendar_field_lookup_never_panics(id in any::<i32>()) {
            let registry = init();
            let in_range = usize::try_from(id).is_ok_and(|i| i < registry.field_count());
            prop_assert_eq!(registry.by_calendar_field(id).is_ok(), in_range);
        }
    }
}
