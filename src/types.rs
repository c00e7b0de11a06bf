use crate::consts::{MILLIS_PER_HOUR, MILLIS_PER_MINUTE};
use crate::date_field::DateField;
use crate::field::Field;
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// An instant, in milliseconds since 1970-01-01T00:00:00Z.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    From,
    Into,
    Serialize,
    Deserialize,
)]
#[display(fmt = "{}", _0)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp from milliseconds since the epoch
    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns milliseconds since the epoch
    #[inline]
    pub const fn millis(self) -> i64 {
        self.0
    }

    /// Current wall-clock time. Clock errors before the epoch read as negative offsets.
    pub fn now() -> Self {
        let millis = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX),
            Err(before) => i64::try_from(before.duration().as_millis()).map_or(i64::MIN, |m| -m),
        };
        Self(millis)
    }
}

/// A fixed-offset time zone.
///
/// Ids are normalized to `GMT`, `GMT+hh:mm` or `GMT-hh:mm` unless a custom
/// id is given to [`TimeZone::fixed`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeZone {
    id:            String,
    raw_offset_ms: i32,
}

impl TimeZone {
    /// The UTC zone, with id `GMT`
    pub fn utc() -> Self {
        Self {
            id:            "GMT".to_owned(),
            raw_offset_ms: 0,
        }
    }

    /// A zone with a caller-chosen id and raw offset
    pub fn fixed(id: impl Into<String>, raw_offset_ms: i32) -> Self {
        Self {
            id: id.into(),
            raw_offset_ms,
        }
    }

    /// A zone named after its offset, e.g. `GMT+05:30`
    pub fn from_offset(raw_offset_ms: i32) -> Self {
        Self {
            id: gmt_id(raw_offset_ms),
            raw_offset_ms,
        }
    }

    /// Parses `UTC`, `GMT`, `Z`, `GMT+5`, `GMT+05:30`, `UTC-0800` and bare
    /// `+hh:mm` offsets. Returns `None` for anything else.
    ///
    /// `Etc/GMT` ids use the POSIX sign, so `Etc/GMT+5` is five hours behind UTC.
    pub fn from_id(id: &str) -> Option<Self> {
        let trimmed = id.trim();
        if let Some(rest) = trimmed.strip_prefix("Etc/GMT") {
            if rest.is_empty() {
                return Some(Self::utc());
            }
            let offset = parse_offset(rest)?.checked_neg()?;
            return Some(Self::from_offset(offset));
        }
        let rest = trimmed
            .strip_prefix("GMT")
            .or_else(|| trimmed.strip_prefix("UTC"))
            .unwrap_or(trimmed);
        if rest.is_empty() || rest == "Z" {
            return Some(Self::utc());
        }
        let offset = parse_offset(rest)?;
        Some(Self::from_offset(offset))
    }

    /// Zone id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Offset from UTC in milliseconds
    #[inline]
    pub const fn raw_offset(&self) -> i32 {
        self.raw_offset_ms
    }
}

impl Default for TimeZone {
    fn default() -> Self {
        Self::utc()
    }
}

impl fmt::Display for TimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

fn gmt_id(offset_ms: i32) -> String {
    if offset_ms == 0 {
        return "GMT".to_owned();
    }
    let sign = if offset_ms < 0 { '-' } else { '+' };
    let total_minutes = i64::from(offset_ms).abs() / MILLIS_PER_MINUTE;
    format!("GMT{sign}{:02}:{:02}", total_minutes / 60, total_minutes % 60)
}

/// Parses `+h`, `+hh`, `+hhmm`, `+hh:mm` into milliseconds
fn parse_offset(s: &str) -> Option<i32> {
    let (negative, digits) = match s.as_bytes().first()? {
        b'+' => (false, &s[1..]),
        b'-' => (true, &s[1..]),
        _ => return None,
    };
    if !digits.is_ascii() {
        return None;
    }
    let (hours, minutes) = match digits.split_once(':') {
        Some((h, m)) => (h, m),
        None if digits.len() > 2 => digits.split_at(digits.len() - 2),
        None => (digits, "0"),
    };
    if hours.is_empty() || !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i64 = hours.parse().ok()?;
    let minutes: i64 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    let millis = hours * MILLIS_PER_HOUR + minutes * MILLIS_PER_MINUTE;
    i32::try_from(if negative { -millis } else { millis }).ok()
}

/// Which locale a piece of resolved data is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocaleKind {
    /// The most specific locale the request was accepted for
    Valid,
    /// The locale whose data was actually used after fallback
    Actual,
}

/// A locale identifier: language, optional region and optional calendar keyword.
///
/// Accepts `en_US`, `en-US`, `th_TH@calendar=buddhist` and
/// `ja-JP-u-ca-buddhist`. The empty string and `root` name the root locale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Locale {
    language: String,
    region:   Option<String>,
    calendar: Option<String>,
}

impl Locale {
    /// Root locale, the end of every fallback chain
    pub fn root() -> Self {
        Self::default()
    }

    /// Builds a locale from a language and optional region
    pub fn new(language: &str, region: Option<&str>) -> Self {
        Self {
            language: language.to_ascii_lowercase(),
            region:   region.map(str::to_ascii_uppercase),
            calendar: None,
        }
    }

    /// Returns a copy carrying a calendar keyword
    pub fn with_calendar(mut self, calendar: &str) -> Self {
        self.calendar = Some(calendar.to_ascii_lowercase());
        self
    }

    /// Language subtag, empty for root
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Region subtag, if any
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Requested calendar system, if any
    pub fn calendar_keyword(&self) -> Option<&str> {
        self.calendar.as_deref()
    }

    /// Whether this is the root locale
    pub fn is_root(&self) -> bool {
        self.language.is_empty()
    }

    /// Locale without keywords, e.g. `en_US` or `root`
    pub fn base_name(&self) -> String {
        match (&self.region, self.is_root()) {
            (_, true) => "root".to_owned(),
            (Some(region), false) => format!("{}_{region}", self.language),
            (None, false) => self.language.clone(),
        }
    }

    /// Next locale in the data fallback chain: `en_US` → `en` → `root`.
    /// Keywords are dropped.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            None
        } else if self.region.is_some() {
            Some(Self::new(&self.language, None))
        } else {
            Some(Self::root())
        }
    }

    /// Copy of this locale with keywords stripped
    pub fn without_keywords(&self) -> Self {
        Self {
            calendar: None,
            ..self.clone()
        }
    }
}

impl FromStr for Locale {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (main, keywords) = s.trim().split_once('@').unwrap_or((s.trim(), ""));
        let mut locale = Self::root();

        let mut subtags = main.split(['_', '-']).filter(|t| !t.is_empty());
        match subtags.next() {
            None => {}
            Some(first) if first.eq_ignore_ascii_case("root") => {}
            Some(first) => locale.language = first.to_ascii_lowercase(),
        }
        while let Some(tag) = subtags.next() {
            if tag.eq_ignore_ascii_case("u") {
                // unicode extension: key/value pairs
                while let Some(key) = subtags.next() {
                    if key.eq_ignore_ascii_case("ca") {
                        locale.calendar = subtags.next().map(str::to_ascii_lowercase);
                    }
                }
                break;
            }
            let is_region = (tag.len() == 2 && tag.bytes().all(|b| b.is_ascii_alphabetic()))
                || (tag.len() == 3 && tag.bytes().all(|b| b.is_ascii_digit()));
            if is_region && locale.region.is_none() {
                locale.region = Some(tag.to_ascii_uppercase());
            }
        }

        for keyword in keywords.split(';') {
            match keyword.split_once('=') {
                Some((key, value)) if key.trim().eq_ignore_ascii_case("calendar") => {
                    locale.calendar = Some(value.trim().to_ascii_lowercase());
                }
                _ => {}
            }
        }
        Ok(locale)
    }
}

impl From<&str> for Locale {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(locale) => locale,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base_name())?;
        if let Some(calendar) = &self.calendar {
            write!(f, "@calendar={calendar}")?;
        }
        Ok(())
    }
}

impl Serialize for Locale {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from(s.as_str()))
    }
}

/// What a [`FieldPosition`] is looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTarget {
    /// A format field id
    Id(DateField),
    /// A field attribute; any field id reported as this attribute matches
    Attribute(&'static Field),
}

/// Requests and receives the output span of one field.
///
/// On input it names the field; after formatting, `begin..end` is the byte
/// range of the first occurrence of that field, or `0..0` if absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPosition {
    target: FieldTarget,
    begin:  usize,
    end:    usize,
}

impl FieldPosition {
    /// Tracks a format field id
    pub const fn new(field: DateField) -> Self {
        Self {
            target: FieldTarget::Id(field),
            begin:  0,
            end:    0,
        }
    }

    /// Tracks a field attribute
    pub const fn for_attribute(field: &'static Field) -> Self {
        Self {
            target: FieldTarget::Attribute(field),
            begin:  0,
            end:    0,
        }
    }

    pub const fn target(&self) -> FieldTarget {
        self.target
    }

    pub const fn begin(&self) -> usize {
        self.begin
    }

    pub const fn end(&self) -> usize {
        self.end
    }

    /// Whether output of `field` should be reported here
    pub fn matches(&self, field: DateField) -> bool {
        match self.target {
            FieldTarget::Id(id) => id == field,
            FieldTarget::Attribute(attribute) => std::ptr::eq(attribute, field.attribute()),
        }
    }

    pub(crate) fn set_span(&mut self, begin: usize, end: usize) {
        self.begin = begin;
        self.end = end;
    }
}

impl From<DateField> for FieldPosition {
    fn from(field: DateField) -> Self {
        Self::new(field)
    }
}

/// Cursor for parsing: `index` advances on success, `error_index` is set on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParsePosition {
    index:       usize,
    error_index: Option<usize>,
}

impl ParsePosition {
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            error_index: None,
        }
    }

    pub const fn index(&self) -> usize {
        self.index
    }

    pub fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    pub const fn error_index(&self) -> Option<usize> {
        self.error_index
    }

    pub fn set_error_index(&mut self, index: Option<usize>) {
        self.error_index = index;
    }
}
