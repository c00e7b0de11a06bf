// Format field ids. These numbers are persisted by callers (field positions,
// serialized results) and must never be renumbered.

/// Era field id (`G`)
pub const ERA_FIELD: i32 = 0;
/// Year field id (`y`)
pub const YEAR_FIELD: i32 = 1;
/// Month field id (`M`)
pub const MONTH_FIELD: i32 = 2;
/// Day of month field id (`d`)
pub const DATE_FIELD: i32 = 3;
/// One-based hour of day field id (`k`, 1..=24)
pub const HOUR_OF_DAY1_FIELD: i32 = 4;
/// Zero-based hour of day field id (`H`, 0..=23)
pub const HOUR_OF_DAY0_FIELD: i32 = 5;
/// Minute field id (`m`)
pub const MINUTE_FIELD: i32 = 6;
/// Second field id (`s`)
pub const SECOND_FIELD: i32 = 7;
/// Fractional second field id (`S`)
pub const FRACTIONAL_SECOND_FIELD: i32 = 8;
/// Alias of [`FRACTIONAL_SECOND_FIELD`]
pub const MILLISECOND_FIELD: i32 = FRACTIONAL_SECOND_FIELD;
/// Day of week field id (`E`)
pub const DAY_OF_WEEK_FIELD: i32 = 9;
/// Day of year field id (`D`)
pub const DAY_OF_YEAR_FIELD: i32 = 10;
/// Day of week in month field id (`F`)
pub const DAY_OF_WEEK_IN_MONTH_FIELD: i32 = 11;
/// Week of year field id (`w`)
pub const WEEK_OF_YEAR_FIELD: i32 = 12;
/// Week of month field id (`W`)
pub const WEEK_OF_MONTH_FIELD: i32 = 13;
/// AM/PM marker field id (`a`)
pub const AM_PM_FIELD: i32 = 14;
/// One-based hour in day period field id (`h`, 1..=12)
pub const HOUR1_FIELD: i32 = 15;
/// Zero-based hour in day period field id (`K`, 0..=11)
pub const HOUR0_FIELD: i32 = 16;
/// Time zone field id (`z`)
pub const TIMEZONE_FIELD: i32 = 17;
/// Year for week of year field id (`Y`)
pub const YEAR_WOY_FIELD: i32 = 18;
/// Local day of week field id (`e`)
pub const DOW_LOCAL_FIELD: i32 = 19;
/// Extended year field id (`u`)
pub const EXTENDED_YEAR_FIELD: i32 = 20;
/// Modified Julian day field id (`g`)
pub const JULIAN_DAY_FIELD: i32 = 21;
/// Milliseconds in day field id (`A`)
pub const MILLISECONDS_IN_DAY_FIELD: i32 = 22;
/// RFC 822 time zone field id (`Z`)
pub const TIMEZONE_RFC_FIELD: i32 = 23;
/// Generic time zone field id (`v`)
pub const TIMEZONE_GENERIC_FIELD: i32 = 24;
/// Stand-alone day of week field id (`c`)
pub const STANDALONE_DAY_FIELD: i32 = 25;
/// Stand-alone month field id (`L`)
pub const STANDALONE_MONTH_FIELD: i32 = 26;
/// Quarter field id (`Q`)
pub const QUARTER_FIELD: i32 = 27;
/// Stand-alone quarter field id (`q`)
pub const STANDALONE_QUARTER_FIELD: i32 = 28;
/// Special time zone field id (`V`)
pub const TIMEZONE_SPECIAL_FIELD: i32 = 29;
/// Cyclic year name field id (`U`)
pub const YEAR_NAME_FIELD: i32 = 30;
/// Localized GMT offset field id (`O`)
pub const TIMEZONE_LOCALIZED_GMT_OFFSET_FIELD: i32 = 31;
/// ISO 8601 time zone field id with `Z` for UTC (`X`)
pub const TIMEZONE_ISO_FIELD: i32 = 32;
/// ISO 8601 local time zone field id (`x`)
pub const TIMEZONE_ISO_LOCAL_FIELD: i32 = 33;

/// Number of format field ids. Must equal `PATTERN_CHARS.len()`.
pub const FIELD_COUNT: usize = 34;

/// Pattern letters indexed by format field id
pub const PATTERN_CHARS: &str = "GyMdkHmsSEDFwWahKzYeugAZvcLQqVUOXx";

// Style codes

/// No date or no time component
pub const NONE: i32 = -1;
/// Full style, e.g. "Tuesday, April 12, 1952 AD"
pub const FULL: i32 = 0;
/// Long style, e.g. "January 12, 1952"
pub const LONG: i32 = 1;
/// Medium style, e.g. "Jan 12, 1952"
pub const MEDIUM: i32 = 2;
/// Short style, e.g. "12/13/52"
pub const SHORT: i32 = 3;
/// Style used when none is given
pub const DEFAULT: i32 = MEDIUM;
/// Bit OR'ed into a style to request relative day phrasing
pub const RELATIVE: i32 = 1 << 7;
/// Relative full style
pub const RELATIVE_FULL: i32 = RELATIVE | FULL;
/// Relative long style
pub const RELATIVE_LONG: i32 = RELATIVE | LONG;
/// Relative medium style
pub const RELATIVE_MEDIUM: i32 = RELATIVE | MEDIUM;
/// Relative short style
pub const RELATIVE_SHORT: i32 = RELATIVE | SHORT;
/// Relative default style
pub const RELATIVE_DEFAULT: i32 = RELATIVE | DEFAULT;

/// Last-resort pattern used when no locale data is available at all
pub const FALLBACK_PATTERN: &str = "M/d/yy h:mm a";

// Calendar arithmetic

/// Maximum valid month (December, one-based)
pub(crate) const MAX_MONTH: u8 = 12;

/// Month number for February (one-based)
pub(crate) const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub(crate) const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub(crate) const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i64 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i64 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i64 = 400;

pub(crate) const MILLIS_PER_SECOND: i64 = 1_000;
pub(crate) const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
pub(crate) const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
pub(crate) const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// Julian day number of 1970-01-01
pub(crate) const EPOCH_JULIAN_DAY: i64 = 2_440_588;

/// Buddhist era starts 543 years before the common era
pub(crate) const BUDDHIST_ERA_OFFSET: i32 = 543;

/// Default width of the two-digit-year window, in years before "now"
pub const DEFAULT_TWO_DIGIT_YEAR_WINDOW: i32 = 80;
