//! Field-set requests in pattern-letter form, e.g. `yMMMd` for "year,
//! abbreviated month, day" in whatever order the locale prefers.

use crate::prelude::*;
use serde::{Deserialize, Serialize};

/// A skeleton: the fields to show, without order or literals.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Deref, Display, From, Into, Serialize, Deserialize,
)]
#[display(fmt = "{}", _0)]
#[serde(transparent)]
pub struct Skeleton(String);

impl Skeleton {
    pub fn new(skeleton: impl Into<String>) -> Self {
        Self(skeleton.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Skeleton {
    fn from(skeleton: &str) -> Self {
        Self(skeleton.to_owned())
    }
}

pub const YEAR: &str = "y";
pub const QUARTER: &str = "QQQQ";
pub const ABBR_QUARTER: &str = "QQQ";
pub const YEAR_QUARTER: &str = "yQQQQ";
pub const YEAR_ABBR_QUARTER: &str = "yQQQ";
pub const MONTH: &str = "MMMM";
pub const ABBR_MONTH: &str = "MMM";
pub const NUM_MONTH: &str = "M";
pub const YEAR_MONTH: &str = "yMMMM";
pub const YEAR_ABBR_MONTH: &str = "yMMM";
pub const YEAR_NUM_MONTH: &str = "yM";
pub const DAY: &str = "d";
pub const YEAR_MONTH_DAY: &str = "yMMMMd";
pub const YEAR_ABBR_MONTH_DAY: &str = "yMMMd";
pub const YEAR_NUM_MONTH_DAY: &str = "yMd";
pub const WEEKDAY: &str = "EEEE";
pub const ABBR_WEEKDAY: &str = "E";
pub const YEAR_MONTH_WEEKDAY_DAY: &str = "yMMMMEEEEd";
pub const YEAR_ABBR_MONTH_WEEKDAY_DAY: &str = "yMMMEd";
pub const YEAR_NUM_MONTH_WEEKDAY_DAY: &str = "yMEd";
pub const MONTH_DAY: &str = "MMMMd";
pub const ABBR_MONTH_DAY: &str = "MMMd";
pub const NUM_MONTH_DAY: &str = "Md";
pub const MONTH_WEEKDAY_DAY: &str = "MMMMEEEEd";
pub const ABBR_MONTH_WEEKDAY_DAY: &str = "MMMEd";
pub const NUM_MONTH_WEEKDAY_DAY: &str = "MEd";

/// Hour in the locale's preferred cycle
pub const HOUR: &str = "j";
pub const HOUR24: &str = "H";
pub const MINUTE: &str = "m";
pub const HOUR_MINUTE: &str = "jm";
pub const HOUR24_MINUTE: &str = "Hm";
pub const SECOND: &str = "s";
pub const HOUR_MINUTE_SECOND: &str = "jms";
pub const HOUR24_MINUTE_SECOND: &str = "Hms";
pub const MINUTE_SECOND: &str = "ms";

pub const LOCATION_TZ: &str = "VVVV";
pub const GENERIC_TZ: &str = "vvvv";
pub const ABBR_GENERIC_TZ: &str = "v";
pub const SPECIFIC_TZ: &str = "zzzz";
pub const ABBR_SPECIFIC_TZ: &str = "z";
pub const ABBR_UTC_TZ: &str = "ZZZZ";

pub const STANDALONE_MONTH: &str = "LLLL";
pub const ABBR_STANDALONE_MONTH: &str = "LLL";

pub const HOUR_MINUTE_GENERIC_TZ: &str = "jmv";
pub const HOUR_MINUTE_TZ: &str = "jmz";
pub const HOUR_GENERIC_TZ: &str = "jv";
pub const HOUR_TZ: &str = "jz";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skeleton_is_passed_through_unmodified() {
        let skeleton = Skeleton::from(YEAR_ABBR_MONTH_WEEKDAY_DAY);
        assert_eq!(skeleton.as_str(), "yMMMEd");
        assert_eq!(skeleton.len(), 6);
        assert_eq!(skeleton.to_string(), "yMMMEd");
        let raw: String = skeleton.into();
        assert_eq!(raw, "yMMMEd");
    }

    #[test]
    fn test_serde_transparent() {
        let skeleton = Skeleton::new(HOUR_MINUTE_TZ);
        let json = serde_json::to_string(&skeleton).unwrap();
        assert_eq!(json, r#""jmz""#);
        assert_eq!(serde_json::from_str::<Skeleton>(&json).unwrap(), skeleton);
    }
}
