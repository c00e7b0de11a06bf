use crate::calendar::CalendarError;
use crate::data::LocaleDataError;
use crate::field::FieldError;
use crate::format::{FormatError, ParseError, PatternError};
use crate::style::StyleError;

/// Any error this crate returns.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Style(#[from] StyleError),

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Calendar(#[from] CalendarError),

    #[error(transparent)]
    LocaleData(#[from] LocaleDataError),
}
