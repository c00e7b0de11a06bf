/// Renders and reads the integer values of numeric fields.
///
/// A plain value type: two formats are equal when every setting is equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NumberFormat {
    zero_digit:             char,
    minimum_integer_digits: usize,
    parse_integer_only:     bool,
    grouping_used:          bool,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            zero_digit:             '0',
            minimum_integer_digits: 1,
            parse_integer_only:     true,
            grouping_used:          false,
        }
    }
}

impl NumberFormat {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `zero` and the nine code points after it as digits, e.g. `'٠'`
    pub fn with_zero_digit(mut self, zero: char) -> Self {
        self.zero_digit = zero;
        self
    }

    pub const fn zero_digit(&self) -> char {
        self.zero_digit
    }

    pub const fn minimum_integer_digits(&self) -> usize {
        self.minimum_integer_digits
    }

    pub fn set_minimum_integer_digits(&mut self, digits: usize) {
        self.minimum_integer_digits = digits;
    }

    pub const fn is_parse_integer_only(&self) -> bool {
        self.parse_integer_only
    }

    pub fn set_parse_integer_only(&mut self, integer_only: bool) {
        self.parse_integer_only = integer_only;
    }

    pub const fn is_grouping_used(&self) -> bool {
        self.grouping_used
    }

    pub fn set_grouping_used(&mut self, grouping: bool) {
        self.grouping_used = grouping;
    }

    /// Formats `value` zero-padded to at least `min_digits` digits (or the
    /// format's own minimum, whichever is larger), keeping only the last
    /// `max_digits` digits when a limit is given.
    pub fn format_integer(&self, value: i64, min_digits: usize, max_digits: Option<usize>) -> String {
        let digits = value.unsigned_abs().to_string();
        let digits = match max_digits {
            Some(max) if digits.len() > max => &digits[digits.len() - max..],
            _ => digits.as_str(),
        };
        let width = min_digits.max(self.minimum_integer_digits);

        let mut out = String::with_capacity(width.max(digits.len()) + 1);
        if value < 0 {
            out.push('-');
        }
        let pad = width.saturating_sub(digits.len());
        let total = pad + digits.len();
        let padded = std::iter::repeat_n(0, pad).chain(digits.bytes().map(|b| b - b'0'));
        for (i, digit) in padded.enumerate() {
            if self.grouping_used && i > 0 && (total - i) % 3 == 0 {
                out.push(',');
            }
            out.push(self.digit(digit));
        }
        out
    }

    /// Reads a signed integer starting at byte `start`.
    ///
    /// At most `max_digits` digits are consumed when a limit is given, which
    /// is how abutting numeric fields are split. Returns the value and the
    /// byte index after the last consumed character.
    pub fn parse_integer(
        &self,
        text: &str,
        start: usize,
        max_digits: Option<usize>,
    ) -> Option<(i64, usize)> {
        let rest = text.get(start..)?;
        let mut chars = rest.char_indices().peekable();
        let negative = matches!(chars.peek(), Some((_, '-')));
        if negative {
            chars.next();
        }

        let mut value: i64 = 0;
        let mut count = 0;
        let mut end = None;
        for (offset, c) in chars {
            if max_digits.is_some_and(|max| count >= max) {
                break;
            }
            let Some(digit) = self.digit_value(c) else {
                if self.grouping_used && c == ',' && count > 0 {
                    continue;
                }
                break;
            };
            value = value.checked_mul(10)?.checked_add(i64::from(digit))?;
            count += 1;
            end = Some(start + offset + c.len_utf8());
        }
        let end = end?;
        Some((if negative { -value } else { value }, end))
    }

    fn digit(&self, value: u8) -> char {
        char::from_u32(u32::from(self.zero_digit) + u32::from(value))
            .unwrap_or(char::from(b'0' + value))
    }

    fn digit_value(&self, c: char) -> Option<u8> {
        if let Some(d) = c.to_digit(10) {
            return u8::try_from(d).ok();
        }
        let offset = u32::from(c).checked_sub(u32::from(self.zero_digit))?;
        if offset < 10 { u8::try_from(offset).ok() } else { None }
    }
}
