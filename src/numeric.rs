//! Lenient numeric coercion and number formatting shared by every record kind.
//!
//! Form input arrives as free text. Instead of rejecting malformed values the
//! records keep whatever numeric prefix the text carries and fall back to
//! "not-a-number" otherwise, so reports downstream may legitimately see NaN.

/// Separator between the currency symbol and the amount in `pt-BR` currency
/// formatting (a no-break space).
const CURRENCY_GAP: char = '\u{a0}';

/// Anything that can feed a numeric record field: raw form text or a value
/// that is already typed.
pub trait NumericInput {
    /// Integer view of the input. `None` stands for "not-a-number".
    fn to_integer(&self) -> Option<i64>;
    /// Floating-point view of the input, NaN when nothing numeric was found.
    fn to_float(&self) -> f64;
}

impl NumericInput for str {
    fn to_integer(&self) -> Option<i64> {
        parse_int(self)
    }

    fn to_float(&self) -> f64 {
        parse_float(self)
    }
}

impl NumericInput for String {
    fn to_integer(&self) -> Option<i64> {
        parse_int(self)
    }

    fn to_float(&self) -> f64 {
        parse_float(self)
    }
}

impl NumericInput for i64 {
    fn to_integer(&self) -> Option<i64> {
        Some(*self)
    }

    fn to_float(&self) -> f64 {
        *self as f64
    }
}

impl NumericInput for i32 {
    fn to_integer(&self) -> Option<i64> {
        Some(i64::from(*self))
    }

    fn to_float(&self) -> f64 {
        f64::from(*self)
    }
}

impl NumericInput for u32 {
    fn to_integer(&self) -> Option<i64> {
        Some(i64::from(*self))
    }

    fn to_float(&self) -> f64 {
        f64::from(*self)
    }
}

impl NumericInput for f64 {
    /// Truncates toward zero; NaN and the infinities have no integer view.
    fn to_integer(&self) -> Option<i64> {
        if self.is_finite() {
            Some(self.trunc() as i64)
        } else {
            None
        }
    }

    fn to_float(&self) -> f64 {
        *self
    }
}

impl<T: NumericInput + ?Sized> NumericInput for &T {
    fn to_integer(&self) -> Option<i64> {
        (**self).to_integer()
    }

    fn to_float(&self) -> f64 {
        (**self).to_float()
    }
}

/// Parse the leading integer of `input`.
///
/// Leading whitespace and a sign are accepted, as is a `0x` prefix for
/// hexadecimal. Parsing stops at the first character that is not a digit, so
/// `"20 years"` yields 20 and `"3.9"` yields 3. Values beyond the `i64` range
/// saturate.
pub fn parse_int(input: &str) -> Option<i64> {
    let trimmed = input.trim_start_matches(is_numeric_whitespace);
    let (negative, rest) = split_sign(trimmed);

    let (radix, digits) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for ch in digits.chars() {
        let Some(digit) = ch.to_digit(radix) else {
            break;
        };
        seen_digit = true;
        let digit = i64::from(digit);
        value = value
            .saturating_mul(i64::from(radix))
            .saturating_add(digit);
    }

    if !seen_digit {
        return None;
    }

    Some(if negative { value.saturating_neg() } else { value })
}

/// Parse the leading decimal number of `input`, returning NaN when there is
/// none.
///
/// Accepts an optional sign, an integer part, a fractional part and an
/// exponent, in that order; `"Infinity"` is recognised too. Trailing text is
/// ignored (`"8.5 points"` yields 8.5).
pub fn parse_float(input: &str) -> f64 {
    let trimmed = input.trim_start_matches(is_numeric_whitespace);
    let (negative, rest) = split_sign(trimmed);
    let sign = if negative { -1.0 } else { 1.0 };

    if rest.starts_with("Infinity") {
        return sign * f64::INFINITY;
    }

    let bytes = rest.as_bytes();
    let mut pos = 0;
    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_part = &rest[int_start..pos];

    let mut frac_part = "";
    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut end = frac_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        frac_part = &rest[frac_start..end];
        pos = end;
    }

    if int_part.is_empty() && frac_part.is_empty() {
        return f64::NAN;
    }

    let mut exponent = "";
    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut end = pos + 1;
        if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
            end += 1;
        }
        let digits_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end > digits_start {
            exponent = &rest[pos..end];
        }
    }

    let mut literal = String::with_capacity(int_part.len() + frac_part.len() + exponent.len() + 2);
    literal.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        literal.push('.');
        literal.push_str(frac_part);
    }
    literal.push_str(exponent);

    literal
        .parse::<f64>()
        .map(|value| sign * value)
        .unwrap_or(f64::NAN)
}

/// Render a number in its shortest natural form: `10`, `8.5`, `NaN`,
/// `Infinity`.
pub fn display_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// Render an optional integer, with `None` printed as `NaN`.
pub fn display_integer(value: Option<i64>) -> String {
    value.map_or_else(|| "NaN".to_string(), |value| value.to_string())
}

/// Two-decimal rendering used by every average in the reports. Exact ties
/// round away from zero, so `6.125` renders as `6.13`.
pub fn format_fixed(value: f64) -> String {
    if value.is_finite() {
        format!("{:.2}", round_cent_ties(value))
    } else {
        display_number(value)
    }
}

/// Average as shown in the report panels: a bare `0` when nothing was
/// averaged, otherwise [`format_fixed`].
pub fn format_average(value: f64, samples: usize) -> String {
    if samples == 0 {
        "0".to_string()
    } else {
        format_fixed(value)
    }
}

/// Format `value` as Brazilian reais: `R$ 1.234,56`.
pub fn format_brl(value: f64) -> String {
    if value.is_nan() {
        return format!("R${CURRENCY_GAP}NaN");
    }

    let sign = if value < 0.0 { "-" } else { "" };
    if value.is_infinite() {
        return format!("{sign}R${CURRENCY_GAP}∞");
    }

    let fixed = format!("{:.2}", round_cent_ties(value.abs()));
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{sign}R${CURRENCY_GAP}{},{cents}", group_thousands(whole))
}

/// `{:.2}` rounds exact ties to even. A finite double lies exactly halfway
/// between two cents only when it is an odd multiple of 1/8; those values are
/// pushed away from zero here and everything else is left for `{:.2}`.
fn round_cent_ties(value: f64) -> f64 {
    let eighths = value * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        (value * 100.0).round() / 100.0
    } else {
        value
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

fn split_sign(input: &str) -> (bool, &str) {
    if let Some(rest) = input.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = input.strip_prefix('+') {
        (false, rest)
    } else {
        (false, input)
    }
}

fn is_numeric_whitespace(ch: char) -> bool {
    ch.is_whitespace() || ch == '\u{feff}'
}
