//! Colombian Peso formatting
//!
//! Renders amounts the way the `es-CO` locale prints COP:
//! `$`, a no-break space, `.` every three digits, `,` before two decimals.
//! Negative amounts put the sign in front of the symbol (`-$ 500,00`).

/// COP currency symbol
pub const COP_SYMBOL: &str = "$";
/// ISO 4217 code
pub const COP_CODE: &str = "COP";

const GROUPING_SEPARATOR: char = '.';
const DECIMAL_SEPARATOR: char = ',';
/// U+00A0, kept between symbol and digits so the amount never wraps
const SYMBOL_SPACING: char = '\u{a0}';

/// Format an amount as Colombian Pesos.
///
/// Rounds half up on the shortest decimal form to two decimals. Negative zero
/// keeps its sign.
/// NaN renders as `$ NaN` and infinities as `$ ∞` / `-$ ∞`.
pub fn format_to_cop(amount: f64) -> String {
    let sign = if amount.is_sign_negative() && !amount.is_nan() {
        "-"
    } else {
        ""
    };

    let body = if amount.is_nan() {
        "NaN".to_string()
    } else if amount.is_infinite() {
        "∞".to_string()
    } else {
        format_number(amount.abs())
    };

    format!("{}{}{}{}", sign, COP_SYMBOL, SYMBOL_SPACING, body)
}

/// Grouped integer part plus two decimals, for a finite non-negative value.
///
/// Works on the shortest decimal form of the value (what `{:e}` prints), so
/// `1.005` rounds to `1,01` and whole amounts past 2^53 keep `,00`.
fn format_number(value: f64) -> String {
    let cents = round_to_cents(&format!("{:e}", value));
    let (whole, fraction) = cents.split_at(cents.len() - 2);

    format!(
        "{}{}{}",
        group_digits(whole, GROUPING_SEPARATOR),
        DECIMAL_SEPARATOR,
        fraction
    )
}

/// Scientific notation (`d.ddde±x`) to an amount in cents, rounded half up.
/// The result has at least three digits and no leading zeros beyond that.
fn round_to_cents(scientific: &str) -> String {
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific, "0"));
    let exponent: i64 = exponent.parse().unwrap_or(0);
    let digits: Vec<u8> = mantissa
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();

    // Digits from the leading one down to the hundredths place
    let keep = exponent + 3;
    let digit_at = |i: i64| -> u8 {
        if i < 0 {
            0
        } else {
            digits.get(i as usize).copied().unwrap_or(0)
        }
    };

    let mut cents: Vec<u8> = (0..keep.max(0)).map(&digit_at).collect();
    if keep >= 0 && digit_at(keep) >= 5 {
        let mut carry = true;
        for d in cents.iter_mut().rev() {
            if *d == 9 {
                *d = 0;
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            cents.insert(0, 1);
        }
    }

    let first = cents.iter().position(|&d| d != 0).unwrap_or(cents.len());
    let mut rendered: String = cents[first..].iter().map(|d| char::from(b'0' + d)).collect();
    while rendered.len() < 3 {
        rendered.insert(0, '0');
    }
    rendered
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let len = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (len - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}
