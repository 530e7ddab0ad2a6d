//! Double to ASCII conversion
//!
//! Functions for converting floating-point numbers to strings the way
//! `Number.prototype.toString` prints them.

/// Format a number using the JavaScript Number-to-String algorithm
///
/// Integers print without a fraction, and exponent notation is used outside
/// `[1e-6, 1e21)`.
pub fn number_to_string(val: f64) -> String {
    if val.is_nan() {
        return "NaN".to_string();
    }
    if val.is_infinite() {
        return if val < 0.0 { "-Infinity" } else { "Infinity" }.to_string();
    }
    if val == 0.0 {
        return "0".to_string();
    }

    let sign = if val < 0.0 { "-" } else { "" };
    let (digits, exp) = shortest_digits(val.abs());
    let k = digits.len() as i32;
    // Position of the decimal point relative to the digit string
    let n = exp + 1;

    let body = if k <= n && n <= 21 {
        let mut s = digits;
        s.extend(std::iter::repeat_n('0', (n - k) as usize));
        s
    } else if 0 < n && n <= 21 {
        format!("{}.{}", &digits[..n as usize], &digits[n as usize..])
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let e = n - 1;
        let e_sign = if e < 0 { '-' } else { '+' };
        if k == 1 {
            format!("{}e{}{}", digits, e_sign, e.abs())
        } else {
            format!("{}.{}e{}{}", &digits[..1], &digits[1..], e_sign, e.abs())
        }
    };

    format!("{}{}", sign, body)
}

/// Shortest round-trip decimal digits and decimal exponent of a positive
/// finite number
fn shortest_digits(val: f64) -> (String, i32) {
    // `{:e}` yields the shortest representation, e.g. "1.2345e-7"
    let formatted = format!("{:e}", val);
    let (mantissa, exp) = formatted.split_once('e').unwrap_or((&formatted, "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let digits = digits.trim_end_matches('0');
    let digits = if digits.is_empty() { "0" } else { digits };
    (digits.to_string(), exp.parse().unwrap_or(0))
}

/// Format an integral number in the given radix (2..=36)
///
/// Non-integral or non-finite values fall back to decimal formatting.
pub fn number_to_radix_string(val: f64, radix: u32) -> String {
    if radix == 10 || !(2..=36).contains(&radix) || !val.is_finite() || val.fract() != 0.0 {
        return number_to_string(val);
    }
    if val.abs() >= 2f64.powi(53) {
        return number_to_string(val);
    }

    let negative = val < 0.0;
    let mut n = val.abs() as u64;
    if n == 0 {
        return "0".to_string();
    }

    let mut buf = Vec::new();
    while n > 0 {
        let digit = (n % radix as u64) as u32;
        buf.push(std::char::from_digit(digit, radix).unwrap_or('?'));
        n /= radix as u64;
    }
    if negative {
        buf.push('-');
    }
    buf.iter().rev().collect()
}
