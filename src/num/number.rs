pub fn format_i64(value: i64) -> String {
    let mut buffer = itoa::Buffer::new();
    buffer.format(value).to_string()
}

pub fn format_u64(value: u64) -> String {
    let mut buffer = itoa::Buffer::new();
    buffer.format(value).to_string()
}

/// Shortest round-tripping decimal form, without exponent or trailing `.0`.
pub fn format_f64(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_negative() { "-inf" } else { "inf" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let mut buffer = ryu::Buffer::new();
    let raw = buffer.format_finite(value);
    if raw.contains('e') {
        return expand_exponent(raw);
    }
    trim_fraction(raw.to_string())
}

pub fn format_f32(value: f32) -> String {
    if !value.is_finite() || value == 0.0 {
        return format_f64(value as f64);
    }
    let mut buffer = ryu::Buffer::new();
    let raw = buffer.format_finite(value);
    if raw.contains('e') {
        return expand_exponent(raw);
    }
    trim_fraction(raw.to_string())
}

/// Format a JSON number the same way as the primitive it holds.
pub fn format_json_number(value: &serde_json::Number) -> String {
    if let Some(i) = value.as_i64() {
        format_i64(i)
    } else if let Some(u) = value.as_u64() {
        format_u64(u)
    } else if let Some(f) = value.as_f64() {
        format_f64(f)
    } else {
        value.to_string()
    }
}

fn expand_exponent(raw: &str) -> String {
    let (mantissa, exponent) = match raw.split_once('e') {
        Some(parts) => parts,
        None => return raw.to_string(),
    };
    let exp: i32 = exponent.parse().unwrap_or(0);
    let (negative, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, mantissa),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let digits = format!("{int_part}{frac_part}");
    let point = int_part.len() as i32 + exp;

    let mut out = String::with_capacity(digits.len() + exp.unsigned_abs() as usize + 3);
    if negative {
        out.push('-');
    }
    if point <= 0 {
        out.push_str("0.");
        out.extend(std::iter::repeat_n('0', (-point) as usize));
        out.push_str(&digits);
    } else if point as usize >= digits.len() {
        out.push_str(&digits);
        out.extend(std::iter::repeat_n('0', point as usize - digits.len()));
    } else {
        let point = point as usize;
        out.push_str(&digits[..point]);
        out.push('.');
        out.push_str(&digits[point..]);
    }
    trim_fraction(out)
}

fn trim_fraction(mut value: String) -> String {
    if value.contains('.') {
        let trimmed = value.trim_end_matches('0').len();
        value.truncate(trimmed);
        if value.ends_with('.') {
            value.pop();
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    fn test_integers() {
        assert_eq!(format_i64(-42), "-42");
        assert_eq!(format_i64(0), "0");
        assert_eq!(format_u64(u64::MAX), "18446744073709551615");
    }

    #[rstest::rstest]
    #[case(1.0, "1")]
    #[case(1.5, "1.5")]
    #[case(-2.25, "-2.25")]
    #[case(-0.0, "0")]
    #[case(1e21, "1000000000000000000000")]
    #[case(1.5e-7, "0.00000015")]
    #[case(f64::NAN, "NaN")]
    #[case(f64::NEG_INFINITY, "-inf")]
    fn test_format_f64(#[case] input: f64, #[case] expected: &str) {
        assert_eq!(format_f64(input), expected);
    }

    #[rstest::rstest]
    #[case(serde_json::json!(7), "7")]
    #[case(serde_json::json!(-7), "-7")]
    #[case(serde_json::json!(u64::MAX), "18446744073709551615")]
    #[case(serde_json::json!(2.0), "2")]
    #[case(serde_json::json!(1e21), "1000000000000000000000")]
    #[case(serde_json::json!(0.5), "0.5")]
    fn test_format_json_number(#[case] input: serde_json::Value, #[case] expected: &str) {
        let serde_json::Value::Number(number) = input else {
            panic!("not a number: {input}");
        };
        assert_eq!(format_json_number(&number), expected);
    }

    #[rstest::rstest]
    fn test_format_f32() {
        assert_eq!(format_f32(0.1), "0.1");
        assert_eq!(format_f32(3.0), "3");
    }
}
