//! printf-style `%g` number rendering.

/// Render `value` like C's `%.<precision>g`.
///
/// Uses scientific notation when the decimal exponent is below -4 or at
/// least `precision`, fixed notation otherwise. Trailing zeros (and a
/// trailing decimal point) are removed in both cases.
pub fn format_g(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let precision = precision.max(1);

    // Exponent after rounding to `precision` significant digits
    let sci = format!("{:.*e}", precision - 1, value);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exp < -4 || exp >= precision as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exp.unsigned_abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exp).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers() {
        assert_eq!(format_g(-180.0, 10), "-180");
        assert_eq!(format_g(0.0, 10), "0");
        assert_eq!(format_g(256.0, 10), "256");
        assert_eq!(format_g(-90.0, 8), "-90");
    }

    #[test]
    fn test_fractions() {
        assert_eq!(format_g(0.17578125, 10), "0.17578125");
        assert_eq!(format_g(-179.82421875, 10), "-179.8242188");
        assert_eq!(format_g(1.0 / 3.0, 10), "0.3333333333");
        assert_eq!(format_g(0.0001, 10), "0.0001");
    }

    #[test]
    fn test_scientific() {
        assert_eq!(format_g(20037508.342789244, 10), "20037508.34");
        assert_eq!(format_g(12345678901.0, 10), "1.23456789e+10");
        assert_eq!(format_g(0.00001, 10), "1e-05");
        assert_eq!(format_g(123456789.0, 8), "1.2345679e+08");
    }

    #[test]
    fn test_rounding_bumps_exponent() {
        assert_eq!(format_g(9999999999.5, 10), "1e+10");
        assert_eq!(format_g(99999.999, 5), "1e+05");
    }
}
