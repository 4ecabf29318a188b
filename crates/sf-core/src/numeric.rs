//! Significant-figure formatting for numeric gains.

/// Format `value` to `digits` significant figures in general floating style
/// (the `%g` convention): fixed notation for moderate exponents, scientific
/// notation otherwise, trailing zeros stripped.
pub fn format_sig(value: f64, digits: usize) -> String {
    let digits = digits.max(1);
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let sci = format!("{:.*e}", digits - 1, value);
    let (mantissa, exp) = sci.split_once('e').expect("scientific form has exponent");
    let exp: i32 = exp.parse().expect("scientific exponent is an integer");
    if exp < -4 || exp >= digits as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_zeros(mantissa), sign, exp.abs())
    } else {
        let decimals = (digits as i32 - 1 - exp).max(0) as usize;
        trim_zeros(&format!("{value:.decimals$}"))
    }
}

fn trim_zeros(text: &str) -> String {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_values_drop_the_point() {
        assert_eq!(format_sig(2.0, 3), "2");
        assert_eq!(format_sig(-40.0, 4), "-40");
    }

    #[test]
    fn fixed_notation_for_moderate_exponents() {
        assert_eq!(format_sig(0.5, 3), "0.5");
        assert_eq!(format_sig(1.0 / 3.0, 3), "0.333");
        assert_eq!(format_sig(-2.55, 2), "-2.5");
        assert_eq!(format_sig(0.000123456, 3), "0.000123");
    }

    #[test]
    fn scientific_notation_for_extreme_exponents() {
        assert_eq!(format_sig(123456.0, 3), "1.23e+05");
        assert_eq!(format_sig(0.0000123, 3), "1.23e-05");
        assert_eq!(format_sig(999.0, 1), "1e+03");
    }

    #[test]
    fn rounding_follows_significant_figures() {
        assert_eq!(format_sig(0.999, 2), "1");
        assert_eq!(format_sig(1.25, 2), "1.2");
    }

    #[test]
    fn zero_is_plain() {
        assert_eq!(format_sig(0.0, 5), "0");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn output_parses_back_within_precision(value in -1.0e6_f64..1.0e6, digits in 1_usize..7) {
            let text = format_sig(value, digits);
            let parsed: f64 = text.parse().unwrap();
            if value == 0.0 {
                prop_assert_eq!(parsed, 0.0);
            } else {
                let rel = ((parsed - value) / value).abs();
                prop_assert!(rel <= 10f64.powi(1 - digits as i32));
            }
        }
    }
}
