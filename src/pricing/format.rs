/// Renders a number the way a JavaScript `Number#toString` does, which is the
/// form the hashed jitter and the prediction subprocess argv expect.
pub fn js_number_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".into();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.into();
    }
    if value == 0.0 {
        return "0".into();
    }

    if (1e-6..1e21).contains(&value.abs()) {
        return format!("{}", value);
    }

    let formatted = format!("{:e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted,
    }
}

/// Whole rupees with en-IN digit grouping, e.g. `₹1,23,45,678`.
pub fn format_inr(rupees: i64) -> String {
    let digits = rupees.unsigned_abs().to_string();

    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups = Vec::new();
        let mut end = head.len();
        while end > 2 {
            groups.push(&head[end - 2..end]);
            end -= 2;
        }
        groups.push(&head[..end]);
        groups.reverse();

        format!("{},{}", groups.join(","), tail)
    };

    if rupees < 0 {
        format!("-₹{}", grouped)
    } else {
        format!("₹{}", grouped)
    }
}

#[test]
fn js_number_string_test() {
    assert_eq!(js_number_string(100.0), "100");
    assert_eq!(js_number_string(5.0), "5");
    assert_eq!(js_number_string(2.5), "2.5");
    assert_eq!(js_number_string(0.0853), "0.0853");
    assert_eq!(js_number_string(-0.0), "0");
    assert_eq!(js_number_string(1e21), "1e+21");
    assert_eq!(js_number_string(1.5e-7), "1.5e-7");
    assert_eq!(js_number_string(f64::INFINITY), "Infinity");
}

#[test]
fn format_inr_test() {
    assert_eq!(format_inr(0), "₹0");
    assert_eq!(format_inr(950), "₹950");
    assert_eq!(format_inr(12345), "₹12,345");
    assert_eq!(format_inr(1234567), "₹12,34,567");
    assert_eq!(format_inr(12345678), "₹1,23,45,678");
    assert_eq!(format_inr(-1500), "-₹1,500");
}
