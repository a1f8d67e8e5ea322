mod fallback;
mod format;
mod formula;
mod hash;

pub use fallback::{fallback_price, fallback_rupees, linear_total, Jitter};
pub use format::{format_inr, js_number_string};
pub use formula::{
    base_price, is_reference_case, predict_price, route_variation, MINIMUM_PRICE, REFERENCE_PRICE,
};
pub use hash::{accumulating_hash, string_hash};

pub const RUPEES_PER_CRORE: f64 = 10_000_000.0;

/// Converts a price in crore to whole rupees.
pub fn to_rupees(crore: f64) -> i64 {
    (crore * RUPEES_PER_CRORE).round() as i64
}

#[test]
fn to_rupees_test() {
    assert_eq!(to_rupees(0.0853), 853000);
    assert_eq!(to_rupees(0.05), 500000);
    assert_eq!(to_rupees(0.00103), 10300);
}
