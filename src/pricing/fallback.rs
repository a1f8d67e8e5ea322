use rand_distr::{Distribution, Uniform};

use super::format::js_number_string;
use super::hash::accumulating_hash;
use super::RUPEES_PER_CRORE;
use crate::entities::QuoteRequest;
use crate::error::{computation_error, Error};

pub const BASE_RATE_PER_KM: f64 = 50.0;
pub const WEIGHT_RATE_PER_TONNE_KM: f64 = 10.0;

/// Multiplicative perturbation applied to the linear fallback price.
///
/// `Hashed` is reproducible for a given distance and weight and lies in
/// [0.95, 1.04]. `Random` is a fresh uniform draw in [0.95, 1.05) and is only
/// meant for client-side estimates where reproducibility is not required.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Jitter {
    #[default]
    Hashed,
    Random,
}

impl Jitter {
    pub fn variation(&self, distance: f64, weight: f64) -> f64 {
        match self {
            Jitter::Hashed => {
                let key = format!("{}{}", js_number_string(distance), js_number_string(weight));
                let hash = accumulating_hash(&key).unsigned_abs();
                0.95 + (hash % 10) as f64 / 100.0
            }
            Jitter::Random => Uniform::new(0.95, 1.05).sample(&mut rand::thread_rng()),
        }
    }
}

/// Unjittered linear cost in rupees: a per-km rate plus a per-tonne-km rate,
/// scaled by the mean station factor.
pub fn linear_total(request: &QuoteRequest) -> f64 {
    let base_cost = request.distance * BASE_RATE_PER_KM;
    let weight_cost = request.distance * request.weight * WEIGHT_RATE_PER_TONNE_KM;

    (base_cost + weight_cost) * request.location_factor()
}

/// Fallback price in crore.
pub fn fallback_price(request: &QuoteRequest, jitter: Jitter) -> Result<f64, Error> {
    let variation = jitter.variation(request.distance, request.weight);
    let price = (linear_total(request) / RUPEES_PER_CRORE) * variation;

    if !price.is_finite() {
        return Err(computation_error(price));
    }

    Ok(price)
}

/// Fallback price in whole rupees.
pub fn fallback_rupees(request: &QuoteRequest, jitter: Jitter) -> Result<i64, Error> {
    let variation = jitter.variation(request.distance, request.weight);
    let total = linear_total(request) * variation;

    if !total.is_finite() {
        return Err(computation_error(total));
    }

    Ok(total.round() as i64)
}

#[test]
fn linear_total_test() {
    let request = QuoteRequest::new("A", "B", 100.0, 5.0).with_factors(1.0, 1.0);
    assert_eq!(linear_total(&request), 10000.0);
}

#[test]
fn hashed_fallback_test() {
    let request = QuoteRequest::new("A", "B", 100.0, 5.0).with_factors(1.0, 1.0);

    // "1005" hashes to 1507428
    assert!((Jitter::Hashed.variation(100.0, 5.0) - 1.03).abs() < 1e-12);

    let price = fallback_price(&request, Jitter::Hashed).unwrap();
    let rupees = price * RUPEES_PER_CRORE;
    assert!((9500.0..=10400.0).contains(&rupees));
    assert!((price - 0.00103).abs() < 1e-12);

    assert_eq!(fallback_rupees(&request, Jitter::Hashed).unwrap(), 10300);
    assert_eq!(
        fallback_price(&request, Jitter::Hashed).unwrap(),
        fallback_price(&request, Jitter::Hashed).unwrap()
    );
}

#[test]
fn random_fallback_test() {
    let request = QuoteRequest::new("A", "B", 100.0, 5.0).with_factors(1.0, 1.0);

    for _ in 0..200 {
        let rupees = fallback_rupees(&request, Jitter::Random).unwrap();
        assert!((9500..=10500).contains(&rupees));
    }
}

#[test]
fn hashed_variation_range_test() {
    for distance in [1.0, 2.5, 17.0, 382.0, 1000.25, 5000.0] {
        for weight in [0.5, 3.0, 1374.0, 20000.0] {
            let variation = Jitter::Hashed.variation(distance, weight);
            assert!(variation >= 0.95 - 1e-12 && variation <= 1.04 + 1e-12);
        }
    }
}

#[test]
fn non_finite_fallback_test() {
    let request = QuoteRequest::new("A", "B", 100.0, 5.0).with_factors(f64::MAX, f64::MAX);
    let err = fallback_price(&request, Jitter::Hashed).unwrap_err();
    assert_eq!(err.code, 6);
}
