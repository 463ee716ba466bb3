//! Internal Rate of Return (IRR) calculation
//!
//! Used to report the money-weighted return of a contribution plan

/// Largest periodic rate searched
const MAX_PERIODIC_RATE: f64 = 10.0;
/// Smallest periodic rate searched (-99%)
const MIN_PERIODIC_RATE: f64 = -0.99;
const TOLERANCE: f64 = 1e-10;
const MAX_ITERATIONS: usize = 1000;

/// Calculate the annualized IRR of periodic cash flows using Newton-Raphson,
/// falling back to bisection when the derivative vanishes or iteration stalls.
///
/// # Arguments
/// * `cashflows` - One cash flow per period (positive = inflow, negative = outflow)
/// * `periods_per_year` - Number of periods per year (12 for monthly, 252 for daily)
///
/// # Returns
/// * `Option<f64>` - Effective annual rate `(1 + irr)^periods_per_year - 1`, or
///   None if the flows never change sign or no root is bracketed
pub fn calculate_irr(cashflows: &[f64], periods_per_year: u32) -> Option<f64> {
    if cashflows.is_empty() {
        return None;
    }

    if cashflows.iter().all(|&cf| cf.abs() < 1e-10) {
        return Some(0.0);
    }

    // No sign change means no IRR
    let has_positive = cashflows.iter().any(|&cf| cf > 1e-10);
    let has_negative = cashflows.iter().any(|&cf| cf < -1e-10);
    if !has_positive || !has_negative {
        return None;
    }

    let mut rate = 0.05 / periods_per_year as f64;

    for _ in 0..MAX_ITERATIONS {
        let (npv, dnpv) = npv_and_derivative(cashflows, rate);

        if dnpv.abs() < 1e-20 || !dnpv.is_finite() || !npv.is_finite() {
            return irr_bisection(cashflows, periods_per_year);
        }

        let new_rate = (rate - npv / dnpv).clamp(MIN_PERIODIC_RATE, MAX_PERIODIC_RATE);

        // Pinned to a search bound is not convergence
        if new_rate <= MIN_PERIODIC_RATE || new_rate >= MAX_PERIODIC_RATE {
            return irr_bisection(cashflows, periods_per_year);
        }

        if (new_rate - rate).abs() < TOLERANCE {
            return Some(annualize(new_rate, periods_per_year));
        }

        rate = new_rate;
    }

    irr_bisection(cashflows, periods_per_year)
}

fn annualize(periodic_rate: f64, periods_per_year: u32) -> f64 {
    (1.0 + periodic_rate).powi(periods_per_year as i32) - 1.0
}

/// NPV and its derivative with respect to the periodic rate
fn npv_and_derivative(cashflows: &[f64], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;
    let growth = 1.0 + rate;
    let mut discount = 1.0;

    for (t, &cf) in cashflows.iter().enumerate() {
        npv += cf / discount;
        if t > 0 {
            dnpv -= (t as f64) * cf / (discount * growth);
        }
        discount *= growth;
    }

    (npv, dnpv)
}

/// Pull a search bound toward zero until the NPV there is representable.
/// Long horizons underflow or overflow the discount factor near the extremes.
fn finite_bound(cashflows: &[f64], mut rate: f64) -> Option<(f64, f64)> {
    for _ in 0..MAX_ITERATIONS {
        let npv = npv_at_rate(cashflows, rate);
        if npv.is_finite() {
            return Some((rate, npv));
        }
        if rate.abs() < TOLERANCE {
            break;
        }
        rate /= 2.0;
    }
    None
}

fn irr_bisection(cashflows: &[f64], periods_per_year: u32) -> Option<f64> {
    let (mut low, mut npv_low) = finite_bound(cashflows, MIN_PERIODIC_RATE)?;
    let (mut high, npv_high) = finite_bound(cashflows, MAX_PERIODIC_RATE)?;

    if npv_low * npv_high > 0.0 {
        return None;
    }

    for _ in 0..MAX_ITERATIONS {
        let mid = (low + high) / 2.0;
        let npv_mid = npv_at_rate(cashflows, mid);
        if !npv_mid.is_finite() {
            return None;
        }

        if npv_mid.abs() < TOLERANCE || (high - low) / 2.0 < TOLERANCE {
            return Some(annualize(mid, periods_per_year));
        }

        if npv_mid * npv_low < 0.0 {
            high = mid;
        } else {
            low = mid;
            npv_low = npv_mid;
        }
    }

    None
}

fn npv_at_rate(cashflows: &[f64], rate: f64) -> f64 {
    npv_and_derivative(cashflows, rate).0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_irr() {
        // $1000 in, $1100 back after 12 monthly periods
        let mut cashflows = vec![-1000.0];
        cashflows.extend(vec![0.0; 11]);
        cashflows.push(1100.0);

        let irr = calculate_irr(&cashflows, 12).unwrap();
        assert!((irr - 0.10).abs() < 0.001, "Expected ~10% IRR, got {}", irr);
    }

    #[test]
    fn test_no_sign_change() {
        assert_eq!(calculate_irr(&[-100.0, -50.0, -25.0], 1), None);
        assert_eq!(calculate_irr(&[], 12), None);
        assert_eq!(calculate_irr(&[0.0, 0.0], 12), Some(0.0));
    }

    /// Daily flows compounding at `periodic_rate`, with the final value paid back
    fn daily_plan(initial: f64, periodic: f64, periodic_rate: f64, periods: usize) -> Vec<f64> {
        let mut value = initial;
        let mut cashflows = vec![-initial];
        for _ in 0..periods {
            value = value * (1.0 + periodic_rate) + periodic;
            cashflows.push(-periodic);
        }
        if let Some(last) = cashflows.last_mut() {
            *last += value;
        }
        cashflows
    }

    #[test]
    fn test_long_daily_horizon_with_negative_rate() {
        let periodic_rate: f64 = -0.5 / 252.0;
        let expected = (1.0 + periodic_rate).powi(252) - 1.0;

        for years in [1, 5, 10] {
            let cashflows = daily_plan(1000.0, 10.0, periodic_rate, 252 * years);
            let irr = calculate_irr(&cashflows, 252).unwrap();
            assert!((irr - expected).abs() < 1e-6, "{} years: expected {}, got {}", years, expected, irr);
        }
    }

    #[test]
    fn test_bisection_narrows_unrepresentable_bounds() {
        let periodic_rate = -0.5 / 252.0;
        let cashflows = daily_plan(1000.0, 10.0, periodic_rate, 252 * 5);
        assert!(!npv_at_rate(&cashflows, MIN_PERIODIC_RATE).is_finite());

        let irr = irr_bisection(&cashflows, 252).unwrap();
        let expected = (1.0 + periodic_rate).powi(252) - 1.0;
        assert!((irr - expected).abs() < 1e-6, "expected {}, got {}", expected, irr);
    }

    #[test]
    fn test_losing_plan_has_negative_irr() {
        let irr = calculate_irr(&[-1000.0, -100.0, 900.0], 1).unwrap();
        assert!(irr < 0.0);
    }
}
