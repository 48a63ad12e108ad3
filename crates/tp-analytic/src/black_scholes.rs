//! Black-Scholes-Merton closed form for European vanilla options.
//!
//! $$C = S e^{-qT} N(d_1) - K e^{-rT} N(d_2)$$
//! $$P = K e^{-rT} N(-d_2) - S e^{-qT} N(-d_1)$$
//!
//! where $d_{1,2} = \frac{\ln(S/K) + (r - q \pm \sigma^2/2)T}{\sigma\sqrt{T}}$

use tp_core::{errors::Result, ensure, OptionType, Rate, Real, Time, Volatility};
use tp_math::distributions::{normal_cdf, normal_pdf};
use tp_math::solvers1d::newton;
use tracing::debug;

/// Price and first/second-order Greeks of a European option.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholesResults {
    /// Option value.
    pub price: Real,
    /// ∂V/∂S.
    pub delta: Real,
    /// ∂²V/∂S².
    pub gamma: Real,
    /// ∂V/∂σ (per 1.0 absolute vol, not per 1%).
    pub vega: Real,
    /// ∂V/∂t (per year).
    pub theta: Real,
    /// ∂V/∂r (per 1.0 rate shift).
    pub rho: Real,
}

impl BlackScholesResults {
    /// A value with no optionality left: only price and delta survive.
    fn settled(price: Real, delta: Real) -> Self {
        Self {
            price,
            delta,
            gamma: 0.0,
            vega: 0.0,
            theta: 0.0,
            rho: 0.0,
        }
    }
}

/// `(d1, d2)` for a positive total volatility `sigma * sqrt(t)`.
pub(crate) fn d1_d2(
    spot: Real,
    strike: Real,
    r: Rate,
    q: Rate,
    sigma: Volatility,
    t: Time,
) -> (Real, Real) {
    let std_dev = sigma * t.sqrt();
    let d1 = ((spot / strike).ln() + (r - q + 0.5 * sigma * sigma) * t) / std_dev;
    (d1, d1 - std_dev)
}

/// Compute Black-Scholes price and Greeks for a European option.
///
/// An expired option is worth its intrinsic value. With zero volatility the
/// option is worth the discounted forward payoff.
pub fn black_scholes_merton(
    option_type: OptionType,
    spot: Real,
    strike: Real,
    risk_free_rate: Rate,
    dividend_yield: Rate,
    volatility: Volatility,
    time_to_expiry: Time,
) -> BlackScholesResults {
    let (r, q, t) = (risk_free_rate, dividend_yield, time_to_expiry);
    if t <= 0.0 {
        return BlackScholesResults::settled(option_type.intrinsic(spot, strike), 0.0);
    }

    let carry = (-q * t).exp();
    let discount = (-r * t).exp();
    let std_dev = volatility * t.sqrt();
    if std_dev <= 0.0 {
        let forward_payoff = option_type.sign() * (spot * carry - strike * discount);
        return if forward_payoff > 0.0 {
            BlackScholesResults::settled(forward_payoff, option_type.sign() * carry)
        } else {
            BlackScholesResults::settled(0.0, 0.0)
        };
    }

    let (d1, d2) = d1_d2(spot, strike, r, q, volatility, t);
    let density = spot * carry * normal_pdf(d1);
    let time_decay = -density * volatility / (2.0 * t.sqrt());

    let (price, delta, theta, rho) = match option_type {
        OptionType::Call => {
            let (n1, n2) = (normal_cdf(d1), normal_cdf(d2));
            (
                spot * carry * n1 - strike * discount * n2,
                carry * n1,
                time_decay - r * strike * discount * n2 + q * spot * carry * n1,
                strike * t * discount * n2,
            )
        }
        OptionType::Put => {
            let (n1, n2) = (normal_cdf(-d1), normal_cdf(-d2));
            (
                strike * discount * n2 - spot * carry * n1,
                -carry * n1,
                time_decay + r * strike * discount * n2 - q * spot * carry * n1,
                -strike * t * discount * n2,
            )
        }
    };

    BlackScholesResults {
        price,
        delta,
        gamma: density / (spot * spot * std_dev),
        vega: density * t.sqrt(),
        theta,
        rho,
    }
}

/// Black-Scholes-Merton price only.
pub fn black_scholes_price(
    option_type: OptionType,
    spot: Real,
    strike: Real,
    risk_free_rate: Rate,
    dividend_yield: Rate,
    volatility: Volatility,
    time_to_expiry: Time,
) -> Real {
    black_scholes_merton(
        option_type,
        spot,
        strike,
        risk_free_rate,
        dividend_yield,
        volatility,
        time_to_expiry,
    )
    .price
}

/// Call value implied by a put through put-call parity:
/// `C = P + S e^{-qT} − K e^{-rT}`.
pub fn put_call_parity_call(
    put: Real,
    spot: Real,
    strike: Real,
    r: Rate,
    q: Rate,
    t: Time,
) -> Real {
    put + spot * (-q * t).exp() - strike * (-r * t).exp()
}

/// Put value implied by a call through put-call parity:
/// `P = C − S e^{-qT} + K e^{-rT}`.
pub fn put_call_parity_put(
    call: Real,
    spot: Real,
    strike: Real,
    r: Rate,
    q: Rate,
    t: Time,
) -> Real {
    call - spot * (-q * t).exp() + strike * (-r * t).exp()
}

/// Volatility at which the Black-Scholes price equals `target`.
///
/// Safeguarded Newton iteration on vega inside `[1e-6, 5]`.
#[allow(clippy::too_many_arguments)]
pub fn black_scholes_implied_volatility(
    target: Real,
    option_type: OptionType,
    spot: Real,
    strike: Real,
    risk_free_rate: Rate,
    dividend_yield: Rate,
    time_to_expiry: Time,
    accuracy: Real,
) -> Result<Volatility> {
    ensure!(target > 0.0, "target price must be positive, got {target}");
    ensure!(
        time_to_expiry > 0.0,
        "time to expiry must be positive, got {time_to_expiry}"
    );
    let objective = |sigma: Real| {
        let res = black_scholes_merton(
            option_type,
            spot,
            strike,
            risk_free_rate,
            dividend_yield,
            sigma,
            time_to_expiry,
        );
        (res.price - target, res.vega)
    };
    let vol = newton(objective, 0.2, 1e-6, 5.0, accuracy)?;
    debug!(target, vol, "black-scholes implied volatility");
    Ok(vol)
}
