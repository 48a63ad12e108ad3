//! Closed-form single-barrier option prices under continuous monitoring.
//!
//! A knock-out is priced by reflection: the vanilla payoff restricted to the
//! alive side of the barrier, minus the same restricted claim valued from the
//! image spot `H²/S` and weighted by `(H/S)^(2ν/σ²)` with `ν = r − q − σ²/2`.
//! A knock-in is the vanilla minus the matching knock-out. An optional cash
//! rebate is paid at expiry whenever the option ends void.

use tp_core::{
    BarrierDirection, BarrierKind, BarrierType, OptionType, Rate, Real, Time, Volatility,
};
use tp_math::distributions::normal_cdf;

use crate::black_scholes::{black_scholes_price, d1_d2};

/// One market state; prices European claims for any spot.
#[derive(Debug, Clone, Copy)]
struct Market {
    r: Rate,
    q: Rate,
    sigma: Volatility,
    t: Time,
}

impl Market {
    fn vanilla(&self, option_type: OptionType, spot: Real, strike: Real) -> Real {
        black_scholes_price(
            option_type,
            spot,
            strike,
            self.r,
            self.q,
            self.sigma,
            self.t,
        )
    }

    /// Cash-or-nothing digital paying 1 if `S_T` ends above (call) or below
    /// (put) `level`.
    fn digital(&self, option_type: OptionType, spot: Real, level: Real) -> Real {
        let (_, d2) = d1_d2(spot, level, self.r, self.q, self.sigma, self.t);
        (-self.r * self.t).exp() * normal_cdf(option_type.sign() * d2)
    }

    /// Vanilla payoff paid only if `S_T` ends on the alive side of `barrier`.
    fn alive_side(
        &self,
        option_type: OptionType,
        direction: BarrierDirection,
        spot: Real,
        strike: Real,
        barrier: Real,
    ) -> Real {
        let (h, k) = (barrier, strike);
        match (direction, option_type) {
            (BarrierDirection::Up, OptionType::Call) if k >= h => 0.0,
            (BarrierDirection::Up, OptionType::Call) => {
                self.vanilla(option_type, spot, k)
                    - self.vanilla(option_type, spot, h)
                    - (h - k) * self.digital(option_type, spot, h)
            }
            (BarrierDirection::Down, OptionType::Call) if k >= h => {
                self.vanilla(option_type, spot, k)
            }
            (BarrierDirection::Down, OptionType::Call) => {
                self.vanilla(option_type, spot, h) + (h - k) * self.digital(option_type, spot, h)
            }
            (BarrierDirection::Up, OptionType::Put) if k <= h => {
                self.vanilla(option_type, spot, k)
            }
            (BarrierDirection::Up, OptionType::Put) => {
                self.vanilla(option_type, spot, h) + (k - h) * self.digital(option_type, spot, h)
            }
            (BarrierDirection::Down, OptionType::Put) if k <= h => 0.0,
            (BarrierDirection::Down, OptionType::Put) => {
                self.vanilla(option_type, spot, k)
                    - self.vanilla(option_type, spot, h)
                    - (k - h) * self.digital(option_type, spot, h)
            }
        }
    }

    /// Discounted probability-weighted 1 paid if `S_T` ends on the alive side.
    fn alive_digital(&self, direction: BarrierDirection, spot: Real, barrier: Real) -> Real {
        match direction {
            BarrierDirection::Up => self.digital(OptionType::Put, spot, barrier),
            BarrierDirection::Down => self.digital(OptionType::Call, spot, barrier),
        }
    }

    /// Knock-out value of a claim whose payoff vanishes beyond the barrier.
    fn reflect(&self, claim: impl Fn(Real) -> Real, spot: Real, barrier: Real) -> Real {
        let variance = self.sigma * self.sigma;
        let nu = self.r - self.q - 0.5 * variance;
        let weight = (barrier / spot).powf(2.0 * nu / variance);
        claim(spot) - weight * claim(barrier * barrier / spot)
    }
}

/// Closed-form barrier option price.
///
/// Handles all 8 barrier types: up/down × in/out × call/put. A barrier that
/// is already breached at inception turns a knock-in into the vanilla and a
/// knock-out into its discounted rebate. Requires a positive volatility.
#[allow(clippy::too_many_arguments)]
pub fn analytic_barrier_price(
    option_type: OptionType,
    barrier_type: BarrierType,
    spot: Real,
    strike: Real,
    barrier: Real,
    rebate: Real,
    r: Rate,
    q: Rate,
    sigma: Volatility,
    t: Time,
) -> Real {
    let market = Market { r, q, sigma, t };
    let knocked_in = barrier_type.indicator(spot, barrier);
    match barrier_type.kind() {
        BarrierKind::In if knocked_in => return market.vanilla(option_type, spot, strike),
        BarrierKind::Out if !knocked_in => return rebate * (-r * t).exp(),
        _ => {}
    }
    if t <= 0.0 {
        return match barrier_type.kind() {
            BarrierKind::Out => option_type.intrinsic(spot, strike),
            BarrierKind::In => rebate,
        };
    }

    let direction = barrier_type.direction();
    let knock_out = market.reflect(
        |s| market.alive_side(option_type, direction, s, strike, barrier),
        spot,
        barrier,
    );
    let never_hit = market.reflect(
        |s| market.alive_digital(direction, s, barrier),
        spot,
        barrier,
    );
    let hit = (-r * t).exp() - never_hit;

    match barrier_type.kind() {
        BarrierKind::Out => knock_out + rebate * hit,
        BarrierKind::In => {
            market.vanilla(option_type, spot, strike) - knock_out + rebate * never_hit
        }
    }
}
