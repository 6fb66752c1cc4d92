//! Bounded-multiplicity knapsack optimizer.
//!
//! A dynamic program over (route prefix, discretized budget) that exploits
//! the greatest common divisor of route costs to collapse the state space,
//! plus a backtracking reconstruction of the purchase allocation.

use std::collections::BTreeMap;

use adbus_core::{Id, Route};

/// The result of running the optimizer: a sparse purchase count per route
/// (zero counts omitted) plus the total benefit achieved, for
/// self-consistency checks against the forward pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub counts: BTreeMap<Id, u32>,
    pub benefit: f64,
}

/// Integer Euclidean GCD.
fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Cast a cost to its integer part for GCD purposes. Returns `None` if the
/// cost is not close enough to an integer to trust the cast (the GCD
/// reduction implicitly assumes costs are integral; see SPEC_FULL.md §9).
fn integral_cost(cost: f64) -> Option<i64> {
    let rounded = cost.round();
    if (cost - rounded).abs() < 1e-6 {
        Some(rounded as i64)
    } else {
        None
    }
}

/// Compute `minCost` and `costGcd` for a route set, per the numeric policy
/// in SPEC_FULL.md §4.3: the GCD of the integer parts of all costs, or a
/// `1.0` fallback when any cost is non-integral. The fallback is a
/// documented degradation, not an error: it still produces a correct DP
/// over a finer grid, just a slower one.
pub fn cost_gcd(routes: &[Route]) -> (f64, f64) {
    let min_cost = routes
        .iter()
        .map(|r| r.cost)
        .fold(f64::INFINITY, f64::min);

    let integral_costs: Option<Vec<i64>> = routes.iter().map(|r| integral_cost(r.cost)).collect();

    let cost_gcd = match integral_costs {
        Some(costs) if !costs.is_empty() => {
            let g = costs.into_iter().fold(0i64, gcd);
            if g == 0 {
                1.0
            } else {
                g as f64
            }
        }
        _ => 1.0,
    };

    (min_cost, cost_gcd)
}

/// Produce the allocation maximizing total benefit subject to
/// `sum(count[i] * route[i].cost) <= budget`, with
/// `0 <= count[i] <= len(route[i].benefits)`.
///
/// Emits an empty allocation (not an error) when `routes` is empty or when
/// the budget is below the cheapest route's cost.
pub fn allocate(routes: &[Route], budget: f64) -> Allocation {
    if routes.is_empty() {
        return Allocation {
            counts: BTreeMap::new(),
            benefit: 0.0,
        };
    }

    let (min_cost, cost_gcd) = cost_gcd(routes);
    if budget < min_cost {
        return Allocation {
            counts: BTreeMap::new(),
            benefit: 0.0,
        };
    }

    let max_steps = ((budget - min_cost) / cost_gcd).floor() as i64;

    let n = routes.len();
    let cols = (max_steps + 1) as usize;

    // V[i][k]: best benefit using routes[0..i) with spend <= grid_budget(k),
    // where grid_budget(k) = minCost + k*costGcd. Row 0 is the "no routes
    // taken yet" base case, all zero. Grid index k=0 already represents
    // spend == minCost, not spend == 0, so candidates whose remaining spend
    // falls below minCost (but is still non-negative) fall off the low end
    // of the grid and must be treated as the base case (0 benefit) rather
    // than indexed directly.
    let mut v: Vec<Vec<f64>> = vec![vec![0.0; cols]; n + 1];

    for (i, route) in routes.iter().enumerate() {
        let row_prev = i;
        let row_cur = i + 1;
        let max_t = route.benefits.len();
        for k in 0..cols {
            let b_k = min_cost + k as f64 * cost_gcd;
            let no_take = v[row_prev][k];
            let mut best = no_take;

            for t in 1..=max_t {
                let remaining = b_k - t as f64 * route.cost;
                if remaining < -1e-6 {
                    break; // larger t only spends more; no point continuing
                }
                let prior = prior_value(&v[row_prev], remaining, min_cost, cost_gcd);
                let candidate = prior + route.benefits[t - 1];
                if candidate > best {
                    best = candidate;
                }
            }

            v[row_cur][k] = best;
        }
    }

    let b_star = max_steps as usize;
    let total_benefit = v[n][b_star];

    // Backtracking pass: walk routes right-to-left, preferring the smallest
    // t that reproduces the recorded optimum at each step. `remaining_budget`
    // is tracked as a continuous value rather than re-quantized into a grid
    // index at every step: once it drops below `min_cost` nothing further
    // is affordable, and re-snapping it to index 0 would wrongly read back
    // the value at spend == min_cost instead of spend == remaining_budget.
    let mut counts = BTreeMap::new();
    let mut remaining_budget = min_cost + b_star as f64 * cost_gcd;

    for i in (0..n).rev() {
        if remaining_budget + 1e-6 < min_cost {
            break; // nothing left is affordable; every earlier route takes 0
        }

        let route = &routes[i];
        let row_prev = i;
        let row_cur = i + 1;
        let k = (((remaining_budget - min_cost) / cost_gcd).round().max(0.0) as usize).min(cols - 1);
        let target = v[row_cur][k];
        let no_take = v[row_prev][k];

        if target <= no_take {
            continue;
        }

        for t in 1..=route.benefits.len() {
            let candidate_remaining = remaining_budget - t as f64 * route.cost;
            if candidate_remaining < -1e-6 {
                break;
            }
            let prior = prior_value(&v[row_prev], candidate_remaining, min_cost, cost_gcd);
            let candidate = prior + route.benefits[t - 1];
            if (candidate - target).abs() < 1e-6 {
                counts.insert(route.output_id.clone(), t as u32);
                remaining_budget = candidate_remaining;
                break;
            }
        }
    }

    Allocation {
        counts,
        benefit: total_benefit,
    }
}

/// Look up the prior row's value for a `remaining` spend that may fall
/// below `min_cost` (in which case the base case of 0 applies, since even
/// zero routes taken is feasible at any non-negative spend).
fn prior_value(prior_row: &[f64], remaining: f64, min_cost: f64, cost_gcd: f64) -> f64 {
    if remaining + 1e-6 < min_cost {
        return 0.0;
    }
    let idx = ((remaining - min_cost) / cost_gcd).round().max(0.0) as usize;
    let idx = idx.min(prior_row.len() - 1);
    prior_row[idx]
}
