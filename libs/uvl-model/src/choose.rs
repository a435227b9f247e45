//! # Combinatorial Clause Generator
//!
//! Encodes "exactly k of n" group semantics as a conjunction of disjunctive
//! clauses: one clause per ascending-index k-combination of the n elements.
//! The alternative-group encoding composes two calls: k = n for at least
//! one, k = 2 negated for pairwise at most one.

use crate::formula::Formula;

/// Builds the conjunction of one disjunctive clause per ascending-index
/// k-combination of `elements` (all elements negated first when `negated`
/// is set): satisfied iff every k-subset contains a satisfied element.
///
/// `elements` must be non-empty. Out-of-range `k` falls back to a defensive
/// constant built from the first element: `k == 0` or `k == n + 1` yields a
/// tautology, `k > n + 1` a contradiction. These arms cover malformed input
/// only; normal callers pass `k` in `1..=n`.
///
/// The clause count always equals the binomial coefficient C(n, k); a
/// mismatch is an internal invariant violation and panics.
pub fn n_choose_k(elements: &[Formula], k: usize, negated: bool) -> Formula {
    let n = elements.len();
    debug_assert!(n >= 1, "caller guarantees a non-empty group");

    // tautology
    if k == 0 || k == n + 1 {
        return Formula::Or(vec![
            Formula::not(elements[0].clone()),
            elements[0].clone(),
        ]);
    }

    // contradiction
    if k > n + 1 {
        return Formula::And(vec![
            Formula::not(elements[0].clone()),
            elements[0].clone(),
        ]);
    }

    let elements: Vec<Formula> = if negated {
        elements.iter().cloned().map(Formula::not).collect()
    } else {
        elements.to_vec()
    };

    let expected = binomial(n, k);
    let mut clauses: Vec<Formula> = Vec::with_capacity(expected as usize);
    // Scratch clause, overwritten level by level like the index tuple.
    let mut clause: Vec<Formula> = vec![elements[0].clone(); k];

    // Iterative advancement of an ascending index tuple; ascending order
    // guarantees combinations rather than permutations and rules out
    // duplicate clauses.
    let mut index = vec![0_isize; k];
    let mut level: isize = 0;
    index[0] = -1;

    while level >= 0 {
        let current = level as usize;
        index[current] += 1;
        if index[current] >= (n - (k - 1 - current)) as isize {
            level -= 1;
        } else {
            clause[current] = elements[index[current] as usize].clone();
            if current == k - 1 {
                clauses.push(Formula::Or(clause.clone()));
            } else {
                level += 1;
                index[current + 1] = index[current];
            }
        }
    }

    assert_eq!(
        clauses.len() as u128,
        expected,
        "pre-calculated clause count does not match the generated clauses"
    );
    Formula::And(clauses)
}

/// The number of ways of selecting `k` things out of `n`.
///
/// Multiplicative formula; exact for every count that fits in the result
/// type, which covers all clause sets that are materializable anyway.
pub fn binomial(n: usize, k: usize) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        // Exact at every step: the running product is C(n, i + 1) * (i + 1)!
        // divided out incrementally.
        result = result * (n - i) as u128 / (i + 1) as u128;
    }
    result
}
