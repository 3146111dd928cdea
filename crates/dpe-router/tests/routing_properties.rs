//! Property tests for route selection over arbitrary candidate sets.

use std::collections::BTreeMap;

use dpe_core::{Context, CostVector, Route};
use dpe_router::{Router, RouterError, SelectionBasis};
use proptest::prelude::*;

fn cost_vector() -> impl Strategy<Value = CostVector> {
    (0u64..5_000, 0.0f64..=1.0, 0.0f64..=1.0, 0.0f64..20.0)
        .prop_map(|(l, p, r, d)| CostVector::new(l, p, r, d).unwrap())
}

fn candidate_set() -> impl Strategy<Value = BTreeMap<Route, CostVector>> {
    prop::collection::btree_map(
        prop_oneof![
            Just(Route::Local),
            Just(Route::Hybrid),
            Just(Route::Cloud),
            Just(Route::Degraded),
        ],
        cost_vector(),
        0..=4,
    )
}

fn context(network: bool) -> Context {
    Context::new(network, 120, 0.5, true, false).unwrap()
}

proptest! {
    #[test]
    fn selection_is_deterministic(network in any::<bool>(), c in candidate_set()) {
        let router = Router::default();
        let a = router.select_route(&context(network), &c);
        let b = router.select_route(&context(network), &c);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn offline_never_selects_cloud(c in candidate_set()) {
        match Router::default().select_route(&context(false), &c) {
            Ok(sel) => prop_assert_ne!(sel.route, Route::Cloud),
            Err(e) => {
                prop_assert_eq!(e, RouterError::NoRouteAvailable);
                prop_assert!(c.keys().all(|r| *r == Route::Cloud));
            }
        }
    }

    #[test]
    fn offline_with_local_always_local(c in candidate_set(), local in cost_vector()) {
        let mut c = c;
        c.insert(Route::Local, local);
        let sel = Router::default().select_route(&context(false), &c).unwrap();
        prop_assert_eq!(sel.route, Route::Local);
        prop_assert_eq!(sel.cost, local);
    }

    #[test]
    fn online_choice_has_minimum_score(c in candidate_set()) {
        prop_assume!(!c.is_empty());
        let sel = Router::default().select_route(&context(true), &c).unwrap();
        prop_assert_eq!(sel.explanation.basis, SelectionBasis::MinimumScore);
        let best = sel.explanation.scores[&sel.route];
        prop_assert!(sel.explanation.scores.values().all(|s| *s >= best));
        prop_assert_eq!(sel.explanation.scores.len(), c.len());
    }

    #[test]
    fn scores_lie_in_unit_interval_with_default_weights(c in candidate_set()) {
        if let Ok(sel) = Router::default().select_route(&context(true), &c) {
            for s in sel.explanation.scores.values() {
                prop_assert!(*s >= 0.0 && *s <= 1.0 + 1e-12);
            }
        }
    }
}

#[test]
fn four_identical_candidates_pick_local() {
    let same = CostVector::new(100, 0.2, 0.2, 0.2).unwrap();
    let c: BTreeMap<Route, CostVector> = Route::ALL.iter().map(|r| (*r, same)).collect();
    let sel = Router::default().select_route(&context(true), &c).unwrap();
    assert_eq!(sel.route, Route::Local);
}
