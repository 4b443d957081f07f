//! Round-robin selection.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::load_balancer::backend::{BackendTarget, TargetSet};

/// Round-robin selector.
/// Stores an internal counter to rotate through targets.
///
/// The counter is claimed with a single `fetch_add`, so every dispatch gets
/// a distinct ticket: two concurrent dispatches can never observe the same
/// pre-increment value and therefore never pick the same target while
/// another one is due.
#[derive(Debug, Default)]
pub struct RoundRobin {
    counter: AtomicUsize,
}

impl RoundRobin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the next rotation slot and return its target.
    ///
    /// Selection is unconditional: a target that failed the previous
    /// request is still served its turn on the next pass.
    pub fn next<'a>(&self, targets: &'a TargetSet) -> &'a BackendTarget {
        let ticket = self.counter.fetch_add(1, Ordering::Relaxed);
        targets.get(ticket % targets.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn set(urls: &[&str]) -> TargetSet {
        TargetSet::parse(urls).unwrap()
    }

    #[test]
    fn rotates_in_registration_order() {
        let lb = RoundRobin::new();
        let targets = set(&[
            "http://127.0.0.1:18001",
            "http://127.0.0.1:18002",
            "http://127.0.0.1:18003",
        ]);

        let picks: Vec<String> = (0..4).map(|_| lb.next(&targets).authority()).collect();
        assert_eq!(
            picks,
            [
                "127.0.0.1:18001",
                "127.0.0.1:18002",
                "127.0.0.1:18003",
                "127.0.0.1:18001",
            ]
        );
    }

    #[test]
    fn concurrent_claims_stay_balanced() {
        let lb = Arc::new(RoundRobin::new());
        let targets = Arc::new(set(&[
            "http://127.0.0.1:18001",
            "http://127.0.0.1:18002",
            "http://127.0.0.1:18003",
            "http://127.0.0.1:18004",
        ]));

        let tasks = 8;
        let claims_per_task = 50;
        let handles: Vec<_> = (0..tasks)
            .map(|_| {
                let lb = lb.clone();
                let targets = targets.clone();
                std::thread::spawn(move || {
                    (0..claims_per_task)
                        .map(|_| lb.next(&targets).authority())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut counts = std::collections::HashMap::new();
        for handle in handles {
            for authority in handle.join().unwrap() {
                *counts.entry(authority).or_insert(0usize) += 1;
            }
        }

        // 400 claims over 4 targets: the ticket counter hands out each
        // index exactly 100 times no matter how the tasks interleave.
        assert_eq!(counts.len(), 4);
        for (_, count) in counts {
            assert_eq!(count, tasks * claims_per_task / 4);
        }
    }
}
