//! Route cost ordering.
//!
//! The planner compares partial routes by a `(time, transfers)` pair. The
//! order in which the two components are compared comes from the
//! configured [`RoutePolicy`].

use std::cmp::Ordering;

use super::config::RoutePolicy;

/// Accumulated cost of a (partial) route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteCost {
    pub time_mins: u32,
    pub transfers: u32,
}

impl RouteCost {
    pub fn new(time_mins: u32, transfers: u32) -> Self {
        Self {
            time_mins,
            transfers,
        }
    }

    /// Extend by one hop. Saturates rather than wrapping.
    pub fn add_hop(self, time_mins: u32, is_transfer: bool) -> Self {
        Self {
            time_mins: self.time_mins.saturating_add(time_mins),
            transfers: self.transfers.saturating_add(u32::from(is_transfer)),
        }
    }

    /// The lexicographic key for `policy`.
    pub fn key(&self, policy: RoutePolicy) -> (u32, u32) {
        match policy {
            RoutePolicy::TimeThenTransfers => (self.time_mins, self.transfers),
            RoutePolicy::TransfersThenTime => (self.transfers, self.time_mins),
        }
    }
}

/// Compare two costs under `policy`. Smaller is better.
pub fn compare(a: &RouteCost, b: &RouteCost, policy: RoutePolicy) -> Ordering {
    a.key(policy).cmp(&b.key(policy))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_first_prefers_faster() {
        let fast_many = RouteCost::new(10, 3);
        let slow_none = RouteCost::new(20, 0);
        assert_eq!(
            compare(&fast_many, &slow_none, RoutePolicy::TimeThenTransfers),
            Ordering::Less
        );
    }

    #[test]
    fn transfers_first_prefers_fewer_changes() {
        let fast_many = RouteCost::new(10, 3);
        let slow_none = RouteCost::new(20, 0);
        assert_eq!(
            compare(&fast_many, &slow_none, RoutePolicy::TransfersThenTime),
            Ordering::Greater
        );
    }

    #[test]
    fn secondary_component_breaks_ties() {
        let a = RouteCost::new(15, 1);
        let b = RouteCost::new(15, 2);
        assert_eq!(compare(&a, &b, RoutePolicy::TimeThenTransfers), Ordering::Less);

        let c = RouteCost::new(12, 1);
        assert_eq!(compare(&c, &a, RoutePolicy::TransfersThenTime), Ordering::Less);
    }

    #[test]
    fn add_hop_accumulates() {
        let cost = RouteCost::default()
            .add_hop(5, false)
            .add_hop(5, false)
            .add_hop(7, true);
        assert_eq!(cost, RouteCost::new(17, 1));
    }

    #[test]
    fn add_hop_saturates() {
        let cost = RouteCost::new(u32::MAX - 1, u32::MAX)
            .add_hop(u32::MAX - 1, true)
            .add_hop(3, true);
        assert_eq!(cost, RouteCost::new(u32::MAX, u32::MAX));
        assert_eq!(
            compare(&cost, &RouteCost::new(1, 0), RoutePolicy::TimeThenTransfers),
            Ordering::Greater
        );
    }
}
