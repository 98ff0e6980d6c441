//! Route type.
//!
//! A `Route` is an ordered path of stations from a source to a destination,
//! together with the line ridden on each hop, the total travel time and the
//! number of line transfers.

use super::{DomainError, LineId, StationId};

/// Count line changes between consecutive hops.
///
/// A transfer happens whenever two consecutive hops belong to different
/// lines. An empty or single-hop sequence has no transfers.
///
/// ```
/// use metro_server::domain::{LineId, count_transfers};
///
/// let r1 = LineId::parse("R1").unwrap();
/// let r2 = LineId::parse("R2").unwrap();
/// assert_eq!(count_transfers(&[r1.clone(), r1.clone(), r2.clone()]), 1);
/// assert_eq!(count_transfers(&[r1.clone(), r2.clone(), r1]), 2);
/// ```
pub fn count_transfers(legs: &[LineId]) -> u32 {
    let changes = legs.windows(2).filter(|w| w[0] != w[1]).count();
    u32::try_from(changes).unwrap_or(u32::MAX)
}

/// A computed route between two stations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    stops: Vec<StationId>,
    legs: Vec<LineId>,
    total_time_mins: u32,
    transfers: u32,
}

impl Route {
    /// Build a route from its stops and the line used for each hop.
    ///
    /// `legs[i]` is the line between `stops[i]` and `stops[i + 1]`, so there
    /// must be exactly one fewer leg than stops. The transfer count is
    /// derived from `legs`.
    pub fn new(
        stops: Vec<StationId>,
        legs: Vec<LineId>,
        total_time_mins: u32,
    ) -> Result<Self, DomainError> {
        if stops.len() < 2 {
            return Err(DomainError::EmptyRoute);
        }
        if legs.len() + 1 != stops.len() {
            return Err(DomainError::MismatchedLegs {
                stops: stops.len(),
                legs: legs.len(),
            });
        }
        let transfers = count_transfers(&legs);
        Ok(Self {
            stops,
            legs,
            total_time_mins,
            transfers,
        })
    }

    /// Stations visited, source first and destination last.
    pub fn stops(&self) -> &[StationId] {
        &self.stops
    }

    /// Line used on each hop.
    pub fn legs(&self) -> &[LineId] {
        &self.legs
    }

    pub fn source(&self) -> &StationId {
        &self.stops[0]
    }

    pub fn destination(&self) -> &StationId {
        &self.stops[self.stops.len() - 1]
    }

    pub fn total_time_mins(&self) -> u32 {
        self.total_time_mins
    }

    pub fn transfers(&self) -> u32 {
        self.transfers
    }

    /// Stations at which the rider changes line.
    pub fn interchanges(&self) -> Vec<&StationId> {
        self.legs
            .windows(2)
            .enumerate()
            .filter(|(_, w)| w[0] != w[1])
            .map(|(i, _)| &self.stops[i + 1])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sid(s: &str) -> StationId {
        StationId::parse(s).unwrap()
    }

    fn line(s: &str) -> LineId {
        LineId::parse(s).unwrap()
    }

    #[test]
    fn transfers_counted_from_legs() {
        let route = Route::new(
            vec![sid("S1"), sid("S2"), sid("S3"), sid("S5")],
            vec![line("R1"), line("R1"), line("R2")],
            15,
        )
        .unwrap();

        assert_eq!(route.transfers(), 1);
        assert_eq!(route.source(), &sid("S1"));
        assert_eq!(route.destination(), &sid("S5"));
        assert_eq!(route.interchanges(), vec![&sid("S3")]);
    }

    #[test]
    fn no_transfers_on_single_line() {
        let route = Route::new(vec![sid("S1"), sid("S2")], vec![line("R1")], 5).unwrap();
        assert_eq!(route.transfers(), 0);
        assert!(route.interchanges().is_empty());
    }

    #[test]
    fn count_transfers_edge_cases() {
        assert_eq!(count_transfers(&[]), 0);
        assert_eq!(count_transfers(&[line("R1")]), 0);
        assert_eq!(
            count_transfers(&[line("A"), line("B"), line("B"), line("C"), line("A")]),
            3
        );
    }

    #[test]
    fn count_transfers_on_long_alternating_route() {
        let (a, b) = (line("A"), line("B"));
        let legs: Vec<_> = (0..10_000)
            .map(|i| if i % 2 == 0 { a.clone() } else { b.clone() })
            .collect();
        assert_eq!(count_transfers(&legs), 9_999);
    }

    #[test]
    fn rejects_too_few_stops() {
        let err = Route::new(vec![sid("S1")], vec![], 0).unwrap_err();
        assert!(matches!(err, DomainError::EmptyRoute));
    }

    #[test]
    fn rejects_mismatched_legs() {
        let err = Route::new(vec![sid("S1"), sid("S2")], vec![], 5).unwrap_err();
        assert!(matches!(
            err,
            DomainError::MismatchedLegs { stops: 2, legs: 0 }
        ));
    }
}
