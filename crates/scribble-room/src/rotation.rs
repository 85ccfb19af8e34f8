//! Drawer rotation policy.

use scribble_protocol::ConnectionId;

/// Picks who draws next.
///
/// `order` is the roster in join order, treated as a cycle: the player
/// after `previous` draws next, wrapping to the first player after the
/// last one. If there was no previous drawer, or they are no longer on
/// the roster, the first player draws. An empty roster yields `None`.
pub fn next_drawer(order: &[ConnectionId], previous: Option<ConnectionId>) -> Option<ConnectionId> {
    let first = *order.first()?;
    let Some(previous) = previous else {
        return Some(first);
    };
    match order.iter().position(|id| *id == previous) {
        Some(idx) if idx + 1 < order.len() => Some(order[idx + 1]),
        _ => Some(first),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u64]) -> Vec<ConnectionId> {
        raw.iter().copied().map(ConnectionId::new).collect()
    }

    #[test]
    fn test_next_drawer_empty_roster_is_none() {
        assert_eq!(next_drawer(&[], None), None);
        assert_eq!(next_drawer(&[], Some(ConnectionId::new(1))), None);
    }

    #[test]
    fn test_next_drawer_without_previous_picks_first() {
        let order = ids(&[5, 6, 7]);
        assert_eq!(next_drawer(&order, None), Some(order[0]));
    }

    #[test]
    fn test_next_drawer_advances_and_wraps() {
        let order = ids(&[5, 6, 7]);
        assert_eq!(next_drawer(&order, Some(order[0])), Some(order[1]));
        assert_eq!(next_drawer(&order, Some(order[1])), Some(order[2]));
        assert_eq!(next_drawer(&order, Some(order[2])), Some(order[0]));
    }

    #[test]
    fn test_next_drawer_departed_previous_wraps_to_first() {
        let order = ids(&[5, 7]);
        assert_eq!(next_drawer(&order, Some(ConnectionId::new(6))), Some(order[0]));
    }

    #[test]
    fn test_next_drawer_visits_everyone_once_per_cycle() {
        let order = ids(&[1, 2, 3, 4]);
        let mut current = None;
        let mut visited = Vec::new();
        for _ in 0..order.len() * 2 {
            current = next_drawer(&order, current);
            visited.push(current.unwrap());
        }
        assert_eq!(&visited[..4], &order[..]);
        assert_eq!(&visited[4..], &order[..]);
    }
}
