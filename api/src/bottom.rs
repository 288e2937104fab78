use crate::{Seat, Team};

/// The seat that takes up and buries the bottom pile.
///
/// When the main was called from the banker team the caller's partner
/// buries, otherwise the seat after the caller does.
pub fn determine_bottom_dealer(main_caller: Seat, banker_team: Team) -> Seat {
    if main_caller.team() == banker_team {
        main_caller.across()
    } else {
        main_caller.left()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_opposing_caller_passes_to_next_seat() {
        assert_eq!(determine_bottom_dealer(Seat::East, Team::One), Seat::South);
        assert_eq!(determine_bottom_dealer(Seat::West, Team::One), Seat::North);
        assert_eq!(determine_bottom_dealer(Seat::North, Team::Two), Seat::East);
    }

    #[test]
    fn test_banker_caller_passes_to_partner() {
        assert_eq!(determine_bottom_dealer(Seat::North, Team::One), Seat::South);
        assert_eq!(determine_bottom_dealer(Seat::South, Team::One), Seat::North);
        assert_eq!(determine_bottom_dealer(Seat::East, Team::Two), Seat::West);
    }

    #[test]
    fn test_exactly_one_dealer() {
        for &caller in &Seat::VALUES {
            for &team in &[Team::One, Team::Two] {
                assert_ne!(determine_bottom_dealer(caller, team), caller);
            }
        }
    }
}
