use crate::domain::{PlayerAtTable, SeatIndex};

/// Найти следующее по часовой стрелке место, удовлетворяющее `pred`
/// (включая/исключая start).
pub fn next_seat_where(
    seats: &[PlayerAtTable],
    start: SeatIndex,
    include_start: bool,
    pred: impl Fn(&PlayerAtTable) -> bool,
) -> Option<SeatIndex> {
    let max = seats.len();
    if max == 0 {
        return None;
    }

    let mut idx = start as usize % max;
    if !include_start {
        idx = (idx + 1) % max;
    }

    for _ in 0..max {
        if pred(&seats[idx]) {
            return Some(idx as SeatIndex);
        }
        idx = (idx + 1) % max;
    }

    None
}

/// Следующее место игрока, который ещё в раздаче.
pub fn next_in_hand_seat(seats: &[PlayerAtTable], start: SeatIndex, include_start: bool) -> Option<SeatIndex> {
    next_seat_where(seats, start, include_start, PlayerAtTable::is_in_hand)
}

/// Следующее место игрока, который может ходить.
pub fn next_actor_seat(seats: &[PlayerAtTable], start: SeatIndex, include_start: bool) -> Option<SeatIndex> {
    next_seat_where(seats, start, include_start, PlayerAtTable::can_act)
}

/// Все места по кругу начиная со start, только участники раздачи.
pub fn collect_in_hand_seats_from(seats: &[PlayerAtTable], start: SeatIndex) -> Vec<SeatIndex> {
    let max = seats.len();
    (0..max)
        .map(|i| (start as usize + i) % max)
        .filter(|&idx| seats[idx].is_in_hand())
        .map(|idx| idx as SeatIndex)
        .collect()
}

/// Подсчёт игроков в раздаче (не folded/busted).
pub fn count_in_hand(seats: &[PlayerAtTable]) -> usize {
    seats.iter().filter(|p| p.is_in_hand()).count()
}

/// Подсчёт игроков, которые ещё могут ходить.
pub fn count_can_act(seats: &[PlayerAtTable]) -> usize {
    seats.iter().filter(|p| p.can_act()).count()
}
