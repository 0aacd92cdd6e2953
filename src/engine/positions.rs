use crate::domain::{SeatIndex, SeatStatus, Table};
use crate::engine::errors::EngineError;

/// Следующее место по часовой стрелке со статусом InGame (не включая `start`).
///
/// Если в раунде не осталось ни одного InGame места – это баг вызывающего кода.
pub fn next_valid_index(statuses: &[SeatStatus], start: SeatIndex) -> Result<SeatIndex, EngineError> {
    let max = statuses.len();
    (1..=max)
        .map(|i| (start + i) % max)
        .find(|&idx| statuses[idx] == SeatStatus::InGame)
        .ok_or(EngineError::EmptyTable)
}

/// Сколько мест ещё в игре.
pub fn count_in_game(statuses: &[SeatStatus]) -> usize {
    statuses.iter().filter(|s| **s == SeatStatus::InGame).count()
}

/// Места в порядке по часовой стрелке, начиная со следующего после `start`.
pub fn clockwise_from(max_seats: usize, start: SeatIndex) -> impl Iterator<Item = SeatIndex> {
    (1..=max_seats).map(move |i| (start + i) % max_seats)
}

/// Следующая позиция дилера: первое занятое место после текущего указателя.
pub fn next_dealer(table: &Table) -> Option<SeatIndex> {
    table.next_occupied_after(table.dealer)
}
