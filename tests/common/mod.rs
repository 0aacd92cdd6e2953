//! Общие помощники для интеграционных тестов.

#![allow(dead_code)]

use std::sync::Arc;

use holdem_engine::domain::card::{Card, Rank, Suit};
use holdem_engine::domain::chips::Chips;
use holdem_engine::domain::deck::Deck;
use holdem_engine::domain::player::UserProfile;
use holdem_engine::domain::table::TableConfig;
use holdem_engine::domain::UserId;
use holdem_engine::engine::TableSession;
use holdem_engine::infra::{DeterministicRng, InMemoryPlayerDirectory, PlayerDirectory};

/// Удобный конструктор карты.
pub fn c(rank: Rank, suit: Suit) -> Card {
    Card::new(rank, suit)
}

pub fn profile(user_id: UserId) -> UserProfile {
    UserProfile::new(user_id, format!("Player {user_id}"), format!("player{user_id}"))
}

/// Справочник, где у игроков 1..=n зарегистрирован чат и лежат указанные суммы.
pub fn directory_with(balances: &[u64]) -> Arc<InMemoryPlayerDirectory> {
    let dir = Arc::new(InMemoryPlayerDirectory::new());
    for (i, balance) in balances.iter().enumerate() {
        let user_id = i as UserId + 1;
        dir.register(user_id, 1000 + user_id as i64).unwrap();
        dir.deposit(user_id, Chips(*balance)).unwrap();
    }
    dir
}

/// Стол, за которым игроки 1..=n сидят на местах 0..n-1 со стеками `stacks`.
pub fn session_with_players(stacks: &[u64]) -> (TableSession, Arc<InMemoryPlayerDirectory>) {
    let dir = directory_with(stacks);
    let shared: Arc<dyn PlayerDirectory> = dir.clone();
    let mut session = TableSession::new(1, TableConfig::default(), DeterministicRng::from_u64(7), shared);
    for i in 0..stacks.len() {
        session.join(&profile(i as UserId + 1)).unwrap();
    }
    (session, dir)
}

/// Колода, которая раздаст места (в порядке возрастания индекса) `holes`
/// и борд `board`, с прожигом перед каждой картой.
pub fn stacked_deck(holes: &[[Card; 2]], board: [Card; 5]) -> Deck {
    let mut used: Vec<Card> = holes.iter().flatten().copied().collect();
    used.extend_from_slice(&board);
    let mut burns = Deck::standard_52()
        .remaining()
        .iter()
        .copied()
        .filter(|c| !used.contains(c))
        .collect::<Vec<_>>()
        .into_iter();

    let mut order = Vec::with_capacity(52);
    for hole in holes {
        for card in hole {
            order.push(burns.next().unwrap());
            order.push(*card);
        }
    }
    for card in board {
        order.push(burns.next().unwrap());
        order.push(card);
    }
    order.extend(burns);
    Deck::from_deal_order(order)
}
