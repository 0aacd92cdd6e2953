//! Тесты внешнего API: команды через TableManager, статус стола, ошибки.

mod common;

use std::sync::Arc;

use common::{c, directory_with, profile, session_with_players, stacked_deck};
use holdem_engine::api::*;
use holdem_engine::domain::card::{Rank, Suit};
use holdem_engine::domain::chips::Chips;
use holdem_engine::domain::hand::Stage;
use holdem_engine::domain::player::SeatStatus;
use holdem_engine::domain::table::TableConfig;
use holdem_engine::engine::{EngineError, ManagerError, PlayerAction, PlayerActionKind, TableManager};
use holdem_engine::eval::HandCategory;
use holdem_engine::infra::{DeterministicRng, PlayerDirectory};

use Rank::*;
use Suit::*;

const TABLE: u64 = 10;

fn act(user_id: u64, kind: PlayerActionKind) -> TableCommand {
    TableCommand::Act(PlayerAction::new(user_id, kind))
}

fn view_of(response: CommandResponse) -> TableViewDto {
    match response {
        CommandResponse::View(view) => view,
        other => panic!("ожидался View, получено {other:?}"),
    }
}

fn three_player_table() -> (TableManager, Arc<holdem_engine::infra::InMemoryPlayerDirectory>) {
    let dir = directory_with(&[1000, 1000, 1000]);
    let manager = TableManager::new(dir.clone());

    let opened = open_table(
        &manager,
        TABLE,
        TableConfig::default(),
        DeterministicRng::from_u64(3),
        &profile(1),
    )
    .unwrap();
    assert_eq!(opened, CommandResponse::Seated { chips: Chips(1000) });

    for user in [2, 3] {
        let seated = execute(&manager, TABLE, TableCommand::Join(profile(user))).unwrap();
        assert_eq!(seated, CommandResponse::Seated { chips: Chips(1000) });
    }
    (manager, dir)
}

//
// ============= ТЕСТ 1: открытие стола и список мест =============
//
#[test]
fn open_join_and_list() {
    let (manager, _dir) = three_player_table();

    assert_eq!(
        open_table(
            &manager,
            TABLE,
            TableConfig::default(),
            DeterministicRng::from_u64(4),
            &profile(2),
        ),
        Err(ApiError::TableExists(TABLE))
    );

    let seats = match execute(&manager, TABLE, TableCommand::ListSeats).unwrap() {
        CommandResponse::Seats(seats) => seats,
        other => panic!("ожидался список мест, получено {other:?}"),
    };
    assert_eq!(seats.len(), 3);
    assert_eq!(seats[2].user_id, 3);
    assert_eq!(seats[2].stack, Chips(1000));

    match run_query(&manager, Query::ListTables).unwrap() {
        QueryResponse::Tables(ids) => assert_eq!(ids, vec![TABLE]),
        other => panic!("ожидался список столов, получено {other:?}"),
    }

    assert_eq!(
        execute(&manager, 99, TableCommand::StartRound),
        Err(ApiError::TableNotFound(99))
    );
}

//
// ============= ТЕСТ 2: статус стола и допустимые действия =============
//
#[test]
fn start_round_shows_actor_and_legal_actions() {
    let (manager, _dir) = three_player_table();

    let view = view_of(execute(&manager, TABLE, TableCommand::StartRound).unwrap());
    assert_eq!(view.stage, Some(Stage::Preflop));
    assert_eq!(view.stage_name, "Preflop");
    assert_eq!(view.pot, Chips(150));
    assert_eq!(view.dealer, Some(1));
    assert_eq!(view.actor, Some(1));
    assert!(view.round_in_progress);
    assert_eq!(
        view.legal_actions,
        vec![LegalAction::Call(Chips(100)), LegalAction::Raise, LegalAction::Fold]
    );
    // Без зрителя карманные карты скрыты.
    assert!(view.seats.iter().all(|s| s.hole_cards.is_none()));
    assert!(view.seats.iter().all(|s| s.status == SeatStatus::InGame));

    let view = match run_query(
        &manager,
        Query::GetTable {
            table_id: TABLE,
            viewer: Some(2),
        },
    )
    .unwrap()
    {
        QueryResponse::Table(view) => view,
        other => panic!("ожидался стол, получено {other:?}"),
    };
    assert!(view.seats[1].hole_cards.is_some());
    assert!(view.seats[0].hole_cards.is_none());
    assert_eq!(view.seats[0].stage_bet, Chips(100));
    assert_eq!(view.seats[2].stack, Chips(950));
}

#[test]
fn short_stack_sees_all_in_instead_of_raise() {
    let (mut session, _dir) = session_with_players(&[1000, 250, 1000]);
    session.start_round().unwrap();

    // Место 1 ходит первым: 250 в стеке, доплатить 100.
    let view = build_table_view(&session, None);
    assert_eq!(view.actor, Some(1));
    assert_eq!(
        view.legal_actions,
        vec![LegalAction::Call(Chips(100)), LegalAction::AllIn, LegalAction::Fold]
    );

    session.call(2).unwrap();
    session.call(3).unwrap();
    let view = build_table_view(&session, None);
    assert_eq!(view.actor, Some(0));
    assert_eq!(view.legal_actions[0], LegalAction::Check);
}

#[test]
fn all_in_seat_is_flagged_in_view() {
    let (mut session, _dir) = session_with_players(&[1000, 250, 1000]);
    session.start_round().unwrap();
    session.all_in(2).unwrap();

    let view = build_table_view(&session, None);
    assert!(view.seats[1].all_in);
    assert_eq!(view.seats[1].stack, Chips::ZERO);
    assert_eq!(view.seats[1].stage_bet, Chips(250));
    assert!(!view.seats[0].all_in);
    assert!(!view.seats[2].all_in);
}

//
// ============= ТЕСТ 3: действия игроков =============
//
#[test]
fn actions_through_commands() {
    let (manager, _dir) = three_player_table();
    execute(&manager, TABLE, TableCommand::StartRound).unwrap();

    // Чужой ход молча игнорируется.
    assert_eq!(
        execute(&manager, TABLE, act(1, PlayerActionKind::Call)).unwrap(),
        CommandResponse::Ignored
    );

    assert_eq!(
        execute(&manager, TABLE, act(2, PlayerActionKind::Check)),
        Err(ApiError::EngineError(EngineError::MustAct.to_string()))
    );

    let view = view_of(execute(&manager, TABLE, act(2, PlayerActionKind::Call)).unwrap());
    assert_eq!(view.pot, Chips(250));
    assert_eq!(view.actor, Some(2));
    // Смотрящий – тот, кто ходил.
    assert!(view.seats[1].hole_cards.is_some());

    // Явный шаг на стадии ставок ничего не меняет.
    let again = view_of(execute(&manager, TABLE, TableCommand::AdvanceStage).unwrap());
    assert_eq!(again.actor, Some(2));
}

//
// ============= ТЕСТ 4: уход всех игроков закрывает стол =============
//
#[test]
fn last_leave_closes_table() {
    let (manager, dir) = three_player_table();
    execute(&manager, TABLE, TableCommand::StartRound).unwrap();
    execute(&manager, TABLE, act(2, PlayerActionKind::Call)).unwrap();

    // C уходит в свой ход (как fold), B – не в свой: A забирает банк.
    assert_eq!(
        execute(&manager, TABLE, TableCommand::Leave { user_id: 3 }).unwrap(),
        CommandResponse::Left {
            chips: Chips(950),
            table_closed: false,
        }
    );
    assert_eq!(
        execute(&manager, TABLE, TableCommand::Leave { user_id: 2 }).unwrap(),
        CommandResponse::Left {
            chips: Chips(900),
            table_closed: false,
        }
    );
    assert_eq!(
        execute(&manager, TABLE, TableCommand::Leave { user_id: 1 }).unwrap(),
        CommandResponse::Left {
            chips: Chips(1150),
            table_closed: true,
        }
    );

    assert!(!manager.has_table(TABLE));
    assert_eq!(dir.balance(1).unwrap(), Chips(1150));
    assert_eq!(dir.balance(2).unwrap(), Chips(900));
    assert_eq!(dir.balance(3).unwrap(), Chips(950));
    assert_eq!(
        execute(&manager, TABLE, TableCommand::Leave { user_id: 1 }),
        Err(ApiError::TableNotFound(TABLE))
    );
}

#[test]
fn leave_without_seat_is_not_seated() {
    let (manager, _dir) = three_player_table();
    assert_eq!(
        execute(&manager, TABLE, TableCommand::Leave { user_id: 42 }),
        Err(ApiError::NotSeated)
    );
    assert!(manager.has_table(TABLE));
}

//
// ============= ТЕСТ 5: вскрытие видно всем =============
//
#[test]
fn showdown_reveals_live_hands() {
    let (mut session, _dir) = session_with_players(&[1000, 1000]);
    session.set_next_deck(stacked_deck(
        &[[c(Ace, Hearts), c(Ace, Diamonds)], [c(Two, Clubs), c(Seven, Diamonds)]],
        [
            c(King, Clubs),
            c(Queen, Spades),
            c(Nine, Hearts),
            c(Five, Diamonds),
            c(Three, Spades),
        ],
    ));
    session.start_round().unwrap();
    session.call(1).unwrap();
    session.check(2).unwrap();
    for _ in 0..3 {
        session.check(1).unwrap();
        session.check(2).unwrap();
    }

    let view = build_table_view(&session, None);
    assert_eq!(view.stage, Some(Stage::End));
    assert!(!view.round_in_progress);
    assert!(view.actor.is_none());
    assert!(view.legal_actions.is_empty());
    assert_eq!(view.seats[0].hole_cards, Some([c(Ace, Hearts), c(Ace, Diamonds)]));
    assert_eq!(view.seats[0].best_hand, Some(HandCategory::OnePair));
    assert_eq!(view.seats[0].earn, Some(Chips(200)));
    assert!(view.seats[1].hole_cards.is_some());
}

//
// ============= ТЕСТ 6: маппинг ошибок =============
//
#[test]
fn errors_map_to_api_errors() {
    assert_eq!(ApiError::from(EngineError::NotSeated), ApiError::NotSeated);
    assert!(matches!(ApiError::from(EngineError::EmptyDeck), ApiError::Fatal(_)));
    assert!(matches!(
        ApiError::from(EngineError::NothingToCall),
        ApiError::EngineError(_)
    ));
    assert_eq!(
        ApiError::from(ManagerError::TableNotFound(3)),
        ApiError::TableNotFound(3)
    );
    assert!(matches!(ApiError::from(ManagerError::Poisoned), ApiError::Internal(_)));
    assert_eq!(
        ApiError::from(ManagerError::Engine(EngineError::NotSeated)),
        ApiError::NotSeated
    );
}
