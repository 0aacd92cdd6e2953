use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::player::SeatStatus;
use crate::domain::table::{Table, MIN_RAISE};
use crate::domain::{TableId, UserId};
use crate::engine::{Round, TableManager, TableSession};

use super::dto::{LegalAction, SeatListingDto, SeatViewDto, TableViewDto};
use super::errors::ApiError;

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Query {
    /// Получить состояние стола глазами игрока (или зрителя, если viewer = None).
    GetTable {
        table_id: TableId,
        viewer: Option<UserId>,
    },

    /// Получить список столов.
    ListTables,
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum QueryResponse {
    Table(TableViewDto),
    Tables(Vec<TableId>),
}

pub fn run_query(manager: &TableManager, query: Query) -> Result<QueryResponse, ApiError> {
    match query {
        Query::GetTable { table_id, viewer } => {
            let view = manager.with_session(table_id, |s| build_table_view(s, viewer))?;
            Ok(QueryResponse::Table(view))
        }
        Query::ListTables => Ok(QueryResponse::Tables(manager.table_ids())),
    }
}

/// Сформировать DTO стола на основе сессии.
///
/// Карманные карты и лучшая рука видны только `viewer`, а после
/// вскрытия – у всех, кто дошёл до шоудауна.
pub fn build_table_view(session: &TableSession, viewer: Option<UserId>) -> TableViewDto {
    let table = session.table();
    let round = session.round();
    let in_progress = session.round_in_progress();

    let seats = table
        .seats
        .iter()
        .enumerate()
        .filter_map(|(idx, s)| s.as_ref().map(|p| (idx, p)))
        .map(|(idx, p)| {
            // Данные раунда относятся к месту, только если игрок тот же.
            let round = round.filter(|r| r.players.get(idx).copied().flatten() == Some(p.user_id));
            let status = round.map(|r| r.status[idx]).unwrap_or(SeatStatus::Out);
            let revealed = round
                .map(|r| r.showdown && r.is_finished() && status == SeatStatus::InGame)
                .unwrap_or(false);
            let visible = revealed || viewer == Some(p.user_id);

            SeatViewDto {
                seat_index: idx,
                user_id: p.user_id,
                display_name: p.display_name.clone(),
                username: p.username.clone(),
                status,
                stack: p.stack,
                stage_bet: round.map(|r| r.stage_bets[idx]).unwrap_or(Chips::ZERO),
                total_bet: round.map(|r| r.total_bets[idx]).unwrap_or(Chips::ZERO),
                all_in: status == SeatStatus::InGame && p.is_all_in(),
                earn: round.filter(|r| r.is_finished()).map(|r| r.earn[idx]),
                hole_cards: round
                    .filter(|_| visible)
                    .and_then(|r| match r.hole_cards[idx] {
                        [Some(a), Some(b)] => Some([a, b]),
                        _ => None,
                    }),
                best_hand: round
                    .filter(|_| visible)
                    .and_then(|r| r.best_hands[idx])
                    .map(|b| b.category()),
            }
        })
        .collect();

    let waiting = round.filter(|r| in_progress && r.stage.is_betting());

    TableViewDto {
        table_id: table.id,
        name: table.config.name.clone(),
        stage: round.map(|r| r.stage),
        stage_name: round.map(|r| r.stage.name().to_string()).unwrap_or_default(),
        pot: round.map(|r| r.pot).unwrap_or(Chips::ZERO),
        community: round.map(|r| r.community).unwrap_or([None; 5]),
        dealer: round.map(|r| r.dealer),
        actor: waiting.map(|r| r.actor),
        round_in_progress: in_progress,
        halted: session.is_halted(),
        seats,
        legal_actions: waiting.map(|r| legal_actions(r, table)).unwrap_or_default(),
    }
}

/// Доступные действия для игрока, чей ход.
///
/// Check – если ставка уже равна максимальной; Call – если есть чем доплатить
/// больше разницы; Raise – если стек больше разницы плюс два минимальных рейза,
/// иначе AllIn; Fold – всегда.
pub fn legal_actions(round: &Round, table: &Table) -> Vec<LegalAction> {
    let seat = round.actor;
    let max = round.max_bet();
    let stage_bet = round.stage_bets[seat];
    let diff = max.saturating_sub(stage_bet);
    let stack = table.stack(seat);

    let mut actions = Vec::with_capacity(4);
    if max <= stage_bet {
        actions.push(LegalAction::Check);
    } else if stack > diff {
        actions.push(LegalAction::Call(diff));
    }
    if stack > diff + MIN_RAISE.times(2) {
        actions.push(LegalAction::Raise);
    } else {
        actions.push(LegalAction::AllIn);
    }
    actions.push(LegalAction::Fold);
    actions
}

/// Список игроков за столом.
pub fn list_seats(session: &TableSession) -> Vec<SeatListingDto> {
    session
        .seats()
        .into_iter()
        .map(|(idx, p)| SeatListingDto {
            seat_index: idx,
            user_id: p.user_id,
            display_name: p.display_name.clone(),
            stack: p.stack,
        })
        .collect()
}
