use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::hand::Stage;
use crate::domain::player::SeatStatus;
use crate::domain::table::{SeatIndex, Table, BIG_BLIND, SMALL_BLIND};
use crate::domain::{RoundId, TableId, UserId};
use crate::engine::actions::{PlayerAction, PlayerActionKind};
use crate::engine::errors::EngineError;
use crate::engine::hand_history::{HandEventKind, HandHistory};
use crate::engine::positions::{count_in_game, next_valid_index};
use crate::engine::side_pots::{award_pots, compute_side_pots};
use crate::engine::validation::validate_action;
use crate::eval::{best_hand, BestHand, HandRank};

/// Один раунд (раздача) за столом.
///
/// Стеки игроков живут в `Table`, поэтому все мутирующие операции
/// принимают стол параметром. Инвариант: `pot == sum(total_bets)`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Round {
    pub id: RoundId,
    pub table_id: TableId,
    pub pot: Chips,
    pub dealer: SeatIndex,
    pub stage: Stage,
    deck: Deck,
    pub community: [Option<Card>; 5],
    /// Статус каждого места в этом раунде.
    pub status: Vec<SeatStatus>,
    /// Кто сидел на месте в момент старта раунда.
    pub players: Vec<Option<UserId>>,
    pub hole_cards: Vec<[Option<Card>; 2]>,
    /// Лучшая рука из открытых карт (с флопа).
    pub best_hands: Vec<Option<BestHand>>,
    pub stage_bets: Vec<Chips>,
    pub total_bets: Vec<Chips>,
    /// Выигрыш места по итогам раунда.
    pub earn: Vec<Chips>,
    /// Чей сейчас ход.
    pub actor: SeatIndex,
    /// Место, на котором закрывается улица.
    pub last_raiser: SeatIndex,
    /// Раунд дошёл до вскрытия карт.
    pub showdown: bool,
    pub history: HandHistory,
}

impl Round {
    /// Новый раунд в стадии Init. Дилер берётся из `table.dealer`.
    ///
    /// Занятые места получают InGame, пустые – Out.
    pub fn new(id: RoundId, table: &Table, deck: Deck) -> Self {
        let n = table.max_seats();
        let status = table
            .seats
            .iter()
            .map(|s| if s.is_some() { SeatStatus::InGame } else { SeatStatus::Out })
            .collect();
        let players = table
            .seats
            .iter()
            .map(|s| s.as_ref().map(|p| p.user_id))
            .collect();

        let mut history = HandHistory::new();
        history.push(HandEventKind::RoundStarted {
            table_id: table.id,
            round_id: id,
            dealer: table.dealer,
        });

        Self {
            id,
            table_id: table.id,
            pot: Chips::ZERO,
            dealer: table.dealer,
            stage: Stage::Init,
            deck,
            community: [None; 5],
            status,
            players,
            hole_cards: vec![[None, None]; n],
            best_hands: vec![None; n],
            stage_bets: vec![Chips::ZERO; n],
            total_bets: vec![Chips::ZERO; n],
            earn: vec![Chips::ZERO; n],
            actor: table.dealer,
            last_raiser: table.dealer,
            showdown: false,
            history,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.stage == Stage::End
    }

    /// Максимальная ставка на текущей улице.
    pub fn max_bet(&self) -> Chips {
        self.stage_bets.iter().copied().max().unwrap_or(Chips::ZERO)
    }

    pub fn in_game_count(&self) -> usize {
        count_in_game(&self.status)
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    /// Явный шаг автоматических стадий (Init, CompulsoryBets, Showdown).
    /// На стадиях ставок и в End ничего не делает.
    pub fn advance_stage(&mut self, table: &mut Table) -> Result<(), EngineError> {
        match self.stage {
            Stage::Init | Stage::CompulsoryBets | Stage::Showdown => self.move_on(table),
            _ => Ok(()),
        }
    }

    /// Выполнить работу текущей стадии и идти дальше,
    /// пока не понадобится ход игрока или раунд не закончится.
    fn move_on(&mut self, table: &mut Table) -> Result<(), EngineError> {
        loop {
            let closed = match self.stage {
                Stage::Init => {
                    self.deal_hole_cards()?;
                    true
                }
                Stage::CompulsoryBets => {
                    self.post_blinds(table)?;
                    self.change_stage(Stage::Preflop);
                    self.next_player(table, 1)?
                }
                Stage::Flop | Stage::Turn | Stage::River => {
                    self.open_street()?;
                    self.next_player(table, 1)?
                }
                Stage::Showdown => {
                    self.settle_showdown()?;
                    self.finish(table);
                    return Ok(());
                }
                Stage::Preflop | Stage::End => return Ok(()),
            };

            if !closed {
                return Ok(());
            }
            self.change_stage(self.stage.next());
        }
    }

    fn change_stage(&mut self, stage: Stage) {
        debug!("стол {}: раунд {} переходит в стадию {}", self.table_id, self.id, stage);
        self.stage = stage;
        self.history.push(HandEventKind::StageChanged { stage });
    }

    /// По две карты каждому месту InGame, перед каждой картой – сжечь одну.
    fn deal_hole_cards(&mut self) -> Result<(), EngineError> {
        let mut dealt = 0;
        for seat in 0..self.status.len() {
            if self.status[seat] != SeatStatus::InGame {
                continue;
            }
            self.earn[seat] = Chips::ZERO;
            self.deck.skip()?;
            let first = self.deck.deal()?;
            self.deck.skip()?;
            let second = self.deck.deal()?;
            self.hole_cards[seat] = [Some(first), Some(second)];
            self.history.push(HandEventKind::HoleCardsDealt {
                seat,
                cards: [first, second],
            });
            dealt += 1;
        }
        debug!(
            "стол {}: раунд {} – карманные карты розданы ({} мест), в колоде {}",
            self.table_id,
            self.id,
            dealt,
            self.deck.len()
        );
        Ok(())
    }

    /// Малый блайнд – следующий после дилера, большой – следующий после малого.
    fn post_blinds(&mut self, table: &mut Table) -> Result<(), EngineError> {
        self.reset_stage_bets();

        let sb = next_valid_index(&self.status, self.dealer)?;
        let sb_paid = self.make_bet(table, sb, SMALL_BLIND);
        let bb = next_valid_index(&self.status, sb)?;
        let bb_paid = self.make_bet(table, bb, BIG_BLIND);

        self.history.push(HandEventKind::BlindsPosted {
            small_blind: (sb, sb_paid),
            big_blind: (bb, bb_paid),
        });
        debug!(
            "стол {}: блайнды {} (место {}) и {} (место {})",
            self.table_id, sb_paid, sb, bb_paid, bb
        );

        // Первым ходит место после большого блайнда; на нём же закрывается улица.
        self.actor = bb;
        self.last_raiser = next_valid_index(&self.status, bb)?;
        Ok(())
    }

    /// Открыть общие карты улицы (с прожигом перед каждой) и выбрать первого.
    fn open_street(&mut self) -> Result<(), EngineError> {
        self.reset_stage_bets();

        let mut dealt = Vec::with_capacity(3);
        for _ in 0..self.stage.community_cards_to_deal() {
            self.deck.skip()?;
            let card = self.deck.deal()?;
            let slot = self
                .community
                .iter_mut()
                .find(|c| c.is_none())
                .ok_or(EngineError::Internal("no free community slot"))?;
            *slot = Some(card);
            dealt.push(card);
        }
        debug!("стол {}: {} открыт: {:?}", self.table_id, self.stage, dealt);
        self.history.push(HandEventKind::BoardDealt {
            stage: self.stage,
            cards: dealt,
        });

        self.update_best_hands()?;

        self.last_raiser = next_valid_index(&self.status, self.dealer)?;
        self.actor = self.dealer;
        Ok(())
    }

    fn reset_stage_bets(&mut self) {
        for bet in self.stage_bets.iter_mut() {
            *bet = Chips::ZERO;
        }
    }

    /// Пересчитать лучшие руки всех мест InGame.
    fn update_best_hands(&mut self) -> Result<(), EngineError> {
        for seat in 0..self.status.len() {
            if self.status[seat] != SeatStatus::InGame {
                continue;
            }
            let best = best_hand(&self.community, &self.hole_cards[seat])?;
            self.best_hands[seat] = Some(best);
            self.history.push(HandEventKind::BestHandUpdated {
                seat,
                stage: self.stage,
                category: best.category(),
            });
        }
        Ok(())
    }

    /// Передать ход дальше.
    ///
    /// Места с нулевым стеком (all-in) пропускаются. `ignore` – сколько раз
    /// пройти через last_raiser, не закрывая улицу.
    /// Возвращает true, если улица закрыта.
    fn next_player(&mut self, table: &Table, ignore: u32) -> Result<bool, EngineError> {
        let mut ignore = ignore;
        let limit = 2 * self.status.len() + 2;
        let mut steps = 0;

        self.actor = next_valid_index(&self.status, self.actor)?;
        while self.actor != self.last_raiser || ignore > 0 {
            steps += 1;
            if steps > limit {
                return Err(EngineError::Internal("turn rotation did not terminate"));
            }
            if self.actor == self.last_raiser {
                ignore -= 1;
            }
            if !table.stack(self.actor).is_zero() {
                return Ok(false);
            }
            self.actor = next_valid_index(&self.status, self.actor)?;
        }
        Ok(true)
    }

    /// Передать ход и, если улица закрылась, перейти к следующей стадии.
    fn rotate(&mut self, table: &mut Table, ignore: u32) -> Result<(), EngineError> {
        if self.next_player(table, ignore)? {
            self.change_stage(self.stage.next());
            self.move_on(table)?;
        }
        Ok(())
    }

    /// Единственная точка движения фишек в банк.
    /// Сумма ограничивается стеком. Возвращает фактически внесённое.
    pub fn make_bet(&mut self, table: &mut Table, seat: SeatIndex, amount: Chips) -> Chips {
        let amount = amount.min(table.stack(seat));
        if let Some(player) = table.seat_mut(seat) {
            player.stack -= amount;
        }
        self.stage_bets[seat] += amount;
        self.total_bets[seat] += amount;
        self.pot += amount;
        amount
    }

    /// Применить действие игрока. При ошибке состояние не меняется.
    pub fn apply_action(&mut self, table: &mut Table, action: PlayerAction) -> Result<(), EngineError> {
        if !self.stage.is_betting() {
            return Err(EngineError::RoundNotActive);
        }
        let seat = table.find_user(action.user_id).ok_or(EngineError::NotSeated)?;
        if self.status[seat] != SeatStatus::InGame || seat != self.actor {
            return Err(EngineError::OutOfTurn);
        }

        let stack = table.stack(seat);
        let max = self.max_bet();
        let amount = validate_action(&action.kind, stack, self.stage_bets[seat], max)?;

        debug!(
            "стол {}: место {} делает {} на стадии {}",
            self.table_id, seat, action.kind, self.stage
        );

        if action.kind == PlayerActionKind::Fold {
            self.push_acted(table, seat, action);
            return self.leave_play(table, seat, SeatStatus::Folded);
        }

        self.make_bet(table, seat, amount);
        match action.kind {
            PlayerActionKind::Raise(_) => self.last_raiser = seat,
            PlayerActionKind::AllIn if self.stage_bets[seat] > max => self.last_raiser = seat,
            _ => {}
        }
        self.push_acted(table, seat, action);
        self.rotate(table, 0)
    }

    fn push_acted(&mut self, table: &Table, seat: SeatIndex, action: PlayerAction) {
        self.history.push(HandEventKind::PlayerActed {
            user_id: action.user_id,
            seat,
            action: action.kind,
            stack_after: table.stack(seat),
            pot_after: self.pot,
        });
    }

    /// Убрать место из розыгрыша посреди раунда (Fold или уход из-за стола).
    ///
    /// Если это был ход места – ход передаётся дальше. Если место держало
    /// отметку last_raiser, она переходит к следующему месту в игре.
    pub fn leave_play(
        &mut self,
        table: &mut Table,
        seat: SeatIndex,
        new_status: SeatStatus,
    ) -> Result<(), EngineError> {
        if self.status[seat] != SeatStatus::InGame {
            if new_status == SeatStatus::Out {
                self.status[seat] = SeatStatus::Out;
            }
            return Ok(());
        }
        self.status[seat] = new_status;

        if new_status == SeatStatus::Out {
            if let Some(user_id) = self.players[seat] {
                self.history.push(HandEventKind::SeatForcedOut { seat, user_id });
            }
        }

        match self.in_game_count() {
            0 => return Err(EngineError::EmptyTable),
            1 => return self.finish_by_fold(table),
            _ => {}
        }

        let held_mark = self.last_raiser == seat;
        if held_mark {
            self.last_raiser = next_valid_index(&self.status, seat)?;
        }
        if seat == self.actor {
            // Улица ещё в первом проходе: новый last_raiser тоже должен сходить.
            self.rotate(table, if held_mark { 1 } else { 0 })?;
        }
        Ok(())
    }

    /// Все, кроме одного, сфолдили: он забирает весь банк без вскрытия.
    fn finish_by_fold(&mut self, table: &mut Table) -> Result<(), EngineError> {
        let winner = self
            .status
            .iter()
            .position(|s| *s == SeatStatus::InGame)
            .ok_or(EngineError::EmptyTable)?;
        self.earn = vec![Chips::ZERO; self.status.len()];
        self.earn[winner] = self.pot;
        if let Some(user_id) = self.players[winner] {
            self.history.push(HandEventKind::PotAwarded {
                seat: winner,
                user_id,
                amount: self.pot,
            });
        }
        info!(
            "стол {}: место {} забирает банк {} без вскрытия",
            self.table_id, winner, self.pot
        );
        self.finish(table);
        Ok(())
    }

    /// Вскрытие: лучшие руки, сайд-поты, выигрыши.
    fn settle_showdown(&mut self) -> Result<(), EngineError> {
        self.showdown = true;
        self.update_best_hands()?;

        let mut ranks: Vec<Option<HandRank>> = vec![None; self.status.len()];
        for seat in 0..self.status.len() {
            if self.status[seat] != SeatStatus::InGame {
                continue;
            }
            let best = self.best_hands[seat].ok_or(EngineError::MissingHoleCards)?;
            ranks[seat] = Some(best.rank);
            if let (Some(user_id), [Some(a), Some(b)]) = (self.players[seat], self.hole_cards[seat]) {
                self.history.push(HandEventKind::ShowdownReveal {
                    seat,
                    user_id,
                    hole_cards: [a, b],
                    best,
                });
            }
        }

        let live: Vec<bool> = self.status.iter().map(|s| *s == SeatStatus::InGame).collect();
        let pots = compute_side_pots(&self.total_bets, &live);
        let earn = award_pots(&pots, &ranks, self.dealer)?;

        let paid: Chips = earn.iter().sum();
        if paid != self.pot {
            return Err(EngineError::Internal("settlement does not conserve chips"));
        }

        for (seat, amount) in earn.iter().enumerate() {
            if amount.is_zero() {
                continue;
            }
            if let Some(user_id) = self.players[seat] {
                self.history.push(HandEventKind::PotAwarded {
                    seat,
                    user_id,
                    amount: *amount,
                });
            }
            info!("стол {}: место {} выигрывает {}", self.table_id, seat, amount);
        }
        self.earn = earn;
        Ok(())
    }

    /// Конец раунда: выигрыши зачисляются в стеки.
    fn finish(&mut self, table: &mut Table) {
        for (seat, amount) in self.earn.iter().enumerate() {
            if let Some(player) = table.seat_mut(seat) {
                if Some(player.user_id) == self.players[seat] {
                    player.stack += *amount;
                }
            }
        }
        self.change_stage(Stage::End);
        self.history.push(HandEventKind::RoundFinished {
            round_id: self.id,
            table_id: self.table_id,
        });
        info!("стол {}: раунд {} завершён, банк {}", self.table_id, self.id, self.pot);
    }

    /// Прервать раунд после внутренней ошибки: вернуть все ставки.
    ///
    /// Ставки мест, которые уже ушли из-за стола, возвращаются списком
    /// `(игрок, сумма)` для зачисления на кошелёк.
    pub fn abort(&mut self, table: &mut Table, reason: &EngineError) -> Vec<(UserId, Chips)> {
        let mut departed = Vec::new();
        let mut refunded = Chips::ZERO;

        for seat in 0..self.total_bets.len() {
            let amount = self.total_bets[seat];
            if amount.is_zero() {
                continue;
            }
            let owner = self.players[seat];
            match table.seat_mut(seat) {
                Some(player) if Some(player.user_id) == owner => player.stack += amount,
                _ => {
                    if let Some(user_id) = owner {
                        departed.push((user_id, amount));
                    }
                }
            }
            refunded += amount;
            self.total_bets[seat] = Chips::ZERO;
            self.stage_bets[seat] = Chips::ZERO;
        }

        self.pot = Chips::ZERO;
        self.earn = vec![Chips::ZERO; self.status.len()];
        self.stage = Stage::End;
        self.history.push(HandEventKind::RoundAborted {
            round_id: self.id,
            reason: reason.to_string(),
            refunded,
        });
        departed
    }
}
