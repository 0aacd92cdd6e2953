use std::sync::Arc;

use log::{error, info, warn};

use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::player::{Seat, SeatStatus, UserProfile};
use crate::domain::table::{SeatIndex, Table, TableConfig};
use crate::domain::{TableId, UserId};
use crate::engine::actions::{PlayerAction, PlayerActionKind};
use crate::engine::errors::{EngineError, SeatUnavailableReason};
use crate::engine::hand_history::HandEventKind;
use crate::engine::positions::next_dealer;
use crate::engine::round::Round;
use crate::engine::RandomSource;
use crate::infra::ids::IdGenerator;
use crate::infra::persistence::PlayerDirectory;

/// Игровая сессия одного стола: стол, текущий раунд, RNG и кошельки.
///
/// Сама сессия однопоточная; сериализацию вызовов обеспечивает `TableManager`.
pub struct TableSession {
    table: Table,
    round: Option<Round>,
    rng: Box<dyn RandomSource + Send>,
    directory: Arc<dyn PlayerDirectory>,
    round_ids: IdGenerator,
    /// Колода для следующего раунда вместо случайной (тесты, реплей).
    preset_deck: Option<Deck>,
    /// Итоги завершённого раунда уже применены к столу.
    round_closed: bool,
    /// После внутренней ошибки новые раунды запрещены до `resume()`.
    halted: bool,
}

impl TableSession {
    pub fn new(
        id: TableId,
        config: TableConfig,
        rng: impl RandomSource + Send + 'static,
        directory: Arc<dyn PlayerDirectory>,
    ) -> Self {
        Self {
            table: Table::new(id, config),
            round: None,
            rng: Box::new(rng),
            directory,
            round_ids: IdGenerator::new(),
            preset_deck: None,
            round_closed: true,
            halted: false,
        }
    }

    pub fn id(&self) -> TableId {
        self.table.id
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Текущий или последний завершённый раунд.
    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn round_in_progress(&self) -> bool {
        self.round.as_ref().map(|r| !r.is_finished()).unwrap_or(false)
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Снять блокировку после внутренней ошибки.
    pub fn resume(&mut self) {
        if self.halted {
            info!("стол {}: работа возобновлена оператором", self.table.id);
        }
        self.halted = false;
    }

    /// Следующий раунд будет сдан из этой колоды (`order[0]` – первая карта).
    pub fn set_next_deck(&mut self, deck: Deck) {
        self.preset_deck = Some(deck);
    }

    /// Занятые места по порядку.
    pub fn seats(&self) -> Vec<(SeatIndex, &Seat)> {
        self.table
            .seats
            .iter()
            .enumerate()
            .filter_map(|(idx, s)| s.as_ref().map(|p| (idx, p)))
            .collect()
    }

    pub fn seated_count(&self) -> usize {
        self.table.seated_count()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Сесть за стол. Бай-ин = min(кошелёк, лимит стола), списывается с кошелька.
    /// Возвращает размер стека.
    pub fn join(&mut self, profile: &UserProfile) -> Result<Chips, EngineError> {
        let user_id = profile.user_id;
        if !self.directory.is_registered(user_id)? {
            return Err(seat_unavailable(SeatUnavailableReason::NotRegistered));
        }
        if self.table.find_user(user_id).is_some() {
            return Err(seat_unavailable(SeatUnavailableReason::AlreadySeated));
        }
        let seat = self
            .table
            .first_empty_seat()
            .ok_or(seat_unavailable(SeatUnavailableReason::NoEmptySeat))?;

        let balance = self.directory.balance(user_id)?;
        if balance.is_zero() {
            return Err(seat_unavailable(SeatUnavailableReason::InsufficientFunds));
        }
        let buy_in = balance.min(self.table.config.buy_in_cap);
        self.directory.withdraw(user_id, buy_in)?;
        self.table.take_seat(seat, Seat::new(profile, buy_in));

        info!(
            "стол {}: {} садится на место {} со стеком {}",
            self.table.id, profile.display_name, seat, buy_in
        );
        Ok(buy_in)
    }

    /// Встать из-за стола. Если раунд идёт, игрок выбывает из него
    /// (в свой ход – как fold), его ставки остаются в банке.
    /// Возвращает фишки, которые вернулись на кошелёк.
    pub fn leave(&mut self, user_id: UserId) -> Result<Chips, EngineError> {
        let seat = self.table.find_user(user_id).ok_or(EngineError::NotSeated)?;

        if self.round_in_progress() {
            let acting = self
                .round
                .as_ref()
                .map(|r| r.stage.is_betting() && r.actor == seat && r.status[seat] == SeatStatus::InGame)
                .unwrap_or(false);
            if acting {
                let fold = PlayerAction::new(user_id, PlayerActionKind::Fold);
                self.with_round(|round, table| round.apply_action(table, fold))?;
            }
            self.with_round(|round, table| round.leave_play(table, seat, SeatStatus::Out))?;
        }

        // Место могло освободиться при выбывании в конце раунда.
        match self.table.find_user(user_id) {
            Some(seat) => self.cash_out(seat),
            None => Ok(Chips::ZERO),
        }
    }

    /// Вернуть стек на кошелёк и освободить место.
    fn cash_out(&mut self, seat: SeatIndex) -> Result<Chips, EngineError> {
        let (user_id, stack, name) = match self.table.seat(seat) {
            Some(p) => (p.user_id, p.stack, p.display_name.clone()),
            None => return Ok(Chips::ZERO),
        };
        self.directory.deposit(user_id, stack)?;
        self.table.clear_seat(seat);
        info!(
            "стол {}: {} освобождает место {}, на кошелёк возвращено {}",
            self.table.id, name, seat, stack
        );
        Ok(stack)
    }

    /// Начать новый раунд и довести его до первого хода на префлопе.
    pub fn start_round(&mut self) -> Result<(), EngineError> {
        if self.halted {
            return Err(EngineError::Internal("table is halted until resume"));
        }
        if self.round_in_progress() {
            return Err(EngineError::RoundAlreadyActive);
        }
        self.close_round_if_finished()?;
        if self.table.seated_count() < 2 {
            return Err(EngineError::NotEnoughPlayers);
        }

        let dealer = next_dealer(&self.table).ok_or(EngineError::NotEnoughPlayers)?;
        self.table.dealer = dealer;

        let deck = match self.preset_deck.take() {
            Some(deck) => deck,
            None => Deck::shuffled(self.rng.as_mut()),
        };
        let id = self.round_ids.next_round_id();

        info!(
            "стол {}: раунд {} начат, дилер на месте {}, игроков {}",
            self.table.id,
            id,
            dealer,
            self.table.seated_count()
        );
        self.round = Some(Round::new(id, &self.table, deck));
        self.round_closed = false;

        self.advance_stage()
    }

    /// Явный шаг автоматических стадий раунда.
    pub fn advance_stage(&mut self) -> Result<(), EngineError> {
        self.with_round(|round, table| round.advance_stage(table))
    }

    /// Применить действие игрока.
    pub fn apply_action(&mut self, action: PlayerAction) -> Result<(), EngineError> {
        if !self.round_in_progress() {
            return Err(EngineError::RoundNotActive);
        }
        self.with_round(|round, table| round.apply_action(table, action))
    }

    pub fn fold(&mut self, user_id: UserId) -> Result<(), EngineError> {
        self.apply_action(PlayerAction::new(user_id, PlayerActionKind::Fold))
    }

    pub fn call(&mut self, user_id: UserId) -> Result<(), EngineError> {
        self.apply_action(PlayerAction::new(user_id, PlayerActionKind::Call))
    }

    pub fn check(&mut self, user_id: UserId) -> Result<(), EngineError> {
        self.apply_action(PlayerAction::new(user_id, PlayerActionKind::Check))
    }

    pub fn raise(&mut self, user_id: UserId, amount: Chips) -> Result<(), EngineError> {
        self.apply_action(PlayerAction::new(user_id, PlayerActionKind::Raise(amount)))
    }

    pub fn all_in(&mut self, user_id: UserId) -> Result<(), EngineError> {
        self.apply_action(PlayerAction::new(user_id, PlayerActionKind::AllIn))
    }

    /// Выполнить операцию над раундом с общей обработкой ошибок:
    /// фатальные прерывают раунд, по завершении раунда выбывают пустые стеки.
    fn with_round<F>(&mut self, f: F) -> Result<(), EngineError>
    where
        F: FnOnce(&mut Round, &mut Table) -> Result<(), EngineError>,
    {
        let round = self.round.as_mut().ok_or(EngineError::RoundNotActive)?;
        match f(round, &mut self.table) {
            Ok(()) => self.close_round_if_finished(),
            Err(err) if err.is_fatal() => {
                self.abort_round(&err);
                Err(err)
            }
            Err(err) => {
                if !err.is_silent() {
                    warn!("стол {}: действие отклонено: {}", self.table.id, err);
                }
                Err(err)
            }
        }
    }

    /// Раунд закончился: места с пустым стеком выбывают.
    fn close_round_if_finished(&mut self) -> Result<(), EngineError> {
        let finished = self.round.as_ref().map(|r| r.is_finished()).unwrap_or(false);
        if !finished || self.round_closed {
            return Ok(());
        }

        let busted: Vec<(SeatIndex, UserId)> = self
            .seats()
            .into_iter()
            .filter(|(_, p)| p.stack.is_zero())
            .map(|(idx, p)| (idx, p.user_id))
            .collect();

        // Флаг ставится только после всех выплат: при ошибке хранилища
        // выбывание повторится перед следующим раундом.
        for (seat, user_id) in busted {
            self.cash_out(seat)?;
            info!("стол {}: игрок {} выбывает с места {}", self.table.id, user_id, seat);
            if let Some(round) = self.round.as_mut() {
                round.history.push(HandEventKind::SeatEliminated { seat, user_id });
            }
        }
        self.round_closed = true;
        Ok(())
    }

    /// Внутренняя ошибка: вернуть все ставки и остановить стол.
    fn abort_round(&mut self, err: &EngineError) {
        error!("стол {}: раунд прерван: {}", self.table.id, err);
        let departed = match self.round.as_mut() {
            Some(round) => round.abort(&mut self.table, err),
            None => Vec::new(),
        };
        for (user_id, amount) in departed {
            if let Err(e) = self.directory.deposit(user_id, amount) {
                error!(
                    "стол {}: не удалось вернуть {} игроку {}: {}",
                    self.table.id, amount, user_id, e
                );
            }
        }
        self.round_closed = true;
        self.halted = true;
    }
}

fn seat_unavailable(reason: SeatUnavailableReason) -> EngineError {
    EngineError::SeatUnavailable { reason }
}
