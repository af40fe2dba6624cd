use std::collections::HashMap;

use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::hand::{HandSummary, PlayerHandResult, Street};
use crate::domain::table::{Table, TableConfig};
use crate::domain::{HandId, SeatIndex};
use crate::engine::actions::{PlayerAction, PlayerActionKind};
use crate::engine::betting::{BettingRound, RoundState};
use crate::engine::errors::EngineError;
use crate::engine::hand_history::{HandEventKind, HandHistory};
use crate::engine::positions::{collect_in_hand_seats_from, count_in_hand, next_in_hand_seat};
use crate::engine::pot::Pot;
use crate::engine::showdown::{Contender, RandomShowdown, ShowdownResolver};
use crate::engine::RandomSource;

/// Статус раздачи для внешнего кода.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandStatus {
    Ongoing,
    Finished(HandSummary),
}

/// Движок одного стола: колода, банк, игроки и текущий раунд ставок.
///
/// Глобального состояния нет – UI держит свой экземпляр и вызывает методы
/// из одного потока.
pub struct HandEngine<R: RandomSource> {
    pub table: Table,
    pub deck: Deck,
    pub pot: Pot,
    /// Раунд ставок текущей улицы (None вне торговли).
    pub betting: Option<BettingRound>,
    /// Сколько всего фишек внёс каждый seat за раздачу.
    pub contributions: HashMap<SeatIndex, Chips>,
    /// История текущей (или последней) раздачи.
    pub history: HandHistory,
    /// Номер последней начатой раздачи.
    pub hand_id: HandId,
    pub last_summary: Option<HandSummary>,
    rng: R,
    resolver: Box<dyn ShowdownResolver>,
}

impl<R: RandomSource + 'static> HandEngine<R> {
    /// Движок со случайным выбором победителя на шоудауне.
    /// Резолвер получает свой поток, не связанный с тасовкой колоды.
    pub fn new(config: TableConfig, mut rng: R) -> Result<Self, EngineError> {
        let resolver = RandomShowdown::new(rng.fork());
        Self::with_resolver(config, rng, resolver)
    }
}

impl<R: RandomSource> HandEngine<R> {
    pub fn with_resolver(
        config: TableConfig,
        rng: R,
        resolver: impl ShowdownResolver + 'static,
    ) -> Result<Self, EngineError> {
        Ok(Self {
            table: Table::new(config)?,
            deck: Deck::standard_52(),
            pot: Pot::new(),
            betting: None,
            contributions: HashMap::new(),
            history: HandHistory::new(),
            hand_id: 0,
            last_summary: None,
            rng,
            resolver: Box::new(resolver),
        })
    }

    pub fn street(&self) -> Street {
        self.table.street
    }

    pub fn current_actor(&self) -> Option<SeatIndex> {
        self.betting.as_ref().and_then(BettingRound::current_actor)
    }

    /// Ставка стола на текущей улице (0 вне торговли).
    pub fn table_bet(&self) -> Chips {
        self.betting
            .as_ref()
            .map(|b| b.table_bet)
            .unwrap_or(Chips::ZERO)
    }

    /// Все фишки за столом: стеки + банк. Не меняется внутри раздачи.
    pub fn total_chips(&self) -> Chips {
        self.table.total_stacks() + self.pot.total
    }

    /// Нужно ли вызвать `advance_if_needed`: раунд закрыт или ждёт шоудаун.
    pub fn needs_advance(&self) -> bool {
        match self.table.street {
            Street::Waiting => false,
            Street::Showdown => true,
            _ => self.betting.as_ref().map_or(true, BettingRound::is_complete),
        }
    }

    /// Старт новой раздачи:
    /// - пересобирает и тасует колоду, сбрасывает банк и игроков;
    /// - раздаёт по 2 карты по кругу начиная с места 0;
    /// - постит блайнды и открывает префлоп.
    pub fn start_hand(&mut self) -> Result<(), EngineError> {
        if self.table.hand_in_progress() {
            return Err(EngineError::HandAlreadyInProgress);
        }
        if self.table.funded_count() < 2 {
            return Err(EngineError::InsufficientPlayers);
        }

        self.hand_id += 1;
        self.history.clear();
        self.history.push(HandEventKind::HandStarted {
            hand_id: self.hand_id,
        });

        self.deck.reset(&mut self.rng);
        self.pot.reset();
        self.contributions.clear();
        self.table.board.clear();
        for p in self.table.seats.iter_mut() {
            p.reset_for_hand();
        }
        self.table.street = Street::Preflop;

        if let Err(err) = self.deal_hole_cards() {
            return Err(self.abort_hand(err));
        }

        let start = self.post_blinds()?;
        let table_bet = self
            .table
            .seats
            .iter()
            .map(|p| p.current_bet)
            .max()
            .unwrap_or(Chips::ZERO);
        let round = BettingRound::new(Street::Preflop, &self.table.seats, table_bet, start);

        log::info!(
            "hand #{} started: pot={} table_bet={} first_actor={:?}",
            self.hand_id,
            self.pot.total,
            table_bet,
            round.first_actor
        );
        self.betting = Some(round);
        Ok(())
    }

    /// Раздача карманных карт – по 2 карты, по кругу от места 0.
    fn deal_hole_cards(&mut self) -> Result<(), EngineError> {
        let order = collect_in_hand_seats_from(&self.table.seats, 0);
        for _round in 0..2 {
            for &seat in &order {
                let card = self.deck.draw()?;
                self.table.seats[seat as usize].receive_card(card);
                self.history.push(HandEventKind::HoleCardDealt { seat, card });
            }
        }
        Ok(())
    }

    /// Постинг блайндов: SB – первое место в раздаче от 0, BB – следующее.
    /// Возвращает место, с которого начинается поиск первого ходящего.
    fn post_blinds(&mut self) -> Result<SeatIndex, EngineError> {
        let order = collect_in_hand_seats_from(&self.table.seats, 0);
        let (sb_seat, bb_seat) = match order.as_slice() {
            [sb, bb, ..] => (*sb, *bb),
            _ => return Err(EngineError::InsufficientPlayers),
        };

        let stakes = self.table.config.stakes.clone();
        let sb_paid = self.commit_chips(sb_seat, stakes.small_blind);
        let bb_paid = self.commit_chips(bb_seat, stakes.big_blind);

        self.history.push(HandEventKind::BlindsPosted {
            small_blind: (sb_seat, sb_paid),
            big_blind: (bb_seat, bb_paid),
        });

        let n = self.table.seat_count();
        Ok(((bb_seat as usize + 1) % n) as SeatIndex)
    }

    /// Принудительный взнос (блайнд) мимо раунда ставок.
    fn commit_chips(&mut self, seat: SeatIndex, amount: Chips) -> Chips {
        let paid = self.table.seats[seat as usize].commit(amount);
        self.add_contribution(seat, paid);
        self.pot.add(paid);
        paid
    }

    fn add_contribution(&mut self, seat: SeatIndex, amount: Chips) {
        if amount.is_zero() {
            return;
        }
        *self.contributions.entry(seat).or_insert(Chips::ZERO) += amount;
    }

    /// Применить действие игрока к текущему раунду ставок.
    ///
    /// Переход улиц здесь не делается: после `RoundState::Complete`
    /// вызывающий код зовёт `advance_if_needed`.
    pub fn apply_action(&mut self, action: PlayerAction) -> Result<RoundState, EngineError> {
        if !self.table.street.is_betting() {
            return Err(match self.table.street {
                Street::Waiting => EngineError::NoActiveHand,
                street => EngineError::IllegalState {
                    op: "apply_action",
                    street,
                },
            });
        }

        let round = self.betting.as_mut().ok_or(EngineError::NoActiveHand)?;
        let state = match round.apply(&mut self.table.seats, &mut self.pot, &action) {
            Ok(state) => state,
            Err(err) => {
                log::warn!("rejected {} from seat {}: {}", action.kind, action.seat, err);
                return Err(err);
            }
        };

        let committed = round
            .last_action
            .as_ref()
            .map(|a| a.committed)
            .unwrap_or(Chips::ZERO);
        self.add_contribution(action.seat, committed);

        let new_stack = self.table.seats[action.seat as usize].stack;
        self.history.push(HandEventKind::PlayerActed {
            player_id: action.player_id,
            seat: action.seat,
            action: action.kind,
            committed,
            new_stack,
            pot_after: self.pot.total,
        });
        log::debug!(
            "seat {} {} (committed {}), pot={} -> {:?}",
            action.seat,
            action.kind,
            committed,
            self.pot.total,
            state
        );

        Ok(state)
    }

    /// То же, что `apply_action`, но игрок определяется по месту.
    pub fn act(&mut self, seat: SeatIndex, kind: PlayerActionKind) -> Result<RoundState, EngineError> {
        let player_id = self
            .table
            .player(seat)
            .map(|p| p.player_id)
            .ok_or(EngineError::InvalidSeat(seat))?;
        self.apply_action(PlayerAction::new(player_id, seat, kind))
    }

    /// Перейти на следующую улицу после закрытого раунда:
    /// burn + 3/1/1 карты борда, обнуление ставок, новый раунд от места 0.
    /// После ривера – переход на шоудаун без сдачи карт.
    pub fn advance_street(&mut self) -> Result<(), EngineError> {
        let street = self.table.street;
        if !street.is_betting() {
            return Err(EngineError::IllegalState {
                op: "advance_street",
                street,
            });
        }
        if !self.betting.as_ref().map_or(true, BettingRound::is_complete) {
            return Err(EngineError::RoundNotComplete);
        }
        if count_in_hand(&self.table.seats) <= 1 {
            // Тут нужна выплата единственному игроку, а не новая улица.
            return Err(EngineError::IllegalState {
                op: "advance_street",
                street,
            });
        }

        let next = street
            .next()
            .ok_or(EngineError::Internal("у улицы торговли нет следующей"))?;

        if next == Street::Showdown {
            self.table.street = Street::Showdown;
            self.betting = None;
            self.history.push(HandEventKind::StreetChanged { street: next });
            log::info!("hand #{}: showdown, pot={}", self.hand_id, self.pot.total);
            return Ok(());
        }

        if let Err(err) = self.deal_board(next) {
            return Err(self.abort_hand(err));
        }

        for p in self.table.seats.iter_mut() {
            p.current_bet = Chips::ZERO;
        }
        self.table.street = next;
        self.history.push(HandEventKind::StreetChanged { street: next });

        let round = BettingRound::new(next, &self.table.seats, Chips::ZERO, 0);
        log::info!(
            "hand #{}: {} [{}], first_actor={:?}",
            self.hand_id,
            next,
            self.board_string(),
            round.first_actor
        );
        self.betting = Some(round);
        Ok(())
    }

    /// Сжечь карту и открыть карты борда для улицы.
    fn deal_board(&mut self, street: Street) -> Result<(), EngineError> {
        self.deck.draw()?;
        self.history.push(HandEventKind::CardBurned);

        for _ in 0..street.cards_dealt() {
            let card = self.deck.draw()?;
            self.table.board.push(card);
        }

        self.history.push(HandEventKind::BoardDealt {
            street,
            cards: self.table.board.clone(),
        });
        Ok(())
    }

    /// Шоудаун: резолвер выбирает победителя среди несфолдивших, банк – ему.
    pub fn resolve_showdown(&mut self) -> Result<HandSummary, EngineError> {
        if self.table.street != Street::Showdown {
            return Err(EngineError::IllegalState {
                op: "resolve_showdown",
                street: self.table.street,
            });
        }

        let winner = {
            let contenders: Vec<Contender<'_>> = self
                .table
                .seats
                .iter()
                .enumerate()
                .filter(|(_, p)| p.is_in_hand())
                .map(|(idx, player)| Contender {
                    seat: idx as SeatIndex,
                    player,
                })
                .collect();

            if contenders.is_empty() {
                return Err(EngineError::Internal("на шоудауне не осталось игроков"));
            }

            let winner = self.resolver.resolve(&contenders, &self.table.board);
            if !contenders.iter().any(|c| c.seat == winner) {
                return Err(EngineError::Internal("резолвер выбрал игрока вне шоудауна"));
            }
            winner
        };

        Ok(self.award_pot(winner, true))
    }

    /// Все, кроме одного, сфолдили: банк единственному оставшемуся, борд не досдаём.
    pub fn resolve_early_win(&mut self) -> Result<HandSummary, EngineError> {
        if !self.table.hand_in_progress() {
            return Err(EngineError::NoActiveHand);
        }
        if count_in_hand(&self.table.seats) != 1 {
            return Err(EngineError::IllegalState {
                op: "resolve_early_win",
                street: self.table.street,
            });
        }

        let winner = next_in_hand_seat(&self.table.seats, 0, true)
            .ok_or(EngineError::Internal("не найден оставшийся игрок"))?;
        Ok(self.award_pot(winner, false))
    }

    /// Один автоматический шаг после закрытого раунда:
    /// выплата единственному игроку, следующая улица или шоудаун.
    pub fn advance_if_needed(&mut self) -> Result<HandStatus, EngineError> {
        match self.table.street {
            Street::Waiting => Err(EngineError::NoActiveHand),
            Street::Showdown => self.resolve_showdown().map(HandStatus::Finished),
            _ => {
                if !self.needs_advance() {
                    return Ok(HandStatus::Ongoing);
                }
                if count_in_hand(&self.table.seats) <= 1 {
                    return self.resolve_early_win().map(HandStatus::Finished);
                }
                self.advance_street()?;
                Ok(HandStatus::Ongoing)
            }
        }
    }

    /// Выплатить весь банк и закрыть раздачу.
    fn award_pot(&mut self, winner: SeatIndex, showdown: bool) -> HandSummary {
        let street_reached = self.table.street;
        let amount = self.pot.take_all();

        let winner_id = {
            let p = &mut self.table.seats[winner as usize];
            p.stack += amount;
            p.player_id
        };

        self.history.push(HandEventKind::PotAwarded {
            seat: winner,
            player_id: winner_id,
            amount,
            showdown,
        });
        self.history.push(HandEventKind::HandFinished {
            hand_id: self.hand_id,
        });
        log::info!(
            "hand #{} finished on {}: seat {} wins {}{}",
            self.hand_id,
            street_reached,
            winner,
            amount,
            if showdown { " at showdown" } else { "" }
        );

        let results = self
            .table
            .seats
            .iter()
            .enumerate()
            .map(|(idx, p)| {
                let seat = idx as SeatIndex;
                let is_winner = seat == winner;
                PlayerHandResult {
                    player_id: p.player_id,
                    seat,
                    contributed: self.contributions.get(&seat).copied().unwrap_or(Chips::ZERO),
                    won: if is_winner { amount } else { Chips::ZERO },
                    is_winner,
                }
            })
            .collect();

        let summary = HandSummary {
            hand_id: self.hand_id,
            street_reached,
            board: self.table.board.clone(),
            total_pot: amount,
            winner_seat: winner,
            winner_id,
            went_to_showdown: showdown,
            results,
        };

        self.table.street = Street::Waiting;
        self.betting = None;
        self.last_summary = Some(summary.clone());
        summary
    }

    /// Снять текущую раздачу снаружи (например, лимит ходов у драйвера):
    /// взносы возвращаются, стол уходит в Waiting.
    pub fn cancel_hand(&mut self, reason: &str) -> Result<(), EngineError> {
        if !self.table.hand_in_progress() {
            return Err(EngineError::NoActiveHand);
        }
        self.refund_hand(reason);
        Ok(())
    }

    /// Прервать раздачу (кончилась колода): вернуть каждому его взносы.
    /// Возвращает исходную ошибку для проброса наверх.
    fn abort_hand(&mut self, err: EngineError) -> EngineError {
        self.refund_hand(&err.to_string());
        err
    }

    fn refund_hand(&mut self, reason: &str) {
        for (seat, amount) in self.contributions.drain() {
            if let Some(p) = self.table.seats.get_mut(seat as usize) {
                p.stack += amount;
            }
        }
        for p in self.table.seats.iter_mut() {
            p.reset_for_hand();
        }
        self.pot.reset();
        self.table.board.clear();
        self.table.street = Street::Waiting;
        self.betting = None;

        self.history.push(HandEventKind::HandAborted {
            reason: reason.to_string(),
        });
        log::warn!("hand #{} aborted: {}", self.hand_id, reason);
    }

    fn board_string(&self) -> String {
        self.table
            .board
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
