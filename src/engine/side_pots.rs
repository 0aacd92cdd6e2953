use serde::{Deserialize, Serialize};

use crate::domain::{chips::Chips, SeatIndex};
use crate::engine::errors::EngineError;
use crate::engine::positions::clockwise_from;
use crate::eval::HandRank;

/// Сайд-пот: часть банка, на которую претендуют только некоторые игроки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SidePot {
    pub amount: Chips,
    pub eligible_seats: Vec<SeatIndex>,
}

/// Разложить банк на слои по возрастанию суммарных вкладов.
///
/// `contributions[seat]` – сколько игрок внёс за весь раунд (включая сфолдивших),
/// `live[seat]` – претендует ли место на банк.
/// Слой, на который не претендует никто из живых (его целиком оплатили
/// сфолдившие), добавляется к ближайшему нижнему слою с претендентами.
/// Сумма всех слоёв всегда равна сумме вкладов.
pub fn compute_side_pots(contributions: &[Chips], live: &[bool]) -> Vec<SidePot> {
    let mut levels: Vec<Chips> = contributions.iter().copied().filter(|c| !c.is_zero()).collect();
    levels.sort();
    levels.dedup();

    let mut layers: Vec<SidePot> = Vec::with_capacity(levels.len());
    let mut prev_level = Chips::ZERO;

    for level in levels {
        let amount: Chips = contributions
            .iter()
            .map(|c| (*c).min(level) - (*c).min(prev_level))
            .sum();

        let eligible_seats = contributions
            .iter()
            .enumerate()
            .filter(|(seat, c)| live.get(*seat).copied().unwrap_or(false) && **c >= level)
            .map(|(seat, _)| seat)
            .collect();

        layers.push(SidePot {
            amount,
            eligible_seats,
        });
        prev_level = level;
    }

    // Сверху вниз: бесхозные слои стекают в ближайший нижний слой с претендентами.
    let mut carry = Chips::ZERO;
    for pot in layers.iter_mut().rev() {
        if pot.eligible_seats.is_empty() {
            carry += pot.amount;
            pot.amount = Chips::ZERO;
        } else {
            pot.amount += carry;
            carry = Chips::ZERO;
        }
    }

    let mut pots: Vec<SidePot> = layers
        .into_iter()
        .filter(|p| !p.eligible_seats.is_empty())
        .collect();

    // Ни у одного живого места нет вклада: банк делят все живые.
    if !carry.is_zero() {
        let eligible_seats: Vec<SeatIndex> = live
            .iter()
            .enumerate()
            .filter(|(_, l)| **l)
            .map(|(seat, _)| seat)
            .collect();
        pots.push(SidePot {
            amount: carry,
            eligible_seats,
        });
    }

    pots
}

/// Разыграть сайд-поты по силе рук.
///
/// Внутри пота выигрывают все претенденты с максимальной рукой, пот делится
/// поровну; лишние фишки от деления получают по одной первые победители
/// по часовой стрелке от дилера.
/// Возвращает выигрыш каждого места.
pub fn award_pots(
    pots: &[SidePot],
    ranks: &[Option<HandRank>],
    dealer: SeatIndex,
) -> Result<Vec<Chips>, EngineError> {
    let max_seats = ranks.len();
    let mut earn = vec![Chips::ZERO; max_seats];

    for pot in pots {
        if pot.amount.is_zero() {
            continue;
        }
        if pot.eligible_seats.is_empty() {
            return Err(EngineError::Internal("side pot without eligible seats"));
        }

        let mut best: Option<HandRank> = None;
        for &seat in &pot.eligible_seats {
            let rank = ranks
                .get(seat)
                .copied()
                .flatten()
                .ok_or(EngineError::Internal("live seat has no evaluated hand"))?;
            if best.map_or(true, |b| rank > b) {
                best = Some(rank);
            }
        }

        let winners: Vec<SeatIndex> = clockwise_from(max_seats, dealer)
            .filter(|seat| pot.eligible_seats.contains(seat) && ranks[*seat] == best)
            .collect();

        let (share, remainder) = pot.amount.split(winners.len());
        for (i, &seat) in winners.iter().enumerate() {
            let mut prize = share;
            if (i as u64) < remainder.0 {
                prize += Chips(1);
            }
            earn[seat] += prize;
        }
    }

    Ok(earn)
}
