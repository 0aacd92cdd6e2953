use crate::domain::chips::Chips;
use crate::domain::table::MIN_RAISE;
use crate::engine::actions::PlayerActionKind;
use crate::engine::errors::EngineError;

/// Сколько фишек нужно добавить, чтобы уравнять максимальную ставку улицы.
pub fn diff_to_call(stage_bet: Chips, max_bet: Chips) -> Chips {
    max_bet.saturating_sub(stage_bet)
}

/// Проверка, может ли игрок выполнить действие при текущих ставках.
///
/// Возвращает сумму, которую нужно внести в банк (до ограничения стеком).
pub fn validate_action(
    action: &PlayerActionKind,
    stack: Chips,
    stage_bet: Chips,
    max_bet: Chips,
) -> Result<Chips, EngineError> {
    let to_call = diff_to_call(stage_bet, max_bet);

    match action {
        PlayerActionKind::Fold => Ok(Chips::ZERO),

        PlayerActionKind::Check => {
            if to_call.is_zero() {
                Ok(Chips::ZERO)
            } else {
                Err(EngineError::MustAct)
            }
        }

        // Колл больше стека превращается в all-in на остаток.
        PlayerActionKind::Call => {
            if to_call.is_zero() {
                Err(EngineError::NothingToCall)
            } else {
                Ok(to_call)
            }
        }

        PlayerActionKind::Raise(amount) => {
            if *amount < MIN_RAISE {
                return Err(EngineError::RaiseTooSmall {
                    amount: *amount,
                    minimum: MIN_RAISE,
                });
            }
            let delta = *amount + to_call;
            if stack <= delta {
                return Err(EngineError::InsufficientChips);
            }
            Ok(delta)
        }

        PlayerActionKind::AllIn => Ok(stack),
    }
}
