use super::prelude::*;
use crate::{gateways::pin_source::PinCodeSource, repositories::Error as RepoError};

/// Bounded number of fresh candidate codes tried on uniqueness
/// collisions before the exchange is compensated.
pub const MAX_PIN_ATTEMPTS: u32 = 10;

#[derive(Debug, Clone)]
pub struct ExchangeRequest {
    pub user_id: Id,
    pub points: i64,
    pub reward_type: String,
}

/// A freshly issued reward. The contained pin carries the full code;
/// this is the only place it is ever visible unmasked.
#[derive(Debug, Clone)]
pub struct IssuedReward {
    pub reward: Reward,
    pub pin: RewardPin,
}

/// Outcome of an exchange attempt.
///
/// `Compensated` is an `Ok` value: the compensating ledger entry and
/// the reward deletion must commit with the surrounding transaction
/// instead of being rolled back with it. The caller maps it to
/// [`Error::CodeGenerationExhausted`] after the commit.
#[derive(Debug, Clone)]
pub enum ExchangeOutcome {
    Issued(Box<IssuedReward>),
    Compensated { attempts: u32 },
}

/// Converts points into an approved reward plus a unique pin code,
/// all-or-nothing.
///
/// Sequence: validate, debit the ledger, create the reward (immediately
/// approved), insert a pin with a fresh code, retrying on code
/// collisions. If no unique code is found within [`MAX_PIN_ATTEMPTS`],
/// the debited points are credited back and the reward row is deleted,
/// leaving the balance unchanged and no orphan reward behind.
///
/// Must run inside a single exclusive transaction (see the application
/// flow) so a crash between the steps cannot leave points debited
/// without a reward, or a reward without a usable code.
pub fn exchange_reward<R>(
    repo: &R,
    pin_source: &dyn PinCodeSource,
    request: ExchangeRequest,
) -> Result<ExchangeOutcome>
where
    R: UserRepo + PointHistoryRepo + RewardRepo + RewardPinRepo,
{
    let ExchangeRequest {
        user_id,
        points,
        reward_type,
    } = request;

    if points <= 0 {
        return Err(Error::InvalidPoints);
    }
    if reward_type.trim().is_empty() {
        return Err(Error::RewardType);
    }

    super::debit_points(
        repo,
        &user_id,
        points,
        format!("Reward exchange: {reward_type}"),
    )?;

    let now = Timestamp::now();
    let reward = Reward::approved(user_id.clone(), points, reward_type.clone(), now);
    repo.create_reward(&reward)?;

    for attempt in 1..=MAX_PIN_ATTEMPTS {
        let code = pin_source.next_code();
        let pin = RewardPin::issue(reward.id.clone(), code, now);
        match repo.create_pin(&pin) {
            Ok(()) => {
                log::info!(
                    "Issued reward {} ({reward_type}) for user {user_id}: pin {}",
                    reward.id,
                    pin.code.masked()
                );
                return Ok(ExchangeOutcome::Issued(Box::new(IssuedReward {
                    reward,
                    pin,
                })));
            }
            Err(RepoError::AlreadyExists) => {
                log::warn!("Pin code collision for reward {} (attempt {attempt})", reward.id);
            }
            Err(err) => return Err(err.into()),
        }
    }

    compensate_exchange(repo, &reward)?;
    Ok(ExchangeOutcome::Compensated {
        attempts: MAX_PIN_ATTEMPTS,
    })
}

// Restores the invariant violated by a failed pin issuance: the user
// gets the debited points back and the orphan reward row disappears.
// The ledger keeps both the debit and the compensating credit.
fn compensate_exchange<R>(repo: &R, reward: &Reward) -> Result<()>
where
    R: UserRepo + PointHistoryRepo + RewardRepo,
{
    log::error!(
        "Pin issuance for reward {} exhausted all attempts, compensating exchange",
        reward.id
    );

    let entry = PointHistory::earned(
        reward.user_id.clone(),
        reward.points_used,
        format!("Reward exchange reverted: {}", reward.reward_type),
        None,
        Timestamp::now(),
    );
    repo.append_point_entry(&entry)?;

    let mut user = repo.get_user(&reward.user_id)?;
    user.points += reward.points_used;
    repo.update_user(&user)?;

    repo.delete_reward(&reward.id)?;
    Ok(())
}
