use super::*;
use cleanspot_core::{
    gateways::pin_source::PinCodeSource,
    usecases::{ExchangeOutcome, ExchangeRequest, IssuedReward},
};

/// Exchanges points for an approved reward plus a unique pin code.
///
/// The debit, the reward row and the pin insert run as one exclusive
/// transaction. When no unique code can be found within the retry
/// budget, the compensation (points credited back, reward deleted) is
/// COMMITTED before the error is surfaced, so the ledger keeps the
/// audit trail of the failed exchange.
///
/// The returned pin carries the full code; it is visible exactly once
/// here. All later reads only expose the masked form.
pub fn exchange_reward(
    connections: &sqlite::Connections,
    pin_source: &dyn PinCodeSource,
    request: ExchangeRequest,
) -> Result<IssuedReward> {
    let outcome = connections
        .exclusive()?
        .transaction(|conn| usecases::exchange_reward(conn, pin_source, request))?;
    match outcome {
        ExchangeOutcome::Issued(issued) => Ok(*issued),
        ExchangeOutcome::Compensated { attempts } => {
            Err(usecases::Error::CodeGenerationExhausted { attempts }.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::prelude::*;

    fn exchange(
        fixture: &BackendFixture,
        pins: &dyn PinCodeSource,
        user: &User,
        points: i64,
        reward_type: &str,
    ) -> crate::Result<IssuedReward> {
        flows::exchange_reward(
            &fixture.db_connections,
            pins,
            ExchangeRequest {
                user_id: user.id.clone(),
                points,
                reward_type: reward_type.into(),
            },
        )
    }

    #[test]
    fn exchange_debits_ledger_and_issues_pin() {
        let fixture = BackendFixture::new();
        let user = fixture.create_user("collector", 4000);

        let pins = SeqPinSource::single(PinCode::from_groups([4711, 815, 2342, 9999]));
        let issued = exchange(&fixture, &pins, &user, 3000, "THREE_THOUSAND").unwrap();

        assert!(issued.reward.is_approved());
        assert!(issued.reward.processed_at.is_some());
        assert_eq!(issued.reward.points_used, 3000);
        // The full code is visible exactly once, at issuance.
        assert_eq!(issued.pin.code.as_str(), "4711-0815-2342-9999");

        assert_eq!(fixture.get_user(&user.id).points, 1000);
        assert_eq!(
            flows::replayed_balance(&fixture.db_connections, &user.id).unwrap(),
            1000
        );
        let ledger = fixture.ledger_of(&user.id);
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger[0].delta, -3000);
        assert_eq!(ledger[0].kind, PointKind::Used);

        // Later reads only expose the masked code.
        let views = flows::pins_of_user(&fixture.db_connections, &user.id).unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].masked_code, "****-****-****-9999");
        assert!(views[0].available);
    }

    #[test]
    fn insufficient_balance_leaves_everything_untouched() {
        let fixture = BackendFixture::new();
        let user = fixture.create_user("collector", 4000);

        let pins = SeqPinSource::single(PinCode::from_groups([1, 2, 3, 4]));
        let err = exchange(&fixture, &pins, &user, 5000, "FIVE_THOUSAND").unwrap_err();
        assert!(matches!(
            err,
            AppError::Business(BError::Parameter(usecases::Error::InsufficientBalance {
                available: 4000,
                requested: 5000,
            }))
        ));

        assert_eq!(fixture.get_user(&user.id).points, 4000);
        assert!(flows::rewards_of_user(&fixture.db_connections, &user.id)
            .unwrap()
            .is_empty());
        assert!(flows::pins_of_user(&fixture.db_connections, &user.id)
            .unwrap()
            .is_empty());
        // Only the seed entry; the failed debit never reached the
        // ledger.
        assert_eq!(fixture.ledger_of(&user.id).len(), 1);
    }

    #[test]
    fn exhausted_code_generation_compensates_the_exchange() {
        let fixture = BackendFixture::new();
        let other = fixture.create_user("earlier", 100);
        let user = fixture.create_user("collector", 4000);

        // The only code the source will ever produce is already taken.
        let taken = PinCode::from_groups([9, 9, 9, 9]);
        let pins = SeqPinSource::single(taken.clone());
        exchange(&fixture, &pins, &other, 100, "HUNDRED").unwrap();

        let err = exchange(&fixture, &pins, &user, 3000, "THREE_THOUSAND").unwrap_err();
        assert!(matches!(
            err,
            AppError::Business(BError::Parameter(
                usecases::Error::CodeGenerationExhausted { attempts: 10 }
            ))
        ));

        // All-or-nothing: balance unchanged, no reward row, no pin.
        assert_eq!(fixture.get_user(&user.id).points, 4000);
        assert_eq!(
            flows::replayed_balance(&fixture.db_connections, &user.id).unwrap(),
            4000
        );
        assert!(flows::rewards_of_user(&fixture.db_connections, &user.id)
            .unwrap()
            .is_empty());
        assert!(flows::pins_of_user(&fixture.db_connections, &user.id)
            .unwrap()
            .is_empty());
        // The committed compensation keeps the audit trail: seed,
        // debit, credit-back.
        let ledger = fixture.ledger_of(&user.id);
        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger[0].delta, 3000);
        assert_eq!(ledger[1].delta, -3000);
    }

    #[test]
    fn colliding_codes_are_retried_until_a_fresh_one_fits() {
        let fixture = BackendFixture::new();
        let other = fixture.create_user("earlier", 100);
        let user = fixture.create_user("collector", 1000);

        let taken = PinCode::from_groups([9, 9, 9, 9]);
        let fresh = PinCode::from_groups([1, 2, 3, 4]);
        exchange(
            &fixture,
            &SeqPinSource::single(taken.clone()),
            &other,
            100,
            "HUNDRED",
        )
        .unwrap();

        // First candidate collides, the second one succeeds.
        let pins = SeqPinSource::new(vec![taken, fresh.clone()]);
        let issued = exchange(&fixture, &pins, &user, 500, "FIVE_HUNDRED").unwrap();
        assert_eq!(issued.pin.code, fresh);
        assert_eq!(fixture.get_user(&user.id).points, 500);
    }
}
