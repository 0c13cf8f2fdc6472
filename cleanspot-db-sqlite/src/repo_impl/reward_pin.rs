use super::*;

impl<'a> RewardPinRepo for DbReadOnly<'a> {
    fn create_pin(&self, _pin: &RewardPin) -> Result<()> {
        unreachable!();
    }
    fn update_pin(&self, _pin: &RewardPin) -> Result<()> {
        unreachable!();
    }

    fn try_get_pin_by_code(&self, code: &PinCode) -> Result<Option<RewardPin>> {
        try_get_pin_by_code(&mut self.conn.borrow_mut(), code)
    }
    fn try_get_pin_by_reward(&self, reward_id: &Id) -> Result<Option<RewardPin>> {
        try_get_pin_by_reward(&mut self.conn.borrow_mut(), reward_id)
    }
    fn pins_by_user(&self, user_id: &Id) -> Result<Vec<RewardPin>> {
        pins_by_user(&mut self.conn.borrow_mut(), user_id)
    }
    fn count_pins_by_user(&self, user_id: &Id) -> Result<u64> {
        count_pins_by_user(&mut self.conn.borrow_mut(), user_id)
    }
}

impl<'a> RewardPinRepo for DbReadWrite<'a> {
    fn create_pin(&self, pin: &RewardPin) -> Result<()> {
        create_pin(&mut self.conn.borrow_mut(), pin)
    }
    fn update_pin(&self, pin: &RewardPin) -> Result<()> {
        update_pin(&mut self.conn.borrow_mut(), pin)
    }

    fn try_get_pin_by_code(&self, code: &PinCode) -> Result<Option<RewardPin>> {
        try_get_pin_by_code(&mut self.conn.borrow_mut(), code)
    }
    fn try_get_pin_by_reward(&self, reward_id: &Id) -> Result<Option<RewardPin>> {
        try_get_pin_by_reward(&mut self.conn.borrow_mut(), reward_id)
    }
    fn pins_by_user(&self, user_id: &Id) -> Result<Vec<RewardPin>> {
        pins_by_user(&mut self.conn.borrow_mut(), user_id)
    }
    fn count_pins_by_user(&self, user_id: &Id) -> Result<u64> {
        count_pins_by_user(&mut self.conn.borrow_mut(), user_id)
    }
}

impl<'a> RewardPinRepo for DbConnection<'a> {
    fn create_pin(&self, pin: &RewardPin) -> Result<()> {
        create_pin(&mut self.conn.borrow_mut(), pin)
    }
    fn update_pin(&self, pin: &RewardPin) -> Result<()> {
        update_pin(&mut self.conn.borrow_mut(), pin)
    }

    fn try_get_pin_by_code(&self, code: &PinCode) -> Result<Option<RewardPin>> {
        try_get_pin_by_code(&mut self.conn.borrow_mut(), code)
    }
    fn try_get_pin_by_reward(&self, reward_id: &Id) -> Result<Option<RewardPin>> {
        try_get_pin_by_reward(&mut self.conn.borrow_mut(), reward_id)
    }
    fn pins_by_user(&self, user_id: &Id) -> Result<Vec<RewardPin>> {
        pins_by_user(&mut self.conn.borrow_mut(), user_id)
    }
    fn count_pins_by_user(&self, user_id: &Id) -> Result<u64> {
        count_pins_by_user(&mut self.conn.borrow_mut(), user_id)
    }
}

// The unique constraints on both the code and the reward reference make
// the insert fail with `AlreadyExists` on collisions, which drives the
// bounded retry loop of the issuing use case.
fn create_pin(conn: &mut SqliteConnection, p: &RewardPin) -> Result<()> {
    let new_pin = models::NewRewardPin::from(p);
    diesel::insert_into(schema::reward_pins::table)
        .values(&new_pin)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn update_pin(conn: &mut SqliteConnection, p: &RewardPin) -> Result<()> {
    use schema::reward_pins::dsl;
    let new_pin = models::NewRewardPin::from(p);
    diesel::update(dsl::reward_pins.filter(dsl::id.eq(new_pin.id)))
        .set(&new_pin)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn try_get_pin_by_code(conn: &mut SqliteConnection, code: &PinCode) -> Result<Option<RewardPin>> {
    use schema::reward_pins::dsl;
    dsl::reward_pins
        .filter(dsl::code.eq(code.as_str()))
        .first::<models::RewardPinEntity>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(load_pin)
        .transpose()
}

fn try_get_pin_by_reward(
    conn: &mut SqliteConnection,
    reward_id: &Id,
) -> Result<Option<RewardPin>> {
    use schema::reward_pins::dsl;
    dsl::reward_pins
        .filter(dsl::reward_id.eq(reward_id.as_str()))
        .first::<models::RewardPinEntity>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(load_pin)
        .transpose()
}

fn pins_by_user(conn: &mut SqliteConnection, user_id: &Id) -> Result<Vec<RewardPin>> {
    use schema::{reward_pins, rewards};
    reward_pins::table
        .inner_join(rewards::table)
        .filter(rewards::user_id.eq(user_id.as_str()))
        .order(reward_pins::issued_at.desc())
        .select(reward_pins::all_columns)
        .load::<models::RewardPinEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_pin)
        .collect()
}

fn count_pins_by_user(conn: &mut SqliteConnection, user_id: &Id) -> Result<u64> {
    use schema::{reward_pins, rewards};
    Ok(reward_pins::table
        .inner_join(rewards::table)
        .filter(rewards::user_id.eq(user_id.as_str()))
        .select(diesel::dsl::count(reward_pins::id))
        .first::<i64>(conn)
        .map_err(from_diesel_err)? as u64)
}
