use super::*;

impl<'a> RewardRepo for DbReadOnly<'a> {
    fn create_reward(&self, _reward: &Reward) -> Result<()> {
        unreachable!();
    }
    fn delete_reward(&self, _id: &Id) -> Result<()> {
        unreachable!();
    }

    fn get_reward(&self, id: &Id) -> Result<Reward> {
        get_reward(&mut self.conn.borrow_mut(), id)
    }
    fn rewards_by_user(&self, user_id: &Id) -> Result<Vec<Reward>> {
        rewards_by_user(&mut self.conn.borrow_mut(), user_id)
    }
    fn rewards_by_user_and_status(
        &self,
        user_id: &Id,
        status: RewardStatus,
    ) -> Result<Vec<Reward>> {
        rewards_by_user_and_status(&mut self.conn.borrow_mut(), user_id, status)
    }
    fn rewards_by_status(&self, status: RewardStatus) -> Result<Vec<Reward>> {
        rewards_by_status(&mut self.conn.borrow_mut(), status)
    }
    fn rewards_between(&self, since: Timestamp, until: Timestamp) -> Result<Vec<Reward>> {
        rewards_between(&mut self.conn.borrow_mut(), since, until)
    }
    fn total_points_used_by_user(&self, user_id: &Id) -> Result<i64> {
        total_points_used_by_user(&mut self.conn.borrow_mut(), user_id)
    }
}

impl<'a> RewardRepo for DbReadWrite<'a> {
    fn create_reward(&self, reward: &Reward) -> Result<()> {
        create_reward(&mut self.conn.borrow_mut(), reward)
    }
    fn delete_reward(&self, id: &Id) -> Result<()> {
        delete_reward(&mut self.conn.borrow_mut(), id)
    }

    fn get_reward(&self, id: &Id) -> Result<Reward> {
        get_reward(&mut self.conn.borrow_mut(), id)
    }
    fn rewards_by_user(&self, user_id: &Id) -> Result<Vec<Reward>> {
        rewards_by_user(&mut self.conn.borrow_mut(), user_id)
    }
    fn rewards_by_user_and_status(
        &self,
        user_id: &Id,
        status: RewardStatus,
    ) -> Result<Vec<Reward>> {
        rewards_by_user_and_status(&mut self.conn.borrow_mut(), user_id, status)
    }
    fn rewards_by_status(&self, status: RewardStatus) -> Result<Vec<Reward>> {
        rewards_by_status(&mut self.conn.borrow_mut(), status)
    }
    fn rewards_between(&self, since: Timestamp, until: Timestamp) -> Result<Vec<Reward>> {
        rewards_between(&mut self.conn.borrow_mut(), since, until)
    }
    fn total_points_used_by_user(&self, user_id: &Id) -> Result<i64> {
        total_points_used_by_user(&mut self.conn.borrow_mut(), user_id)
    }
}

impl<'a> RewardRepo for DbConnection<'a> {
    fn create_reward(&self, reward: &Reward) -> Result<()> {
        create_reward(&mut self.conn.borrow_mut(), reward)
    }
    fn delete_reward(&self, id: &Id) -> Result<()> {
        delete_reward(&mut self.conn.borrow_mut(), id)
    }

    fn get_reward(&self, id: &Id) -> Result<Reward> {
        get_reward(&mut self.conn.borrow_mut(), id)
    }
    fn rewards_by_user(&self, user_id: &Id) -> Result<Vec<Reward>> {
        rewards_by_user(&mut self.conn.borrow_mut(), user_id)
    }
    fn rewards_by_user_and_status(
        &self,
        user_id: &Id,
        status: RewardStatus,
    ) -> Result<Vec<Reward>> {
        rewards_by_user_and_status(&mut self.conn.borrow_mut(), user_id, status)
    }
    fn rewards_by_status(&self, status: RewardStatus) -> Result<Vec<Reward>> {
        rewards_by_status(&mut self.conn.borrow_mut(), status)
    }
    fn rewards_between(&self, since: Timestamp, until: Timestamp) -> Result<Vec<Reward>> {
        rewards_between(&mut self.conn.borrow_mut(), since, until)
    }
    fn total_points_used_by_user(&self, user_id: &Id) -> Result<i64> {
        total_points_used_by_user(&mut self.conn.borrow_mut(), user_id)
    }
}

fn create_reward(conn: &mut SqliteConnection, r: &Reward) -> Result<()> {
    let new_reward = models::NewReward::from(r);
    diesel::insert_into(schema::rewards::table)
        .values(&new_reward)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn delete_reward(conn: &mut SqliteConnection, id: &Id) -> Result<()> {
    use schema::rewards::dsl;
    let deleted = diesel::delete(dsl::rewards.filter(dsl::id.eq(id.as_str())))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if deleted == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn get_reward(conn: &mut SqliteConnection, id: &Id) -> Result<Reward> {
    use schema::rewards::dsl;
    let entity = dsl::rewards
        .filter(dsl::id.eq(id.as_str()))
        .first::<models::RewardEntity>(conn)
        .map_err(from_diesel_err)?;
    load_reward(entity)
}

fn rewards_by_user(conn: &mut SqliteConnection, user_id: &Id) -> Result<Vec<Reward>> {
    use schema::rewards::dsl;
    dsl::rewards
        .filter(dsl::user_id.eq(user_id.as_str()))
        .order(dsl::created_at.desc())
        .load::<models::RewardEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_reward)
        .collect()
}

fn rewards_by_user_and_status(
    conn: &mut SqliteConnection,
    user_id: &Id,
    status: RewardStatus,
) -> Result<Vec<Reward>> {
    use schema::rewards::dsl;
    dsl::rewards
        .filter(dsl::user_id.eq(user_id.as_str()))
        .filter(dsl::status.eq(RewardStatusPrimitive::from(status)))
        .order(dsl::created_at.desc())
        .load::<models::RewardEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_reward)
        .collect()
}

fn rewards_by_status(conn: &mut SqliteConnection, status: RewardStatus) -> Result<Vec<Reward>> {
    use schema::rewards::dsl;
    dsl::rewards
        .filter(dsl::status.eq(RewardStatusPrimitive::from(status)))
        .order(dsl::created_at.desc())
        .load::<models::RewardEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_reward)
        .collect()
}

fn rewards_between(
    conn: &mut SqliteConnection,
    since: Timestamp,
    until: Timestamp,
) -> Result<Vec<Reward>> {
    use schema::rewards::dsl;
    dsl::rewards
        .filter(dsl::created_at.ge(since.into_seconds()))
        .filter(dsl::created_at.lt(until.into_seconds()))
        .order(dsl::created_at.desc())
        .load::<models::RewardEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_reward)
        .collect()
}

fn total_points_used_by_user(conn: &mut SqliteConnection, user_id: &Id) -> Result<i64> {
    use schema::rewards::dsl;
    Ok(dsl::rewards
        .filter(dsl::user_id.eq(user_id.as_str()))
        .filter(dsl::status.eq(RewardStatusPrimitive::from(RewardStatus::Approved)))
        .select(diesel::dsl::sum(dsl::points_used))
        .first::<Option<i64>>(conn)
        .map_err(from_diesel_err)?
        .unwrap_or(0))
}
