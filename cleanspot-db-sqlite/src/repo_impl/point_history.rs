use super::*;

impl<'a> PointHistoryRepo for DbReadOnly<'a> {
    fn append_point_entry(&self, _entry: &PointHistory) -> Result<()> {
        unreachable!();
    }

    fn point_entries_by_user(&self, user_id: &Id) -> Result<Vec<PointHistory>> {
        point_entries_by_user(&mut self.conn.borrow_mut(), user_id)
    }
    fn point_entries_by_user_and_kind(
        &self,
        user_id: &Id,
        kind: PointKind,
    ) -> Result<Vec<PointHistory>> {
        point_entries_by_user_and_kind(&mut self.conn.borrow_mut(), user_id, kind)
    }
    fn point_entries_by_user_between(
        &self,
        user_id: &Id,
        since: Timestamp,
        until: Timestamp,
    ) -> Result<Vec<PointHistory>> {
        point_entries_by_user_between(&mut self.conn.borrow_mut(), user_id, since, until)
    }
    fn recent_point_entries(&self, user_id: &Id, limit: u64) -> Result<Vec<PointHistory>> {
        recent_point_entries(&mut self.conn.borrow_mut(), user_id, limit)
    }
    fn sum_point_deltas(&self, user_id: &Id) -> Result<i64> {
        sum_point_deltas(&mut self.conn.borrow_mut(), user_id)
    }
}

impl<'a> PointHistoryRepo for DbReadWrite<'a> {
    fn append_point_entry(&self, entry: &PointHistory) -> Result<()> {
        append_point_entry(&mut self.conn.borrow_mut(), entry)
    }

    fn point_entries_by_user(&self, user_id: &Id) -> Result<Vec<PointHistory>> {
        point_entries_by_user(&mut self.conn.borrow_mut(), user_id)
    }
    fn point_entries_by_user_and_kind(
        &self,
        user_id: &Id,
        kind: PointKind,
    ) -> Result<Vec<PointHistory>> {
        point_entries_by_user_and_kind(&mut self.conn.borrow_mut(), user_id, kind)
    }
    fn point_entries_by_user_between(
        &self,
        user_id: &Id,
        since: Timestamp,
        until: Timestamp,
    ) -> Result<Vec<PointHistory>> {
        point_entries_by_user_between(&mut self.conn.borrow_mut(), user_id, since, until)
    }
    fn recent_point_entries(&self, user_id: &Id, limit: u64) -> Result<Vec<PointHistory>> {
        recent_point_entries(&mut self.conn.borrow_mut(), user_id, limit)
    }
    fn sum_point_deltas(&self, user_id: &Id) -> Result<i64> {
        sum_point_deltas(&mut self.conn.borrow_mut(), user_id)
    }
}

impl<'a> PointHistoryRepo for DbConnection<'a> {
    fn append_point_entry(&self, entry: &PointHistory) -> Result<()> {
        append_point_entry(&mut self.conn.borrow_mut(), entry)
    }

    fn point_entries_by_user(&self, user_id: &Id) -> Result<Vec<PointHistory>> {
        point_entries_by_user(&mut self.conn.borrow_mut(), user_id)
    }
    fn point_entries_by_user_and_kind(
        &self,
        user_id: &Id,
        kind: PointKind,
    ) -> Result<Vec<PointHistory>> {
        point_entries_by_user_and_kind(&mut self.conn.borrow_mut(), user_id, kind)
    }
    fn point_entries_by_user_between(
        &self,
        user_id: &Id,
        since: Timestamp,
        until: Timestamp,
    ) -> Result<Vec<PointHistory>> {
        point_entries_by_user_between(&mut self.conn.borrow_mut(), user_id, since, until)
    }
    fn recent_point_entries(&self, user_id: &Id, limit: u64) -> Result<Vec<PointHistory>> {
        recent_point_entries(&mut self.conn.borrow_mut(), user_id, limit)
    }
    fn sum_point_deltas(&self, user_id: &Id) -> Result<i64> {
        sum_point_deltas(&mut self.conn.borrow_mut(), user_id)
    }
}

// Append-only: there is deliberately no update or delete for ledger
// entries.
fn append_point_entry(conn: &mut SqliteConnection, entry: &PointHistory) -> Result<()> {
    let new_entry = models::NewPointHistory::from(entry);
    diesel::insert_into(schema::point_history::table)
        .values(&new_entry)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn point_entries_by_user(conn: &mut SqliteConnection, user_id: &Id) -> Result<Vec<PointHistory>> {
    use schema::point_history::dsl;
    dsl::point_history
        .filter(dsl::user_id.eq(user_id.as_str()))
        .order(dsl::rowid.desc())
        .load::<models::PointHistoryEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_point_entry)
        .collect()
}

fn point_entries_by_user_and_kind(
    conn: &mut SqliteConnection,
    user_id: &Id,
    kind: PointKind,
) -> Result<Vec<PointHistory>> {
    use schema::point_history::dsl;
    dsl::point_history
        .filter(dsl::user_id.eq(user_id.as_str()))
        .filter(dsl::kind.eq(PointKindPrimitive::from(kind)))
        .order(dsl::rowid.desc())
        .load::<models::PointHistoryEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_point_entry)
        .collect()
}

fn point_entries_by_user_between(
    conn: &mut SqliteConnection,
    user_id: &Id,
    since: Timestamp,
    until: Timestamp,
) -> Result<Vec<PointHistory>> {
    use schema::point_history::dsl;
    dsl::point_history
        .filter(dsl::user_id.eq(user_id.as_str()))
        .filter(dsl::created_at.ge(since.into_seconds()))
        .filter(dsl::created_at.lt(until.into_seconds()))
        .order(dsl::rowid.desc())
        .load::<models::PointHistoryEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_point_entry)
        .collect()
}

fn recent_point_entries(
    conn: &mut SqliteConnection,
    user_id: &Id,
    limit: u64,
) -> Result<Vec<PointHistory>> {
    use schema::point_history::dsl;
    dsl::point_history
        .filter(dsl::user_id.eq(user_id.as_str()))
        .order(dsl::rowid.desc())
        .limit(limit as i64)
        .load::<models::PointHistoryEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_point_entry)
        .collect()
}

fn sum_point_deltas(conn: &mut SqliteConnection, user_id: &Id) -> Result<i64> {
    use schema::point_history::dsl;
    Ok(dsl::point_history
        .filter(dsl::user_id.eq(user_id.as_str()))
        .select(diesel::dsl::sum(dsl::delta))
        .first::<Option<i64>>(conn)
        .map_err(from_diesel_err)?
        .unwrap_or(0))
}
