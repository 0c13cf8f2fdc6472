use super::*;

impl<'a> MarkerRepo for DbReadOnly<'a> {
    fn create_marker(&self, _marker: &Marker) -> Result<()> {
        unreachable!();
    }
    fn update_marker(&self, _marker: &Marker) -> Result<()> {
        unreachable!();
    }

    fn get_marker(&self, id: &Id) -> Result<Marker> {
        get_marker(&mut self.conn.borrow_mut(), id)
    }

    fn all_active_markers(&self) -> Result<Vec<Marker>> {
        all_active_markers(&mut self.conn.borrow_mut())
    }
    fn markers_by_reporter(&self, user_id: &Id) -> Result<Vec<Marker>> {
        markers_by_reporter(&mut self.conn.borrow_mut(), user_id)
    }
    fn count_markers(&self) -> Result<usize> {
        count_markers(&mut self.conn.borrow_mut())
    }
}

impl<'a> MarkerRepo for DbReadWrite<'a> {
    fn create_marker(&self, marker: &Marker) -> Result<()> {
        create_marker(&mut self.conn.borrow_mut(), marker)
    }
    fn update_marker(&self, marker: &Marker) -> Result<()> {
        update_marker(&mut self.conn.borrow_mut(), marker)
    }

    fn get_marker(&self, id: &Id) -> Result<Marker> {
        get_marker(&mut self.conn.borrow_mut(), id)
    }

    fn all_active_markers(&self) -> Result<Vec<Marker>> {
        all_active_markers(&mut self.conn.borrow_mut())
    }
    fn markers_by_reporter(&self, user_id: &Id) -> Result<Vec<Marker>> {
        markers_by_reporter(&mut self.conn.borrow_mut(), user_id)
    }
    fn count_markers(&self) -> Result<usize> {
        count_markers(&mut self.conn.borrow_mut())
    }
}

impl<'a> MarkerRepo for DbConnection<'a> {
    fn create_marker(&self, marker: &Marker) -> Result<()> {
        create_marker(&mut self.conn.borrow_mut(), marker)
    }
    fn update_marker(&self, marker: &Marker) -> Result<()> {
        update_marker(&mut self.conn.borrow_mut(), marker)
    }

    fn get_marker(&self, id: &Id) -> Result<Marker> {
        get_marker(&mut self.conn.borrow_mut(), id)
    }

    fn all_active_markers(&self) -> Result<Vec<Marker>> {
        all_active_markers(&mut self.conn.borrow_mut())
    }
    fn markers_by_reporter(&self, user_id: &Id) -> Result<Vec<Marker>> {
        markers_by_reporter(&mut self.conn.borrow_mut(), user_id)
    }
    fn count_markers(&self) -> Result<usize> {
        count_markers(&mut self.conn.borrow_mut())
    }
}

fn create_marker(conn: &mut SqliteConnection, m: &Marker) -> Result<()> {
    let new_marker = models::NewMarker::from(m);
    diesel::insert_into(schema::markers::table)
        .values(&new_marker)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn update_marker(conn: &mut SqliteConnection, m: &Marker) -> Result<()> {
    use schema::markers::dsl;
    let new_marker = models::NewMarker::from(m);
    diesel::update(dsl::markers.filter(dsl::id.eq(new_marker.id)))
        .set(&new_marker)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn get_marker(conn: &mut SqliteConnection, id: &Id) -> Result<Marker> {
    use schema::markers::dsl;
    let entity = dsl::markers
        .filter(dsl::id.eq(id.as_str()))
        .first::<models::MarkerEntity>(conn)
        .map_err(from_diesel_err)?;
    load_marker(entity)
}

fn all_active_markers(conn: &mut SqliteConnection) -> Result<Vec<Marker>> {
    use schema::markers::dsl;
    dsl::markers
        .filter(dsl::status.eq(MarkerStatusPrimitive::from(MarkerStatus::Active)))
        .order(dsl::created_at.desc())
        .load::<models::MarkerEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_marker)
        .collect()
}

fn markers_by_reporter(conn: &mut SqliteConnection, user_id: &Id) -> Result<Vec<Marker>> {
    use schema::markers::dsl;
    dsl::markers
        .filter(dsl::reported_by.eq(user_id.as_str()))
        .order(dsl::created_at.desc())
        .load::<models::MarkerEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_marker)
        .collect()
}

fn count_markers(conn: &mut SqliteConnection) -> Result<usize> {
    use schema::markers::dsl;
    Ok(dsl::markers
        .select(diesel::dsl::count(dsl::id))
        .first::<i64>(conn)
        .map_err(from_diesel_err)? as usize)
}
