use super::*;

impl<'a> PhotoRepo for DbReadOnly<'a> {
    fn create_photo(&self, _photo: &Photo) -> Result<()> {
        unreachable!();
    }
    fn update_photo(&self, _photo: &Photo) -> Result<()> {
        unreachable!();
    }
    fn delete_photos_of_marker(&self, _marker_id: &Id) -> Result<usize> {
        unreachable!();
    }

    fn get_photo(&self, id: &Id) -> Result<Photo> {
        get_photo(&mut self.conn.borrow_mut(), id)
    }
    fn photos_of_marker(&self, marker_id: &Id) -> Result<Vec<Photo>> {
        photos_of_marker(&mut self.conn.borrow_mut(), marker_id)
    }
    fn photos_of_marker_by_kind(&self, marker_id: &Id, kind: PhotoKind) -> Result<Vec<Photo>> {
        photos_of_marker_by_kind(&mut self.conn.borrow_mut(), marker_id, kind)
    }
}

impl<'a> PhotoRepo for DbReadWrite<'a> {
    fn create_photo(&self, photo: &Photo) -> Result<()> {
        create_photo(&mut self.conn.borrow_mut(), photo)
    }
    fn update_photo(&self, photo: &Photo) -> Result<()> {
        update_photo(&mut self.conn.borrow_mut(), photo)
    }
    fn delete_photos_of_marker(&self, marker_id: &Id) -> Result<usize> {
        delete_photos_of_marker(&mut self.conn.borrow_mut(), marker_id)
    }

    fn get_photo(&self, id: &Id) -> Result<Photo> {
        get_photo(&mut self.conn.borrow_mut(), id)
    }
    fn photos_of_marker(&self, marker_id: &Id) -> Result<Vec<Photo>> {
        photos_of_marker(&mut self.conn.borrow_mut(), marker_id)
    }
    fn photos_of_marker_by_kind(&self, marker_id: &Id, kind: PhotoKind) -> Result<Vec<Photo>> {
        photos_of_marker_by_kind(&mut self.conn.borrow_mut(), marker_id, kind)
    }
}

impl<'a> PhotoRepo for DbConnection<'a> {
    fn create_photo(&self, photo: &Photo) -> Result<()> {
        create_photo(&mut self.conn.borrow_mut(), photo)
    }
    fn update_photo(&self, photo: &Photo) -> Result<()> {
        update_photo(&mut self.conn.borrow_mut(), photo)
    }
    fn delete_photos_of_marker(&self, marker_id: &Id) -> Result<usize> {
        delete_photos_of_marker(&mut self.conn.borrow_mut(), marker_id)
    }

    fn get_photo(&self, id: &Id) -> Result<Photo> {
        get_photo(&mut self.conn.borrow_mut(), id)
    }
    fn photos_of_marker(&self, marker_id: &Id) -> Result<Vec<Photo>> {
        photos_of_marker(&mut self.conn.borrow_mut(), marker_id)
    }
    fn photos_of_marker_by_kind(&self, marker_id: &Id, kind: PhotoKind) -> Result<Vec<Photo>> {
        photos_of_marker_by_kind(&mut self.conn.borrow_mut(), marker_id, kind)
    }
}

fn create_photo(conn: &mut SqliteConnection, p: &Photo) -> Result<()> {
    let new_photo = models::NewPhoto::from(p);
    diesel::insert_into(schema::photos::table)
        .values(&new_photo)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn update_photo(conn: &mut SqliteConnection, p: &Photo) -> Result<()> {
    use schema::photos::dsl;
    let new_photo = models::NewPhoto::from(p);
    diesel::update(dsl::photos.filter(dsl::id.eq(new_photo.id)))
        .set(&new_photo)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn get_photo(conn: &mut SqliteConnection, id: &Id) -> Result<Photo> {
    use schema::photos::dsl;
    let entity = dsl::photos
        .filter(dsl::id.eq(id.as_str()))
        .first::<models::PhotoEntity>(conn)
        .map_err(from_diesel_err)?;
    load_photo(entity)
}

// Insertion order makes the first photo of a kind the representative
// one that the verification pipeline judges.
fn photos_of_marker(conn: &mut SqliteConnection, marker_id: &Id) -> Result<Vec<Photo>> {
    use schema::photos::dsl;
    dsl::photos
        .filter(dsl::marker_id.eq(marker_id.as_str()))
        .order(dsl::rowid.asc())
        .load::<models::PhotoEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_photo)
        .collect()
}

fn photos_of_marker_by_kind(
    conn: &mut SqliteConnection,
    marker_id: &Id,
    kind: PhotoKind,
) -> Result<Vec<Photo>> {
    use schema::photos::dsl;
    dsl::photos
        .filter(dsl::marker_id.eq(marker_id.as_str()))
        .filter(dsl::kind.eq(PhotoKindPrimitive::from(kind)))
        .order(dsl::rowid.asc())
        .load::<models::PhotoEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_photo)
        .collect()
}

fn delete_photos_of_marker(conn: &mut SqliteConnection, marker_id: &Id) -> Result<usize> {
    use schema::photos::dsl;
    diesel::delete(dsl::photos.filter(dsl::marker_id.eq(marker_id.as_str())))
        .execute(conn)
        .map_err(from_diesel_err)
}
