use super::*;

impl<'a> UserRepo for DbReadOnly<'a> {
    fn create_user(&self, _user: &User) -> Result<()> {
        unreachable!();
    }
    fn update_user(&self, _user: &User) -> Result<()> {
        unreachable!();
    }

    fn get_user(&self, id: &Id) -> Result<User> {
        get_user(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_user(&self, id: &Id) -> Result<Option<User>> {
        try_get_user(&mut self.conn.borrow_mut(), id)
    }

    fn count_users(&self) -> Result<usize> {
        count_users(&mut self.conn.borrow_mut())
    }
}

impl<'a> UserRepo for DbReadWrite<'a> {
    fn create_user(&self, user: &User) -> Result<()> {
        create_user(&mut self.conn.borrow_mut(), user)
    }
    fn update_user(&self, user: &User) -> Result<()> {
        update_user(&mut self.conn.borrow_mut(), user)
    }

    fn get_user(&self, id: &Id) -> Result<User> {
        get_user(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_user(&self, id: &Id) -> Result<Option<User>> {
        try_get_user(&mut self.conn.borrow_mut(), id)
    }

    fn count_users(&self) -> Result<usize> {
        count_users(&mut self.conn.borrow_mut())
    }
}

impl<'a> UserRepo for DbConnection<'a> {
    fn create_user(&self, user: &User) -> Result<()> {
        create_user(&mut self.conn.borrow_mut(), user)
    }
    fn update_user(&self, user: &User) -> Result<()> {
        update_user(&mut self.conn.borrow_mut(), user)
    }

    fn get_user(&self, id: &Id) -> Result<User> {
        get_user(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_user(&self, id: &Id) -> Result<Option<User>> {
        try_get_user(&mut self.conn.borrow_mut(), id)
    }

    fn count_users(&self) -> Result<usize> {
        count_users(&mut self.conn.borrow_mut())
    }
}

fn create_user(conn: &mut SqliteConnection, u: &User) -> Result<()> {
    let new_user = models::NewUser::from(u);
    diesel::insert_into(schema::users::table)
        .values(&new_user)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn update_user(conn: &mut SqliteConnection, u: &User) -> Result<()> {
    use schema::users::dsl;
    let new_user = models::NewUser::from(u);
    diesel::update(dsl::users.filter(dsl::id.eq(new_user.id)))
        .set(&new_user)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn get_user(conn: &mut SqliteConnection, id: &Id) -> Result<User> {
    use schema::users::dsl;
    Ok(dsl::users
        .filter(dsl::id.eq(id.as_str()))
        .first::<models::UserEntity>(conn)
        .map_err(from_diesel_err)?
        .into())
}

fn try_get_user(conn: &mut SqliteConnection, id: &Id) -> Result<Option<User>> {
    use schema::users::dsl;
    Ok(dsl::users
        .filter(dsl::id.eq(id.as_str()))
        .first::<models::UserEntity>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(Into::into))
}

fn count_users(conn: &mut SqliteConnection) -> Result<usize> {
    use schema::users::dsl;
    Ok(dsl::users
        .select(diesel::dsl::count(dsl::id))
        .first::<i64>(conn)
        .map_err(from_diesel_err)? as usize)
}
