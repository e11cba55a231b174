use diesel::prelude::*;

use crate::{
    db::get_connection,
    domain::advocate::{Advocate, NewAdvocate},
    models::advocate::{Advocate as DbAdvocate, NewAdvocate as DbNewAdvocate},
    repository::{
        AdvocateListQuery, AdvocateReader, AdvocateWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::advocates,
};

impl AdvocateReader for DieselRepository {
    fn list_advocates(&self, query: AdvocateListQuery) -> RepositoryResult<Vec<Advocate>> {
        let mut conn = get_connection(self.pool())?;

        let mut statement = advocates::table
            .order(advocates::id.asc())
            .select(DbAdvocate::as_select())
            .into_boxed();

        if let Some(limit) = query.limit {
            if limit == 0 {
                return Ok(Vec::new());
            }
            statement = statement.limit(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        let rows = statement.load::<DbAdvocate>(&mut conn)?;

        rows.into_iter()
            .map(|row| Advocate::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}

impl AdvocateWriter for DieselRepository {
    fn create_advocates(&self, new_advocates: &[NewAdvocate]) -> RepositoryResult<usize> {
        let mut conn = get_connection(self.pool())?;

        let insertables: Vec<DbNewAdvocate> = new_advocates.iter().map(Into::into).collect();

        let affected = conn.transaction(|conn| {
            diesel::insert_into(advocates::table)
                .values(&insertables)
                .execute(conn)
        })?;

        Ok(affected)
    }
}
