use log::info;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use crate::{Compound, DataError};

/// SQLite-backed store of colony compounds, one row per colony.
pub struct Storage {
    connection: Connection,
}

impl Storage {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        let connection = Connection::open(path.as_ref())?;
        info!("Open colony storage {:?}", path.as_ref());
        let storage = Storage { connection };
        storage.setup()?;
        Ok(storage)
    }

    pub fn open_in_memory() -> Result<Self, DataError> {
        let connection = Connection::open_in_memory()?;
        let storage = Storage { connection };
        storage.setup()?;
        Ok(storage)
    }

    #[inline]
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    fn setup(&self) -> Result<(), DataError> {
        let schema = "create table if not exists colonies (
            key text primary key,
            name text not null,
            data text not null
        );";
        self.connection.execute_batch(schema)?;
        Ok(())
    }

    pub fn save(&self, key: &str, name: &str, compound: &Compound) -> Result<(), DataError> {
        let data = compound.to_json()?;
        self.connection.execute(
            "insert or replace into colonies (key, name, data) values (?, ?, ?)",
            params![key, name, data],
        )?;
        Ok(())
    }

    pub fn load(&self, key: &str) -> Result<Option<Compound>, DataError> {
        let data: Option<String> = self
            .connection
            .query_row(
                "select data from colonies where key = ?",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        match data {
            Some(data) => Ok(Some(Compound::from_json(&data)?)),
            None => Ok(None),
        }
    }

    pub fn load_all(&self) -> Result<Vec<Compound>, DataError> {
        let mut statement = self
            .connection
            .prepare("select data from colonies order by key")?;
        let mut rows = statement.query([])?;
        let mut compounds = vec![];
        while let Some(row) = rows.next()? {
            let data: String = row.get(0)?;
            compounds.push(Compound::from_json(&data)?);
        }
        Ok(compounds)
    }

    pub fn delete(&self, key: &str) -> Result<bool, DataError> {
        let deleted = self
            .connection
            .execute("delete from colonies where key = ?", params![key])?;
        Ok(deleted > 0)
    }
}
