use serde::Serialize;

use super::Record;
use crate::errors::Result;
use crate::rules::validation::require_non_empty;

/// A department: a named unit at a location
#[derive(Debug, Serialize)]
pub struct Department {
    id: Option<i64>,
    name: String,
    location: String,
}

impl Department {
    /// Create an unpersisted department
    ///
    /// # Errors
    /// `EmptyField` when `name` or `location` is empty.
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Result<Self> {
        Ok(Self {
            id: None,
            name: require_non_empty(Self::ENTITY, "name", name)?,
            location: require_non_empty(Self::ENTITY, "location", location)?,
        })
    }

    /// Attach a known database id (used when materializing rows)
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// # Errors
    /// `EmptyField` when `name` is empty; the current value is kept.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        self.name = require_non_empty(Self::ENTITY, "name", name)?;
        Ok(())
    }

    /// # Errors
    /// `EmptyField` when `location` is empty; the current value is kept.
    pub fn set_location(&mut self, location: impl Into<String>) -> Result<()> {
        self.location = require_non_empty(Self::ENTITY, "location", location)?;
        Ok(())
    }
}

impl Record for Department {
    const ENTITY: &'static str = "Department";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn mark_persisted(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn mark_unpersisted(&mut self) {
        self.id = None;
    }

    fn refresh_from(&mut self, fresh: Self) {
        self.name = fresh.name;
        self.location = fresh.location;
    }
}
