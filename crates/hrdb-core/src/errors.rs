use thiserror::Error;

/// Result type alias for in-process validation
pub type Result<T> = std::result::Result<T, HrError>;

/// Result type alias for operations that may reach the database
pub type ExResult<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code usable for programmatic handling,
/// tests, and CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Validation
    InvalidInput,

    // Lifecycle
    NotFound,
    NotPersisted,
    AlreadyExists,

    // Persistence
    ConstraintViolation,
    Persistence,

    // Configuration / IO
    InvalidConfig,
    Io,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::NotPersisted => "ERR_NOT_PERSISTED",
            ExErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Io => "ERR_IO",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus the
/// operation, entity and row id that were involved.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity: Option<String>,
    entity_id: Option<i64>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity: None,
            entity_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity name context (e.g. "Review")
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Add row id context
    pub fn with_entity_id(mut self, id: i64) -> Self {
        self.entity_id = Some(id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity(&self) -> Option<&str> {
        self.entity.as_deref()
    }

    pub fn entity_id(&self) -> Option<i64> {
        self.entity_id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// True for errors raised by field validation
    pub fn is_validation(&self) -> bool {
        self.kind == ExErrorKind::InvalidInput
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity) = &self.entity {
            write!(f, " (entity: {})", entity)?;
        }
        if let Some(entity_id) = self.entity_id {
            write!(f, " (id: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Validation and lifecycle errors for HR entities
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HrError {
    // ===== Validation Errors =====
    /// Year is not an integer (or numeric string) >= 2000
    #[error("year must be an integer that is greater than or equal to 2000")]
    InvalidYear { value: String },

    /// A text field was empty
    #[error("{field} must be a non-empty string")]
    EmptyField {
        entity: &'static str,
        field: &'static str,
    },

    /// Foreign key does not resolve to a persisted Employee
    #[error(
        "employee_id must be the id of an Employee instance that has been persisted to the database"
    )]
    UnknownEmployee { employee_id: i64 },

    /// Foreign key does not resolve to a persisted Department
    #[error(
        "department_id must be the id of a Department instance that has been persisted to the database"
    )]
    UnknownDepartment { department_id: i64 },

    /// Employee assigned by reference has never been saved
    #[error("employee must be an instance of Employee that has been persisted to the database")]
    EmployeeNotPersisted,

    /// Department assigned by reference has never been saved
    #[error(
        "department must be an instance of Department that has been persisted to the database"
    )]
    DepartmentNotPersisted,

    // ===== Lifecycle Errors =====
    /// Operation requires a persisted record
    #[error("{entity} has not been persisted to the database")]
    NotPersisted { entity: &'static str },

    /// Record already has a database id
    #[error("{entity} {id} has already been persisted")]
    AlreadyPersisted { entity: &'static str, id: i64 },

    /// Row for a persisted record no longer exists
    #[error("{entity} {id} not found")]
    RowNotFound { entity: &'static str, id: i64 },
}

impl From<HrError> for ExError {
    fn from(err: HrError) -> Self {
        let message = err.to_string();
        match err {
            HrError::InvalidYear { .. } => ExError::new(ExErrorKind::InvalidInput)
                .with_op("set_year")
                .with_entity("Review")
                .with_message(message),
            HrError::EmptyField { entity, field } => ExError::new(ExErrorKind::InvalidInput)
                .with_op(format!("set_{}", field))
                .with_entity(entity)
                .with_message(message),
            HrError::UnknownEmployee { employee_id } => ExError::new(ExErrorKind::InvalidInput)
                .with_op("set_employee_id")
                .with_entity("Employee")
                .with_entity_id(employee_id)
                .with_message(message),
            HrError::UnknownDepartment { department_id } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_op("set_department_id")
                    .with_entity("Department")
                    .with_entity_id(department_id)
                    .with_message(message)
            }
            HrError::EmployeeNotPersisted => ExError::new(ExErrorKind::InvalidInput)
                .with_op("set_employee")
                .with_entity("Employee")
                .with_message(message),
            HrError::DepartmentNotPersisted => ExError::new(ExErrorKind::InvalidInput)
                .with_op("set_department")
                .with_entity("Department")
                .with_message(message),
            HrError::NotPersisted { entity } => ExError::new(ExErrorKind::NotPersisted)
                .with_entity(entity)
                .with_message(message),
            HrError::AlreadyPersisted { entity, id } => ExError::new(ExErrorKind::AlreadyExists)
                .with_entity(entity)
                .with_entity_id(id)
                .with_message(message),
            HrError::RowNotFound { entity, id } => ExError::new(ExErrorKind::NotFound)
                .with_entity(entity)
                .with_entity_id(id)
                .with_message(message),
        }
    }
}
