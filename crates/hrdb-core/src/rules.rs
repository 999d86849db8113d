//! Field validation rules shared by the HR entities

pub mod validation;
