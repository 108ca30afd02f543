//! New-entity form buffers and their form-level constraints.
//!
//! Validation mirrors what a browser enforces for `required`, `type="email"`
//! and `type="number"` with `min`/`max`: nothing more. There is no
//! cross-field validation.

use chrono::Datelike;
use fleetdesk_model::{NewVehicleRow, Role, normalize_badge, year_bounds};
use thiserror::Error;

/// Calendar year on the local clock.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("`{0}` is not a valid email address")]
    InvalidEmail(String),

    #[error("Year must be between {min} and {max}")]
    YearOutOfRange { min: i32, max: i32 },
}

/// Buffer behind the "Add User" modal.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct NewUserForm {
    pub email: String,
    pub full_name: String,
    pub badge_number: String,
    pub role: Role,
    pub password: String,
}

impl std::fmt::Debug for NewUserForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUserForm")
            .field("email", &self.email)
            .field("full_name", &self.full_name)
            .field("badge_number", &self.badge_number)
            .field("role", &self.role)
            .field("password", &"***")
            .finish()
    }
}

/// A validated user creation request.
#[derive(Clone, PartialEq, Eq)]
pub struct NewUserRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub badge_number: Option<String>,
    pub role: Role,
}

impl std::fmt::Debug for NewUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUserRequest")
            .field("email", &self.email)
            .field("full_name", &self.full_name)
            .field("badge_number", &self.badge_number)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

impl NewUserForm {
    pub fn validate(&self) -> Result<NewUserRequest, FormError> {
        if self.email.is_empty() {
            return Err(FormError::Required("Email"));
        }
        if !looks_like_email(&self.email) {
            return Err(FormError::InvalidEmail(self.email.clone()));
        }
        if self.full_name.is_empty() {
            return Err(FormError::Required("Full Name"));
        }
        if self.password.is_empty() {
            return Err(FormError::Required("Password"));
        }
        Ok(NewUserRequest {
            email: self.email.clone(),
            password: self.password.clone(),
            full_name: self.full_name.clone(),
            badge_number: normalize_badge(&self.badge_number),
            role: self.role,
        })
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

/// Buffer behind the "Add Vehicle" modal. `year` is `None` while the number
/// input holds something that is not an integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVehicleForm {
    pub unit_number: String,
    pub make: String,
    pub model: String,
    pub year: Option<i32>,
}

impl Default for NewVehicleForm {
    fn default() -> Self {
        Self {
            unit_number: String::new(),
            make: String::new(),
            model: String::new(),
            year: Some(current_year()),
        }
    }
}

impl NewVehicleForm {
    /// Validate against the model-year window of `current_year`. The row
    /// always carries status `available`.
    pub fn validate(
        &self,
        current_year: i32,
    ) -> Result<NewVehicleRow, FormError> {
        if self.unit_number.is_empty() {
            return Err(FormError::Required("Unit Number"));
        }
        if self.make.is_empty() {
            return Err(FormError::Required("Make"));
        }
        if self.model.is_empty() {
            return Err(FormError::Required("Model"));
        }
        let year = self.year.ok_or(FormError::Required("Year"))?;
        let bounds = year_bounds(current_year);
        if !bounds.contains(&year) {
            return Err(FormError::YearOutOfRange {
                min: *bounds.start(),
                max: *bounds.end(),
            });
        }
        Ok(NewVehicleRow::available(
            self.unit_number.clone(),
            self.make.clone(),
            self.model.clone(),
            year,
        ))
    }
}

/// Parse a number input the way the form does: anything but an integer
/// leaves the field empty.
pub fn parse_year(input: &str) -> Option<i32> {
    input.trim().parse().ok()
}
