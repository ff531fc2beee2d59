//! Request validation performed before the service is called.

use std::fmt;

use modkit::ApiError;
use validator::ValidateEmail;

use crate::api::rest::dto::{CreateUserReq, PatchUserReq};
use crate::contract::{NewUser, UserPatch};

pub const NAME_MANDATORY: &str = "Name is mandatory";
pub const NAME_BLANK: &str = "Name must not be blank";
pub const EMAIL_MANDATORY: &str = "Email is mandatory";
pub const EMAIL_INVALID: &str = "Email should be valid";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Every failed field of one request, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    fn add(&mut self, field: &'static str, message: &'static str) {
        self.0.push(FieldError { field, message });
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            f.write_str(e.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::bad_request(errors.to_string())
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// `name` and `email` are required; `email` must be a valid address.
pub fn validate_new_user(req: CreateUserReq) -> Result<NewUser, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let name = req.name.unwrap_or_default();
    if is_blank(&name) {
        errors.add("name", NAME_MANDATORY);
    }

    let email = req.email.unwrap_or_default();
    if is_blank(&email) {
        errors.add("email", EMAIL_MANDATORY);
    } else if !email.validate_email() {
        errors.add("email", EMAIL_INVALID);
    }

    errors.into_result(|| NewUser {
        id: req.id,
        name,
        email,
    })
}

/// Present fields must be usable as-is; absent fields are not checked.
pub fn validate_user_patch(req: PatchUserReq) -> Result<UserPatch, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if let Some(name) = &req.name {
        if is_blank(name) {
            errors.add("name", NAME_BLANK);
        }
    }

    if let Some(email) = &req.email {
        if is_blank(email) || !email.validate_email() {
            errors.add("email", EMAIL_INVALID);
        }
    }

    errors.into_result(|| UserPatch {
        name: req.name,
        email: req.email,
    })
}
