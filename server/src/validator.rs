use thiserror::Error;

use crate::models::user::{CreateUserForm, UpdateUserForm};

const MAX_FIELD_LEN: usize = 255;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name is required")]
    MissingName,
    #[error("Email is required")]
    MissingEmail,
    #[error("Password is required")]
    MissingPassword,
    #[error("Email address is not valid")]
    InvalidEmail,
    #[error("{0} must be at most 255 characters")]
    TooLong(&'static str),
}

fn check_name(name: &str) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingName);
    }
    if name.chars().count() > MAX_FIELD_LEN {
        return Err(ValidationError::TooLong("Name"));
    }
    Ok(name.to_owned())
}

fn check_email(email: &str) -> Result<String, ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::MissingEmail);
    }
    if email.chars().count() > MAX_FIELD_LEN {
        return Err(ValidationError::TooLong("Email"));
    }
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace) =>
        {
            Ok(email.to_owned())
        }
        _ => Err(ValidationError::InvalidEmail),
    }
}

/// Normalises a create submission. The password is kept byte for byte.
pub fn validate_create(form: &CreateUserForm) -> Result<CreateUserForm, ValidationError> {
    let name = check_name(&form.name)?;
    let email = check_email(&form.email)?;
    if form.password.is_empty() {
        return Err(ValidationError::MissingPassword);
    }
    Ok(CreateUserForm {
        name,
        email,
        password: form.password.clone(),
    })
}

pub fn validate_update(form: &UpdateUserForm) -> Result<UpdateUserForm, ValidationError> {
    Ok(UpdateUserForm {
        name: check_name(&form.name)?,
        email: check_email(&form.email)?,
    })
}
