//! Client-side form validation.
//!
//! Every form validates before anything is sent to the backend and reports
//! one message per offending field, in field order. A valid form converts
//! into the request payload it guards.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::entities::AccountSettings;
use crate::enums::{Platform, ProjectStatus};
use crate::requests::{LoginRequest, NewAbTest, NewSavedProject, NewVariant, PasswordChange};

const AB_TITLE_MIN: usize = 3;
const AB_DESCRIPTION_MIN: usize = 10;
const AB_CONTENT_MIN: usize = 20;
const NAME_MIN: usize = 2;
const PASSWORD_MIN: usize = 8;

/// A validation message attached to one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// All field errors of a rejected form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("validation failed: {}", summarize(.errors))]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Message for `field`, if that field failed.
    #[must_use]
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() { Ok(value()) } else { Err(self) }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// A form that validates into a request payload.
pub trait Validate {
    type Output;

    /// Check every field and build the payload.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] listing each invalid field.
    fn validate(&self) -> Result<Self::Output, ValidationErrors>;
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn char_len(value: &str) -> usize {
    value.trim().chars().count()
}

fn min_length(
    errors: &mut ValidationErrors,
    field: &str,
    label: &str,
    value: &str,
    min: usize,
) {
    if char_len(value) < min {
        errors.push(field, format!("{label} must be at least {min} characters"));
    }
}

fn required(errors: &mut ValidationErrors, field: &str, label: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(field, format!("{label} is required"));
    }
}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.trim().split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl Validate for LoginForm {
    type Output = LoginRequest;

    fn validate(&self) -> Result<LoginRequest, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        required(&mut errors, "username", "Username", &self.username);
        required(&mut errors, "password", "Password", &self.password);
        errors.finish(|| LoginRequest {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// A/B test
// ---------------------------------------------------------------------------

/// Create-A/B-test form. Leaving `variants` empty derives a control and a
/// challenger from `content`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbTestForm {
    pub title: String,
    pub description: String,
    pub content: String,
    pub variants: Vec<NewVariant>,
}

impl Validate for AbTestForm {
    type Output = NewAbTest;

    fn validate(&self) -> Result<NewAbTest, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        min_length(&mut errors, "title", "Title", &self.title, AB_TITLE_MIN);
        min_length(
            &mut errors,
            "description",
            "Description",
            &self.description,
            AB_DESCRIPTION_MIN,
        );
        min_length(&mut errors, "content", "Content", &self.content, AB_CONTENT_MIN);
        if self.variants.len() == 1 {
            errors.push("variants", "At least two variants are required");
        }
        if self.variants.iter().any(|v| v.content.trim().is_empty()) {
            errors.push("variants", "Variant content is required");
        }

        errors.finish(|| {
            let content = self.content.trim().to_string();
            let variants = if self.variants.is_empty() {
                vec![
                    NewVariant {
                        name: "Control".into(),
                        content: content.clone(),
                    },
                    NewVariant {
                        name: "Variant B".into(),
                        content: content.clone(),
                    },
                ]
            } else {
                self.variants.clone()
            };
            NewAbTest {
                title: self.title.trim().to_string(),
                description: self.description.trim().to_string(),
                content,
                variants,
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Saved project
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedProjectForm {
    pub title: String,
    pub content: String,
    pub status: ProjectStatus,
    pub platform: Platform,
    pub keywords: Vec<String>,
}

impl Validate for SavedProjectForm {
    type Output = NewSavedProject;

    fn validate(&self) -> Result<NewSavedProject, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        required(&mut errors, "title", "Title", &self.title);
        required(&mut errors, "content", "Content", &self.content);
        errors.finish(|| NewSavedProject {
            title: self.title.trim().to_string(),
            content: self.content.clone(),
            status: self.status,
            platform: self.platform,
            keywords: self
                .keywords
                .iter()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .collect(),
        })
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountSettingsForm {
    pub name: String,
    pub email: String,
    pub bio: String,
    pub company: String,
}

impl Validate for AccountSettingsForm {
    type Output = AccountSettings;

    fn validate(&self) -> Result<AccountSettings, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        min_length(&mut errors, "name", "Name", &self.name, NAME_MIN);
        if !looks_like_email(&self.email) {
            errors.push("email", "Please enter a valid email address");
        }
        errors.finish(|| AccountSettings {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            bio: self.bio.trim().to_string(),
            company: self.company.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl Validate for PasswordForm {
    type Output = PasswordChange;

    fn validate(&self) -> Result<PasswordChange, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        required(
            &mut errors,
            "current_password",
            "Current password",
            &self.current_password,
        );
        if self.new_password.chars().count() < PASSWORD_MIN {
            errors.push(
                "new_password",
                format!("Password must be at least {PASSWORD_MIN} characters"),
            );
        }
        if self.new_password != self.confirm_password {
            errors.push("confirm_password", "Passwords do not match");
        }
        errors.finish(|| PasswordChange {
            current_password: self.current_password.clone(),
            new_password: self.new_password.clone(),
        })
    }
}
