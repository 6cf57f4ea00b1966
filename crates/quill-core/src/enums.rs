//! Status enums, platforms, categories, and metrics for Quill.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! Status enums with state machines provide `allowed_next_states()` so the
//! client can refuse an impossible action before calling the backend.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

/// Implements `as_str`-backed `Display` and case-insensitive `FromStr`.
macro_rules! string_enum {
    ($ty:ident, $label:literal, [$($variant:ident => $s:literal),+ $(,)?]) => {
        impl $ty {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Return the wire representation.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = CoreError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
                Self::ALL
                    .iter()
                    .copied()
                    .find(|candidate| candidate.as_str() == normalized)
                    .ok_or_else(|| CoreError::Validation(format!("unknown {}: {value}", $label)))
            }
        }
    };
}

// ---------------------------------------------------------------------------
// AbTestStatus
// ---------------------------------------------------------------------------

/// Lifecycle of an A/B test.
///
/// ```text
/// draft → running → completed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbTestStatus {
    Draft,
    Running,
    Completed,
}

impl AbTestStatus {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Draft => &[Self::Running],
            Self::Running => &[Self::Completed],
            Self::Completed => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// `next`, if the lifecycle allows moving there from `self`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] otherwise.
    pub fn transition_to(self, next: Self) -> Result<Self, CoreError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(CoreError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }

    /// Metrics are only accepted while a test is running.
    #[must_use]
    pub const fn accepts_metrics(self) -> bool {
        matches!(self, Self::Running)
    }
}

string_enum!(AbTestStatus, "A/B test status", [
    Draft => "draft",
    Running => "running",
    Completed => "completed",
]);

// ---------------------------------------------------------------------------
// AbMetric
// ---------------------------------------------------------------------------

/// A metric recorded against an A/B test variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbMetric {
    Impression,
    Conversion,
}

string_enum!(AbMetric, "A/B metric", [
    Impression => "impression",
    Conversion => "conversion",
]);

// ---------------------------------------------------------------------------
// ProjectStatus
// ---------------------------------------------------------------------------

/// Publication status of a saved project or content item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Draft,
    Scheduled,
    Published,
    Archived,
}

string_enum!(ProjectStatus, "project status", [
    Draft => "draft",
    Scheduled => "scheduled",
    Published => "published",
    Archived => "archived",
]);

// ---------------------------------------------------------------------------
// Platform
// ---------------------------------------------------------------------------

/// Publishing platform a piece of content targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    #[default]
    Blog,
    Wordpress,
    Twitter,
    Linkedin,
    Facebook,
    Instagram,
    Email,
}

string_enum!(Platform, "platform", [
    Blog => "blog",
    Wordpress => "wordpress",
    Twitter => "twitter",
    Linkedin => "linkedin",
    Facebook => "facebook",
    Instagram => "instagram",
    Email => "email",
]);

// ---------------------------------------------------------------------------
// TemplateCategory
// ---------------------------------------------------------------------------

/// Category a content template is filed under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateCategory {
    #[default]
    BlogPost,
    SocialMedia,
    Email,
    Advertising,
    LandingPage,
}

string_enum!(TemplateCategory, "template category", [
    BlogPost => "blog_post",
    SocialMedia => "social_media",
    Email => "email",
    Advertising => "advertising",
    LandingPage => "landing_page",
]);

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

/// Appearance theme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

string_enum!(Theme, "theme", [
    Light => "light",
    Dark => "dark",
    System => "system",
]);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AbTestStatus::Draft, AbTestStatus::Running, true)]
    #[case(AbTestStatus::Running, AbTestStatus::Completed, true)]
    #[case(AbTestStatus::Draft, AbTestStatus::Completed, false)]
    #[case(AbTestStatus::Completed, AbTestStatus::Running, false)]
    #[case(AbTestStatus::Running, AbTestStatus::Draft, false)]
    fn ab_test_transitions(
        #[case] from: AbTestStatus,
        #[case] to: AbTestStatus,
        #[case] allowed: bool,
    ) {
        assert_eq!(from.can_transition_to(to), allowed);
    }

    #[test]
    fn completed_is_terminal() {
        assert!(AbTestStatus::Completed.allowed_next_states().is_empty());
    }

    #[test]
    fn restarting_a_running_test_is_refused() {
        let err = AbTestStatus::Running
            .transition_to(AbTestStatus::Running)
            .unwrap_err();
        assert_eq!(err.to_string(), "cannot move A/B test from running to running");
        assert_eq!(
            AbTestStatus::Draft.transition_to(AbTestStatus::Running),
            Ok(AbTestStatus::Running)
        );
    }

    #[test]
    fn only_running_tests_accept_metrics() {
        assert!(AbTestStatus::Running.accepts_metrics());
        assert!(!AbTestStatus::Draft.accepts_metrics());
        assert!(!AbTestStatus::Completed.accepts_metrics());
    }

    #[test]
    fn snake_case_on_the_wire() {
        let json = serde_json::to_string(&TemplateCategory::SocialMedia).unwrap();
        assert_eq!(json, "\"social_media\"");
        let status: ProjectStatus = serde_json::from_str("\"published\"").unwrap();
        assert_eq!(status, ProjectStatus::Published);
    }

    #[rstest]
    #[case("running", AbTestStatus::Running)]
    #[case("  Draft ", AbTestStatus::Draft)]
    #[case("COMPLETED", AbTestStatus::Completed)]
    fn parse_status_is_lenient(#[case] input: &str, #[case] expected: AbTestStatus) {
        assert_eq!(input.parse::<AbTestStatus>().unwrap(), expected);
    }

    #[test]
    fn parse_accepts_kebab_case() {
        assert_eq!(
            "landing-page".parse::<TemplateCategory>().unwrap(),
            TemplateCategory::LandingPage
        );
    }

    #[test]
    fn parse_unknown_value_fails() {
        let err = "myspace".parse::<Platform>().unwrap_err();
        assert!(err.to_string().contains("unknown platform: myspace"));
    }

    #[test]
    fn display_matches_wire_format() {
        assert_eq!(Theme::Dark.to_string(), "dark");
        assert_eq!(AbMetric::Conversion.to_string(), "conversion");
    }
}
