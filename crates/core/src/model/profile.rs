use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProfileError {
    #[error("email address cannot be empty")]
    EmptyEmail,

    #[error("email address must have a user part and a domain")]
    MalformedEmail,
}

//
// ─── PROFILE ───────────────────────────────────────────────────────────────────
//

/// The signed-in learner.
///
/// The display name is derived from the email's user part at construction
/// time, so it never needs to be stored separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    email: String,
    first_name: String,
}

impl Profile {
    /// Creates a profile from a sign-in email address.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::EmptyEmail` for blank input, and
    /// `ProfileError::MalformedEmail` when there is no `@` separating a
    /// non-empty user part from a non-empty domain.
    pub fn new(email: impl Into<String>) -> Result<Self, ProfileError> {
        let email = email.into();
        let email = email.trim().to_owned();
        if email.is_empty() {
            return Err(ProfileError::EmptyEmail);
        }

        let (local, domain) = email.split_once('@').ok_or(ProfileError::MalformedEmail)?;
        if local.is_empty() || domain.is_empty() {
            return Err(ProfileError::MalformedEmail);
        }

        let first_name = derive_first_name(local);
        Ok(Self { email, first_name })
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Display name derived from the email's user part.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }
}

/// First token of the email user part, capitalized.
///
/// Dots, underscores and hyphens separate tokens; empty tokens are skipped.
/// A user part made only of separators is kept as-is.
fn derive_first_name(local: &str) -> String {
    let first = local
        .split(['.', '_', '-'])
        .find(|part| !part.is_empty())
        .unwrap_or(local);

    let mut chars = first.chars();
    match chars.next() {
        Some(head) => head.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
