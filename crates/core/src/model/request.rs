use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::RequestId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RequestError {
    #[error("ama request needs a contact email")]
    EmptyEmail,

    #[error("ama request needs a question")]
    EmptyQuestion,

    #[error("merch request needs the recipient's name")]
    EmptyName,

    #[error("merch request needs a shipping address")]
    EmptyAddress,

    #[error("unknown t-shirt size {0:?}")]
    UnknownSize(String),
}

//
// ─── MERCH SIZE ────────────────────────────────────────────────────────────────
//

/// T-shirt size offered on the merch form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MerchSize {
    S,
    M,
    L,
    Xl,
}

impl MerchSize {
    /// Stable label used on the wire and in the form.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            MerchSize::S => "S",
            MerchSize::M => "M",
            MerchSize::L => "L",
            MerchSize::Xl => "XL",
        }
    }
}

impl fmt::Display for MerchSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MerchSize {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "S" => Ok(MerchSize::S),
            "M" => Ok(MerchSize::M),
            "L" => Ok(MerchSize::L),
            "XL" => Ok(MerchSize::Xl),
            other => Err(RequestError::UnknownSize(other.to_owned())),
        }
    }
}

//
// ─── REQUESTS ──────────────────────────────────────────────────────────────────
//

/// An Ask-Me-Anything request submitted from the community reward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmaRequest {
    id: RequestId,
    email: String,
    question: String,
}

impl AmaRequest {
    /// Creates an AMA request.
    ///
    /// # Errors
    ///
    /// Returns `RequestError` if the email or the question is empty.
    pub fn new(
        id: RequestId,
        email: impl Into<String>,
        question: impl Into<String>,
    ) -> Result<Self, RequestError> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(RequestError::EmptyEmail);
        }
        let question = question.into();
        if question.trim().is_empty() {
            return Err(RequestError::EmptyQuestion);
        }

        Ok(Self {
            id,
            email: email.trim().to_owned(),
            question: question.trim().to_owned(),
        })
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> RequestId {
        self.id
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }
}

/// A merchandise shipping request submitted from the merch reward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerchRequest {
    id: RequestId,
    name: String,
    address: String,
    size: MerchSize,
}

impl MerchRequest {
    /// Creates a merch request.
    ///
    /// # Errors
    ///
    /// Returns `RequestError` if the name or the address is empty.
    pub fn new(
        id: RequestId,
        name: impl Into<String>,
        address: impl Into<String>,
        size: MerchSize,
    ) -> Result<Self, RequestError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RequestError::EmptyName);
        }
        let address = address.into();
        if address.trim().is_empty() {
            return Err(RequestError::EmptyAddress);
        }

        Ok(Self {
            id,
            name: name.trim().to_owned(),
            address: address.trim().to_owned(),
            size,
        })
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> RequestId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[must_use]
    pub fn size(&self) -> MerchSize {
        self.size
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
