// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use vol_hours_domain::DomainError;

/// The step of the publication gate that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicationStage {
    /// Reading the latch before issuing certificates.
    LatchCheck,
    /// Creating the certificate batch. The latch is left unset.
    CertificateIssuance,
    /// Setting the latch after certificates were created.
    LatchSet,
}

impl PublicationStage {
    /// Returns the string representation of the stage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LatchCheck => "latch_check",
            Self::CertificateIssuance => "certificate_issuance",
            Self::LatchSet => "latch_set",
        }
    }
}

impl std::fmt::Display for PublicationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The signup does not exist in the project.
    SignupNotFound {
        /// The requested signup.
        signup_id: String,
    },
    /// The storage collaborator failed during publication.
    ///
    /// Publication is always safe to retry: certificate creation is
    /// idempotent and the latch is only set after certificates exist.
    PublicationFailed {
        /// The canonical session key.
        session_key: String,
        /// The step that failed.
        stage: PublicationStage,
        /// The storage error message.
        message: String,
        /// Certificates created before the failure.
        certificates_created: usize,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::SignupNotFound { signup_id } => write!(f, "Signup '{signup_id}' not found"),
            Self::PublicationFailed {
                session_key,
                stage,
                message,
                certificates_created,
            } => write!(
                f,
                "Publication of session '{session_key}' failed during {stage} \
                 ({certificates_created} certificates created): {message}"
            ),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
