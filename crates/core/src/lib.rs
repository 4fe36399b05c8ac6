// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod command;
mod error;
mod publication;
mod state;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::apply;
pub use command::Command;
pub use error::{CoreError, PublicationStage};
pub use publication::{
    CertificateRequest, ExcludedSignup, PublicationDecision, PublicationOutcome, PublicationPlan,
    PublicationResult, PublicationStore, execute_publication, plan_publication, publish,
};
pub use state::{ProjectState, TransitionResult, signup_snapshot};
