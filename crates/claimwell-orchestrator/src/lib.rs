//! Claimwell Orchestrator
//!
//! Composes classification, text extraction, field extraction, validation
//! and the decision policy into one end-to-end claim pipeline.
//!
//! The pipeline runs in fixed stages with a strict barrier between them:
//! all classifications resolve before any text extraction starts, and all
//! text extraction resolves before routing begins. Within a stage, calls
//! to the external collaborators run concurrently and results are joined
//! by input position, so completion order never affects the outcome.
//!
//! # Examples
//!
//! ```no_run
//! use claimwell_llm::GeminiProvider;
//! use claimwell_orchestrator::{ClaimOrchestrator, FileEntry};
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = Arc::new(GeminiProvider::from_env()?);
//! let orchestrator = ClaimOrchestrator::new(Arc::clone(&provider), provider);
//!
//! let entries = vec![FileEntry::new("/tmp/staging/bill.pdf", "bill.pdf")];
//! let response = orchestrator.process_claim(&entries).await?;
//! println!("{}", response.claim_decision.status);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod decision;
mod error;
mod orchestrator;

pub use decision::decide;
pub use error::OrchestratorError;
pub use orchestrator::{ClaimOrchestrator, FileEntry};
