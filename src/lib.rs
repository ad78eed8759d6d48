//! Ecoscore - environmental self-assessment scoring
//!
//! Turns a company's monthly energy, water and waste figures into
//! per-dimension scores, a weighted final score and a performance tier.
//! Evaluations and REP registry records can be kept in a local store and
//! rendered as text, JSON, Markdown or HTML reports.

pub mod config;
pub mod error;
pub mod history;
pub mod models;
pub mod reporters;
pub mod scoring;
pub mod store;

pub use error::{InputError, InputResult};
pub use models::{EvaluationInputs, EvaluationRequest, EvaluationResult, Tier};
pub use scoring::{evaluate, evaluate_batch, evaluate_request};
