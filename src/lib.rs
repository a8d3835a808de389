//! Nutrition Engine - Deterministic compute engine for nutrition targets and food scoring
//!
//! The engine turns inputs that other services already fetched into nutrition
//! results through pure, synchronous stages:
//!
//! - **Targets**: biometric profile → BMR → TDEE → goal adjustment → daily and per-meal targets
//! - **Foods**: raw recognized ingredients → numeric extraction → totals → balance score
//!   and meal-relative advisory comments
//!
//! Stored targets in either the canonical or the legacy flat shape are normalized
//! before use.

pub mod comments;
pub mod error;
pub mod extract;
pub mod normalizer;
pub mod pipeline;
pub mod score;
pub mod targets;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use comments::generate_all_comments;
pub use error::ComputeError;
pub use extract::extract_number;
pub use normalizer::normalize_target;
pub use pipeline::{process_complete, process_complete_json, NutritionProcessor};
pub use score::{calculate_combined_score, calculate_score, score_food};
pub use targets::calculate_nutrition_targets;

/// Engine version
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name reported by the CLI and FFI
pub const PRODUCER_NAME: &str = "nutrition-engine";
