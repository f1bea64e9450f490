//! # Workflows Module
//!
//! Top-level entry points that run the engine over a complete trajectory.
//!
//! - **Stratification Workflow** ([`stratify`]) - Groups a contact table by frame,
//!   stratifies the hydrogen bonds of every frame and forwards other contact types.

pub mod stratify;
