//! Annotation creation and drawing
//!
//! This module provides:
//! - `create_annotations`, classifying configured items into annotations
//! - `Annotation::draw`, dispatching each kind to its drawing primitive

pub mod draw;
pub mod factory;

pub use factory::{AnnotationConfig, create_annotations};
