//! Flowsheet Core Types and Definitions
//!
//! This crate provides the foundational types for compiling process-plant
//! models into schematic diagrams. It includes:
//!
//! - **Identifiers**: Owned, cheaply cloned equipment identifiers ([`identifier::EquipmentId`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Points, bounds, rotation and the canvas transform ([`geometry`] module)
//! - **Model**: The process model consumed by the compiler ([`model`] module)
//! - **Draw**: Stroke, text and layer primitives for SVG output ([`draw`] module)
//! - **Symbols**: The equipment symbol library ([`symbol`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod identifier;
pub mod model;
pub mod symbol;
