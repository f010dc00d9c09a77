//! Power cycle models.
//!
//! This module contains models for heat-to-power conversion cycles.

pub mod orc;
