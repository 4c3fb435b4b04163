//! Outbound integrations.

pub mod steamdt;
