//! ars-dialog
//!
//! The USSD conversation engine. Each inbound turn is forwarded to the
//! RapidPro flow; the flow's reply arrives later on a separate delivery
//! callback and is handed back to the waiting turn through the
//! [`correlator::MessageCorrelator`]. When the flow ends the collected
//! answers are scored with `ars-risk`.

pub mod accumulator;
pub mod controller;
pub mod correlator;
pub mod error;
pub mod gateway;
pub mod messages;
pub mod session;
pub mod settings;
