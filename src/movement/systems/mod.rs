//! Movement domain: system modules for input and world gravity.

pub(crate) mod gravity;
pub(crate) mod input;

pub(crate) use gravity::sync_gravity;
pub(crate) use input::{read_input, read_settings_input};
