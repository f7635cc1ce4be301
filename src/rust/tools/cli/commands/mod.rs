#![cfg(feature = "cli")]

pub mod sync;
