/// Ecosystem adapters. Each submodule wraps one format parser behind the
/// [`Detectable`](crate::detectable::Detectable) lifecycle.
pub mod cargo;
pub mod dpkg;
pub mod gradle;
pub mod yarn;
