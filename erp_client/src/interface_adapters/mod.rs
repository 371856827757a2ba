// Interface adapters: concrete implementations of the domain ports.

pub mod clients;
pub mod clock;
pub mod panel;
