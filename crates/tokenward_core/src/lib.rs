pub mod config;
pub mod entities;
pub mod error;
pub mod events;
pub mod ports;
pub mod session;
pub mod use_cases;

#[cfg(test)]
mod testing;

pub use error::Error;
pub use session::{Session, SessionSnapshot};
