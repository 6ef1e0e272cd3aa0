//! Customer authentication

mod errors;
mod models;
pub mod openbao;
mod repository;
mod service;
mod token;

pub use errors::*;
pub use models::*;
pub use openbao::{MockTransit, OpenBaoClient, OpenBaoConfig, OpenBaoError, Transit};
pub use service::*;
pub use token::*;
