//! # Weather Relay Core
//!
//! The domain model for one weather observation ([`Reading`]) and the
//! semantic validation applied to it before delivery ([`validate`]).

pub mod reading;
pub mod validator;

pub use reading::Reading;
pub use validator::{validate, ValidationError};
