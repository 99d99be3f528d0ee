//! Wire vocabulary shared by the kiosk client and the developer relay.

pub mod domain;
pub mod error;
pub mod protocol;
