//! Supporting utilities used by models.
//!
//! These APIs are public because they're useful outside the models, but they
//! are not stable.

pub mod constraint;
pub mod units;
