pub mod domain;
mod key;
mod record;

pub use domain::{to_fqdn, Domain, DomainParts};
pub use key::*;
pub use record::*;
