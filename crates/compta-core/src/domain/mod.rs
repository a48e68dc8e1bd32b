//! 도메인 모델.

mod admin_type;
mod role;
mod session;

pub use admin_type::{AdminType, Month, TypeKind};
pub use role::Role;
pub use session::Session;
