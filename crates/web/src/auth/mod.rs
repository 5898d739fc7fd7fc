pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtService};
pub use password::{PasswordCheck, PasswordHasher};
