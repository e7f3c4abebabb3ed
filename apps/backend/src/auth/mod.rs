pub mod jwt;

pub use jwt::{mint_access_token, verify_access_token, Claims, TokenData, TokenError};
