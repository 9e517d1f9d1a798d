// Authentication module
// Decision: Stateless JWT access/refresh tokens, bcrypt password hashes
// Decision: Email/password is the only login method

pub mod config;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod routes;
pub mod service;

pub use config::{AuthConfig, JwtConfig, SigningAlgorithm};
pub use jwt::{TokenPair, TokenService};
pub use middleware::{AuthState, AuthUser, FromRef};
pub use password::PasswordHasher;
pub use routes::{routes, AuthRoutesState};
pub use service::{AuthResponse, AuthService};
