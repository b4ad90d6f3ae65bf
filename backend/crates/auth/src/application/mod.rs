//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod current_session;
pub mod exchange_code;
pub mod gate;
pub mod password_reset;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;

// Re-exports
pub use config::{AuthConfig, GateConfig};
pub use current_session::{CurrentSessionUseCase, ResolvedSession, SessionLookup};
pub use exchange_code::ExchangeCodeUseCase;
pub use gate::{GateDecision, RouteClass};
pub use password_reset::{ForgotPasswordInput, PasswordResetUseCase, ResetPasswordInput};
pub use sign_in::{SignInInput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
