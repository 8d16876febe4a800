// Role-aware routing: route table, guard, per-tab state machine, and its event loop.

pub mod driver;
pub mod guard;
pub mod machine;
pub mod routes;

pub use driver::{RouterDriver, RouterHandle};
pub use guard::{evaluate, GuardDecision};
pub use machine::{AuthState, Navigation, SessionRouter};
pub use routes::AppRoute;
