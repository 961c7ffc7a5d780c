//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and the plan generation core.

pub mod admin;
pub mod diet;
pub mod store;
pub mod subscription;
pub mod user;
pub mod workout;

pub use admin::AdminService;
pub use diet::DietService;
pub use store::{PlanStore, ProfileStore};
pub use subscription::SubscriptionService;
pub use user::UserService;
pub use workout::WorkoutService;
