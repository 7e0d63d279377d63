pub mod campaign;
pub mod donation;
pub mod inquiry;
pub mod project;
pub mod record;
pub mod service;
pub mod subscriber;
pub mod testimonial;
pub mod user;

pub use campaign::*;
pub use donation::*;
pub use inquiry::*;
pub use project::*;
pub use record::*;
pub use service::*;
pub use subscriber::*;
pub use testimonial::*;
pub use user::*;
