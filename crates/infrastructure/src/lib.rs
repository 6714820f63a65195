//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod collecting_notifier;
mod http_service_desk_gateway;
mod in_memory_service_desk;
mod tracing_notifier;

pub use collecting_notifier::CollectingNotifier;
pub use http_service_desk_gateway::HttpServiceDeskGateway;
pub use in_memory_service_desk::{DEMO_ADMIN_EMAIL, DEMO_USER_EMAIL, InMemoryServiceDesk};
pub use tracing_notifier::TracingNotifier;
