mod assets;
mod notifications;
mod tickets;
mod users;

pub use assets::AssetGateway;
pub use notifications::{Notification, Notifier, Severity};
pub use tickets::{AssigneeSelection, TicketGateway};
pub use users::UserDirectory;
