mod activity;
mod lead;
mod reminder_event;
mod shared;
pub mod time_window;
mod user;

pub use activity::{Activity, ActivityStatus, ActivityType};
pub use lead::Lead;
pub use reminder_event::{InvalidReminderTypeError, ReminderEvent, ReminderType};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use user::User;
