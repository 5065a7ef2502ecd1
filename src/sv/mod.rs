pub mod activity;
pub mod dashboard;
pub mod goal;
pub mod ledger;
pub mod reminder;
pub mod user;

pub use activity::Activity;
pub use dashboard::Dashboard;
pub use goal::Goal;
pub use ledger::Ledger;
pub use reminder::Reminder;
pub use user::User;
