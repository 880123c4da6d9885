pub mod record;
pub mod objective;
pub mod task;
pub mod note;
pub mod activity;
pub mod feedback;
pub mod config;

pub use record::*;
pub use objective::*;
pub use task::*;
pub use note::*;
pub use activity::*;
pub use feedback::*;
pub use config::*;
