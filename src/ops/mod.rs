pub mod activity;
pub mod backlog;
pub mod confirm;
pub mod dashboard;
pub mod editor;
pub mod feedback;
pub mod notes;
pub mod okr;
pub mod routes;
pub mod view;
