pub mod journeys;
pub mod sessions;
pub mod users;
