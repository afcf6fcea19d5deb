pub mod handlers;
pub mod models;
pub mod routes;
pub mod schedule_client;

pub use schedule_client::ScheduleClient;

#[cfg(test)]
pub(crate) mod test_feed;
