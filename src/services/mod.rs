pub mod group_service;
pub mod transport;
