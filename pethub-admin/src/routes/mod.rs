pub mod auth;
pub mod health;
pub mod listings;
pub mod moderation;
pub mod shelters;
pub mod stats;
