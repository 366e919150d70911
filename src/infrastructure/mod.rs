pub mod audio;
pub mod fetch;
pub mod observability;
pub mod staging;
pub mod webhook;
