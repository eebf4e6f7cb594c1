// HTTP handlers grouped by backing store
pub mod crud;
pub mod health;
pub mod mongo;
pub mod postgres;
pub mod predictions;
