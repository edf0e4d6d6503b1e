pub mod admin;
pub mod auth;
pub mod cart;
pub mod growth;
pub mod health;
pub mod investments;
pub mod notifications;
pub mod orders;
pub mod plans;
pub mod products;
pub mod revenue;
pub mod shops;
pub mod whatsapp;
