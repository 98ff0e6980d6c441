//! Metro route planner and e-ticket issuer.
//!
//! A service that answers: "What is the best way from this station to
//! that one, and can I have a ticket for it?"

pub mod booking;
pub mod config;
pub mod domain;
pub mod network;
pub mod planner;
pub mod ticket;
pub mod web;
