//! Fuel station finder server.
//!
//! A web application that answers: "where is the nearest fuel station
//! I can actually drive to?" Candidates come from OpenStreetMap via the
//! Overpass API and are ranked by OSRM driving distance.

pub mod config;
pub mod discovery;
pub mod domain;
pub mod location;
pub mod osrm;
pub mod overpass;
pub mod session;
pub mod web;
