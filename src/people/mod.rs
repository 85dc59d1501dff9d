//! The people import application.
//!
//! Reads `first name,last name` lines, uppercases both names and inserts the
//! result into the `people` table. Jobs are assembled explicitly in
//! [`jobs::launch`] from a [`config::BatchConfig`].

pub mod config;

pub mod jobs;

pub mod listener;

pub mod processor;

pub mod records;

pub mod store;

pub mod tasklet;
