pub mod cli;
pub mod db;
pub mod error;
pub mod form;
pub mod models;
pub mod output;
