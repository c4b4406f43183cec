pub mod catalog;
pub mod config;
pub mod db;
pub mod http;
pub mod middleware;
pub mod repositories;
