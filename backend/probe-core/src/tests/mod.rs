mod builder;
mod config;
mod jwt;
mod models;
