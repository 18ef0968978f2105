mod config;
mod routes;
