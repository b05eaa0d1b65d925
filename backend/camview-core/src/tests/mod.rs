mod api;
mod config;
mod frame;
mod role;
mod scripted;
mod shell;
mod stream_url;
mod token_store;
