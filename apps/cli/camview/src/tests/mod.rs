mod cli;
mod error;
mod frames;
mod logger;
