mod config;
mod convert;
mod outputs;
