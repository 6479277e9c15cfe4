mod common;
mod errors;
mod reports;
mod status;
