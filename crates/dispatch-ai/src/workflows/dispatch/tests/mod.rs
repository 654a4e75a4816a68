mod common;
mod policy;
mod service;
