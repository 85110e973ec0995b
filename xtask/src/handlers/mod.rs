pub mod build_info;
pub mod testing;
pub mod web;
