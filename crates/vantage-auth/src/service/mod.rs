// Permission evaluation services

pub mod menu;
pub mod permission;
