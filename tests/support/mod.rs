#![allow(dead_code)]

pub mod fixtures;
pub mod petalmap_env;
