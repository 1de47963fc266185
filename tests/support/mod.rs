#![allow(dead_code)]

pub mod port;
