#![allow(dead_code)]

pub mod feed_server;
pub mod services;
