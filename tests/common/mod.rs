#![allow(dead_code)]

pub mod cdx_server;
