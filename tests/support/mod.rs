#![allow(dead_code)]

mod catalog;

pub use catalog::{product, shop, Shop};
