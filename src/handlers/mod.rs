//! HTTP 处理器模块

pub mod auth;
pub mod feed;
pub mod health;
pub mod metrics;
