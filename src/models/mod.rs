//! 数据模型模块
//! 用户、帖子以及各端点的请求/响应结构

pub mod auth;
pub mod post;
pub mod user;
