//! 领域服务层
//!
//! 每个资源一个模块，把资源操作一对一映射到 HTTP 调用。
//! 这里没有任何业务逻辑，校验与流程全部在服务端。

pub mod admin;
pub mod auth;
pub mod event;
pub mod fight;
pub mod fighter;
pub mod offer;
