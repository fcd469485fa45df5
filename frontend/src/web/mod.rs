//! 原生 Web API 封装模块
//!
//! 此模块提供对浏览器原生 API 的轻量级封装：
//! 路由（History API）与本地存储。
//! HTTP 请求走 `crate::api` 的 gloo-net 客户端。

pub mod route;
pub mod router;
mod storage;

pub use storage::LocalStorage;
