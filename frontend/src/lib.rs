//! Ringside 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `session`: 多角色会话状态机（纯逻辑，不依赖 DOM）
//! - `auth`: 会话状态的响应式外壳
//! - `web::route` / `web::router`: 路由定义与路由服务
//! - `services`: 按资源划分的 REST API 封装
//! - `components`: UI 组件层

mod api;
mod auth;
mod components {
    pub mod admin;
    pub mod fighter;
    mod icons;
    pub mod landing;
    pub mod login;
    pub mod navbar;
    pub mod plo;
    pub mod register;
    pub mod spectator;
}
mod services;
mod session;
pub(crate) mod web;

use leptos::prelude::*;

use crate::auth::{AuthContext, init_auth};
use crate::components::admin::AdminDashboardPage;
use crate::components::fighter::{FighterDashboardPage, FighterFightsPage};
use crate::components::landing::LandingPage;
use crate::components::login::LoginPage;
use crate::components::plo::PloDashboardPage;
use crate::components::register::RegisterPage;
use crate::components::spectator::SpectatorEventsPage;
use crate::web::route::AppRoute;
use crate::web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Landing => view! { <LandingPage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::FighterDashboard => view! { <FighterDashboardPage /> }.into_any(),
        AppRoute::FighterFights => view! { <FighterFightsPage /> }.into_any(),
        AppRoute::PloDashboard => view! { <PloDashboardPage /> }.into_any(),
        AppRoute::SpectatorEvents => view! { <SpectatorEventsPage /> }.into_any(),
        AppRoute::AdminDashboard => view! { <AdminDashboardPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"页面未找到"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证上下文
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // 2. 初始化认证状态（从 LocalStorage 恢复会话，幂等）
    init_auth(&auth_ctx);

    // 3. 获取认证/角色信号，用于注入路由服务（解耦！）
    let is_authenticated = auth_ctx.is_authenticated_signal();
    let user_role = auth_ctx.user_role_signal();

    view! {
        // 4. 路由器组件：注入认证与角色信号实现守卫
        <Router is_authenticated=is_authenticated user_role=user_role>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
