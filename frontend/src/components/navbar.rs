//! 顶部导航栏与角色切换器
//!
//! 所有已登录页面共用。角色切换是纯本地操作：
//! 切换成功后导航到新角色对应的控制面板。

use leptos::prelude::*;
use ringside_shared::UserRole;

use crate::auth::{self, use_auth};
use crate::components::icons::{ChevronDown, Flame, LogOut};
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// 角色的界面展示名
pub fn role_label(role: UserRole) -> &'static str {
    match role {
        UserRole::Fighter => "拳手",
        UserRole::Plo => "赛事主办方",
        UserRole::Spectator => "观众",
        UserRole::Admin => "管理员",
    }
}

/// 多角色会话的切换下拉框
///
/// 只有一个角色时不渲染。
#[component]
pub fn RoleSwitcher() -> impl IntoView {
    let ctx = use_auth();
    let router = use_router();
    let state = ctx.state;

    view! {
        <Show when=move || state.get().has_multiple_roles()>
            <div class="dropdown dropdown-end">
                <div tabindex="0" role="button" class="btn btn-ghost gap-1">
                    {move || state.get().user_role().map(role_label).unwrap_or("")}
                    <ChevronDown attr:class="h-4 w-4" />
                </div>
                <ul tabindex="0" class="dropdown-content menu bg-base-100 rounded-box z-10 w-44 p-2 shadow">
                    <For
                        each=move || {
                            state.get().available_roles.iter().map(|(role, _)| *role).collect::<Vec<_>>()
                        }
                        key=|role| role.as_str()
                        children=move |role| {
                            let is_active = move || state.get().user_role() == Some(role);
                            view! {
                                <li>
                                    <a
                                        class=move || if is_active() { "active" } else { "" }
                                        on:click=move |_| {
                                            if auth::switch_role(&ctx, role) {
                                                router.navigate(AppRoute::dashboard_for(Some(role)).to_path());
                                            }
                                        }
                                    >
                                        {role_label(role)}
                                    </a>
                                </li>
                            }
                        }
                    />
                </ul>
            </div>
        </Show>
    }
}

/// 已登录页面的公共导航栏
#[component]
pub fn NavBar(
    /// 页面标题
    #[prop(into)]
    title: String,
) -> impl IntoView {
    let ctx = use_auth();
    let state = ctx.state;

    // 注销后的跳转由路由服务的认证状态监听接管
    let on_logout = move |_| {
        auth::logout(&ctx);
    };

    view! {
        <div class="navbar bg-base-100 rounded-box shadow-xl">
            <div class="flex-1 gap-2">
                <Flame attr:class="text-primary h-6 w-6" />
                <a class="btn btn-ghost text-xl">{title}</a>
                <span class="badge badge-neutral hidden md:inline-flex">
                    {move || state.get().user.map(|u| u.email).unwrap_or_default()}
                </span>
            </div>
            <div class="flex-none gap-2">
                <RoleSwitcher />
                <button on:click=on_logout class="btn btn-outline btn-error gap-2">
                    <LogOut attr:class="h-4 w-4" /> "注销"
                </button>
            </div>
        </div>
    }
}
