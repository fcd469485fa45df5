//! 登录页面
//!
//! 登录失败时错误由会话状态承载；当错误为邮箱未验证时
//! 额外展示重发验证邮件的入口（需要指定角色）。

use leptos::prelude::*;
use leptos::task::spawn_local;
use ringside_shared::{ERROR_EMAIL_NOT_VERIFIED, ERROR_UNAUTHORIZED, UserRole};

use crate::auth::{self, use_auth};
use crate::components::icons::ShieldCheck;
use crate::components::navbar::role_label;
use crate::web::route::redirect_param;
use crate::web::router::{current_search, use_router};

/// 把会话里的错误码翻译成可读文案
fn error_text(code: &str) -> String {
    match code {
        ERROR_EMAIL_NOT_VERIFIED => "邮箱尚未验证，请先完成邮箱验证。".to_string(),
        ERROR_UNAUTHORIZED => "邮箱或密码不正确。".to_string(),
        other => other.to_string(),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_auth();
    let router = use_router();
    let state = ctx.state;

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (local_error, set_local_error) = signal(Option::<String>::None);
    let (info_msg, set_info_msg) = signal(Option::<String>::None);
    let (resend_role, set_resend_role) = signal(UserRole::Fighter);

    // 本地校验错误优先于会话错误
    let error_msg = move || {
        local_error
            .get()
            .or_else(|| state.get().error.as_deref().map(error_text))
    };
    let needs_verification =
        move || state.get().error.as_deref() == Some(ERROR_EMAIL_NOT_VERIFIED);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if email.get().is_empty() || password.get().is_empty() {
            set_local_error.set(Some("请填写邮箱和密码".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_local_error.set(None);
        set_info_msg.set(None);

        spawn_local(async move {
            let result = auth::login(&ctx, email.get_untracked(), password.get_untracked()).await;
            if result.is_ok() {
                // 登录前被守卫拦下的目标优先，否则去角色面板
                match redirect_param(&current_search()) {
                    Some(target) => router.navigate(&target),
                    None => router.navigate_to_dashboard(),
                }
            }
            set_is_submitting.set(false);
        });
    };

    let on_resend = move |_| {
        set_is_submitting.set(true);
        set_info_msg.set(None);

        spawn_local(async move {
            let result = auth::resend_verification_email(
                &ctx,
                email.get_untracked(),
                resend_role.get_untracked(),
            )
            .await;
            if let Ok(res) = result {
                set_info_msg.set(Some(res.message));
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <ShieldCheck attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Ringside"</h1>
                        <p class="text-base-content/70">"登录以管理你的比赛与赛事"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg().unwrap_or_default()}</span>
                            </div>
                        </Show>
                        <Show when=move || info_msg.get().is_some()>
                            <div role="alert" class="alert alert-success text-sm py-2">
                                <span>{move || info_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"邮箱"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="you@example.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"密码"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>

                        // 邮箱未验证时的重发入口
                        <Show when=needs_verification>
                            <div class="bg-base-200 rounded-box p-3 mt-2 space-y-2">
                                <p class="text-sm text-base-content/70">
                                    "没收到验证邮件？选择注册时的角色重新发送："
                                </p>
                                <div class="flex gap-2">
                                    <select
                                        class="select select-bordered select-sm flex-1"
                                        on:change=move |ev| {
                                            if let Some(role) = UserRole::parse(&event_target_value(&ev)) {
                                                set_resend_role.set(role);
                                            }
                                        }
                                    >
                                        <option value="fighter" selected=move || resend_role.get() == UserRole::Fighter>
                                            {role_label(UserRole::Fighter)}
                                        </option>
                                        <option value="plo" selected=move || resend_role.get() == UserRole::Plo>
                                            {role_label(UserRole::Plo)}
                                        </option>
                                        <option value="spectator" selected=move || resend_role.get() == UserRole::Spectator>
                                            {role_label(UserRole::Spectator)}
                                        </option>
                                    </select>
                                    <button
                                        type="button"
                                        class="btn btn-sm btn-secondary"
                                        disabled=move || is_submitting.get()
                                        on:click=on_resend
                                    >
                                        "重发验证邮件"
                                    </button>
                                </div>
                            </div>
                        </Show>

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "登录中..." }.into_any()
                                } else {
                                    "登录".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2">
                            "还没有账号？"
                            <a
                                class="link link-primary"
                                on:click=move |_| router.navigate("/register")
                            >
                                "注册"
                            </a>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
