//! 注册页面
//!
//! 注册成功不建立会话，只提示去邮箱完成验证。

use leptos::prelude::*;
use leptos::task::spawn_local;
use ringside_shared::{RegisterRequest, UserRole};

use crate::auth::{self, use_auth};
use crate::components::icons::ShieldCheck;
use crate::components::navbar::role_label;
use crate::web::router::use_router;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let ctx = use_auth();
    let router = use_router();
    let state = ctx.state;

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (role, set_role) = signal(UserRole::Fighter);
    let (is_submitting, set_is_submitting) = signal(false);
    let (local_error, set_local_error) = signal(Option::<String>::None);
    let (success_msg, set_success_msg) = signal(Option::<String>::None);

    let error_msg = move || local_error.get().or_else(|| state.get().error.clone());

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if email.get().is_empty() || password.get().is_empty() {
            set_local_error.set(Some("请填写邮箱和密码".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_local_error.set(None);
        set_success_msg.set(None);

        spawn_local(async move {
            let req = RegisterRequest {
                email: email.get_untracked(),
                password: password.get_untracked(),
                role: role.get_untracked(),
            };
            if let Ok(res) = auth::register(&ctx, req).await {
                set_success_msg.set(Some(format!(
                    "注册成功，验证邮件已发送至 {}，请完成验证后登录。",
                    res.email
                )));
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
                        <h1 class="text-3xl font-bold">"创建账号"</h1>
                        <p class="text-base-content/70">"选择你的角色，开始使用 Ringside"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg().unwrap_or_default()}</span>
                            </div>
                        </Show>
                        <Show when=move || success_msg.get().is_some()>
                            <div role="alert" class="alert alert-success text-sm py-2">
                                <span>{move || success_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="reg-email">
                                <span class="label-text">"邮箱"</span>
                            </label>
                            <input
                                id="reg-email"
                                type="email"
                                placeholder="you@example.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="reg-password">
                                <span class="label-text">"密码"</span>
                            </label>
                            <input
                                id="reg-password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="reg-role">
                                <span class="label-text">"角色"</span>
                            </label>
                            <select
                                id="reg-role"
                                class="select select-bordered"
                                on:change=move |ev| {
                                    if let Some(r) = UserRole::parse(&event_target_value(&ev)) {
                                        set_role.set(r);
                                    }
                                }
                            >
                                <option value="fighter" selected=move || role.get() == UserRole::Fighter>
                                    {role_label(UserRole::Fighter)}
                                </option>
                                <option value="plo" selected=move || role.get() == UserRole::Plo>
                                    {role_label(UserRole::Plo)}
                                </option>
                                <option value="spectator" selected=move || role.get() == UserRole::Spectator>
                                    {role_label(UserRole::Spectator)}
                                </option>
                            </select>
                        </div>

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "提交中..." }.into_any()
                                } else {
                                    "注册".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2">
                            "已有账号？"
                            <a class="link link-primary" on:click=move |_| router.navigate("/login")>
                                "登录"
                            </a>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
