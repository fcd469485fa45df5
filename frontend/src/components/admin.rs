//! 管理员控制面板：拳手身份核验审核

use leptos::prelude::*;
use leptos::task::spawn_local;
use ringside_shared::models::{FighterVerification, VerificationStatus};

use crate::auth::{api_client, use_auth};
use crate::components::icons::{RefreshCw, ShieldCheck};
use crate::components::navbar::NavBar;
use crate::services::admin;

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let ctx = use_auth();
    let auth_state = ctx.state;

    let (pending, set_pending) = signal(Vec::<FighterVerification>::new());
    let (loading, set_loading) = signal(true);
    let (notification, set_notification) = signal(Option::<(String, bool)>::None); // 消息内容, 是否出错

    let load = move || {
        let api = api_client(&auth_state.get_untracked());
        set_loading.set(true);
        spawn_local(async move {
            match admin::pending_verifications(&api).await {
                Ok(data) => set_pending.set(data),
                Err(e) => set_notification.set(Some((format!("加载审核队列失败: {}", e), true))),
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        if auth_state.get().is_authenticated() {
            load();
        }
    });

    let review = move |id: String, status: VerificationStatus| {
        let api = api_client(&auth_state.get_untracked());
        spawn_local(async move {
            match admin::review_verification(&api, &id, status, None).await {
                Ok(_) => {
                    let text = match status {
                        VerificationStatus::Accepted => "已通过核验",
                        _ => "已驳回核验",
                    };
                    set_notification.set(Some((text.to_string(), false)));
                    set_pending.update(|list| list.retain(|v| v.id != id));
                }
                Err(e) => set_notification.set(Some((format!("审核操作失败: {}", e), true))),
            }
        });
    };

    // 3秒后清除通知
    Effect::new(move |_| {
        if notification.get().is_some() {
            set_timeout(
                move || set_notification.set(None),
                std::time::Duration::from_secs(3),
            );
        }
    });

    let pending_count = move || pending.with(|p| p.len());

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                <Show when=move || notification.get().is_some()>
                    <div class="toast toast-top toast-end z-50">
                        <div class=move || {
                            let (_, is_err) = notification.get().unwrap_or_default();
                            if is_err {
                                "alert alert-error shadow-lg"
                            } else {
                                "alert alert-success shadow-lg"
                            }
                        }>
                            <span>{move || notification.get().unwrap_or_default().0}</span>
                        </div>
                    </div>
                </Show>

                <NavBar title="管理员控制面板" />

                <div class="stats shadow w-full bg-base-100">
                    <div class="stat">
                        <div class="stat-figure text-primary">
                            <ShieldCheck attr:class="h-8 w-8" />
                        </div>
                        <div class="stat-title">"待审核的核验申请"</div>
                        <div class="stat-value text-primary">{pending_count}</div>
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <div class="flex items-center justify-between p-6 pb-2">
                            <div>
                                <h3 class="card-title">"核验队列"</h3>
                                <p class="text-base-content/70 text-sm">
                                    "拳手提交的身份核验申请，按提交时间排序。"
                                </p>
                            </div>
                            <button
                                on:click=move |_| load()
                                disabled=move || loading.get()
                                class="btn btn-ghost btn-circle"
                            >
                                <RefreshCw attr:class=move || {
                                    if loading.get() { "h-5 w-5 animate-spin" } else { "h-5 w-5" }
                                } />
                            </button>
                        </div>

                        <div class="overflow-x-auto w-full">
                            <table class="table table-zebra w-full">
                                <thead>
                                    <tr>
                                        <th>"拳手"</th>
                                        <th>"提交时间"</th>
                                        <th></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <Show when=move || pending_count() == 0 && !loading.get()>
                                        <tr>
                                            <td colspan="3" class="text-center py-8 text-base-content/50">
                                                "审核队列是空的。"
                                            </td>
                                        </tr>
                                    </Show>
                                    <Show when=move || loading.get() && pending_count() == 0>
                                        <tr>
                                            <td colspan="3" class="text-center py-8 text-base-content/50">
                                                <span class="loading loading-spinner loading-md"></span> " 加载中..."
                                            </td>
                                        </tr>
                                    </Show>
                                    <For
                                        each=move || pending.get()
                                        key=|v| v.id.clone()
                                        children=move |item| {
                                            let accept_id = item.id.clone();
                                            let reject_id = item.id.clone();
                                            view! {
                                                <tr>
                                                    <td class="font-mono text-sm">{item.fighter_id.clone()}</td>
                                                    <td>
                                                        {item.submitted_at.format("%Y-%m-%d %H:%M").to_string()}
                                                    </td>
                                                    <td class="text-right space-x-2">
                                                        <button
                                                            class="btn btn-success btn-sm"
                                                            on:click=move |_| review(
                                                                accept_id.clone(),
                                                                VerificationStatus::Accepted,
                                                            )
                                                        >
                                                            "通过"
                                                        </button>
                                                        <button
                                                            class="btn btn-error btn-sm btn-outline"
                                                            on:click=move |_| review(
                                                                reject_id.clone(),
                                                                VerificationStatus::Rejected,
                                                            )
                                                        >
                                                            "驳回"
                                                        </button>
                                                    </td>
                                                </tr>
                                            }
                                        }
                                    />
                                </tbody>
                            </table>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}
