//! 观众赛事列表页面

use leptos::prelude::*;
use leptos::task::spawn_local;
use ringside_shared::models::Event;

use crate::auth::{api_client, use_auth};
use crate::components::icons::{CalendarDays, RefreshCw};
use crate::components::navbar::NavBar;
use crate::services::event;

/// 即将举行的已发布赛事
#[component]
pub fn SpectatorEventsPage() -> impl IntoView {
    let ctx = use_auth();
    let auth_state = ctx.state;

    let (events, set_events) = signal(Vec::<Event>::new());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let load = move || {
        let api = api_client(&auth_state.get_untracked());
        set_loading.set(true);
        set_error_msg.set(None);
        spawn_local(async move {
            match event::upcoming_events(&api).await {
                Ok(data) => set_events.set(data),
                Err(e) => set_error_msg.set(Some(format!("加载赛事失败: {}", e))),
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        if auth_state.get().is_authenticated() {
            load();
        }
    });

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                <NavBar title="赛事日历" />

                <Show when=move || error_msg.get().is_some()>
                    <div role="alert" class="alert alert-error shadow-lg">
                        <span>{move || error_msg.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <div class="flex items-center justify-between p-6 pb-2">
                            <div>
                                <h3 class="card-title">
                                    <CalendarDays attr:class="h-5 w-5" /> "即将举行的赛事"
                                </h3>
                                <p class="text-base-content/70 text-sm">
                                    "所有已发布、尚未开始的赛事。"
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
                                        <th>"名称"</th>
                                        <th>"地点"</th>
                                        <th>"开始时间"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <Show when=move || events.with(|e| e.is_empty()) && !loading.get()>
                                        <tr>
                                            <td colspan="3" class="text-center py-8 text-base-content/50">
                                                "近期没有安排赛事。"
                                            </td>
                                        </tr>
                                    </Show>
                                    <Show when=move || loading.get() && events.with(|e| e.is_empty())>
                                        <tr>
                                            <td colspan="3" class="text-center py-8 text-base-content/50">
                                                <span class="loading loading-spinner loading-md"></span> " 加载中..."
                                            </td>
                                        </tr>
                                    </Show>
                                    <For
                                        each=move || events.get()
                                        key=|e| e.id.clone()
                                        children=move |item| {
                                            view! {
                                                <tr>
                                                    <td class="font-bold">{item.name.clone()}</td>
                                                    <td>{item.location.clone().unwrap_or_else(|| "待定".to_string())}</td>
                                                    <td>{item.starts_at.format("%Y-%m-%d %H:%M").to_string()}</td>
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
