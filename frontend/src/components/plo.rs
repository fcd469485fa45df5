//! PLO（赛事主办方）控制面板

use leptos::prelude::*;
use leptos::task::spawn_local;
use ringside_shared::models::{CreateEventRequest, Event, EventSlot, EventStatus};

use crate::auth::{api_client, use_auth};
use crate::components::icons::{CalendarDays, RefreshCw};
use crate::components::navbar::NavBar;
use crate::services::event;

fn event_status_label(status: EventStatus) -> &'static str {
    match status {
        EventStatus::Draft => "草稿",
        EventStatus::Published => "已发布",
        EventStatus::Completed => "已结束",
        EventStatus::Cancelled => "已取消",
    }
}

/// 创建赛事的折叠表单
#[component]
fn CreateEventForm<F>(
    /// 创建成功后的回调（用于刷新列表）
    on_created: F,
) -> impl IntoView
where
    F: Fn() + Copy + 'static,
{
    let ctx = use_auth();
    let auth_state = ctx.state;

    let (name, set_name) = signal(String::new());
    let (location, set_location) = signal(String::new());
    let (starts_at, set_starts_at) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (form_error, set_form_error) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        let loc = location.get();
        let req = CreateEventRequest::from_form(
            name.get(),
            if loc.is_empty() { None } else { Some(loc) },
            &starts_at.get(),
        );
        let Some(req) = req else {
            set_form_error.set(Some("请填写赛事名称和有效的开始时间".to_string()));
            return;
        };
        if req.name.is_empty() {
            set_form_error.set(Some("请填写赛事名称和有效的开始时间".to_string()));
            return;
        }

        let api = api_client(&auth_state.get_untracked());
        set_is_submitting.set(true);
        set_form_error.set(None);
        spawn_local(async move {
            match event::create_event(&api, &req).await {
                Ok(_) => {
                    set_name.set(String::new());
                    set_location.set(String::new());
                    set_starts_at.set(String::new());
                    on_created();
                }
                Err(e) => set_form_error.set(Some(format!("创建赛事失败: {}", e))),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="collapse collapse-arrow bg-base-100 shadow-xl">
            <input type="checkbox" />
            <div class="collapse-title text-lg font-medium">"创建新赛事"</div>
            <div class="collapse-content">
                <form class="space-y-3" on:submit=on_submit>
                    <Show when=move || form_error.get().is_some()>
                        <div role="alert" class="alert alert-error text-sm py-2">
                            <span>{move || form_error.get().unwrap_or_default()}</span>
                        </div>
                    </Show>
                    <div class="grid grid-cols-1 md:grid-cols-3 gap-3">
                        <input
                            type="text"
                            placeholder="赛事名称"
                            class="input input-bordered w-full"
                            on:input=move |ev| set_name.set(event_target_value(&ev))
                            prop:value=name
                            required
                        />
                        <input
                            type="text"
                            placeholder="地点（可选）"
                            class="input input-bordered w-full"
                            on:input=move |ev| set_location.set(event_target_value(&ev))
                            prop:value=location
                        />
                        <input
                            type="datetime-local"
                            class="input input-bordered w-full"
                            on:input=move |ev| set_starts_at.set(event_target_value(&ev))
                            prop:value=starts_at
                            required
                        />
                    </div>
                    <button class="btn btn-primary" disabled=move || is_submitting.get()>
                        {move || if is_submitting.get() {
                            view! { <span class="loading loading-spinner"></span> "创建中..." }.into_any()
                        } else {
                            "创建赛事".into_any()
                        }}
                    </button>
                </form>
            </div>
        </div>
    }
}

/// PLO 控制面板：名下赛事列表 + 创建入口
#[component]
pub fn PloDashboardPage() -> impl IntoView {
    let ctx = use_auth();
    let auth_state = ctx.state;

    let (events, set_events) = signal(Vec::<Event>::new());
    let (slots, set_slots) = signal(Vec::<EventSlot>::new());
    let (selected_event, set_selected_event) = signal(Option::<String>::None);
    let (loading, set_loading) = signal(true);
    let (loading_slots, set_loading_slots) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let load = move || {
        let api = api_client(&auth_state.get_untracked());
        set_loading.set(true);
        set_error_msg.set(None);
        spawn_local(async move {
            match event::owned_events(&api).await {
                Ok(data) => set_events.set(data),
                Err(e) => set_error_msg.set(Some(format!("加载赛事失败: {}", e))),
            }
            set_loading.set(false);
        });
    };

    let load_slots = move |event_id: String| {
        let api = api_client(&auth_state.get_untracked());
        set_selected_event.set(Some(event_id.clone()));
        set_loading_slots.set(true);
        spawn_local(async move {
            match event::available_slots(&api, &event_id).await {
                Ok(data) => set_slots.set(data),
                Err(e) => set_error_msg.set(Some(format!("加载比赛档位失败: {}", e))),
            }
            set_loading_slots.set(false);
        });
    };

    Effect::new(move |_| {
        if auth_state.get().is_authenticated() {
            load();
        }
    });

    let event_count = move || events.with(|list| list.len());

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                <NavBar title="主办方控制面板" />

                <Show when=move || error_msg.get().is_some()>
                    <div role="alert" class="alert alert-error shadow-lg">
                        <span>{move || error_msg.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                <CreateEventForm on_created=load />

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <div class="flex items-center justify-between p-6 pb-2">
                            <div>
                                <h3 class="card-title">
                                    <CalendarDays attr:class="h-5 w-5" /> "我的赛事"
                                </h3>
                                <p class="text-base-content/70 text-sm">
                                    "名下全部赛事。点击一场赛事查看空余的比赛档位。"
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
                                        <th class="hidden md:table-cell">"状态"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <Show when=move || event_count() == 0 && !loading.get()>
                                        <tr>
                                            <td colspan="4" class="text-center py-8 text-base-content/50">
                                                "还没有创建任何赛事。"
                                            </td>
                                        </tr>
                                    </Show>
                                    <Show when=move || loading.get() && event_count() == 0>
                                        <tr>
                                            <td colspan="4" class="text-center py-8 text-base-content/50">
                                                <span class="loading loading-spinner loading-md"></span> " 加载中..."
                                            </td>
                                        </tr>
                                    </Show>
                                    <For
                                        each=move || events.get()
                                        key=|e| e.id.clone()
                                        children=move |item| {
                                            let id = item.id.clone();
                                            let row_class = move || {
                                                if selected_event.get().as_deref() == Some(id.as_str()) {
                                                    "cursor-pointer bg-base-300"
                                                } else {
                                                    "cursor-pointer hover"
                                                }
                                            };
                                            let click_id = item.id.clone();
                                            view! {
                                                <tr
                                                    class=row_class
                                                    on:click=move |_| load_slots(click_id.clone())
                                                >
                                                    <td class="font-bold">{item.name.clone()}</td>
                                                    <td>{item.location.clone().unwrap_or_else(|| "待定".to_string())}</td>
                                                    <td>{item.starts_at.format("%Y-%m-%d %H:%M").to_string()}</td>
                                                    <td class="hidden md:table-cell">
                                                        <span class="badge badge-ghost">
                                                            {event_status_label(item.status)}
                                                        </span>
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

                // 选中赛事的空余档位
                <Show when=move || selected_event.get().is_some()>
                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body p-0">
                            <div class="p-6 pb-2">
                                <h3 class="card-title">"空余比赛档位"</h3>
                            </div>
                            <div class="overflow-x-auto w-full">
                                <table class="table w-full">
                                    <thead>
                                        <tr>
                                            <th>"位次"</th>
                                            <th>"体重级别"</th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        <Show when=move || loading_slots.get()>
                                            <tr>
                                                <td colspan="2" class="text-center py-8 text-base-content/50">
                                                    <span class="loading loading-spinner loading-md"></span>
                                                </td>
                                            </tr>
                                        </Show>
                                        <Show when=move || slots.with(|s| s.is_empty()) && !loading_slots.get()>
                                            <tr>
                                                <td colspan="2" class="text-center py-8 text-base-content/50">
                                                    "这场赛事没有空余档位。"
                                                </td>
                                            </tr>
                                        </Show>
                                        <For
                                            each=move || slots.get()
                                            key=|s| s.id.clone()
                                            children=move |slot| {
                                                view! {
                                                    <tr>
                                                        <td class="font-mono">{slot.position}</td>
                                                        <td>{slot.weight_class.clone().unwrap_or_else(|| "不限".to_string())}</td>
                                                    </tr>
                                                }
                                            }
                                        />
                                    </tbody>
                                </table>
                            </div>
                        </div>
                    </div>
                </Show>
            </div>
        </div>
    }
}
