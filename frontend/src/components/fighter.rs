//! 拳手控制面板与约战页面

use leptos::prelude::*;
use leptos::task::spawn_local;
use ringside_shared::models::{
    Fighter, FighterVerification, FightRequest, FightRequestStatus, Offer, OfferStatus,
    VerificationStatus,
};

use crate::auth::{api_client, use_auth};
use crate::components::icons::{RefreshCw, Trophy, Users};
use crate::components::navbar::NavBar;
use crate::services::{fight, fighter, offer};
use crate::web::router::use_router;

fn verification_label(status: VerificationStatus) -> &'static str {
    match status {
        VerificationStatus::Pending => "审核中",
        VerificationStatus::Accepted => "已认证",
        VerificationStatus::Rejected => "已驳回",
    }
}

fn fight_status_label(status: FightRequestStatus) -> &'static str {
    match status {
        FightRequestStatus::Pending => "等待回应",
        FightRequestStatus::Accepted => "已接受",
        FightRequestStatus::Rejected => "已拒绝",
    }
}

fn offer_status_label(status: OfferStatus) -> &'static str {
    match status {
        OfferStatus::Pending => "待处理",
        OfferStatus::Accepted => "已接受",
        OfferStatus::Rejected => "已拒绝",
        OfferStatus::Withdrawn => "已撤回",
    }
}

/// 拳手控制面板：档案战绩 + 可约战的对手列表
#[component]
pub fn FighterDashboardPage() -> impl IntoView {
    let ctx = use_auth();
    let router = use_router();
    let auth_state = ctx.state;

    let (profile, set_profile) = signal(Option::<Fighter>::None);
    let (opponents, set_opponents) = signal(Vec::<Fighter>::new());
    let (verifications, set_verifications) = signal(Vec::<FighterVerification>::new());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let load = move || {
        let api = api_client(&auth_state.get_untracked());
        set_loading.set(true);
        set_error_msg.set(None);
        spawn_local(async move {
            match fighter::profile(&api).await {
                Ok(data) => set_profile.set(Some(data)),
                Err(e) => set_error_msg.set(Some(format!("加载档案失败: {}", e))),
            }
            match fighter::possible_opponents(&api).await {
                Ok(data) => set_opponents.set(data),
                Err(e) => set_error_msg.set(Some(format!("加载对手列表失败: {}", e))),
            }
            match fighter::verifications(&api).await {
                Ok(data) => set_verifications.set(data),
                Err(e) => set_error_msg.set(Some(format!("加载核验记录失败: {}", e))),
            }
            set_loading.set(false);
        });
    };

    // 初始加载
    Effect::new(move |_| {
        if auth_state.get().is_authenticated() {
            load();
        }
    });

    let opponent_count = move || opponents.with(|list| list.len());

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                <NavBar title="拳手控制面板" />

                <Show when=move || error_msg.get().is_some()>
                    <div role="alert" class="alert alert-error shadow-lg">
                        <span>{move || error_msg.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                    <div class="stat">
                        <div class="stat-figure text-primary">
                            <Trophy attr:class="h-8 w-8" />
                        </div>
                        <div class="stat-title">"战绩 (胜-负-平)"</div>
                        <div class="stat-value text-primary">
                            {move || profile.get().map(|p| p.record()).unwrap_or_else(|| "-".to_string())}
                        </div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">"体重级别"</div>
                        <div class="stat-value text-2xl">
                            {move || {
                                profile
                                    .get()
                                    .and_then(|p| p.weight_class)
                                    .unwrap_or_else(|| "未设置".to_string())
                            }}
                        </div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">"认证状态"</div>
                        <div class="stat-value text-secondary text-2xl">
                            {move || {
                                profile
                                    .get()
                                    .map(|p| verification_label(p.verification_status))
                                    .unwrap_or("-")
                            }}
                        </div>
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <div class="flex items-center justify-between p-6 pb-2">
                            <div>
                                <h3 class="card-title">
                                    <Users attr:class="h-5 w-5" /> "可约战的对手"
                                </h3>
                                <p class="text-base-content/70 text-sm">
                                    "按体重级别与认证状态筛选的候选对手。"
                                </p>
                            </div>
                            <div class="flex gap-2">
                                <button
                                    class="btn btn-ghost"
                                    on:click=move |_| router.navigate("/fighter/fights")
                                >
                                    "我的约战"
                                </button>
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
                        </div>

                        <div class="overflow-x-auto w-full">
                            <table class="table table-zebra w-full">
                                <thead>
                                    <tr>
                                        <th>"姓名"</th>
                                        <th>"体重级别"</th>
                                        <th>"战绩"</th>
                                        <th class="hidden md:table-cell">"认证状态"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <Show when=move || opponent_count() == 0 && !loading.get()>
                                        <tr>
                                            <td colspan="4" class="text-center py-8 text-base-content/50">
                                                "暂时没有可约战的对手。"
                                            </td>
                                        </tr>
                                    </Show>
                                    <Show when=move || loading.get() && opponent_count() == 0>
                                        <tr>
                                            <td colspan="4" class="text-center py-8 text-base-content/50">
                                                <span class="loading loading-spinner loading-md"></span> " 加载中..."
                                            </td>
                                        </tr>
                                    </Show>
                                    <For
                                        each=move || opponents.get()
                                        key=|f| f.id.clone()
                                        children=move |opponent| {
                                            view! {
                                                <tr>
                                                    <td class="font-bold">
                                                        {opponent.name.clone().unwrap_or_else(|| "（未命名）".to_string())}
                                                    </td>
                                                    <td>{opponent.weight_class.clone().unwrap_or_default()}</td>
                                                    <td class="font-mono">{opponent.record()}</td>
                                                    <td class="hidden md:table-cell">
                                                        <span class="badge badge-ghost">
                                                            {verification_label(opponent.verification_status)}
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

                // 身份核验历史
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <div class="p-6 pb-2">
                            <h3 class="card-title">"核验记录"</h3>
                            <p class="text-base-content/70 text-sm">
                                "提交过的身份核验申请与审核结果。"
                            </p>
                        </div>
                        <div class="overflow-x-auto w-full">
                            <table class="table w-full">
                                <thead>
                                    <tr>
                                        <th>"提交时间"</th>
                                        <th>"状态"</th>
                                        <th class="hidden md:table-cell">"审核备注"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <Show when=move || verifications.with(|v| v.is_empty()) && !loading.get()>
                                        <tr>
                                            <td colspan="3" class="text-center py-8 text-base-content/50">
                                                "还没有提交过核验申请。"
                                            </td>
                                        </tr>
                                    </Show>
                                    <For
                                        each=move || verifications.get()
                                        key=|v| v.id.clone()
                                        children=move |item| {
                                            view! {
                                                <tr>
                                                    <td>
                                                        {item.submitted_at.format("%Y-%m-%d %H:%M").to_string()}
                                                    </td>
                                                    <td>
                                                        <span class="badge badge-ghost">
                                                            {verification_label(item.status)}
                                                        </span>
                                                    </td>
                                                    <td class="hidden md:table-cell text-base-content/70">
                                                        {item.admin_note.clone().unwrap_or_default()}
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

/// 拳手的约战请求与对应报价
///
/// 点击一条约战记录加载它收到的报价。
#[component]
pub fn FighterFightsPage() -> impl IntoView {
    let ctx = use_auth();
    let router = use_router();
    let auth_state = ctx.state;

    let (fights, set_fights) = signal(Vec::<FightRequest>::new());
    let (offers, set_offers) = signal(Vec::<Offer>::new());
    let (selected_fight, set_selected_fight) = signal(Option::<String>::None);
    let (loading, set_loading) = signal(true);
    let (loading_offers, set_loading_offers) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let load_fights = move || {
        let api = api_client(&auth_state.get_untracked());
        set_loading.set(true);
        set_error_msg.set(None);
        spawn_local(async move {
            match fight::requested_fights(&api).await {
                Ok(data) => set_fights.set(data),
                Err(e) => set_error_msg.set(Some(format!("加载约战失败: {}", e))),
            }
            set_loading.set(false);
        });
    };

    let load_offers = move |fight_id: String| {
        let api = api_client(&auth_state.get_untracked());
        set_selected_fight.set(Some(fight_id.clone()));
        set_loading_offers.set(true);
        spawn_local(async move {
            match offer::available_offers_for_fight(&api, &fight_id).await {
                Ok(data) => set_offers.set(data),
                Err(e) => set_error_msg.set(Some(format!("加载报价失败: {}", e))),
            }
            set_loading_offers.set(false);
        });
    };

    Effect::new(move |_| {
        if auth_state.get().is_authenticated() {
            load_fights();
        }
    });

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                <NavBar title="我的约战" />

                <Show when=move || error_msg.get().is_some()>
                    <div role="alert" class="alert alert-error shadow-lg">
                        <span>{move || error_msg.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <div class="flex items-center justify-between p-6 pb-2">
                            <div>
                                <h3 class="card-title">"约战请求"</h3>
                                <p class="text-base-content/70 text-sm">
                                    "点击一条记录查看它收到的赛事报价。"
                                </p>
                            </div>
                            <div class="flex gap-2">
                                <button
                                    class="btn btn-ghost"
                                    on:click=move |_| router.navigate("/fighter/dashboard")
                                >
                                    "返回面板"
                                </button>
                                <button
                                    on:click=move |_| load_fights()
                                    disabled=move || loading.get()
                                    class="btn btn-ghost btn-circle"
                                >
                                    <RefreshCw attr:class=move || {
                                        if loading.get() { "h-5 w-5 animate-spin" } else { "h-5 w-5" }
                                    } />
                                </button>
                            </div>
                        </div>

                        <div class="overflow-x-auto w-full">
                            <table class="table table-zebra w-full">
                                <thead>
                                    <tr>
                                        <th>"挑战方"</th>
                                        <th>"应战方"</th>
                                        <th>"状态"</th>
                                        <th class="hidden md:table-cell">"发起时间"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <Show when=move || fights.with(|f| f.is_empty()) && !loading.get()>
                                        <tr>
                                            <td colspan="4" class="text-center py-8 text-base-content/50">
                                                "还没有约战记录。"
                                            </td>
                                        </tr>
                                    </Show>
                                    <For
                                        each=move || fights.get()
                                        key=|f| f.id.clone()
                                        children=move |fight| {
                                            let id = fight.id.clone();
                                            let row_class = move || {
                                                if selected_fight.get().as_deref() == Some(id.as_str()) {
                                                    "cursor-pointer bg-base-300"
                                                } else {
                                                    "cursor-pointer hover"
                                                }
                                            };
                                            let click_id = fight.id.clone();
                                            view! {
                                                <tr
                                                    class=row_class
                                                    on:click=move |_| load_offers(click_id.clone())
                                                >
                                                    <td class="font-mono text-sm">{fight.challenger_id.clone()}</td>
                                                    <td class="font-mono text-sm">{fight.opponent_id.clone()}</td>
                                                    <td>
                                                        <span class="badge badge-ghost">
                                                            {fight_status_label(fight.status)}
                                                        </span>
                                                    </td>
                                                    <td class="hidden md:table-cell">
                                                        {fight.created_at.format("%Y-%m-%d %H:%M").to_string()}
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

                // 选中比赛的报价列表
                <Show when=move || selected_fight.get().is_some()>
                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body p-0">
                            <div class="p-6 pb-2">
                                <h3 class="card-title">"收到的报价"</h3>
                            </div>
                            <div class="overflow-x-auto w-full">
                                <table class="table w-full">
                                    <thead>
                                        <tr>
                                            <th>"赛事"</th>
                                            <th>"出场费"</th>
                                            <th>"状态"</th>
                                            <th class="hidden md:table-cell">"报价时间"</th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        <Show when=move || loading_offers.get()>
                                            <tr>
                                                <td colspan="4" class="text-center py-8 text-base-content/50">
                                                    <span class="loading loading-spinner loading-md"></span>
                                                </td>
                                            </tr>
                                        </Show>
                                        <Show when=move || offers.with(|o| o.is_empty()) && !loading_offers.get()>
                                            <tr>
                                                <td colspan="4" class="text-center py-8 text-base-content/50">
                                                    "这场比赛还没有收到报价。"
                                                </td>
                                            </tr>
                                        </Show>
                                        <For
                                            each=move || offers.get()
                                            key=|o| o.id.clone()
                                            children=move |offer| {
                                                view! {
                                                    <tr>
                                                        <td class="font-mono text-sm">{offer.event_id.clone()}</td>
                                                        <td>
                                                            {offer
                                                                .purse_amount
                                                                .map(|amount| format!("${:.2}", amount))
                                                                .unwrap_or_else(|| "未披露".to_string())}
                                                        </td>
                                                        <td>
                                                            <span class="badge badge-ghost">
                                                                {offer_status_label(offer.status)}
                                                            </span>
                                                        </td>
                                                        <td class="hidden md:table-cell">
                                                            {offer.created_at.format("%Y-%m-%d %H:%M").to_string()}
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
                </Show>
            </div>
        </div>
    }
}
