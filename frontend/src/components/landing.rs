//! 产品落地页
//!
//! 唯一对所有人开放的页面，已登录用户也可以访问。

use leptos::prelude::*;

use crate::auth::use_auth;
use crate::components::icons::{CalendarDays, Flame, Trophy, Users};
use crate::web::router::use_router;

#[component]
pub fn LandingPage() -> impl IntoView {
    let ctx = use_auth();
    let router = use_router();
    let state = ctx.state;

    let is_authenticated = move || state.get().is_authenticated();

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content text-center">
                <div class="max-w-2xl space-y-8">
                    <div class="flex flex-col items-center gap-3">
                        <div class="p-4 bg-primary/10 rounded-2xl text-primary">
                            <Flame attr:class="h-12 w-12" />
                        </div>
                        <h1 class="text-5xl font-bold">"Ringside"</h1>
                        <p class="text-lg text-base-content/70">
                            "连接拳手、赛事主办方与观众的格斗赛事平台。"
                        </p>
                    </div>

                    <div class="grid grid-cols-1 md:grid-cols-3 gap-4 text-left">
                        <div class="card bg-base-100 shadow">
                            <div class="card-body">
                                <Trophy attr:class="h-6 w-6 text-primary" />
                                <h3 class="card-title text-base">"拳手"</h3>
                                <p class="text-sm text-base-content/70">
                                    "寻找对手、发起约战、接受赛事报价。"
                                </p>
                            </div>
                        </div>
                        <div class="card bg-base-100 shadow">
                            <div class="card-body">
                                <CalendarDays attr:class="h-6 w-6 text-primary" />
                                <h3 class="card-title text-base">"赛事主办方"</h3>
                                <p class="text-sm text-base-content/70">
                                    "创建赛事、为比赛档位邀约拳手。"
                                </p>
                            </div>
                        </div>
                        <div class="card bg-base-100 shadow">
                            <div class="card-body">
                                <Users attr:class="h-6 w-6 text-primary" />
                                <h3 class="card-title text-base">"观众"</h3>
                                <p class="text-sm text-base-content/70">
                                    "浏览即将举行的赛事，不错过任何一场对决。"
                                </p>
                            </div>
                        </div>
                    </div>

                    <div class="flex justify-center gap-3">
                        <Show
                            when=is_authenticated
                            fallback=move || view! {
                                <button
                                    class="btn btn-primary"
                                    on:click=move |_| router.navigate("/login")
                                >
                                    "登录"
                                </button>
                                <button
                                    class="btn btn-outline"
                                    on:click=move |_| router.navigate("/register")
                                >
                                    "注册"
                                </button>
                            }
                        >
                            <button
                                class="btn btn-primary"
                                on:click=move |_| router.navigate_to_dashboard()
                            >
                                "进入控制面板"
                            </button>
                        </Show>
                    </div>
                </div>
            </div>
        </div>
    }
}
