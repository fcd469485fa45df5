use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;
use ringside_shared::{
    ERROR_EMAIL_NOT_VERIFIED, ERROR_UNAUTHORIZED, LoginRequest, LoginResponse, MessageResponse,
    RegisterRequest, RegisterResponse, ResendVerificationRequest, STORAGE_ROLES_KEY,
    STORAGE_TOKEN_KEY, STORAGE_USER_KEY, User, UserRole,
};

use super::*;
use crate::api::ApiError;

// =========================================================
// Shared Mock Components
// =========================================================

/// Per-role outcome of a scripted login attempt
#[derive(Clone, Copy)]
enum LoginScript {
    Success,
    NotVerified,
    WrongPassword,
    NetworkDown,
}

struct TestContext {
    /// Operation log to verify calling order and side effects
    log: RefCell<Vec<String>>,
    /// In-memory key-value storage
    storage: RefCell<HashMap<String, String>>,
    /// Scripted outcome per role (missing entry = WrongPassword)
    login_script: RefCell<HashMap<UserRole, LoginScript>>,
    fail_register: RefCell<bool>,
    fail_resend: RefCell<bool>,
}

impl TestContext {
    fn new() -> Rc<Self> {
        Rc::new(Self {
            log: RefCell::new(Vec::new()),
            storage: RefCell::new(HashMap::new()),
            login_script: RefCell::new(HashMap::new()),
            fail_register: RefCell::new(false),
            fail_resend: RefCell::new(false),
        })
    }

    fn push_log(&self, msg: String) {
        self.log.borrow_mut().push(msg);
    }

    fn script(&self, role: UserRole, outcome: LoginScript) {
        self.login_script.borrow_mut().insert(role, outcome);
    }

    fn storage_writes(&self) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|entry| entry.starts_with("storage:set"))
            .count()
    }
}

struct TestStorage {
    ctx: Rc<TestContext>,
}

impl SessionStorageAdapter for TestStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.ctx.storage.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.ctx.push_log(format!("storage:set:{}", key));
        self.ctx
            .storage
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn delete(&self, key: &str) -> bool {
        self.ctx.push_log(format!("storage:delete:{}", key));
        self.ctx.storage.borrow_mut().remove(key).is_some()
    }
}

struct TestAuthApi {
    ctx: Rc<TestContext>,
}

#[async_trait(?Send)]
impl AuthApiAdapter for TestAuthApi {
    async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.ctx.push_log(format!("api:login:{}", req.role));

        let script = self
            .ctx
            .login_script
            .borrow()
            .get(&req.role)
            .copied()
            .unwrap_or(LoginScript::WrongPassword);

        match script {
            LoginScript::Success => Ok(LoginResponse {
                user: user_for(req.role),
                token: token_for(req.role),
            }),
            LoginScript::NotVerified => Err(ApiError::Api {
                status: 403,
                error: ERROR_EMAIL_NOT_VERIFIED.to_string(),
            }),
            LoginScript::WrongPassword => Err(ApiError::Api {
                status: 401,
                error: "invalid_credentials".to_string(),
            }),
            LoginScript::NetworkDown => Err(ApiError::Network("connection refused".to_string())),
        }
    }

    async fn register(&self, req: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
        self.ctx.push_log(format!("api:register:{}", req.role));

        if *self.ctx.fail_register.borrow() {
            return Err(ApiError::Api {
                status: 409,
                error: "email_already_registered".to_string(),
            });
        }

        Ok(RegisterResponse {
            id: "u-new".to_string(),
            email: req.email.clone(),
            role: req.role,
        })
    }

    async fn resend_verification_email(
        &self,
        req: &ResendVerificationRequest,
    ) -> Result<MessageResponse, ApiError> {
        self.ctx.push_log(format!("api:resend:{}", req.role));

        if *self.ctx.fail_resend.borrow() {
            return Err(ApiError::Network("connection refused".to_string()));
        }

        Ok(MessageResponse {
            message: "verification email sent".to_string(),
        })
    }
}

fn user_for(role: UserRole) -> User {
    User {
        id: format!("u-{}", role),
        email: "a@x.com".to_string(),
        role,
        email_verified: true,
        name: None,
    }
}

fn token_for(role: UserRole) -> String {
    format!("tok-{}", role)
}

fn logic(ctx: &Rc<TestContext>) -> SessionLogic<TestStorage, TestAuthApi> {
    SessionLogic::new(
        TestStorage { ctx: ctx.clone() },
        TestAuthApi { ctx: ctx.clone() },
    )
}

// =========================================================
// login: 扇出聚合
// =========================================================

#[tokio::test]
async fn login_single_role_success() {
    let ctx = TestContext::new();
    ctx.script(UserRole::Fighter, LoginScript::Success);
    let logic = logic(&ctx);
    let mut state = AuthState::default();

    let res = logic.login(&mut state, "a@x.com", "pw").await.unwrap();

    assert_eq!(res.user.role, UserRole::Fighter);
    assert!(state.is_authenticated());
    assert_eq!(state.user_role(), Some(UserRole::Fighter));
    assert_eq!(state.available_roles.len(), 1);
    assert!(!state.has_multiple_roles());
    assert!(state.error.is_none());

    // 三个角色全部被尝试，没有短路
    let log = ctx.log.borrow();
    let attempts: Vec<_> = log.iter().filter(|e| e.starts_with("api:login")).collect();
    assert_eq!(attempts.len(), 3);
}

#[tokio::test]
async fn login_multiple_roles_activates_first_in_fixed_order() {
    let ctx = TestContext::new();
    ctx.script(UserRole::Fighter, LoginScript::Success);
    ctx.script(UserRole::Plo, LoginScript::Success);
    let logic = logic(&ctx);
    let mut state = AuthState::default();

    logic.login(&mut state, "a@x.com", "pw").await.unwrap();

    assert!(state.has_multiple_roles());
    assert_eq!(state.user_role(), Some(UserRole::Fighter));
    let roles: Vec<_> = state.available_roles.iter().map(|(r, _)| *r).collect();
    assert_eq!(roles, vec![UserRole::Fighter, UserRole::Plo]);
}

#[tokio::test]
async fn login_tiebreak_skips_missing_roles() {
    let ctx = TestContext::new();
    ctx.script(UserRole::Plo, LoginScript::Success);
    ctx.script(UserRole::Spectator, LoginScript::Success);
    let logic = logic(&ctx);
    let mut state = AuthState::default();

    logic.login(&mut state, "a@x.com", "pw").await.unwrap();

    // fighter 未成功，按固定顺序激活 plo
    assert_eq!(state.user_role(), Some(UserRole::Plo));
    assert_eq!(state.available_roles.len(), 2);
}

#[tokio::test]
async fn login_network_failure_of_one_role_is_swallowed() {
    let ctx = TestContext::new();
    ctx.script(UserRole::Fighter, LoginScript::NetworkDown);
    ctx.script(UserRole::Plo, LoginScript::Success);
    let logic = logic(&ctx);
    let mut state = AuthState::default();

    logic.login(&mut state, "a@x.com", "pw").await.unwrap();

    assert_eq!(state.user_role(), Some(UserRole::Plo));
    assert!(state.error.is_none());
}

#[tokio::test]
async fn login_all_rejected_is_unauthorized() {
    let ctx = TestContext::new();
    let logic = logic(&ctx);
    let mut state = AuthState::default();

    let err = logic.login(&mut state, "a@x.com", "bad").await.unwrap_err();

    assert_eq!(err, AuthError::Unauthorized);
    assert_eq!(state.error.as_deref(), Some(ERROR_UNAUTHORIZED));
    assert!(!state.is_authenticated());
    assert!(state.available_roles.is_empty());
    // 全部失败时不得写入存储
    assert_eq!(ctx.storage_writes(), 0);
}

#[tokio::test]
async fn login_unverified_sentinel_wins_over_unauthorized() {
    let ctx = TestContext::new();
    ctx.script(UserRole::Plo, LoginScript::NotVerified);
    let logic = logic(&ctx);
    let mut state = AuthState::default();

    let err = logic.login(&mut state, "a@x.com", "pw").await.unwrap_err();

    assert_eq!(err, AuthError::EmailNotVerified);
    assert_eq!(state.error.as_deref(), Some(ERROR_EMAIL_NOT_VERIFIED));
    assert!(!state.is_authenticated());
}

#[tokio::test]
async fn login_success_ignores_unverified_sentinel() {
    let ctx = TestContext::new();
    ctx.script(UserRole::Fighter, LoginScript::Success);
    ctx.script(UserRole::Plo, LoginScript::NotVerified);
    let logic = logic(&ctx);
    let mut state = AuthState::default();

    logic.login(&mut state, "a@x.com", "pw").await.unwrap();

    // 未验证的角色不进入集合，也不产生错误
    assert_eq!(state.available_roles.len(), 1);
    assert_eq!(state.user_role(), Some(UserRole::Fighter));
    assert!(state.error.is_none());
}

#[tokio::test]
async fn login_replaces_stale_roles_from_previous_login() {
    let ctx = TestContext::new();
    ctx.script(UserRole::Fighter, LoginScript::Success);
    ctx.script(UserRole::Plo, LoginScript::Success);
    let logic = logic(&ctx);
    let mut state = AuthState::default();
    logic.login(&mut state, "a@x.com", "pw").await.unwrap();
    assert!(state.has_multiple_roles());

    // 第二次登录只有 spectator 成功，旧角色集合必须被整体丢弃
    ctx.script(UserRole::Fighter, LoginScript::WrongPassword);
    ctx.script(UserRole::Plo, LoginScript::WrongPassword);
    ctx.script(UserRole::Spectator, LoginScript::Success);
    logic.login(&mut state, "a@x.com", "pw").await.unwrap();

    assert_eq!(state.user_role(), Some(UserRole::Spectator));
    assert_eq!(state.available_roles.len(), 1);
}

// =========================================================
// switch_role
// =========================================================

#[tokio::test]
async fn switch_role_activates_available_session() {
    let ctx = TestContext::new();
    ctx.script(UserRole::Fighter, LoginScript::Success);
    ctx.script(UserRole::Plo, LoginScript::Success);
    let logic = logic(&ctx);
    let mut state = AuthState::default();
    logic.login(&mut state, "a@x.com", "pw").await.unwrap();

    assert!(logic.switch_role(&mut state, UserRole::Plo));

    assert_eq!(state.user_role(), Some(UserRole::Plo));
    assert_eq!(state.token.as_deref(), Some("tok-plo"));
    // 切换不改变集合成员
    assert_eq!(state.available_roles.len(), 2);
    // 切换后重新持久化
    assert_eq!(
        ctx.storage.borrow().get(STORAGE_TOKEN_KEY).map(String::as_str),
        Some("tok-plo")
    );
}

#[tokio::test]
async fn switch_role_unknown_is_a_noop() {
    let ctx = TestContext::new();
    ctx.script(UserRole::Fighter, LoginScript::Success);
    let logic = logic(&ctx);
    let mut state = AuthState::default();
    logic.login(&mut state, "a@x.com", "pw").await.unwrap();

    let before = state.clone();
    let writes_before = ctx.storage_writes();

    assert!(!logic.switch_role(&mut state, UserRole::Admin));

    assert_eq!(state, before);
    assert_eq!(ctx.storage_writes(), writes_before);
}

// =========================================================
// logout / restore
// =========================================================

#[tokio::test]
async fn logout_clears_state_and_storage() {
    let ctx = TestContext::new();
    ctx.script(UserRole::Fighter, LoginScript::Success);
    let logic = logic(&ctx);
    let mut state = AuthState::default();
    logic.login(&mut state, "a@x.com", "pw").await.unwrap();

    logic.logout(&mut state);

    assert!(!state.is_authenticated());
    assert!(state.available_roles.is_empty());
    assert!(ctx.storage.borrow().is_empty());

    // 注销后的 restore 不得复活任何会话
    let mut fresh = AuthState::default();
    logic.restore(&mut fresh);
    assert!(!fresh.is_authenticated());
}

#[tokio::test]
async fn restore_round_trips_a_persisted_login() {
    let ctx = TestContext::new();
    ctx.script(UserRole::Fighter, LoginScript::Success);
    ctx.script(UserRole::Plo, LoginScript::Success);
    let logic = logic(&ctx);
    let mut state = AuthState::default();
    logic.login(&mut state, "a@x.com", "pw").await.unwrap();

    // 模拟进程重启：全新状态从同一存储恢复
    let mut fresh = AuthState::default();
    logic.restore(&mut fresh);

    assert!(fresh.is_authenticated());
    assert_eq!(fresh.user, state.user);
    assert_eq!(fresh.token, state.token);
    assert_eq!(fresh.available_roles, state.available_roles);
}

#[tokio::test]
async fn restore_legacy_storage_seeds_single_role() {
    let ctx = TestContext::new();
    let logic = logic(&ctx);

    // 旧版数据：只有 token 和 user，没有角色集合
    let user = user_for(UserRole::Plo);
    ctx.storage
        .borrow_mut()
        .insert(STORAGE_TOKEN_KEY.to_string(), "tok-old".to_string());
    ctx.storage.borrow_mut().insert(
        STORAGE_USER_KEY.to_string(),
        serde_json::to_string(&user).unwrap(),
    );

    let mut state = AuthState::default();
    logic.restore(&mut state);

    assert!(state.is_authenticated());
    assert_eq!(state.available_roles.len(), 1);
    assert_eq!(state.available_roles[0].0, UserRole::Plo);
    assert_eq!(state.available_roles[0].1.token, "tok-old");
}

#[tokio::test]
async fn restore_is_idempotent_when_authenticated() {
    let ctx = TestContext::new();
    ctx.script(UserRole::Fighter, LoginScript::Success);
    let logic = logic(&ctx);
    let mut state = AuthState::default();
    logic.login(&mut state, "a@x.com", "pw").await.unwrap();

    // 存储里塞入另一个用户，已认证状态下 restore 必须无视它
    let other = user_for(UserRole::Spectator);
    ctx.storage.borrow_mut().insert(
        STORAGE_USER_KEY.to_string(),
        serde_json::to_string(&other).unwrap(),
    );

    logic.restore(&mut state);
    assert_eq!(state.user_role(), Some(UserRole::Fighter));
}

#[tokio::test]
async fn restore_malformed_user_fails_closed() {
    let ctx = TestContext::new();
    let logic = logic(&ctx);
    ctx.storage
        .borrow_mut()
        .insert(STORAGE_TOKEN_KEY.to_string(), "tok".to_string());
    ctx.storage
        .borrow_mut()
        .insert(STORAGE_USER_KEY.to_string(), "{garbage".to_string());
    ctx.storage.borrow_mut().insert(
        STORAGE_ROLES_KEY.to_string(),
        "[]".to_string(),
    );

    let mut state = AuthState::default();
    logic.restore(&mut state);

    assert!(!state.is_authenticated());
    assert!(ctx.storage.borrow().is_empty());
}

// =========================================================
// register / resend: 透传语义
// =========================================================

#[tokio::test]
async fn register_failure_records_error_without_touching_session() {
    let ctx = TestContext::new();
    ctx.script(UserRole::Fighter, LoginScript::Success);
    let logic = logic(&ctx);
    let mut state = AuthState::default();
    logic.login(&mut state, "a@x.com", "pw").await.unwrap();

    *ctx.fail_register.borrow_mut() = true;
    let req = RegisterRequest {
        email: "b@x.com".to_string(),
        password: "pw".to_string(),
        role: UserRole::Spectator,
    };
    let err = logic.register(&mut state, &req).await.unwrap_err();

    assert!(matches!(err, ApiError::Api { status: 409, .. }));
    assert_eq!(state.error.as_deref(), Some("email_already_registered"));
    // 会话字段原封不动
    assert_eq!(state.user_role(), Some(UserRole::Fighter));
    assert_eq!(state.available_roles.len(), 1);
}

#[tokio::test]
async fn register_success_passes_through() {
    let ctx = TestContext::new();
    let logic = logic(&ctx);
    let mut state = AuthState::default();

    let req = RegisterRequest {
        email: "b@x.com".to_string(),
        password: "pw".to_string(),
        role: UserRole::Fighter,
    };
    let res = logic.register(&mut state, &req).await.unwrap();

    assert_eq!(res.email, "b@x.com");
    assert!(!state.is_authenticated());
    assert!(state.error.is_none());
}

#[tokio::test]
async fn resend_failure_uses_fallback_message() {
    let ctx = TestContext::new();
    *ctx.fail_resend.borrow_mut() = true;
    let logic = logic(&ctx);
    let mut state = AuthState::default();

    let err = logic
        .resend_verification_email(&mut state, "a@x.com", UserRole::Fighter)
        .await
        .unwrap_err();

    // 网络错误没有业务消息，使用人类可读的回退文案
    assert!(matches!(err, ApiError::Network(_)));
    assert_eq!(
        state.error.as_deref(),
        Some("Failed to resend verification email")
    );
}

#[tokio::test]
async fn resend_success_passes_through() {
    let ctx = TestContext::new();
    let logic = logic(&ctx);
    let mut state = AuthState::default();

    let res = logic
        .resend_verification_email(&mut state, "a@x.com", UserRole::Plo)
        .await
        .unwrap();

    assert_eq!(res.message, "verification email sent");
    assert_eq!(ctx.log.borrow().last().unwrap(), "api:resend:plo");
}

// =========================================================
// RoleSession 不变量
// =========================================================

#[tokio::test]
async fn sessions_carry_the_role_they_were_obtained_for() {
    let ctx = TestContext::new();
    ctx.script(UserRole::Fighter, LoginScript::Success);
    ctx.script(UserRole::Plo, LoginScript::Success);
    ctx.script(UserRole::Spectator, LoginScript::Success);
    let logic = logic(&ctx);
    let mut state = AuthState::default();

    logic.login(&mut state, "a@x.com", "pw").await.unwrap();

    for (role, session) in &state.available_roles {
        assert_eq!(session.user.role, *role);
    }
}
