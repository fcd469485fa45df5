//! 会话持久化布局
//!
//! 三个 LocalStorage 键：
//! - `auth_token`: 原始 Bearer Token 字符串
//! - `auth_user`: 当前用户的 JSON 对象
//! - `auth_available_roles`: `[role, {user, token}]` 二元组的 JSON 数组
//!
//! 旧版（多角色支持之前）只写前两个键，读取路径对此保持兼容：
//! 角色集合缺失或无法解析时，用恢复出的 user/token 重建单条目集合。
//! 只有用户记录本身损坏才触发 fail-closed 清空。

use ringside_shared::{
    RoleSession, STORAGE_ROLES_KEY, STORAGE_TOKEN_KEY, STORAGE_USER_KEY, User, UserRole,
};

use super::{AuthState, SessionStorageAdapter};

/// 从存储恢复出的完整会话
pub struct RestoredSession {
    pub user: User,
    pub token: String,
    pub roles: Vec<(UserRole, RoleSession)>,
}

/// 持久化当前状态（未认证时不写入）
pub fn save(storage: &impl SessionStorageAdapter, state: &AuthState) {
    let (Some(user), Some(token)) = (&state.user, &state.token) else {
        return;
    };

    storage.set(STORAGE_TOKEN_KEY, token);

    if let Ok(json) = serde_json::to_string(user) {
        storage.set(STORAGE_USER_KEY, &json);
    }
    if let Ok(json) = serde_json::to_string(&state.available_roles) {
        storage.set(STORAGE_ROLES_KEY, &json);
    }
}

/// 读取并解码持久化会话
///
/// - token 或 user 键缺失 → None（保持未认证，不动存储）
/// - user 记录损坏 → 清空全部键后返回 None，绝不留下半恢复的会话
/// - roles 键缺失或损坏 → 旧版兼容路径，重建单条目集合
pub fn load(storage: &impl SessionStorageAdapter) -> Option<RestoredSession> {
    let token = storage.get(STORAGE_TOKEN_KEY)?;
    let raw_user = storage.get(STORAGE_USER_KEY)?;

    let user: User = match serde_json::from_str(&raw_user) {
        Ok(user) => user,
        Err(_) => {
            clear(storage);
            return None;
        }
    };

    let roles = storage
        .get(STORAGE_ROLES_KEY)
        .and_then(|raw| serde_json::from_str::<Vec<(UserRole, RoleSession)>>(&raw).ok())
        .unwrap_or_else(|| {
            vec![(
                user.role,
                RoleSession {
                    user: user.clone(),
                    token: token.clone(),
                },
            )]
        });

    Some(RestoredSession { user, token, roles })
}

/// 删除全部会话键
pub fn clear(storage: &impl SessionStorageAdapter) {
    storage.delete(STORAGE_TOKEN_KEY);
    storage.delete(STORAGE_USER_KEY);
    storage.delete(STORAGE_ROLES_KEY);
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;

    struct MapStorage {
        map: RefCell<HashMap<String, String>>,
    }

    impl MapStorage {
        fn new() -> Self {
            Self {
                map: RefCell::new(HashMap::new()),
            }
        }
    }

    impl SessionStorageAdapter for MapStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.map.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) -> bool {
            self.map
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            true
        }

        fn delete(&self, key: &str) -> bool {
            self.map.borrow_mut().remove(key).is_some()
        }
    }

    fn fighter_user() -> User {
        User {
            id: "u-1".to_string(),
            email: "a@x.com".to_string(),
            role: UserRole::Fighter,
            email_verified: true,
            name: None,
        }
    }

    #[test]
    fn roles_record_is_an_array_of_pairs() {
        let storage = MapStorage::new();
        let user = fighter_user();
        let state = AuthState {
            user: Some(user.clone()),
            token: Some("tok".to_string()),
            available_roles: vec![(
                UserRole::Fighter,
                RoleSession {
                    user,
                    token: "tok".to_string(),
                },
            )],
            ..Default::default()
        };

        save(&storage, &state);

        let raw = storage.get(STORAGE_ROLES_KEY).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let pairs = value.as_array().unwrap();
        assert_eq!(pairs.len(), 1);
        // 每个条目是 [role, {user, token}]
        assert_eq!(pairs[0][0], "fighter");
        assert_eq!(pairs[0][1]["token"], "tok");
    }

    #[test]
    fn malformed_roles_record_falls_back_to_single_entry() {
        let storage = MapStorage::new();
        storage.set(STORAGE_TOKEN_KEY, "tok");
        storage.set(
            STORAGE_USER_KEY,
            &serde_json::to_string(&fighter_user()).unwrap(),
        );
        storage.set(STORAGE_ROLES_KEY, "{not valid json");

        let restored = load(&storage).unwrap();
        assert_eq!(restored.roles.len(), 1);
        assert_eq!(restored.roles[0].0, UserRole::Fighter);
        assert_eq!(restored.roles[0].1.token, "tok");
        // 兼容路径不属于错误：存储保持原样
        assert!(storage.get(STORAGE_TOKEN_KEY).is_some());
    }

    #[test]
    fn malformed_user_record_clears_everything() {
        let storage = MapStorage::new();
        storage.set(STORAGE_TOKEN_KEY, "tok");
        storage.set(STORAGE_USER_KEY, "{not valid json");
        storage.set(STORAGE_ROLES_KEY, "[]");

        assert!(load(&storage).is_none());
        assert!(storage.get(STORAGE_TOKEN_KEY).is_none());
        assert!(storage.get(STORAGE_USER_KEY).is_none());
        assert!(storage.get(STORAGE_ROLES_KEY).is_none());
    }

    #[test]
    fn missing_keys_leave_storage_untouched() {
        let storage = MapStorage::new();
        storage.set(STORAGE_TOKEN_KEY, "tok");

        assert!(load(&storage).is_none());
        // 只有损坏才清空，缺失不清空
        assert!(storage.get(STORAGE_TOKEN_KEY).is_some());
    }
}
