//! 认证模块
//!
//! 管理会话状态，与路由系统解耦。
//! 路由服务通过注入的角色信号来执行守卫；本模块只负责会话的建立与销毁。

use crate::api::FertiflowApi;
use crate::error::ApiError;
use crate::session::{Session, SessionError, SessionStore};
use fertiflow_shared::Role;
use leptos::prelude::*;
use thiserror::Error;

/// 认证上下文
///
/// Created once at app start. The signal only changes through [`login`] and
/// [`logout`], which keep it in step with the persisted store.
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 会话状态（只读）
    pub state: ReadSignal<Session>,
    set_state: WriteSignal<Session>,
    store: StoredValue<SessionStore>,
}

impl AuthContext {
    /// 从存储恢复会话并创建上下文
    pub fn new(store: SessionStore) -> Self {
        let restored = store.load();
        if restored.is_authenticated() {
            log::info!("[Session] restored {} session", restored.role_label());
        }
        let (state, set_state) = signal(restored);
        Self {
            state,
            set_state,
            store: StoredValue::new(store),
        }
    }

    /// 获取角色信号（用于路由服务注入）
    pub fn role_signal(&self) -> Signal<Option<Role>> {
        let state = self.state;
        Signal::derive(move || state.with(Session::active_role))
    }

    /// Untracked token read for outgoing calls.
    pub fn token(&self) -> Option<String> {
        self.state.with_untracked(|s| s.token.clone())
    }

    fn establish(&self, session: Session) {
        self.set_state.set(session);
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 从 Context 获取 API 客户端
pub fn use_api() -> FertiflowApi {
    use_context::<FertiflowApi>().expect("FertiflowApi should be provided")
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoginError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl LoginError {
    /// Login failures are not distinguished on screen.
    pub fn user_message(&self) -> &'static str {
        "Invalid phone number or OTP"
    }
}

/// Exchanges phone number and OTP for a session and persists it.
pub async fn sign_in(
    api: &FertiflowApi,
    store: &SessionStore,
    phone_number: String,
    otp: String,
) -> Result<Session, LoginError> {
    let response = api.login(phone_number, otp).await?;
    let session = store.begin(&response)?;
    log::info!("[Session] signed in as {}", session.role_label());
    Ok(session)
}

/// 登录并更新上下文
///
/// 导航由路由服务监听角色变化自动完成。
pub async fn login(
    ctx: &AuthContext,
    api: &FertiflowApi,
    phone_number: String,
    otp: String,
) -> Result<Role, LoginError> {
    let store = ctx.store.get_value();
    let session = sign_in(api, &store, phone_number, otp).await?;
    let role = session.active_role().ok_or(SessionError::EmptyToken)?;
    ctx.establish(session);
    Ok(role)
}

/// 注销并清除状态
pub fn logout(ctx: &AuthContext) {
    ctx.store.with_value(SessionStore::clear);
    ctx.establish(Session::default());
    log::info!("[Session] signed out");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionKey;
    use crate::testing::{FARMER_TOKEN, StubBackend};

    #[tokio::test]
    async fn sign_in_persists_session() {
        let api = StubBackend::with_rate(5.0).api();
        let store = SessionStore::in_memory();

        let session = sign_in(&api, &store, "0788".into(), "1234".into())
            .await
            .unwrap();

        assert_eq!(session.active_role(), Some(Role::Farmer));
        assert_eq!(session.display_name.as_deref(), Some("Amina"));
        assert_eq!(store.get(SessionKey::Token).as_deref(), Some(FARMER_TOKEN));
    }

    #[tokio::test]
    async fn admin_without_name_keeps_name_absent() {
        let api = StubBackend::with_rate(5.0).api();
        let store = SessionStore::in_memory();

        let session = sign_in(&api, &store, "0700".into(), "9999".into())
            .await
            .unwrap();

        assert_eq!(session.active_role(), Some(Role::Admin));
        assert_eq!(store.get(SessionKey::DisplayName), None);
        assert_eq!(session.initial(), "A");
    }

    #[tokio::test]
    async fn rejected_login_leaves_store_empty() {
        let api = StubBackend::with_rate(5.0).api();
        let store = SessionStore::in_memory();

        let err = sign_in(&api, &store, "0788".into(), "0000".into())
            .await
            .unwrap_err();

        assert!(matches!(err, LoginError::Api(_)));
        assert_eq!(err.user_message(), "Invalid phone number or OTP");
        assert!(!store.load().is_authenticated());
    }

    #[tokio::test]
    async fn context_follows_login_and_logout() {
        let api = StubBackend::with_rate(5.0).api();
        let store = SessionStore::in_memory();
        let ctx = AuthContext::new(store.clone());
        let role = ctx.role_signal();
        assert_eq!(role.get_untracked(), None);

        let signed_in = login(&ctx, &api, "0788".into(), "1234".into())
            .await
            .unwrap();
        assert_eq!(signed_in, Role::Farmer);
        assert_eq!(role.get_untracked(), Some(Role::Farmer));
        assert_eq!(ctx.token().as_deref(), Some(FARMER_TOKEN));

        logout(&ctx);
        assert_eq!(role.get_untracked(), None);
        assert_eq!(ctx.token(), None);
        for key in SessionKey::ALL {
            assert_eq!(store.get(key), None);
        }
    }

    #[test]
    fn context_restores_persisted_session() {
        let store = SessionStore::in_memory();
        store.set(SessionKey::Token, "t");
        store.set(SessionKey::Role, "ADMIN");

        let ctx = AuthContext::new(store);
        assert_eq!(ctx.role_signal().get_untracked(), Some(Role::Admin));
    }
}
