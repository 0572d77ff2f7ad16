use crate::api::FertiflowApi;
use crate::auth::use_api;
use crate::components::icons::Sprout;
use crate::components::notice::{Flash, FlashMessage};
use crate::error::ApiError;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::time::Duration;

const REGISTER_FAILED: &str = "Registration failed";

/// Creates the account and returns the confirmation to show.
pub async fn submit_registration(
    api: &FertiflowApi,
    full_name: String,
    phone_number: String,
) -> Result<String, ApiError> {
    let response = api
        .register(full_name.trim().to_string(), phone_number.trim().to_string())
        .await?;
    Ok(response
        .message
        .unwrap_or_else(|| "Registration successful".to_string()))
}

/// Where the post-registration timer leads. Nowhere once the user has
/// already moved on.
fn after_registration(current: AppRoute) -> Option<AppRoute> {
    (current == AppRoute::Register).then_some(AppRoute::Login)
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let api = use_api();
    let router = use_router();

    let (full_name, set_full_name) = signal(String::new());
    let (phone, set_phone) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (notice, set_notice) = signal(Option::<Flash>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if full_name.get().trim().is_empty() || phone.get().trim().is_empty() {
            set_notice.set(Some(Flash::Error("Please fill in all fields".to_string())));
            return;
        }

        set_is_submitting.set(true);
        set_notice.set(None);

        let api = api.clone();
        let (name, phone_number) = (full_name.get_untracked(), phone.get_untracked());
        spawn_local(async move {
            match submit_registration(&api, name, phone_number).await {
                Ok(message) => {
                    let _ = set_notice.try_set(Some(Flash::Success(message)));
                    set_timeout(
                        move || {
                            let current = router.current_route().get_untracked();
                            if let Some(next) = after_registration(current) {
                                router.navigate_to_route(next, true);
                            }
                        },
                        Duration::from_millis(1500),
                    );
                }
                Err(e) => {
                    log::warn!("[Register] failed: {}", e);
                    let _ = set_notice.try_set(Some(Flash::Error(e.user_message(REGISTER_FAILED))));
                    let _ = set_is_submitting.try_set(false);
                }
            }
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <Sprout attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Create Account"</h1>
                        <p class="text-base-content/70">"Register as a farmer to place fertilizer orders"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <FlashMessage flash=notice />

                        <div class="form-control">
                            <label class="label" for="full-name">
                                <span class="label-text">"Full Name"</span>
                            </label>
                            <input
                                id="full-name"
                                type="text"
                                placeholder="Amina Hassan"
                                on:input=move |ev| set_full_name.set(event_target_value(&ev))
                                prop:value=full_name
                                class="input input-bordered w-full"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="phone">
                                <span class="label-text">"Phone Number"</span>
                            </label>
                            <input
                                id="phone"
                                type="tel"
                                placeholder="07XXXXXXXX"
                                on:input=move |ev| set_phone.set(event_target_value(&ev))
                                prop:value=phone
                                class="input input-bordered w-full"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary w-full" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Registering..." }.into_any()
                                } else {
                                    "Register".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-center text-sm mt-2">
                            "Already have an account? "
                            <Link to=AppRoute::Login class="link link-primary">"Sign in"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{StubBackend, fixed_api};

    #[tokio::test]
    async fn success_returns_server_message() {
        let backend = StubBackend::with_rate(5.0);
        let message = submit_registration(&backend.api(), " Amina ".into(), "0788".into())
            .await
            .unwrap();
        assert_eq!(message, "Registration successful");

        let body = backend.last_request().unwrap().body.unwrap();
        assert_eq!(body, r#"{"fullName":"Amina","phoneNumber":"0788"}"#);
    }

    #[tokio::test]
    async fn failure_prefers_server_message() {
        let api = fixed_api(409, r#"{"message":"Phone number already registered"}"#);
        let err = submit_registration(&api, "A".into(), "1".into())
            .await
            .unwrap_err();
        assert_eq!(err.user_message(REGISTER_FAILED), "Phone number already registered");

        let api = fixed_api(500, "");
        let err = submit_registration(&api, "A".into(), "1".into())
            .await
            .unwrap_err();
        assert_eq!(err.user_message(REGISTER_FAILED), "Registration failed");
    }

    #[test]
    fn redirect_only_while_still_on_register() {
        assert_eq!(after_registration(AppRoute::Register), Some(AppRoute::Login));
        assert_eq!(after_registration(AppRoute::Login), None);
        assert_eq!(after_registration(AppRoute::FarmerDashboard), None);
    }
}
