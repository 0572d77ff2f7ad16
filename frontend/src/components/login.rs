use crate::auth::{login, use_api, use_auth};
use crate::components::icons::{AlertCircle, Sprout};
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let router = use_router();

    let (phone, set_phone) = signal(String::new());
    let (otp, set_otp) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if phone.get().trim().is_empty() || otp.get().trim().is_empty() {
            set_error_msg.set(Some("Please fill in all fields".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let api = api.clone();
        let (phone_number, code) = (phone.get_untracked(), otp.get_untracked());
        spawn_local(async move {
            match login(&auth, &api, phone_number, code).await {
                Ok(role) => router.navigate_to_route(AppRoute::home_for(role), true),
                Err(e) => {
                    log::warn!("[Session] login failed: {}", e);
                    let _ = set_error_msg.try_set(Some(e.user_message().to_string()));
                }
            }
            let _ = set_is_submitting.try_set(false);
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
                        <h1 class="text-3xl font-bold">"FertiFlow"</h1>
                        <p class="text-base-content/70">"Sign in with your phone number and OTP"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <AlertCircle attr:class="h-5 w-5 shrink-0" />
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

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
                        <div class="form-control">
                            <label class="label" for="otp">
                                <span class="label-text">"OTP"</span>
                            </label>
                            <input
                                id="otp"
                                type="password"
                                inputmode="numeric"
                                placeholder="••••"
                                on:input=move |ev| set_otp.set(event_target_value(&ev))
                                prop:value=otp
                                class="input input-bordered w-full"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary w-full" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Sign In".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-center text-sm mt-2">
                            "Don't have an account? "
                            <Link to=AppRoute::Register class="link link-primary">"Register"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
