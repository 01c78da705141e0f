use crate::components::icons::BookOpen;
use crate::session::use_session;
use crate::web::route::AppRoute;
use crate::web::router::use_navigate;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    let (identifier, set_identifier) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let is_loading = session.is_loading_signal();
    let is_authenticated = session.is_authenticated_signal();

    // Already-authenticated visitors go straight to the dashboard
    Effect::new({
        let navigate = navigate.clone();
        move |_| {
            if !is_loading.get() && is_authenticated.get() {
                navigate(AppRoute::Dashboard.to_path());
            }
        }
    });

    view! {
        <Show when=move || !is_loading.get() fallback=|| view! { <div class="flex items-center justify-center min-h-screen"><span class="loading loading-spinner loading-lg text-primary"></span></div> }>
            {
                let navigate = navigate.clone();
                let go_register = {
                    let navigate = navigate.clone();
                    move |_| navigate(AppRoute::Register.to_path())
                };
                let on_submit = move |ev: web_sys::SubmitEvent| {
                    ev.prevent_default();
                    if identifier.get().trim().is_empty() || password.get().is_empty() {
                        set_error_msg.set(Some("Completa todos los campos".to_string()));
                        return;
                    }

                    set_is_submitting.set(true);
                    set_error_msg.set(None);

                    let navigate = navigate.clone();
                    spawn_local(async move {
                        let result = session
                            .login(
                                identifier.get_untracked().trim().to_string(),
                                password.get_untracked(),
                            )
                            .await;
                        match result {
                            Ok(()) => navigate(AppRoute::Dashboard.to_path()),
                            Err(e) => set_error_msg.set(Some(e.message)),
                        }
                        set_is_submitting.set(false);
                    });
                };

                view! {
                    <div class="hero min-h-screen bg-base-200">
                        <div class="hero-content flex-col w-full max-w-md">
                            <div class="text-center mb-4">
                                <div class="flex flex-col items-center gap-2">
                                    <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                                        <BookOpen attr:class="h-8 w-8" />
                                    </div>
                                    <h1 class="text-3xl font-bold">"Focus-Up"</h1>
                                    <p class="text-base-content/70">
                                        "Inicia sesión para seguir tu progreso de estudio"
                                    </p>
                                </div>
                            </div>

                            <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                                <form class="card-body" on:submit=on_submit>
                                    <Show when=move || error_msg.get().is_some()>
                                        <div role="alert" class="alert alert-error text-sm py-2">
                                            <span>{move || error_msg.get().unwrap_or_default()}</span>
                                        </div>
                                    </Show>

                                    <div class="form-control">
                                        <label class="label" for="identifier">
                                            <span class="label-text">"Correo o nombre de usuario"</span>
                                        </label>
                                        <input
                                            id="identifier"
                                            type="text"
                                            placeholder="ana@ejemplo.com"
                                            on:input=move |ev| set_identifier.set(event_target_value(&ev))
                                            prop:value=identifier
                                            class="input input-bordered"
                                            required
                                        />
                                    </div>
                                    <div class="form-control">
                                        <label class="label" for="password">
                                            <span class="label-text">"Contraseña"</span>
                                        </label>
                                        <input
                                            id="password"
                                            type="password"
                                            placeholder="••••••••"
                                            on:input=move |ev| set_password.set(event_target_value(&ev))
                                            prop:value=password
                                            class="input input-bordered"
                                            required
                                        />
                                    </div>
                                    <div class="form-control mt-6">
                                        <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                            {move || if is_submitting.get() {
                                                view! { <span class="loading loading-spinner"></span> "Entrando..." }.into_any()
                                            } else {
                                                "Iniciar sesión".into_any()
                                            }}
                                        </button>
                                    </div>
                                    <p class="text-center text-sm mt-2">
                                        "¿No tienes cuenta? "
                                        <a class="link link-primary" on:click=go_register>
                                            "Regístrate"
                                        </a>
                                    </p>
                                </form>
                            </div>
                        </div>
                    </div>
                }
            }
        </Show>
    }
}
