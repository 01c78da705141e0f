use crate::components::icons::BookOpen;
use crate::session::{use_session, RegisterForm};
use crate::web::route::AppRoute;
use crate::web::router::use_navigate;
use chrono::NaiveDate;
use leptos::prelude::*;
use leptos::task::spawn_local;

fn optional(value: String) -> Option<String> {
    let value = value.trim().to_string();
    if value.is_empty() { None } else { Some(value) }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    let (nombre, set_nombre) = signal(String::new());
    let (correo, set_correo) = signal(String::new());
    let (contrasena, set_contrasena) = signal(String::new());
    let (confirmar, set_confirmar) = signal(String::new());
    let (fecha, set_fecha) = signal(String::new());
    let (pais, set_pais) = signal(String::new());
    let (genero, set_genero) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let is_loading = session.is_loading_signal();
    let is_authenticated = session.is_authenticated_signal();

    Effect::new({
        let navigate = navigate.clone();
        move |_| {
            if !is_loading.get() && is_authenticated.get() {
                navigate(AppRoute::Dashboard.to_path());
            }
        }
    });

    let go_login = {
        let navigate = navigate.clone();
        move |_| navigate(AppRoute::Login.to_path())
    };

    let on_submit = {
        let navigate = navigate.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();

            // Validation happens before any network call
            if nombre.get().trim().is_empty()
                || correo.get().trim().is_empty()
                || contrasena.get().is_empty()
                || fecha.get().is_empty()
            {
                set_error_msg.set(Some("Completa todos los campos obligatorios".to_string()));
                return;
            }
            if contrasena.get() != confirmar.get() {
                set_error_msg.set(Some("Las contraseñas no coinciden".to_string()));
                return;
            }
            let Ok(fecha_nacimiento) = NaiveDate::parse_from_str(&fecha.get(), "%Y-%m-%d") else {
                set_error_msg.set(Some("Fecha de nacimiento inválida".to_string()));
                return;
            };

            let form = RegisterForm {
                nombre_usuario: nombre.get_untracked().trim().to_string(),
                correo: correo.get_untracked().trim().to_string(),
                contrasena: contrasena.get_untracked(),
                fecha_nacimiento,
                pais: optional(pais.get_untracked()),
                genero: optional(genero.get_untracked()),
            };

            set_is_submitting.set(true);
            set_error_msg.set(None);

            let navigate = navigate.clone();
            spawn_local(async move {
                match session.register(form).await {
                    Ok(()) => navigate(AppRoute::Dashboard.to_path()),
                    Err(e) => set_error_msg.set(Some(e.message)),
                }
                set_is_submitting.set(false);
            });
        }
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-lg">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <BookOpen attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Crea tu cuenta"</h1>
                        <p class="text-base-content/70">
                            "Organiza tus sesiones de estudio con Focus-Up"
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
                            <label class="label" for="nombre">
                                <span class="label-text">"Nombre de usuario"</span>
                            </label>
                            <input
                                id="nombre"
                                type="text"
                                on:input=move |ev| set_nombre.set(event_target_value(&ev))
                                prop:value=nombre
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="correo">
                                <span class="label-text">"Correo electrónico"</span>
                            </label>
                            <input
                                id="correo"
                                type="email"
                                on:input=move |ev| set_correo.set(event_target_value(&ev))
                                prop:value=correo
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="grid grid-cols-1 md:grid-cols-2 gap-2">
                            <div class="form-control">
                                <label class="label" for="contrasena">
                                    <span class="label-text">"Contraseña"</span>
                                </label>
                                <input
                                    id="contrasena"
                                    type="password"
                                    on:input=move |ev| set_contrasena.set(event_target_value(&ev))
                                    prop:value=contrasena
                                    class="input input-bordered"
                                    required
                                />
                            </div>
                            <div class="form-control">
                                <label class="label" for="confirmar">
                                    <span class="label-text">"Confirmar contraseña"</span>
                                </label>
                                <input
                                    id="confirmar"
                                    type="password"
                                    on:input=move |ev| set_confirmar.set(event_target_value(&ev))
                                    prop:value=confirmar
                                    class="input input-bordered"
                                    required
                                />
                            </div>
                        </div>
                        <div class="form-control">
                            <label class="label" for="fecha">
                                <span class="label-text">"Fecha de nacimiento"</span>
                            </label>
                            <input
                                id="fecha"
                                type="date"
                                on:input=move |ev| set_fecha.set(event_target_value(&ev))
                                prop:value=fecha
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="grid grid-cols-1 md:grid-cols-2 gap-2">
                            <div class="form-control">
                                <label class="label" for="pais">
                                    <span class="label-text">"País (opcional)"</span>
                                </label>
                                <input
                                    id="pais"
                                    type="text"
                                    on:input=move |ev| set_pais.set(event_target_value(&ev))
                                    prop:value=pais
                                    class="input input-bordered"
                                />
                            </div>
                            <div class="form-control">
                                <label class="label" for="genero">
                                    <span class="label-text">"Género (opcional)"</span>
                                </label>
                                <select
                                    id="genero"
                                    on:change=move |ev| set_genero.set(event_target_value(&ev))
                                    prop:value=genero
                                    class="select select-bordered"
                                >
                                    <option value="">"Prefiero no decir"</option>
                                    <option value="femenino">"Femenino"</option>
                                    <option value="masculino">"Masculino"</option>
                                    <option value="otro">"Otro"</option>
                                </select>
                            </div>
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Creando cuenta..." }.into_any()
                                } else {
                                    "Registrarme".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-center text-sm mt-2">
                            "¿Ya tienes cuenta? "
                            <a class="link link-primary" on:click=go_login>
                                "Inicia sesión"
                            </a>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
