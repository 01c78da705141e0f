use crate::components::icons::{Trash2, UserRound};
use crate::session::use_session;
use crate::web::route::AppRoute;
use crate::web::router::use_navigate;
use chrono::NaiveDate;
use focusup_shared::{ChangePasswordRequest, ProfileUpdate};
use leptos::prelude::*;
use leptos::task::spawn_local;

fn optional(value: String) -> Option<String> {
    let value = value.trim().to_string();
    if value.is_empty() { None } else { Some(value) }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    // Pre-fill from the store; the guard guarantees a user is present
    let current = session.current_user();
    let (nombre, set_nombre) = signal(
        current
            .as_ref()
            .map(|u| u.nombre_usuario.clone())
            .unwrap_or_default(),
    );
    let (correo, set_correo) = signal(
        current
            .as_ref()
            .map(|u| u.correo.clone())
            .unwrap_or_default(),
    );
    let (pais, set_pais) = signal(
        current
            .as_ref()
            .and_then(|u| u.pais.clone())
            .unwrap_or_default(),
    );
    let (genero, set_genero) = signal(
        current
            .as_ref()
            .and_then(|u| u.genero.clone())
            .unwrap_or_default(),
    );
    let (horario, set_horario) = signal(
        current
            .as_ref()
            .and_then(|u| u.horario_favorito.clone())
            .unwrap_or_default(),
    );
    let (fecha, set_fecha) = signal(
        current
            .as_ref()
            .and_then(|u| u.fecha_nacimiento)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
    );

    let (actual, set_actual) = signal(String::new());
    let (nueva, set_nueva) = signal(String::new());
    let (confirmar, set_confirmar) = signal(String::new());

    let (is_saving, set_is_saving) = signal(false);
    let (notification, set_notification) = signal(Option::<(String, bool)>::None);

    Effect::new(move |_| {
        if notification.get().is_some() {
            spawn_local(async move {
                gloo_timers::future::sleep(std::time::Duration::from_secs(3)).await;
                set_notification.set(None);
            });
        }
    });

    let go_dashboard = {
        let navigate = navigate.clone();
        move |_| navigate(AppRoute::Dashboard.to_path())
    };

    let on_save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if nombre.get().trim().is_empty() || correo.get().trim().is_empty() {
            set_notification.set(Some((
                "El nombre de usuario y el correo son obligatorios".to_string(),
                true,
            )));
            return;
        }

        let (Some(user), Some(token)) = (session.current_user(), session.current_token()) else {
            return;
        };

        let update = ProfileUpdate {
            nombre_usuario: Some(nombre.get_untracked().trim().to_string()),
            correo: Some(correo.get_untracked().trim().to_string()),
            pais: optional(pais.get_untracked()),
            genero: optional(genero.get_untracked()),
            horario_favorito: optional(horario.get_untracked()),
            fecha_nacimiento: NaiveDate::parse_from_str(&fecha.get_untracked(), "%Y-%m-%d").ok(),
            ..Default::default()
        };

        let api = session.api();
        set_is_saving.set(true);
        spawn_local(async move {
            match api.update_profile(&token, user.id_usuario, &update).await {
                Ok(()) => {
                    // keep the store in sync with what the backend accepted
                    session.update_user(update);
                    set_notification.set(Some(("Perfil actualizado".to_string(), false)));
                }
                Err(e) => set_notification.set(Some((e.message, true))),
            }
            set_is_saving.set(false);
        });
    };

    let on_change_password = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if actual.get().is_empty() || nueva.get().is_empty() {
            set_notification.set(Some(("Completa ambas contraseñas".to_string(), true)));
            return;
        }
        if nueva.get() != confirmar.get() {
            set_notification.set(Some(("Las contraseñas no coinciden".to_string(), true)));
            return;
        }

        let (Some(user), Some(token)) = (session.current_user(), session.current_token()) else {
            return;
        };

        let request = ChangePasswordRequest {
            contrasena_actual: actual.get_untracked(),
            contrasena_nueva: nueva.get_untracked(),
        };

        let api = session.api();
        spawn_local(async move {
            match api.change_password(&token, user.id_usuario, &request).await {
                Ok(()) => {
                    set_actual.set(String::new());
                    set_nueva.set(String::new());
                    set_confirmar.set(String::new());
                    set_notification.set(Some(("Contraseña actualizada".to_string(), false)));
                }
                Err(e) => set_notification.set(Some((e.message, true))),
            }
        });
    };

    let on_delete = {
        let navigate = navigate.clone();
        move |_| {
            let confirmed = web_sys::window()
                .and_then(|w| {
                    w.confirm_with_message(
                        "Esto eliminará tu cuenta y todos tus datos de forma permanente. ¿Continuar?",
                    )
                    .ok()
                })
                .unwrap_or(false);
            if !confirmed {
                return;
            }

            let (Some(user), Some(token)) = (session.current_user(), session.current_token())
            else {
                return;
            };

            let api = session.api();
            let navigate = navigate.clone();
            spawn_local(async move {
                match api.delete_account(&token, user.id_usuario).await {
                    Ok(()) => {
                        session.logout();
                        navigate(AppRoute::Login.to_path());
                    }
                    Err(e) => set_notification.set(Some((e.message, true))),
                }
            });
        }
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-3xl mx-auto space-y-6">
                <Show when=move || notification.get().is_some()>
                    <div class="toast toast-top toast-end z-50">
                        <div class=move || {
                            let is_err = notification.get().map(|(_, e)| e).unwrap_or(false);
                            if is_err {
                                "alert alert-error shadow-lg"
                            } else {
                                "alert alert-success shadow-lg"
                            }
                        }>
                            <span>{move || notification.get().map(|(msg, _)| msg).unwrap_or_default()}</span>
                        </div>
                    </div>
                </Show>

                <div class="navbar bg-base-100 rounded-box shadow-xl">
                    <div class="flex-1 gap-2">
                        <UserRound attr:class="text-primary h-6 w-6" />
                        <span class="text-xl font-bold">"Mi perfil"</span>
                    </div>
                    <div class="flex-none">
                        <button on:click=go_dashboard class="btn btn-ghost">"Volver al panel"</button>
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <form class="card-body" on:submit=on_save>
                        <h3 class="card-title">"Datos personales"</h3>
                        <div class="grid grid-cols-1 md:grid-cols-2 gap-2">
                            <div class="form-control">
                                <label class="label"><span class="label-text">"Nombre de usuario"</span></label>
                                <input
                                    type="text"
                                    on:input=move |ev| set_nombre.set(event_target_value(&ev))
                                    prop:value=nombre
                                    class="input input-bordered"
                                />
                            </div>
                            <div class="form-control">
                                <label class="label"><span class="label-text">"Correo electrónico"</span></label>
                                <input
                                    type="email"
                                    on:input=move |ev| set_correo.set(event_target_value(&ev))
                                    prop:value=correo
                                    class="input input-bordered"
                                />
                            </div>
                            <div class="form-control">
                                <label class="label"><span class="label-text">"País"</span></label>
                                <input
                                    type="text"
                                    on:input=move |ev| set_pais.set(event_target_value(&ev))
                                    prop:value=pais
                                    class="input input-bordered"
                                />
                            </div>
                            <div class="form-control">
                                <label class="label"><span class="label-text">"Género"</span></label>
                                <select
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
                            <div class="form-control">
                                <label class="label"><span class="label-text">"Horario favorito"</span></label>
                                <select
                                    on:change=move |ev| set_horario.set(event_target_value(&ev))
                                    prop:value=horario
                                    class="select select-bordered"
                                >
                                    <option value="">"Sin preferencia"</option>
                                    <option value="manana">"Mañana"</option>
                                    <option value="tarde">"Tarde"</option>
                                    <option value="noche">"Noche"</option>
                                </select>
                            </div>
                            <div class="form-control">
                                <label class="label"><span class="label-text">"Fecha de nacimiento"</span></label>
                                <input
                                    type="date"
                                    on:input=move |ev| set_fecha.set(event_target_value(&ev))
                                    prop:value=fecha
                                    class="input input-bordered"
                                />
                            </div>
                        </div>
                        <div class="card-actions justify-end mt-4">
                            <button class="btn btn-primary" disabled=move || is_saving.get()>
                                {move || if is_saving.get() {
                                    view! { <span class="loading loading-spinner"></span> "Guardando..." }.into_any()
                                } else {
                                    "Guardar cambios".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <form class="card-body" on:submit=on_change_password>
                        <h3 class="card-title">"Cambiar contraseña"</h3>
                        <div class="grid grid-cols-1 md:grid-cols-3 gap-2">
                            <div class="form-control">
                                <label class="label"><span class="label-text">"Actual"</span></label>
                                <input
                                    type="password"
                                    on:input=move |ev| set_actual.set(event_target_value(&ev))
                                    prop:value=actual
                                    class="input input-bordered"
                                />
                            </div>
                            <div class="form-control">
                                <label class="label"><span class="label-text">"Nueva"</span></label>
                                <input
                                    type="password"
                                    on:input=move |ev| set_nueva.set(event_target_value(&ev))
                                    prop:value=nueva
                                    class="input input-bordered"
                                />
                            </div>
                            <div class="form-control">
                                <label class="label"><span class="label-text">"Confirmar"</span></label>
                                <input
                                    type="password"
                                    on:input=move |ev| set_confirmar.set(event_target_value(&ev))
                                    prop:value=confirmar
                                    class="input input-bordered"
                                />
                            </div>
                        </div>
                        <div class="card-actions justify-end mt-4">
                            <button class="btn btn-secondary">"Actualizar contraseña"</button>
                        </div>
                    </form>
                </div>

                <div class="card bg-base-100 shadow-xl border border-error/30">
                    <div class="card-body">
                        <h3 class="card-title text-error">"Zona de peligro"</h3>
                        <p class="text-base-content/70 text-sm">
                            "Eliminar la cuenta borra tu perfil y tu historial de estudio."
                        </p>
                        <div class="card-actions justify-end">
                            <button on:click=on_delete class="btn btn-outline btn-error gap-2">
                                <Trash2 attr:class="h-4 w-4" /> "Eliminar cuenta"
                            </button>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}
