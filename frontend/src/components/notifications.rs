use crate::components::icons::Bell;
use crate::session::use_session;
use crate::web::route::AppRoute;
use crate::web::router::use_navigate;
use focusup_shared::NotificationPrefs;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn NotificationsPage() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    let (prefs, set_prefs) = signal(NotificationPrefs::default());
    let (loading, set_loading) = signal(true);
    let (is_saving, set_is_saving) = signal(false);
    let (notification, set_notification) = signal(Option::<(String, bool)>::None);

    // Load current preferences once on entry
    Effect::new(move |_| {
        let (Some(user), Some(token)) = (session.current_user(), session.current_token()) else {
            return;
        };
        let api = session.api();
        spawn_local(async move {
            match api.notification_prefs(&token, user.id_usuario).await {
                Ok(data) => set_prefs.set(data),
                Err(e) => set_notification.set(Some((e.message, true))),
            }
            set_loading.set(false);
        });
    });

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

    let on_save = move |_| {
        let (Some(user), Some(token)) = (session.current_user(), session.current_token()) else {
            return;
        };
        let api = session.api();
        let current = prefs.get_untracked();
        set_is_saving.set(true);
        spawn_local(async move {
            match api
                .save_notification_prefs(&token, user.id_usuario, &current)
                .await
            {
                Ok(()) => {
                    set_notification.set(Some(("Preferencias guardadas".to_string(), false)))
                }
                Err(e) => set_notification.set(Some((e.message, true))),
            }
            set_is_saving.set(false);
        });
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-2xl mx-auto space-y-6">
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
                        <Bell attr:class="text-primary h-6 w-6" />
                        <span class="text-xl font-bold">"Notificaciones"</span>
                    </div>
                    <div class="flex-none">
                        <button on:click=go_dashboard class="btn btn-ghost">"Volver al panel"</button>
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <Show
                            when=move || !loading.get()
                            fallback=|| view! {
                                <div class="text-center py-8">
                                    <span class="loading loading-spinner loading-md"></span>
                                </div>
                            }
                        >
                            <div class="form-control">
                                <label class="label cursor-pointer">
                                    <span class="label-text">
                                        "Recordatorios de estudio"
                                        <span class="block text-xs text-base-content/60">
                                            "Avisos para empezar tus sesiones planificadas"
                                        </span>
                                    </span>
                                    <input
                                        type="checkbox"
                                        class="toggle toggle-primary"
                                        prop:checked=move || prefs.get().recordatorios_estudio
                                        on:change=move |ev| {
                                            let checked = event_target_checked(&ev);
                                            set_prefs.update(|p| p.recordatorios_estudio = checked);
                                        }
                                    />
                                </label>
                            </div>
                            <div class="form-control">
                                <label class="label cursor-pointer">
                                    <span class="label-text">
                                        "Resumen semanal"
                                        <span class="block text-xs text-base-content/60">
                                            "Un correo con tu progreso de la semana"
                                        </span>
                                    </span>
                                    <input
                                        type="checkbox"
                                        class="toggle toggle-primary"
                                        prop:checked=move || prefs.get().resumen_semanal
                                        on:change=move |ev| {
                                            let checked = event_target_checked(&ev);
                                            set_prefs.update(|p| p.resumen_semanal = checked);
                                        }
                                    />
                                </label>
                            </div>
                            <div class="form-control">
                                <label class="label cursor-pointer">
                                    <span class="label-text">
                                        "Alertas de descanso"
                                        <span class="block text-xs text-base-content/60">
                                            "Pausas sugeridas durante sesiones largas"
                                        </span>
                                    </span>
                                    <input
                                        type="checkbox"
                                        class="toggle toggle-primary"
                                        prop:checked=move || prefs.get().alertas_descanso
                                        on:change=move |ev| {
                                            let checked = event_target_checked(&ev);
                                            set_prefs.update(|p| p.alertas_descanso = checked);
                                        }
                                    />
                                </label>
                            </div>

                            <div class="card-actions justify-end mt-4">
                                <button on:click=on_save class="btn btn-primary" disabled=move || is_saving.get()>
                                    {move || if is_saving.get() {
                                        view! { <span class="loading loading-spinner"></span> "Guardando..." }.into_any()
                                    } else {
                                        "Guardar preferencias".into_any()
                                    }}
                                </button>
                            </div>
                        </Show>
                    </div>
                </div>
            </div>
        </div>
    }
}
