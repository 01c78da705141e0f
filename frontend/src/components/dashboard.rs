use crate::components::icons::*;
use crate::session::use_session;
use crate::web::route::AppRoute;
use crate::web::router::use_navigate;
use focusup_shared::{StudyReport, StudySession};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    let user = session.user_signal();
    let (report, set_report) = signal(Option::<StudyReport>::None);
    let (loading_report, set_loading_report) = signal(true);
    let (notification, set_notification) = signal(Option::<(String, bool)>::None);

    let load_report = move || {
        let Some(user) = session.current_user() else {
            return;
        };
        let Some(token) = session.current_token() else {
            return;
        };
        let api = session.api();
        set_loading_report.set(true);
        spawn_local(async move {
            match api.study_report(&token, user.id_usuario).await {
                Ok(data) => set_report.set(Some(data)),
                Err(e) => {
                    set_notification.set(Some((
                        format!("No se pudo cargar el reporte: {}", e.message),
                        true,
                    )));
                }
            }
            set_loading_report.set(false);
        });
    };

    // Initial load once the session is settled
    Effect::new(move |_| {
        if session.state.get().is_authenticated() {
            load_report();
        }
    });

    let on_logout = {
        let navigate = navigate.clone();
        move |_| {
            session.logout();
            navigate(AppRoute::Login.to_path());
        }
    };
    let go_profile = {
        let navigate = navigate.clone();
        move |_| navigate(AppRoute::Profile.to_path())
    };
    let go_notifications = {
        let navigate = navigate.clone();
        move |_| navigate(AppRoute::Notifications.to_path())
    };
    let go_reports = {
        let navigate = navigate.clone();
        move |_| navigate(AppRoute::Reports.to_path())
    };

    // Toasts clear themselves after a few seconds
    Effect::new(move |_| {
        if notification.get().is_some() {
            spawn_local(async move {
                gloo_timers::future::sleep(std::time::Duration::from_secs(3)).await;
                set_notification.set(None);
            });
        }
    });

    let display_name = move || {
        user.get()
            .map(|u| u.nombre_usuario)
            .unwrap_or_else(|| "Usuario".to_string())
    };
    let total_minutes = move || report.with(|r| r.as_ref().map(|r| r.total_minutos).unwrap_or(0));
    let completed = move || {
        report.with(|r| {
            r.as_ref()
                .map(|r| r.completed_sessions())
                .unwrap_or(0)
        })
    };
    let streak = move || report.with(|r| r.as_ref().map(|r| r.racha_dias).unwrap_or(0));
    let recent_sessions = move || {
        report.with(|r| {
            r.as_ref()
                .map(|r| {
                    r.sesiones
                        .iter()
                        .rev()
                        .take(5)
                        .cloned()
                        .collect::<Vec<StudySession>>()
                })
                .unwrap_or_default()
        })
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
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
                        <BookOpen attr:class="text-primary h-6 w-6" />
                        <a class="btn btn-ghost text-xl">"Focus-Up"</a>
                        <span class="badge badge-neutral hidden md:inline-flex">
                            "Hola, " {display_name}
                        </span>
                    </div>
                    <div class="flex-none gap-2">
                        <button on:click=go_profile class="btn btn-ghost gap-2">
                            <UserRound attr:class="h-4 w-4" /> "Perfil"
                        </button>
                        <button on:click=go_notifications class="btn btn-ghost gap-2">
                            <Bell attr:class="h-4 w-4" /> "Notificaciones"
                        </button>
                        <button on:click=go_reports class="btn btn-ghost gap-2">
                            <BarChart2 attr:class="h-4 w-4" /> "Reportes"
                        </button>
                        <button on:click=on_logout class="btn btn-outline btn-error gap-2">
                            <LogOut attr:class="h-4 w-4" /> "Cerrar sesión"
                        </button>
                    </div>
                </div>

                <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                    <div class="stat">
                        <div class="stat-figure text-primary">
                            <Clock attr:class="inline-block w-8 h-8" />
                        </div>
                        <div class="stat-title">"Minutos estudiados"</div>
                        <div class="stat-value text-primary">{total_minutes}</div>
                    </div>

                    <div class="stat">
                        <div class="stat-figure text-success">
                            <BarChart2 attr:class="inline-block w-8 h-8" />
                        </div>
                        <div class="stat-title">"Sesiones completadas"</div>
                        <div class="stat-value text-success">{completed}</div>
                    </div>

                    <div class="stat">
                        <div class="stat-figure text-secondary">
                            <Flame attr:class="inline-block w-8 h-8" />
                        </div>
                        <div class="stat-title">"Racha"</div>
                        <div class="stat-value text-secondary">{streak} " días"</div>
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <div class="flex items-center justify-between p-6 pb-2">
                            <div>
                                <h3 class="card-title">"Sesiones recientes"</h3>
                                <p class="text-base-content/70 text-sm">
                                    "Tus últimas sesiones de estudio registradas."
                                </p>
                            </div>
                            <button on:click=move |_| load_report() disabled=move || loading_report.get() class="btn btn-ghost btn-circle">
                                <RefreshCw attr:class=move || if loading_report.get() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
                            </button>
                        </div>

                        <div class="overflow-x-auto w-full">
                            <table class="table table-zebra w-full">
                                <thead>
                                    <tr>
                                        <th>"Fecha"</th>
                                        <th>"Materia"</th>
                                        <th>"Minutos"</th>
                                        <th class="hidden md:table-cell">"Estado"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <Show when=move || recent_sessions().is_empty() && !loading_report.get()>
                                        <tr>
                                            <td colspan="4" class="text-center py-8 text-base-content/50">
                                                "Todavía no hay sesiones registradas."
                                            </td>
                                        </tr>
                                    </Show>
                                    <Show when=move || loading_report.get() && recent_sessions().is_empty()>
                                        <tr>
                                            <td colspan="4" class="text-center py-8 text-base-content/50">
                                                <span class="loading loading-spinner loading-md"></span> " Cargando..."
                                            </td>
                                        </tr>
                                    </Show>
                                    <For
                                        each=recent_sessions
                                        key=|s| s.id_sesion
                                        children=move |sesion: StudySession| {
                                            view! {
                                                <tr>
                                                    <td class="font-mono text-sm">
                                                        {sesion.fecha.format("%Y-%m-%d").to_string()}
                                                    </td>
                                                    <td>
                                                        {sesion.materia.clone().unwrap_or_else(|| "General".to_string())}
                                                    </td>
                                                    <td class="font-mono text-sm">{sesion.minutos}</td>
                                                    <td class="hidden md:table-cell">
                                                        {if sesion.completada {
                                                            view! { <div class="badge badge-success badge-outline">"Completada"</div> }.into_any()
                                                        } else {
                                                            view! { <div class="badge badge-ghost">"Parcial"</div> }.into_any()
                                                        }}
                                                    </td>
                                                </tr>
                                            }
                                        }
                                    />
                                </tbody>
                            </table>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}
