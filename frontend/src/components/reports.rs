use crate::components::icons::{BarChart2, RefreshCw};
use crate::session::use_session;
use crate::web::route::AppRoute;
use crate::web::router::use_navigate;
use chrono::{Days, Utc};
use focusup_shared::{StudyReport, StudySession};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn ReportsPage() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    let (report, set_report) = signal(Option::<StudyReport>::None);
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let load_report = move || {
        let (Some(user), Some(token)) = (session.current_user(), session.current_token()) else {
            return;
        };
        let api = session.api();
        set_loading.set(true);
        set_error_msg.set(None);
        spawn_local(async move {
            match api.study_report(&token, user.id_usuario).await {
                Ok(data) => set_report.set(Some(data)),
                Err(e) => set_error_msg.set(Some(e.message)),
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        if session.state.get().is_authenticated() {
            load_report();
        }
    });

    let go_dashboard = {
        let navigate = navigate.clone();
        move |_| navigate(AppRoute::Dashboard.to_path())
    };

    let week_minutes = move || {
        report.with(|r| {
            r.as_ref()
                .map(|r| {
                    let today = Utc::now().date_naive();
                    let week_start = today.checked_sub_days(Days::new(6)).unwrap_or(today);
                    r.minutes_since(week_start)
                })
                .unwrap_or(0)
        })
    };
    let total_minutes = move || report.with(|r| r.as_ref().map(|r| r.total_minutos).unwrap_or(0));
    let session_count = move || report.with(|r| r.as_ref().map(|r| r.sesiones.len()).unwrap_or(0));
    let sessions = move || {
        report.with(|r| {
            r.as_ref()
                .map(|r| r.sesiones.clone())
                .unwrap_or_default()
        })
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-5xl mx-auto space-y-6">
                <div class="navbar bg-base-100 rounded-box shadow-xl">
                    <div class="flex-1 gap-2">
                        <BarChart2 attr:class="text-primary h-6 w-6" />
                        <span class="text-xl font-bold">"Reportes de estudio"</span>
                    </div>
                    <div class="flex-none gap-2">
                        <button on:click=move |_| load_report() disabled=move || loading.get() class="btn btn-ghost btn-circle">
                            <RefreshCw attr:class=move || if loading.get() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
                        </button>
                        <button on:click=go_dashboard class="btn btn-ghost">"Volver al panel"</button>
                    </div>
                </div>

                <Show when=move || error_msg.get().is_some()>
                    <div role="alert" class="alert alert-error">
                        <span>{move || error_msg.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                    <div class="stat">
                        <div class="stat-title">"Minutos esta semana"</div>
                        <div class="stat-value text-primary">{week_minutes}</div>
                        <div class="stat-desc">"Últimos 7 días"</div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">"Minutos totales"</div>
                        <div class="stat-value">{total_minutes}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">"Sesiones registradas"</div>
                        <div class="stat-value text-secondary">{session_count}</div>
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <div class="p-6 pb-2">
                            <h3 class="card-title">"Historial completo"</h3>
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
                                    <Show when=move || sessions().is_empty() && !loading.get()>
                                        <tr>
                                            <td colspan="4" class="text-center py-8 text-base-content/50">
                                                "Sin sesiones todavía. ¡Empieza a estudiar!"
                                            </td>
                                        </tr>
                                    </Show>
                                    <Show when=move || loading.get() && sessions().is_empty()>
                                        <tr>
                                            <td colspan="4" class="text-center py-8 text-base-content/50">
                                                <span class="loading loading-spinner loading-md"></span> " Cargando..."
                                            </td>
                                        </tr>
                                    </Show>
                                    <For
                                        each=sessions
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
