use crate::bridge::FetchApi;
use crate::chart::ChartJs;
use crate::view::{SignalView, ToastEntry};
use leptos::*;
use sentinel_core::table::{COLUMN_COUNT, EMPTY_MESSAGE};
use sentinel_core::{DashboardConfig, RefreshPipeline, TableRow, ToastKind};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;

type Pipeline = RefreshPipeline<FetchApi, SignalView, ChartJs>;

fn toast_class(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Success => "toast ok",
        ToastKind::Error => "toast err",
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = DashboardConfig::default();
    let state = SignalView::new(config.toast_ttl);
    let canvas = create_node_ref::<html::Canvas>();

    let pipeline: Rc<Pipeline> = Rc::new(RefreshPipeline::new(
        FetchApi::new(config.clone()),
        state,
        ChartJs::new(canvas),
    ));

    let refresh = {
        let pipeline = Rc::clone(&pipeline);
        move || {
            let pipeline = Rc::clone(&pipeline);
            spawn_local(async move {
                pipeline.load_incidents().await;
            });
        }
    };

    let create = {
        let pipeline = Rc::clone(&pipeline);
        move || {
            let pipeline = Rc::clone(&pipeline);
            let critical = js_sys::Math::random() > 0.5;
            spawn_local(async move {
                let _ = pipeline.create_incident(critical).await;
            });
        }
    };

    let explain = {
        let pipeline = Rc::clone(&pipeline);
        move |incident_id: String| {
            let pipeline = Rc::clone(&pipeline);
            spawn_local(async move {
                pipeline.explain_incident(&incident_id).await;
            });
        }
    };

    match set_interval_with_handle(refresh.clone(), config.refresh_interval) {
        Ok(handle) => on_cleanup(move || handle.clear()),
        Err(e) => {
            tracing::error!(event = "dashboard.timer.start_failed", error = ?e);
        }
    }
    refresh();

    let on_refresh = refresh.clone();

    view! {
      <div class="layout">
        <header class="topbar">
          <h1>"SentinelOneOps"</h1>
          <span class="status" style:color=move || state.connectivity.get().color()>
            {move || state.connectivity.get().label()}
          </span>
          <div class="row">
            <button class="btn" on:click=move |_| on_refresh()>"Refresh"</button>
            <button class="btn primary" on:click=move |_| create()>"Simulate incident"</button>
          </div>
        </header>

        <section class="kpis">
          <div class="kpi crit">
            <span>"Critical"</span>
            <b>{move || state.counters.get().crit.to_string()}</b>
          </div>
          <div class="kpi warn">
            <span>"Warning"</span>
            <b>{move || state.counters.get().warn.to_string()}</b>
          </div>
          <div class="kpi total">
            <span>"Total"</span>
            <b>{move || state.counters.get().total.to_string()}</b>
          </div>
          <div class="kpi chart">
            <canvas node_ref=canvas width="180" height="180"></canvas>
          </div>
        </section>

        <section class="panel">
          <h2>"Incidents"</h2>
          <table class="incidents">
            <thead>
              <tr>
                <th>"Severity"</th>
                <th>"Service"</th>
                <th>"Summary"</th>
                <th>"ID"</th>
                <th></th>
              </tr>
            </thead>
            <tbody>
              <Show
                when=move || state.table.with(|table| table.is_placeholder())
                fallback=|| ()
              >
                <tr>
                  <td colspan=COLUMN_COUNT class="placeholder">{EMPTY_MESSAGE}</td>
                </tr>
              </Show>
              <For
                each=move || state.table.with(|table| table.rows())
                key=|entry| entry.clone()
                children=move |(_, row): (usize, TableRow)| {
                    let explain = explain.clone();
                    let id = row.id.clone();
                    view! {
                      <tr>
                        <td>
                          <span class=format!("sev {}", row.badge_class)>
                            <i></i>
                            {row.badge_label}
                          </span>
                        </td>
                        <td><b>{row.service}</b></td>
                        <td class="muted">{row.summary}</td>
                        <td class="mono">{row.id}</td>
                        <td>
                          <button
                            type="button"
                            class="btn ghost small"
                            on:click=move |_| explain(id.clone())
                          >
                            "Explain"
                          </button>
                        </td>
                      </tr>
                    }
                }
              />
            </tbody>
          </table>
        </section>

        <Show
          when=move || state.explanation.get().is_some()
          fallback=|| ()
        >
          <section class="panel ai">
            <h2>
              {move || {
                  state
                      .explanation
                      .get()
                      .map(|panel| format!("Explanation for {}", panel.incident_id()))
                      .unwrap_or_default()
              }}
            </h2>
            <pre class="ai-content">
              {move || {
                  state
                      .explanation
                      .get()
                      .map(|panel| panel.text().to_string())
                      .unwrap_or_default()
              }}
            </pre>
          </section>
        </Show>

        <div class="toasts">
          <For
            each=move || state.toasts.get()
            key=|entry| entry.id
            children=move |entry: ToastEntry| view! {
              <div class=toast_class(entry.toast.kind)>
                <b>{entry.toast.title}</b>
                <br/>
                {entry.toast.message}
              </div>
            }
          />
        </div>
      </div>
    }
}
