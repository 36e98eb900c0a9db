//! costmap-wasm: WebAssembly bindings for costmap-core
//!
//! The browser fetches the two source files itself and hands the text to
//! this module. Whichever fetch finishes last triggers the join; until then
//! every view call reports that data is still loading, and a failed fetch
//! switches the module into an explicit "data unavailable" state.
//!
//! Quick start (browser)
//! ---------------------
//! ```javascript
//! import init, { offer_boundaries, offer_table, load_failed, map_view, compare } from 'costmap-wasm';
//!
//! await init();
//! fetch('countries.geojson').then(r => r.text()).then(offer_boundaries)
//!   .catch(e => load_failed('boundaries', String(e)));
//! fetch('costOfLiving.csv').then(r => r.text()).then(offer_table)
//!   .catch(e => load_failed('table', String(e)));
//!
//! // once a call above returned "ready":
//! const view = map_view();          // { metric, title, legend, fills }
//! const cmp = compare('Canada', 'France');
//! ```
//!
//! Notes
//! -----
//! - All views are plain JSON-serializable objects (`serde-wasm-bindgen`).
//! - Colors are `#rrggbb` strings; features without data use the reserved
//!   no-data color.
use std::cell::RefCell;
use wasm_bindgen::prelude::*;

use costmap_core::barrier::{BarrierEvent, BarrierState, JoinBarrier};
use costmap_core::dashboard::Dashboard;
use costmap_core::format::{hover_panel, popup};
use costmap_core::loader::{parse_boundaries, parse_rows};
use costmap_core::model::to_feature_collection;
use costmap_core::scale::ColorPolicy;
use costmap_core::{CostMapError, Metric, SortOrder};
use serde_json::json;
use serde_wasm_bindgen::to_value;

enum Phase {
    Loading(JoinBarrier),
    Ready(Dashboard),
    Unavailable(String),
}

thread_local! {
    static STATE: RefCell<Phase> = RefCell::new(Phase::Loading(JoinBarrier::new()));
}

fn log(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&msg.into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg;
}

fn js_err(e: impl ToString) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    log("Initializing cost-of-living dashboard module...");
}

/* --------------------------------------------------------------------------
   Loading (join barrier)
-------------------------------------------------------------------------- */

fn offer(feed: impl FnOnce(&JoinBarrier) -> BarrierEvent) -> String {
    STATE.with(|cell| {
        let mut phase = cell.borrow_mut();
        let event = match &*phase {
            Phase::Loading(barrier) => feed(barrier),
            Phase::Ready(_) => BarrierEvent::AlreadyJoined,
            Phase::Unavailable(reason) => BarrierEvent::Unavailable(reason.clone()),
        };
        match event {
            BarrierEvent::Joined(ds) => {
                let stats = ds.stats();
                log(&format!(
                    "✓ Joined {} of {} features with {} table rows",
                    stats.matched, stats.features, stats.rows
                ));
                *phase = Phase::Ready(Dashboard::new(ds));
            }
            BarrierEvent::Unavailable(reason) => {
                log(&format!("✗ {reason}"));
                *phase = Phase::Unavailable(reason);
            }
            BarrierEvent::Waiting | BarrierEvent::AlreadyJoined => {}
        }
        status_of(&phase)
    })
}

fn status_of(phase: &Phase) -> String {
    match phase {
        Phase::Loading(barrier) => match barrier.state() {
            BarrierState::Unavailable(reason) => format!("unavailable: {reason}"),
            _ => "waiting".to_string(),
        },
        Phase::Ready(_) => "ready".to_string(),
        Phase::Unavailable(reason) => format!("unavailable: {reason}"),
    }
}

/// Hands over the GeoJSON text. Returns `waiting`, `ready` or `unavailable: …`.
#[wasm_bindgen]
pub fn offer_boundaries(geojson: &str) -> String {
    offer(|b| b.offer_boundaries(parse_boundaries(geojson)))
}

/// Hands over the CSV text. Returns `waiting`, `ready` or `unavailable: …`.
#[wasm_bindgen]
pub fn offer_table(csv: &str) -> String {
    offer(|b| b.offer_rows(parse_rows(csv)))
}

/// Reports a failed fetch; `which` is `boundaries` or `table`.
#[wasm_bindgen]
pub fn load_failed(which: &str, message: &str) -> String {
    let err = CostMapError::NotFound(message.to_string());
    if which == "table" {
        offer(|b| b.offer_rows(Err(err)))
    } else {
        offer(|b| b.offer_boundaries(Err(err)))
    }
}

#[wasm_bindgen]
pub fn load_status() -> String {
    STATE.with(|cell| status_of(&cell.borrow()))
}

/* --------------------------------------------------------------------------
   Views
-------------------------------------------------------------------------- */

fn with_dashboard<T>(f: impl FnOnce(&mut Dashboard) -> Result<T, JsValue>) -> Result<T, JsValue> {
    STATE.with(|cell| match &mut *cell.borrow_mut() {
        Phase::Ready(dash) => f(dash),
        Phase::Loading(_) => Err(js_err("data is still loading")),
        Phase::Unavailable(reason) => Err(js_err(format!("data unavailable: {reason}"))),
    })
}

/// Selector labels in display order.
#[wasm_bindgen]
pub fn metric_labels() -> js_sys::Array {
    Metric::ALL
        .iter()
        .map(|m| JsValue::from_str(m.label()))
        .collect()
}

#[wasm_bindgen]
pub fn map_view() -> Result<JsValue, JsValue> {
    with_dashboard(|d| {
        let view = d.map_view().map_err(js_err)?;
        to_value(&view).map_err(js_err)
    })
}

/// Accepts `Cost of Living`, `Income`, `Savings Power` or the short names.
#[wasm_bindgen]
pub fn select_metric(metric: &str) -> Result<JsValue, JsValue> {
    let metric: Metric = metric.parse().map_err(js_err)?;
    with_dashboard(|d| {
        let view = d.select_metric(metric).map_err(js_err)?;
        to_value(&view).map_err(js_err)
    })
}

/// `quantile` or `sequential`.
#[wasm_bindgen]
pub fn select_policy(policy: &str) -> Result<JsValue, JsValue> {
    let policy: ColorPolicy = policy.parse().map_err(js_err)?;
    with_dashboard(|d| {
        let view = d.select_policy(policy).map_err(js_err)?;
        to_value(&view).map_err(js_err)
    })
}

/// Fill color for an arbitrary value under the current metric and policy.
#[wasm_bindgen]
pub fn color_for(value: Option<f64>) -> Result<String, JsValue> {
    with_dashboard(|d| {
        let scale = d
            .dataset()
            .color_scale(d.metric(), d.scale_config())
            .map_err(js_err)?;
        Ok(scale.color_for(value).hex())
    })
}

#[wasm_bindgen]
pub fn compare(a: &str, b: &str) -> Result<JsValue, JsValue> {
    with_dashboard(|d| {
        let cmp = d.select_pair(a, b).map_err(js_err)?;
        to_value(&json!({
            "a": cmp.a,
            "b": cmp.b,
            "costDelta": cmp.cost_delta(),
            "incomeDelta": cmp.income_delta(),
            "ppiDelta": cmp.ppi_delta(),
            "messages": cmp.metric_messages(),
            "narrative": cmp.narrative,
        }))
        .map_err(js_err)
    })
}

/// `name`, `cost`, `income` or `ppi`.
#[wasm_bindgen]
pub fn countries(sort: &str) -> Result<JsValue, JsValue> {
    let order = match sort {
        "name" => SortOrder::Name,
        other => SortOrder::Metric(other.parse().map_err(js_err)?),
    };
    with_dashboard(|d| {
        let rows: Vec<_> = d
            .table(order)
            .into_iter()
            .map(|r| {
                json!({
                    "name": r.name,
                    "costIndex": r.cost_index(),
                    "incomeIndex": r.income_index(),
                    "PPI": r.purchasing_power_index(),
                    "region": r.region.map(|x| x.name()),
                    "population": r.population,
                    "flag": r.flag_url(),
                })
            })
            .collect();
        to_value(&rows).map_err(js_err)
    })
}

#[wasm_bindgen]
pub fn scatter() -> Result<JsValue, JsValue> {
    with_dashboard(|d| to_value(&d.scatter()).map_err(js_err))
}

/// The joined features as GeoJSON, indices merged into `properties`.
#[wasm_bindgen]
pub fn geojson() -> Result<JsValue, JsValue> {
    with_dashboard(|d| {
        let fc = to_feature_collection(d.dataset().features()).map_err(js_err)?;
        to_value(&fc).map_err(js_err)
    })
}

/// Info panel text; pass no name when the pointer leaves the map.
#[wasm_bindgen]
pub fn hover_text(admin: Option<String>) -> Result<String, JsValue> {
    with_dashboard(|d| {
        let feature = admin
            .as_deref()
            .and_then(|name| d.dataset().features().iter().find(|f| f.admin == name));
        Ok(hover_panel(d.metric(), feature))
    })
}

#[wasm_bindgen]
pub fn popup_text(admin: &str) -> Result<Option<String>, JsValue> {
    with_dashboard(|d| {
        Ok(d.dataset()
            .features()
            .iter()
            .find(|f| f.admin == admin)
            .map(popup))
    })
}

#[wasm_bindgen]
pub fn get_stats() -> Result<JsValue, JsValue> {
    with_dashboard(|d| to_value(&d.dataset().stats()).map_err(js_err))
}
