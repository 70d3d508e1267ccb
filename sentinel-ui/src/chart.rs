//! Health donut backed by the page's Chart.js global.

use js_sys::{Array, Function, Reflect};
use leptos::{html, NodeRef};
use sentinel_core::chart::{COLORS, LABELS};
use sentinel_core::{ChartDataset, ChartError, ChartRenderer};
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};

pub struct ChartJs {
    canvas: NodeRef<html::Canvas>,
}

impl ChartJs {
    pub fn new(canvas: NodeRef<html::Canvas>) -> Self {
        Self { canvas }
    }
}

impl ChartRenderer for ChartJs {
    type Handle = JsValue;

    fn create(&self, dataset: &ChartDataset) -> Result<JsValue, ChartError> {
        let canvas = self
            .canvas
            .get_untracked()
            .ok_or_else(|| ChartError::Unavailable("health chart canvas not mounted".into()))?;
        let element: web_sys::HtmlCanvasElement = (*canvas).clone();

        let constructor = chart_constructor()?;
        let config = doughnut_config(dataset)
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| ChartError::Render(e.to_string()))?;

        Reflect::construct(&constructor, &Array::of2(&element, &config))
            .map_err(|e| ChartError::Render(format!("new Chart failed: {e:?}")))
    }

    fn update(&self, handle: &JsValue, dataset: &ChartDataset) -> Result<(), ChartError> {
        let data = get(handle, "data")?;
        let datasets = get(&data, "datasets")?;
        let first = Reflect::get_u32(&datasets, 0)
            .map_err(|e| ChartError::Render(format!("chart has no dataset: {e:?}")))?;

        let values: Array = dataset
            .values()
            .iter()
            .map(|v| JsValue::from_f64(*v as f64))
            .collect();
        Reflect::set(&first, &JsValue::from_str("data"), &values)
            .map_err(|e| ChartError::Render(format!("set data failed: {e:?}")))?;

        let redraw = get(handle, "update")?;
        if !redraw.is_function() {
            return Err(ChartError::Render("chart.update is not a function".into()));
        }
        redraw
            .unchecked_into::<Function>()
            .call0(handle)
            .map_err(|e| ChartError::Render(format!("chart.update failed: {e:?}")))?;
        Ok(())
    }
}

fn chart_constructor() -> Result<Function, ChartError> {
    let window =
        web_sys::window().ok_or_else(|| ChartError::Unavailable("window not available".into()))?;
    let chart = Reflect::get(&window, &JsValue::from_str("Chart"))
        .map_err(|_| ChartError::Unavailable("failed to access window.Chart".into()))?;
    if !chart.is_function() {
        return Err(ChartError::Unavailable("Chart.js is not loaded".into()));
    }
    Ok(chart.unchecked_into::<Function>())
}

fn get(target: &JsValue, key: &str) -> Result<JsValue, ChartError> {
    Reflect::get(target, &JsValue::from_str(key))
        .map_err(|e| ChartError::Render(format!("chart.{key}: {e:?}")))
}

fn doughnut_config(dataset: &ChartDataset) -> serde_json::Value {
    serde_json::json!({
        "type": "doughnut",
        "data": {
            "labels": LABELS,
            "datasets": [{
                "data": dataset.values(),
                "backgroundColor": COLORS,
                "borderWidth": 0
            }]
        },
        "options": {
            "cutout": "72%",
            "plugins": { "legend": { "position": "bottom" } }
        }
    })
}
